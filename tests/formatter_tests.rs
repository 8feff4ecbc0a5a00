pub mod mock;

use mock::{MockSink, RecordingSink};
use persona_chat::api::{Markup, SendError};
use persona_chat::modules::formatter::{
    deliver_reply, format_reply, split_message, CONTINUED_PREFIX, CONTINUED_SUFFIX,
    MAX_MESSAGE_CHARS,
};

#[test]
fn test_escaping_round_trip() {
    let message = format_reply("Hello *sigh* world! #tag");

    assert_eq!(message.markup, Markup::Escaped);
    assert_eq!(message.text, "Hello `sigh` world\\! \\#tag");

    let unescaped_ticks = message
        .text
        .char_indices()
        .filter(|(i, c)| *c == '`' && (*i == 0 || !message.text[..*i].ends_with('\\')))
        .count();
    assert_eq!(unescaped_ticks, 2);
}

#[test]
fn test_plain_reply_is_untouched() {
    let text = "I am Groot. (Really!) #1";
    let message = format_reply(text);
    assert_eq!(message.markup, Markup::Plain);
    assert_eq!(message.text, text);
}

#[test]
fn test_interjection_rendered_monospace() {
    let message = format_reply("Hmmmm, interesting_case.");
    assert_eq!(message.text, "`Hmmmm`, interesting\\_case\\.");
}

#[test]
fn test_nine_thousand_char_reply_splits() {
    let paragraph = "x".repeat(900);
    let text = vec![paragraph; 10].join("\n\n");
    assert!(text.chars().count() >= 9000);

    let chunks = split_message(&text, Markup::Plain);
    assert!(chunks.len() >= 3);

    let last = chunks.len() - 1;
    for (i, chunk) in chunks.iter().enumerate() {
        assert!(chunk.chars().count() <= MAX_MESSAGE_CHARS);
        assert_eq!(chunk.starts_with(CONTINUED_PREFIX), i > 0, "chunk {}", i);
        assert_eq!(chunk.ends_with(CONTINUED_SUFFIX), i < last, "chunk {}", i);
    }
}

#[test]
fn test_unbroken_reply_splits() {
    let text = "y".repeat(9000);
    let chunks = split_message(&text, Markup::Plain);

    assert_eq!(chunks.len(), 3);
    let body: String = chunks
        .iter()
        .map(|c| c.trim_start_matches(CONTINUED_PREFIX).trim_end_matches(CONTINUED_SUFFIX))
        .collect();
    assert_eq!(body, text);
}

#[tokio::test]
async fn test_rejected_markup_falls_back_to_plain() {
    let sink = RecordingSink::new().rejecting_escaped();
    let report = deliver_reply(&sink, 11, "*sigh* Fine. You win!").await;

    assert_eq!(report.fell_back, 1);
    let sent = sink.last().unwrap();
    assert_eq!(sent.markup, Markup::Plain);
    assert_eq!(sent.text, "sigh Fine. You win!");
}

#[tokio::test]
async fn test_double_failure_is_logged_and_dropped() {
    let mut sink = MockSink::new();
    sink.expect_send_text()
        .withf(|chat_id, message| *chat_id == 11 && message.markup == Markup::Escaped)
        .times(1)
        .returning(|_, _| Err(SendError::Rejected("bad entities".to_string())));
    sink.expect_send_text()
        .withf(|_, message| message.markup == Markup::Plain && message.text == "oops, sorry")
        .times(1)
        .returning(|_, _| Err(SendError::Transport("connection reset".to_string())));

    let report = deliver_reply(&sink, 11, "oops, sorry").await;
    assert_eq!(report.dropped, 1);
    assert_eq!(report.sent, 0);
}

#[test]
fn test_delivery_from_sync_code() {
    let sink = RecordingSink::new();
    let report = tokio_test::block_on(deliver_reply(&sink, 2, "Plain words only"));

    assert_eq!(report.sent, 1);
    assert_eq!(sink.texts(), vec!["Plain words only".to_string()]);
}
