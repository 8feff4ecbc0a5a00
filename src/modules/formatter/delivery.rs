use crate::api::types::{ChatId, Markup, MessageSink, OutboundMessage};
use crate::modules::formatter::chunker::split_message;
use crate::modules::formatter::emotive::find_emotive_spans;
use crate::modules::formatter::escape::{escape_markup, strip_code_spans};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent: usize,
    pub fell_back: usize,
    pub dropped: usize,
}

/// Renders emotive expressions as monospace spans and escapes everything
/// else. Text without any emotive expression is returned as plain text.
pub fn format_reply(text: &str) -> OutboundMessage {
    let spans = find_emotive_spans(text);
    if spans.is_empty() {
        return OutboundMessage::plain(text);
    }

    let mut rendered = String::with_capacity(text.len() + 16);
    let mut cursor = 0;
    for span in &spans {
        rendered.push_str(&escape_markup(&text[cursor..span.start]));
        rendered.push('`');
        rendered.push_str(&span.inner);
        rendered.push('`');
        cursor = span.end;
    }
    rendered.push_str(&escape_markup(&text[cursor..]));

    OutboundMessage::escaped(rendered)
}

/// Sends a message, splitting it when oversized. Buttons ride on the last
/// chunk. A rejected escaped chunk is resent as plain text, and dropped
/// with a log entry if that fails as well.
pub async fn deliver_message(
    sink: &dyn MessageSink,
    chat_id: ChatId,
    message: OutboundMessage,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    let chunks = split_message(&message.text, message.markup);
    let total = chunks.len();

    for (index, text) in chunks.into_iter().enumerate() {
        let buttons = if index + 1 == total {
            message.buttons.clone()
        } else {
            Vec::new()
        };
        let chunk = OutboundMessage {
            text,
            markup: message.markup,
            buttons,
        };

        let error = match sink.send_text(chat_id, &chunk).await {
            Ok(()) => {
                report.sent += 1;
                continue;
            }
            Err(e) => e,
        };

        if chunk.markup == Markup::Plain {
            tracing::error!(chat_id, chunk = index, error = %error, "dropping undeliverable chunk");
            report.dropped += 1;
            continue;
        }

        tracing::warn!(chat_id, chunk = index, error = %error, "formatted chunk rejected, retrying as plain text");
        let fallback = OutboundMessage {
            text: strip_code_spans(&chunk.text),
            markup: Markup::Plain,
            buttons: chunk.buttons,
        };

        match sink.send_text(chat_id, &fallback).await {
            Ok(()) => report.fell_back += 1,
            Err(e) => {
                tracing::error!(chat_id, chunk = index, error = %e, "plain-text fallback failed, dropping chunk");
                report.dropped += 1;
            }
        }
    }

    report
}

pub async fn deliver_reply(sink: &dyn MessageSink, chat_id: ChatId, reply: &str) -> DeliveryReport {
    deliver_message(sink, chat_id, format_reply(reply)).await
}

#[cfg(test)]
mod tests {
    use super::{deliver_message, deliver_reply, format_reply};
    use crate::_test_mock::RecordingSink;
    use crate::api::types::{Button, CallbackAction, Markup, OutboundMessage};

    #[test]
    fn test_format_reply_with_emotive_span() {
        let message = format_reply("Hello *sigh* world! #tag");
        assert_eq!(message.markup, Markup::Escaped);
        assert_eq!(message.text, "Hello `sigh` world\\! \\#tag");
        assert_eq!(message.text.matches('`').count(), 2);
    }

    #[test]
    fn test_format_reply_without_spans_is_plain() {
        let message = format_reply("Elementary, my dear Watson. (Obviously!)");
        assert_eq!(message.markup, Markup::Plain);
        assert_eq!(message.text, "Elementary, my dear Watson. (Obviously!)");
    }

    #[test]
    fn test_arithmetic_stays_plain() {
        for text in ["2 * 3 * 4 = 24", "a*b and c*d"] {
            let message = format_reply(text);
            assert_eq!(message.markup, Markup::Plain);
            assert_eq!(message.text, text);
        }
    }

    #[test]
    fn test_span_contents_are_not_escaped() {
        let message = format_reply("*raises eyebrow.* Indeed.");
        assert_eq!(message.text, "`raises eyebrow.` Indeed\\.");
    }

    #[tokio::test]
    async fn test_fallback_to_plain() {
        let sink = RecordingSink::new().rejecting_escaped();
        let report = deliver_reply(&sink, 7, "Hmm... *sigh* fine!").await;

        assert_eq!(report.sent, 0);
        assert_eq!(report.fell_back, 1);
        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.markup, Markup::Plain);
        assert_eq!(sent[0].1.text, "Hmm... sigh fine!");
    }

    #[tokio::test]
    async fn test_total_failure_is_dropped() {
        let sink = RecordingSink::new().rejecting_all();
        let report = deliver_reply(&sink, 7, "*sigh*").await;

        assert_eq!(report.dropped, 1);
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn test_buttons_on_last_chunk_only() {
        let sink = RecordingSink::new();
        let text = vec!["b".repeat(3000); 3].join("\n\n");
        let message = OutboundMessage::plain(text)
            .with_button(Button::new("Help", &CallbackAction::Help));

        let report = deliver_message(&sink, 1, message).await;
        assert_eq!(report.sent, 3);

        let sent = sink.sent();
        assert!(sent[0].1.buttons.is_empty());
        assert!(sent[1].1.buttons.is_empty());
        assert_eq!(sent[2].1.buttons.len(), 1);
    }
}
