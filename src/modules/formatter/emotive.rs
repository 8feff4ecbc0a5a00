use lazy_static::lazy_static;
use regex::Regex;

pub const INTERJECTIONS: [&str; 22] = [
    "ah", "um", "hm", "oh", "wow", "huh", "eh", "uh", "haha", "hehe", "tsk", "sigh", "aww", "oops",
    "yay", "whew", "pfft", "eek", "ack", "hmph", "erm", "well",
];

lazy_static! {
    // The delimiters must hug the text: "*sigh*" is emphasis, "2 * 3 * 4" is not.
    static ref EMPHASIS_RE: Regex =
        Regex::new(r"\*([^\s*`\\](?:[^*`\\\n]*[^\s*`\\])?)\*").expect("valid regex");
    static ref INTERJECTION_RE: Regex = Regex::new(&interjection_pattern()).expect("valid regex");
}

// Every letter may repeat, so "aaah" and "hmmmm" match "ah" and "hm".
fn interjection_pattern() -> String {
    let words: Vec<String> = INTERJECTIONS
        .iter()
        .map(|word| word.chars().map(|c| format!("{}+", c)).collect())
        .collect();
    format!(r"(?i)\b(?:{})\b", words.join("|"))
}

/// Byte range of an emotive expression in the source text and the text to
/// show in monospace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotiveSpan {
    pub start: usize,
    pub end: usize,
    pub inner: String,
}

// Emphasis inside a word ("a*b and c*d") is arithmetic or a glob, not a
// stage direction.
fn stands_alone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Emphasis-delimited and interjection matches, sorted by start and with
/// overlapping matches dropped in favour of the earlier, longer one.
pub fn find_emotive_spans(text: &str) -> Vec<EmotiveSpan> {
    let mut spans: Vec<EmotiveSpan> = EMPHASIS_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if !stands_alone(text, whole.start(), whole.end()) {
                return None;
            }
            let inner = caps.get(1)?.as_str().trim();
            if inner.is_empty() {
                return None;
            }
            Some(EmotiveSpan {
                start: whole.start(),
                end: whole.end(),
                inner: inner.to_string(),
            })
        })
        .collect();

    spans.extend(INTERJECTION_RE.find_iter(text).map(|m| EmotiveSpan {
        start: m.start(),
        end: m.end(),
        inner: m.as_str().to_string(),
    }));

    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<EmotiveSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match kept.last() {
            Some(last) if span.start < last.end => continue,
            _ => kept.push(span),
        }
    }
    kept
}
