/// Characters the outbound markup reserves. The backslash is included so a
/// literal one in the reply cannot swallow the next escape.
pub const RESERVED_CHARS: [char; 19] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

pub fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        if is_reserved(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Turns escaped markup back into plain text: monospace delimiters are
/// dropped and escape backslashes removed.
pub fn strip_code_spans(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&next) if is_reserved(next) => {
                    plain.push(next);
                    chars.next();
                }
                _ => plain.push(c),
            },
            '`' => {}
            _ => plain.push(c),
        }
    }
    plain
}
