use crate::api::types::Markup;
use crate::modules::formatter::escape::escape_markup;

/// Per-message limit in Unicode scalar values.
pub const MAX_MESSAGE_CHARS: usize = 4000;
pub const CONTINUED_SUFFIX: &str = "\n\n(continued)";
pub const CONTINUED_PREFIX: &str = "(continued)\n\n";

const PARAGRAPH_BREAK: &str = "\n\n";

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Splits outbound text into messages of at most `MAX_MESSAGE_CHARS`,
/// markers included. Paragraphs are packed greedily; a paragraph that can
/// never fit is cut at the last safe newline or space.
pub fn split_message(text: &str, markup: Markup) -> Vec<String> {
    if char_len(text) <= MAX_MESSAGE_CHARS {
        return vec![text.to_string()];
    }

    let (prefix, suffix) = match markup {
        Markup::Plain => (CONTINUED_PREFIX.to_string(), CONTINUED_SUFFIX.to_string()),
        Markup::Escaped => (escape_markup(CONTINUED_PREFIX), escape_markup(CONTINUED_SUFFIX)),
    };
    let budget = MAX_MESSAGE_CHARS - char_len(&prefix) - char_len(&suffix);

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for paragraph in text.split(PARAGRAPH_BREAK) {
        let paragraph_len = char_len(paragraph);

        if paragraph_len > budget {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let mut pieces = hard_split(paragraph, budget, markup);
            let tail = pieces.pop().unwrap_or_default();
            chunks.extend(pieces);
            current_len = char_len(&tail);
            current = tail;
            continue;
        }

        if current.is_empty() {
            current.push_str(paragraph);
            current_len = paragraph_len;
        } else if current_len + PARAGRAPH_BREAK.len() + paragraph_len <= budget {
            current.push_str(PARAGRAPH_BREAK);
            current.push_str(paragraph);
            current_len += PARAGRAPH_BREAK.len() + paragraph_len;
        } else {
            chunks.push(std::mem::replace(&mut current, paragraph.to_string()));
            current_len = paragraph_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    let last = chunks.len().saturating_sub(1);
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut decorated = String::with_capacity(chunk.len() + prefix.len() + suffix.len());
            if i > 0 {
                decorated.push_str(&prefix);
            }
            decorated.push_str(&chunk);
            if i < last {
                decorated.push_str(&suffix);
            }
            decorated
        })
        .collect()
}

/// Positions (in chars) after which the text may be cut: never right after
/// an escaping backslash and never inside a monospace span.
fn safe_cuts(chars: &[char], markup: Markup) -> Vec<bool> {
    let mut safe = vec![true; chars.len() + 1];
    if markup == Markup::Plain {
        return safe;
    }

    let mut escaping = false;
    let mut in_code = false;
    for (i, c) in chars.iter().enumerate() {
        if escaping {
            escaping = false;
        } else if *c == '\\' && !in_code {
            escaping = true;
        } else if *c == '`' {
            in_code = !in_code;
        }
        safe[i + 1] = !escaping && !in_code;
    }
    safe
}

fn hard_split(paragraph: &str, budget: usize, markup: Markup) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest: Vec<char> = paragraph.chars().collect();

    while rest.len() > budget {
        let safe = safe_cuts(&rest, markup);
        let last_safe_where = |pred: &dyn Fn(char) -> bool| {
            (1..=budget).rev().find(|&i| safe[i] && pred(rest[i - 1]))
        };

        let cut = last_safe_where(&|c: char| c == '\n')
            .or_else(|| last_safe_where(&|c: char| c == ' '))
            .or_else(|| last_safe_where(&|_: char| true))
            .unwrap_or(budget);

        let tail = rest.split_off(cut);
        pieces.push(rest.into_iter().collect());
        rest = tail;
    }

    pieces.push(rest.into_iter().collect());
    pieces
}

#[cfg(test)]
mod tests {
    use super::{split_message, CONTINUED_PREFIX, CONTINUED_SUFFIX, MAX_MESSAGE_CHARS};
    use crate::api::types::Markup;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(split_message("hello", Markup::Plain), vec!["hello".to_string()]);
    }

    #[test]
    fn test_paragraph_packing() {
        let paragraph = "a".repeat(1500);
        let text = vec![paragraph; 6].join("\n\n");
        let chunks = split_message(&text, Markup::Plain);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_MESSAGE_CHARS));
        assert!(chunks[0].ends_with(CONTINUED_SUFFIX));
        assert!(!chunks[0].starts_with(CONTINUED_PREFIX));
        assert!(chunks[1].starts_with(CONTINUED_PREFIX));
        assert!(chunks[2].starts_with(CONTINUED_PREFIX));
        assert!(!chunks[2].ends_with(CONTINUED_SUFFIX));
    }

    #[test]
    fn test_oversized_paragraph_cut_at_space() {
        let text = "word ".repeat(1800);
        let chunks = split_message(&text, Markup::Plain);

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_MESSAGE_CHARS);
        }
        let body = chunks[0].trim_end_matches(CONTINUED_SUFFIX);
        assert!(body.ends_with(' '));
    }

    #[test]
    fn test_escaped_cut_keeps_escapes_whole() {
        let text = "\\!".repeat(3000);
        let chunks = split_message(&text, Markup::Escaped);

        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_MESSAGE_CHARS);
        }
        let first_body = chunks[0].trim_end_matches("\n\n\\(continued\\)");
        assert!(first_body.ends_with("\\!"));
        assert_eq!(first_body.chars().count() % 2, 0);
    }

    #[test]
    fn test_escaped_cut_avoids_code_span() {
        let span = format!("`{}`", "s".repeat(30));
        let text = format!("{}{}{}", "x".repeat(3960), span, "y".repeat(100));
        let chunks = split_message(&text, Markup::Escaped);

        assert_eq!(chunks.len(), 2);
        assert!(!chunks[0].contains('`'));
        assert!(chunks[1].contains(&span));
    }
}
