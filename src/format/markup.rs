//! Inline markup resolution for formatted text
//!
//! Recognizes line breaks, `[NAME]:` speaker tags, and `*emphasis*`. This is a
//! pure function of the text; renderers decide how each span looks.

use serde::{Deserialize, Serialize};

/// A styled piece of formatted text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Span {
    Text(String),
    /// Speaker tag including brackets and colon, e.g. `[JORDAN]:`
    Speaker(String),
    /// Inner text of `*...*`
    Emphasis(String),
    LineBreak,
}

/// Split formatted text into styled spans
pub fn spans(text: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match c {
            '\n' => {
                flush(&mut plain, &mut out);
                out.push(Span::LineBreak);
                rest = &rest[1..];
            }
            '[' => match speaker_tag(rest) {
                Some(len) => {
                    flush(&mut plain, &mut out);
                    out.push(Span::Speaker(rest[..len].to_string()));
                    rest = &rest[len..];
                }
                None => {
                    plain.push('[');
                    rest = &rest[1..];
                }
            },
            '*' => match rest[1..].find('*') {
                Some(end) if end > 0 => {
                    flush(&mut plain, &mut out);
                    out.push(Span::Emphasis(rest[1..=end].to_string()));
                    rest = &rest[end + 2..];
                }
                _ => {
                    plain.push('*');
                    rest = &rest[1..];
                }
            },
            _ => {
                plain.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    flush(&mut plain, &mut out);
    out
}

/// Length in bytes of a `[NAME]:` tag at the start of `text`
fn speaker_tag(text: &str) -> Option<usize> {
    let close = text.find(']')?;
    let name = &text[1..close];
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_whitespace() || c == '\'');
    if valid && text[close + 1..].starts_with(':') {
        Some(close + 2)
    } else {
        None
    }
}

fn flush(plain: &mut String, out: &mut Vec<Span>) {
    if !plain.is_empty() {
        out.push(Span::Text(std::mem::take(plain)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_tag_and_emphasis() {
        let spans = spans("[DJ 'DEEJ' SLAVIN]: This is *huge*.\nReady?");

        assert_eq!(
            spans,
            vec![
                Span::Speaker("[DJ 'DEEJ' SLAVIN]:".to_string()),
                Span::Text(" This is ".to_string()),
                Span::Emphasis("huge".to_string()),
                Span::Text(".".to_string()),
                Span::LineBreak,
                Span::Text("Ready?".to_string()),
            ]
        );
    }

    #[test]
    fn lowercase_brackets_are_plain_text() {
        assert_eq!(
            spans("[note]: keep"),
            vec![Span::Text("[note]: keep".to_string())]
        );
    }

    #[test]
    fn lone_asterisks_are_plain_text() {
        assert_eq!(spans("5 * 3"), vec![Span::Text("5 * 3".to_string())]);
        assert_eq!(spans("**"), vec![Span::Text("**".to_string())]);
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(
            spans("café *très* bien"),
            vec![
                Span::Text("café ".to_string()),
                Span::Emphasis("très".to_string()),
                Span::Text(" bien".to_string()),
            ]
        );
    }
}
