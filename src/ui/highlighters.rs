//! Syntax highlighting for the JSON export preview and the source viewer.
//!
//! Each language has a small tokenizer producing `(range, kind)` spans; [`layout`] turns the
//! spans into a coloured `LayoutJob`. Text between spans is drawn in the default colour.

use eframe::egui::{self, Color32};
use eframe::epaint::text::{LayoutJob, TextFormat};
use std::ops::Range;

/// Classes of highlighted tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    String,
    Comment,
    Number,
    /// Object key in JSON, called function or macro in Rust
    Name,
    /// Rust attribute such as `#[derive(..)]`
    Attribute,
}

/// Languages the viewer knows how to colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Json,
    Rust,
    Plain,
}

impl Language {
    /// Picks a language from a file path's extension.
    pub fn for_path(path: &str) -> Self {
        match path.rsplit('.').next() {
            Some("json") => Self::Json,
            Some("rs") => Self::Rust,
            _ => Self::Plain,
        }
    }
}

struct CodeColors {
    keyword: Color32,
    string: Color32,
    comment: Color32,
    number: Color32,
    name: Color32,
    attribute: Color32,
    default: Color32,
}

impl CodeColors {
    fn new(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                keyword: Color32::from_rgb(86, 156, 214),
                string: Color32::from_rgb(206, 145, 120),
                comment: Color32::from_rgb(106, 153, 85),
                number: Color32::from_rgb(181, 206, 168),
                name: Color32::from_rgb(156, 220, 254),
                attribute: Color32::from_rgb(197, 134, 192),
                default: Color32::from_rgb(212, 212, 212),
            }
        } else {
            Self {
                keyword: Color32::from_rgb(0, 0, 170),
                string: Color32::from_rgb(163, 21, 21),
                comment: Color32::from_rgb(0, 128, 0),
                number: Color32::from_rgb(100, 0, 150),
                name: Color32::from_rgb(0, 102, 204),
                attribute: Color32::from_rgb(128, 0, 128),
                default: Color32::BLACK,
            }
        }
    }

    fn get(&self, kind: Option<TokenKind>) -> Color32 {
        match kind {
            Some(TokenKind::Keyword) => self.keyword,
            Some(TokenKind::String) => self.string,
            Some(TokenKind::Comment) => self.comment,
            Some(TokenKind::Number) => self.number,
            Some(TokenKind::Name) => self.name,
            Some(TokenKind::Attribute) => self.attribute,
            None => self.default,
        }
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe",
    "use", "where", "while",
];

/// Byte offset just past the run of chars starting at `start` that satisfy `pred`.
fn scan_while(text: &str, start: usize, pred: impl Fn(char) -> bool) -> usize {
    text[start..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(offset, _)| start + offset)
}

/// Byte offset just past a quoted string starting at `start` (which holds the quote).
fn scan_string(text: &str, start: usize, quote: char) -> usize {
    let mut escaped = false;
    for (offset, c) in text[start + quote.len_utf8()..].char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return start + quote.len_utf8() + offset + c.len_utf8();
        }
    }
    text.len()
}

fn next_non_whitespace(text: &str, from: usize) -> Option<char> {
    text[from..].chars().find(|c| !c.is_whitespace())
}

/// Tokenizes JSON: keys, strings, numbers and the `true`/`false`/`null` literals.
pub fn tokenize_json(text: &str) -> Vec<(Range<usize>, TokenKind)> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while let Some(c) = text[i..].chars().next() {
        let end = match c {
            '"' => {
                let end = scan_string(text, i, '"');
                let kind = if next_non_whitespace(text, end) == Some(':') {
                    TokenKind::Name
                } else {
                    TokenKind::String
                };
                tokens.push((i..end, kind));
                end
            }
            '-' | '0'..='9' => {
                let end = scan_while(text, i + 1, |ch| {
                    ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-')
                });
                tokens.push((i..end, TokenKind::Number));
                end
            }
            c if c.is_ascii_alphabetic() => {
                let end = scan_while(text, i, |ch| ch.is_ascii_alphanumeric());
                if matches!(&text[i..end], "true" | "false" | "null") {
                    tokens.push((i..end, TokenKind::Keyword));
                }
                end
            }
            c => i + c.len_utf8(),
        };
        i = end;
    }
    tokens
}

/// Tokenizes Rust source closely enough for display.
///
/// Char literals are not recognized, so a `'` is always left uncoloured; that keeps lifetimes
/// from swallowing the rest of a line.
pub fn tokenize_rust(text: &str) -> Vec<(Range<usize>, TokenKind)> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while let Some(c) = text[i..].chars().next() {
        let rest = &text[i..];
        let end = if rest.starts_with("//") {
            let end = scan_while(text, i, |ch| ch != '\n');
            tokens.push((i..end, TokenKind::Comment));
            end
        } else if rest.starts_with("/*") {
            let end = rest[2..].find("*/").map_or(text.len(), |pos| i + 2 + pos + 2);
            tokens.push((i..end, TokenKind::Comment));
            end
        } else if rest.starts_with("#[") || rest.starts_with("#![") {
            let end = rest.find(']').map_or(text.len(), |pos| i + pos + 1);
            tokens.push((i..end, TokenKind::Attribute));
            end
        } else if c == '"' {
            let end = scan_string(text, i, '"');
            tokens.push((i..end, TokenKind::String));
            end
        } else if c.is_ascii_digit() {
            let end = scan_while(text, i, |ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '_');
            tokens.push((i..end, TokenKind::Number));
            end
        } else if c.is_alphabetic() || c == '_' {
            let end = scan_while(text, i, |ch| ch.is_alphanumeric() || ch == '_');
            let word = &text[i..end];
            if RUST_KEYWORDS.contains(&word) {
                tokens.push((i..end, TokenKind::Keyword));
            } else if matches!(text[end..].chars().next(), Some('(' | '!')) {
                tokens.push((i..end, TokenKind::Name));
            }
            end
        } else {
            i + c.len_utf8()
        };
        i = end;
    }
    tokens
}

/// Builds a coloured layout job from tokenized text.
pub fn layout(
    text: &str,
    tokens: &[(Range<usize>, TokenKind)],
    font_id: egui::FontId,
    dark_mode: bool,
) -> LayoutJob {
    let colors = CodeColors::new(dark_mode);
    let mut job = LayoutJob::default();
    let mut append = |range: Range<usize>, kind: Option<TokenKind>| {
        if !range.is_empty() {
            job.append(
                &text[range],
                0.0,
                TextFormat::simple(font_id.clone(), colors.get(kind)),
            );
        }
    };

    let mut cursor = 0;
    for (range, kind) in tokens {
        append(cursor..range.start, None);
        append(range.clone(), Some(*kind));
        cursor = range.end;
    }
    append(cursor..text.len(), None);
    job
}

/// Highlights JSON text.
pub fn highlight_json(text: &str, font_id: egui::FontId, dark_mode: bool) -> LayoutJob {
    layout(text, &tokenize_json(text), font_id, dark_mode)
}

/// Highlights text in the given language.
pub fn highlight(text: &str, language: Language, font_id: egui::FontId, dark_mode: bool) -> LayoutJob {
    let tokens = match language {
        Language::Json => tokenize_json(text),
        Language::Rust => tokenize_rust(text),
        Language::Plain => Vec::new(),
    };
    layout(text, &tokens, font_id, dark_mode)
}

/// Layouter for an editable JSON field, highlighting the text as typed.
pub fn json_layouter(
    ui: &egui::Ui,
    text: &dyn egui::TextBuffer,
    wrap_width: f32,
) -> std::sync::Arc<egui::Galley> {
    let font_id = egui::TextStyle::Monospace.resolve(ui.style());
    let mut job = highlight_json(text.as_str(), font_id, ui.visuals().dark_mode);
    job.wrap.max_width = wrap_width;
    ui.fonts_mut(|f| f.layout_job(job))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(text: &'a str, tokens: &[(Range<usize>, TokenKind)]) -> Vec<(&'a str, TokenKind)> {
        tokens
            .iter()
            .map(|(range, kind)| (&text[range.clone()], *kind))
            .collect()
    }

    #[test]
    fn json_keys_are_distinguished_from_values() {
        let text = r#"{"themeMode": "dark", "borderRadius": 4, "devMode": false}"#;
        let tokens = tokenize_json(text);
        assert_eq!(
            kinds(text, &tokens),
            vec![
                (r#""themeMode""#, TokenKind::Name),
                (r#""dark""#, TokenKind::String),
                (r#""borderRadius""#, TokenKind::Name),
                ("4", TokenKind::Number),
                (r#""devMode""#, TokenKind::Name),
                ("false", TokenKind::Keyword),
            ]
        );
    }

    #[test]
    fn json_strings_keep_escaped_quotes() {
        let text = r#"["a\"b", -1.5e3]"#;
        let tokens = tokenize_json(text);
        assert_eq!(
            kinds(text, &tokens),
            vec![(r#""a\"b""#, TokenKind::String), ("-1.5e3", TokenKind::Number)]
        );
    }

    #[test]
    fn rust_tokens() {
        let text = "#[test]\nfn main() { let x = 42; // done\n println!(\"hi\"); }";
        let tokens = tokenize_rust(text);
        let found = kinds(text, &tokens);
        assert!(found.contains(&("#[test]", TokenKind::Attribute)));
        assert!(found.contains(&("fn", TokenKind::Keyword)));
        assert!(found.contains(&("main", TokenKind::Name)));
        assert!(found.contains(&("42", TokenKind::Number)));
        assert!(found.contains(&("// done", TokenKind::Comment)));
        assert!(found.contains(&("println", TokenKind::Name)));
        assert!(found.contains(&("\"hi\"", TokenKind::String)));
    }

    #[test]
    fn lifetimes_do_not_start_strings() {
        let text = "fn f<'a>(s: &'a str) -> &'a str { s }";
        let tokens = tokenize_rust(text);
        assert!(tokens.iter().all(|(_, kind)| *kind != TokenKind::String));
    }

    #[test]
    fn layout_covers_entire_text() {
        let text = "{ \"k\": [1, true] }";
        let job = highlight_json(text, egui::FontId::monospace(12.0), true);
        assert_eq!(job.text, text);
    }

    #[test]
    fn language_from_extension() {
        assert_eq!(Language::for_path("src/router.rs"), Language::Rust);
        assert_eq!(Language::for_path("assets/catalog.json"), Language::Json);
        assert_eq!(Language::for_path("README"), Language::Plain);
    }
}
