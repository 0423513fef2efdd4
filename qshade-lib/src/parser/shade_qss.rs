//! This module parses QSS (Qt-style stylesheet) text into an owned rule list.
//!
//! The grammar is a flat sequence of `selector, selector { property: value; }`
//! blocks with `/* */` comments. There are no at-rules or nested blocks, so a
//! small hand-rolled scanner is enough; selector strings are parsed further by
//! `crate::style::qss_matcher` when the sheet is compiled.

use log::{debug, warn};
use thiserror::Error;

use crate::style::owned_qss::{OwnedDeclaration, OwnedRule, OwnedStylesheet};

/// Errors that abort parsing. Malformed declarations inside an otherwise
/// well-formed block are skipped with a warning instead (style engines treat
/// those as recoverable).
#[derive(Debug, Error)]
pub enum QssParseError {
    #[error("unterminated comment starting at byte {0}")]
    UnterminatedComment(usize),
    #[error("unterminated rule block for selector `{0}`")]
    UnterminatedBlock(String),
    #[error("rule block at byte {0} has no selector")]
    MissingSelector(usize),
    #[error("unmatched `}}` at byte {0}")]
    UnmatchedBrace(usize),
}

/// Parse QSS text into an [`OwnedStylesheet`].
///
/// # Arguments
///
/// * `qss_content` - The stylesheet text.
///
/// # Returns
///
/// The owned rule list, or a [`QssParseError`] if the block structure is
/// broken (unterminated comment or block, stray brace, selector-less block).
pub fn parse_stylesheet(qss_content: &str) -> Result<OwnedStylesheet, QssParseError> {
    let stripped = strip_comments(qss_content)?;
    let mut rules = Vec::new();

    let mut selector_buf = String::new();
    let mut selector_start = 0usize;
    let mut chars = stripped.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                let selectors: Vec<String> = selector_buf
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if selectors.is_empty() {
                    return Err(QssParseError::MissingSelector(pos));
                }

                // Scan the block body up to the closing brace.
                let mut body = String::new();
                let mut closed = false;
                for (_, body_ch) in chars.by_ref() {
                    if body_ch == '}' {
                        closed = true;
                        break;
                    }
                    body.push(body_ch);
                }
                if !closed {
                    return Err(QssParseError::UnterminatedBlock(selectors.join(", ")));
                }

                rules.push(OwnedRule {
                    selectors,
                    declarations: parse_declarations(&body),
                });
                selector_buf.clear();
            }
            '}' => return Err(QssParseError::UnmatchedBrace(pos)),
            _ => {
                if selector_buf.trim().is_empty() {
                    selector_start = pos;
                    selector_buf.clear();
                }
                selector_buf.push(ch);
            }
        }
    }

    if !selector_buf.trim().is_empty() {
        return Err(QssParseError::MissingSelector(selector_start));
    }

    debug!("parsed {} rule blocks", rules.len());
    Ok(OwnedStylesheet { rules })
}

/// Split a block body into declarations, preserving document order.
/// A segment without a `:` (or with an empty property or value) is skipped
/// with a warning rather than failing the whole sheet.
fn parse_declarations(body: &str) -> Vec<OwnedDeclaration> {
    let mut declarations = Vec::new();
    for segment in body.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.split_once(':') {
            Some((property, value)) if !property.trim().is_empty() && !value.trim().is_empty() => {
                declarations.push(OwnedDeclaration {
                    property: property.trim().to_string(),
                    value: value.trim().to_string(),
                });
            }
            _ => warn!("skipping malformed declaration `{}`", segment),
        }
    }
    declarations
}

/// Replace `/* ... */` comments with spaces so byte positions in later
/// diagnostics stay close to the source text.
fn strip_comments(input: &str) -> Result<String, QssParseError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch == '/' && matches!(chars.peek(), Some((_, '*'))) {
            chars.next();
            let mut terminated = false;
            while let Some((_, inner)) = chars.next() {
                if inner == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    terminated = true;
                    break;
                }
            }
            if !terminated {
                return Err(QssParseError::UnterminatedComment(pos));
            }
            output.push(' ');
        } else {
            output.push(ch);
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_simple_rule() {
        let sheet = parse_stylesheet("QWidget { color: #ffffff; background-color: #1a1a1a; }")
            .expect("well-formed sheet");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selectors, vec!["QWidget"]);
        assert_eq!(
            sheet.rules[0].declarations,
            vec![
                OwnedDeclaration {
                    property: "color".to_string(),
                    value: "#ffffff".to_string(),
                },
                OwnedDeclaration {
                    property: "background-color".to_string(),
                    value: "#1a1a1a".to_string(),
                },
            ]
        );
    }

    #[test]
    fn splits_comma_groups() {
        let sheet = parse_stylesheet(
            "QScrollBar::add-line:vertical, QScrollBar::sub-line:vertical { height: 0px; }",
        )
        .expect("well-formed sheet");
        assert_eq!(
            sheet.rules[0].selectors,
            vec![
                "QScrollBar::add-line:vertical",
                "QScrollBar::sub-line:vertical"
            ]
        );
    }

    #[test]
    fn comments_are_ignored() {
        let sheet = parse_stylesheet(
            "/* header */ #appTitle { /* bold title */ font-weight: bold; }",
        )
        .expect("well-formed sheet");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].declarations.len(), 1);
    }

    #[test]
    fn malformed_declaration_is_skipped() {
        let sheet =
            parse_stylesheet("QLabel { color #fff; font-size: 12px; }").expect("recoverable");
        assert_eq!(
            sheet.rules[0].declarations,
            vec![OwnedDeclaration {
                property: "font-size".to_string(),
                value: "12px".to_string(),
            }]
        );
    }

    #[test]
    fn declaration_order_is_preserved() {
        let sheet = parse_stylesheet("QLabel { color: red; color: blue; }").expect("ok");
        let colors: Vec<&str> = sheet.rules[0]
            .declarations
            .iter()
            .map(|d| d.value.as_str())
            .collect();
        assert_eq!(colors, vec!["red", "blue"]);
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let err = parse_stylesheet("QLabel { color: red;").unwrap_err();
        assert!(matches!(err, QssParseError::UnterminatedBlock(_)));
    }

    #[test]
    fn stray_closing_brace_is_an_error() {
        let err = parse_stylesheet("} QLabel { color: red; }").unwrap_err();
        assert!(matches!(err, QssParseError::UnmatchedBrace(0)));
    }

    #[test]
    fn selectorless_block_is_an_error() {
        let err = parse_stylesheet("{ color: red; }").unwrap_err();
        assert!(matches!(err, QssParseError::MissingSelector(_)));
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        let err = parse_stylesheet("QLabel { color: red; } /* trailing").unwrap_err();
        assert!(matches!(err, QssParseError::UnterminatedComment(_)));
    }
}
