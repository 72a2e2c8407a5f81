//! Re-anchors column references inside caller-rendered condition text.
//!
//! The search pipeline renders a comparison such as `` `color` = 'red' ``
//! against the bare field name. Before it can be used, the column has to
//! point at the table alias that actually carries it. This is a small
//! token scanner rather than a plain text substitution, so string literals
//! and other identifiers that merely contain the column name stay intact.

use crate::query::dialect::Dialect;

/// Replaces every unqualified reference to `column` in `query`.
///
/// A backtick/double-quote quoted reference is replaced by the quoted form of
/// `replacement`, a bare one by `replacement` as given. References that are
/// already qualified (`e.color`) or act as a qualifier (`color.value`) are
/// left alone, as is anything inside a string literal.
pub fn rewrite_column(
    query: &str,
    column: &str,
    replacement: &str,
    dialect: &dyn Dialect,
) -> String {
    let quote = dialect.identifier_quote();
    let chars: Vec<char> = query.chars().collect();
    let mut out = String::with_capacity(query.len() + replacement.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' || (c == '"' && quote != '"') {
            let end = scan_string_literal(&chars, i, c);
            out.extend(&chars[i..end]);
            i = end;
        } else if c == quote {
            let (name, end) = scan_quoted_identifier(&chars, i, quote);
            if name == column && !is_qualified(&chars, i, end) {
                out.push_str(&dialect.quote_qualified(replacement));
            } else {
                out.extend(&chars[i..end]);
            }
            i = end;
        } else if is_word_char(c) {
            let end = scan_word(&chars, i);
            let word: String = chars[i..end].iter().collect();
            if word == column && !is_qualified(&chars, i, end) {
                out.push_str(replacement);
            } else {
                out.push_str(&word);
            }
            i = end;
        } else {
            out.push(c);
            i += 1;
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn scan_word(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    end
}

/// Returns the index just past the closing delimiter. Handles doubled
/// delimiters and backslash escapes; an unterminated literal runs to the end.
fn scan_string_literal(chars: &[char], start: usize, delimiter: char) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == delimiter => {
                if chars.get(i + 1) == Some(&delimiter) {
                    i += 2;
                } else {
                    return i + 1;
                }
            }
            _ => i += 1,
        }
    }
    chars.len()
}

/// Returns the unescaped identifier and the index just past its closing quote.
fn scan_quoted_identifier(chars: &[char], start: usize, quote: char) -> (String, usize) {
    let mut name = String::new();
    let mut i = start + 1;
    while i < chars.len() {
        if chars[i] == quote {
            if chars.get(i + 1) == Some(&quote) {
                name.push(quote);
                i += 2;
                continue;
            }
            return (name, i + 1);
        }
        name.push(chars[i]);
        i += 1;
    }
    (name, chars.len())
}

fn is_qualified(chars: &[char], start: usize, end: usize) -> bool {
    let preceded = start > 0 && chars[start - 1] == '.';
    let followed = chars.get(end) == Some(&'.');
    preceded || followed
}

#[cfg(test)]
mod tests {
    use super::rewrite_column;
    use crate::query::dialect::{MySql, Postgres};

    #[test]
    fn test_rewrite_bare_reference() {
        assert_eq!(
            rewrite_column("color = 'red'", "color", "at_color.color", &MySql),
            "at_color.color = 'red'"
        );
    }

    #[test]
    fn test_rewrite_quoted_reference() {
        assert_eq!(
            rewrite_column("`price` > 10", "price", "price_index.min_price", &MySql),
            "`price_index`.`min_price` > 10"
        );
        assert_eq!(
            rewrite_column(r#""price" < 5"#, "price", "price_index.min_price", &Postgres),
            r#""price_index"."min_price" < 5"#
        );
    }

    #[test]
    fn test_string_literals_untouched() {
        assert_eq!(
            rewrite_column("color = 'color'", "color", "at_color.color", &MySql),
            "at_color.color = 'color'"
        );
        assert_eq!(
            rewrite_column(r"color = 'it\'s color'", "color", "a.color", &MySql),
            r"a.color = 'it\'s color'"
        );
        assert_eq!(
            rewrite_column(r#"color = "color""#, "color", "a.color", &MySql),
            r#"a.color = "color""#
        );
    }

    #[test]
    fn test_longer_and_qualified_identifiers_untouched() {
        assert_eq!(
            rewrite_column(
                "color_family = 1 AND e.color = 2 AND color.value = 3",
                "color",
                "a.color",
                &MySql
            ),
            "color_family = 1 AND e.color = 2 AND color.value = 3"
        );
    }

    #[test]
    fn test_every_reference_rewritten() {
        assert_eq!(
            rewrite_column(
                "(price >= 10 AND price < 20)",
                "price",
                "price_index.min_price",
                &MySql
            ),
            "(price_index.min_price >= 10 AND price_index.min_price < 20)"
        );
    }

    #[test]
    fn test_malformed_text_passes_through() {
        assert_eq!(
            rewrite_column("color = 'unterminated", "color", "a.color", &MySql),
            "a.color = 'unterminated"
        );
    }
}
