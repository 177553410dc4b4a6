//! Query parsing.
//!
//! A small explicit character scanner, quote-aware and whitespace
//! delimited, feeds a one-pass grouping step. The parser is total:
//! anything it does not recognize becomes a free-text token.

use crate::query::ast::{FieldKind, OrGroup, QueryExpression, Token};
use crate::query::{DAY_SECS, MONTH_SECS, WEEK_SECS, YEAR_SECS};

/// Parse a raw query string into an OR-of-ANDs expression.
///
/// Empty and whitespace-only input yields an empty expression; the engine
/// treats that as "no query" rather than "match everything".
pub fn parse(raw: &str) -> QueryExpression {
    let mut groups = Vec::new();
    let mut current = OrGroup::default();
    let mut negate_next = false;

    for lexeme in scan(raw) {
        // Separators and connectives are only recognized unquoted and
        // unnegated; a quoted "OR" is an ordinary phrase token.
        if !lexeme.quoted && !lexeme.negated {
            if lexeme.text == "||" || lexeme.text.eq_ignore_ascii_case("or") {
                if !current.tokens.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
                negate_next = false;
                continue;
            }
            if lexeme.text == "&&" || lexeme.text.eq_ignore_ascii_case("and") {
                continue;
            }
            if lexeme.text.eq_ignore_ascii_case("not") {
                negate_next = true;
                continue;
            }
        }

        let negated = lexeme.negated || negate_next;
        negate_next = false;
        current.tokens.push(classify(&lexeme.text, negated));
    }

    if !current.tokens.is_empty() {
        groups.push(current);
    }

    QueryExpression { groups }
}

struct Lexeme {
    text: String,
    quoted: bool,
    negated: bool,
}

/// Split the input into lexemes: `!`-prefixed negation, double-quoted
/// phrases as single atoms (an unterminated quote swallows the rest),
/// otherwise maximal runs of non-whitespace.
fn scan(raw: &str) -> Vec<Lexeme> {
    let mut lexemes = Vec::new();
    let mut chars = raw.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else { break };

        let negated = first == '!';
        if negated {
            chars.next();
        }

        let mut text = String::new();
        let quoted = chars.peek() == Some(&'"');
        if quoted {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                text.push(c);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                text.push(c);
            }
        }

        if text.is_empty() && !negated {
            continue;
        }
        lexemes.push(Lexeme {
            text,
            quoted,
            negated,
        });
    }

    lexemes
}

/// Classify one lexeme into a token. Values are lowercased here so the
/// evaluator compares case-insensitively without re-normalizing.
fn classify(text: &str, negated: bool) -> Token {
    let lower = text.to_lowercase();

    let field_prefixes: [(&str, FieldKind); 10] = [
        ("name:", FieldKind::Name),
        ("description:", FieldKind::Description),
        ("desc:", FieldKind::Description),
        ("category:", FieldKind::Category),
        ("cat:", FieldKind::Category),
        ("license:", FieldKind::License),
        ("author:", FieldKind::Author),
        ("provides:", FieldKind::Provides),
        ("depends:", FieldKind::Depends),
        ("dep:", FieldKind::Depends),
    ];
    for (prefix, kind) in field_prefixes {
        if let Some(value) = lower.strip_prefix(prefix) {
            return Token {
                kind,
                value: value.to_string(),
                negated,
            };
        }
    }

    let status = match lower.as_str() {
        "is:broken" => Some(FieldKind::Broken),
        "is:unmaintained" => Some(FieldKind::Unmaintained),
        "is:new" => Some(FieldKind::New),
        "is:updated" => Some(FieldKind::Updated),
        _ => None,
    };
    if let Some(kind) = status {
        return Token {
            kind,
            value: String::new(),
            negated,
        };
    }

    if let Some(rest) = lower.strip_prefix("since:") {
        if let Some(window_secs) = parse_since_window(rest) {
            return Token {
                kind: FieldKind::Since { window_secs },
                value: rest.to_string(),
                negated,
            };
        }
    }

    Token {
        kind: FieldKind::FreeText,
        value: lower,
        negated,
    }
}

/// `<int><unit>` with unit in {d,w,m,y}; an unrecognized unit means days.
/// No leading integer means the value is not a since-window at all.
fn parse_since_window(value: &str) -> Option<i64> {
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    let count: i64 = digits.parse().ok()?;
    let unit_secs = match value[digits.len()..].chars().next() {
        Some('w') => WEEK_SECS,
        Some('m') => MONTH_SECS,
        Some('y') => YEAR_SECS,
        _ => DAY_SECS,
    };
    Some(count.saturating_mul(unit_secs))
}
