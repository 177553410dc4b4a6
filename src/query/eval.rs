//! Predicate evaluation.
//!
//! Pure functions from (port, token, context) to bool. Absent port fields
//! evaluate false before negation; nothing here can panic or allocate
//! beyond the lowercase scratch copies.

use memchr::memmem;

use crate::catalog::Port;
use crate::query::ast::{FieldKind, QueryExpression, Token};
use crate::query::{NEW_WINDOW_SECS, UPDATED_WINDOW_SECS};

/// Which textual fields participate in free-text matching. The site's
/// checkbox row maps onto this; category rides along by default because
/// bare words have always matched category names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeTextFields {
    pub name: bool,
    pub description: bool,
    pub category: bool,
    pub provides: bool,
    pub depends: bool,
}

impl Default for FreeTextFields {
    fn default() -> Self {
        Self {
            name: true,
            description: true,
            category: true,
            provides: false,
            depends: false,
        }
    }
}

impl FreeTextFields {
    /// Stable bitmask, used as part of the query-cache key.
    pub fn mask(self) -> u8 {
        u8::from(self.name)
            | u8::from(self.description) << 1
            | u8::from(self.category) << 2
            | u8::from(self.provides) << 3
            | u8::from(self.depends) << 4
    }
}

/// Evaluation context: the clock is injected so relative-time predicates
/// stay deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext {
    /// Current Unix time in seconds.
    pub now: i64,
    pub free_text: FreeTextFields,
}

impl EvalContext {
    pub fn new(now: i64, free_text: FreeTextFields) -> Self {
        Self { now, free_text }
    }

    pub fn current(free_text: FreeTextFields) -> Self {
        Self::new(chrono::Utc::now().timestamp(), free_text)
    }
}

/// Does one port satisfy one token? Negation applies last, so the result
/// for a negated token is exactly the complement of the unnegated one.
pub fn matches(port: &Port, token: &Token, ctx: &EvalContext) -> bool {
    let hit = match &token.kind {
        FieldKind::Name => contains(&port.name, &token.value),
        FieldKind::Description => contains(&port.description, &token.value),
        FieldKind::Category => port.category.to_lowercase() == token.value,
        FieldKind::License => opt_contains(port.license.as_deref(), &token.value),
        FieldKind::Author => opt_contains(port.author.as_deref(), &token.value),
        FieldKind::Provides => seq_contains(&port.provides, &token.value),
        FieldKind::Depends => seq_contains(&port.depends, &token.value),
        FieldKind::Broken => port.is_broken,
        FieldKind::Unmaintained => port.is_unmaintained,
        FieldKind::New => updated_within(port, NEW_WINDOW_SECS, ctx),
        FieldKind::Updated => updated_within(port, UPDATED_WINDOW_SECS, ctx),
        FieldKind::Since { window_secs } => updated_within(port, *window_secs, ctx),
        FieldKind::FreeText => free_text_match(port, &token.value, ctx.free_text),
    };
    hit != token.negated
}

/// A port matches the expression iff it matches at least one OR-group;
/// a group matches iff every token matches. `any`/`all` short-circuit
/// in both directions.
pub fn matches_expression(port: &Port, expr: &QueryExpression, ctx: &EvalContext) -> bool {
    expr.groups
        .iter()
        .any(|group| group.tokens.iter().all(|token| matches(port, token, ctx)))
}

/// Case-insensitive substring containment. The needle is already
/// lowercased by the parser; the empty needle matches everything.
fn contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let lowered = haystack.to_lowercase();
    memmem::find(lowered.as_bytes(), needle.as_bytes()).is_some()
}

fn opt_contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| contains(h, needle))
}

fn seq_contains(items: &[String], needle: &str) -> bool {
    items.iter().any(|item| contains(item, needle))
}

fn updated_within(port: &Port, window_secs: i64, ctx: &EvalContext) -> bool {
    port.last_updated > ctx.now.saturating_sub(window_secs)
}

fn free_text_match(port: &Port, value: &str, fields: FreeTextFields) -> bool {
    (fields.name && contains(&port.name, value))
        || (fields.description && contains(&port.description, value))
        || (fields.category && contains(&port.category, value))
        || (fields.provides && seq_contains(&port.provides, value))
        || (fields.depends && seq_contains(&port.depends, value))
}
