//! The query language: a disjunction of AND-groups of signed tokens.
//!
//! `parse` turns a raw string into a [`QueryExpression`]; `eval` decides
//! whether a port matches. Both are total: malformed input degrades to
//! free-text tokens and absent port fields compare false, so no query
//! string can fault evaluation.

pub mod ast;
pub mod eval;
pub mod parser;

pub use ast::{FieldKind, QueryExpression, Token};
pub use eval::{EvalContext, FreeTextFields, matches, matches_expression};
pub use parser::parse;

pub const DAY_SECS: i64 = 86_400;
pub const WEEK_SECS: i64 = 7 * DAY_SECS;
pub const MONTH_SECS: i64 = 30 * DAY_SECS;
pub const YEAR_SECS: i64 = 365 * DAY_SECS;

/// `is:new` window.
pub const NEW_WINDOW_SECS: i64 = 30 * DAY_SECS;
/// `is:updated` window.
pub const UPDATED_WINDOW_SECS: i64 = 7 * DAY_SECS;
