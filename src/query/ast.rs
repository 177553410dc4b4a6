//! Parsed query representation.

/// What a token is matched against. A closed enum so evaluation dispatch
/// is exhaustive instead of stringly-typed prefix branching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Description,
    Category,
    License,
    Author,
    Provides,
    Depends,
    Broken,
    Unmaintained,
    New,
    Updated,
    /// `since:<n><unit>`; the window is resolved against the evaluation
    /// clock, not the parse clock.
    Since { window_secs: i64 },
    FreeText,
}

impl FieldKind {
    /// True for predicates whose truth drifts with the clock.
    pub fn is_time_relative(&self) -> bool {
        matches!(self, Self::New | Self::Updated | Self::Since { .. })
    }
}

/// One parsed unit of a query. The value is lowercased at parse time;
/// all comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: FieldKind,
    pub value: String,
    pub negated: bool,
}

/// A conjunction of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrGroup {
    pub tokens: Vec<Token>,
}

/// The whole query: a disjunction of OR-groups, built fresh for every
/// search call and discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryExpression {
    pub groups: Vec<OrGroup>,
}

impl QueryExpression {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Any token whose truth depends on the current time. Such
    /// expressions are never served from the query cache.
    pub fn is_time_sensitive(&self) -> bool {
        self.groups
            .iter()
            .flat_map(|g| &g.tokens)
            .any(|t| t.kind.is_time_relative())
    }

    /// Positive free-text values, deduplicated in first-seen order.
    /// These are the words the presenter highlights in descriptions.
    pub fn free_text_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        for token in self.groups.iter().flat_map(|g| &g.tokens) {
            if token.kind == FieldKind::FreeText
                && !token.negated
                && !token.value.is_empty()
                && !terms.contains(&token.value)
            {
                terms.push(token.value.clone());
            }
        }
        terms
    }
}
