use proptest::prelude::*;

use portq::query::eval::{EvalContext, FreeTextFields, matches, matches_expression};
use portq::query::parser::parse;
use portq::test_utils::{PortBuilder, sample_catalog};

const NOW: i64 = 1_700_000_000;

fn ctx() -> EvalContext {
    EvalContext::new(NOW, FreeTextFields::default())
}

proptest! {
    /// `parse` is total: any string yields an expression whose tokens
    /// all carry a definite classification and sign.
    #[test]
    fn test_parse_never_panics(raw in ".*") {
        let expr = parse(&raw);
        for group in &expr.groups {
            prop_assert!(!group.tokens.is_empty(), "empty groups must be discarded");
        }
    }

    /// Evaluation is total over arbitrary queries and the sample ports.
    #[test]
    fn test_evaluation_never_panics(raw in ".*") {
        let expr = parse(&raw);
        let ctx = ctx();
        for port in sample_catalog(NOW).iter() {
            let _ = matches_expression(port, &expr, &ctx);
        }
    }

    /// Double-negation law: flipping a token's sign always complements
    /// its result, for every token the parser can produce.
    #[test]
    fn test_negation_complements(raw in "\\PC{1,40}") {
        let expr = parse(&raw);
        let ctx = ctx();
        for port in sample_catalog(NOW).iter() {
            for token in expr.groups.iter().flat_map(|g| &g.tokens) {
                let mut flipped = token.clone();
                flipped.negated = !flipped.negated;
                prop_assert_eq!(
                    matches(port, token, &ctx),
                    !matches(port, &flipped, &ctx)
                );
            }
        }
    }

    /// Whitespace-only input always produces the empty expression.
    #[test]
    fn test_whitespace_is_empty_expression(raw in "[ \\t\\r\\n]{0,20}") {
        prop_assert!(parse(&raw).is_empty());
    }

    /// The since-window unit ladder stays ordered: a port matching a
    /// shorter window always matches the longer spelling of it.
    #[test]
    fn test_since_windows_nest(days in 0i64..2000) {
        let port = PortBuilder::new("p", "x").updated_days_ago(NOW, days).build();
        let ctx = ctx();

        let day = parse("since:7d");
        let week = parse("since:1w");
        prop_assert_eq!(
            matches_expression(&port, &day, &ctx),
            matches_expression(&port, &week, &ctx)
        );

        let month = parse("since:1m");
        let month_days = parse("since:30d");
        prop_assert_eq!(
            matches_expression(&port, &month, &ctx),
            matches_expression(&port, &month_days, &ctx)
        );
    }
}
