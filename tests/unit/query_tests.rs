//! Query language tests through the public API: parse then evaluate.

use portq::query::eval::{EvalContext, FreeTextFields, matches_expression};
use portq::query::parser::parse;
use portq::test_utils::{PortBuilder, TestCase, run_table_tests, sample_catalog};

const NOW: i64 = 1_700_000_000;

fn ctx() -> EvalContext {
    EvalContext::new(NOW, FreeTextFields::default())
}

fn matching_names(raw: &str) -> Vec<String> {
    let expr = parse(raw);
    let ctx = ctx();
    sample_catalog(NOW)
        .iter()
        .filter(|port| matches_expression(port, &expr, &ctx))
        .map(|port| port.name.clone())
        .collect()
}

#[test]
fn query_semantics_table() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "name substring",
            input: "name:lib",
            expected: vec!["libxft".to_string()],
        },
        TestCase {
            name: "category exact not substring",
            input: "category:editor",
            expected: Vec::new(),
        },
        TestCase {
            name: "category exact equality",
            input: "category:editors",
            expected: vec!["vim".to_string(), "nano".to_string()],
        },
        TestCase {
            name: "conjunction",
            input: "category:editors && !is:broken",
            expected: vec!["vim".to_string()],
        },
        TestCase {
            name: "disjunction",
            input: "name:vim || category:wm",
            expected: vec!["vim".to_string(), "dwm".to_string()],
        },
        TestCase {
            name: "word operators",
            input: "category:editors AND NOT is:broken OR name:dwm",
            expected: vec!["vim".to_string(), "dwm".to_string()],
        },
        TestCase {
            name: "provides sequence",
            input: "provides:xft.so",
            expected: vec!["libxft".to_string()],
        },
        TestCase {
            name: "depends alias",
            input: "dep:libx11",
            expected: vec!["dwm".to_string()],
        },
        TestCase {
            name: "unmaintained flag",
            input: "is:unmaintained",
            expected: vec!["libxft".to_string()],
        },
        TestCase {
            name: "recent updates",
            input: "is:new",
            expected: vec!["vim".to_string(), "dwm".to_string()],
        },
        TestCase {
            name: "since window",
            input: "since:1w",
            expected: vec!["vim".to_string()],
        },
        TestCase {
            name: "quoted phrase",
            input: "\"window manager\"",
            expected: vec!["dwm".to_string()],
        },
        TestCase {
            name: "free text over name description category",
            input: "editor",
            expected: vec!["vim".to_string(), "nano".to_string()],
        },
        TestCase {
            name: "empty query matches nothing",
            input: "",
            expected: Vec::new(),
        },
    ];

    run_table_tests(cases, matching_names)
}

#[test]
fn name_substring_matches_prefix_and_infix() {
    let ports = [
        PortBuilder::new("libfoo", "libs").build(),
        PortBuilder::new("mylib", "libs").build(),
        PortBuilder::new("grep", "tools").build(),
    ];
    let expr = parse("name:lib");
    let ctx = ctx();

    let hits: Vec<&str> = ports
        .iter()
        .filter(|p| matches_expression(p, &expr, &ctx))
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(hits, vec!["libfoo", "mylib"]);
}

#[test]
fn relative_time_boundaries() {
    let ten_days = PortBuilder::new("ten", "x").updated_days_ago(NOW, 10).build();
    let forty_days = PortBuilder::new("forty", "x")
        .updated_days_ago(NOW, 40)
        .build();
    let ctx = ctx();

    let is_new = parse("is:new");
    assert!(matches_expression(&ten_days, &is_new, &ctx));
    assert!(!matches_expression(&forty_days, &is_new, &ctx));

    let two_weeks = parse("since:2w");
    let twenty_days = PortBuilder::new("twenty", "x")
        .updated_days_ago(NOW, 20)
        .build();
    assert!(matches_expression(&ten_days, &two_weeks, &ctx));
    assert!(!matches_expression(&twenty_days, &two_weeks, &ctx));
}

#[test]
fn malformed_fragments_degrade_to_free_text() {
    // None of these may panic, and all classify into some token.
    for raw in [
        "::::",
        "name:::x",
        "since:",
        "since:notanumber",
        "is:",
        "is:gone",
        "!!!!",
        "\"unterminated",
        "a && || b",
        "|| && OR AND NOT",
    ] {
        let expr = parse(raw);
        let ctx = ctx();
        for port in sample_catalog(NOW).iter() {
            // Evaluation is total as well.
            let _ = matches_expression(port, &expr, &ctx);
        }
    }
}
