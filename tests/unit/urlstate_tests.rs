//! URL deep-link and share-link behavior through the public API.

use portq::test_utils::{TestCase, run_table_tests};
use portq::urlstate::{inject_field_token, query_from_url, share_url};

#[test]
fn deep_link_synthesis_table() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "free form only",
            input: "https://ports.example/search?q=text+editor",
            expected: Some("text editor".to_string()),
        },
        TestCase {
            name: "legacy alias",
            input: "https://ports.example/search?query=vim",
            expected: Some("vim".to_string()),
        },
        TestCase {
            name: "category shortcut",
            input: "https://ports.example/search?q=vim&cat=editors",
            expected: Some("vim && category:editors".to_string()),
        },
        TestCase {
            name: "both shortcuts without free form",
            input: "https://ports.example/search?cat=editors&lic=MIT",
            expected: Some("category:editors && license:MIT".to_string()),
        },
        TestCase {
            name: "bare query string",
            input: "q=vim&lic=GPL",
            expected: Some("vim && license:GPL".to_string()),
        },
        TestCase {
            name: "nothing recognized",
            input: "https://ports.example/search?page=3",
            expected: None,
        },
    ];

    run_table_tests(cases, |input| {
        query_from_url(input).expect("parseable input")
    })
}

#[test]
fn share_link_round_trip() {
    let url = share_url("https://ports.example/search?cat=editors", "vim && category:editors")
        .expect("share url");

    // The emitted link must reproduce the same raw query on load, with
    // the shortcut parameters gone for good.
    assert!(!url.contains("cat="));
    let synthesized = query_from_url(&url).expect("parse emitted url");
    assert_eq!(synthesized.as_deref(), Some("vim && category:editors"));
}

#[test]
fn dropdown_injection_table() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "empty query",
            input: ("", "category", "editors"),
            expected: "category:editors".to_string(),
        },
        TestCase {
            name: "append",
            input: ("vim", "category", "editors"),
            expected: "vim && category:editors".to_string(),
        },
        TestCase {
            name: "replace",
            input: ("vim && category:games", "category", "editors"),
            expected: "vim && category:editors".to_string(),
        },
        TestCase {
            name: "replace in the middle",
            input: ("category:games && vim", "category", "editors"),
            expected: "vim && category:editors".to_string(),
        },
        TestCase {
            name: "other fields untouched",
            input: ("license:mit && vim", "category", "editors"),
            expected: "license:mit && vim && category:editors".to_string(),
        },
    ];

    run_table_tests(cases, |(raw, field, value)| {
        inject_field_token(raw, field, value)
    })
}

#[test]
fn injected_tokens_never_leave_dangling_separators() {
    for raw in [
        "",
        "vim",
        "category:a",
        "category:a && vim",
        "vim && category:a",
        "a && category:b && c",
    ] {
        let out = inject_field_token(raw, "category", "editors");
        assert!(!out.starts_with("&&"), "dangling lead in {out:?}");
        assert!(!out.ends_with("&&"), "dangling tail in {out:?}");
        assert!(!out.contains("&& &&"), "doubled separator in {out:?}");
    }
}
