//! Common test utilities shared across integration tests.

use portq::query::DAY_SECS;

/// The ports.json payload the mock index server serves: the two-editor
/// catalog from the engine's contract, plus a library port so substring
/// and sequence predicates have something to chew on.
pub fn index_json(now: i64) -> serde_json::Value {
    serde_json::json!([
        {
            "n": "vim",
            "c": "editors",
            "d": "text editor",
            "v": "9.1",
            "l": "Vim",
            "a": "bram",
            "pds": ["vim", "vi"],
            "dps": ["ncurses"],
            "dt": now,
            "st": "success"
        },
        {
            "n": "nano",
            "c": "editors",
            "d": "simple editor",
            "v": "7.2",
            "br": true,
            "dt": now - 1000 * DAY_SECS
        },
        {
            "n": "libfoo",
            "c": "libs",
            "d": "foo support library",
            "v": "1.4",
            "l": "MIT",
            "un": true,
            "dt": now - 40 * DAY_SECS,
            "st": "failed"
        }
    ])
}
