//! URL state for deep links and sharing.
//!
//! The search page keeps two representations of a query: the raw string
//! in the input field and the location's query parameters. On load,
//! recognized parameters (`q`, legacy alias `query`, and the `cat`/`lic`
//! shortcuts) are synthesized into one raw query; on an explicit search
//! the canonical URL carries `q` only, with the shortcuts removed, so
//! the two never coexist inconsistently. The same rules apply here to
//! `--from-url` input and `--base-url` share links.

use std::borrow::Cow;

use regex::Regex;
use reqwest::Url;

use crate::error::{PqError, Result};

/// Parameters recognized on load; only `q` survives on emission.
const PARAM_QUERY: &str = "q";
const PARAM_QUERY_LEGACY: &str = "query";
const PARAM_CATEGORY: &str = "cat";
const PARAM_LICENSE: &str = "lic";

/// Synthesize a raw query from a full URL or a bare query string
/// (`q=vim&cat=editors`). Returns `None` when nothing relevant is set.
pub fn query_from_url(input: &str) -> Result<Option<String>> {
    let pairs = if let Ok(url) = Url::parse(input) {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    } else if looks_like_query_string(input) {
        parse_query_string(input)
    } else {
        return Err(PqError::InvalidUrl(input.to_string()));
    };
    Ok(query_from_pairs(pairs))
}

/// Synthesize a raw query from decoded key/value pairs. Shortcut
/// parameters become field tokens appended with `&&`, skipped when the
/// query already carries the same tag.
pub fn query_from_pairs(pairs: Vec<(String, String)>) -> Option<String> {
    let mut free_form = None;
    let mut legacy = None;
    let mut category = None;
    let mut license = None;

    for (key, value) in pairs {
        match key.as_str() {
            PARAM_QUERY => free_form = Some(value),
            PARAM_QUERY_LEGACY => legacy = Some(value),
            PARAM_CATEGORY => category = Some(value),
            PARAM_LICENSE => license = Some(value),
            _ => {}
        }
    }

    let mut raw = free_form.or(legacy).unwrap_or_default();
    if let Some(cat) = category {
        append_tag(&mut raw, "category", &cat);
    }
    if let Some(lic) = license {
        append_tag(&mut raw, "license", &lic);
    }

    if raw.trim().is_empty() { None } else { Some(raw) }
}

/// Canonical share URL for an explicit search: `q` is set to the raw
/// query, the shortcut parameters disappear, everything else survives.
pub fn share_url(base: &str, raw: &str) -> Result<String> {
    let mut url =
        Url::parse(base).map_err(|e| PqError::InvalidUrl(format!("{base}: {e}")))?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| {
            k != PARAM_QUERY && k != PARAM_QUERY_LEGACY && k != PARAM_CATEGORY && k != PARAM_LICENSE
        })
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(PARAM_QUERY, raw);
    }

    Ok(url.to_string())
}

/// Replace any existing `field:<value>` token in the raw query with a
/// new one, the way the category/license dropdowns edit the input
/// field. The match pattern is built with proper escaping and separator
/// cleanup is structural, so no dangling `&&` survives.
pub fn inject_field_token(raw: &str, field: &str, value: &str) -> String {
    let tag = format!("{field}:{value}");

    let pattern = format!(r"(?i)\b{}:\S+", regex::escape(field));
    let stripped: Cow<'_, str> = match Regex::new(&pattern) {
        Ok(re) => re.replace_all(raw, ""),
        Err(_) => Cow::Borrowed(raw),
    };

    let mut parts: Vec<&str> = stripped
        .split("&&")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    parts.push(&tag);
    parts.join(" && ")
}

fn append_tag(raw: &mut String, field: &str, value: &str) {
    let tag = format!("{field}:{value}");
    if raw.contains(&tag) {
        return;
    }
    if raw.trim().is_empty() {
        *raw = tag;
    } else {
        *raw = format!("{raw} && {tag}");
    }
}

fn looks_like_query_string(input: &str) -> bool {
    let trimmed = input.trim_start_matches('?');
    !trimmed.is_empty() && trimmed.split('&').all(|pair| pair.contains('='))
}

/// Decode an application/x-www-form-urlencoded query string.
fn parse_query_string(input: &str) -> Vec<(String, String)> {
    input
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(component: &str) -> String {
    let plus_decoded = component.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(Cow::into_owned)
        .unwrap_or(plus_decoded)
}
