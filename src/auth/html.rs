//! Scraping helpers for the web login pages.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::error::AuthError;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));
static FORM_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<form\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#).expect("valid form regex")
});
static FORM_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</form\s*>").expect("valid form close regex"));
static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<input\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#).expect("valid input regex")
});
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid attribute regex")
});
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9A-Fa-f]+|#[0-9]+|quot|apos|lt|gt|amp);").expect("valid entity regex")
});

/// Hidden `<input>` fields found inside `<form>` elements, keyed by name.
///
/// Inputs without a `name` are skipped; a missing `value` reads as empty.
/// When a name repeats, the last occurrence wins. Commented-out markup is
/// ignored.
pub fn hidden_inputs(html: &str) -> BTreeMap<String, String> {
    let html = COMMENT_RE.replace_all(html, "");
    let mut fields = BTreeMap::new();
    for body in form_bodies(&html) {
        for input in INPUT_RE.captures_iter(body) {
            let attrs = attributes(&input[1]);
            let is_hidden = attrs
                .get("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("hidden"));
            if !is_hidden {
                continue;
            }
            if let Some(name) = attrs.get("name") {
                let value = attrs.get("value").cloned().unwrap_or_default();
                fields.insert(name.clone(), value);
            }
        }
    }
    fields
}

/// `action` attribute of the first form that declares one.
pub fn form_action(html: &str) -> Option<String> {
    let html = COMMENT_RE.replace_all(html, "");
    FORM_OPEN_RE
        .captures_iter(&html)
        .find_map(|form| attributes(&form[1]).remove("action"))
        .filter(|action| !action.trim().is_empty())
}

/// Pull the auth redirect URL out of the login page script.
///
/// The URL starts at `prefix` and runs up to the first `";`, or failing
/// that the first `';`.
pub fn auth_redirect_url(page: &str, prefix: &str) -> Result<String, AuthError> {
    let start = page.find(prefix).ok_or_else(|| {
        AuthError::LoginFlow("could not find auth redirect URL in login page".to_string())
    })?;
    let rest = &page[start..];
    let end = rest
        .find("\";")
        .or_else(|| rest.find("';"))
        .ok_or_else(|| {
            AuthError::LoginFlow("could not parse auth redirect URL from login page".to_string())
        })?;
    Ok(decode_entities(&rest[..end]))
}

fn form_bodies(html: &str) -> Vec<&str> {
    let mut bodies = Vec::new();
    let mut cursor = 0;
    while let Some(open) = FORM_OPEN_RE.find_at(html, cursor) {
        let end = FORM_CLOSE_RE
            .find_at(html, open.end())
            .map(|close| close.start())
            .unwrap_or(html.len());
        bodies.push(&html[open.end()..end]);
        cursor = end;
        if cursor >= html.len() {
            break;
        }
    }
    bodies
}

fn attributes(tag: &str) -> BTreeMap<String, String> {
    ATTR_RE
        .captures_iter(tag)
        .map(|cap| {
            let name = cap[1].to_ascii_lowercase();
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    ENTITY_RE
        .replace_all(raw, |cap: &regex::Captures<'_>| {
            let decoded = match &cap[1] {
                "quot" => Some('"'),
                "apos" => Some('\''),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                code => {
                    let digits = &code[1..];
                    let parsed = match digits.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => digits.parse::<u32>().ok(),
                    };
                    parsed.and_then(char::from_u32)
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| cap[0].to_string())
        })
        .into_owned()
}
