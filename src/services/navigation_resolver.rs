//! Navigation Resolver.
//!
//! Decides whether address-bar input is an address or a search query and
//! produces the address to load. Pure functions of (input, engine).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::settings::SearchEngine;
use crate::types::tab::ERROR_PAGE_URL;

/// Host-like prefix: optional http(s) scheme, a dotted name, a 2+ letter TLD.
/// Anything may follow the TLD (port, path, query).
static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://)?[A-Za-z0-9_.-]+\.[a-z]{2,}").expect("address regex is valid")
});

static SCHEME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("scheme regex is valid"));

/// Resolves address-bar input into the address to load.
///
/// Returns `None` for blank input; the caller must not load anything.
pub fn resolve(input: &str, engine: SearchEngine) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_internal_address(trimmed) {
        return Some(trimmed.to_string());
    }
    if is_direct_address(trimmed) {
        if SCHEME_PATTERN.is_match(trimmed) {
            return Some(trimmed.to_string());
        }
        return Some(format!("https://{}", trimmed));
    }
    Some(search_url(trimmed, engine))
}

/// True when `input` should be loaded as an address rather than searched.
pub fn is_direct_address(input: &str) -> bool {
    !input.chars().any(char::is_whitespace) && ADDRESS_PATTERN.is_match(input)
}

/// `about:` pages are served by the shell itself.
pub fn is_internal_address(input: &str) -> bool {
    input
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("about:"))
}

/// Search URL for `query` on `engine`.
pub fn search_url(query: &str, engine: SearchEngine) -> String {
    format!("{}{}", engine.query_url(), encode_uri_component(query))
}

/// Address of the error page shown after a failed load of `url`.
pub fn error_page_url(url: &str, code: i32) -> String {
    format!("{}?url={}&code={}", ERROR_PAGE_URL, encode_uri_component(url), code)
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => {
                out.push('%');
                out.push(char::from(b"0123456789ABCDEF"[(b >> 4) as usize]));
                out.push(char::from(b"0123456789ABCDEF"[(b & 0xf) as usize]));
            }
        }
    }
    out
}
