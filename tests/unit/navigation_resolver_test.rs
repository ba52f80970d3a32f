use aibrowser::services::navigation_resolver::{
    encode_uri_component, error_page_url, is_direct_address, resolve, search_url,
};
use aibrowser::types::settings::SearchEngine;
use rstest::rstest;

#[rstest]
#[case("github.com", "https://github.com")]
#[case("  github.com  ", "https://github.com")]
#[case("http://example.com", "http://example.com")]
#[case("https://example.com/path?q=1", "https://example.com/path?q=1")]
#[case("HTTPS://Example.COM", "HTTPS://Example.COM")]
#[case("example.com:8080/admin", "https://example.com:8080/admin")]
#[case("sub.domain-name.co.uk", "https://sub.domain-name.co.uk")]
#[case("about:newtab", "about:newtab")]
#[case("about:error?url=x&code=-105", "about:error?url=x&code=-105")]
fn resolves_direct_addresses(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(resolve(input, SearchEngine::DuckDuckGo).as_deref(), Some(expected));
}

#[rstest]
#[case("rust ownership", "https://duckduckgo.com/?q=rust%20ownership")]
#[case("localhost", "https://duckduckgo.com/?q=localhost")]
#[case("example.com is down", "https://duckduckgo.com/?q=example.com%20is%20down")]
#[case("a.b", "https://duckduckgo.com/?q=a.b")]
#[case("c++ & rust?", "https://duckduckgo.com/?q=c%2B%2B%20%26%20rust%3F")]
#[case("ftp://files.example.com", "https://duckduckgo.com/?q=ftp%3A%2F%2Ffiles.example.com")]
fn resolves_searches(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(resolve(input, SearchEngine::DuckDuckGo).as_deref(), Some(expected));
}

#[rstest]
#[case(SearchEngine::Google, "https://www.google.com/search?q=hello%20world")]
#[case(SearchEngine::Yandex, "https://yandex.ru/search/?text=hello%20world")]
#[case(SearchEngine::DuckDuckGo, "https://duckduckgo.com/?q=hello%20world")]
fn search_uses_engine_template(#[case] engine: SearchEngine, #[case] expected: &str) {
    assert_eq!(resolve("hello world", engine).as_deref(), Some(expected));
    assert_eq!(search_url("hello world", engine), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn blank_input_resolves_to_nothing(#[case] input: &str) {
    assert_eq!(resolve(input, SearchEngine::Google), None);
}

#[test]
fn whitespace_anywhere_means_search() {
    assert!(is_direct_address("example.com/a"));
    assert!(!is_direct_address("example.com/a b"));
    assert!(!is_direct_address("example.com\tb"));
}

#[test]
fn resolution_is_deterministic() {
    for input in ["github.com", "two words", "about:blank"] {
        assert_eq!(
            resolve(input, SearchEngine::Yandex),
            resolve(input, SearchEngine::Yandex)
        );
    }
}

#[test]
fn encodes_like_encode_uri_component() {
    assert_eq!(encode_uri_component("привет"), "%D0%BF%D1%80%D0%B8%D0%B2%D0%B5%D1%82");
    assert_eq!(encode_uri_component("a-b_c.d!e~f*g'h(i)j"), "a-b_c.d!e~f*g'h(i)j");
    assert_eq!(encode_uri_component("/?#[]@"), "%2F%3F%23%5B%5D%40");
}

#[test]
fn error_page_carries_url_and_code() {
    assert_eq!(
        error_page_url("https://nope.invalid/a?b=c", -105),
        "about:error?url=https%3A%2F%2Fnope.invalid%2Fa%3Fb%3Dc&code=-105"
    );
}
