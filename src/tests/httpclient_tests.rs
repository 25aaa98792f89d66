// src/tests/httpclient_tests.rs

//! tests for `httpclient.rs` functions
//!
//! URL derivation only; request/response behavior is exercised against the
//! sample API in `api_tests.rs`.

use std::time::Duration;

use ::test_case::test_case;

use crate::cfg::config::HttpConfig;
use crate::net::httpclient::HttpClient;

fn client(base_url: &str) -> HttpClient {
    HttpClient::new(
        base_url,
        Duration::from_secs(1),
        Duration::from_secs(1),
    )
}

#[test_case("http://api.example.com", "/health", "http://api.example.com/health")]
#[test_case("http://api.example.com/", "/health", "http://api.example.com/health"; "trailing slash")]
#[test_case("http://api.example.com", "health", "http://api.example.com/health"; "no leading slash")]
#[test_case("", "/health", "/health"; "no base url")]
#[test_case(
    "http://api.example.com",
    "https://other.example.com/x",
    "https://other.example.com/x";
    "absolute url passthrough"
)]
fn test_url_for(
    base_url: &str,
    path: &str,
    expected: &str,
) {
    assert_eq!(client(base_url).url_for(path), expected);
}

#[test]
fn test_from_config() {
    let config = HttpConfig {
        base_url: String::from("http://api.example.com/"),
        timeout_secs: 3,
        connect_timeout_secs: 1,
    };
    let client = HttpClient::from_config(&config);
    assert_eq!(client.url_for("ping"), "http://api.example.com/ping");
}
