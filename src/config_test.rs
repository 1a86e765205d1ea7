use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn from_lookup_uses_defaults_when_unset() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(cfg.endpoints, Endpoints::default());
}

#[test]
fn from_lookup_trims_trailing_slash_and_parses_timeout() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[
        ("SETTINGS_API_BASE_URL", "https://accounts.example.test/api/"),
        ("SETTINGS_API_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://accounts.example.test/api");
    assert_eq!(cfg.request_timeout_secs, 7);
}

#[test]
fn from_lookup_ignores_unparseable_or_zero_timeout() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[("SETTINGS_API_TIMEOUT_SECS", "soon")])).unwrap();
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

    let cfg = ApiConfig::from_lookup(lookup_from(&[("SETTINGS_API_TIMEOUT_SECS", "0")])).unwrap();
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}

#[test]
fn from_lookup_rejects_non_http_base_url() {
    let err = ApiConfig::from_lookup(lookup_from(&[("SETTINGS_API_BASE_URL", "ftp://files")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidBaseUrl("ftp://files".to_owned()));
}

#[test]
fn url_joins_base_and_endpoint_with_single_slash() {
    let cfg = ApiConfig::new("http://localhost:8000/api/");
    assert_eq!(cfg.url("/auth/login/"), "http://localhost:8000/api/auth/login/");
    assert_eq!(cfg.url("auth/login/"), "http://localhost:8000/api/auth/login/");
}

#[test]
fn url_passes_absolute_endpoints_through() {
    let cfg = ApiConfig::default();
    assert_eq!(cfg.url("https://cdn.example.test/x"), "https://cdn.example.test/x");
}
