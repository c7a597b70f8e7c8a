use super::*;

#[test]
fn normalize_base_url_strips_whitespace_and_trailing_slashes() {
    assert_eq!(
        normalize_base_url("  http://127.0.0.1:8000//  "),
        Ok("http://127.0.0.1:8000".to_owned())
    );
    assert_eq!(normalize_base_url("https://api.example.com"), Ok("https://api.example.com".to_owned()));
}

#[test]
fn normalize_base_url_rejects_blank_and_foreign_schemes() {
    assert_eq!(normalize_base_url("   "), Err(ConfigError::EmptyBaseUrl));
    assert_eq!(normalize_base_url("/"), Err(ConfigError::EmptyBaseUrl));
    assert_eq!(
        normalize_base_url("ws://localhost:5000"),
        Err(ConfigError::UnsupportedScheme("ws://localhost:5000".to_owned()))
    );
}

#[test]
fn default_config_points_at_local_backend() {
    assert_eq!(ClientConfig::default().api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn new_normalizes_input() {
    let config = ClientConfig::new("http://localhost:5000/").unwrap();
    assert_eq!(config.api_base_url, "http://localhost:5000");
}
