use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_uses_defaults() {
    let cfg = Config::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.predict_url, DEFAULT_PREDICT_URL);
    assert_eq!(cfg.referral_url, DEFAULT_REFERRAL_URL);
    assert_eq!(cfg.auth_delay, Duration::from_millis(500));
    assert_eq!(cfg.data_dir, PathBuf::from(".vitalsense"));
}

#[test]
fn overrides_are_applied() {
    let cfg = Config::from_lookup(lookup(&[
        ("VITALSENSE_DATA_DIR", "/tmp/vs"),
        ("VITALSENSE_PREDICT_URL", "http://localhost:8000/predict"),
        ("VITALSENSE_REFERRAL_URL", "https://example.test/refer"),
        ("VITALSENSE_AUTH_DELAY_MS", "0"),
        ("VITALSENSE_REQUEST_TIMEOUT_SECS", "42"),
        ("VITALSENSE_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();

    assert_eq!(cfg.data_dir, PathBuf::from("/tmp/vs"));
    assert_eq!(cfg.predict_url, "http://localhost:8000/predict");
    assert_eq!(cfg.referral_url, "https://example.test/refer");
    assert_eq!(cfg.auth_delay, Duration::ZERO);
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn bad_numbers_fall_back_to_defaults() {
    let cfg = Config::from_lookup(lookup(&[
        ("VITALSENSE_AUTH_DELAY_MS", "soon"),
        ("VITALSENSE_REQUEST_TIMEOUT_SECS", "-1"),
    ]))
    .unwrap();
    assert_eq!(cfg.auth_delay, Duration::from_millis(DEFAULT_AUTH_DELAY_MS));
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}

#[test]
fn blank_values_use_defaults() {
    let cfg = Config::from_lookup(lookup(&[("VITALSENSE_DATA_DIR", "  "), ("VITALSENSE_PREDICT_URL", "")])).unwrap();
    assert_eq!(cfg.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    assert_eq!(cfg.predict_url, DEFAULT_PREDICT_URL);
}

#[test]
fn non_http_url_rejected() {
    let err = Config::from_lookup(lookup(&[("VITALSENSE_PREDICT_URL", "ftp://example.test")])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidUrl { var: "VITALSENSE_PREDICT_URL", value: "ftp://example.test".into() }
    );
}

#[test]
fn bare_scheme_rejected() {
    assert!(validate_url("X", "https://").is_err());
    assert!(validate_url("X", "http://a").is_ok());
}
