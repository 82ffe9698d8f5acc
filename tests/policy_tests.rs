//! Tests for policy validation and root admission.

use spelunk::classify::parse_root;
use spelunk::policy::{PolicyBuilder, DEFAULT_MAX_BYTES};
use spelunk::Error;
use std::time::Duration;

mod common;
use common::helpers::*;

#[test]
fn test_defaults_are_onion_only() {
    let policy = PolicyBuilder::new().build().unwrap();
    assert!(policy.onion_only());
    assert_eq!(policy.max_bytes(), DEFAULT_MAX_BYTES);
    assert!(policy.proxy().is_none());

    assert!(parse_root(&format!("{}/files/", TEST_ONION), &policy).is_ok());
    assert!(matches!(
        parse_root("http://example.com/files/", &policy),
        Err(Error::InvalidUrl(_))
    ));
}

#[test]
fn test_roots_must_be_http() {
    let policy = test_policy();
    assert!(matches!(parse_root("ftp://example.com/", &policy), Err(Error::InvalidUrl(_))));
    assert!(matches!(parse_root("not a url", &policy), Err(Error::InvalidUrl(_))));

    let root = parse_root("  http://example.com/docs/#top ", &policy).unwrap();
    assert_eq!(root.as_str(), "http://example.com/docs/");
}

#[test]
fn test_invalid_options_are_rejected() {
    let cases = [
        PolicyBuilder::new().timeout(Duration::ZERO),
        PolicyBuilder::new().max_bytes(0),
        PolicyBuilder::new().max_files(0),
        PolicyBuilder::new().max_depth(0),
        PolicyBuilder::new().user_agent("bad\nagent"),
    ];
    for builder in cases {
        assert!(matches!(builder.build(), Err(Error::InvalidPolicy(_))));
    }
}

#[test]
fn test_allow_list_normalization() {
    let policy = PolicyBuilder::new()
        .allowed_extensions_csv(" PDF, .zip ,,")
        .allow_extension(".Tar")
        .build()
        .unwrap();

    assert!(policy.is_allowed_extension("pdf"));
    assert!(policy.is_allowed_extension(".ZIP"));
    assert!(policy.is_allowed_extension("tar"));
    assert!(!policy.is_allowed_extension("exe"));
    assert!(!policy.is_allowed_extension(""));

    let deny_all = PolicyBuilder::new().allowed_extensions_csv("").build().unwrap();
    assert!(deny_all.allowed_extensions().is_empty());
    assert!(!deny_all.is_allowed_extension("pdf"));
}

#[test]
fn test_megabyte_ceiling() {
    let policy = PolicyBuilder::new().max_megabytes(20).build().unwrap();
    assert_eq!(policy.max_bytes(), 20 * 1024 * 1024);
}

#[test]
fn test_proxy_endpoint_forms() {
    let bare = PolicyBuilder::new().proxy("127.0.0.1:9050").build().unwrap();
    assert_eq!(bare.proxy(), Some("socks5h://127.0.0.1:9050"));

    let blank = PolicyBuilder::new().proxy("  ").build().unwrap();
    assert!(blank.proxy().is_none());

    assert!(matches!(
        PolicyBuilder::new().proxy("ftp://127.0.0.1:21").build(),
        Err(Error::Proxy(_))
    ));
}
