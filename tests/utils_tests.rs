//! Tests for header parsing and formatting helpers.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_RANGE};
use spelunk::utils::{
    content_range_total, declared_content_length, disposition_filename, human_bytes,
    parse_content_disposition, parse_content_range_total,
};

#[test]
fn test_parse_content_range_total() {
    let cases = [
        ("bytes 0-0/2048", Some(2048)),
        ("bytes 0-1023/ 2048 ", Some(2048)),
        ("bytes 0-0/0", Some(0)),
        ("bytes 0-1023/999999999999", Some(999999999999)),
        ("bytes 0-0/*", None),
        ("items 0-0/10", None),
        ("bytes 0-0/-5", None),
        ("", None),
    ];
    for (header, expected) in cases {
        assert_eq!(parse_content_range_total(header), expected, "{:?}", header);
    }
}

#[test]
fn test_header_map_extraction() {
    let mut headers = HeaderMap::new();
    assert_eq!(content_range_total(&headers), None);
    assert_eq!(declared_content_length(&headers), None);

    headers.insert(CONTENT_RANGE, HeaderValue::from_static("bytes 0-0/5000"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1"));
    assert_eq!(content_range_total(&headers), Some(5000));
    assert_eq!(declared_content_length(&headers), Some(1));

    headers.insert(CONTENT_LENGTH, HeaderValue::from_static("12abc"));
    assert_eq!(declared_content_length(&headers), None);
}

#[test]
fn test_content_disposition() {
    assert_eq!(
        parse_content_disposition(r#"attachment; filename="report.pdf""#),
        Some("report.pdf".to_string())
    );
    assert_eq!(
        parse_content_disposition("attachment; filename*=UTF-8''my%20file.zip"),
        Some("my file.zip".to_string())
    );
    assert_eq!(
        parse_content_disposition(r#"attachment; filename="../../etc/passwd""#),
        Some("passwd".to_string())
    );
    assert_eq!(parse_content_disposition("inline"), None);

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=data.csv"),
    );
    assert_eq!(disposition_filename(&headers), Some("data.csv".to_string()));
}

#[test]
fn test_human_bytes() {
    assert_eq!(human_bytes(100), "100 B");
    assert_eq!(human_bytes(4096), "4.00 KB");
    assert_eq!(human_bytes(150 * 1024 * 1024), "150.00 MB");
}
