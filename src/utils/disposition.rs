//! `Content-Disposition` filename parsing.

use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};

/// Parses a `Content-Disposition` value to extract the filename.
///
/// Handles:
/// - `attachment; filename="example.pdf"`
/// - `attachment; filename=example.pdf`
/// - `attachment; filename*=UTF-8''example%20file.pdf` (RFC 5987, preferred)
/// - `attachment; filename*=UTF-8'en'example.pdf` (with a language tag)
///
/// Parameter names are matched case-insensitively.
///
/// Only the final path component is kept, so a hostile value such as
/// `filename="../../etc/passwd"` collapses to `passwd`.
pub fn parse_content_disposition(header: &str) -> Option<String> {
    let name = extended_filename(header).or_else(|| plain_filename(header))?;
    let name = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    match name.as_str() {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

/// Extract the filename from a response's `Content-Disposition` header.
pub fn disposition_filename(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_disposition)
}

fn extended_filename(header: &str) -> Option<String> {
    let value = param_value(header, "filename*=")?;
    let value = match value.strip_prefix('"') {
        Some(quoted) => &quoted[..quoted.find('"').unwrap_or(quoted.len())],
        None => value,
    };
    // charset'language'encoded_value, the language may be empty
    let encoded = value.splitn(3, '\'').nth(2)?.trim();
    urlencoding::decode(encoded)
        .ok()
        .map(|decoded| decoded.into_owned())
        .filter(|name| !name.trim().is_empty())
}

fn plain_filename(header: &str) -> Option<String> {
    let value = param_value(header, "filename=")?;

    if let Some(stripped) = value.strip_prefix('"') {
        return stripped.find('"').map(|end| stripped[..end].to_string());
    }
    let end = value.find(';').unwrap_or(value.len());
    let filename = value[..end].trim();
    (!filename.is_empty()).then(|| filename.to_string())
}

/// Text after the parameter `name` (matched case-insensitively), up to the
/// next `;` for unquoted values.
fn param_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets valid for `header`.
    let pos = header.to_ascii_lowercase().find(name)?;
    let value = header[pos + name.len()..].trim_start();
    if value.starts_with('"') {
        return Some(value);
    }
    let end = value.find(';').unwrap_or(value.len());
    Some(value[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_filename() {
        assert_eq!(
            parse_content_disposition(r#"attachment; filename="report.pdf""#),
            Some("report.pdf".to_string())
        );
    }

    #[test]
    fn test_unquoted_filename() {
        assert_eq!(
            parse_content_disposition("attachment; filename=archive.zip; size=10"),
            Some("archive.zip".to_string())
        );
    }

    #[test]
    fn test_extended_filename_wins() {
        assert_eq!(
            parse_content_disposition(
                r#"attachment; filename="fallback.bin"; filename*=UTF-8''na%C3%AFve%20notes.txt"#
            ),
            Some("naïve notes.txt".to_string())
        );
    }

    #[test]
    fn test_traversal_collapses_to_last_component() {
        assert_eq!(
            parse_content_disposition(r#"attachment; filename="../../etc/passwd""#),
            Some("passwd".to_string())
        );
        assert_eq!(parse_content_disposition(r#"attachment; filename="..""#), None);
    }

    #[test]
    fn test_extended_filename_with_language_tag() {
        assert_eq!(
            parse_content_disposition("attachment; filename*=UTF-8'en'report.pdf"),
            Some("report.pdf".to_string())
        );
        assert_eq!(
            parse_content_disposition("attachment; filename*=utf-8'de-DE'Bericht%202024.pdf; size=3"),
            Some("Bericht 2024.pdf".to_string())
        );
        assert_eq!(parse_content_disposition("attachment; filename*=UTF-8"), None);
    }

    #[test]
    fn test_parameter_names_ignore_case() {
        assert_eq!(
            parse_content_disposition(r#"attachment; FILENAME="x.pdf""#),
            Some("x.pdf".to_string())
        );
        assert_eq!(
            parse_content_disposition("Attachment; FileName*=UTF-8''y.zip"),
            Some("y.zip".to_string())
        );
    }

    #[test]
    fn test_missing_filename() {
        assert_eq!(parse_content_disposition("inline"), None);
        assert_eq!(parse_content_disposition("attachment; filename="), None);
    }
}
