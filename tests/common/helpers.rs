#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use spelunk::classify::LeafResource;
use spelunk::policy::{Policy, PolicyBuilder};
use spelunk::progress::{ProgressBarOpts, StyleOptions};
use spelunk::HttpClientConfig;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Url;

// Common test constants
pub const TEST_USER_AGENT: &str = "spelunk-test-agent";
pub const TEST_ONION: &str = "http://abcdefghijklmnopqrstuvwxyz234567abcdefghijklmnopqrstuv.onion";

static TRACING: Once = Once::new();

/// Installs a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file has the expected size
pub fn assert_file_size(path: &Path, expected_size: u64) {
    let metadata = fs::metadata(path).expect("Failed to get file metadata");
    assert_eq!(
        metadata.len(),
        expected_size,
        "File size mismatch at path: {:?}",
        path
    );
}

/// Asserts that neither the file nor its `.part` sibling exists
pub fn assert_no_artifact(path: &Path) {
    assert!(!path.exists(), "File should not exist: {:?}", path);
    let partial = spelunk::fetch::partial_path(path);
    assert!(!partial.exists(), "Partial file left behind: {:?}", partial);
}

/// Every regular file below `dir`, relative to it, sorted
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).expect("Failed to read directory") {
            let path = entry.expect("Failed to read entry").path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

// === Policy Helpers ===

/// Policy for local mock servers: any host, no retries, short timeout
pub fn test_policy_builder() -> PolicyBuilder {
    PolicyBuilder::new()
        .onion_only(false)
        .retries(0)
        .timeout(Duration::from_secs(5))
        .user_agent(TEST_USER_AGENT)
}

pub fn test_policy() -> Policy {
    test_policy_builder().build().expect("valid test policy")
}

// === Listing Helpers ===

/// An Apache-style index page linking to `hrefs`, in order
pub fn listing_html(hrefs: &[&str]) -> String {
    let mut body = String::from(
        "<html><head><title>Index of /</title></head><body><h1>Index of /</h1><pre>\
         <a href=\"?C=N;O=D\">Name</a> <a href=\"?C=M;O=A\">Last modified</a>\n<hr>",
    );
    for href in hrefs {
        body.push_str(&format!("<a href=\"{0}\">{0}</a>\n", href));
    }
    body.push_str("<hr></pre></body></html>");
    body
}

/// Serve an index page linking to `hrefs` at `dir` (a path ending in `/`)
pub async fn mount_listing(server: &MockServer, dir: &str, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(dir))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(listing_html(hrefs).into_bytes(), "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Serve `content` for GET at `file_path`
pub async fn mount_file(server: &MockServer, file_path: &str, content: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(content, "application/octet-stream"))
        .mount(server)
        .await;
}

/// Full URL of `p` on the mock server
pub fn server_url(server: &MockServer, p: &str) -> String {
    format!("{}{}", server.uri(), p)
}

pub fn leaf_at(server: &MockServer, p: &str) -> LeafResource {
    LeafResource::from_url(&Url::parse(&server_url(server, p)).expect("valid url"))
}

/// Number of requests received with the given method
pub async fn count_requests(server: &MockServer, verb: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == verb)
        .count()
}

/// Paths of the GET requests received, in order
pub async fn get_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .map(|r| r.url.path().to_string())
        .collect()
}

// === Raw HTTP Server ===

/// Answers every connection with the bytes `respond` returns for the
/// request method and path, then closes the connection.
///
/// Lets tests send framing wiremock cannot produce, such as a body longer
/// than declared or a connection dropped mid-body.
pub async fn spawn_raw_server<F>(respond: F) -> String
where
    F: Fn(&str, &str) -> Vec<u8> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind raw server");
    let addr = listener.local_addr().expect("Failed to read local address");
    let respond = std::sync::Arc::new(respond);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let respond = respond.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&head);
                let mut parts = head.split_whitespace();
                let verb = parts.next().unwrap_or_default().to_string();
                let target = parts.next().unwrap_or_default().to_string();

                let response = respond(&verb, &target);
                let _ = socket.write_all(&response).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Raw response head with the given extra header lines
pub fn raw_head(status: &str, headers: &[&str]) -> Vec<u8> {
    let mut head = format!("HTTP/1.1 {}\r\nConnection: close\r\n", status);
    for header in headers {
        head.push_str(header);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    head.into_bytes()
}

// === HTTP Configuration Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a test HTTP client configuration with custom retries
pub fn create_test_http_config_with_retries(retries: u32) -> HttpClientConfig {
    HttpClientConfig {
        retries,
        proxy: None,
        headers: Some(create_test_headers()),
        timeout: Some(Duration::from_secs(5)),
    }
}

// === Progress Bar Helpers ===

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(
        Some(template.to_string()),
        Some(chars.to_string()),
        true,
        false,
    )
}

/// Asserts that progress bar options are configured correctly
pub fn assert_progress_opts_enabled(opts: &ProgressBarOpts) {
    assert!(opts.is_enabled(), "Progress bar should be enabled");
    let pb = opts.clone().to_progress_bar(100);
    assert_eq!(pb.length(), Some(100));
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(100);
    assert!(pb.is_hidden(), "Progress bar should be disabled");
}

/// Asserts that style options are enabled
pub fn assert_style_options_enabled(style: &StyleOptions) {
    assert!(style.is_enabled(), "Style options should be enabled");
}

/// Asserts that style options are disabled
pub fn assert_style_options_disabled(style: &StyleOptions) {
    assert!(!style.is_enabled(), "Style options should be disabled");
}

/// Sends `prefix` on every connection, then holds it open without sending
/// anything else.
pub async fn spawn_stalling_server(prefix: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stalling server");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let prefix = prefix.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(&prefix).await;
                tokio::time::sleep(Duration::from_secs(30)).await;
            });
        }
    });

    format!("http://{}", addr)
}
