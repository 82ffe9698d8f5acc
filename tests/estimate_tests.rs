//! Tests for the size estimator.

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use spelunk::estimate::estimate_size;
use spelunk::http::create_http_client;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

fn client() -> ClientWithMiddleware {
    create_http_client(create_test_http_config_with_retries(0)).unwrap()
}

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[tokio::test]
async fn test_head_content_length_wins() {
    let base = spawn_raw_server(|verb, _| match verb {
        "HEAD" => raw_head("200 OK", &["Content-Length: 2048"]),
        _ => raw_head("500 Internal Server Error", &["Content-Length: 0"]),
    })
    .await;

    let size = estimate_size(&client(), &url(&format!("{}/a.pdf", base))).await;
    assert_eq!(size, Some(2048));
}

#[tokio::test]
async fn test_ranged_get_content_range_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a.pdf"))
        .and(header("range", "bytes=0-0"))
        .respond_with(
            ResponseTemplate::new(206)
                .insert_header("content-range", "bytes 0-0/5000")
                .set_body_bytes(vec![0u8]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let size = estimate_size(&client(), &url(&server_url(&server, "/a.pdf"))).await;
    assert_eq!(size, Some(5000));
    assert_eq!(count_requests(&server, "HEAD").await, 1);
}

#[tokio::test]
async fn test_full_response_falls_back_to_content_length() {
    let server = MockServer::start().await;
    mount_file(&server, "/b.zip", create_test_content(777)).await;

    let size = estimate_size(&client(), &url(&server_url(&server, "/b.zip"))).await;
    assert_eq!(size, Some(777));
}

#[tokio::test]
async fn test_head_without_length_falls_back() {
    let base = spawn_raw_server(|verb, _| match verb {
        "HEAD" => raw_head("200 OK", &["Content-Type: application/pdf"]),
        _ => {
            let mut res = raw_head(
                "206 Partial Content",
                &["Content-Range: bytes 0-0/77", "Content-Length: 1"],
            );
            res.push(0);
            res
        }
    })
    .await;

    let size = estimate_size(&client(), &url(&format!("{}/c.pdf", base))).await;
    assert_eq!(size, Some(77));
}

#[tokio::test]
async fn test_unknown_total_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/d.bin"))
        .respond_with(
            ResponseTemplate::new(206)
                .insert_header("content-range", "bytes 0-0/*")
                .set_body_bytes(vec![0u8]),
        )
        .mount(&server)
        .await;

    let size = estimate_size(&client(), &url(&server_url(&server, "/d.bin"))).await;
    assert_eq!(size, None);
}

#[tokio::test]
async fn test_errors_never_propagate() {
    let server = MockServer::start().await;
    let size = estimate_size(&client(), &url(&server_url(&server, "/missing.pdf"))).await;
    assert_eq!(size, None);

    // Nothing listens on port 1.
    let size = estimate_size(&client(), &url("http://127.0.0.1:1/a.pdf")).await;
    assert_eq!(size, None);
}
