//! Page-body retrieval for directory listings.

use crate::error::{Error, Result};

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// Fetch a directory page and return its body as text.
///
/// Redirects are followed. Any non-success status is an error, and the body
/// is decoded using the declared charset with invalid sequences replaced, so
/// a badly encoded listing still yields its links.
pub async fn get_text(client: &ClientWithMiddleware, url: &Url) -> Result<String> {
    debug!(url = %url, "fetching listing page");
    let res = client.get(url.clone()).send().await?;

    let status = res.status();
    if !status.is_success() {
        return Err(Error::Status(status));
    }

    Ok(res.text().await?)
}
