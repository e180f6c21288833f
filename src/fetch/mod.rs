//! Remote resource retrieval.
//!
//! The catalog feed and the profile archive are both plain HTTP GETs whose
//! whole body is needed before anything else can happen.

use crate::error_handling::{categorize_reqwest_error, FetchError};

/// Downloads the full body of `url`.
///
/// Non-success statuses are errors. There is no retry: a failed fetch is
/// reported to the caller, who decides whether to try again.
pub(crate) async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    log::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| categorize_reqwest_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        log::error!("GET {} returned {}", url, status);
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| categorize_reqwest_error(url, e))?;
    log::debug!("GET {} returned {} bytes", url, bytes.len());
    Ok(bytes.to_vec())
}
