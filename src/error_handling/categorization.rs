//! Error categorization.
//!
//! Maps transport-level `reqwest` failures onto `FetchError` so the message
//! always names the URL that failed.

use super::types::FetchError;

/// Categorizes a `reqwest::Error` raised while fetching `url`.
///
/// Status errors are checked first, then timeouts and connection failures;
/// everything else (body, decode, redirect) is reported as a transport error.
pub fn categorize_reqwest_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if let Some(status) = error.status() {
        return FetchError::Status { url, status };
    }

    if error.is_timeout() {
        FetchError::Timeout { url, source: error }
    } else if error.is_connect() {
        FetchError::Connect { url, source: error }
    } else {
        FetchError::Transport { url, source: error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_categorize_connection_refused() {
        // Port 1 on loopback is not expected to accept connections
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let url = "http://127.0.0.1:1/servers.geojson";
        let error = client.get(url).send().await.unwrap_err();

        let categorized = categorize_reqwest_error(url, error);
        assert!(
            matches!(categorized, FetchError::Connect { .. }),
            "Expected connect error, got: {:?}",
            categorized
        );
        assert!(categorized.to_string().contains(url));
    }

    #[tokio::test]
    async fn test_categorize_builder_error_is_transport() {
        let client = reqwest::Client::new();
        let url = "not a url";
        let error = client.get(url).send().await.unwrap_err();

        let categorized = categorize_reqwest_error(url, error);
        assert!(matches!(categorized, FetchError::Transport { .. }));
        assert!(categorized.to_string().contains("not a url"));
    }
}
