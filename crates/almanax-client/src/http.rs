//! Shared HTTP plumbing for both providers.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::AlmanaxError;

/// Builds the `reqwest::Client` shared by the primary and secondary clients.
///
/// `timeout_secs = None` keeps reqwest's default (no overall timeout).
///
/// # Errors
///
/// Returns [`AlmanaxError::Http`] if the client cannot be constructed.
pub fn build_http_client(
    timeout_secs: Option<u64>,
    user_agent: &str,
) -> Result<Client, AlmanaxError> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Parses a provider base URL such as `https://api.dofusdu.de/dofus3/v1`.
///
/// # Errors
///
/// Returns [`AlmanaxError::InvalidBaseUrl`] if the string is not an absolute
/// URL that can carry path segments.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, AlmanaxError> {
    let invalid = |reason: String| AlmanaxError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };
    let url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry path segments".to_string()));
    }
    Ok(url)
}

/// Appends `segments` to the base URL path, percent-encoding each one.
/// Handles base URLs with or without a trailing slash.
pub(crate) fn endpoint_url(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        path.extend(segments);
    }
    url
}

/// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
///
/// # Errors
///
/// - [`AlmanaxError::Fetch`] on network failure.
/// - [`AlmanaxError::UnexpectedStatus`] on a non-2xx status.
/// - [`AlmanaxError::Deserialize`] if the body is not JSON.
pub(crate) async fn get_json(client: &Client, url: &Url) -> Result<Value, AlmanaxError> {
    let fetch_err = |source| AlmanaxError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(fetch_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(AlmanaxError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await.map_err(fetch_err)?;
    serde_json::from_str(&body).map_err(|e| AlmanaxError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_appends_to_versioned_base() {
        let base = parse_base_url("https://api.dofusdu.de/dofus3/v1").unwrap();
        let url = endpoint_url(&base, &["fr", "almanax"]);
        assert_eq!(url.as_str(), "https://api.dofusdu.de/dofus3/v1/fr/almanax");
    }

    #[test]
    fn endpoint_url_tolerates_trailing_slash() {
        let base = parse_base_url("https://api.dofusdu.de/dofus2/").unwrap();
        let url = endpoint_url(&base, &["en", "items", "search"]);
        assert_eq!(url.as_str(), "https://api.dofusdu.de/dofus2/en/items/search");
    }

    #[test]
    fn endpoint_url_on_bare_host() {
        let base = parse_base_url("http://127.0.0.1:8080").unwrap();
        let url = endpoint_url(&base, &["fr", "almanax"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/fr/almanax");
    }

    #[test]
    fn endpoint_url_encodes_segments() {
        let base = parse_base_url("http://127.0.0.1:8080").unwrap();
        let url = endpoint_url(&base, &["f r", "almanax"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/f%20r/almanax");
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, AlmanaxError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn parse_base_url_rejects_non_hierarchical_url() {
        let err = parse_base_url("mailto:someone@example.com").unwrap_err();
        assert!(matches!(err, AlmanaxError::InvalidBaseUrl { .. }));
    }
}
