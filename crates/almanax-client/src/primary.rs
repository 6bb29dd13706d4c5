//! Client for the primary (current-generation) almanax provider.

use almanax_core::resolve_language;
use reqwest::{Client, Url};

use crate::error::AlmanaxError;
use crate::http::{endpoint_url, get_json, parse_base_url};

/// Number of upcoming days requested per fetch.
pub const WINDOW_DAYS: u32 = 7;

/// Fetches the raw almanax window from `GET {base}/{lang}/almanax`.
///
/// The body is returned unvalidated; see [`crate::validate::validate_almanax`].
#[derive(Debug, Clone)]
pub struct PrimaryClient {
    client: Client,
    base_url: Url,
}

impl PrimaryClient {
    /// # Errors
    ///
    /// Returns [`AlmanaxError::InvalidBaseUrl`] if `base_url` cannot be parsed.
    pub fn with_base_url(client: Client, base_url: &str) -> Result<Self, AlmanaxError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Fetches the next [`WINDOW_DAYS`] days for a character of `level`.
    /// A blank `language` falls back to the source language.
    ///
    /// Single attempt, no retry.
    ///
    /// # Errors
    ///
    /// - [`AlmanaxError::Fetch`] on network failure.
    /// - [`AlmanaxError::UnexpectedStatus`] on a non-2xx status.
    /// - [`AlmanaxError::Deserialize`] if the body is not JSON.
    pub async fn fetch(
        &self,
        level: u32,
        language: &str,
    ) -> Result<serde_json::Value, AlmanaxError> {
        let url = self.almanax_url(level, language);
        tracing::debug!(url = %url, "fetching primary almanax window");

        get_json(&self.client, &url).await
    }

    fn almanax_url(&self, level: u32, language: &str) -> Url {
        let mut url = endpoint_url(&self.base_url, &[resolve_language(language), "almanax"]);
        url.query_pairs_mut()
            .append_pair("range[size]", &WINDOW_DAYS.to_string())
            .append_pair("level", &level.to_string());
        url
    }
}
