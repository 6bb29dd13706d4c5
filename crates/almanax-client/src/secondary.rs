//! Client for the secondary (older-generation) provider, used only as an
//! image source.

use almanax_core::resolve_language;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::AlmanaxError;
use crate::http::{endpoint_url, get_json, parse_base_url};
use crate::primary::WINDOW_DAYS;
use crate::types::{SearchHit, SecondaryAlmanaxDay};

#[derive(Debug, Clone)]
pub struct SecondaryClient {
    client: Client,
    base_url: Url,
}

impl SecondaryClient {
    /// # Errors
    ///
    /// Returns [`AlmanaxError::InvalidBaseUrl`] if `base_url` cannot be parsed.
    pub fn with_base_url(client: Client, base_url: &str) -> Result<Self, AlmanaxError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Searches items by name and returns the first hit, if any.
    ///
    /// Calls `GET {base}/{lang}/items/search?query={name}&limit=1`.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures as [`AlmanaxError`];
    /// callers treat every one of them as a miss.
    pub async fn search_first(
        &self,
        language: &str,
        item_name: &str,
    ) -> Result<Option<SearchHit>, AlmanaxError> {
        let url = self.search_url(language, item_name);
        tracing::debug!(url = %url, "searching secondary items");

        let body = get_json(&self.client, &url).await?;
        let hits: Vec<SearchHit> =
            serde_json::from_value(body).map_err(|e| AlmanaxError::Deserialize {
                context: format!("item search for \"{item_name}\""),
                source: e,
            })?;
        Ok(hits.into_iter().next())
    }

    /// Fetches the secondary provider's own almanax window.
    ///
    /// Calls `GET {base}/{lang}/almanax?range[size]=7`. Entries that do not
    /// match the expected shape are skipped rather than failing the list.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanaxError`] on transport or status failure, or when the
    /// body is not a JSON array.
    pub async fn fetch_daily_list(
        &self,
        language: &str,
    ) -> Result<Vec<SecondaryAlmanaxDay>, AlmanaxError> {
        let url = self.daily_list_url(language);
        tracing::debug!(url = %url, "fetching secondary almanax window");

        let body = get_json(&self.client, &url).await?;
        let entries: Vec<Value> =
            serde_json::from_value(body).map_err(|e| AlmanaxError::Deserialize {
                context: format!("secondary almanax window from {url}"),
                source: e,
            })?;

        Ok(entries
            .into_iter()
            .filter_map(|v| serde_json::from_value::<SecondaryAlmanaxDay>(v).ok())
            .collect())
    }

    fn search_url(&self, language: &str, item_name: &str) -> Url {
        let mut url = endpoint_url(
            &self.base_url,
            &[resolve_language(language), "items", "search"],
        );
        url.query_pairs_mut()
            .append_pair("query", item_name)
            .append_pair("limit", "1");
        url
    }

    fn daily_list_url(&self, language: &str) -> Url {
        let mut url = endpoint_url(&self.base_url, &[resolve_language(language), "almanax"]);
        url.query_pairs_mut()
            .append_pair("range[size]", &WINDOW_DAYS.to_string());
        url
    }
}
