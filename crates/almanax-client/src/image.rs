//! Secondary-provider image lookup.
//!
//! A lookup answers one question: does the secondary provider hold a
//! high-definition image for exactly this item id? Every failure mode is a
//! miss (`None`) and is logged here; nothing is propagated.

use std::collections::HashMap;
use std::future::Future;

use crate::secondary::SecondaryClient;
use crate::types::SecondaryAlmanaxDay;

/// Resolves the secondary high-definition image of a tribute item.
pub trait ImageLookup {
    /// Returns the image URL only when the secondary record's identifier
    /// equals `item_id`. Never fails; a miss is `None`.
    fn resolve(
        &self,
        item_name: &str,
        item_id: u64,
    ) -> impl Future<Output = Option<String>> + Send;
}

/// Looks each item up through the secondary item search, one request per
/// item.
#[derive(Debug, Clone, Copy)]
pub struct SearchImageResolver<'a> {
    client: &'a SecondaryClient,
    language: &'a str,
}

impl<'a> SearchImageResolver<'a> {
    #[must_use]
    pub fn new(client: &'a SecondaryClient, language: &'a str) -> Self {
        Self { client, language }
    }
}

impl ImageLookup for SearchImageResolver<'_> {
    async fn resolve(&self, item_name: &str, item_id: u64) -> Option<String> {
        let hit = match self.client.search_first(self.language, item_name).await {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                tracing::warn!(item = item_name, item_id, "image lookup miss: no search result");
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    item = item_name,
                    item_id,
                    error = %e,
                    "image lookup miss: secondary request failed"
                );
                return None;
            }
        };

        // Names collide across items; only an exact id match is trusted.
        if hit.ankama_id != item_id {
            tracing::warn!(
                item = item_name,
                item_id,
                found_id = hit.ankama_id,
                "image lookup miss: identifier mismatch"
            );
            return None;
        }

        match hit.hd_image() {
            Some(url) if !url.is_empty() => Some(url.to_owned()),
            _ => {
                tracing::warn!(item = item_name, item_id, "image lookup miss: no hd image");
                None
            }
        }
    }
}

/// Images taken from one prefetched secondary almanax window, keyed by
/// item id.
#[derive(Debug, Clone, Default)]
pub struct DailyListImages {
    by_id: HashMap<u64, String>,
}

impl DailyListImages {
    /// Indexes the days that carry both an id and a non-empty hd image.
    /// The first image seen for an id wins.
    #[must_use]
    pub fn from_days(days: &[SecondaryAlmanaxDay]) -> Self {
        let mut by_id = HashMap::new();
        for (id, hd) in days.iter().filter_map(SecondaryAlmanaxDay::hd_image_by_id) {
            if !hd.is_empty() {
                by_id.entry(id).or_insert_with(|| hd.to_owned());
            }
        }
        Self { by_id }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl ImageLookup for DailyListImages {
    async fn resolve(&self, item_name: &str, item_id: u64) -> Option<String> {
        let found = self.by_id.get(&item_id).cloned();
        if found.is_none() {
            tracing::warn!(
                item = item_name,
                item_id,
                "image lookup miss: item not in secondary almanax window"
            );
        }
        found
    }
}
