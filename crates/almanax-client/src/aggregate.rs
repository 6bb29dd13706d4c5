//! Merges the primary almanax window with secondary images into
//! [`AlmanaxEntry`] values.
//!
//! Only the primary fetch and its validation can fail a run. Image
//! enrichment runs once per day, concurrently, and at worst leaves a day
//! with a lower-quality or empty image. Output order always matches the
//! primary response.

use almanax_core::{resolve_language, AlmanaxEntry, AppConfig, EnrichmentMode, PreferenceSource};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use futures::stream::{self, StreamExt};

use crate::error::AlmanaxError;
use crate::http::build_http_client;
use crate::image::{DailyListImages, ImageLookup, SearchImageResolver};
use crate::primary::{PrimaryClient, WINDOW_DAYS};
use crate::secondary::SecondaryClient;
use crate::types::{AlmanaxDay, ImageUrls};
use crate::validate::validate_almanax;

pub struct Aggregator {
    primary: PrimaryClient,
    secondary: SecondaryClient,
    enrichment: EnrichmentMode,
    lookup_concurrency: usize,
}

impl Aggregator {
    /// Search enrichment, with one lookup in flight per day of the window.
    #[must_use]
    pub fn new(primary: PrimaryClient, secondary: SecondaryClient) -> Self {
        Self {
            primary,
            secondary,
            enrichment: EnrichmentMode::Search,
            lookup_concurrency: WINDOW_DAYS as usize,
        }
    }

    /// Builds both provider clients on one shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanaxError::Http`] if the HTTP client cannot be built, or
    /// [`AlmanaxError::InvalidBaseUrl`] for an unusable provider URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, AlmanaxError> {
        let http = build_http_client(config.request_timeout_secs, &config.user_agent)?;
        let primary = PrimaryClient::with_base_url(http.clone(), &config.primary_base_url)?;
        let secondary = SecondaryClient::with_base_url(http, &config.secondary_base_url)?;
        Ok(Self::new(primary, secondary)
            .with_enrichment(config.enrichment)
            .with_lookup_concurrency(config.lookup_concurrency))
    }

    #[must_use]
    pub fn with_enrichment(mut self, enrichment: EnrichmentMode) -> Self {
        self.enrichment = enrichment;
        self
    }

    /// Values below 1 are treated as 1.
    #[must_use]
    pub fn with_lookup_concurrency(mut self, lookup_concurrency: usize) -> Self {
        self.lookup_concurrency = lookup_concurrency.max(1);
        self
    }

    #[must_use]
    pub fn enrichment(&self) -> EnrichmentMode {
        self.enrichment
    }

    /// Runs [`Self::aggregate`] with the level and language read from
    /// `preferences`.
    ///
    /// # Errors
    ///
    /// See [`Self::aggregate`].
    pub async fn aggregate_with<P: PreferenceSource + ?Sized>(
        &self,
        preferences: &P,
    ) -> Result<Vec<AlmanaxEntry>, AlmanaxError> {
        let prefs = preferences.read();
        self.aggregate(prefs.level, &prefs.language).await
    }

    /// Fetches, validates and enriches the upcoming almanax window.
    ///
    /// Returns exactly one entry per primary day, in the primary order.
    ///
    /// # Errors
    ///
    /// - A fetch failure ([`AlmanaxError::is_fetch_failure`]) from the
    ///   primary provider.
    /// - [`AlmanaxError::Validation`] if the primary body does not match the
    ///   almanax schema.
    ///
    /// Secondary-provider failures never surface here.
    pub async fn aggregate(
        &self,
        level: u32,
        language: &str,
    ) -> Result<Vec<AlmanaxEntry>, AlmanaxError> {
        let language = resolve_language(language);

        let entries = match self.enrichment {
            EnrichmentMode::Search => {
                let raw = self.primary.fetch(level, language).await?;
                let days = validate_almanax(&raw)?;
                let resolver = SearchImageResolver::new(&self.secondary, language);
                enrich(&resolver, days, self.lookup_concurrency).await
            }
            EnrichmentMode::DailyList => {
                let (raw, secondary) = tokio::join!(
                    self.primary.fetch(level, language),
                    self.secondary.fetch_daily_list(language),
                );
                let days = validate_almanax(&raw?)?;
                let images = match secondary {
                    Ok(list) => DailyListImages::from_days(&list),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "secondary almanax window unavailable; using primary images"
                        );
                        DailyListImages::default()
                    }
                };
                enrich(&images, days, self.lookup_concurrency).await
            }
        };

        tracing::info!(
            level,
            language,
            enrichment = %self.enrichment,
            entries = entries.len(),
            "almanax aggregation complete"
        );
        Ok(entries)
    }
}

/// Resolves every day's image through `lookup` with at most `concurrency`
/// lookups in flight, waits for all of them, and assembles the entries in
/// input order.
pub async fn enrich<L: ImageLookup + Sync>(
    lookup: &L,
    days: Vec<AlmanaxDay>,
    concurrency: usize,
) -> Vec<AlmanaxEntry> {
    let resolved: Vec<(AlmanaxEntry, bool)> = stream::iter(days.into_iter().map(|day| async move {
        let secondary_hd = lookup
            .resolve(&day.tribute.item.name, day.tribute.item.ankama_id)
            .await;
        let enriched = secondary_hd.is_some();
        (build_entry(day, secondary_hd.as_deref()), enriched)
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;

    let enriched = resolved.iter().filter(|(_, hit)| *hit).count();
    tracing::debug!(
        entries = resolved.len(),
        enriched,
        "image enrichment finished"
    );

    resolved.into_iter().map(|(entry, _)| entry).collect()
}

/// Assembles the canonical entry for one validated day.
#[must_use]
pub fn build_entry(day: AlmanaxDay, secondary_hd: Option<&str>) -> AlmanaxEntry {
    let image = select_image(secondary_hd, &day.tribute.item.image_urls);
    AlmanaxEntry {
        description: day.bonus.description,
        bonus: day.bonus.bonus_type.name,
        bonus_id: day.bonus.bonus_type.id,
        date: calendar_date(&day.date),
        image,
        loot: day.tribute.item.name,
        loot_id: day.tribute.item.ankama_id,
        quantity: day.tribute.quantity,
        reward_kamas: day.reward_kamas,
        reward_xp: day.reward_xp,
        subtype: day.tribute.item.subtype,
    }
}

/// First non-empty image in priority order: secondary hd, primary hd,
/// primary sd. Empty string when none qualifies.
#[must_use]
pub fn select_image(secondary_hd: Option<&str>, primary: &ImageUrls) -> String {
    [secondary_hd, primary.hd.as_deref(), primary.sd.as_deref()]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .unwrap_or_default()
        .to_owned()
}

/// `YYYY-MM-DD` of a provider date-time, time of day and offset dropped.
///
/// Forms chrono cannot read (basic offsets such as `+0100`, compact
/// `20240301T000000Z`) are truncated at the `T` instead.
#[must_use]
pub fn calendar_date(raw: &str) -> String {
    parse_calendar_date(raw).map_or_else(
        || {
            let head = raw.trim().split('T').next().unwrap_or_default();
            NaiveDate::parse_from_str(head, "%Y%m%d").map_or_else(
                |_| head.to_owned(),
                |date| date.format("%Y-%m-%d").to_string(),
            )
        },
        |date| date.format("%Y-%m-%d").to_string(),
    )
}

/// The calendar date a date-time falls on, in its own offset.
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt.date());
    }
    raw.parse::<NaiveDate>().ok()
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
