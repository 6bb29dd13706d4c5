//! Provider response shapes.
//!
//! ## Primary provider (`/dofus3/v1/{lang}/almanax`)
//! A JSON array, one object per day, with `snake_case` keys:
//! `bonus.type.{name,id}`, `bonus.description`, `date` (RFC 3339),
//! `tribute.item.{name,image_urls.{sd,hd},subtype,ankama_id}`,
//! `tribute.quantity`, `reward_kamas`, `reward_xp`.
//!
//! These types are produced by [`crate::validate::validate_almanax`] rather
//! than by serde, so that schema drift is reported with a precise JSON path.
//!
//! ## Secondary provider (`/dofus2/{lang}/...`)
//! Only the item identifier and the high-definition image are of interest.
//! Those shapes are deserialized leniently with serde: anything unexpected is
//! an enrichment miss, never an error.

use serde::Deserialize;

/// One validated day from the primary provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlmanaxDay {
    pub bonus: Bonus,
    /// Date-time exactly as sent by the provider.
    pub date: String,
    pub tribute: Tribute,
    pub reward_kamas: u64,
    pub reward_xp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bonus {
    pub bonus_type: BonusType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusType {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tribute {
    pub item: TributeItem,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TributeItem {
    pub name: String,
    pub image_urls: ImageUrls,
    pub subtype: String,
    pub ankama_id: u64,
}

/// Image variants; either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageUrls {
    #[serde(default)]
    pub sd: Option<String>,
    #[serde(default)]
    pub hd: Option<String>,
}

/// One hit from `GET /dofus2/{lang}/items/search`.
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub ankama_id: u64,
    #[serde(default)]
    pub image_urls: Option<ImageUrls>,
}

impl SearchHit {
    #[must_use]
    pub fn hd_image(&self) -> Option<&str> {
        self.image_urls.as_ref().and_then(|u| u.hd.as_deref())
    }
}

/// One day from `GET /dofus2/{lang}/almanax`. Every level is optional.
#[derive(Debug, Default, Deserialize)]
pub struct SecondaryAlmanaxDay {
    #[serde(default)]
    pub tribute: Option<SecondaryTribute>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SecondaryTribute {
    #[serde(default)]
    pub item: Option<SecondaryItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SecondaryItem {
    #[serde(default)]
    pub ankama_id: Option<u64>,
    #[serde(default)]
    pub image_urls: Option<ImageUrls>,
}

impl SecondaryAlmanaxDay {
    /// `(ankama_id, hd image)` when both are present.
    #[must_use]
    pub fn hd_image_by_id(&self) -> Option<(u64, &str)> {
        let item = self.tribute.as_ref()?.item.as_ref()?;
        let id = item.ankama_id?;
        let hd = item.image_urls.as_ref()?.hd.as_deref()?;
        Some((id, hd))
    }
}
