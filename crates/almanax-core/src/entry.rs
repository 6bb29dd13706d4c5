//! The canonical, display-ready almanax record.

use serde::{Deserialize, Serialize};

/// One day of the almanax, merged from the primary record and the best image
/// either provider could supply.
///
/// Serialized with `snake_case` keys (`bonus_id`, `loot_id`, `reward_kamas`,
/// ...), which is the shape the rendering side consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlmanaxEntry {
    /// Long-form bonus description.
    pub description: String,
    /// Bonus category name (e.g. `"Pet's"`).
    pub bonus: String,
    /// Stable identifier of the bonus category.
    pub bonus_id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Resolved tribute image URL; empty only when no source had one.
    pub image: String,
    /// Tribute item name.
    pub loot: String,
    /// Tribute item identifier (`ankama_id`).
    pub loot_id: u64,
    pub quantity: u32,
    pub reward_kamas: u64,
    pub reward_xp: u64,
    /// Tribute item category (e.g. `"Resource"`).
    pub subtype: String,
}

impl AlmanaxEntry {
    /// Whether any provider supplied an image for this day.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}
