pub mod aggregate;
pub mod error;
pub mod http;
pub mod image;
pub mod primary;
pub mod secondary;
pub mod types;
pub mod validate;

pub use aggregate::{build_entry, calendar_date, enrich, select_image, Aggregator};
pub use error::AlmanaxError;
pub use image::{DailyListImages, ImageLookup, SearchImageResolver};
pub use primary::PrimaryClient;
pub use secondary::SecondaryClient;
pub use types::{AlmanaxDay, Bonus, BonusType, ImageUrls, Tribute, TributeItem};
pub use validate::{validate_almanax, ValidationError};
