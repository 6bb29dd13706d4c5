//! Schema check for the primary provider's almanax response.
//!
//! This is where untrusted JSON becomes [`AlmanaxDay`] values. Required fields
//! are never defaulted: a missing or mistyped one fails the whole response
//! with the JSON path of the offending value, e.g.
//! `$[2].tribute.item.ankama_id`.

use serde_json::Value;
use thiserror::Error;

use crate::types::{AlmanaxDay, Bonus, BonusType, ImageUrls, Tribute, TributeItem};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct ValidationError {
    pub path: String,
    pub reason: String,
}

impl ValidationError {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Validates a raw primary response and converts it into typed days,
/// preserving the provider's order.
///
/// # Errors
///
/// Returns [`ValidationError`] for the first structural violation found:
/// a non-array root, a missing required field, or a value of the wrong type.
/// Absent `image_urls`, `sd`, `hd` and `bonus.description` are accepted.
pub fn validate_almanax(raw: &Value) -> Result<Vec<AlmanaxDay>, ValidationError> {
    let root = Node {
        value: raw,
        path: "$".to_string(),
    };
    let items = root.as_array()?;
    items
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            validate_day(&Node {
                value,
                path: format!("$[{idx}]"),
            })
        })
        .collect()
}

fn validate_day(day: &Node<'_>) -> Result<AlmanaxDay, ValidationError> {
    let bonus = day.field("bonus")?;
    let bonus_type = bonus.field("type")?;
    let description = match bonus.optional_field("description")? {
        Some(node) => node.as_string()?,
        None => String::new(),
    };

    let date = day.field("date")?.as_string()?;

    let tribute = day.field("tribute")?;
    let item = tribute.field("item")?;

    Ok(AlmanaxDay {
        bonus: Bonus {
            bonus_type: BonusType {
                name: bonus_type.field("name")?.as_string()?,
                id: bonus_type.field("id")?.as_string()?,
            },
            description,
        },
        date,
        tribute: Tribute {
            item: TributeItem {
                name: item.field("name")?.as_string()?,
                image_urls: validate_image_urls(&item)?,
                subtype: item.field("subtype")?.as_string()?,
                ankama_id: item.field("ankama_id")?.as_u64()?,
            },
            quantity: tribute.field("quantity")?.as_u32()?,
        },
        reward_kamas: day.field("reward_kamas")?.as_u64()?,
        reward_xp: day.field("reward_xp")?.as_u64()?,
    })
}

fn validate_image_urls(item: &Node<'_>) -> Result<ImageUrls, ValidationError> {
    let Some(urls) = item.optional_field("image_urls")? else {
        return Ok(ImageUrls::default());
    };
    let optional_string = |key: &str| -> Result<Option<String>, ValidationError> {
        urls.optional_field(key)?
            .map(|node| node.as_string())
            .transpose()
    };
    Ok(ImageUrls {
        sd: optional_string("sd")?,
        hd: optional_string("hd")?,
    })
}

/// A JSON value together with its path from the document root.
struct Node<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Node<'a> {
    fn child(&self, key: &str, value: &'a Value) -> Node<'a> {
        Node {
            value,
            path: format!("{}.{key}", self.path),
        }
    }

    fn as_object(&self) -> Result<&'a serde_json::Map<String, Value>, ValidationError> {
        self.value
            .as_object()
            .ok_or_else(|| self.type_error("an object"))
    }

    fn as_array(&self) -> Result<&'a Vec<Value>, ValidationError> {
        self.value
            .as_array()
            .ok_or_else(|| self.type_error("an array"))
    }

    /// A required field: absent and `null` are both violations.
    fn field(&self, key: &str) -> Result<Node<'a>, ValidationError> {
        match self.as_object()?.get(key) {
            Some(Value::Null) | None => Err(ValidationError::new(
                &format!("{}.{key}", self.path),
                "missing required field",
            )),
            Some(value) => Ok(self.child(key, value)),
        }
    }

    /// An optional field: absent and `null` both read as `None`.
    fn optional_field(&self, key: &str) -> Result<Option<Node<'a>>, ValidationError> {
        match self.as_object()?.get(key) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(self.child(key, value))),
        }
    }

    fn as_string(&self) -> Result<String, ValidationError> {
        self.value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.type_error("a string"))
    }

    fn as_u64(&self) -> Result<u64, ValidationError> {
        self.value
            .as_u64()
            .ok_or_else(|| self.type_error("a non-negative integer"))
    }

    fn as_u32(&self) -> Result<u32, ValidationError> {
        let wide = self.as_u64()?;
        u32::try_from(wide).map_err(|_| {
            ValidationError::new(&self.path, format!("{wide} does not fit in 32 bits"))
        })
    }

    fn type_error(&self, expected: &str) -> ValidationError {
        ValidationError::new(
            &self.path,
            format!("expected {expected}, found {}", describe(self.value)),
        )
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
