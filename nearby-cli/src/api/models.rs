//! Provider listing model shared by the static catalog and live search
//!
//! Backends are inconsistent about field names and types, so every field is
//! optional and numbers are accepted either as JSON numbers or as strings.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::{Coordinate, Located};

/// One business listing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProviderRecord {
    #[serde(default, alias = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(
        default,
        alias = "title",
        alias = "business_name",
        alias = "businessName",
        deserialize_with = "lenient::opt_string"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        alias = "location",
        alias = "address_text",
        alias = "addressText",
        deserialize_with = "lenient::opt_string"
    )]
    pub address: Option<String>,
    #[serde(default, alias = "lat", deserialize_with = "lenient::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(
        default,
        alias = "lng",
        alias = "lon",
        alias = "long",
        deserialize_with = "lenient::opt_f64"
    )]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
    #[serde(
        default,
        alias = "reviews",
        alias = "reviewCount",
        deserialize_with = "lenient::opt_u32"
    )]
    pub review_count: Option<u32>,
    #[serde(
        default,
        alias = "open",
        alias = "isOpen",
        alias = "open_now",
        deserialize_with = "lenient::opt_bool"
    )]
    pub is_open: Option<bool>,
    #[serde(
        default,
        alias = "phones",
        alias = "contact_numbers",
        alias = "contactNumbers",
        deserialize_with = "lenient::string_list"
    )]
    pub phone_numbers: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
}

impl ProviderRecord {
    /// Name to show in a card, never empty
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("Unnamed listing")
    }

    /// Validated position, None when missing or out of range
    pub fn position(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }

    pub fn primary_phone(&self) -> Option<&str> {
        self.phone_numbers.first().map(String::as_str)
    }

    /// Open/closed label for cards
    pub fn status_label(&self) -> &'static str {
        match self.is_open {
            Some(true) => "Open",
            Some(false) => "Closed",
            None => "Hours unknown",
        }
    }
}

impl Located for ProviderRecord {
    fn coordinate(&self) -> Option<Coordinate> {
        self.position()
    }
}

mod lenient {
    use super::*;
    use serde_json::Value;

    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(as_f64).filter(|v| v.is_finite()))
    }

    pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(as_f64)
            .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v as u32))
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Booleans, 0/1, and the usual yes/no spellings; anything else is unknown
    pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Bool(b)) => Some(b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "open" | "1" => Some(true),
                "false" | "no" | "n" | "closed" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    /// Accepts a list, a single string, or a comma separated string
    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let items = match value {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) => s.split(',').map(|part| part.to_string()).collect(),
            Some(Value::Number(n)) => vec![n.to_string()],
            _ => Vec::new(),
        };
        Ok(items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}
