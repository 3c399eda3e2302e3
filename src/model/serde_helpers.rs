//! Serde helpers for the backend's wire conventions.

use serde::{Deserialize, Deserializer, Serializer};

/// Money fields travel as strings (`"1990.00"`). Parse to `f64` on read; a
/// value that fails to parse yields `NaN`, which callers must treat as
/// invalid rather than coerce to zero. Serializes back as a string.
pub mod money_string {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(value) => value,
            Raw::Text(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        })
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}

/// `Option` variant of [`money_string`]. `null` and absent map to `None`.
pub mod option_money_string {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
            Raw::Number(value) => value,
            Raw::Text(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        }))
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }
}

pub fn default_true() -> bool {
    true
}

/// Blank optional text fields become `None` instead of empty-string
/// sentinels.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(with = "money_string")]
        price: f64,
    }

    #[test]
    fn money_parses_strings_and_numbers() {
        let from_string: Priced = serde_json::from_str(r#"{"price": "1990.50"}"#).unwrap();
        assert_eq!(from_string.price, 1990.5);

        let from_number: Priced = serde_json::from_str(r#"{"price": 1990.5}"#).unwrap();
        assert_eq!(from_number.price, 1990.5);
    }

    #[test]
    fn unparseable_money_yields_nan_not_zero() {
        let bad: Priced = serde_json::from_str(r#"{"price": "N/A"}"#).unwrap();
        assert!(bad.price.is_nan());
    }

    #[test]
    fn blank_contacts_normalize_to_none() {
        assert_eq!(blank_to_none(Some("  ".to_string())), None);
        assert_eq!(blank_to_none(Some(String::new())), None);
        assert_eq!(blank_to_none(None), None);
        assert_eq!(
            blank_to_none(Some("ana@example.cl".to_string())),
            Some("ana@example.cl".to_string())
        );
    }
}
