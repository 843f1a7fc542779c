//! Serde helpers for decimal wire fields
//!
//! Monetary fields travel as decimal strings. Some contracts always emit the
//! field but leave it blank when the value is not set; those use
//! [`blank_as_none`].

/// `Option<Decimal>` that serializes `None` as `""` and reads `""` back as `None`
pub mod blank_as_none {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_str(&d.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(Decimal),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(d)) => Ok(Some(d)),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => Decimal::from_str(s.trim())
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "super::blank_as_none", default)]
        limit_price: Option<Decimal>,
    }

    #[test]
    fn test_blank_is_none() {
        let parsed: Priced = serde_json::from_str(r#"{"limit_price":""}"#).unwrap();
        assert_eq!(parsed.limit_price, None);
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"limit_price":""}"#
        );
    }

    #[test]
    fn test_value_keeps_scale() {
        let parsed: Priced = serde_json::from_str(r#"{"limit_price":"0.5500"}"#).unwrap();
        assert_eq!(parsed.limit_price, Some(dec!(0.5500)));
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"limit_price":"0.5500"}"#
        );
    }

    #[test]
    fn test_missing_and_null() {
        let parsed: Priced = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.limit_price, None);
        let parsed: Priced = serde_json::from_str(r#"{"limit_price":null}"#).unwrap();
        assert_eq!(parsed.limit_price, None);
    }
}
