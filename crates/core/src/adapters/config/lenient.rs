//! Environment overrides arrive as strings; these accept either the native value from a
//! config file or its string form.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum NativeOrText<T> {
    Native(T),
    Text(String),
}

pub fn native_or_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match NativeOrText::<T>::deserialize(deserializer)? {
        NativeOrText::Native(value) => Ok(value),
        NativeOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("'{text}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(serde::Deserialize, Debug)]
    struct Sample {
        #[serde(deserialize_with = "native_or_text")]
        port: u16,
        #[serde(deserialize_with = "native_or_text")]
        enabled: bool,
    }

    #[test]
    fn test_native_values() {
        let sample: Sample =
            serde_json::from_value(json!({ "port": 80, "enabled": true })).unwrap();
        assert_eq!(sample.port, 80);
        assert!(sample.enabled);
    }

    #[test]
    fn test_string_values() {
        let sample: Sample =
            serde_json::from_value(json!({ "port": " 8080 ", "enabled": "false" })).unwrap();
        assert_eq!(sample.port, 8080);
        assert!(!sample.enabled);
    }

    #[test]
    fn test_unparsable_string() {
        let err = serde_json::from_value::<Sample>(json!({ "port": "http", "enabled": true }))
            .unwrap_err();
        assert!(err.to_string().contains("'http'"));
    }
}
