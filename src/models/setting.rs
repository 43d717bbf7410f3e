//! Setting values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of a single setting.
///
/// Enum and version settings are string-shaped; their semantic type comes
/// from the schema, not from the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl SettingValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(b) => write!(f, "{b}"),
            SettingValue::Integer(n) => write!(f, "{n}"),
            SettingValue::String(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Boolean(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Integer(i64::from(value))
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_strings_only() {
        assert_eq!(SettingValue::from(35).to_string(), "35");
        assert_eq!(SettingValue::from(true).to_string(), "true");
        assert_eq!(SettingValue::from("17").to_string(), "\"17\"");
    }

    #[test]
    fn untagged_deserialize_picks_literal_kind() {
        let v: Vec<SettingValue> = serde_json::from_str(r#"[true, 23, "1.8"]"#).unwrap();
        assert_eq!(
            v,
            vec![
                SettingValue::Boolean(true),
                SettingValue::Integer(23),
                SettingValue::String("1.8".into()),
            ]
        );
    }

    #[test]
    fn as_integer_only_matches_integers() {
        assert_eq!(SettingValue::from(21).as_integer(), Some(21));
        assert_eq!(SettingValue::from("21").as_integer(), None);
        assert_eq!(SettingValue::from(false).as_integer(), None);
    }
}
