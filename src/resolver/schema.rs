//! Declared setting types and ordering rules.

use std::collections::BTreeMap;

use crate::models::SettingValue;

/// Semantic type a setting must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingType {
    String,
    /// Integer not below `min`, when a minimum is declared.
    Integer { min: Option<i64> },
    Boolean,
    /// String restricted to a fixed set of values.
    Enum(Vec<String>),
    /// Dotted numeric version, one to three components (`17`, `2.0.4`).
    Version,
}

impl SettingType {
    pub fn enumeration<S: AsRef<str>>(values: &[S]) -> Self {
        SettingType::Enum(values.iter().map(|v| v.as_ref().to_string()).collect())
    }

    /// Check a value, returning a description of what was expected on mismatch.
    pub fn check(&self, value: &SettingValue) -> Result<(), String> {
        match (self, value) {
            (SettingType::String, SettingValue::String(_)) => Ok(()),
            (SettingType::Boolean, SettingValue::Boolean(_)) => Ok(()),
            (SettingType::Integer { min }, SettingValue::Integer(n)) => match min {
                Some(min) if n < min => Err(format!("an integer >= {min}")),
                _ => Ok(()),
            },
            (SettingType::Enum(allowed), SettingValue::String(s)) => {
                if allowed.iter().any(|a| a == s) {
                    Ok(())
                } else {
                    Err(format!("one of {}", allowed.join(", ")))
                }
            }
            (SettingType::Version, SettingValue::String(s)) => {
                if is_dotted_version(s) {
                    Ok(())
                } else {
                    Err("a dotted numeric version".to_string())
                }
            }
            (expected, _) => Err(expected.describe()),
        }
    }

    fn describe(&self) -> String {
        match self {
            SettingType::String => "a string".to_string(),
            SettingType::Integer { min: Some(min) } => format!("an integer >= {min}"),
            SettingType::Integer { min: None } => "an integer".to_string(),
            SettingType::Boolean => "a boolean".to_string(),
            SettingType::Enum(allowed) => format!("one of {}", allowed.join(", ")),
            SettingType::Version => "a dotted numeric version".to_string(),
        }
    }
}

/// Accepts `27`, `27.0` and `27.0.12077973`; rejects pre-release tags and
/// anything with more than three components.
fn is_dotted_version(s: &str) -> bool {
    let components = s.split('.').count();
    if components == 0 || components > 3 || s.contains(['-', '+']) {
        return false;
    }
    let padded = match components {
        1 => format!("{s}.0.0"),
        2 => format!("{s}.0"),
        _ => s.to_string(),
    };
    semver::Version::parse(&padded).is_ok()
}

/// `upper` must not be below `lower` when both settings are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRule {
    pub lower: String,
    pub upper: String,
}

impl RangeRule {
    pub fn new(lower: impl Into<String>, upper: impl Into<String>) -> Self {
        Self {
            lower: lower.into(),
            upper: upper.into(),
        }
    }
}

/// Declared types for known keys plus cross-key ordering rules.
///
/// Keys without a declared type are accepted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    types: BTreeMap<String, SettingType>,
    ranges: Vec<RangeRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(mut self, key: impl Into<String>, ty: SettingType) -> Self {
        self.types.insert(key.into(), ty);
        self
    }

    pub fn range(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
        self.ranges.push(RangeRule::new(lower, upper));
        self
    }

    pub fn type_of(&self, key: &str) -> Option<&SettingType> {
        self.types.get(key)
    }

    pub fn ranges(&self) -> &[RangeRule] {
        &self.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_minimum_is_inclusive() {
        let ty = SettingType::Integer { min: Some(21) };
        assert!(ty.check(&SettingValue::Integer(21)).is_ok());
        assert!(ty.check(&SettingValue::Integer(35)).is_ok());
        let err = ty.check(&SettingValue::Integer(19)).unwrap_err();
        assert!(err.contains(">= 21"), "got: {err}");
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let ty = SettingType::Integer { min: None };
        assert_eq!(ty.check(&"35".into()).unwrap_err(), "an integer");
        assert!(SettingType::Boolean.check(&SettingValue::Integer(1)).is_err());
        assert!(SettingType::String.check(&SettingValue::Boolean(true)).is_err());
    }

    #[test]
    fn enum_checks_membership() {
        let ty = SettingType::enumeration(&["1.8", "11", "17", "21"]);
        assert!(ty.check(&"17".into()).is_ok());
        let err = ty.check(&"16".into()).unwrap_err();
        assert_eq!(err, "one of 1.8, 11, 17, 21");
    }

    #[test]
    fn version_accepts_dotted_numbers() {
        let ty = SettingType::Version;
        for ok in ["27", "27.0", "27.0.12077973", "2.0.4"] {
            assert!(ty.check(&ok.into()).is_ok(), "{ok} should be accepted");
        }
        for bad in ["", "latest", "1.2.3.4", "1.0.0-rc1", "1..2"] {
            assert!(ty.check(&bad.into()).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn schema_builder_records_types_and_ranges() {
        let schema = Schema::new()
            .declare("minSdk", SettingType::Integer { min: Some(21) })
            .range("minSdk", "targetSdk");
        assert!(schema.type_of("minSdk").is_some());
        assert!(schema.type_of("namespace").is_none());
        assert_eq!(schema.ranges(), &[RangeRule::new("minSdk", "targetSdk")]);
    }
}
