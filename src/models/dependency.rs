//! Dependency declarations and version constraint sets.

use regex::Regex;
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static SEGMENT_RE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap());

static VERSION_RE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.+\-]+$").unwrap());

/// A malformed `group:artifact[:version]` notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid dependency coordinate '{input}': {reason}")]
pub struct CoordinateError {
    pub input: String,
    pub reason: String,
}

impl CoordinateError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Library identity without a version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_notation(s)? {
            (coordinate, None) => Ok(coordinate),
            (_, Some(_)) => Err(CoordinateError::new(s, "unexpected version component")),
        }
    }
}

impl Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse `group:artifact` or `group:artifact:version`.
pub fn parse_notation(s: &str) -> Result<(Coordinate, Option<String>), CoordinateError> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    let (group, artifact, version) = match parts.as_slice() {
        [g, a] => (*g, *a, None),
        [g, a, v] => (*g, *a, Some(*v)),
        _ => return Err(CoordinateError::new(s, "expected group:artifact[:version]")),
    };

    for (label, segment) in [("group", group), ("artifact", artifact)] {
        if !SEGMENT_RE.is_match(segment) {
            return Err(CoordinateError::new(s, format!("{label} '{segment}' is not valid")));
        }
    }
    if let Some(v) = version {
        validate_version(s, v)?;
    }

    Ok((Coordinate::new(group, artifact), version.map(str::to_string)))
}

/// Check a version string; `input` is the notation reported on failure.
pub fn validate_version(input: &str, version: &str) -> Result<(), CoordinateError> {
    if VERSION_RE.is_match(version) {
        Ok(())
    } else {
        Err(CoordinateError::new(input, format!("version '{version}' is not valid")))
    }
}

/// One entry of the project's dependency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    /// Dependency configuration, e.g. `implementation`.
    pub configuration: String,
    pub coordinate: Coordinate,
    /// Explicit version; `None` means "look it up in a constraint set".
    pub version: Option<String>,
}

impl DependencyDeclaration {
    pub fn new(
        configuration: impl Into<String>,
        coordinate: Coordinate,
        version: Option<String>,
    ) -> Self {
        Self {
            configuration: configuration.into(),
            coordinate,
            version,
        }
    }

    /// Parse from Gradle-style notation, e.g. `androidx.multidex:multidex:2.0.1`.
    pub fn parse(configuration: impl Into<String>, notation: &str) -> Result<Self, CoordinateError> {
        let (coordinate, version) = parse_notation(notation)?;
        Ok(Self::new(configuration, coordinate, version))
    }
}

/// A named table of pinned versions (a bill of materials).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionConstraintSet {
    pub name: String,
    versions: BTreeMap<Coordinate, String>,
}

impl VersionConstraintSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            versions: BTreeMap::new(),
        }
    }

    /// Pin a coordinate, replacing any earlier pin.
    pub fn pin(&mut self, coordinate: Coordinate, version: impl Into<String>) {
        self.versions.insert(coordinate, version.into());
    }

    /// Parse a `group:artifact` key and validate its version before pinning.
    pub fn try_pin(&mut self, coordinate: &str, version: &str) -> Result<(), CoordinateError> {
        let parsed: Coordinate = coordinate.parse()?;
        validate_version(&format!("{coordinate}:{version}"), version)?;
        self.pin(parsed, version);
        Ok(())
    }

    pub fn with_pin(mut self, coordinate: Coordinate, version: impl Into<String>) -> Self {
        self.pin(coordinate, version);
        self
    }

    pub fn get(&self, coordinate: &Coordinate) -> Option<&str> {
        self.versions.get(coordinate).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// A dependency with its final version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ResolvedDependency {
    pub configuration: String,
    #[schemars(with = "String")]
    pub coordinate: Coordinate,
    pub version: String,
    /// Constraint set that supplied the version; absent for explicit versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_set: Option<String>,
}

impl ResolvedDependency {
    /// `group:artifact:version` notation.
    pub fn notation(&self) -> String {
        format!("{}:{}", self.coordinate, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_notation_with_version() {
        let dep = DependencyDeclaration::parse(
            "coreLibraryDesugaring",
            "com.android.tools:desugar_jdk_libs:2.0.4",
        )
        .unwrap();
        assert_eq!(dep.coordinate, Coordinate::new("com.android.tools", "desugar_jdk_libs"));
        assert_eq!(dep.version.as_deref(), Some("2.0.4"));
        assert_eq!(dep.configuration, "coreLibraryDesugaring");
    }

    #[test]
    fn parse_notation_without_version() {
        let dep =
            DependencyDeclaration::parse("implementation", "com.google.firebase:firebase-analytics")
                .unwrap();
        assert!(dep.version.is_none());
        assert_eq!(dep.coordinate.to_string(), "com.google.firebase:firebase-analytics");
    }

    #[test]
    fn parse_notation_rejects_malformed_input() {
        assert!(parse_notation("just-a-name").is_err());
        assert!(parse_notation("a:b:c:d").is_err());
        assert!(parse_notation("com.example:bad artifact").is_err());
        let err = parse_notation(":artifact").unwrap_err();
        assert!(err.to_string().contains("group"), "got: {err}");
    }

    #[test]
    fn coordinate_from_str_rejects_version() {
        assert!("androidx.multidex:multidex".parse::<Coordinate>().is_ok());
        assert!("androidx.multidex:multidex:2.0.1".parse::<Coordinate>().is_err());
    }

    #[test]
    fn empty_or_spaced_versions_are_rejected() {
        assert!(validate_version("a.b:c:2.0.1", "2.0.1").is_ok());
        assert!(validate_version("a.b:c:33.16.0-rc1", "33.16.0-rc1").is_ok());
        assert!(validate_version("a.b:c:", "").is_err());
        let err = validate_version("a.b:c", "not a version!!").unwrap_err();
        assert!(err.to_string().contains("not a version!!"), "got: {err}");
        assert!(parse_notation("androidx.multidex:multidex:").is_err());
    }

    #[test]
    fn try_pin_validates_both_halves() {
        let mut set = VersionConstraintSet::new("pins");
        set.try_pin("androidx.multidex:multidex", "2.0.1").unwrap();
        assert_eq!(set.get(&Coordinate::new("androidx.multidex", "multidex")), Some("2.0.1"));
        assert!(set.try_pin("a.b:c", "not a version!!").is_err());
        assert!(set.try_pin("a.b:c:1.0", "1.0").is_err());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn constraint_set_lookup() {
        let analytics = Coordinate::new("com.google.firebase", "firebase-analytics");
        let set = VersionConstraintSet::new("firebase-bom").with_pin(analytics.clone(), "22.5.0");
        assert_eq!(set.get(&analytics), Some("22.5.0"));
        assert_eq!(set.get(&Coordinate::new("com.google.firebase", "firebase-auth")), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn resolved_dependency_serializes_coordinate_as_string() {
        let dep = ResolvedDependency {
            configuration: "implementation".into(),
            coordinate: Coordinate::new("androidx.multidex", "multidex"),
            version: "2.0.1".into(),
            constraint_set: None,
        };
        let json = serde_json::to_value(&dep).unwrap();
        assert_eq!(json["coordinate"], "androidx.multidex:multidex");
        assert!(json.get("constraint_set").is_none());
        assert_eq!(dep.notation(), "androidx.multidex:multidex:2.0.1");
    }
}
