//! Dependency version resolution and conflict detection.

use indexmap::IndexMap;

use super::ResolveError;
use crate::models::{Coordinate, DependencyDeclaration, ResolvedDependency, VersionConstraintSet};

/// Resolve every declaration's version.
///
/// Explicit versions are kept as written. Otherwise the referenced
/// constraint sets are searched in order and the first pin wins. The
/// returned list keeps declaration order with exact duplicates removed.
pub fn resolve_dependencies(
    declarations: &[DependencyDeclaration],
    constraint_refs: &[String],
    constraint_sets: &IndexMap<String, VersionConstraintSet>,
) -> Result<Vec<ResolvedDependency>, ResolveError> {
    let active: Vec<&VersionConstraintSet> = constraint_refs
        .iter()
        .filter_map(|name| {
            let set = constraint_sets.get(name);
            if set.is_none() {
                tracing::warn!(constraint_set = %name, "referenced constraint set is not defined; skipping");
            }
            set
        })
        .collect();

    let mut resolved: Vec<ResolvedDependency> = Vec::with_capacity(declarations.len());
    let mut seen: IndexMap<Coordinate, String> = IndexMap::new();

    for decl in declarations {
        let dep = resolve_one(decl, &active)?;

        if let Some(first) = seen.get(&dep.coordinate) {
            if first != &dep.version {
                return Err(ResolveError::DependencyConflict {
                    coordinate: dep.coordinate.to_string(),
                    first: first.clone(),
                    second: dep.version,
                });
            }
        } else {
            seen.insert(dep.coordinate.clone(), dep.version.clone());
        }

        let duplicate = resolved.iter().any(|r| {
            r.configuration == dep.configuration
                && r.coordinate == dep.coordinate
                && r.version == dep.version
        });
        if duplicate {
            tracing::debug!(dependency = %dep.notation(), "dropping duplicate declaration");
            continue;
        }
        resolved.push(dep);
    }

    Ok(resolved)
}

fn resolve_one(
    decl: &DependencyDeclaration,
    active: &[&VersionConstraintSet],
) -> Result<ResolvedDependency, ResolveError> {
    if let Some(version) = &decl.version {
        return Ok(ResolvedDependency {
            configuration: decl.configuration.clone(),
            coordinate: decl.coordinate.clone(),
            version: version.clone(),
            constraint_set: None,
        });
    }

    active
        .iter()
        .find_map(|set| {
            set.get(&decl.coordinate).map(|version| ResolvedDependency {
                configuration: decl.configuration.clone(),
                coordinate: decl.coordinate.clone(),
                version: version.to_string(),
                constraint_set: Some(set.name.clone()),
            })
        })
        .ok_or_else(|| ResolveError::UnresolvedDependency {
            coordinate: decl.coordinate.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(s: &str) -> Coordinate {
        s.parse().unwrap()
    }

    fn decl(notation: &str) -> DependencyDeclaration {
        DependencyDeclaration::parse("implementation", notation).unwrap()
    }

    fn sets(list: Vec<VersionConstraintSet>) -> IndexMap<String, VersionConstraintSet> {
        list.into_iter().map(|s| (s.name.clone(), s)).collect()
    }

    #[test]
    fn explicit_version_ignores_constraint_sets() {
        let bom = VersionConstraintSet::new("bom").with_pin(coord("org.example:libx"), "2.0");
        let deps = resolve_dependencies(
            &[decl("org.example:libx:1.0")],
            &["bom".to_string()],
            &sets(vec![bom]),
        )
        .unwrap();
        assert_eq!(deps[0].version, "1.0");
        assert_eq!(deps[0].constraint_set, None);
    }

    #[test]
    fn first_referenced_set_wins() {
        let a = VersionConstraintSet::new("a").with_pin(coord("org.example:libx"), "1.1");
        let b = VersionConstraintSet::new("b").with_pin(coord("org.example:libx"), "9.9");
        let deps = resolve_dependencies(
            &[decl("org.example:libx")],
            &["a".to_string(), "b".to_string()],
            &sets(vec![b, a]),
        )
        .unwrap();
        assert_eq!(deps[0].version, "1.1");
        assert_eq!(deps[0].constraint_set.as_deref(), Some("a"));
    }

    #[test]
    fn unreferenced_sets_are_not_consulted() {
        let bom = VersionConstraintSet::new("bom").with_pin(coord("org.example:libx"), "2.0");
        let err = resolve_dependencies(&[decl("org.example:libx")], &[], &sets(vec![bom]))
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnresolvedDependency { ref coordinate } if coordinate == "org.example:libx"));
    }

    #[test]
    fn missing_reference_is_skipped() {
        let bom = VersionConstraintSet::new("bom").with_pin(coord("org.example:libx"), "2.0");
        let deps = resolve_dependencies(
            &[decl("org.example:libx")],
            &["gone".to_string(), "bom".to_string()],
            &sets(vec![bom]),
        )
        .unwrap();
        assert_eq!(deps[0].version, "2.0");
    }

    #[test]
    fn differing_versions_conflict() {
        let err = resolve_dependencies(
            &[decl("org.example:libx:1.0"), decl("org.example:libx:2.0")],
            &[],
            &IndexMap::new(),
        )
        .unwrap_err();
        match err {
            ResolveError::DependencyConflict { coordinate, first, second } => {
                assert_eq!(coordinate, "org.example:libx");
                assert_eq!(first, "1.0");
                assert_eq!(second, "2.0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn conflict_spans_configurations() {
        let desugar = DependencyDeclaration::parse("coreLibraryDesugaring", "org.example:libx:1.0").unwrap();
        let err = resolve_dependencies(&[desugar, decl("org.example:libx:2.0")], &[], &IndexMap::new())
            .unwrap_err();
        assert!(matches!(err, ResolveError::DependencyConflict { .. }));
    }

    #[test]
    fn identical_duplicates_are_collapsed() {
        let bom = VersionConstraintSet::new("bom").with_pin(coord("org.example:libx"), "1.0");
        let deps = resolve_dependencies(
            &[decl("org.example:libx:1.0"), decl("org.example:liby:3.0"), decl("org.example:libx")],
            &["bom".to_string()],
            &sets(vec![bom]),
        )
        .unwrap();
        let notations: Vec<_> = deps.iter().map(|d| d.notation()).collect();
        assert_eq!(notations, vec!["org.example:libx:1.0", "org.example:liby:3.0"]);
    }
}
