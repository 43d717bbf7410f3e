//! Signing profile selection per variant.

use std::collections::BTreeMap;

use super::ResolveError;
use crate::models::{SigningPolicy, Variant, VariantSigning, RELEASE_VARIANT};

/// Pick exactly one signing profile for every variant.
///
/// A variant that names a profile gets that profile or an error; the
/// default profile is only used when the policy opts into fallback.
pub fn resolve_signing(
    variants: &[Variant],
    policy: &SigningPolicy,
) -> Result<BTreeMap<String, VariantSigning>, ResolveError> {
    let mut selected: BTreeMap<String, VariantSigning> = BTreeMap::new();

    for variant in variants {
        if selected.contains_key(&variant.name) {
            return Err(ResolveError::DuplicateVariant {
                variant: variant.name.clone(),
            });
        }
        let signing = match &variant.signing {
            Some(name) => {
                let profile = policy.profiles.get(name).ok_or_else(|| {
                    ResolveError::MissingSigningConfig {
                        variant: variant.name.clone(),
                        reason: format!("signing profile '{name}' is not defined"),
                    }
                })?;
                VariantSigning {
                    profile: profile.clone(),
                    fallback: false,
                }
            }
            None => fallback_for(variant, policy)?,
        };

        tracing::debug!(
            variant = %variant.name,
            profile = %signing.profile.name,
            fallback = signing.fallback,
            "selected signing profile"
        );
        selected.insert(variant.name.clone(), signing);
    }

    Ok(selected)
}

fn fallback_for(variant: &Variant, policy: &SigningPolicy) -> Result<VariantSigning, ResolveError> {
    let missing = |reason: String| ResolveError::MissingSigningConfig {
        variant: variant.name.clone(),
        reason,
    };

    if !policy.allow_fallback {
        return Err(missing(
            "no signing profile selected and fallback is disabled".to_string(),
        ));
    }
    let default = policy
        .default_profile
        .as_deref()
        .ok_or_else(|| missing("fallback is enabled but no default profile is set".to_string()))?;
    let profile = policy
        .profiles
        .get(default)
        .ok_or_else(|| missing(format!("default signing profile '{default}' is not defined")))?;

    if variant.name == RELEASE_VARIANT {
        tracing::warn!(
            variant = %variant.name,
            profile = %profile.name,
            "release variant is signed with the fallback profile"
        );
    }

    Ok(VariantSigning {
        profile: profile.clone(),
        fallback: true,
    })
}
