//! TOML output renderer.

use crate::models::BuildManifest;
use crate::output::{OutputError, OutputRenderer};

/// TOML output renderer. The fingerprint goes in a leading comment so the
/// body stays a plain manifest.
pub struct TomlRenderer;

impl OutputRenderer for TomlRenderer {
    fn render(&self, manifest: &BuildManifest) -> Result<String, OutputError> {
        let body = toml::to_string_pretty(manifest)?;
        Ok(format!("# fingerprint: {}\n\n{body}", manifest.fingerprint()))
    }
}
