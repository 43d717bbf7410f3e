//! JSON output renderer.
//!
//! Outputs `{"fingerprint": "...", "manifest": {...}}`.

use crate::models::BuildManifest;
use crate::output::{OutputError, OutputRenderer};

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, manifest: &BuildManifest) -> Result<String, OutputError> {
        let output = serde_json::json!({
            "fingerprint": manifest.fingerprint(),
            "manifest": manifest,
        });

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_manifest;

    #[test]
    fn render_json() {
        let manifest = sample_manifest();
        let output = JsonRenderer.render(&manifest).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["fingerprint"], manifest.fingerprint());
        assert_eq!(parsed["manifest"]["project"], "dog_book");
        assert_eq!(parsed["manifest"]["settings"]["minSdk"]["value"], 23);
        assert_eq!(parsed["manifest"]["settings"]["minSdk"]["kind"], "project");
        assert_eq!(
            parsed["manifest"]["dependencies"][0]["coordinate"],
            "com.google.firebase:firebase-analytics"
        );
        assert_eq!(parsed["manifest"]["variants"]["release"]["fallback"], true);
    }
}
