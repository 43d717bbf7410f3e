//! Terminal renderer: a grouped, human-readable manifest summary.

use colored::Colorize;

use crate::models::{BuildManifest, LayerKind};
use crate::output::{OutputError, OutputRenderer};

/// Terminal output renderer with colored sections.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, manifest: &BuildManifest) -> Result<String, OutputError> {
        let mut output = String::new();

        output.push_str(&format!(
            " {} {}\n\n",
            manifest.project().bold(),
            format!("({})", &manifest.fingerprint()[..12]).dimmed()
        ));

        if !manifest.plugins().is_empty() {
            output.push_str(&format!(" {}\n", "plugins".cyan().bold()));
            for plugin in manifest.plugins() {
                output.push_str(&format!("   {}\n", plugin.id));
            }
            output.push('\n');
        }

        output.push_str(&format!(" {}\n", "settings".cyan().bold()));
        let width = manifest.settings().keys().map(String::len).max().unwrap_or(0);
        for (key, setting) in manifest.settings() {
            let origin = match setting.kind {
                LayerKind::Platform => setting.layer.dimmed().to_string(),
                LayerKind::Project => setting.layer.normal().to_string(),
                LayerKind::Plugin => setting.layer.magenta().to_string(),
            };
            output.push_str(&format!(
                "   {key:<width$}  {}  {}\n",
                setting.value.to_string().bold(),
                origin
            ));
        }

        if !manifest.dependencies().is_empty() {
            output.push_str(&format!("\n {}\n", "dependencies".cyan().bold()));
            for dep in manifest.dependencies() {
                let via = match &dep.constraint_set {
                    Some(set) => format!(" via {set}").dimmed().to_string(),
                    None => String::new(),
                };
                output.push_str(&format!(
                    "   {} {}{}\n",
                    format!("{}:", dep.configuration).dimmed(),
                    dep.notation(),
                    via
                ));
            }
        }

        if !manifest.variants().is_empty() {
            output.push_str(&format!("\n {}\n", "signing".cyan().bold()));
            for (variant, signing) in manifest.variants() {
                let note = if signing.fallback {
                    format!("  {} fallback", "⚠".yellow().bold())
                } else {
                    String::new()
                };
                output.push_str(&format!(
                    "   {} → {}{}\n",
                    variant.bold(),
                    signing.profile.name,
                    note
                ));
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_manifest;

    #[test]
    fn render_lists_every_section() {
        let output = TerminalRenderer.render(&sample_manifest()).unwrap();
        assert!(output.contains("dog_book"));
        assert!(output.contains("com.android.application"));
        assert!(output.contains("minSdk"));
        assert!(output.contains("com.google.firebase:firebase-analytics:22.5.0"));
        assert!(output.contains("firebase-bom"));
        assert!(output.contains("release"));
        assert!(output.contains("fallback"));
    }
}
