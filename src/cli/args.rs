//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

use keel::output::OutputFormat;

/// Layered build configuration resolver.
#[derive(Parser, Debug)]
#[command(
    name = "keel",
    version = keel::constants::VERSION,
    about = super::ABOUT_STYLED,
)]
pub struct Cli {
    /// Disable coloured output.
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Tracing filter, e.g. `keel=debug` (overrides KEEL_LOG and config).
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Resolve the project and print the build manifest.
    Resolve(ResolveArgs),

    /// Resolve the project and report success or the first error.
    Check(InputArgs),

    /// Show which layers define a setting and which one wins.
    Explain(ExplainArgs),

    /// Print the JSON Schema of the build manifest.
    Schema,

    /// Print version and build information.
    Version,
}

/// Where the project inputs come from.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Project description file (default: keel.toml).
    #[arg(long, short = 'p', value_name = "FILE")]
    pub project: Option<PathBuf>,

    /// Plugin host value file (one table per plugin id).
    #[arg(long, value_name = "FILE")]
    pub plugin_values: Option<PathBuf>,

    /// Extra constraint set file. May be repeated.
    #[arg(long = "constraints", value_name = "FILE")]
    pub constraints: Vec<PathBuf>,
}

/// Arguments for the `resolve` subcommand.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format.
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Write the manifest to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `explain` subcommand.
#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// Setting key, e.g. `minSdk` or `compileOptions.sourceCompatibility`.
    pub key: String,

    #[command(flatten)]
    pub input: InputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_resolve_with_all_inputs() {
        let cli = Cli::parse_from([
            "keel",
            "resolve",
            "--project",
            "android/keel.toml",
            "--plugin-values",
            "build/values.toml",
            "--constraints",
            "a.toml",
            "--constraints",
            "b.toml",
            "--format",
            "json",
        ]);
        let Command::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.input.project, Some(PathBuf::from("android/keel.toml")));
        assert_eq!(args.input.constraints.len(), 2);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.output.is_none());
    }

    #[test]
    fn parse_explain_key() {
        let cli = Cli::parse_from(["keel", "--no-color", "explain", "minSdk"]);
        assert!(cli.no_color);
        let Command::Explain(args) = cli.command else {
            panic!("expected explain");
        };
        assert_eq!(args.key, "minSdk");
        assert!(args.input.project.is_none());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["keel", "resolve", "--format", "yaml"]).is_err());
    }
}
