//! keel — layered build configuration resolver.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use keel::config;
use keel::constants;
use keel::env;
use keel::output;
use keel::project;
use keel::resolver;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::args::{Cli, Command, ExplainArgs, InputArgs, ResolveArgs};
use config::Config;
use env::Env;
use resolver::ResolveInput;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let work_dir = std::env::current_dir().context("failed to determine working directory")?;
    let mut config =
        Config::load(Some(&work_dir), &Env::real()).context("failed to load configuration")?;

    // CLI flags win over every config layer.
    if cli.no_color {
        config.output.color = Some(false);
    }
    if let Some(filter) = cli.log {
        config.log.filter = filter;
    }

    init_tracing(&config.log.filter);
    if !config.output.color_enabled() {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::Resolve(args) => run_resolve(args, &config),
        Command::Check(args) => run_check(args, &config),
        Command::Explain(args) => run_explain(args, &config),
        Command::Schema => {
            println!("{}", output::manifest_schema()?);
            Ok(())
        }
        Command::Version => run_version(),
    }
}

/// Install the stderr tracing subscriber.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("Warning: ignoring invalid log filter '{filter}': {e}");
        EnvFilter::new(constants::DEFAULT_LOG_FILTER)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Read every input named by the flags or the config.
fn load_input(args: &InputArgs, config: &Config) -> Result<ResolveInput> {
    let project_path = args
        .project
        .clone()
        .unwrap_or_else(|| config.project.file.clone());
    let plugin_values = args
        .plugin_values
        .clone()
        .or_else(|| config.project.plugin_values.clone());
    let constraints: Vec<PathBuf> = config
        .project
        .constraints
        .iter()
        .chain(args.constraints.iter())
        .cloned()
        .collect();

    project::load_input(&project_path, plugin_values.as_deref(), &constraints)
        .context("failed to load project inputs")
}

/// Resolve and print (or write) the manifest.
fn run_resolve(args: ResolveArgs, config: &Config) -> Result<()> {
    let input = load_input(&args.input, config)?;
    let manifest = resolver::resolve(&input).context("resolution failed")?;

    let format = args.format.unwrap_or(config.output.format);
    let rendered = format.renderer().render(&manifest)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "  {} wrote {} manifest to {}",
                "✔".green().bold(),
                format,
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Resolve and report the outcome without printing the manifest.
fn run_check(args: InputArgs, config: &Config) -> Result<()> {
    let input = load_input(&args, config)?;
    let manifest = resolver::resolve(&input).context("resolution failed")?;

    println!(
        "  {} {} resolves: {} settings, {} dependencies, {} variants",
        "✔".green().bold(),
        manifest.project().bold(),
        manifest.settings().len(),
        manifest.dependencies().len(),
        manifest.variants().len(),
    );
    println!("  {} {}", "fingerprint:".dimmed(), manifest.fingerprint());
    Ok(())
}

/// Show every layer that defines a key, lowest precedence first.
fn run_explain(args: ExplainArgs, config: &Config) -> Result<()> {
    let input = load_input(&args.input, config)?;
    let trail = resolver::explain(&input.layers, &args.key);

    let Some(last) = trail.len().checked_sub(1) else {
        bail!("no layer defines '{}'", args.key);
    };

    println!("  {}", args.key.bold());
    for (i, entry) in trail.iter().enumerate() {
        let line = format!("{:<10} {:<36} {}", entry.kind, entry.layer, entry.value);
        if i == last {
            println!("  {} {}", line.bold(), "← effective".green());
        } else {
            println!("  {}", line.dimmed().strikethrough());
        }
    }

    if let Some(ty) = input.schema.type_of(&args.key) {
        if let Err(expected) = ty.check(&trail[last].value) {
            println!("  {} effective value must be {expected}", "✖".red().bold());
        }
    }
    Ok(())
}
