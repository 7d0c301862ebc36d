mod cli;

use imgforged::config;
use imgforged::images::ImageTransformer;
use imgforged::processor::{Decision, JobOutcome, Processor, StepOutcome};
use imgforged::rules::{Rule, RuleStore};
use imgforged::service::Service;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load the config and build the validated rule store from it.
fn load_rules(config_path: Option<&Path>) -> Result<(PathBuf, RuleStore)> {
    let (path, config) = config::find_and_load_config(config_path)?;
    let rules = RuleStore::from_config(&config)
        .with_context(|| format!("Invalid configuration in {:?}", path))?;
    Ok((path, rules))
}

async fn start_service(config_path: Option<&Path>) -> Result<()> {
    let (path, rules) = load_rules(config_path)?;

    tracing::info!("Starting imgforged");
    tracing::info!("Loaded {} folders from {:?}", rules.len(), path);

    let running = Service::new(rules, Arc::new(ImageTransformer::default()))
        .start()
        .await?;

    running.run_until_signal().await;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "imgforged=debug,imgforged_common=debug".to_string()
        } else {
            "imgforged=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_service(cli.config.as_deref()))
        }
        Commands::Run { input, dry_run } => run_file(&input, cli.config.as_deref(), dry_run),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("imgforged {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_file(input: &Path, config_path: Option<&Path>, dry_run: bool) -> Result<()> {
    let (path, rules) = load_rules(config_path)?;
    if rules.is_empty() {
        anyhow::bail!("No folders configured in {:?}", path);
    }

    // Rule roots are canonical, so the input has to be too
    let input = input
        .canonicalize()
        .with_context(|| format!("Input file does not exist: {:?}", input))?;

    let processor = Processor::new(Arc::new(rules), Arc::new(ImageTransformer::default()));

    if dry_run {
        match processor.decide(&input) {
            Decision::Skip(outcome) => println!("Nothing to do: {}", describe_skip(&outcome)),
            Decision::Process {
                rule,
                thumbnail_path,
            } => {
                println!("File: {}", input.display());
                println!("Rule: {}", rule.root.display());
                print_plan(rule, &input, &thumbnail_path);
                println!("\n[DRY RUN] No files were written");
            }
        }
        return Ok(());
    }

    match processor.process(&input) {
        JobOutcome::Processed { resized, thumbnail } => {
            println!("File: {}", input.display());
            print_step("Resize", &resized);
            print_step("Thumbnail", &thumbnail);

            if resized.is_failed() || thumbnail.is_failed() {
                anyhow::bail!("Processing failed for {:?}", input);
            }
        }
        outcome => println!("Nothing to do: {}", describe_skip(&outcome)),
    }

    Ok(())
}

fn print_plan(rule: &Rule, input: &Path, thumbnail_path: &Path) {
    match rule.resize {
        Some(target) => println!("  Resize {} in place to {}", input.display(), target),
        None => println!("  Resize: not configured"),
    }
    match rule.thumbnail {
        Some(target) => println!("  Write {} at {}", thumbnail_path.display(), target),
        None => println!("  Thumbnail: not configured"),
    }
}

fn print_step(name: &str, step: &StepOutcome) {
    match step {
        StepOutcome::Skipped => println!("  {}: not configured", name),
        StepOutcome::Written(path) => println!("  {}: wrote {}", name, path.display()),
        StepOutcome::Failed(e) => println!("  {}: failed ({})", name, e),
    }
}

fn describe_skip(outcome: &JobOutcome) -> &'static str {
    match outcome {
        JobOutcome::DerivedArtifact => "file is a generated thumbnail",
        JobOutcome::Ineligible => "file is not a supported image",
        JobOutcome::NoRule => "file is not under any configured folder",
        JobOutcome::AlreadyProcessed => "thumbnail already exists",
        JobOutcome::Processed { .. } => "already processed",
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let path = config::resolve_config_path(path)?;
    println!("Validating config: {:?}", path);

    let (_, rules) = load_rules(Some(&path))?;
    println!("✓ Configuration is valid");
    println!("  Folders: {}", rules.len());

    for rule in rules.rules() {
        let resize = rule
            .resize
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let thumb = rule
            .thumbnail
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("    {} (size: {}, thumb: {})", rule.root.display(), resize, thumb);
    }

    Ok(())
}
