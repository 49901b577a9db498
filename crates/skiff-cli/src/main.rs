//! Skiff CLI - declarative deployments for Cloudflare Pages and Workers
//!
//! This CLI reconciles a JSON project description against the platform:
//! - Ensure the Pages project exists and is wired to its GitHub repository
//! - Publish the companion Worker under a branch-scoped identity
//! - Record resulting URLs for downstream pipeline steps

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod output;

use config::DeployConfig;
use error::{CliError, CliResult};
use skiff_api::CloudflareClient;
use skiff_deploy::{ArtifactPublisher, DeployError, FileOutputs, OutputSink, ProjectReconciler};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Skiff CLI application
#[derive(Parser)]
#[command(name = "skiff")]
#[command(about = "Declarative deployments for Cloudflare Pages and Workers", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Reconcile the Pages project and publish the Worker
    Deploy(DeployArgs),

    /// Check the configuration file without touching the platform
    Validate(ValidateArgs),
}

#[derive(Args)]
struct DeployArgs {
    /// Configuration file path
    #[arg(short, long, env = "SKIFF_CONFIG", default_value = "skiff.json")]
    config: PathBuf,

    /// Cloudflare API token
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Cloudflare account id
    #[arg(long, env = "CLOUDFLARE_ACCOUNT_ID")]
    account_id: String,

    /// Branch being deployed (falls back to GITHUB_REF_NAME)
    #[arg(short, long, env = "SKIFF_BRANCH")]
    branch: Option<String>,

    /// File that receives key=value outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,

    /// Worker secret as NAME=VALUE, or NAME to read the value from the
    /// environment; repeatable
    #[arg(short, long = "secret", value_name = "NAME[=VALUE]", value_parser = config::parse_secret)]
    secrets: Vec<(String, String)>,
}

#[derive(Args)]
struct ValidateArgs {
    /// Configuration file path
    #[arg(short, long, env = "SKIFF_CONFIG", default_value = "skiff.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let result = match cli.command {
        Commands::Deploy(args) => run_deploy(args).await,
        Commands::Validate(args) => run_validate(args),
    };

    if let Err(error) = result {
        match &error {
            CliError::Deploy(DeployError::RecreateRequired { name, source_kind }) => {
                print_recreate_guidance(name, source_kind);
            }
            _ => output::print_error(&error.to_string()),
        }
        std::process::exit(1);
    }
}

async fn run_deploy(args: DeployArgs) -> CliResult<()> {
    let config = DeployConfig::load(&args.config)?;
    let secrets: BTreeMap<String, String> = args.secrets.into_iter().collect();
    config.check_binding_names(&secrets)?;

    let branch = args
        .branch
        .or_else(|| std::env::var("GITHUB_REF_NAME").ok())
        .filter(|branch| !branch.is_empty())
        .ok_or_else(|| {
            CliError::Config("no branch given; pass --branch or set GITHUB_REF_NAME".to_string())
        })?;

    let client = CloudflareClient::new(&args.account_id, &args.api_token)?;
    let mut outputs = args.output_file.map(|path| FileOutputs::new(path));

    let project = ProjectReconciler::new(&client).reconcile(&config.pages).await?;
    output::print_success(&format!(
        "Pages project '{}' {}: {}",
        config.pages.name,
        project.action.as_str(),
        project.url
    ));
    if let Some(sink) = outputs.as_mut() {
        sink.record("pages-url", &project.url);
    }

    let published = ArtifactPublisher::new(&client, ".")
        .publish(
            config.worker.as_ref(),
            &config.pages.name,
            &branch,
            &config.pages.production_branch,
            &secrets,
        )
        .await?;

    match published {
        Some(worker) => {
            output::print_success(&format!("Worker '{}' published: {}", worker.name, worker.url));
            if let Some(sink) = outputs.as_mut() {
                sink.record("worker-url", &worker.url);
                sink.record("worker-name", &worker.name);
            }
        }
        None => output::print_info("No worker published for this run"),
    }

    Ok(())
}

fn run_validate(args: ValidateArgs) -> CliResult<()> {
    let config = DeployConfig::load(&args.config)?;
    config.check_binding_names(&BTreeMap::new())?;

    output::print_success(&format!("{} is valid", args.config.display()));
    println!(
        "  Project: {} ({}/{})",
        config.pages.name, config.pages.repo_owner, config.pages.repo_name
    );
    println!("  Production branch: {}", config.pages.production_branch);
    if let Some(command) = &config.pages.build.command {
        println!("  Build command: {command}");
    }
    match &config.worker {
        Some(worker) => {
            let name = worker.name.as_deref().unwrap_or(&config.pages.name);
            println!("  Worker: {} ({})", name, worker.script);
        }
        None => println!("  Worker: none"),
    }

    Ok(())
}

/// The project cannot be converged without deleting it; explain the two
/// ways forward instead of guessing for the operator.
fn print_recreate_guidance(name: &str, source_kind: &str) {
    output::print_error(&format!(
        "Pages project '{name}' already exists, but its source type is '{source_kind}', not a GitHub integration."
    ));
    eprintln!();
    eprintln!("A project's source cannot be changed in place. Two ways to proceed:");
    eprintln!("  1. Set \"allow_recreate\": true in the configuration to delete the");
    eprintln!("     project and recreate it with a GitHub source. This permanently");
    eprintln!("     discards its deployment history.");
    eprintln!("  2. Pick a different \"name\" so a fresh project is created next to");
    eprintln!("     the existing one.");
}
