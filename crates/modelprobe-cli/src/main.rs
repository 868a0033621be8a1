//! ModelProbe CLI - probe every provider x model pair and rank what works.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use modelprobe_client::HttpProbeClient;
use modelprobe_core::{build_matrix, ProviderHandle};
use modelprobe_runner::{run_batch, PoolConfig, ProbeExecutor, ProbeSettings, WorkerPool};

mod registry;
mod render;
mod report;

use render::ConsoleProgress;

/// ModelProbe - find the provider/model combinations that answer
#[derive(Parser)]
#[command(name = "modelprobe")]
#[command(about = "Probe chat providers x models with bounded concurrency", long_about = None)]
struct Cli {
    /// Maximum probes in flight
    #[arg(short, long, default_value_t = 5)]
    concurrency: usize,

    /// Per-probe timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Whole-batch deadline in seconds
    #[arg(long, default_value_t = 300)]
    deadline: u64,

    /// Model to probe (repeatable; defaults to the built-in list)
    #[arg(short, long = "model")]
    models: Vec<String>,

    /// Model used by the default probe
    #[arg(long)]
    default_model: Option<String>,

    /// Prompt sent to every provider
    #[arg(short, long)]
    prompt: Option<String>,

    /// Also skip providers whose name contains this substring (repeatable, case-sensitive)
    #[arg(short = 'x', long = "exclude")]
    exclusions: Vec<String>,

    /// Drop the built-in exclusion list; only --exclude values apply
    #[arg(long)]
    no_default_exclusions: bool,

    /// JSON file listing providers; replaces the built-in registry
    #[arg(long)]
    providers: Option<PathBuf>,

    /// Endpoint used by the default probe
    #[arg(long, default_value = "http://localhost:11434/v1")]
    default_endpoint: String,

    /// Environment variable holding the default endpoint's API key
    #[arg(long)]
    default_api_key_env: Option<String>,

    /// Where to write the JSON report
    #[arg(short, long, default_value = "probe_results.json")]
    output: PathBuf,

    /// Print the providers that would be probed and exit
    #[arg(long)]
    list_providers: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> ProbeSettings {
        let mut settings = ProbeSettings::default();
        if !self.models.is_empty() {
            settings.models = self.models.clone();
        }
        if let Some(model) = &self.default_model {
            settings.default_model = model.clone();
        }
        if let Some(prompt) = &self.prompt {
            settings.prompt = prompt.clone();
        }
        if self.no_default_exclusions {
            settings.exclusions.clear();
        }
        settings.exclusions.extend(self.exclusions.iter().cloned());
        settings
    }

    fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            concurrency: self.concurrency,
            per_task_timeout: Duration::from_secs(self.timeout),
            batch_deadline: Duration::from_secs(self.deadline),
            ..PoolConfig::default()
        }
    }

    fn default_handle(&self) -> ProviderHandle {
        let handle = ProviderHandle::new(&self.default_endpoint);
        match &self.default_api_key_env {
            Some(var) => handle.with_api_key_env(var),
            None => handle,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; console output goes to stdout, logs to stderr
    let level = if cli.verbose {
        "warn,modelprobe=debug,modelprobe_core=debug,modelprobe_client=debug,modelprobe_runner=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let registry = match &cli.providers {
        Some(path) => registry::load(path)?,
        None => registry::builtin(),
    };
    let settings = cli.settings();
    let providers = registry.filtered(settings.exclusions.as_slice());

    if cli.list_providers {
        println!("Providers ({} of {}):", providers.len(), registry.len());
        println!("{:<16}  {:<40}  {}", "NAME", "BASE URL", "KEY ENV");
        println!("{}", "-".repeat(80));
        for entry in &providers {
            println!(
                "{:<16}  {:<40}  {}",
                entry.name,
                entry.handle.base_url,
                entry.handle.api_key_env.as_deref().unwrap_or("-")
            );
        }
        return Ok(());
    }

    let matrix = build_matrix(&providers, settings.models.as_slice(), &settings.default_model)?;

    println!("🔍 ModelProbe provider & model tester");
    println!("{}", "=".repeat(50));
    println!("📋 Providers to probe: {}", providers.len());
    println!("🎯 Models: {}", settings.models.join(", "));
    println!("🚀 Probes: {}", matrix.len());
    println!();

    info!(
        providers = providers.len(),
        models = settings.models.len(),
        excluded = registry.len() - providers.len(),
        "Registry resolved"
    );

    let client = HttpProbeClient::new().with_default_provider(cli.default_handle());
    let executor = ProbeExecutor::new(Arc::new(client), settings.prompt.clone())
        .with_temperature(settings.temperature);
    let pool = WorkerPool::new(executor, cli.pool_config())?;

    let report = run_batch(&pool, matrix, &ConsoleProgress).await;

    println!();
    print!("{}", render::format_summary(&report));

    report::write_report(&report, &cli.output)?;
    println!();
    println!("💾 Full results saved to {}", cli.output.display());

    Ok(())
}
