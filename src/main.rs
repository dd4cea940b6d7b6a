//! Domain-Sweep main entry point
//!
//! This is the command-line interface for the Domain-Sweep TLD variant scanner.

use anyhow::{Context, Result};
use clap::Parser;
use domain_sweep::config::{load_config_with_hash, validate, Config};
use domain_sweep::domain::{build_candidates, validate_base};
use domain_sweep::fetch::{HttpTransport, Transport};
use domain_sweep::output::{
    print_statistics, ArtifactFormat, FileReportRenderer, ReportFormat, ReportRenderer,
};
use domain_sweep::pipeline::{Pipeline, PipelineConfig, TracingSink};
use domain_sweep::prober::probe;
use domain_sweep::tld::{CachedTldSource, RemoteTldSource, StaticTldSource, TldCache, TldSource};
use domain_sweep::HtmlExtractor;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Domain-Sweep: a TLD variant scanner
///
/// Domain-Sweep probes every top-level-domain variant of a base name,
/// fetches the root page of each live site, extracts its salient content
/// and writes per-domain artifacts plus a run report.
#[derive(Parser, Debug)]
#[command(name = "domain-sweep")]
#[command(version = "1.0.0")]
#[command(about = "A TLD variant scanner", long_about = None)]
struct Cli {
    /// Base domain name without suffix (e.g. "nrk")
    #[arg(value_name = "BASE")]
    base: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Comma-separated suffixes to probe instead of the public TLD list
    #[arg(long, value_name = "LIST")]
    tlds: Option<String>,

    /// Candidates probed at the same time
    #[arg(long, value_name = "N")]
    probe_concurrency: Option<u32>,

    /// Timeout of a single probe (milliseconds)
    #[arg(long, value_name = "MS")]
    probe_timeout_ms: Option<u64>,

    /// Domains fetched at the same time
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Cool-down after every fetch attempt (milliseconds)
    #[arg(long, value_name = "MS")]
    rate_limit_ms: Option<u64>,

    /// Maximum attempts per domain
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Artifacts to write: txt, json, html
    #[arg(long, value_delimiter = ',', value_name = "FORMATS")]
    formats: Option<Vec<ArtifactFormat>>,

    /// Tags to collect text from (default h1-h6 and p)
    #[arg(long, value_delimiter = ',', value_name = "TAGS")]
    tags: Option<Vec<String>>,

    /// Report files to write: txt, csv, json, html
    #[arg(long, value_delimiter = ',', value_name = "FORMATS")]
    report_formats: Option<Vec<ReportFormat>>,

    /// Root output directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Show the resolved configuration and candidates without any network access
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Command-line flags win over the configuration file
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(n) = self.probe_concurrency {
            config.prober.concurrency = n;
        }
        if let Some(ms) = self.probe_timeout_ms {
            config.prober.timeout_ms = ms;
        }
        if let Some(n) = self.concurrency {
            config.pipeline.concurrency = n;
        }
        if let Some(ms) = self.rate_limit_ms {
            config.pipeline.rate_limit_ms = ms;
        }
        if let Some(n) = self.retries {
            config.pipeline.retries = n;
        }
        if let Some(formats) = &self.formats {
            config.pipeline.formats = formats.clone();
        }
        if let Some(tags) = &self.tags {
            config.pipeline.tags = Some(tags.clone());
        }
        if let Some(formats) = &self.report_formats {
            config.output.report_formats = formats.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    let base = validate_base(&cli.base)?.to_string();

    if cli.dry_run {
        handle_dry_run(&config, &base, cli.tlds.as_deref());
        return Ok(());
    }

    handle_sweep(config, &base, cli.tlds.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("domain_sweep=info,warn"),
            1 => EnvFilter::new("domain_sweep=debug,info"),
            2 => EnvFilter::new("domain_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Picks the TLD source: the `--tlds` list, else the remote list (cached if configured)
fn tld_source(
    config: &Config,
    tlds: Option<&str>,
    transport: Arc<dyn Transport>,
) -> Result<Box<dyn TldSource>> {
    if let Some(list) = tlds {
        return Ok(Box::new(StaticTldSource::from_csv_arg(list)));
    }

    let remote = RemoteTldSource::new(
        transport,
        config.tld_source.url.clone(),
        Duration::from_millis(config.pipeline.request_timeout_ms),
    );

    let source: Box<dyn TldSource> = match &config.tld_source.cache_path {
        Some(path) => Box::new(CachedTldSource::new(
            remote,
            path,
            config.tld_source.max_age()?,
        )),
        None => Box::new(remote),
    };

    Ok(source)
}

/// Handles the --dry-run mode: shows the resolved configuration and candidates
fn handle_dry_run(config: &Config, base: &str, tlds: Option<&str>) {
    println!("=== Domain-Sweep Dry Run ===\n");

    println!("Prober:");
    println!("  Concurrency: {}", config.prober.concurrency);
    println!("  Timeout: {}ms", config.prober.timeout_ms);

    println!("\nPipeline:");
    println!("  Concurrency: {}", config.pipeline.concurrency);
    println!("  Rate limit: {}ms", config.pipeline.rate_limit_ms);
    println!("  Retries: {}", config.pipeline.retries);
    println!("  Retry backoff: {}ms", config.pipeline.retry_backoff_ms);
    println!("  Request timeout: {}ms", config.pipeline.request_timeout_ms);
    println!("  Formats: {}", join(&config.pipeline.formats));
    match &config.pipeline.tags {
        Some(tags) => println!("  Tags: {}", tags.join(", ")),
        None => println!("  Tags: default (h1-h6, p)"),
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!(
        "  Directory: {}",
        Path::new(&config.output.directory).join(base).display()
    );
    println!("  Reports: {}", join(&config.output.report_formats));

    let suffixes: Vec<String> = match tlds {
        Some(list) => {
            println!("\nTLD source: command line");
            list.split(',').map(str::to_string).collect()
        }
        None => {
            println!("\nTLD source: {}", config.tld_source.url);
            cached_tlds(config)
        }
    };

    let candidates = build_candidates(base, &suffixes);
    if candidates.is_empty() {
        println!("\nNo candidates known without downloading the TLD list");
        return;
    }

    println!("\nCandidates ({}):", candidates.len());
    for candidate in &candidates {
        println!("  - {}", candidate.url);
    }
}

/// TLDs from the cache file, if one is configured and readable
fn cached_tlds(config: &Config) -> Vec<String> {
    let Some(path) = &config.tld_source.cache_path else {
        return Vec::new();
    };

    match TldCache::load(Path::new(path)) {
        Ok(Some(cache)) => {
            println!(
                "  Cache: {} ({} entries, {} minutes old)",
                path,
                cache.tlds.len(),
                cache.age().num_minutes()
            );
            cache.tlds
        }
        Ok(None) => {
            println!("  Cache: {} (empty)", path);
            Vec::new()
        }
        Err(e) => {
            println!("  Cache: {} (unreadable: {})", path, e);
            Vec::new()
        }
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Handles a full scan: probe, pipeline, report
async fn handle_sweep(config: Config, base: &str, tlds: Option<&str>) -> Result<()> {
    let transport: Arc<dyn Transport> = Arc::new(
        HttpTransport::from_config(&config.user_agent).context("Failed to build HTTP client")?,
    );

    let suffixes = tld_source(&config, tlds, Arc::clone(&transport))?
        .list_tlds()
        .await;
    if suffixes.is_empty() {
        tracing::warn!("TLD list is empty, nothing to probe");
    } else {
        tracing::info!("Probing {} suffixes for '{}'", suffixes.len(), base);
    }

    let reachable = probe(
        Arc::clone(&transport),
        base,
        &suffixes,
        Duration::from_millis(config.prober.timeout_ms),
        config.prober.concurrency as usize,
    )
    .await?;

    let mut domains: Vec<_> = reachable.into_iter().collect();
    domains.sort_by(|a, b| a.suffix.cmp(&b.suffix));

    let pipeline = Pipeline::new(transport, Arc::new(HtmlExtractor::new()))
        .with_sink(Arc::new(TracingSink));
    let pipeline_config = PipelineConfig::from_settings(&config.pipeline, &config.output.directory);
    let stats = pipeline.run(base, domains, pipeline_config).await?;

    let renderer = FileReportRenderer::new(&config.output.directory);
    let formats: BTreeSet<ReportFormat> = config.output.report_formats.iter().copied().collect();
    let written = renderer
        .render(base, &stats, &formats)
        .context("Failed to write report")?;
    for (format, path) in &written {
        tracing::info!("Wrote {} report to {}", format, path.display());
    }

    println!();
    print_statistics(base, &stats);

    Ok(())
}
