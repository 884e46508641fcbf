use analytics::{CarryAnalysis, CarryPipeline, PipelineSettings};
use anyhow::Context;
use api_client::{MarketDataClient, fetch_snapshot};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use configuration::{AnalysisConfig, load_config, settings::Config};
use core_types::{MarketSnapshot, MissingValuePolicy};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

mod telemetry;

/// The main entry point for the yen carry trade analyzer.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The keys may come from the real environment or config.toml instead.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli.command.common().config)
        .with_context(|| format!("Failed to load {}", cli.command.common().config.display()))?;
    let _log_guard = telemetry::init_tracing(config.output.log_directory.as_deref())
        .context("Failed to initialize logging")?;
    tracing::debug!(?config, "Configuration loaded.");

    match cli.command {
        Commands::Fetch(args) => handle_fetch(args, config).await,
        Commands::Analyze(args) => handle_analyze(args, config),
        Commands::Run(args) => handle_run(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Measures the historical performance of the yen-funded USD and EUR carry trades.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the five input series and store them as a snapshot file.
    Fetch(FetchArgs),
    /// Analyze a stored snapshot without touching the network.
    Analyze(AnalyzeArgs),
    /// Fetch and analyze in one step.
    Run(RunArgs),
}

impl Commands {
    fn common(&self) -> &CommonArgs {
        match self {
            Commands::Fetch(args) => &args.common,
            Commands::Analyze(args) => &args.common,
            Commands::Run(args) => &args.common,
        }
    }
}

#[derive(Args)]
struct CommonArgs {
    /// Path to the TOML configuration file. A missing file falls back to defaults.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// First date to keep (format: YYYY-MM-DD). Overrides `analysis.start_date`.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last date to keep (format: YYYY-MM-DD). Overrides `analysis.end_date`.
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Args)]
struct AnalysisArgs {
    /// Directory for the charts. Overrides `output.directory`.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// What to do with undefined values on shared dates.
    #[arg(long, value_enum)]
    missing_values: Option<MissingValuePolicy>,

    /// Also write the full aligned table as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Args)]
struct FetchArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Where to write the snapshot.
    #[arg(long, default_value = "snapshot.json")]
    output: PathBuf,
}

#[derive(Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    analysis: AnalysisArgs,

    /// The snapshot produced by `fetch`.
    #[arg(long, default_value = "snapshot.json")]
    input: PathBuf,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    analysis: AnalysisArgs,

    /// Also keep the fetched snapshot at this path.
    #[arg(long)]
    save_snapshot: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_fetch(args: FetchArgs, config: Config) -> anyhow::Result<()> {
    let snapshot = fetch_with_progress(&config).await?;
    let snapshot = snapshot.between(args.common.from, args.common.to);
    write_snapshot(&args.output, &snapshot)?;

    for series in snapshot.series() {
        println!(
            "{:<10} {:>6} observations  {} .. {}",
            series.name(),
            series.len(),
            display_date(series.first_date()),
            display_date(series.last_date()),
        );
    }
    println!("Snapshot written to {}", args.output.display());
    Ok(())
}

fn handle_analyze(args: AnalyzeArgs, config: Config) -> anyhow::Result<()> {
    let snapshot = read_snapshot(&args.input)?;
    tracing::info!(
        path = %args.input.display(),
        fetched_at = %snapshot.fetched_at,
        "Loaded snapshot."
    );
    analyze(&snapshot, &args.common, &args.analysis, &config)
}

async fn handle_run(args: RunArgs, config: Config) -> anyhow::Result<()> {
    let snapshot = fetch_with_progress(&config).await?;
    if let Some(path) = &args.save_snapshot {
        write_snapshot(path, &snapshot)?;
    }
    analyze(&snapshot, &args.common, &args.analysis, &config)
}

/// Fetches all five series concurrently, ticking a progress bar as each one lands.
async fn fetch_with_progress(config: &Config) -> anyhow::Result<MarketSnapshot> {
    config.api.require_keys()?;
    let client = MarketDataClient::new(&config.api).context("Failed to build HTTP client")?;

    let progress_bar = ProgressBar::new(5);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Fetching rates and FX closes...");

    let result = fetch_snapshot(&client, &config.series, |series| {
        progress_bar.inc(1);
        progress_bar.set_message(format!("Fetched {}", series.name()));
    })
    .await;

    match result {
        Ok(snapshot) => {
            progress_bar.finish_with_message("Fetch complete!");
            Ok(snapshot)
        }
        Err(e) => {
            progress_bar.abandon_with_message("Fetch failed.");
            Err(e).context("Failed to fetch market data")
        }
    }
}

fn analyze(
    snapshot: &MarketSnapshot,
    common: &CommonArgs,
    args: &AnalysisArgs,
    config: &Config,
) -> anyhow::Result<()> {
    let settings = pipeline_settings(&config.analysis, common, args);
    let analysis = CarryPipeline::new(settings)
        .run(snapshot)
        .context("Carry trade analysis failed")?;

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    let charts = charts::write_carry_charts(&analysis.table, &output_dir)
        .context("Failed to write charts")?;

    print_summary(&analysis);
    for path in &charts {
        println!("Chart written to {}", path.display());
    }

    if let Some(path) = &args.json {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &analysis.table)
            .with_context(|| format!("Failed to write table to {}", path.display()))?;
        println!("Table written to {}", path.display());
    }
    Ok(())
}

/// Command-line flags take precedence over the configuration file.
fn pipeline_settings(
    config: &AnalysisConfig,
    common: &CommonArgs,
    args: &AnalysisArgs,
) -> PipelineSettings {
    PipelineSettings {
        volatility_window: config.volatility_window,
        periods_per_year: config.periods_per_year,
        missing_values: args.missing_values.unwrap_or(config.missing_values),
        start_date: common.from.or(config.start_date),
        end_date: common.to.or(config.end_date),
    }
}

fn print_summary(analysis: &CarryAnalysis) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Pair",
            "Period",
            "Obs",
            "Total Return",
            "Ann. Return",
            "Ann. Volatility",
            "Latest Volatility",
            "Max Drawdown",
            "Calmar",
        ]);

    for s in &analysis.summaries {
        table.add_row(vec![
            s.pair.label().to_string(),
            format!("{} .. {}", display_date(s.start), display_date(s.end)),
            s.observations.to_string(),
            percent(s.total_return),
            percent(s.annualized_return),
            percent(s.annualized_volatility),
            percent(s.latest_volatility),
            percent(s.max_drawdown),
            s.calmar_ratio.map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}")),
        ]);
    }

    println!(
        "\nYen carry trade summary ({} periods per year, {:?})",
        analysis.periods_per_year(),
        analysis.annualization
    );
    println!("{table}");
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v * 100.0))
}

fn display_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}

fn write_snapshot(path: &Path, snapshot: &MarketSnapshot) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), snapshot)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote snapshot.");
    Ok(())
}

fn read_snapshot(path: &Path) -> anyhow::Result<MarketSnapshot> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("{} is not a valid snapshot", path.display()))
}
