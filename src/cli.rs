//! Command-line interface components.

use crate::config::DashboardConfig;
use crate::dashboard::player::play_map_animation;
use crate::dashboard::{Dashboard, DashboardView};
use crate::dataset::Dataset;
use crate::geo::Boundaries;
use crate::tabs::TabKind;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "airq-dashboard")]
#[command(about = "Interactive air-quality dashboard over a pollutant observation CSV")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the air-quality CSV file
    #[arg(value_name = "DATA_PATH")]
    pub data_path: PathBuf,

    /// GeoJSON FeatureCollection with country boundaries for the map tab
    #[arg(short, long, value_name = "FILE")]
    pub boundaries: Option<PathBuf>,

    /// Dashboard configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tabs to show (scatter, regional, heatmap, time-series, grouped-bar,
    /// map, box-plot, stacked-area); all tabs when omitted
    #[arg(short, long = "tab", value_name = "TAB")]
    pub tabs: Vec<TabKind>,

    /// Output format for the chart state
    #[arg(short, long, value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Play the map year animation before printing
    #[arg(long)]
    pub animate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored per-chart summary
    Summary,
    /// Full chart state as JSON
    Json,
}

/// Set up structured logging on stderr
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("airq_dashboard={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Load the inputs, build the dashboard and print the requested tabs
pub async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    let dataset = Dataset::load(&args.data_path)
        .with_context(|| format!("Failed to load dataset {}", args.data_path.display()))?;
    print_load_summary(&dataset);

    let boundaries = match &args.boundaries {
        Some(path) => Some(
            Boundaries::load(path)
                .with_context(|| format!("Failed to load boundaries {}", path.display()))?,
        ),
        None => None,
    };

    let mut dashboard = Dashboard::new(dataset, config, boundaries)?;

    if args.animate {
        let frames = play_map_animation(&mut dashboard, |d| {
            let map = d.tabs().map.binding();
            println!("  {} {}", "▶".bright_yellow(), map.meta().title.bright_white());
        })
        .await?;
        info!("Map animation finished after {} frames", frames);
    }

    let view = dashboard.view(&args.tabs);
    match args.format {
        OutputFormat::Summary => print_summary(&view),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn print_load_summary(dataset: &Dataset) {
    let stats = dataset.load_stats();
    println!("{}", "Dataset loaded".bright_green().bold());
    println!(
        "  {} records, {} countries, {} cities, years {}-{}",
        dataset.len().to_string().bright_cyan(),
        dataset.countries().len(),
        dataset.cities().len(),
        dataset.min_year(),
        dataset.max_year()
    );
    if stats.rows_dropped() > 0 {
        println!(
            "  {}",
            format!(
                "{} rows dropped ({} unparseable dates, {} missing country or city)",
                stats.rows_dropped(),
                stats.dropped_invalid_date,
                stats.dropped_missing_location
            )
            .yellow()
        );
    }
    println!();
}

fn print_summary(view: &DashboardView<'_>) {
    for tab in &view.tabs {
        println!("{}", tab.title.bright_green().bold());
        for binding in &tab.bindings {
            let meta = binding.meta();
            println!("  {} {}", binding.name().bright_yellow(), meta.title.bright_white());
            println!(
                "    {} rows, {} renderers",
                binding.data().len(),
                binding.renderers().len()
            );
            if !binding.legend().is_empty() {
                let labels: Vec<&str> = binding.legend().iter().map(|e| e.label.as_str()).collect();
                println!("    legend: {}", labels.join(", ").bright_black());
            }
            if let Some(scale) = &meta.color_scale {
                println!(
                    "    color: {} {:.2}..{:.2}",
                    scale.palette, scale.low, scale.high
                );
            }
        }
        println!();
    }
    println!(
        "Map animation: {:?} ({})",
        view.animation.state(),
        view.play_button
    );
}
