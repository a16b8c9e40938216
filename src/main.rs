use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tri_compare::api::state::AppState;
use tri_compare::config::AppConfig;
use tri_compare::models::{DistributionKind, Segment, Selection};
use tri_compare::present::{athlete_summary, comparison_view, SidePanel, PLACEHOLDER};
use tri_compare::resolve::{derive_options, PartialSelection};
use tri_compare::storage::load_catalog;
use tri_compare::RaceCatalog;

#[derive(Parser)]
#[command(name = "tri-compare")]
#[command(about = "Compare triathlon race results between two athletes")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List loaded races and years
    Races,

    /// Show dropdown choices for a partial selection
    Options {
        #[arg(long)]
        race: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        athlete: Option<String>,

        /// all, gender or division
        #[arg(long)]
        distribution: Option<DistributionKind>,
    },

    /// Compare two athletes on one segment
    Compare {
        /// Left side as race/year/athlete[/kind[/value]]
        left: Selection,

        /// Right side as race/year/athlete[/kind[/value]]
        right: Selection,

        /// Segment to compare (finish, swim, bike, run, t1, t2)
        #[arg(long, default_value = "finish")]
        metric: Segment,

        /// Histogram bins (defaults to the configured comparison bins)
        #[arg(long)]
        bins: Option<usize>,

        /// Print the full view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an athlete's published result
    Athlete {
        race: String,
        year: String,
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting tri-compare v{}", env!("CARGO_PKG_VERSION"));
    if !cli.config.exists() {
        tracing::info!("No config at {:?}, using defaults", cli.config);
    }

    let catalog = load_catalog(&config)
        .with_context(|| format!("Failed to load race results from {:?}", config.data_dir))?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let addr = format!("{}:{}", config.server.host, config.server.port);

            let state = AppState {
                catalog: Arc::new(catalog),
                config: Arc::new(config),
            };
            let app = tri_compare::api::build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Races => print_races(&catalog),
        Commands::Options {
            race,
            year,
            athlete,
            distribution,
        } => {
            let choices = derive_options(
                &catalog,
                &PartialSelection {
                    race,
                    year,
                    athlete,
                    distribution,
                },
            );
            println!("{}", serde_json::to_string_pretty(&choices)?);
        }
        Commands::Compare {
            left,
            right,
            metric,
            bins,
            json,
        } => {
            let bins = bins.unwrap_or(config.histogram.comparison_bins).max(1);
            let view = comparison_view(&catalog, &left, &right, metric, bins);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("\n=== {} ===", metric);
                print_panel("Left", &view.left);
                print_panel("Right", &view.right);
                println!("\n{}", view.summary);
            }
        }
        Commands::Athlete { race, year, name } => {
            let summary = athlete_summary(&catalog, &race, &year, &name)?;
            println!("\n=== {} ({} {}) ===", summary.name, summary.race, summary.year);
            println!("Place:          {}", summary.place);
            println!("Division:       {}", summary.division);
            println!("Division place: {}", summary.division_place);
            for time in &summary.times {
                println!("{:<15} {}", format!("{}:", time.label), time.display);
            }
        }
    }

    Ok(())
}

fn print_races(catalog: &RaceCatalog) {
    println!("\n=== Races ===");
    for race in catalog.summary() {
        println!("{}", race.name);
        for year in &race.years {
            println!("  {}  {} athletes", year.year, year.athletes);
        }
    }
}

fn print_panel(side: &str, panel: &SidePanel) {
    match (&panel.marker, &panel.error) {
        (Some(marker), _) => println!(
            "{:<6} {} | {} | {} | {}",
            format!("{}:", side),
            panel.athlete,
            panel.label,
            marker.time,
            marker.legend
        ),
        (None, Some(err)) => println!(
            "{:<6} {} | {} | {} {}",
            format!("{}:", side),
            panel.athlete,
            panel.label,
            PLACEHOLDER,
            err.message
        ),
        (None, None) => println!("{:<6} {} | {}", format!("{}:", side), panel.athlete, PLACEHOLDER),
    }
}
