//! Ads Lakehouse
//!
//! Synthetic advertising data toolkit:
//! - Seeded generation of content catalog, impressions, and conversions CSVs
//! - Bulk loading of the seed files into a DuckDB database file
//! - Fixed analytic reports (row counts, viewability, CTR, date range)
//! - Catalog inspection (tables, schemas, name search)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use duckdb_client::{
    health, inspect, load_seeds, run_all, table::TextTable, DuckDbClient, DuckDbConfig,
    DEFAULT_SEARCH_PATTERN,
};
use lakehouse_core::GeneratorConfig;
use telemetry::init_tracing_from_env;

mod settings;

use settings::load_config;

#[derive(Parser, Debug)]
#[command(name = "ads-lakehouse", version, about = "Synthetic ad data generator and DuckDB report runner")]
struct Cli {
    /// Config file to layer over the defaults (TOML, extension optional)
    #[arg(long, global = true, default_value = "config/default")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Generate content_catalog.csv, ad_events.csv and conversions.csv
    Generate {
        /// Override the RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Override the number of simulated days
        #[arg(long)]
        days: Option<u32>,
        /// Override the output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Create the tables and load the seed CSVs into the database
    Load {
        /// Database file
        #[arg(long)]
        db: Option<PathBuf>,
        /// Directory holding the seed CSVs
        #[arg(long)]
        seeds_dir: Option<PathBuf>,
    },
    /// Run the row count, viewability, CTR and date range reports
    Query {
        /// Database file
        #[arg(long)]
        db: Option<PathBuf>,
        /// Print JSON instead of tables
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List tables and schemas and search tables by name
    Inspect {
        /// Database file
        #[arg(long)]
        db: Option<PathBuf>,
        /// SQL LIKE pattern matched against table names
        #[arg(long, default_value = DEFAULT_SEARCH_PATTERN)]
        pattern: String,
        /// Print JSON instead of tables
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;

    init_tracing_from_env(&config.log_filter).context("Failed to initialize tracing")?;

    info!("Starting Ads Lakehouse v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Generate {
            seed,
            days,
            output_dir,
        } => {
            if let Some(seed) = seed {
                config.generator.seed = seed;
            }
            if let Some(days) = days {
                config.generator.num_days = days;
            }
            if let Some(dir) = output_dir {
                config.generator.output_dir = dir;
            }
            run_generate(&config.generator)
        }
        Commands::Load { db, seeds_dir } => {
            if let Some(dir) = seeds_dir {
                config.duckdb.seeds_dir = dir;
            }
            run_load(with_db(config.duckdb, db, false))
        }
        Commands::Query { db, json } => run_query(with_db(config.duckdb, db, true), json),
        Commands::Inspect { db, pattern, json } => {
            run_inspect(with_db(config.duckdb, db, true), &pattern, json)
        }
    }
}

/// Applies the `--db` override and access mode.
fn with_db(config: DuckDbConfig, db: Option<PathBuf>, read_only: bool) -> DuckDbConfig {
    let config = match db {
        Some(path) => config.with_path(path),
        None => config,
    };
    config.with_read_only(read_only)
}

fn run_generate(config: &GeneratorConfig) -> Result<()> {
    info!(
        seed = config.seed,
        days = config.num_days,
        output_dir = %config.output_dir.display(),
        "Generating seed files"
    );

    let summary =
        generator::generate_seeds(config).context("Failed to generate seed files")?;

    println!("{}", summary);
    Ok(())
}

fn run_load(config: DuckDbConfig) -> Result<()> {
    let seeds_dir = config.seeds_dir.clone();
    let client = open(config)?;

    let loaded = load_seeds(&client, &seeds_dir)
        .with_context(|| format!("Failed to load seeds from {}", seeds_dir.display()))?;

    let mut table = TextTable::new(["table_name", "rows"]);
    for t in &loaded {
        table.push_row([t.table_name.clone(), t.rows.to_string()]);
    }
    println!("\n=== Loaded Tables ===");
    print!("{}", table);
    Ok(())
}

fn run_query(config: DuckDbConfig, json: bool) -> Result<()> {
    let client = open(config)?;
    let report = run_all(&client).context("Failed to run reports")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
        println!("\n✓ Queries complete!");
    }
    Ok(())
}

fn run_inspect(config: DuckDbConfig, pattern: &str, json: bool) -> Result<()> {
    let client = open(config)?;
    let inspection = inspect(&client, pattern).context("Failed to inspect database")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        print!("{}", inspection);
    }
    Ok(())
}

/// Opens the database and checks it answers.
fn open(config: DuckDbConfig) -> Result<DuckDbClient> {
    let path = config.path.clone();
    let client = DuckDbClient::open(config)
        .with_context(|| format!("Failed to open database {}", path.display()))?;

    if !health::check_connection(&client) {
        error!("DuckDB connection: unhealthy");
        anyhow::bail!("Database {} is not answering queries", path.display());
    }
    Ok(client)
}
