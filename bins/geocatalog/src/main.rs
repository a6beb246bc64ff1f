//! geocatalog - states, cities and points of interest with distance search.

use clap::{Parser, Subcommand};
use geocatalog_core::config::Config;
use geocatalog_core::error::exit_codes;
use geocatalog_store::Catalog;
use geocatalog_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{locations, map, search, taxonomy, CenterArgs, Context, OutputFormat};

/// Catalog Brazilian states, cities and points of interest
#[derive(Parser)]
#[command(name = "geocatalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage states
    State {
        #[command(subcommand)]
        action: StateCommand,
    },

    /// Manage cities
    City {
        #[command(subcommand)]
        action: CityCommand,
    },

    /// Manage points of interest
    Location {
        #[command(subcommand)]
        action: LocationCommand,
    },

    /// Locations of a city within a radius of a point, nearest first
    Nearby {
        /// City name
        #[arg(long)]
        city: String,

        /// State code (UF)
        #[arg(long)]
        state: String,

        #[command(flatten)]
        center: CenterArgs,

        /// Search radius in kilometers (defaults to search.default_radius_km)
        #[arg(short, long)]
        radius: Option<f64>,
    },

    /// Distance between two named locations of a city
    Distance {
        /// City name
        #[arg(long)]
        city: String,

        /// State code (UF)
        #[arg(long)]
        state: String,

        /// First location
        from: String,

        /// Second location
        to: String,
    },

    /// Write a map of a city's locations
    Map {
        /// City name
        #[arg(long)]
        city: String,

        /// State code (UF)
        #[arg(long)]
        state: String,

        #[command(flatten)]
        center: CenterArgs,

        /// Only show locations within this radius of the center
        #[arg(short, long)]
        radius: Option<f64>,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        /// Write GeoJSON instead of an HTML page
        #[arg(long)]
        geojson: bool,
    },

    /// List the Brazilian state codes
    Ufs,
}

#[derive(Subcommand)]
enum StateCommand {
    /// Register a state
    Add {
        /// Two-letter state code
        uf: String,

        /// Display name (looked up from the UF table when omitted)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List registered states
    List,
}

#[derive(Subcommand)]
enum CityCommand {
    /// Register a city under a state
    Add {
        /// City name
        name: String,

        /// State code (UF)
        #[arg(short, long)]
        state: String,
    },
    /// List the cities of a state
    List {
        /// State code (UF)
        uf: String,
    },
}

#[derive(Subcommand)]
enum LocationCommand {
    /// Store a point of interest
    Add {
        /// Location name
        #[arg(short, long)]
        name: String,

        /// City name
        #[arg(long)]
        city: String,

        /// State code (UF)
        #[arg(long)]
        state: String,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Free text
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List stored locations
    List {
        /// Only this city
        #[arg(long, requires = "state")]
        city: Option<String>,

        /// State code (UF) of --city
        #[arg(long, requires = "city")]
        state: Option<String>,
    },
    /// Delete every location with this exact name
    Delete {
        /// Location name
        name: String,
    },
    /// Delete every location
    Clear {
        /// Confirm
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let known = e.downcast_ref::<geocatalog_core::Error>();
            match (format, known) {
                (OutputFormat::Json, Some(err)) => {
                    let report = serde_json::to_string(&err.report()).unwrap_or_default();
                    eprintln!("{}", report);
                }
                _ => eprintln!("{} {}", "Error:".red().bold(), e),
            }
            let code = known.map_or(exit_codes::FAILURE, |err| exit_codes::for_code(err.code));
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let logging = &config.schema.logging;
    geocatalog_telemetry::init(
        &TelemetryConfig::new(logging.level.as_str(), logging.json).verbose(cli.verbose),
    )?;

    tracing::debug!(data_dir = %config.data_dir().display(), "Opening catalog");
    let catalog = Catalog::open(&config)?;
    let mut ctx = Context {
        catalog,
        config,
        format: cli.format,
    };

    match cli.command {
        Commands::State { action } => match action {
            StateCommand::Add { uf, name } => taxonomy::add_state(&mut ctx, &uf, name.as_deref()),
            StateCommand::List => taxonomy::list_states(&ctx),
        },

        Commands::City { action } => match action {
            CityCommand::Add { name, state } => taxonomy::add_city(&mut ctx, &name, &state),
            CityCommand::List { uf } => taxonomy::list_cities(&ctx, &uf),
        },

        Commands::Location { action } => match action {
            LocationCommand::Add { name, city, state, lat, lon, description } => {
                locations::add(&mut ctx, &name, &city, &state, lat, lon, &description)
            }
            LocationCommand::List { city, state } => {
                locations::list(&ctx, city.as_deref().zip(state.as_deref()))
            }
            LocationCommand::Delete { name } => locations::delete(&mut ctx, &name),
            LocationCommand::Clear { yes } => locations::clear(&mut ctx, yes),
        },

        Commands::Nearby { city, state, center, radius } => {
            search::nearby(&ctx, &city, &state, &center, radius)
        }

        Commands::Distance { city, state, from, to } => {
            search::distance(&ctx, &city, &state, &from, &to)
        }

        Commands::Map { city, state, center, radius, output, geojson } => {
            map::run(&ctx, &city, &state, &center, radius, &output, geojson)
        }

        Commands::Ufs => taxonomy::list_ufs(&ctx),
    }
}
