//! Sigil CLI - canonicalize drawings, verify persisted keys and look up patterns.

use clap::{Parser, Subcommand};
use sigil_canonical::{Canonicalizer, GridSize, GRID_SIZE};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{canonicalize, lookup, verify};

#[derive(Parser)]
#[command(name = "sigil")]
#[command(version, about = "Sigil canonicalization and pattern lookup CLI")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Side length of the grid points are drawn on (power of two, at most 16)
    #[arg(long, global = true, default_value_t = GRID_SIZE)]
    grid_size: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical key of a drawing
    Canonicalize {
        /// Points in drawing order, each as "x,y"
        #[arg(required = true, num_args = 1..)]
        points: Vec<String>,
        /// Output the persisted JSON form
        #[arg(long)]
        json: bool,
    },
    /// Re-validate a persisted key
    Verify {
        /// Persisted key JSON file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find the pattern a drawing matches
    Lookup {
        /// JSON file holding an array of patterns
        patterns: String,
        /// Points in drawing order, each as "x,y"
        #[arg(required = true, num_args = 1..)]
        points: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = run(cli);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let grid =
        GridSize::new(cli.grid_size).map_err(|e| format!("Invalid grid size: {}", e))?;
    let canonicalizer = Canonicalizer::new(grid);

    match cli.command {
        Commands::Canonicalize { points, json } => canonicalize::run(&canonicalizer, points, json),
        Commands::Verify { input, json } => verify::run(&canonicalizer, input, json),
        Commands::Lookup { patterns, points } => lookup::run(&canonicalizer, patterns, points),
    }
}
