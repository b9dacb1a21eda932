//! Route card CLI
//!
//! Command-line front end for the cluster ledger.
//!
//! # Commands
//!
//! - `init` - Create the ledger and seed the reference catalog
//! - `next` - Print the next cluster number for a gluing date
//! - `validate` - Check a typed cluster number
//! - `save` - Record a completed route card
//! - `show` - Print a recorded route card
//! - `list` - List the route cards of a month
//! - `reference` - Print a reference list

mod commands;

use clap::{Parser, Subcommand};
use routecard_core::LedgerConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Route card ledger tools.
#[derive(Parser)]
#[command(name = "routecard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the history database
    #[arg(global = true, short, long)]
    ledger: Option<PathBuf>,

    /// Path to the reference catalog database
    #[arg(global = true, short, long)]
    reference: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the ledger and seed the reference catalog
    Init,

    /// Print the next cluster number for a gluing date
    Next {
        /// Gluing date, dd.mm.yyyy (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Check a manually typed cluster number
    Validate {
        /// Cluster number, e.g. К25/03-001
        number: String,
    },

    /// Record a completed route card
    Save(commands::save::SaveArgs),

    /// Print a recorded route card
    Show {
        /// Cluster number
        number: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the route cards of a month
    List {
        /// Month as YY/MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print a reference list
    Reference {
        /// List name (e.g. assemblers, lgm_castings); omit to see all names
        list: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = LedgerConfig::new();
    if let Some(path) = cli.ledger {
        config = config.ledger_path(path);
    }
    if let Some(path) = cli.reference {
        config = config.reference_path(path);
    }

    match cli.command {
        Commands::Init => commands::init::run(&config)?,
        Commands::Next { date } => commands::next::run(&config, date.as_deref())?,
        Commands::Validate { number } => commands::validate::run(&number)?,
        Commands::Save(args) => commands::save::run(&config, args)?,
        Commands::Show { number, format } => commands::show::run(&config, &number, &format)?,
        Commands::List { month, format } => {
            commands::list::run(&config, month.as_deref(), &format)?;
        }
        Commands::Reference { list } => commands::reference::run(&config, list.as_deref())?,
        Commands::Version => {
            println!("routecard CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("routecard core v{}", routecard_core::VERSION);
        }
    }

    Ok(())
}
