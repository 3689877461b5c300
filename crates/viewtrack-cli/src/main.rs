//! Viewtrack CLI - tokenize identifiers, manage the install salt, and build or verify events.

use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod output;

use commands::event::EventKind;
use commands::{event, salt, tokenize, verify, SaltSource};

#[derive(Parser)]
#[command(name = "viewtrack")]
#[command(about = "Viewtrack view-token and analytics event CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the view token for an input string
    Tokenize {
        /// String to tokenize
        input: String,
        #[command(flatten)]
        source: SaltSource,
    },
    /// Print the install salt of a store, creating it on first use
    Salt {
        /// Directory of the file-backed salt store
        #[arg(long)]
        store: std::path::PathBuf,
    },
    /// Build an event and print it as JSON
    Event {
        #[command(subcommand)]
        kind: EventKind,
        /// Event time in seconds since the epoch (default: now)
        #[arg(long, global = true)]
        timestamp: Option<i64>,
        /// Stamp the event with this application id
        #[arg(long, global = true)]
        app_id: Option<String>,
        #[command(flatten)]
        source: SaltSource,
    },
    /// Verify the view tokens of events read from a file or stdin
    Verify {
        /// Input file with a JSON event, a JSON array, or one event per line (stdin if omitted)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        source: SaltSource,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tokenize { input, source } => tokenize::run(input, &source),
        Commands::Salt { store } => salt::run(store),
        Commands::Event {
            kind,
            timestamp,
            app_id,
            source,
        } => event::run(kind, timestamp, app_id, &source),
        Commands::Verify {
            input,
            json,
            source,
        } => verify::run(input, json, &source),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
