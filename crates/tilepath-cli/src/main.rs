use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tilepath_cli::output::OutputFormat;

mod commands;

use commands::inspect::handle_inspect;
use commands::route::{handle_route, RouteArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tile map path finding utilities")]
struct Cli {
    /// Path to a tile map JSON document. Falls back to `TILEPATH_MAP`.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find a route between two cells of the map.
    Route(RouteArgs),
    /// Print the map's orientation, size, layers and tile ids.
    Inspect,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Route(args) => handle_route(cli.map.as_deref(), cli.format, args),
        Command::Inspect => handle_inspect(cli.map.as_deref(), cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
