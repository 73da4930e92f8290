mod cli;
mod commands;
mod files;

use cli::{Cli, Commands};
use commands::{geo2topo, topo2geo, topoquantize};
use tracing_subscriber::EnvFilter;

/// Log to stderr at a level picked by `-v`, unless RUST_LOG is set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match &cli.command {
        Commands::Geo2topo(args) => geo2topo::run(&cli, args),
        Commands::Topo2geo(args) => topo2geo::run(&cli, args),
        Commands::Topoquantize(args) => topoquantize::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
