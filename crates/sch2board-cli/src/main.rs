use clap::{Parser, Subcommand};

mod config;
mod place;
mod report;
mod symbols;

#[derive(Parser)]
#[command(name = "sch2board")]
#[command(about = "Place layout footprints at their schematic positions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move board footprints to their schematic positions
    #[command(alias = "p")]
    Place(place::PlaceArgs),

    /// List the symbols found in a schematic hierarchy
    #[command(alias = "s")]
    Symbols(symbols::SymbolsArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Place(args) => place::execute(args),
        Commands::Symbols(args) => symbols::execute(args),
    }
}
