use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use sch2board_schematic::SymbolRecord;

#[derive(Args, Debug, Default, Clone)]
#[command(about = "List symbol positions from a schematic and its sheets")]
pub struct SymbolsArgs {
    /// Root schematic of the hierarchy
    #[arg(value_name = "SCHEMATIC", value_hint = clap::ValueHint::FilePath)]
    pub schematic: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    documents: &'a [PathBuf],
    symbols: Vec<&'a SymbolRecord>,
}

pub fn execute(args: SymbolsArgs) -> Result<()> {
    let tree = sch2board_schematic::walk(&args.schematic);

    if args.json {
        let listing = Listing {
            documents: &tree.documents,
            symbols: tree.symbols.values().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("{:<10} {:>10} {:>10} {:>8}", "REF".bold(), "X".bold(), "Y".bold(), "ANGLE".bold());
    for record in tree.symbols.values() {
        let angle = record.rotation.map(|r| format!("{r:.1}")).unwrap_or_else(|| "-".to_string());
        println!("{:<10} {:>10.3} {:>10.3} {:>8}", record.label, record.x, record.y, angle);
    }
    eprintln!(
        "{} symbols in {} documents",
        tree.symbols.len().to_string().bold(),
        tree.documents.len()
    );

    Ok(())
}
