use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use sch2board_engine::{write_svg, BoardFile, RunOutcome, Session};

use crate::config::{load_parameters, ParameterArgs};
use crate::report;

#[derive(Args, Debug, Default, Clone)]
#[command(about = "Move board footprints to the positions of their schematic symbols")]
pub struct PlaceArgs {
    /// Root schematic of the hierarchy
    #[arg(long, short = 's', value_hint = clap::ValueHint::FilePath)]
    pub schematic: PathBuf,

    /// Board JSON holding the footprints to move
    #[arg(long, short = 'b', value_hint = clap::ValueHint::FilePath)]
    pub board: PathBuf,

    /// Where to write the updated board. Defaults to overwriting --board.
    #[arg(long, short = 'o', value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// TOML file with placement parameters; flags take precedence
    #[arg(long, short = 'c', value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub parameters: ParameterArgs,

    /// Also write an SVG preview of the placement
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub svg: Option<PathBuf>,

    /// Print the run result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: PlaceArgs) -> Result<()> {
    let params = load_parameters(args.config.as_deref(), &args.parameters)?;
    let session = Session::new(params).context("Invalid placement parameters")?;
    let mut board = BoardFile::load(&args.board)?;

    let tree = sch2board_schematic::walk(&args.schematic);
    debug!(
        "Read {} symbols from {} documents",
        tree.symbols.len(),
        tree.documents.len()
    );

    let outcome = session.run(&tree.symbols, &mut board.footprints);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    let summary = match &outcome {
        RunOutcome::NoSymbols => {
            report::nothing_to_do(&format!("no symbols found in {}", args.schematic.display()));
            return Ok(());
        }
        RunOutcome::NoCandidates => {
            report::nothing_to_do("no schematic symbol matches an unlocked footprint");
            return Ok(());
        }
        RunOutcome::Completed(summary) => summary,
    };

    let output = args.output.as_ref().unwrap_or(&args.board);
    board.save(output)?;

    if let Some(svg) = &args.svg {
        write_svg(summary, svg)?;
    }

    if !args.json {
        report::print_summary(summary, output);
    }

    Ok(())
}
