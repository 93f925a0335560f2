use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::debug;
use sch2board_engine::{PlacementParameters, SearchStrategy};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Ring,
    Grid,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Ring => SearchStrategy::Ring,
            StrategyArg::Grid => SearchStrategy::Grid,
        }
    }
}

/// Command-line overrides for [`PlacementParameters`]. Lengths in mm, angles in degrees.
#[derive(Args, Debug, Default, Clone)]
pub struct ParameterArgs {
    /// Left edge of the placement area
    #[arg(long, allow_negative_numbers = true)]
    pub x0: Option<f64>,

    /// Top edge of the placement area
    #[arg(long, allow_negative_numbers = true)]
    pub y0: Option<f64>,

    #[arg(long)]
    pub width: Option<f64>,

    #[arg(long)]
    pub height: Option<f64>,

    /// Schematic-to-board scale factor (auto-fit when omitted)
    #[arg(long, conflicts_with = "scale_percent")]
    pub scale: Option<f64>,

    /// Scale as a percentage, e.g. 30 for 0.3
    #[arg(long)]
    pub scale_percent: Option<f64>,

    /// Only move footprints selected on the board
    #[arg(long)]
    pub only_selected: bool,

    /// Put footprints at their targets even if they overlap
    #[arg(long)]
    pub no_avoid_collisions: bool,

    /// Gap kept around every footprint
    #[arg(long)]
    pub clearance: Option<f64>,

    /// Search step
    #[arg(long)]
    pub step: Option<f64>,

    /// Use the schematic symbol angle as the footprint orientation
    #[arg(long)]
    pub use_rotation: bool,

    /// Try rotated and nudged poses around each ring point
    #[arg(long, alias = "optimize")]
    pub optimise: bool,

    /// Angle tried either side of the base orientation when optimising
    #[arg(long)]
    pub rot_step: Option<f64>,

    /// Search used when the target is taken
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

impl ParameterArgs {
    pub fn apply(&self, params: &mut PlacementParameters) {
        if let Some(v) = self.x0 {
            params.origin_x = v;
        }
        if let Some(v) = self.y0 {
            params.origin_y = v;
        }
        if let Some(v) = self.width {
            params.width = v;
        }
        if let Some(v) = self.height {
            params.height = v;
        }
        if let Some(percent) = self.scale_percent {
            params.scale = Some(percent / 100.0);
        }
        if let Some(v) = self.scale {
            params.scale = Some(v);
        }
        if self.only_selected {
            params.only_selected = true;
        }
        if self.no_avoid_collisions {
            params.avoid_collisions = false;
        }
        if let Some(v) = self.clearance {
            params.clearance = v;
        }
        if let Some(v) = self.step {
            params.grid_step = v;
        }
        if self.use_rotation {
            params.use_rotation = true;
        }
        if self.optimise {
            params.optimise = true;
        }
        if let Some(v) = self.rot_step {
            params.rotation_step = v;
        }
        if let Some(strategy) = self.strategy {
            params.strategy = strategy.into();
        }
    }
}

/// Defaults, then the TOML file if given, then command-line flags.
pub fn load_parameters(
    config: Option<&Path>,
    overrides: &ParameterArgs,
) -> Result<PlacementParameters> {
    let mut params = match config {
        Some(path) => {
            debug!("Reading placement config {}", path.display());
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => PlacementParameters::default(),
    };
    overrides.apply(&mut params);
    Ok(params)
}
