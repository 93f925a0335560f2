//! # sch2board-engine
//!
//! Moves layout footprints to positions derived from their schematic
//! symbols. Symbol coordinates are scaled into a rectangular placement area,
//! footprints are visited nearest-first from the top-left symbol, and each
//! one is put at its mapped position or, if that collides, at the closest
//! free spot a ring or grid search can find.
//!
//! The engine talks to the layout through the [`Footprint`] trait. A JSON
//! board ([`BoardFile`]) is provided for the command line and for tests.
//!
//! ```no_run
//! use std::path::Path;
//! use sch2board_engine::{BoardFile, PlacementParameters, RunOutcome, Session};
//!
//! # fn main() -> anyhow::Result<()> {
//! let tree = sch2board_schematic::walk(Path::new("board.kicad_sch"));
//! let mut board = BoardFile::load(Path::new("board.json"))?;
//! let session = Session::new(PlacementParameters::default())?;
//! if let RunOutcome::Completed(summary) = session.run(&tree.symbols, &mut board.footprints) {
//!     println!("placed {}, skipped {}", summary.placed, summary.skipped);
//! }
//! board.save(Path::new("board.json"))?;
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod collision;
pub mod geometry;
pub mod host;
pub mod mapper;
pub mod order;
pub mod params;
pub mod preview;
pub mod search;
pub mod session;

pub use board::{BoardError, BoardFile, BoardFootprint};
pub use collision::CollisionIndex;
pub use geometry::{mm_to_nm, nm_to_mm, Nm, Point, Rect};
pub use host::{Footprint, Pose};
pub use mapper::CoordinateMapper;
pub use order::{visiting_order, PlacementCandidate};
pub use params::{ParameterError, PlacementParameters, SearchStrategy};
pub use preview::{render_svg, write_svg};
pub use search::{find_pose, PlacementMethod, SearchSettings};
pub use session::{PlacementOutcome, PlacementReport, PlacementSummary, RunOutcome, Session};
