//! # sch2board-schematic
//!
//! Recovers symbol positions from a hierarchical KiCad schematic. Only the
//! pieces placement needs are read: each placed symbol's reference, its
//! `(at x y [angle])` and the child sheet files a document points to.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let tree = sch2board_schematic::walk(Path::new("board.kicad_sch"));
//! for record in tree.symbols.values() {
//!     println!("{} at ({}, {})", record.label, record.x, record.y);
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod record;
mod source;
mod walker;

pub use record::{extract_sheet_files, extract_symbol_record};
pub use source::{DocumentError, DocumentSource, FsDocumentSource, InMemoryDocumentSource};
pub use walker::{walk, walk_with, SchematicTree};

/// Position and orientation of one schematic symbol, in schematic millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Reference designator (e.g. "R1", "U3")
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Symbol angle in degrees, when the `(at ...)` carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// Symbol records keyed by label.
pub type SymbolMap = BTreeMap<String, SymbolRecord>;
