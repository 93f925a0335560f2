//! A board described as JSON, used as the layout host by the command line.
//!
//! ```json
//! {
//!   "footprints": [
//!     { "reference": "R1", "x": 10.0, "y": 20.0, "orientation": 90.0,
//!       "width": 2.0, "height": 1.2, "locked": false, "selected": true }
//!   ]
//! }
//! ```
//!
//! Fields other than `footprints` are kept as they are when the board is saved.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::{mm_to_nm, nm_to_mm, Point, Rect};
use crate::host::{Footprint, Pose};

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("failed to read board {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write board {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid board JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One component on a JSON board. Lengths in millimetres, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardFootprint {
    pub reference: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub orientation: f64,
    /// Body size at orientation zero
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub selected: bool,
}

impl Footprint for BoardFootprint {
    fn reference(&self) -> &str {
        &self.reference
    }

    fn position(&self) -> Point {
        Point::from_mm(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = nm_to_mm(position.x);
        self.y = nm_to_mm(position.y);
    }

    fn orientation(&self) -> f64 {
        self.orientation
    }

    fn set_orientation(&mut self, degrees: f64) {
        self.orientation = degrees;
    }

    /// The axis-aligned envelope of the body rotated about its centre.
    fn bounding_box_at(&self, pose: Pose) -> Rect {
        let (sin, cos) = pose.orientation.to_radians().sin_cos();
        let w = (self.width * cos).abs() + (self.height * sin).abs();
        let h = (self.width * sin).abs() + (self.height * cos).abs();
        Rect::from_center_half_extents(pose.position, mm_to_nm(w / 2.0), mm_to_nm(h / 2.0))
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardFile {
    pub footprints: Vec<BoardFootprint>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BoardFile {
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let contents = fs::read_to_string(path).map_err(|source| BoardError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), BoardError> {
        let mut json = self.to_json_string()?;
        json.push('\n');
        fs::write(path, json).map_err(|source| BoardError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resistor() -> BoardFootprint {
        BoardFootprint {
            reference: "R1".to_string(),
            x: 10.0,
            y: 20.0,
            orientation: 0.0,
            width: 4.0,
            height: 2.0,
            locked: false,
            selected: false,
        }
    }

    #[test]
    fn test_bounding_box_follows_rotation() {
        let r = resistor();
        let flat = r.bounding_box();
        assert_eq!((flat.width(), flat.height()), (4_000_000, 2_000_000));
        assert_eq!(flat.min, Point::from_mm(8.0, 19.0));

        let upright = r.bounding_box_at(Pose::new(r.position(), 90.0));
        assert_eq!((upright.width(), upright.height()), (2_000_000, 4_000_000));
        // Probing leaves the footprint alone
        assert_eq!(r.orientation, 0.0);
    }

    #[test]
    fn test_apply_pose() {
        let mut r = resistor();
        r.apply_pose(Pose::new(Point::from_mm(1.5, -2.25), 180.0));
        assert_eq!((r.x, r.y, r.orientation), (1.5, -2.25, 180.0));
    }

    #[test]
    fn test_parse_keeps_unknown_fields() {
        let board = BoardFile::from_json_str(
            r#"{
                "title": "demo",
                "footprints": [
                    { "reference": "C1", "x": 1.0, "y": 2.0, "width": 1.0, "height": 0.5 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(board.footprints.len(), 1);
        assert!(!board.footprints[0].locked);
        assert_eq!(board.extra["title"], "demo");

        let json = board.to_json_string().unwrap();
        assert!(json.contains("\"title\": \"demo\""));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            BoardFile::from_json_str("{ \"footprints\": 3 }"),
            Err(BoardError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = BoardFile::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, BoardError::Read { .. }));
    }
}
