//! Placement configuration.

use serde::{Deserialize, Serialize};

use crate::geometry::{mm_to_nm, Nm, Point, Rect};

/// Largest magnitude, in millimetres, accepted for any length or coordinate.
/// Far beyond any real board, and small enough that sums of a few such values
/// stay inside the nanometre range.
pub const MAX_LENGTH_MM: f64 = 1.0e9;

/// How a colliding component looks for a free spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Expanding rings of eight compass points around the target
    #[default]
    Ring,
    /// Row-major scan of the grid starting at the target cell
    Grid,
}

/// User-facing placement options. Lengths are millimetres, angles degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParameters {
    /// Top-left corner of the placement area
    pub origin_x: f64,
    pub origin_y: f64,
    /// Placement area size
    pub width: f64,
    pub height: f64,
    /// Schematic-to-board scale factor. `None` fits the schematic into the area.
    pub scale: Option<f64>,
    /// Only move footprints that are selected on the board
    pub only_selected: bool,
    pub avoid_collisions: bool,
    /// Gap kept around every footprint
    pub clearance: f64,
    /// Search step; clamped to one nanometre
    pub grid_step: f64,
    /// Apply the schematic symbol angle to the footprint
    pub use_rotation: bool,
    /// Also try rotated and half-step nudged poses at each ring
    pub optimise: bool,
    /// Angle tried either side of the base orientation when optimising
    pub rotation_step: f64,
    pub strategy: SearchStrategy,
}

impl Default for PlacementParameters {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            origin_y: 50.0,
            width: 100.0,
            height: 80.0,
            scale: None,
            only_selected: false,
            avoid_collisions: true,
            clearance: 0.05,
            grid_step: 1.0,
            use_rotation: false,
            optimise: false,
            rotation_step: 0.0,
            strategy: SearchStrategy::Ring,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} is out of range, got {value} (limit ±{} mm)", MAX_LENGTH_MM)]
    OutOfRange { name: &'static str, value: f64 },
}

fn finite(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NotFinite { name, value })
    }
}

fn in_range(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.abs() <= MAX_LENGTH_MM {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if finite(name, value)? > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if finite(name, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::Negative { name, value })
    }
}

impl PlacementParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        finite("origin_x", self.origin_x)?;
        finite("origin_y", self.origin_y)?;
        positive("width", self.width)?;
        positive("height", self.height)?;
        if let Some(scale) = self.scale {
            positive("scale", scale)?;
        }
        non_negative("clearance", self.clearance)?;
        non_negative("grid_step", self.grid_step)?;
        non_negative("rotation_step", self.rotation_step)?;

        in_range("origin_x", self.origin_x)?;
        in_range("origin_y", self.origin_y)?;
        in_range("origin_x + width", self.origin_x + self.width)?;
        in_range("origin_y + height", self.origin_y + self.height)?;
        in_range("clearance", self.clearance)?;
        in_range("grid_step", self.grid_step)?;
        Ok(())
    }

    /// The placement area in board units
    pub fn area(&self) -> Rect {
        Rect::from_origin_size(
            Point::from_mm(self.origin_x, self.origin_y),
            mm_to_nm(self.width),
            mm_to_nm(self.height),
        )
    }

    pub fn clearance_nm(&self) -> Nm {
        mm_to_nm(self.clearance)
    }

    /// Search step in board units, never below one so searches always advance
    pub fn grid_step_nm(&self) -> Nm {
        mm_to_nm(self.grid_step).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(PlacementParameters::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let params = PlacementParameters {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::NotPositive { name: "width", .. })
        ));

        let params = PlacementParameters {
            origin_x: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::NotFinite { name: "origin_x", .. })
        ));

        let params = PlacementParameters {
            clearance: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::Negative { name: "clearance", .. })
        ));

        let params = PlacementParameters {
            scale: Some(0.0),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_lengths_past_the_board_range() {
        let params = PlacementParameters {
            width: 1e13,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::OutOfRange { name: "origin_x + width", .. })
        ));

        let params = PlacementParameters {
            grid_step: 1e12,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::OutOfRange { name: "grid_step", .. })
        ));

        let params = PlacementParameters {
            origin_y: -MAX_LENGTH_MM,
            height: 2.0 * MAX_LENGTH_MM,
            ..Default::default()
        };
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn test_grid_step_is_clamped() {
        let params = PlacementParameters {
            grid_step: 0.0,
            ..Default::default()
        };
        assert_eq!(params.grid_step_nm(), 1);
        assert_eq!(PlacementParameters::default().grid_step_nm(), 1_000_000);
    }

    #[test]
    fn test_area() {
        let area = PlacementParameters::default().area();
        assert_eq!(area.min, Point::new(50_000_000, 50_000_000));
        assert_eq!(area.max, Point::new(150_000_000, 130_000_000));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let params: PlacementParameters =
            serde_json::from_str(r#"{ "width": 40.0, "strategy": "grid" }"#).unwrap();
        assert_eq!(params.width, 40.0);
        assert_eq!(params.height, 80.0);
        assert_eq!(params.strategy, SearchStrategy::Grid);
    }
}
