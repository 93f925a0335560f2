//! The view of the layout host's components that placement needs.

use crate::geometry::{Point, Rect};

/// Position and orientation of a component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Point,
    /// Degrees, counter-clockwise
    pub orientation: f64,
}

impl Pose {
    pub fn new(position: Point, orientation: f64) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// A placeable component on the layout surface.
///
/// Placement never mutates a footprint while searching: candidate poses are
/// evaluated through [`Footprint::bounding_box_at`] and only the chosen pose
/// is written back.
pub trait Footprint {
    /// Reference designator shared with the schematic symbol
    fn reference(&self) -> &str;

    fn position(&self) -> Point;

    fn set_position(&mut self, position: Point);

    /// Orientation in degrees
    fn orientation(&self) -> f64;

    fn set_orientation(&mut self, degrees: f64);

    /// Axis-aligned bounding box the component would occupy at `pose`
    fn bounding_box_at(&self, pose: Pose) -> Rect;

    fn is_locked(&self) -> bool;

    fn is_selected(&self) -> bool;

    fn pose(&self) -> Pose {
        Pose::new(self.position(), self.orientation())
    }

    /// Bounding box at the current pose
    fn bounding_box(&self) -> Rect {
        self.bounding_box_at(self.pose())
    }

    /// Commit a pose: orientation first, since it changes the box, then position.
    fn apply_pose(&mut self, pose: Pose) {
        self.set_orientation(pose.orientation);
        self.set_position(pose.position);
    }
}
