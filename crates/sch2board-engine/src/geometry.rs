//! Layout-space geometry in integer nanometres.

use serde::{Deserialize, Serialize};

/// Board length unit: one nanometre.
pub type Nm = i64;

const NM_PER_MM: f64 = 1_000_000.0;

pub fn mm_to_nm(mm: f64) -> Nm {
    (mm * NM_PER_MM).round() as Nm
}

pub fn nm_to_mm(nm: Nm) -> f64 {
    nm as f64 / NM_PER_MM
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: Nm,
    pub y: Nm,
}

impl Point {
    pub const fn new(x: Nm, y: Nm) -> Self {
        Self { x, y }
    }

    pub fn from_mm(x: f64, y: f64) -> Self {
        Self::new(mm_to_nm(x), mm_to_nm(y))
    }

    /// Translate by `(dx, dy)`, saturating at the ends of the coordinate range
    pub const fn offset(self, dx: Nm, dy: Nm) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Squared distance, widened so board-sized coordinates cannot overflow
    pub fn distance_squared(self, other: Point) -> i128 {
        let dx = self.x as i128 - other.x as i128;
        let dy = self.y as i128 - other.y as i128;
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle with inclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Rectangle spanning two corners in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_origin_size(origin: Point, width: Nm, height: Nm) -> Self {
        Self::from_corners(origin, origin.offset(width, height))
    }

    pub fn from_center_half_extents(center: Point, half_width: Nm, half_height: Nm) -> Self {
        Self::from_corners(
            center.offset(-half_width, -half_height),
            center.offset(half_width, half_height),
        )
    }

    pub fn width(&self) -> Nm {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn height(&self) -> Nm {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Grow by `amount` on every side
    pub fn inflate(&self, amount: Nm) -> Self {
        Self {
            min: self.min.offset(-amount, -amount),
            max: self.max.offset(amount, amount),
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Whether the rectangles share any point; touching edges count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x.max(other.min.x) <= self.max.x.min(other.max.x)
            && self.min.y.max(other.min.y) <= self.max.y.min(other.max.y)
    }
}
