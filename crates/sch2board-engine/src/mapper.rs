//! Schematic-to-board coordinate mapping.

use sch2board_schematic::SymbolRecord;

use crate::geometry::Point;
use crate::params::MAX_LENGTH_MM;

/// Smallest schematic extent used for fitting, so a single symbol or a
/// straight row of symbols still yields a finite scale.
const MIN_EXTENT: f64 = 1e-6;

/// Uniform scale plus offset from schematic millimetres to board units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub min_x: f64,
    pub min_y: f64,
    pub scale: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl CoordinateMapper {
    /// Fit the records into a `width` × `height` area whose top-left corner is
    /// at the origin. An explicit `scale` overrides the fit.
    ///
    /// Returns `None` when there are no records.
    pub fn fit<'a>(
        records: impl IntoIterator<Item = &'a SymbolRecord>,
        origin: (f64, f64),
        size: (f64, f64),
        scale: Option<f64>,
    ) -> Option<Self> {
        let mut iter = records.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for r in iter {
            min_x = min_x.min(r.x);
            max_x = max_x.max(r.x);
            min_y = min_y.min(r.y);
            max_y = max_y.max(r.y);
        }

        let extent_x = (max_x - min_x).max(MIN_EXTENT);
        let extent_y = (max_y - min_y).max(MIN_EXTENT);
        let scale = scale.unwrap_or_else(|| (size.0 / extent_x).min(size.1 / extent_y));

        Some(Self {
            min_x,
            min_y,
            scale,
            origin_x: origin.0,
            origin_y: origin.1,
        })
    }

    /// Board position in millimetres for a schematic point
    pub fn map_mm(&self, sx: f64, sy: f64) -> (f64, f64) {
        (
            self.origin_x + (sx - self.min_x) * self.scale,
            self.origin_y + (sy - self.min_y) * self.scale,
        )
    }

    /// Board position for a schematic point. Positions past the supported
    /// board range are pinned to its edge; they can never be inside the area.
    pub fn map(&self, sx: f64, sy: f64) -> Point {
        let (x, y) = self.map_mm(sx, sy);
        Point::from_mm(
            x.clamp(-MAX_LENGTH_MM, MAX_LENGTH_MM),
            y.clamp(-MAX_LENGTH_MM, MAX_LENGTH_MM),
        )
    }
}
