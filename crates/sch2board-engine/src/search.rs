//! Search for a free pose close to a target.
//!
//! Every trial is pure: a candidate pose is turned into a clearance-inflated
//! box with [`Footprint::bounding_box_at`] and checked against the
//! [`CollisionIndex`]. Nothing is written to the footprint here.

use serde::Serialize;

use crate::collision::CollisionIndex;
use crate::geometry::{Nm, Point, Rect};
use crate::host::{Footprint, Pose};
use crate::params::{PlacementParameters, SearchStrategy};

/// Upper bound on rings searched around one target.
pub const MAX_RINGS: Nm = 1000;

/// How a placed component's pose was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMethod {
    /// The target pose was free
    Direct,
    /// First free compass point on the nearest ring
    Ring,
    /// Closest free rotated/nudged pose on the nearest ring
    Optimised,
    /// First free cell of the grid scan
    Grid,
    /// Collision avoidance was off
    Unchecked,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Found {
    pub pose: Pose,
    /// Clearance-inflated box at `pose`
    pub bounds: Rect,
    pub method: PlacementMethod,
}

/// The search-related subset of [`PlacementParameters`], in board units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub clearance: Nm,
    pub step: Nm,
    pub optimise: bool,
    pub rotation_step: f64,
    pub strategy: SearchStrategy,
}

impl From<&PlacementParameters> for SearchSettings {
    fn from(params: &PlacementParameters) -> Self {
        Self {
            clearance: params.clearance_nm(),
            step: params.grid_step_nm(),
            optimise: params.optimise,
            rotation_step: params.rotation_step,
            strategy: params.strategy,
        }
    }
}

struct Trial<'a, F: ?Sized> {
    footprint: &'a F,
    clearance: Nm,
    index: &'a CollisionIndex,
}

impl<F: Footprint + ?Sized> Trial<'_, F> {
    fn at(&self, pose: Pose) -> Option<Rect> {
        let bounds = self.footprint.bounding_box_at(pose).inflate(self.clearance);
        self.index.is_free(&bounds).then_some(bounds)
    }
}

/// Find a free pose for `footprint`, trying `target` itself first.
///
/// Returns `None` when nothing within the search bound fits.
pub fn find_pose<F: Footprint + ?Sized>(
    footprint: &F,
    target: Pose,
    index: &CollisionIndex,
    settings: &SearchSettings,
) -> Option<Found> {
    let trial = Trial {
        footprint,
        clearance: settings.clearance,
        index,
    };

    if let Some(bounds) = trial.at(target) {
        return Some(Found {
            pose: target,
            bounds,
            method: PlacementMethod::Direct,
        });
    }

    match settings.strategy {
        SearchStrategy::Ring if settings.optimise => {
            optimised_ring_search(&trial, target, settings)
        }
        SearchStrategy::Ring => ring_search(&trial, target, settings.step),
        SearchStrategy::Grid => grid_search(&trial, target, settings.step),
    }
}

/// Number of rings that cover the area, capped at [`MAX_RINGS`].
pub fn ring_count(area: &Rect, step: Nm) -> Nm {
    let span = area.width().max(area.height());
    (span / step.max(1) + 1).min(MAX_RINGS)
}

/// Offsets of the eight compass points at `delta`: W, E, N, S, NW, NE, SW, SE.
pub fn ring_offsets(delta: Nm) -> [(Nm, Nm); 8] {
    [
        (-delta, 0),
        (delta, 0),
        (0, -delta),
        (0, delta),
        (-delta, -delta),
        (delta, -delta),
        (-delta, delta),
        (delta, delta),
    ]
}

fn ring_search<F: Footprint + ?Sized>(
    trial: &Trial<'_, F>,
    target: Pose,
    step: Nm,
) -> Option<Found> {
    let rings = ring_count(&trial.index.area(), step);

    for r in 1..=rings {
        for (dx, dy) in ring_offsets(r.saturating_mul(step)) {
            let pose = Pose::new(target.position.offset(dx, dy), target.orientation);
            if let Some(bounds) = trial.at(pose) {
                return Some(Found {
                    pose,
                    bounds,
                    method: PlacementMethod::Ring,
                });
            }
        }
    }

    None
}

/// Like [`ring_search`], but every ring point is also tried at ±`rotation_step`
/// and nudged half a step in each cardinal direction. The pose closest to the
/// target wins, considering only the first ring with any free pose.
fn optimised_ring_search<F: Footprint + ?Sized>(
    trial: &Trial<'_, F>,
    target: Pose,
    settings: &SearchSettings,
) -> Option<Found> {
    let step = settings.step;
    let rings = ring_count(&trial.index.area(), step);
    let turns: &[f64] = if settings.rotation_step == 0.0 {
        &[0.0]
    } else {
        &[0.0, settings.rotation_step, -settings.rotation_step]
    };
    let half = (step / 2).max(1);
    let nudges = [(0, 0), (half, 0), (-half, 0), (0, half), (0, -half)];

    for r in 1..=rings {
        let mut best: Option<(i128, Found)> = None;

        for (dx, dy) in ring_offsets(r.saturating_mul(step)) {
            let ring_point = target.position.offset(dx, dy);
            for turn in turns {
                let orientation = target.orientation + turn;
                for (nx, ny) in nudges {
                    let pose = Pose::new(ring_point.offset(nx, ny), orientation);
                    let Some(bounds) = trial.at(pose) else {
                        continue;
                    };
                    let d2 = pose.position.distance_squared(target.position);
                    if best.as_ref().map_or(true, |(best_d2, _)| d2 < *best_d2) {
                        best = Some((
                            d2,
                            Found {
                                pose,
                                bounds,
                                method: PlacementMethod::Optimised,
                            },
                        ));
                    }
                }
            }
        }

        if let Some((_, found)) = best {
            return Some(found);
        }
    }

    None
}

/// Scan the area grid row by row, starting from the cell containing the
/// target. The grid is anchored at the area's top-left corner.
fn grid_search<F: Footprint + ?Sized>(
    trial: &Trial<'_, F>,
    target: Pose,
    step: Nm,
) -> Option<Found> {
    let area = trial.index.area();
    let snap = |v: Nm, base: Nm| v.saturating_sub(v.saturating_sub(base).rem_euclid(step));

    let start = Point::new(
        area.min.x.max(snap(target.position.x, area.min.x)),
        area.min.y.max(snap(target.position.y, area.min.y)),
    );
    let max_rows = (area.height() / step).max(1);
    let max_cols = (area.width() / step).max(1);

    let mut y = start.y;
    let mut rows = 0;
    while y <= area.max.y && rows <= max_rows {
        let mut x = start.x;
        let mut cols = 0;
        while x <= area.max.x && cols <= max_cols {
            let pose = Pose::new(Point::new(x, y), target.orientation);
            if let Some(bounds) = trial.at(pose) {
                return Some(Found {
                    pose,
                    bounds,
                    method: PlacementMethod::Grid,
                });
            }
            x = x.saturating_add(step);
            cols += 1;
        }
        y = y.saturating_add(step);
        rows += 1;
    }

    None
}
