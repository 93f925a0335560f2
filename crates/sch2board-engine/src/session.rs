//! One placement run over a board.

use std::collections::HashMap;

use log::{debug, info, warn};
use serde::Serialize;

use sch2board_schematic::SymbolMap;

use crate::collision::CollisionIndex;
use crate::geometry::{Point, Rect};
use crate::host::{Footprint, Pose};
use crate::mapper::CoordinateMapper;
use crate::order::{visiting_order, PlacementCandidate};
use crate::params::{ParameterError, PlacementParameters};
use crate::search::{find_pose, PlacementMethod, SearchSettings};

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlacementOutcome {
    Placed {
        position: Point,
        orientation: f64,
        method: PlacementMethod,
        /// Clearance-inflated box the component now occupies
        bounds: Rect,
    },
    /// No free pose was found; the component was left untouched
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementReport {
    pub label: String,
    /// Mapped schematic position the search started from
    pub target: Point,
    #[serde(flatten)]
    pub outcome: PlacementOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementSummary {
    pub area: Rect,
    pub scale: f64,
    pub placed: usize,
    pub skipped: usize,
    /// One entry per candidate, in visiting order
    pub reports: Vec<PlacementReport>,
}

impl PlacementSummary {
    pub fn has_skips(&self) -> bool {
        self.skipped > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The schematic yielded no symbol records
    NoSymbols,
    /// No symbol matched an unlocked (and, if required, selected) footprint
    NoCandidates,
    Completed(PlacementSummary),
}

/// Validated parameters for placing schematic symbols onto a board.
#[derive(Debug, Clone)]
pub struct Session {
    params: PlacementParameters,
}

impl Session {
    pub fn new(params: PlacementParameters) -> Result<Self, ParameterError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PlacementParameters {
        &self.params
    }

    /// Symbols that have a movable footprint on the board, in map order.
    ///
    /// When several footprints share a reference the last one is used.
    pub fn candidates<F: Footprint>(
        &self,
        symbols: &SymbolMap,
        footprints: &[F],
    ) -> Vec<PlacementCandidate> {
        let by_reference: HashMap<&str, usize> = footprints
            .iter()
            .enumerate()
            .map(|(i, fp)| (fp.reference(), i))
            .collect();

        let mut candidates = Vec::new();
        for record in symbols.values() {
            let Some(&component) = by_reference.get(record.label.as_str()) else {
                debug!("No footprint for {}", record.label);
                continue;
            };
            let footprint = &footprints[component];
            if footprint.is_locked() {
                debug!("{} is locked", record.label);
                continue;
            }
            if self.params.only_selected && !footprint.is_selected() {
                continue;
            }
            candidates.push(PlacementCandidate {
                label: record.label.clone(),
                schematic_x: record.x,
                schematic_y: record.y,
                rotation: record.rotation,
                component,
            });
        }
        candidates
    }

    /// Move every candidate footprint to (or near) its schematic position.
    pub fn run<F: Footprint>(&self, symbols: &SymbolMap, footprints: &mut [F]) -> RunOutcome {
        let params = &self.params;
        let Some(mapper) = CoordinateMapper::fit(
            symbols.values(),
            (params.origin_x, params.origin_y),
            (params.width, params.height),
            params.scale,
        ) else {
            return RunOutcome::NoSymbols;
        };

        let candidates = self.candidates(symbols, footprints);
        if candidates.is_empty() {
            return RunOutcome::NoCandidates;
        }

        let area = params.area();
        let settings = SearchSettings::from(params);
        let mut index = CollisionIndex::new(area);
        let mut reports = Vec::with_capacity(candidates.len());

        debug!(
            "Placing {} candidates at scale {:.4} with {:?} search",
            candidates.len(),
            mapper.scale,
            settings.strategy
        );

        for candidate in visiting_order(candidates) {
            let footprint = &mut footprints[candidate.component];
            let orientation = match (params.use_rotation, candidate.rotation) {
                (true, Some(rotation)) => rotation,
                _ => footprint.orientation(),
            };
            let position = mapper.map(candidate.schematic_x, candidate.schematic_y);
            let target = Pose::new(position, orientation);

            let outcome = if params.avoid_collisions {
                match find_pose(&*footprint, target, &index, &settings) {
                    Some(found) => {
                        index.insert(found.bounds);
                        footprint.apply_pose(found.pose);
                        PlacementOutcome::Placed {
                            position: found.pose.position,
                            orientation: found.pose.orientation,
                            method: found.method,
                            bounds: found.bounds,
                        }
                    }
                    None => {
                        warn!("No free position for {}; leaving it where it is", candidate.label);
                        PlacementOutcome::Skipped
                    }
                }
            } else {
                footprint.apply_pose(target);
                PlacementOutcome::Placed {
                    position: target.position,
                    orientation: target.orientation,
                    method: PlacementMethod::Unchecked,
                    bounds: footprint.bounding_box().inflate(settings.clearance),
                }
            };

            reports.push(PlacementReport {
                label: candidate.label,
                target: target.position,
                outcome,
            });
        }

        let skipped = reports
            .iter()
            .filter(|r| r.outcome == PlacementOutcome::Skipped)
            .count();
        let summary = PlacementSummary {
            area,
            scale: mapper.scale,
            placed: reports.len() - skipped,
            skipped,
            reports,
        };
        info!("Placed {} components, skipped {}", summary.placed, summary.skipped);

        RunOutcome::Completed(summary)
    }
}
