//! Order in which candidates are placed.

/// A schematic symbol matched to a placeable footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCandidate {
    pub label: String,
    pub schematic_x: f64,
    pub schematic_y: f64,
    pub rotation: Option<f64>,
    /// Index of the footprint in the board's footprint list
    pub component: usize,
}

impl PlacementCandidate {
    fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.schematic_x - x).hypot(self.schematic_y - y)
    }
}

/// Seed with the topmost (then leftmost, then lowest label) candidate and
/// follow with the rest by increasing schematic distance from the seed,
/// ties broken by label.
pub fn visiting_order(candidates: Vec<PlacementCandidate>) -> Vec<PlacementCandidate> {
    let seed_index = candidates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.schematic_y
                .total_cmp(&b.schematic_y)
                .then(a.schematic_x.total_cmp(&b.schematic_x))
                .then_with(|| a.label.cmp(&b.label))
        })
        .map(|(i, _)| i);

    let Some(seed_index) = seed_index else {
        return Vec::new();
    };

    let mut rest = candidates;
    let seed = rest.swap_remove(seed_index);
    let (sx, sy) = (seed.schematic_x, seed.schematic_y);

    rest.sort_by(|a, b| {
        a.distance_to(sx, sy)
            .total_cmp(&b.distance_to(sx, sy))
            .then_with(|| a.label.cmp(&b.label))
    });

    let mut ordered = Vec::with_capacity(rest.len() + 1);
    ordered.push(seed);
    ordered.extend(rest);
    ordered
}
