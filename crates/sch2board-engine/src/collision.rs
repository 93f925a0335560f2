use crate::geometry::Rect;

/// Boxes already claimed during one placement run, and the area they must
/// stay inside. Boxes are only ever added.
#[derive(Debug, Clone)]
pub struct CollisionIndex {
    area: Rect,
    placed: Vec<Rect>,
}

impl CollisionIndex {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            placed: Vec::new(),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Whether `candidate` fits in the area without touching a claimed box
    pub fn is_free(&self, candidate: &Rect) -> bool {
        self.area.contains_rect(candidate) && !self.placed.iter().any(|r| r.intersects(candidate))
    }

    pub fn insert(&mut self, rect: Rect) {
        self.placed.push(rect);
    }

    pub fn placed(&self) -> &[Rect] {
        &self.placed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}
