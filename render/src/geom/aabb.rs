use super::vector::{Num32, V2};

/// Axis-aligned bounding box in y-down coordinates
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb<T: Num32> {
    pub min: V2<T>,
    pub max: V2<T>,
}

impl<T: Num32> Aabb<T> {
    pub fn left(self)   -> T { self.min.x }
    pub fn right(self)  -> T { self.max.x }
    pub fn top(self)    -> T { self.min.y }
    pub fn bottom(self) -> T { self.max.y }

    pub fn top_left(self) -> V2<T> { self.min }

    pub fn size(self) -> V2<T> { self.max - self.min }

    /// Inclusive on every edge.
    pub fn contains(self, p: V2<T>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Aabb<f32> {
    pub fn from_center(center: V2<f32>, size: V2<f32>) -> Self {
        let half = size * 0.5;
        Self { min: center - half, max: center + half }
    }
}
