//! # Camera
//!
//! Keeps a followed target inside a focus box. When the target leaves the
//! box, the box slides just far enough to contain it again and the same
//! displacement is handed to a [`Mover`], normally the viewport.

use render::{Aabb, V2f};
use tracing::trace;

/// Something a position can be followed from, e.g. the player.
pub trait PositionSource {
    fn position(&self) -> V2f;
}

impl PositionSource for V2f {
    fn position(&self) -> V2f {
        *self
    }
}

/// Receives the displacement produced by [`Camera::update`].
pub trait Mover {
    fn move_by(&mut self, delta: V2f);
}

impl<F: FnMut(V2f)> Mover for F {
    fn move_by(&mut self, delta: V2f) {
        self(delta)
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    world_size: V2f,
    focus_size: V2f,
    focus_point: V2f,
    allow_out_of_bounds: bool,
}

impl Camera {
    pub fn new(world_size: V2f, focus_size: V2f, focus_point: V2f) -> Self {
        Self {
            world_size,
            focus_size,
            focus_point,
            allow_out_of_bounds: false,
        }
    }

    pub fn focus(&self) -> (V2f, V2f) {
        (self.focus_point, self.focus_size)
    }

    pub fn focus_point(&self) -> V2f {
        self.focus_point
    }

    pub fn focus_box(&self) -> Aabb<f32> {
        Aabb::from_center(self.focus_point, self.focus_size)
    }

    pub fn world_size(&self) -> V2f {
        self.world_size
    }

    pub fn overflow_allowed(&self) -> bool {
        self.allow_out_of_bounds
    }

    pub fn allow_overflow(&mut self, allowed: bool) {
        self.allow_out_of_bounds = allowed;
    }

    pub fn reset(&mut self, focus_point: V2f) {
        self.focus_point = focus_point;
    }

    /// Moves the focus box so it contains `target` and forwards the
    /// displacement to `mover` exactly once, even when it is zero.
    pub fn update<M>(&mut self, target: V2f, mover: &mut M) -> V2f
        where M: Mover + ?Sized
    {
        let focus = self.focus_box();
        let mut delta = V2f::ZERO;

        if target.x < focus.left() {
            delta.x = target.x - focus.left();
        } else if target.x > focus.right() {
            delta.x = target.x - focus.right();
        }

        if target.y < focus.top() {
            delta.y = target.y - focus.top();
        } else if target.y > focus.bottom() {
            delta.y = target.y - focus.bottom();
        }

        if !self.allow_out_of_bounds {
            delta += self.world_overflow(self.focus_point + delta);
        }

        self.focus_point += delta;
        if delta != V2f::ZERO {
            trace!(%target, %delta, focus = %self.focus_point, "camera moved");
        }
        mover.move_by(delta);
        delta
    }

    /// Correction that pulls a focus box centred on `p` back inside the world.
    /// The far edge wins when the box does not fit.
    fn world_overflow(&self, p: V2f) -> V2f {
        let focus = Aabb::from_center(p, self.focus_size);
        let mut correction = V2f::ZERO;

        if focus.left() < 0.0 {
            correction.x = -focus.left();
        }
        if focus.right() > self.world_size.x {
            correction.x = self.world_size.x - focus.right();
        }

        if focus.top() < 0.0 {
            correction.y = -focus.top();
        }
        if focus.bottom() > self.world_size.y {
            correction.y = self.world_size.y - focus.bottom();
        }

        correction
    }
}
