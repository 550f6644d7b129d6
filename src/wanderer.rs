use std::fmt;
use render::{Aabb, Bitmap, Color, V2f};
use scene::{PositionSource, Screen};

/// Box that drifts at constant velocity and bounces off the world edges.
#[derive(Copy, Clone, Debug)]
pub struct Wanderer {
    pub pos: V2f,
    pub vel: V2f,
    pub size: V2f,
    bounds: V2f,
}

impl Wanderer {
    pub fn new(pos: V2f, vel: V2f, bounds: V2f) -> Self {
        Self {
            pos,
            vel,
            size: V2f::new(12.0, 12.0),
            bounds,
        }
    }

    pub fn aabb(&self) -> Aabb<f32> {
        Aabb::from_center(self.pos, self.size)
    }

    pub fn update(&mut self, dt: f32) {
        let half = self.size * 0.5;
        self.pos += self.vel * dt;

        if self.pos.x < half.x {
            self.pos.x = half.x;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > self.bounds.x - half.x {
            self.pos.x = self.bounds.x - half.x;
            self.vel.x = -self.vel.x.abs();
        }

        if self.pos.y < half.y {
            self.pos.y = half.y;
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y > self.bounds.y - half.y {
            self.pos.y = self.bounds.y - half.y;
            self.vel.y = -self.vel.y.abs();
        }
    }

    pub fn draw(&self, screen: &mut Screen<Bitmap>) {
        let aabb = self.aabb();
        screen.draw_world_rect(aabb.top_left(), aabb.size(), true, Color::YELLOW);
        screen.draw_world_rect(aabb.top_left(), aabb.size(), false, Color::RED);
    }
}

impl PositionSource for Wanderer {
    fn position(&self) -> V2f {
        self.pos
    }
}

impl fmt::Display for Wanderer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "pos: ({:>+5.2}, {:>+5.2}), vel: ({:>+5.2}, {:>+5.2})",
            self.pos.x, self.pos.y, self.vel.x, self.vel.y,
        )
    }
}
