//! # Shaker
//!
//! Screen shake. A shake starts at full strength and decays linearly to
//! nothing over one second of fixed-rate updates.

use rand::{rngs::StdRng, Rng, SeedableRng};
use render::V2f;
use tracing::debug;
use utils::lerp;
use crate::config::ShakeConfig;

pub const DEFAULT_MAX_INTENSITY: f32 = 10.0;
pub const DEFAULT_FRAME_RATE: f32 = 60.0;

#[derive(Clone, Debug)]
pub struct Shaker<R: Rng = StdRng> {
    /// Progress through the current shake; at 1 or above nothing shakes.
    intensity: f32,
    max_intensity: f32,
    /// Starting amplitude relative to `max_intensity`.
    duration: f32,
    /// Seconds per update.
    step: f32,
    rng: R,
}

impl Shaker<StdRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &ShakeConfig) -> Self {
        let mut shaker = Self::new(config.seed);
        shaker.set_shake_intensity(config.max_intensity);
        shaker.set_frame_rate(config.frame_rate);
        shaker
    }
}

impl Default for Shaker<StdRng> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<R: Rng> Shaker<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            intensity: 1.0,
            max_intensity: DEFAULT_MAX_INTENSITY,
            duration: 1.0,
            step: 1.0 / DEFAULT_FRAME_RATE,
            rng,
        }
    }

    pub fn shake(&mut self) {
        debug!(max = self.max_intensity, "shake started");
        self.intensity = 0.0;
    }

    /// 10.0 is very intense, 1.0 barely visible. The starting amplitude is
    /// `max * max / 10`.
    pub fn set_shake_intensity(&mut self, max: f32) {
        self.max_intensity = max;
        self.duration = max / 10.0;
    }

    pub fn max_intensity(&self) -> f32 {
        self.max_intensity
    }

    /// Frame rate the decay is timed against; non-positive rates are ignored.
    pub fn set_frame_rate(&mut self, fps: f32) {
        if fps > 0.0 {
            self.step = 1.0 / fps;
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.intensity < 1.0
    }

    /// Advances the shake by one fixed step.
    pub fn update(&mut self) {
        if self.is_shaking() {
            self.intensity += self.step;
        }
    }

    /// Random displacement for this frame, zero when not shaking.
    pub fn offsets(&mut self) -> V2f {
        if !self.is_shaking() {
            return V2f::ZERO;
        }
        let amplitude = self.max_intensity * lerp(self.duration, 0.0, self.intensity);
        let mut jitter = || amplitude * (2.0 * self.rng.gen::<f32>() - 1.0);
        let x = jitter();
        let y = jitter();
        V2f::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_shaker_is_still() {
        let mut shaker = Shaker::new(1);
        assert!(!shaker.is_shaking());
        assert_eq!(shaker.offsets(), V2f::ZERO);
    }

    #[test]
    fn offsets_stay_within_decaying_amplitude() {
        let mut shaker = Shaker::new(2);
        shaker.set_shake_intensity(4.0);
        shaker.shake();
        let mut frame = 0.0;
        while shaker.is_shaking() {
            let amplitude = 4.0 * 0.4 * (1.0 - frame / 60.0) + 1e-4;
            let off = shaker.offsets();
            assert!(off.x.abs() <= amplitude && off.y.abs() <= amplitude, "{} > {}", off, amplitude);
            shaker.update();
            frame += 1.0;
        }
        assert!(frame >= 59.0 && frame <= 61.0);
        assert_eq!(shaker.offsets(), V2f::ZERO);
    }

    #[test]
    fn shake_ends_after_one_second_of_updates() {
        let mut shaker = Shaker::new(3);
        shaker.set_frame_rate(30.0);
        shaker.shake();
        for _ in 0..31 {
            shaker.update();
        }
        assert!(!shaker.is_shaking());
    }

    #[test]
    fn same_seed_same_shake() {
        let mut a = Shaker::new(42);
        let mut b = Shaker::new(42);
        a.shake();
        b.shake();
        for _ in 0..10 {
            assert_eq!(a.offsets(), b.offsets());
            a.update();
            b.update();
        }
    }

    #[test]
    fn shaking_actually_moves() {
        let mut shaker = Shaker::new(5);
        shaker.shake();
        let moved = (0..10).map(|_| shaker.offsets()).any(|off| off != V2f::ZERO);
        assert!(moved);
    }

    #[test]
    fn config_sets_rate_and_strength() {
        let config = ShakeConfig { max_intensity: 2.0, frame_rate: 10.0, seed: 9 };
        let mut shaker = Shaker::from_config(&config);
        assert_eq!(shaker.max_intensity(), 2.0);
        shaker.shake();
        for _ in 0..11 {
            shaker.update();
        }
        assert!(!shaker.is_shaking());
    }
}
