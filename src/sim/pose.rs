//! Card transform and smoothed motion
//!
//! Every card animates by exponential approach: each tick the current value
//! moves a fixed fraction of the remaining distance toward its target, so
//! motion eases out and converges without overshooting.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::normalize_deg;

/// A card's transform relative to the pack
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pose {
    /// Local position
    pub position: Vec3,
    /// Flip angle about the vertical axis, degrees in [0, 360).
    /// 0 = face-down, 180 = face fully toward the viewer.
    pub flip_deg: f32,
    /// Resting tilt about the depth axis, degrees
    pub roll_deg: f32,
    /// Local scale
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            flip_deg: 0.0,
            roll_deg: 0.0,
            scale: Vec3::ONE,
        }
    }
}

impl Pose {
    /// Approach `target` positionally at `rate` per second
    pub fn approach_position(&mut self, target: Vec3, rate: f32, dt: f32) {
        self.position = approach_vec(self.position, target, rate, dt);
    }

    /// Approach `target` scale at `rate` per second
    pub fn approach_scale(&mut self, target: Vec3, rate: f32, dt: f32) {
        self.scale = approach_vec(self.scale, target, rate, dt);
    }

    /// Approach a target flip angle at `rate` per second
    pub fn approach_flip(&mut self, target_deg: f32, rate: f32, dt: f32) {
        self.flip_deg = normalize_deg(approach_scalar(self.flip_deg, target_deg, rate, dt));
    }

    /// Approach a target roll angle at `rate` per second
    pub fn approach_roll(&mut self, target_deg: f32, rate: f32, dt: f32) {
        self.roll_deg = approach_scalar(self.roll_deg, target_deg, rate, dt);
    }

    /// Distance from a positional target
    #[inline]
    pub fn distance_to(&self, target: Vec3) -> f32 {
        (self.position - target).length()
    }

    /// Distance from a scale target
    #[inline]
    pub fn scale_distance_to(&self, target: Vec3) -> f32 {
        (self.scale - target).length()
    }
}

/// Move `current` toward `target` by the fraction `rate * dt` of the
/// remaining distance (clamped so a long frame cannot overshoot)
#[inline]
pub fn approach_vec(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current.lerp(target, (rate * dt).min(1.0))
}

/// Scalar version of [`approach_vec`]
#[inline]
pub fn approach_scalar(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_converges() {
        let mut pose = Pose::default();
        let target = Vec3::new(100.0, -50.0, 0.0);
        for _ in 0..200 {
            pose.approach_position(target, 3.0, 1.0 / 60.0);
        }
        assert!(pose.distance_to(target) < 1.0);
    }

    #[test]
    fn test_approach_never_overshoots() {
        let mut pose = Pose::default();
        let target = Vec3::new(10.0, 0.0, 0.0);
        // Huge dt clamps to the target instead of flying past it
        pose.approach_position(target, 3.0, 10.0);
        assert_eq!(pose.position, target);
    }

    #[test]
    fn test_flip_rises_monotonically() {
        let mut pose = Pose::default();
        let mut last = 0.0;
        for _ in 0..300 {
            pose.approach_flip(180.0, 3.0, 1.0 / 60.0);
            assert!(pose.flip_deg >= last);
            last = pose.flip_deg;
        }
        assert!(pose.flip_deg > 178.0);
    }

    #[test]
    fn test_flip_stays_normalized() {
        let mut pose = Pose {
            flip_deg: 179.0,
            ..Pose::default()
        };
        for _ in 0..300 {
            pose.approach_flip(0.0, 3.0, 1.0 / 60.0);
            assert!(pose.flip_deg >= 0.0 && pose.flip_deg < 360.0);
        }
        assert!(pose.flip_deg < 2.0);
    }
}
