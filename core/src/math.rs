//! Position math and boundary clamping for the farm plane.
//!
//! The farm is a flat square centred on the origin. Chickens and eggs
//! live on the ground, so headings only ever span the X/Z axes; Y is
//! carried through untouched for the rendering collaborator.

use crate::rng::SimRng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Vec3) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` when the vector is
    /// too short to carry a direction.
    pub fn try_normalize(self, min_length: f64) -> Option<Vec3> {
        let len = self.length();
        if len > min_length && len.is_finite() {
            Some(self * (1.0 / len))
        } else {
            None
        }
    }

    /// Linear blend: `t = 0` returns `self`, `t = 1` returns `target`.
    pub fn lerp(self, target: Vec3, t: f64) -> Vec3 {
        self + (target - self) * t
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// The square region chickens may occupy: `[-half, half]` on X and Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneBounds {
    half_extent: f64,
}

impl PlaneBounds {
    /// Bounds for a square plane with side length `plane_size`.
    pub fn from_size(plane_size: f64) -> Self {
        Self { half_extent: plane_size * 0.5 }
    }

    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x.abs() <= self.half_extent && p.z.abs() <= self.half_extent
    }

    /// Clamp X and Z into the plane. No wrapping, no bouncing.
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        let h = self.half_extent;
        Vec3::new(p.x.clamp(-h, h), p.y, p.z.clamp(-h, h))
    }

    /// Uniform random point on the plane.
    pub fn random_point(&self, rng: &mut SimRng) -> Vec3 {
        let h = self.half_extent;
        Vec3::new(rng.range(-h, h), 0.0, rng.range(-h, h))
    }
}

/// Uniformly random unit heading on the ground plane.
pub fn random_direction(rng: &mut SimRng) -> Vec3 {
    let angle = rng.next_f64() * TAU;
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, RngSlot};

    #[test]
    fn clamp_pins_to_edges_without_wrapping() {
        let bounds = PlaneBounds::from_size(10.0);
        let p = bounds.clamp(Vec3::new(7.5, 1.0, -12.0));
        assert_eq!(p, Vec3::new(5.0, 1.0, -5.0));
    }

    #[test]
    fn random_direction_is_unit_length() {
        let mut rng = RngBank::new(3).for_slot(RngSlot::Flock);
        for _ in 0..1000 {
            let d = random_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-9);
            assert_eq!(d.y, 0.0);
        }
    }

    #[test]
    fn degenerate_vector_does_not_normalize() {
        assert!(Vec3::new(1e-6, 0.0, 0.0).try_normalize(1e-4).is_none());
        assert!(Vec3::ZERO.try_normalize(1e-4).is_none());
    }
}
