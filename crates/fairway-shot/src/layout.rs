//! Static per-hole geometry the supervisor checks a settled ball against.

use glam::Vec3;

/// Axis-aligned box in course space.
///
/// Invariant: `min <= max` on every axis; [`Aabb::new`] sorts the corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two opposite corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        let half = half.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inside or on the boundary.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// World axis along which a ball is slid out of an illegal zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// A region the ball may not be played from, with the spot it is moved to.
///
/// Only the coordinate on `axis` is replaced by the landing spot's; the ball
/// keeps its other two coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IllegalZone {
    pub bounds: Aabb,
    pub axis: Axis,
    pub landing_spot: Vec3,
}

impl IllegalZone {
    /// Where a ball at `position` inside this zone ends up.
    pub fn relocate(&self, position: Vec3) -> Vec3 {
        let mut out = position;
        let i = self.axis.index();
        out[i] = self.landing_spot[i];
        out
    }
}

/// Everything the shot core needs to know about the current hole.
#[derive(Debug, Clone, PartialEq)]
pub struct HoleLayout {
    /// Hole number, for logging.
    pub number: u32,
    /// Where the ball is teed up.
    pub tee: Vec3,
    /// Heading the golfer takes for the first stroke of the hole.
    pub starting_heading: f32,
    /// Volume that counts as "in the cup".
    pub hole_sensor: Aabb,
    /// Regions a settled ball is moved out of.
    pub illegal_zones: Vec<IllegalZone>,
}

impl HoleLayout {
    /// The first illegal zone containing `position`, if any.
    pub fn illegal_zone_at(&self, position: Vec3) -> Option<&IllegalZone> {
        self.illegal_zones
            .iter()
            .find(|zone| zone.bounds.contains(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_new_sorts_corners() {
        let aabb = Aabb::new(Vec3::new(5.0, -1.0, 2.0), Vec3::new(-5.0, 1.0, -2.0));
        assert_eq!(aabb.min, Vec3::new(-5.0, -1.0, -2.0));
        assert_eq!(aabb.max, Vec3::new(5.0, 1.0, 2.0));
    }

    #[test]
    fn test_aabb_contains_boundary() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains(Vec3::ZERO));
        assert!(aabb.contains(Vec3::new(1.0, 1.0, 1.0)));
        assert!(!aabb.contains(Vec3::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn test_relocate_replaces_single_axis() {
        let zone = IllegalZone {
            bounds: Aabb::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(4.0, 1.0, 10.0)),
            axis: Axis::X,
            landing_spot: Vec3::new(-1.0, 50.0, 50.0),
        };
        let moved = zone.relocate(Vec3::new(2.0, 0.1, 7.0));
        assert_eq!(moved, Vec3::new(-1.0, 0.1, 7.0));
    }

    #[test]
    fn test_illegal_zone_lookup() {
        let layout = HoleLayout {
            number: 1,
            tee: Vec3::ZERO,
            starting_heading: 0.0,
            hole_sensor: Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -20.0), Vec3::splat(0.1)),
            illegal_zones: vec![IllegalZone {
                bounds: Aabb::new(Vec3::new(2.0, -1.0, -5.0), Vec3::new(3.0, 1.0, -3.0)),
                axis: Axis::Z,
                landing_spot: Vec3::new(0.0, 0.0, -2.5),
            }],
        };
        assert!(layout.illegal_zone_at(Vec3::new(2.5, 0.0, -4.0)).is_some());
        assert!(layout.illegal_zone_at(Vec3::new(0.0, 0.0, -4.0)).is_none());
    }
}
