//! Golfer avatar pose: where it stands, which way it faces, and the club wind-up.

use glam::{Quat, Vec3};

/// Pose of the golfer and club, written by the swing controller and supervisor
/// and read by whatever renders them.
#[derive(Debug, Clone, PartialEq)]
pub struct Golfer {
    /// World-space position (placed on the ball before every swing).
    pub position: Vec3,
    /// Yaw around +Y in radians. Zero faces -Z.
    pub heading: f32,
    /// Club wind-up angle in degrees. Zero is the club at address.
    pub club_angle: f32,
    /// Whether the club is shown and active.
    pub club_visible: bool,
}

impl Default for Golfer {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            heading: 0.0,
            club_angle: 0.0,
            club_visible: false,
        }
    }
}

impl Golfer {
    /// Body orientation as a quaternion.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.heading)
    }

    /// Horizontal unit vector the golfer faces, used as the strike direction.
    ///
    /// The vertical component is dropped and the rest renormalised. Falls back
    /// to -Z if the body somehow faces straight up or down.
    pub fn strike_direction(&self) -> Vec3 {
        let mut forward = self.rotation() * Vec3::NEG_Z;
        forward.y = 0.0;
        let flat = forward.normalize_or_zero();
        if flat == Vec3::ZERO { Vec3::NEG_Z } else { flat }
    }

    /// Turns the golfer by `degrees` (positive turns left, counter-clockwise
    /// seen from above).
    pub fn rotate(&mut self, degrees: f32) {
        self.heading = (self.heading + degrees.to_radians()).rem_euclid(std::f32::consts::TAU);
    }
}

/// Heading that makes a golfer at `from` face `to`, ignoring height.
pub fn heading_towards(from: Vec3, to: Vec3) -> f32 {
    let delta = to - from;
    if delta.x.abs() < f32::EPSILON && delta.z.abs() < f32::EPSILON {
        return 0.0;
    }
    // Forward is -Z rotated by heading: (-sin h, 0, -cos h).
    (-delta.x).atan2(-delta.z)
}
