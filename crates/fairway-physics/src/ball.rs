//! The golf ball as a Rapier dynamic body, exposed to the shot core through
//! [`BallBody`].

use fairway_shot::BallBody;
use glam::Vec3;
use rapier3d::prelude::*;

use crate::PhysicsWorld;

/// Physical properties of the ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSpec {
    pub radius: f32,
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Rolling resistance stand-in so the ball actually stops on flat ground.
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for BallSpec {
    fn default() -> Self {
        Self {
            radius: 0.05,
            mass: 1.0,
            friction: 0.6,
            restitution: 0.4,
            linear_damping: 0.6,
            angular_damping: 1.5,
        }
    }
}

/// Rapier handles of a spawned ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallHandles {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

/// Spawns the ball at `position` with CCD enabled.
pub fn spawn_ball(world: &mut PhysicsWorld, spec: &BallSpec, position: Vec3) -> BallHandles {
    let body = RigidBodyBuilder::dynamic()
        .translation(Vector::new(position.x, position.y, position.z))
        .linear_damping(spec.linear_damping)
        .angular_damping(spec.angular_damping)
        .ccd_enabled(true)
        .build();
    let body = world.rigid_body_set.insert(body);

    let collider = ColliderBuilder::ball(spec.radius)
        .mass(spec.mass)
        .friction(spec.friction)
        .restitution(spec.restitution)
        .build();
    let collider = world
        .collider_set
        .insert_with_parent(collider, body, &mut world.rigid_body_set);

    BallHandles { body, collider }
}

/// Borrow of the world scoped to the ball body.
///
/// A missing body reads as a motionless ball at the origin and ignores writes.
pub struct RapierBall<'a> {
    world: &'a mut PhysicsWorld,
    body: RigidBodyHandle,
}

impl<'a> RapierBall<'a> {
    pub fn new(world: &'a mut PhysicsWorld, body: RigidBodyHandle) -> Self {
        Self { world, body }
    }

    fn body(&self) -> Option<&RigidBody> {
        self.world.rigid_body_set.get(self.body)
    }

    fn body_mut(&mut self) -> Option<&mut RigidBody> {
        self.world.rigid_body_set.get_mut(self.body)
    }

    pub fn is_sleeping(&self) -> bool {
        self.body().is_some_and(|b| b.is_sleeping())
    }
}

impl BallBody for RapierBall<'_> {
    fn position(&self) -> Vec3 {
        self.body().map_or(Vec3::ZERO, |b| {
            let t = b.translation();
            Vec3::new(t.x, t.y, t.z)
        })
    }

    /// Leaves a body Rapier already put to sleep asleep at its new spot.
    fn set_position(&mut self, position: Vec3) {
        if let Some(body) = self.body_mut() {
            body.set_translation(Vector::new(position.x, position.y, position.z), false);
        }
    }

    fn linear_velocity(&self) -> Vec3 {
        self.body().map_or(Vec3::ZERO, |b| {
            let v = b.linvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    fn angular_velocity(&self) -> Vec3 {
        self.body().map_or(Vec3::ZERO, |b| {
            let v = b.angvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        if let Some(body) = self.body_mut() {
            body.apply_impulse(Vector::new(impulse.x, impulse.y, impulse.z), true);
        }
    }

    /// Zeroes the velocities only. The island manager decides when the body
    /// actually sleeps; flagging it here desyncs the active set.
    fn put_to_sleep(&mut self) {
        if let Some(body) = self.body_mut() {
            body.set_linvel(Vector::new(0.0, 0.0, 0.0), false);
            body.set_angvel(Vector::new(0.0, 0.0, 0.0), false);
        }
    }
}
