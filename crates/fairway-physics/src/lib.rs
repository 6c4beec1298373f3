//! Course physics on Rapier: the world, tagged course colliders, the ball
//! body, and the tracker that turns narrow-phase pairs into surface events.

pub mod ball;
pub mod contacts;
pub mod surfaces;

pub use ball::{BallHandles, BallSpec, RapierBall, spawn_ball};
pub use contacts::ContactTracker;
pub use surfaces::{SurfaceMap, add_ground, add_volume};

use glam::Vec3;
use rapier3d::prelude::*;

/// Step length of a world built with [`PhysicsWorld::new`].
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Standard gravity along -Y.
pub const STANDARD_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Every Rapier set the course needs, stepped as one unit.
///
/// Fields stay public so course builders and the contact tracker can reach
/// the sets Rapier's APIs take by reference.
pub struct PhysicsWorld {
    pub gravity: Vector,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    /// Keeps a driven ball from tunnelling through course walls.
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_timestep(DEFAULT_TIMESTEP)
    }

    /// A world advancing `dt` seconds per [`PhysicsWorld::step`]. Pass the
    /// session's fixed step so both clocks agree.
    pub fn with_timestep(dt: f32) -> Self {
        Self {
            gravity: Vector::new(STANDARD_GRAVITY.x, STANDARD_GRAVITY.y, STANDARD_GRAVITY.z),
            integration_parameters: IntegrationParameters {
                dt,
                ..Default::default()
            },
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// One fixed step. Contact pairs are read back through
    /// [`ContactTracker::collect`] afterwards, so no event handler is wired.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = Vector::new(gravity.x, gravity.y, gravity.z);
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::new(self.gravity.x, self.gravity.y, self.gravity.z)
    }

    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
