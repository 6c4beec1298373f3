//! The demo course: walled fairways laid out side by side along +X, built
//! into a Rapier world with every collider tagged.
//!
//! Hole layout (looking down, tee at the bottom):
//!
//! ```text
//!   +-----------+  z = -13  back wall
//!   |    (o)    |  z = -11  cup
//!   |        ~~ |  z = -7   pond (even holes)
//!   |  ::sand:: |  z = -4   sand strip (even holes)
//!   |           |
//!   |     T     |  z = 0    tee
//!   +-----------+  z = +1   front wall
//! ```
//!
//! Everything outside the walls is out-of-bounds ground, a little lower.

use fairway_physics::{
    BallHandles, BallSpec, ContactTracker, PhysicsWorld, SurfaceMap, add_ground, add_volume,
    spawn_ball,
};
use fairway_shot::{Aabb, Axis, HoleLayout, IllegalZone, SurfaceTag, heading_towards};
use glam::Vec3;
use tracing::info;

/// Distance between neighbouring holes along X.
const HOLE_SPACING: f32 = 40.0;
const FAIRWAY_HALF_WIDTH: f32 = 2.0;
const FRONT_Z: f32 = 1.0;
const BACK_Z: f32 = -13.0;
const CUP_Z: f32 = -11.0;
const SLAB_HALF_HEIGHT: f32 = 0.1;
const WALL_HALF_HEIGHT: f32 = 0.25;
const WALL_HALF_THICKNESS: f32 = 0.1;
/// Top of the out-of-bounds ground, below the fairway.
const OUT_OF_BOUNDS_TOP: f32 = -0.4;
/// Horizontal half-size of the region counted as "in the cup".
const CUP_HALF_SIZE: f32 = 0.35;

/// Physics world, collider tags, and the ball, plus the layout of every hole.
pub struct Course {
    pub world: PhysicsWorld,
    pub surfaces: SurfaceMap,
    pub ball: BallHandles,
    pub tracker: ContactTracker,
    layouts: Vec<HoleLayout>,
}

impl Course {
    /// Builds `hole_count` holes (at least one). The ball starts on the first
    /// tee, resting on the grass.
    pub fn build(hole_count: u32, ball_spec: &BallSpec, fixed_dt: f32) -> Self {
        let mut world = PhysicsWorld::with_timestep(fixed_dt);
        let mut surfaces = SurfaceMap::new();

        let layouts: Vec<HoleLayout> = (1..=hole_count.max(1))
            .map(|number| build_hole(&mut world, &mut surfaces, number, ball_spec.radius))
            .collect();

        let ball = spawn_ball(&mut world, ball_spec, layouts[0].tee);
        info!(
            holes = layouts.len(),
            colliders = surfaces.len(),
            "course built"
        );

        Self {
            world,
            surfaces,
            tracker: ContactTracker::new(ball.collider),
            ball,
            layouts,
        }
    }

    /// Layout of the first hole. `build` always lays out at least one.
    pub fn opening_hole(&self) -> &HoleLayout {
        &self.layouts[0]
    }

    /// Layout of hole `number` (1-based).
    pub fn layout(&self, number: u32) -> Option<&HoleLayout> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.layouts.get(index)
    }

    pub fn hole_count(&self) -> u32 {
        self.layouts.len() as u32
    }

    /// Centre of the cup on hole `number`.
    pub fn cup(&self, number: u32) -> Option<Vec3> {
        self.layout(number).map(|l| l.hole_sensor.center())
    }
}

fn hole_origin(number: u32) -> f32 {
    (number - 1) as f32 * HOLE_SPACING
}

fn build_hole(
    world: &mut PhysicsWorld,
    surfaces: &mut SurfaceMap,
    number: u32,
    ball_radius: f32,
) -> HoleLayout {
    let ox = hole_origin(number);
    let with_hazards = number % 2 == 0;
    let slab = |z_front: f32, z_back: f32| {
        let center = Vec3::new(ox, -SLAB_HALF_HEIGHT, (z_front + z_back) * 0.5);
        let half = Vec3::new(FAIRWAY_HALF_WIDTH, SLAB_HALF_HEIGHT, (z_front - z_back) * 0.5);
        (center, half)
    };

    if with_hazards {
        for (z_front, z_back, tag) in [
            (FRONT_Z, -3.0, SurfaceTag::Grass),
            (-3.0, -5.0, SurfaceTag::Sand),
            (-5.0, BACK_Z, SurfaceTag::Grass),
        ] {
            let (center, half) = slab(z_front, z_back);
            add_ground(world, surfaces, center, half, tag);
        }
        add_volume(
            world,
            surfaces,
            Vec3::new(ox + 1.3, 0.1, -7.0),
            Vec3::new(0.5, 0.15, 0.6),
            SurfaceTag::Water,
        );
    } else {
        let (center, half) = slab(FRONT_Z, BACK_Z);
        add_ground(world, surfaces, center, half, SurfaceTag::Grass);
    }

    let mid_z = (FRONT_Z + BACK_Z) * 0.5;
    let half_len = (FRONT_Z - BACK_Z) * 0.5;
    let wall_y = WALL_HALF_HEIGHT - SLAB_HALF_HEIGHT;
    for (center, half) in [
        (
            Vec3::new(ox - FAIRWAY_HALF_WIDTH - WALL_HALF_THICKNESS, wall_y, mid_z),
            Vec3::new(WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, half_len),
        ),
        (
            Vec3::new(ox + FAIRWAY_HALF_WIDTH + WALL_HALF_THICKNESS, wall_y, mid_z),
            Vec3::new(WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, half_len),
        ),
        (
            Vec3::new(ox, wall_y, BACK_Z - WALL_HALF_THICKNESS),
            Vec3::new(FAIRWAY_HALF_WIDTH + 0.2, WALL_HALF_HEIGHT, WALL_HALF_THICKNESS),
        ),
        (
            Vec3::new(ox, wall_y, FRONT_Z + WALL_HALF_THICKNESS),
            Vec3::new(FAIRWAY_HALF_WIDTH + 0.2, WALL_HALF_HEIGHT, WALL_HALF_THICKNESS),
        ),
    ] {
        add_ground(world, surfaces, center, half, SurfaceTag::Walls);
    }

    add_ground(
        world,
        surfaces,
        Vec3::new(ox, OUT_OF_BOUNDS_TOP - SLAB_HALF_HEIGHT, mid_z),
        Vec3::new(HOLE_SPACING * 0.5, SLAB_HALF_HEIGHT, half_len + 10.0),
        SurfaceTag::OutOfBounds,
    );

    let cup = Vec3::new(ox, ball_radius, CUP_Z);
    add_volume(
        world,
        surfaces,
        cup,
        Vec3::new(0.1, 0.1, 0.1),
        SurfaceTag::Hole,
    );

    let tee = Vec3::new(ox, ball_radius, 0.0);
    let mut illegal_zones = Vec::new();
    if with_hazards {
        // Tight against the back wall there is no room to swing.
        illegal_zones.push(IllegalZone {
            bounds: Aabb::new(
                Vec3::new(ox - FAIRWAY_HALF_WIDTH, -1.0, BACK_Z),
                Vec3::new(ox + FAIRWAY_HALF_WIDTH, 1.0, BACK_Z + 0.5),
            ),
            axis: Axis::Z,
            landing_spot: Vec3::new(ox, ball_radius, BACK_Z + 1.0),
        });
    }

    HoleLayout {
        number,
        tee,
        starting_heading: heading_towards(tee, cup),
        hole_sensor: Aabb::from_center_half_extents(
            cup,
            Vec3::new(CUP_HALF_SIZE, 0.2, CUP_HALF_SIZE),
        ),
        illegal_zones,
    }
}
