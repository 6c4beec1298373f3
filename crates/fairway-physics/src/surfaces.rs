//! Course colliders and the surface tag each one carries.

use fairway_shot::SurfaceTag;
use glam::Vec3;
use rapier3d::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::PhysicsWorld;

/// Friction for every static course surface.
const GROUND_FRICTION: f32 = 0.8;
/// Bounce of boundary walls; ground surfaces are dead.
const WALL_RESTITUTION: f32 = 0.6;

/// Collider handle → surface tag lookup. Colliders without an entry are
/// invisible to the shot core.
#[derive(Debug, Default, Clone)]
pub struct SurfaceMap {
    tags: FxHashMap<ColliderHandle, SurfaceTag>,
}

impl SurfaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: ColliderHandle, tag: SurfaceTag) {
        self.tags.insert(handle, tag);
    }

    /// Tags `handle` from a scene tag name. Unknown names leave the collider
    /// untagged and return `None`.
    pub fn insert_named(&mut self, handle: ColliderHandle, name: &str) -> Option<SurfaceTag> {
        match SurfaceTag::parse(name) {
            Some(tag) => {
                self.insert(handle, tag);
                Some(tag)
            }
            None => {
                warn!(name, "unknown surface tag, collider left untagged");
                None
            }
        }
    }

    pub fn tag_of(&self, handle: ColliderHandle) -> Option<SurfaceTag> {
        self.tags.get(&handle).copied()
    }

    pub fn remove(&mut self, handle: ColliderHandle) -> Option<SurfaceTag> {
        self.tags.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Adds a fixed solid box centred at `center` and tags it.
pub fn add_ground(
    world: &mut PhysicsWorld,
    surfaces: &mut SurfaceMap,
    center: Vec3,
    half_extents: Vec3,
    tag: SurfaceTag,
) -> ColliderHandle {
    let restitution = if tag == SurfaceTag::Walls {
        WALL_RESTITUTION
    } else {
        0.0
    };
    let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        .translation(Vector::new(center.x, center.y, center.z))
        .friction(GROUND_FRICTION)
        .restitution(restitution)
        .build();
    let handle = world.collider_set.insert(collider);
    surfaces.insert(handle, tag);
    debug!(surface = tag.name(), ?center, "course surface added");
    handle
}

/// Adds a fixed sensor box (water, cup) centred at `center` and tags it.
pub fn add_volume(
    world: &mut PhysicsWorld,
    surfaces: &mut SurfaceMap,
    center: Vec3,
    half_extents: Vec3,
    tag: SurfaceTag,
) -> ColliderHandle {
    let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        .translation(Vector::new(center.x, center.y, center.z))
        .sensor(true)
        .build();
    let handle = world.collider_set.insert(collider);
    surfaces.insert(handle, tag);
    debug!(surface = tag.name(), ?center, "course volume added");
    handle
}
