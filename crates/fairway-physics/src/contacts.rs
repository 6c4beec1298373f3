//! Turns the narrow phase into enter/exit events for the ball.
//!
//! Rapier reports contact state, not transitions. After every physics step
//! [`ContactTracker::collect`] reads the ball's touching colliders and the
//! sensors it overlaps, diffs them against the previous step, and emits one
//! [`ContactEvent`] per change on a tagged collider.

use fairway_shot::{ContactEvent, SurfaceTag};
use rapier3d::prelude::*;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::PhysicsWorld;
use crate::surfaces::SurfaceMap;

/// Contact points further apart than this are speculative, not touching.
const TOUCH_DISTANCE: f32 = 0.01;

/// Remembers what the ball touched last step.
#[derive(Debug, Clone)]
pub struct ContactTracker {
    ball: ColliderHandle,
    touching: FxHashSet<ColliderHandle>,
    inside: FxHashSet<ColliderHandle>,
}

impl ContactTracker {
    pub fn new(ball: ColliderHandle) -> Self {
        Self {
            ball,
            touching: FxHashSet::default(),
            inside: FxHashSet::default(),
        }
    }

    /// Diffs the ball's current contacts against the last call.
    ///
    /// Exits are reported before enters. `impact_speed` is attached to every
    /// enter event; callers pass the ball's speed from before the step.
    pub fn collect(
        &mut self,
        world: &PhysicsWorld,
        surfaces: &SurfaceMap,
        impact_speed: f32,
    ) -> Vec<ContactEvent> {
        let touching: FxHashSet<ColliderHandle> = world
            .narrow_phase
            .contact_pairs_with(self.ball)
            .filter(|pair| {
                pair.manifolds
                    .iter()
                    .any(|m| m.contacts().iter().any(|c| c.dist <= TOUCH_DISTANCE))
            })
            .map(|pair| other(self.ball, pair.collider1, pair.collider2))
            .collect();

        let inside: FxHashSet<ColliderHandle> = world
            .narrow_phase
            .intersection_pairs_with(self.ball)
            .filter(|(_, _, intersecting)| *intersecting)
            .map(|(a, b, _)| other(self.ball, a, b))
            .collect();

        let mut events = Vec::new();

        for handle in self.touching.difference(&touching) {
            if let Some(tag) = surfaces.tag_of(*handle) {
                events.push(ContactEvent::SurfaceExit { tag });
            }
        }
        for handle in self.inside.difference(&inside) {
            if let Some(tag) = surfaces.tag_of(*handle) {
                events.push(ContactEvent::VolumeExit { tag });
            }
        }
        for handle in touching.difference(&self.touching) {
            if let Some(tag) = surfaces.tag_of(*handle) {
                events.push(ContactEvent::SurfaceEnter {
                    tag,
                    speed: impact_speed,
                });
            }
        }
        for handle in inside.difference(&self.inside) {
            if let Some(tag) = surfaces.tag_of(*handle) {
                events.push(ContactEvent::VolumeEnter {
                    tag,
                    speed: impact_speed,
                });
            }
        }

        for event in &events {
            trace!(?event, "ball contact");
        }

        self.touching = touching;
        self.inside = inside;
        events
    }

    /// Tagged surfaces the ball is touching right now.
    pub fn touching_tags<'a>(
        &'a self,
        surfaces: &'a SurfaceMap,
    ) -> impl Iterator<Item = SurfaceTag> + 'a {
        self.touching.iter().filter_map(|h| surfaces.tag_of(*h))
    }

    pub fn ball(&self) -> ColliderHandle {
        self.ball
    }
}

fn other(ball: ColliderHandle, a: ColliderHandle, b: ColliderHandle) -> ColliderHandle {
    if a == ball { b } else { a }
}
