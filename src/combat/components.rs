//! ECS components for brawlers and the actors they can target.
//!
//! Brawler transforms follow the crate convention: `+Z` up, `+X` forward.
use bevy::prelude::*;

use crate::constants::FORWARD_AXIS;
use crate::handle::ActorHandle;
use crate::lock_on::LockOnCharacter;
use crate::tuning::TuningParameters;
use crate::world::CollisionChannel;

/// A player character driven by the lock-on logic.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
#[require(Transform, ViewForward)]
pub struct Brawler(pub LockOnCharacter);

impl Brawler {
    /// Builds the brawler component for an already spawned `entity`.
    #[must_use]
    pub fn for_entity(entity: Entity, owner: Option<Entity>, tuning: TuningParameters) -> Self {
        Self(LockOnCharacter::new(
            ActorHandle::from(entity),
            owner.map(ActorHandle::from),
            tuning,
        ))
    }
}

/// Forward vector of the camera following a brawler.
///
/// Written by whatever drives the camera rig; the selector flattens it.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct ViewForward(pub Vec3);

impl Default for ViewForward {
    fn default() -> Self {
        Self(FORWARD_AXIS)
    }
}

/// Marks an entity that targeting sweeps can hit.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Targetable {
    /// Radius of the entity's bounding sphere.
    pub radius: f32,
    /// Channel the entity blocks.
    pub channel: CollisionChannel,
}

impl Targetable {
    /// Camera-blocking target with the given bounding radius.
    #[must_use]
    pub const fn new(radius: f32) -> Self {
        Self {
            radius,
            channel: CollisionChannel::Camera,
        }
    }
}

/// Spawns a brawler at `transform` and wires its own handle.
pub fn spawn_brawler(
    commands: &mut Commands,
    transform: Transform,
    tuning: TuningParameters,
) -> Entity {
    let entity = commands.spawn((transform, ViewForward::default())).id();
    commands
        .entity(entity)
        .insert(Brawler::for_entity(entity, None, tuning));
    entity
}
