//! Per-frame snapshot of targetable entities.
use bevy::prelude::*;
use hashbrown::HashMap;

use crate::handle::ActorHandle;
use crate::ignore_set::IgnoreSet;
use crate::world::{first_hit, CombatWorld, Sweep, TargetBody};

use super::components::Targetable;

/// Targetable entities as seen at the start of a system run.
///
/// Implements [`CombatWorld`] so the lock-on core can query the ECS without
/// borrowing it.
#[derive(Debug, Default, Clone)]
pub struct EcsScene {
    bodies: HashMap<ActorHandle, (Entity, TargetBody)>,
}

impl EcsScene {
    /// Snapshots `targets`.
    pub fn collect<'a>(
        targets: impl IntoIterator<Item = (Entity, &'a Transform, &'a Targetable)>,
    ) -> Self {
        let bodies = targets
            .into_iter()
            .map(|(entity, transform, targetable)| {
                let body = TargetBody {
                    position: transform.translation,
                    radius: targetable.radius,
                    channel: targetable.channel,
                };
                (ActorHandle::from(entity), (entity, body))
            })
            .collect();
        Self { bodies }
    }

    /// Entity behind `handle`, if it was in the snapshot.
    #[must_use]
    pub fn entity(&self, handle: ActorHandle) -> Option<Entity> {
        self.bodies.get(&handle).map(|(entity, _)| *entity)
    }

    /// Number of targetable entities captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether nothing targetable was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl CombatWorld for EcsScene {
    fn actor_position(&self, actor: ActorHandle) -> Option<Vec3> {
        self.bodies.get(&actor).map(|(_, body)| body.position)
    }

    fn cast_sphere(&self, sweep: Sweep, exclude: &IgnoreSet) -> Option<ActorHandle> {
        first_hit(
            self.bodies.iter().map(|(handle, (_, body))| (*handle, body)),
            sweep,
            exclude,
        )
    }
}
