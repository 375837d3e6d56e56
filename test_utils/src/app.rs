//! Bevy apps preconfigured with the combat plugin.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use bevy::ecs::message::{Message, Messages};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use brawler::{Brawler, CombatPlugin, Targetable, TuningParameters, ViewForward};

/// Fixed frame step used by [`combat_app`].
pub const FRAME: Duration = Duration::from_millis(16);

/// App with `MinimalPlugins`, the combat plugin and a fixed frame step.
pub fn combat_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(CombatPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app
}

/// Spawns a brawler at `at` whose camera looks along `forward`.
pub fn spawn_player(app: &mut App, at: Vec3, forward: Vec3, tuning: TuningParameters) -> Entity {
    let world = app.world_mut();
    let entity = world
        .spawn((Transform::from_translation(at), ViewForward(forward)))
        .id();
    world
        .entity_mut(entity)
        .insert(Brawler::for_entity(entity, None, tuning));
    entity
}

/// Spawns a camera-blocking enemy at `at`.
pub fn spawn_enemy(app: &mut App, at: Vec3) -> Entity {
    app.world_mut()
        .spawn((Transform::from_translation(at), Targetable::new(40.0)))
        .id()
}

/// Current translation of `entity`.
///
/// # Panics
/// Panics if `entity` has no `Transform`.
pub fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .map(|transform| transform.translation)
        .unwrap_or_else(|| panic!("{entity:?} has no Transform"))
}

/// Takes every buffered `M` out of the app.
pub fn drain_messages<M: Message>(app: &mut App) -> Vec<M> {
    app.world_mut()
        .resource_mut::<Messages<M>>()
        .drain()
        .collect()
}

struct AppCell(App);

// SAFETY: rspec needs `Send + Sync` environments but the suites in this
// workspace run serially, and every access goes through the mutex in
// `SharedApp`.
unsafe impl Send for AppCell {}
unsafe impl Sync for AppCell {}

/// Mutex-guarded app that can live inside an rspec environment.
#[derive(Clone)]
pub struct SharedApp(Arc<Mutex<AppCell>>);

impl SharedApp {
    /// Wraps `app`.
    pub fn new(app: App) -> Self {
        Self(Arc::new(Mutex::new(AppCell(app))))
    }

    /// Runs `f` with exclusive access to the app, recovering from a
    /// poisoned lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        let mut cell = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cell.0)
    }
}

impl fmt::Debug for SharedApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedApp").finish_non_exhaustive()
    }
}
