//! Bevy integration for the lock-on core.
//!
//! Brawler entities carry a [`Brawler`] component and a [`ViewForward`]
//! written by the camera rig. Enemies carry [`Targetable`]. Input arrives as
//! [`PrimaryInput`] messages; the plugin reports lunges through
//! [`AttackStarted`] and [`AttackEnded`].

mod components;
mod messages;
mod plugin;
mod scene;
mod systems;

pub use components::{spawn_brawler, Brawler, Targetable, ViewForward};
pub use messages::{AttackEnded, AttackStarted, InputPhase, PrimaryInput};
pub use plugin::{CombatPlugin, CombatSet};
pub use scene::EcsScene;
pub use systems::{
    debug_target_points_system, lock_on_tick_system, primary_input_system, DebugTargetPoints,
    TargetQuery,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::TuningParameters;
    use bevy::prelude::*;
    use rstest::rstest;

    #[rstest]
    fn brawler_component_uses_entity_handle() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let brawler = Brawler::for_entity(entity, None, TuningParameters::default());
        assert_eq!(brawler.handle().to_bits(), entity.to_bits());
        assert!(brawler.ignore_set().contains(brawler.handle()));
    }

    #[rstest]
    fn plugin_is_default_constructible() {
        let _: CombatPlugin = CombatPlugin;
    }
}
