//! Bevy plugin wiring the lock-on systems into the schedule.

use bevy::prelude::*;

use super::messages::{AttackEnded, AttackStarted, PrimaryInput};
use super::systems::{
    debug_target_points_system, lock_on_tick_system, primary_input_system, DebugTargetPoints,
};

/// System set containing every lock-on system, in input, tick, debug order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombatSet;

/// Bevy plugin installing target selection and lunges for [`super::Brawler`]s.
#[derive(Default)]
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PrimaryInput>()
            .add_message::<AttackStarted>()
            .add_message::<AttackEnded>()
            .init_resource::<DebugTargetPoints>();

        app.add_systems(
            Update,
            (
                primary_input_system,
                lock_on_tick_system,
                debug_target_points_system,
            )
                .chain()
                .in_set(CombatSet),
        );
    }
}
