#![cfg_attr(docsrs, feature(doc_cfg))]
//! Melee target acquisition and lock-on lunges for an action brawler.
//!
//! The core ([`selector`], [`lock_on`]) is engine agnostic and talks to the
//! world through [`CombatWorld`]. The [`combat`] module hosts it inside a
//! Bevy app.
pub mod combat;
pub mod constants;
pub mod handle;
pub mod ignore_set;
pub mod lock_on;
pub mod logging;
pub mod selector;
pub mod tuning;
pub mod vector_math;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use combat::{
    spawn_brawler, AttackEnded, AttackStarted, Brawler, CombatPlugin, DebugTargetPoints,
    PrimaryInput, Targetable, ViewForward,
};
pub use handle::{ActorHandle, ActorRegistry};
pub use ignore_set::IgnoreSet;
pub use lock_on::{AttackEnd, AttackType, CombatState, LockOnCharacter, Pose};
pub use logging::init as init_logging;
pub use selector::{select_target, SelectorQuery};
pub use tuning::{TuningError, TuningParameters};
pub use vector_math::{look_at_rotation, move_towards};
pub use world::{CollisionChannel, CombatWorld, Sweep, TargetBody};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use brawler::prelude::*;
    //! ```

    pub use crate::ActorHandle;
    pub use crate::CombatPlugin;
    pub use crate::CombatWorld;
    pub use crate::LockOnCharacter;
    pub use crate::Pose;
    pub use crate::TuningParameters;
}
