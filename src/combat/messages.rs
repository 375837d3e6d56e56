//! Buffered messages exchanged between the input layer and the lock-on
//! systems.
use bevy::prelude::*;

use crate::lock_on::{AttackEnd, AttackType};

/// Edge of the primary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputPhase {
    /// The action started this frame.
    Pressed,
    /// The action completed this frame.
    Released,
}

/// Primary-action input addressed to one brawler.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryInput {
    /// Brawler receiving the input.
    pub brawler: Entity,
    /// Press or release.
    pub phase: InputPhase,
}

impl PrimaryInput {
    /// A press for `brawler`.
    #[must_use]
    pub const fn pressed(brawler: Entity) -> Self {
        Self {
            brawler,
            phase: InputPhase::Pressed,
        }
    }

    /// A release for `brawler`.
    #[must_use]
    pub const fn released(brawler: Entity) -> Self {
        Self {
            brawler,
            phase: InputPhase::Released,
        }
    }
}

/// A brawler locked on and started a lunge.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct AttackStarted {
    /// The attacking brawler.
    pub brawler: Entity,
    /// The locked target.
    pub target: Entity,
    /// Reach class of the attack.
    pub attack_type: AttackType,
    /// Distance to the target at commit.
    pub distance: f32,
}

/// A brawler's lunge finished.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackEnded {
    /// The brawler that was attacking.
    pub brawler: Entity,
    /// Why the lunge ended.
    pub reason: AttackEnd,
}
