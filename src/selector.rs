//! Facing-based target selection.
//!
//! While idle, a character keeps its current duel for as long as the player
//! faces the locked target closely enough. Once they look away, a sphere is
//! swept along the flattened camera direction and the first actor it touches
//! becomes the possible target.
use glam::Vec3;
use log::trace;

use crate::handle::ActorHandle;
use crate::ignore_set::IgnoreSet;
use crate::tuning::TuningParameters;
use crate::vector_math::{facing_dot, flatten_facing, normalized_position_distance};
use crate::world::{CollisionChannel, CombatWorld, Sweep};

/// Inputs of one selection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorQuery {
    /// Position of the selecting character.
    pub position: Vec3,
    /// Forward vector of the follow camera, not yet flattened.
    pub camera_forward: Vec3,
    /// Target the character is currently locked on to.
    pub current_target: Option<ActorHandle>,
}

/// How well the player faces the current target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacingAssessment {
    /// Cosine between the facing and the direction to the target.
    pub facing_dot: f32,
    /// Dot the player must reach to keep the duel.
    pub threshold: f32,
}

impl FacingAssessment {
    /// Whether the player has looked far enough away to pick a new target.
    #[must_use]
    pub fn needs_retarget(&self) -> bool {
        self.facing_dot < self.threshold
    }
}

/// Duel threshold raised by the clamped distance term.
#[must_use]
pub fn effective_threshold(tuning: &TuningParameters, distance_term: f32) -> f32 {
    tuning.duel_dot_threshold + distance_term.clamp(0.0, 1.0) * tuning.duel_dot_distance_scalar
}

/// Scores the flattened `facing` against the target at `target_position`.
///
/// Without a target the dot is `0` against the base threshold. Without a
/// facing direction the threshold is infinite, so a sweep always runs.
#[must_use]
pub fn assess_facing(
    position: Vec3,
    facing: Vec3,
    target_position: Option<Vec3>,
    tuning: &TuningParameters,
) -> FacingAssessment {
    let Some(target) = target_position else {
        return FacingAssessment {
            facing_dot: 0.0,
            threshold: tuning.duel_dot_threshold,
        };
    };

    if facing == Vec3::ZERO {
        return FacingAssessment {
            facing_dot: 0.0,
            threshold: f32::INFINITY,
        };
    }

    let distance_term = normalized_position_distance(position, target);
    FacingAssessment {
        facing_dot: facing_dot(facing, position, target),
        threshold: effective_threshold(tuning, distance_term),
    }
}

/// Picks the possible target for this tick.
///
/// Returns `None` when the player still faces the current target, when the
/// sweep hits nothing, or when the world reports an ignored actor.
pub fn select_target<W>(
    query: SelectorQuery,
    tuning: &TuningParameters,
    ignore: &IgnoreSet,
    world: &W,
) -> Option<ActorHandle>
where
    W: CombatWorld + ?Sized,
{
    let facing = flatten_facing(query.camera_forward);
    let target_position = query
        .current_target
        .and_then(|target| world.actor_position(target));

    let assessment = assess_facing(query.position, facing, target_position, tuning);
    if !assessment.needs_retarget() {
        return None;
    }

    let sweep = Sweep {
        origin: query.position,
        end: query.position + facing * tuning.sphere_cast_distance,
        radius: tuning.sphere_cast_radius,
        channel: CollisionChannel::Camera,
    };
    trace!(
        "Retarget sweep from {:?} to {:?} (dot {:.3} < {:.3})",
        sweep.origin,
        sweep.end,
        assessment.facing_dot,
        assessment.threshold
    );

    let hit = world.cast_sphere(sweep, ignore)?;
    if ignore.contains(hit) {
        trace!("Discarding ignored hit {hit}");
        return None;
    }
    Some(hit)
}
