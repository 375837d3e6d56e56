//! Gameplay constants shared by the selector and the attack driver.
//!
//! World space is right-handed with `+Z` up and `+X` as the forward axis of
//! an unrotated actor.
use glam::Vec3;

/// Axis an actor faces when its rotation is the identity.
pub const FORWARD_AXIS: Vec3 = Vec3::X;
/// World up axis. Facing vectors are flattened against it.
pub const UP_AXIS: Vec3 = Vec3::Z;

/// Default sweep length of the targeting sphere cast.
pub const DEFAULT_SPHERE_CAST_DISTANCE: f32 = 1000.0;
/// Default radius of the targeting sphere cast.
pub const DEFAULT_SPHERE_CAST_RADIUS: f32 = 50.0;
/// Distance below which a lunge counts as having reached its target.
pub const DEFAULT_ATTACK_RADIUS: f32 = 100.0;
/// Seconds a lunge takes to cover the full distance to its target.
pub const DEFAULT_ATTACK_DURATION: f32 = 1.0;
/// Base facing dot the player must exceed to keep a duel without retargeting.
pub const DEFAULT_DUEL_DOT_THRESHOLD: f32 = 0.7;
/// Weight of the distance term added to the duel threshold.
pub const DEFAULT_DUEL_DOT_DISTANCE_SCALAR: f32 = 1.0;
/// Size of the debug markers drawn over the current and possible targets.
pub const DEFAULT_DEBUG_TARGET_POINT_SIZE: f32 = 10.0;
/// Commit distance beyond which an attack is classified as far.
pub const DEFAULT_FAR_ATTACK_DISTANCE: f32 = 400.0;

/// Upper bound on the number of handles an ignore set holds.
///
/// Self, owner, the null sentinel and one locked target.
pub const IGNORE_SET_CAPACITY: usize = 4;
