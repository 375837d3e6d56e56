//! Basic vector math helper functions.
//! Small helpers for facing tests, look-at rotations and capped steps.
use glam::{Quat, Vec3};

use crate::constants::{FORWARD_AXIS, UP_AXIS};

/// Returns the unit vector in the direction of `vector`.
///
/// Non-finite input and the zero vector both yield [`Vec3::ZERO`].
///
/// # Examples
///
/// ```
/// use brawler::vector_math::safe_normalize;
/// use glam::Vec3;
///
/// let unit = safe_normalize(Vec3::new(3.0, 0.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-6);
/// assert!((unit.z - 0.8).abs() < 1e-6);
///
/// assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
/// ```
#[must_use]
pub fn safe_normalize(vector: Vec3) -> Vec3 {
    if !vector.is_finite() {
        return Vec3::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Projects a camera forward vector onto the horizontal plane.
///
/// Only the vertical component is zeroed; the result is not renormalised.
#[must_use]
pub fn flatten_facing(camera_forward: Vec3) -> Vec3 {
    camera_forward.reject_from_normalized(UP_AXIS)
}

/// Moves `current` towards `target` by at most `max_delta`.
///
/// Snaps to `target` when it lies within `max_delta` or when both points
/// coincide.
///
/// # Examples
///
/// ```
/// use brawler::move_towards;
/// use glam::Vec3;
///
/// let stepped = move_towards(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 4.0);
/// assert_eq!(stepped, Vec3::new(4.0, 0.0, 0.0));
///
/// let snapped = move_towards(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 4.0);
/// assert_eq!(snapped, Vec3::new(1.0, 0.0, 0.0));
/// ```
#[must_use]
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let offset = target - current;
    let magnitude = offset.length();

    if magnitude <= max_delta || magnitude == 0.0 {
        return target;
    }

    current + offset / magnitude * max_delta
}

/// Rotation that points [`FORWARD_AXIS`] from `from` towards `to`.
///
/// The rotation is built from yaw and pitch only, so it never rolls.
/// Coincident points give the identity rotation.
#[must_use]
pub fn look_at_rotation(from: Vec3, to: Vec3) -> Quat {
    let offset = to - from;
    if !offset.is_finite() {
        return Quat::IDENTITY;
    }
    let yaw = offset.y.atan2(offset.x);
    let pitch = offset.z.atan2(offset.truncate().length());
    // Positive pitch about +Y would tip +X downwards, hence the negation.
    Quat::from_rotation_z(yaw) * Quat::from_rotation_y(-pitch)
}

/// Direction an actor with `rotation` is facing.
#[must_use]
pub fn forward_vector(rotation: Quat) -> Vec3 {
    rotation * FORWARD_AXIS
}

/// Cosine between a facing direction and the direction from `from` to `to`.
///
/// `1` means exactly facing, `0` perpendicular and `-1` facing away. A zero
/// facing vector yields `0`.
#[must_use]
pub fn facing_dot(facing: Vec3, from: Vec3, to: Vec3) -> f32 {
    let to_target = safe_normalize(forward_vector(look_at_rotation(from, to)));
    safe_normalize(facing).dot(to_target).clamp(-1.0, 1.0)
}

/// Distance between two positions after normalising each from the origin.
///
/// This is not a metric on the positions themselves: it compares their
/// bearings from the world origin. The result is clamped to `[0, 1]`.
#[must_use]
pub fn normalized_position_distance(a: Vec3, b: Vec3) -> f32 {
    safe_normalize(a)
        .distance(safe_normalize(b))
        .clamp(0.0, 1.0)
}
