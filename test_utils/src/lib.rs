//! Utility helpers for tests.
pub mod app;
pub mod arena;

use glam::Vec3;

/// Assert that `actual` lies within `tolerance` of `expected`.
///
/// # Panics
/// Panics with both vectors in the message when they are too far apart.
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, tolerance: f32) {
    assert!(
        actual.distance(expected) <= tolerance,
        "{actual:?} is not within {tolerance} of {expected:?}"
    );
}
