//! Capabilities the host world lends to a character.
//!
//! The character never owns actors. It asks the world where a handle is and
//! what a sphere sweep hits. [`ActorRegistry<TargetBody>`] provides a plain
//! in-memory implementation used by headless hosts and tests.
use glam::Vec3;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::handle::{ActorHandle, ActorRegistry};
use crate::ignore_set::IgnoreSet;

/// Collision channel a sweep is traced against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionChannel {
    /// Line-of-sight queries.
    Visibility,
    /// Camera-visibility queries. Targeting sweeps use this channel.
    #[default]
    Camera,
}

/// A sphere swept from `origin` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Start of the sweep.
    pub origin: Vec3,
    /// End of the sweep.
    pub end: Vec3,
    /// Radius of the swept sphere.
    pub radius: f32,
    /// Channel the sweep is traced against.
    pub channel: CollisionChannel,
}

/// World queries a character needs while selecting and chasing targets.
pub trait CombatWorld {
    /// Current position of `actor`, or `None` if it no longer exists.
    fn actor_position(&self, actor: ActorHandle) -> Option<Vec3>;

    /// First actor touched by `sweep`, skipping everything in `exclude`.
    fn cast_sphere(&self, sweep: Sweep, exclude: &IgnoreSet) -> Option<ActorHandle>;
}

/// Bounding sphere of a targetable actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetBody {
    /// Centre of the body.
    pub position: Vec3,
    /// Radius of the body.
    pub radius: f32,
    /// The single channel this body blocks.
    pub channel: CollisionChannel,
}

impl TargetBody {
    /// A body at `position` blocking the camera channel.
    #[must_use]
    pub const fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            channel: CollisionChannel::Camera,
        }
    }
}

/// Earliest fraction of `sweep` at which it touches a sphere at `center`.
///
/// Returns `Some(0.0)` when the sweep starts inside the body and `None` when
/// it never touches it within `[0, 1]`.
///
/// # Examples
///
/// ```
/// use brawler::world::{sweep_sphere, CollisionChannel, Sweep};
/// use glam::Vec3;
///
/// let sweep = Sweep {
///     origin: Vec3::ZERO,
///     end: Vec3::new(100.0, 0.0, 0.0),
///     radius: 5.0,
///     channel: CollisionChannel::Camera,
/// };
/// let hit = sweep_sphere(sweep, Vec3::new(50.0, 0.0, 0.0), 5.0).unwrap();
/// assert!((hit - 0.4).abs() < 1e-6);
/// ```
#[must_use]
pub fn sweep_sphere(sweep: Sweep, center: Vec3, body_radius: f32) -> Option<f32> {
    let reach = sweep.radius + body_radius;
    let from_center = sweep.origin - center;
    let direction = sweep.end - sweep.origin;

    let c = from_center.length_squared() - reach * reach;
    if c <= 0.0 {
        return Some(0.0);
    }

    let a = direction.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * from_center.dot(direction);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let fraction = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&fraction).then_some(fraction)
}

/// Earliest non-excluded body hit by `sweep` among `bodies`.
///
/// Bodies hit at the same fraction resolve to the lowest handle.
pub fn first_hit<'a>(
    bodies: impl IntoIterator<Item = (ActorHandle, &'a TargetBody)>,
    sweep: Sweep,
    exclude: &IgnoreSet,
) -> Option<ActorHandle> {
    bodies
        .into_iter()
        .filter(|(handle, body)| body.channel == sweep.channel && !exclude.contains(*handle))
        .filter_map(|(handle, body)| {
            sweep_sphere(sweep, body.position, body.radius).map(|fraction| (handle, fraction))
        })
        .min_by_key(|(handle, fraction)| (OrderedFloat(*fraction), *handle))
        .map(|(handle, _)| handle)
}

impl CombatWorld for ActorRegistry<TargetBody> {
    fn actor_position(&self, actor: ActorHandle) -> Option<Vec3> {
        self.get(actor).map(|body| body.position)
    }

    fn cast_sphere(&self, sweep: Sweep, exclude: &IgnoreSet) -> Option<ActorHandle> {
        first_hit(self.iter(), sweep, exclude)
    }
}
