//! Headless arenas built on [`ActorRegistry`].

use brawler::{ActorHandle, ActorRegistry, LockOnCharacter, Pose, TargetBody, TuningParameters};
use glam::Vec3;

/// Bounding radius given to every actor in an arena.
pub const BODY_RADIUS: f32 = 40.0;

/// A player and a handful of enemies in an in-memory world.
#[derive(Debug, Clone)]
pub struct Arena {
    /// World holding every actor, the player included.
    pub registry: ActorRegistry<TargetBody>,
    /// The player's lock-on state.
    pub character: LockOnCharacter,
    /// The player's transform.
    pub pose: Pose,
    /// Enemies in the order they were given.
    pub enemies: Vec<ActorHandle>,
}

impl Arena {
    /// Places the player at `player_at` and one enemy per entry of
    /// `enemies`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use test_utils::arena::Arena;
    /// let arena = Arena::new(Vec3::ZERO, &[Vec3::X * 200.0], Default::default());
    /// assert_eq!(arena.enemies.len(), 1);
    /// ```
    pub fn new(player_at: Vec3, enemies: &[Vec3], tuning: TuningParameters) -> Self {
        let mut registry = ActorRegistry::default();
        let player = registry.insert(TargetBody::new(player_at, BODY_RADIUS));
        let enemies = enemies
            .iter()
            .map(|at| registry.insert(TargetBody::new(*at, BODY_RADIUS)))
            .collect();
        Self {
            registry,
            character: LockOnCharacter::new(player, None, tuning),
            pose: Pose::at(player_at),
            enemies,
        }
    }

    /// Advances the player by `delta` seconds facing `forward`.
    pub fn tick(&mut self, forward: Vec3, delta: f32) -> Option<brawler::AttackEnd> {
        self.character
            .tick(&mut self.pose, forward, delta, &self.registry)
    }

    /// Presses the primary action.
    pub fn press(&mut self) -> Option<brawler::lock_on::AttackCommit> {
        self.character
            .primary_pressed(&mut self.pose, &self.registry)
    }

    /// Distance from the player to the enemy at `index`.
    ///
    /// # Panics
    /// Panics if there is no live enemy at `index`.
    pub fn distance_to(&self, index: usize) -> f32 {
        let handle = self.enemies[index];
        let body = self
            .registry
            .get(handle)
            .unwrap_or_else(|| panic!("enemy {index} is gone"));
        self.pose.position.distance(body.position)
    }
}
