//! Lock-on attack driver.
//!
//! A character is either idle, refreshing its possible target every tick,
//! or attacking, lunging at the target it locked when the primary action was
//! pressed. A lunge covers the distance from where it started to the target
//! in `attack_duration` seconds, and ends early once the target is within
//! `attack_radius`.
use glam::{Quat, Vec3};
use log::debug;
use serde::Serialize;

use crate::handle::ActorHandle;
use crate::ignore_set::IgnoreSet;
use crate::selector::{select_target, SelectorQuery};
use crate::tuning::TuningParameters;
use crate::vector_math::{look_at_rotation, move_towards};
use crate::world::CombatWorld;

/// Transform of the character that the driver is allowed to overwrite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position.
    pub position: Vec3,
    /// World rotation.
    pub rotation: Quat,
}

impl Pose {
    /// Unrotated pose at `position`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Reach class of a committed attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum AttackType {
    /// Target was within `far_attack_distance` at commit.
    #[default]
    Short,
    /// Target was beyond `far_attack_distance` at commit.
    Far,
}

/// Why a lunge returned the character to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttackEnd {
    /// The target came within `attack_radius`.
    Reached,
    /// `attack_duration` elapsed.
    TimedOut,
    /// The locked target no longer resolves.
    LostTarget,
}

/// Summary of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackCommit {
    /// The newly locked target.
    pub target: ActorHandle,
    /// Reach class of the attack.
    pub attack_type: AttackType,
    /// Distance to the target when the attack started.
    pub distance: f32,
}

/// Mutable combat state of one character.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatState {
    /// Whether a lunge is in progress.
    pub is_attacking: bool,
    /// Target locked by the last commit.
    pub current_target: Option<ActorHandle>,
    /// Candidate from the most recent idle selection pass.
    pub possible_target: Option<ActorHandle>,
    /// Seconds elapsed in the current lunge.
    pub lerp_elapsed: f32,
    /// Where the current lunge started.
    pub lerp_origin: Vec3,
    /// Reach class of the current or last attack.
    pub attack_type: AttackType,
    /// Whether the primary action is held down.
    pub primary_held: bool,
}

impl Default for CombatState {
    fn default() -> Self {
        Self {
            is_attacking: false,
            current_target: None,
            possible_target: None,
            lerp_elapsed: 0.0,
            lerp_origin: Vec3::ZERO,
            attack_type: AttackType::Short,
            primary_held: false,
        }
    }
}

/// Which marker a [`DebugPoint`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugPointKind {
    /// The locked target, conventionally drawn blue.
    CurrentTarget,
    /// The possible target, conventionally drawn green.
    PossibleTarget,
}

/// A marker the host may draw over a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugPoint {
    /// Where to draw.
    pub position: Vec3,
    /// Marker size from `debug_target_point_size`.
    pub size: f32,
    /// What the marker stands for.
    pub kind: DebugPointKind,
}

/// Target selection and lunge driver of a single character.
#[derive(Debug, Clone)]
pub struct LockOnCharacter {
    this: ActorHandle,
    tuning: TuningParameters,
    ignore: IgnoreSet,
    state: CombatState,
}

impl LockOnCharacter {
    /// Builds an idle character.
    ///
    /// `this` and `owner` are excluded from every targeting sweep.
    #[must_use]
    pub fn new(this: ActorHandle, owner: Option<ActorHandle>, tuning: TuningParameters) -> Self {
        Self {
            this,
            tuning,
            ignore: IgnoreSet::new(this, owner),
            state: CombatState::default(),
        }
    }

    /// Handle of the character itself.
    #[must_use]
    pub const fn handle(&self) -> ActorHandle {
        self.this
    }

    /// Tuning the character was built with.
    #[must_use]
    pub const fn tuning(&self) -> &TuningParameters {
        &self.tuning
    }

    /// Handles excluded from targeting sweeps.
    #[must_use]
    pub const fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Current combat state.
    #[must_use]
    pub const fn state(&self) -> &CombatState {
        &self.state
    }

    /// Whether a lunge is in progress.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.state.is_attacking
    }

    /// Movement input is dropped for the length of a lunge.
    #[must_use]
    pub const fn accepts_movement_input(&self) -> bool {
        !self.state.is_attacking
    }

    /// Fraction of the lunge duration already spent, `0` while idle.
    #[must_use]
    pub fn attack_progress(&self) -> f32 {
        if !self.state.is_attacking {
            return 0.0;
        }
        lerp_alpha(self.state.lerp_elapsed, self.tuning.attack_duration)
    }

    /// Returns the state to its spawn defaults.
    ///
    /// The ignore set keeps its last lock.
    pub fn reset(&mut self) {
        self.state = CombatState::default();
    }

    /// Advances the character by `delta` seconds.
    ///
    /// While attacking, the lunge moves `pose` and may end, in which case
    /// the reason is returned. While idle, the possible target is refreshed
    /// from `camera_forward`.
    pub fn tick<W>(
        &mut self,
        pose: &mut Pose,
        camera_forward: Vec3,
        delta: f32,
        world: &W,
    ) -> Option<AttackEnd>
    where
        W: CombatWorld + ?Sized,
    {
        if self.state.is_attacking {
            return self.advance_attack(pose, delta, world);
        }

        self.state.possible_target = select_target(
            SelectorQuery {
                position: pose.position,
                camera_forward,
                current_target: self.state.current_target,
            },
            &self.tuning,
            &self.ignore,
            world,
        );
        None
    }

    /// Handles a press of the primary action.
    ///
    /// Commits the possible target and starts a lunge when the character is
    /// idle and the target still resolves. `pose` is turned to face it.
    pub fn primary_pressed<W>(&mut self, pose: &mut Pose, world: &W) -> Option<AttackCommit>
    where
        W: CombatWorld + ?Sized,
    {
        self.state.primary_held = true;
        if self.state.is_attacking {
            return None;
        }

        let target = self.state.possible_target?;
        let target_position = world.actor_position(target)?;

        self.ignore.lock(target);
        pose.rotation = look_at_rotation(pose.position, target_position);

        let distance = pose.position.distance(target_position);
        let attack_type = if distance > self.tuning.far_attack_distance {
            AttackType::Far
        } else {
            AttackType::Short
        };

        self.state.current_target = Some(target);
        self.state.lerp_origin = pose.position;
        self.state.lerp_elapsed = 0.0;
        self.state.attack_type = attack_type;
        self.state.is_attacking = true;

        debug!(
            "{} locked on to {target} at distance {distance:.1} ({attack_type:?})",
            self.this
        );
        Some(AttackCommit {
            target,
            attack_type,
            distance,
        })
    }

    /// Handles a release of the primary action. It does not interrupt a
    /// lunge.
    pub fn primary_released(&mut self) {
        self.state.primary_held = false;
    }

    /// Markers over the current and possible targets that still resolve.
    pub fn debug_points<W>(&self, world: &W) -> Vec<DebugPoint>
    where
        W: CombatWorld + ?Sized,
    {
        [
            (self.state.current_target, DebugPointKind::CurrentTarget),
            (self.state.possible_target, DebugPointKind::PossibleTarget),
        ]
        .into_iter()
        .filter_map(|(target, kind)| {
            let position = world.actor_position(target?)?;
            Some(DebugPoint {
                position,
                size: self.tuning.debug_target_point_size,
                kind,
            })
        })
        .collect()
    }

    fn advance_attack<W>(&mut self, pose: &mut Pose, delta: f32, world: &W) -> Option<AttackEnd>
    where
        W: CombatWorld + ?Sized,
    {
        let Some(target) = self
            .state
            .current_target
            .and_then(|target| world.actor_position(target))
        else {
            return Some(self.finish(AttackEnd::LostTarget));
        };

        if pose.position.distance(target) < self.tuning.attack_radius {
            return Some(self.finish(AttackEnd::Reached));
        }

        self.state.lerp_elapsed += delta.max(0.0);
        let alpha = lerp_alpha(self.state.lerp_elapsed, self.tuning.attack_duration);
        let span = self.state.lerp_origin.distance(target);
        pose.position = move_towards(self.state.lerp_origin, target, alpha * span);

        (self.state.lerp_elapsed >= self.tuning.attack_duration)
            .then(|| self.finish(AttackEnd::TimedOut))
    }

    fn finish(&mut self, end: AttackEnd) -> AttackEnd {
        self.state.is_attacking = false;
        self.state.lerp_elapsed = 0.0;
        // A candidate picked before the lunge is stale once it ends.
        self.state.possible_target = None;
        if self.tuning.clear_target_on_complete {
            self.state.current_target = None;
        }
        debug!("{} attack ended: {end:?}", self.this);
        end
    }
}

fn lerp_alpha(elapsed: f32, duration: f32) -> f32 {
    if duration > 0.0 {
        (elapsed / duration).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::ActorRegistry;
    use crate::world::TargetBody;
    use rstest::{fixture, rstest};

    const STEP: f32 = 0.016;

    struct Duel {
        registry: ActorRegistry<TargetBody>,
        character: LockOnCharacter,
        pose: Pose,
        enemy: ActorHandle,
    }

    impl Duel {
        fn tick(&mut self, forward: Vec3) -> Option<AttackEnd> {
            self.character
                .tick(&mut self.pose, forward, STEP, &self.registry)
        }

        fn press(&mut self) -> Option<AttackCommit> {
            self.character.primary_pressed(&mut self.pose, &self.registry)
        }
    }

    fn duel_with(tuning: TuningParameters) -> Duel {
        let mut registry = ActorRegistry::default();
        let player = registry.insert(TargetBody::new(Vec3::ZERO, 40.0));
        let enemy = registry.insert(TargetBody::new(Vec3::new(200.0, 0.0, 0.0), 40.0));
        Duel {
            registry,
            character: LockOnCharacter::new(player, None, tuning),
            pose: Pose::at(Vec3::ZERO),
            enemy,
        }
    }

    #[fixture]
    fn duel() -> Duel {
        duel_with(TuningParameters::default())
    }

    #[rstest]
    fn press_without_possible_target_is_a_no_op(mut duel: Duel) {
        assert_eq!(duel.press(), None);
        assert!(!duel.character.is_attacking());
        assert!(duel.character.state().primary_held);
        assert_eq!(duel.character.state().current_target, None);
    }

    #[rstest]
    fn idle_tick_finds_enemy_and_press_commits(mut duel: Duel) {
        assert_eq!(duel.tick(Vec3::X), None);
        assert_eq!(duel.character.state().possible_target, Some(duel.enemy));

        let commit = duel.press().expect("commit");
        assert_eq!(commit.target, duel.enemy);
        assert_eq!(commit.attack_type, AttackType::Short);
        assert!((commit.distance - 200.0).abs() < 1e-4);

        let state = duel.character.state();
        assert!(state.is_attacking);
        assert_eq!(state.current_target, Some(duel.enemy));
        assert_eq!(state.lerp_origin, Vec3::ZERO);
        assert!(duel.character.ignore_set().contains(duel.enemy));
        assert!(!duel.character.accepts_movement_input());
    }

    #[rstest]
    fn commit_snaps_rotation_towards_target(mut duel: Duel) {
        duel.registry
            .get_mut(duel.enemy)
            .expect("enemy")
            .position = Vec3::new(0.0, 200.0, 0.0);
        duel.tick(Vec3::Y);
        duel.press().expect("commit");
        let facing = duel.pose.rotation * Vec3::X;
        assert!(facing.distance(Vec3::Y) < 1e-5, "facing {facing:?}");
    }

    #[rstest]
    fn lunge_ends_inside_attack_radius(mut duel: Duel) {
        duel.tick(Vec3::X);
        duel.press().expect("commit");

        let mut last = duel.pose.position.distance(Vec3::new(200.0, 0.0, 0.0));
        let mut end = None;
        for _ in 0..200 {
            end = duel.tick(Vec3::X);
            if end.is_some() {
                break;
            }
            let now = duel.pose.position.distance(Vec3::new(200.0, 0.0, 0.0));
            assert!(now < last, "distance grew from {last} to {now}");
            last = now;
        }

        assert_eq!(end, Some(AttackEnd::Reached));
        assert!(last < 100.0);
        assert!(!duel.character.is_attacking());
        assert_eq!(duel.character.state().current_target, None);
        assert!(duel.character.ignore_set().contains(duel.enemy));
    }

    #[rstest]
    fn retained_target_survives_the_lunge() {
        let mut duel = duel_with(TuningParameters {
            clear_target_on_complete: false,
            ..TuningParameters::default()
        });
        duel.tick(Vec3::X);
        duel.press().expect("commit");
        while duel.tick(Vec3::X).is_none() {}
        assert_eq!(duel.character.state().current_target, Some(duel.enemy));
    }

    #[rstest]
    fn zero_radius_lunge_times_out_on_the_target() {
        let mut duel = duel_with(TuningParameters {
            attack_radius: 0.0,
            attack_duration: 0.1,
            ..TuningParameters::default()
        });
        duel.tick(Vec3::X);
        duel.press().expect("commit");

        let mut ticks = 0;
        let end = loop {
            ticks += 1;
            if let Some(end) = duel.tick(Vec3::X) {
                break end;
            }
        };
        assert_eq!(end, AttackEnd::TimedOut);
        assert_eq!(ticks, 7);
        assert_eq!(duel.pose.position, Vec3::new(200.0, 0.0, 0.0));
    }

    #[rstest]
    fn zero_duration_snaps_in_one_tick() {
        let mut duel = duel_with(TuningParameters {
            attack_radius: 0.0,
            attack_duration: 0.0,
            ..TuningParameters::default()
        });
        duel.tick(Vec3::X);
        duel.press().expect("commit");
        assert_eq!(duel.tick(Vec3::X), Some(AttackEnd::TimedOut));
        assert_eq!(duel.pose.position, Vec3::new(200.0, 0.0, 0.0));
    }

    #[rstest]
    fn despawned_target_ends_the_lunge(mut duel: Duel) {
        duel.tick(Vec3::X);
        duel.press().expect("commit");
        duel.registry.remove(duel.enemy);
        assert_eq!(duel.tick(Vec3::X), Some(AttackEnd::LostTarget));
        assert!(!duel.character.is_attacking());
    }

    fn run_to_end(duel: &mut Duel, end: AttackEnd) -> AttackEnd {
        duel.tick(Vec3::X);
        duel.press().expect("commit");
        if end == AttackEnd::LostTarget {
            duel.registry.remove(duel.enemy);
        }
        loop {
            if let Some(reason) = duel.tick(Vec3::X) {
                return reason;
            }
        }
    }

    #[rstest]
    #[case::reached(AttackEnd::Reached, TuningParameters::default())]
    #[case::timed_out(
        AttackEnd::TimedOut,
        TuningParameters {
            attack_radius: 0.0,
            attack_duration: 0.1,
            ..TuningParameters::default()
        }
    )]
    #[case::lost_target(AttackEnd::LostTarget, TuningParameters::default())]
    fn completion_resets_the_combat_state(
        #[case] expected: AttackEnd,
        #[case] tuning: TuningParameters,
    ) {
        let mut duel = duel_with(tuning);
        assert_eq!(run_to_end(&mut duel, expected), expected);

        assert_eq!(
            duel.character.state(),
            &CombatState {
                primary_held: true,
                ..CombatState::default()
            }
        );
        assert_eq!(duel.character.attack_progress(), 0.0);
    }

    #[rstest]
    fn press_right_after_a_lunge_commits_nothing(mut duel: Duel) {
        assert_eq!(run_to_end(&mut duel, AttackEnd::Reached), AttackEnd::Reached);
        assert_eq!(duel.character.state().possible_target, None);

        assert_eq!(duel.press(), None);
        assert!(!duel.character.is_attacking());
        assert!(duel.character.accepts_movement_input());
    }

    #[rstest]
    fn selector_is_suspended_while_attacking(mut duel: Duel) {
        duel.tick(Vec3::X);
        duel.press().expect("commit");
        duel.tick(Vec3::NEG_X);
        assert_eq!(duel.character.state().possible_target, Some(duel.enemy));
        assert_eq!(duel.press(), None);
    }

    #[rstest]
    fn release_only_clears_the_held_flag(mut duel: Duel) {
        duel.tick(Vec3::X);
        duel.press().expect("commit");
        duel.character.primary_released();
        assert!(!duel.character.state().primary_held);
        assert!(duel.character.is_attacking());
    }

    #[rstest]
    fn far_targets_are_classified() {
        let mut duel = duel_with(TuningParameters {
            far_attack_distance: 150.0,
            ..TuningParameters::default()
        });
        duel.tick(Vec3::X);
        let commit = duel.press().expect("commit");
        assert_eq!(commit.attack_type, AttackType::Far);
        assert_eq!(duel.character.state().attack_type, AttackType::Far);
    }

    #[rstest]
    fn debug_points_follow_targets(mut duel: Duel) {
        assert!(duel.character.debug_points(&duel.registry).is_empty());
        duel.tick(Vec3::X);
        duel.press().expect("commit");

        let points = duel.character.debug_points(&duel.registry);
        let kinds: Vec<_> = points.iter().map(|point| point.kind).collect();
        assert_eq!(
            kinds,
            vec![DebugPointKind::CurrentTarget, DebugPointKind::PossibleTarget]
        );
        assert!(points.iter().all(|point| point.size == 10.0));
    }

    #[rstest]
    fn reset_returns_to_spawn_defaults(mut duel: Duel) {
        duel.tick(Vec3::X);
        duel.press().expect("commit");
        duel.character.reset();
        assert_eq!(duel.character.state(), &CombatState::default());
        assert_eq!(duel.character.attack_progress(), 0.0);
    }
}
