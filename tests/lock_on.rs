//! Lunge scenarios driven through the in-memory arena.
use approx::assert_relative_eq;
use brawler::{ActorHandle, AttackEnd, AttackType, LockOnCharacter, TuningParameters};
use glam::Vec3;
use rstest::rstest;
use test_utils::arena::Arena;
use test_utils::assert_vec3_near;

const STEP: f32 = 0.016;
const AHEAD: Vec3 = Vec3::new(200.0, 0.0, 0.0);

fn tuning(clear_target_on_complete: bool) -> TuningParameters {
    TuningParameters {
        clear_target_on_complete,
        ..TuningParameters::default()
    }
}

/// Ticks until the lunge ends, checking the distance shrinks every frame.
fn run_lunge(arena: &mut Arena, target: usize) -> (AttackEnd, f32) {
    let mut last = arena.distance_to(target);
    for _ in 0..1000 {
        if let Some(end) = arena.tick(Vec3::X, STEP) {
            return (end, last);
        }
        let now = arena.distance_to(target);
        assert!(now < last, "distance grew from {last} to {now}");
        last = now;
    }
    panic!("lunge never ended");
}

#[rstest]
#[case::cleared(true, None)]
#[case::retained(false, Some(0))]
fn lunge_closes_to_attack_radius(#[case] clear: bool, #[case] kept: Option<usize>) {
    let mut arena = Arena::new(Vec3::ZERO, &[AHEAD], tuning(clear));
    arena.tick(Vec3::X, STEP);
    let commit = arena.press().expect("enemy ahead should commit");
    assert_eq!(commit.attack_type, AttackType::Short);
    assert_relative_eq!(commit.distance, 200.0, epsilon = 1e-4);

    let (end, distance) = run_lunge(&mut arena, 0);

    assert_eq!(end, AttackEnd::Reached);
    assert!(distance < 100.0, "stopped at {distance}");
    assert!(!arena.character.is_attacking());
    assert_eq!(
        arena.character.state().current_target,
        kept.map(|index| arena.enemies[index])
    );
}

#[rstest]
fn press_with_nothing_in_sight_stays_idle() {
    let mut arena = Arena::new(Vec3::ZERO, &[AHEAD], TuningParameters::default());
    arena.tick(Vec3::NEG_X, STEP);
    assert_eq!(arena.character.state().possible_target, None);

    assert!(arena.press().is_none());
    assert!(!arena.character.is_attacking());
    assert!(arena.character.accepts_movement_input());
    assert_eq!(arena.pose.position, Vec3::ZERO);
}

#[rstest]
fn facing_a_retained_target_skips_selection() {
    let mut arena = Arena::new(Vec3::ZERO, &[AHEAD], tuning(false));
    arena.tick(Vec3::X, STEP);
    arena.press().expect("commit");
    run_lunge(&mut arena, 0);

    arena.tick(Vec3::X, STEP);
    let state = arena.character.state();
    assert_eq!(state.current_target, Some(arena.enemies[0]));
    assert_eq!(state.possible_target, None);
}

#[rstest]
fn cleared_target_stays_ignored_until_the_next_commit() {
    let side = Vec3::new(100.0, 300.0, 0.0);
    let mut arena = Arena::new(Vec3::ZERO, &[AHEAD, side], TuningParameters::default());
    let (first, second) = (arena.enemies[0], arena.enemies[1]);

    arena.tick(Vec3::X, STEP);
    arena.press().expect("commit");
    run_lunge(&mut arena, 0);

    arena.tick(Vec3::X, STEP);
    assert_eq!(arena.character.state().possible_target, None);
    assert!(arena.character.ignore_set().contains(first));

    arena.tick(Vec3::Y, STEP);
    assert_eq!(arena.character.state().possible_target, Some(second));
    let commit = arena.press().expect("second commit");
    assert_eq!(commit.target, second);

    let ignore = arena.character.ignore_set();
    assert!(!ignore.contains(first));
    assert!(ignore.contains(second));
    assert_eq!(ignore.locked(), Some(second));
}

#[rstest]
fn ignore_set_holds_self_owner_null_and_lock() {
    let this = ActorHandle::new(4, 1);
    let owner = ActorHandle::new(9, 0);
    let character = LockOnCharacter::new(this, Some(owner), TuningParameters::default());
    let ignore = character.ignore_set();

    let mut members: Vec<_> = ignore.iter().collect();
    members.sort_by_key(|handle| handle.to_bits());
    let mut expected = vec![this, owner, ActorHandle::NULL];
    expected.sort_by_key(|handle| handle.to_bits());
    assert_eq!(members, expected);
    assert_eq!(ignore.locked(), None);

    let mut arena = Arena::new(Vec3::ZERO, &[AHEAD], TuningParameters::default());
    arena.tick(Vec3::X, STEP);
    arena.press().expect("commit");
    let committed = arena.character.ignore_set();
    assert_eq!(committed.len(), 3);
    assert!(committed.contains(arena.character.handle()));
    assert!(committed.contains(ActorHandle::NULL));
    assert_eq!(committed.locked(), Some(arena.enemies[0]));
}

#[rstest]
fn lunge_progress_tracks_elapsed_time() {
    let mut arena = Arena::new(Vec3::ZERO, &[AHEAD], TuningParameters::default());
    arena.tick(Vec3::X, STEP);
    arena.press().expect("commit");
    assert_relative_eq!(arena.character.attack_progress(), 0.0);

    assert_eq!(arena.tick(Vec3::X, 0.25), None);
    assert_relative_eq!(arena.character.attack_progress(), 0.25, epsilon = 1e-6);
    assert_vec3_near(arena.pose.position, Vec3::new(50.0, 0.0, 0.0), 1e-3);
    assert!(!arena.character.accepts_movement_input());
}

#[rstest]
fn moving_target_is_tracked_during_the_lunge() {
    let tight = TuningParameters {
        attack_radius: 10.0,
        ..TuningParameters::default()
    };
    let mut arena = Arena::new(Vec3::ZERO, &[AHEAD], tight);
    arena.tick(Vec3::X, STEP);
    arena.press().expect("commit");

    let enemy = arena.enemies[0];
    arena
        .registry
        .get_mut(enemy)
        .expect("enemy")
        .position = Vec3::new(0.0, 200.0, 0.0);
    assert_eq!(arena.tick(Vec3::X, 0.5), None);
    assert_vec3_near(arena.pose.position, Vec3::new(0.0, 100.0, 0.0), 1e-3);
}

#[rstest]
fn far_commit_is_classified_far() {
    let far = Vec3::new(600.0, 0.0, 0.0);
    let mut arena = Arena::new(Vec3::ZERO, &[far], TuningParameters::default());
    arena.tick(Vec3::X, STEP);
    let commit = arena.press().expect("commit");
    assert_eq!(commit.attack_type, AttackType::Far);
    assert_relative_eq!(commit.distance, 600.0, epsilon = 1e-3);
}
