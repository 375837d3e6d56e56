//! Systems bridging the ECS with the lock-on core.
use bevy::prelude::*;
use log::warn;

use crate::lock_on::{DebugPoint, Pose};

use super::components::{Brawler, Targetable, ViewForward};
use super::messages::{AttackEnded, AttackStarted, InputPhase, PrimaryInput};
use super::scene::EcsScene;

/// Entities a brawler can target. Brawlers themselves are never targets.
pub type TargetQuery<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform, &'static Targetable), Without<Brawler>>;

/// Markers over every brawler's current and possible targets, rebuilt each
/// frame.
#[derive(Resource, Debug, Default, Clone, Deref, DerefMut)]
pub struct DebugTargetPoints(pub Vec<DebugPoint>);

fn pose_of(transform: &Transform) -> Pose {
    Pose {
        position: transform.translation,
        rotation: transform.rotation,
    }
}

fn apply_pose(transform: &mut Transform, pose: Pose) {
    transform.translation = pose.position;
    transform.rotation = pose.rotation;
}

/// Feeds primary-action presses and releases to their brawlers.
///
/// A press that commits an attack turns the brawler towards its target and
/// emits [`AttackStarted`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn primary_input_system(
    mut inputs: MessageReader<PrimaryInput>,
    targets: TargetQuery,
    mut brawlers: Query<(&mut Brawler, &mut Transform)>,
    mut started: MessageWriter<AttackStarted>,
) {
    let pending: Vec<PrimaryInput> = inputs.read().copied().collect();
    if pending.is_empty() {
        return;
    }
    let scene = EcsScene::collect(&targets);

    for input in pending {
        let Ok((mut brawler, mut transform)) = brawlers.get_mut(input.brawler) else {
            warn!("Primary input for unknown brawler {:?}", input.brawler);
            continue;
        };

        match input.phase {
            InputPhase::Released => brawler.primary_released(),
            InputPhase::Pressed => {
                let mut pose = pose_of(&transform);
                let Some(commit) = brawler.primary_pressed(&mut pose, &scene) else {
                    continue;
                };
                apply_pose(&mut transform, pose);
                if let Some(target) = scene.entity(commit.target) {
                    started.write(AttackStarted {
                        brawler: input.brawler,
                        target,
                        attack_type: commit.attack_type,
                        distance: commit.distance,
                    });
                }
            }
        }
    }
}

/// Advances every brawler by the frame delta.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn lock_on_tick_system(
    time: Res<Time>,
    targets: TargetQuery,
    mut brawlers: Query<(Entity, &mut Brawler, &mut Transform, &ViewForward)>,
    mut ended: MessageWriter<AttackEnded>,
) {
    let scene = EcsScene::collect(&targets);
    let delta = time.delta_secs();

    for (entity, mut brawler, mut transform, view) in &mut brawlers {
        let mut pose = pose_of(&transform);
        let end = brawler.tick(&mut pose, view.0, delta, &scene);
        if pose != pose_of(&transform) {
            apply_pose(&mut transform, pose);
        }
        if let Some(reason) = end {
            ended.write(AttackEnded {
                brawler: entity,
                reason,
            });
        }
    }
}

/// Rebuilds [`DebugTargetPoints`] from the brawlers' targets.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn debug_target_points_system(
    targets: TargetQuery,
    brawlers: Query<&Brawler>,
    mut points: ResMut<DebugTargetPoints>,
) {
    points.clear();
    if brawlers.is_empty() {
        return;
    }
    let scene = EcsScene::collect(&targets);
    for brawler in &brawlers {
        points.extend(brawler.debug_points(&scene));
    }
}
