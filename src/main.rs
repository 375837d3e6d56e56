//! Headless demo: one brawler lunges at an enemy straight ahead.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use brawler::{
    init_logging, spawn_brawler, AttackEnd, AttackEnded, AttackStarted, AttackType, CombatPlugin,
    PrimaryInput, Targetable, TuningParameters,
};
use clap::Parser;
use log::{debug, info};
use serde::Serialize;

/// Headless lock-on lunge demo
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON tuning file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Frames to simulate after the attack is pressed
    #[arg(short, long, default_value_t = 180)]
    ticks: u32,
    /// Distance of the enemy straight ahead of the player
    #[arg(long, default_value_t = 300.0)]
    target_distance: f32,
}

#[derive(Resource)]
struct Demo {
    tuning: TuningParameters,
    target_distance: f32,
}

#[derive(Resource)]
struct DemoPlayer(Entity);

#[derive(Serialize)]
struct Summary {
    frames: u32,
    attack_type: Option<AttackType>,
    end: Option<AttackEnd>,
    final_distance: f32,
}

fn spawn_demo(mut commands: Commands, demo: Res<Demo>) {
    let player = spawn_brawler(&mut commands, Transform::IDENTITY, demo.tuning.clone());
    commands.spawn((
        Transform::from_xyz(demo.target_distance, 0.0, 0.0),
        Targetable::new(40.0),
    ));
    commands.insert_resource(DemoPlayer(player));
}

fn player_distance(app: &App, player: Entity, target_distance: f32) -> f32 {
    app.world()
        .get::<Transform>(player)
        .map_or(f32::NAN, |transform| {
            transform
                .translation
                .distance(Vec3::new(target_distance, 0.0, 0.0))
        })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let tuning = match &args.config {
        Some(path) => TuningParameters::load(path)?,
        None => TuningParameters::default(),
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(CombatPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .insert_resource(Demo {
            tuning,
            target_distance: args.target_distance,
        })
        .add_systems(Startup, spawn_demo);

    // One idle frame lets the selector pick the enemy up.
    app.update();
    let player = app.world().resource::<DemoPlayer>().0;
    app.world_mut().write_message(PrimaryInput::pressed(player));

    let mut summary = Summary {
        frames: 0,
        attack_type: None,
        end: None,
        final_distance: 0.0,
    };
    while summary.frames < args.ticks && summary.end.is_none() {
        app.update();
        summary.frames += 1;

        let world = app.world_mut();
        for started in world.resource_mut::<Messages<AttackStarted>>().drain() {
            info!(
                "Lunge started towards {:?} from {:.1} units",
                started.target, started.distance
            );
            summary.attack_type = Some(started.attack_type);
        }
        summary.end = world
            .resource_mut::<Messages<AttackEnded>>()
            .drain()
            .map(|ended| ended.reason)
            .last();

        let distance = player_distance(&app, player, args.target_distance);
        debug!("frame {}: distance {distance:.2}", summary.frames);
    }
    app.world_mut().write_message(PrimaryInput::released(player));
    app.update();

    summary.final_distance = player_distance(&app, player, args.target_distance);
    info!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
