//! RPG Motion Demo
//!
//! Drives a character through a scripted key session using the full
//! pipeline: keyboard → key tracker → action bindings → movement
//! controller → transform. Set `MOTION_CONFIG` to a JSON file to override
//! speeds and bindings, and `RUST_LOG` to change verbosity.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rpg_motion::{
    FRAME_RATE, VERSION,
    config::MotionConfig,
    controllers::MovementController,
    core::{Transform, Transformable, UuidGenerator},
    input::{Key, KeyTracker, ScriptedKeyboard},
    schedule::Scheduler,
};

/// Boost applied once the scheduled timer fires.
const DEMO_BOOST: f32 = 1.5;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("RPG Motion v{}", VERSION);
    info!("Frame Rate: {} Hz", FRAME_RATE);

    let config = MotionConfig::from_env().context("failed to load motion config")?;
    demo_session(&config)
}

/// Walk, turn, strafe and back up, then report where the character ended.
fn demo_session(config: &MotionConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Session ===");

    let keyboard = ScriptedKeyboard::default()
        .hold_for(&[Key::W], 60)
        .hold_for(&[Key::W, Key::E], 45)
        .hold_for(&[Key::D], 30)
        .hold_for(&[Key::S, Key::Q], 30)
        .hold_for(&[], 15);
    let frames = keyboard.frame_count();
    let delta_seconds = 1.0 / FRAME_RATE as f32;

    let mut transform = Transform::new();
    let tracker: KeyTracker<ScriptedKeyboard> = KeyTracker::new(keyboard);
    let mut controller = MovementController::new(tracker, config.speeds.to_speed());
    let bound = config.apply_bindings(&mut controller);
    controller.attach(&mut transform);
    info!("Bound {} actions, {} frames at {:.4}s", bound, frames, delta_seconds);

    // Speed boost kicks in after two seconds
    let boost_due = Rc::new(Cell::new(false));
    let mut scheduler: Scheduler<UuidGenerator> = Scheduler::new(UuidGenerator);
    let boost_id = {
        let boost_due = Rc::clone(&boost_due);
        scheduler.schedule(Duration::from_secs(2), Box::new(move || boost_due.set(true)))
    };
    info!("Scheduled boost {}", boost_id);

    for frame in 0..frames {
        controller.input_mut().update(delta_seconds);
        controller.update(delta_seconds)?;
        controller.input_mut().keyboard_mut().advance();

        scheduler.update(delta_seconds);
        if boost_due.replace(false) {
            controller.speed_mut().set_boost(DEMO_BOOST);
            info!("Frame {}: boost x{} active", frame, DEMO_BOOST);
        }

        if frame % 30 == 0 {
            if let Some(transform) = controller.transform() {
                info!(
                    "Frame {}: position {} rotation {:.1}",
                    frame,
                    transform.position(),
                    transform.rotation()
                );
            }
        }
    }

    let snapshot = controller.snapshot();
    info!("Final controller state: {}", serde_json::to_string(&snapshot)?);

    controller.detach();
    drop(controller);

    info!("=== Session Results ===");
    info!("Position: {}", transform.position());
    info!("Rotation: {:.1} degrees", transform.rotation());
    info!("Distance from start: {:.2}", transform.position().length());

    Ok(())
}
