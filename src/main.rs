//! Strider - headless locomotion demo.
//!
//! Drops two characters into the test course and drives them through a
//! scripted input timeline, logging what the locomotion core does. Run with
//! `RUST_LOG=info` for the summary, `RUST_LOG=debug` for every decision the
//! core makes.

use anyhow::{Context, Result};
use glam::Vec2;
use strider_game::{CharacterId, Level, RawInput, Simulation, SimulationConfig, TickReport};

/// Render rate the demo pretends to run at.
const FRAME_TIME: f32 = 1.0 / 144.0;

/// One stretch of held input.
struct Phase {
    name: &'static str,
    seconds: f32,
    input: RawInput,
}

fn phase(name: &'static str, seconds: f32, edit: impl FnOnce(&mut RawInput)) -> Phase {
    let mut input = RawInput::default();
    edit(&mut input);
    Phase { name, seconds, input }
}

fn timeline() -> Vec<Phase> {
    vec![
        phase("idle", 0.5, |_| {}),
        phase("walk", 1.0, |i| i.movement.forward = true),
        phase("sprint", 2.0, |i| {
            i.movement.forward = true;
            i.buttons.sprint = true;
        }),
        phase("jump", 1.5, |i| {
            i.movement.forward = true;
            i.buttons.jump = true;
        }),
        phase("crouch", 1.0, |i| {
            i.movement.forward = true;
            i.buttons.crouch = true;
        }),
        phase("crouch walk", 1.0, |i| i.movement.forward = true),
        phase("stand", 0.5, |i| i.buttons.crouch = true),
        phase("turn", 0.5, |i| i.mouse_delta = Vec2::new(4.0, 0.0)),
        phase("strafe", 1.0, |i| {
            i.movement.right = true;
            i.movement.forward = true;
        }),
        phase("rest", 2.0, |_| {}),
    ]
}

fn log_state(sim: &Simulation, id: CharacterId, label: &str) -> Result<()> {
    let character = sim
        .character(id)
        .with_context(|| format!("character {id} disappeared"))?;
    let core = character.core();

    log::info!(
        "[{label}] #{id} pos=({:.2}, {:.2}, {:.2}) speed={:.2} grounded={} posture={:?} height={:.2} camera={:.2} stamina={:.1}",
        core.position().x,
        core.position().y,
        core.position().z,
        core.velocity().horizontal_speed(),
        core.ground().is_grounded,
        core.posture().posture(),
        core.capsule().height(),
        core.camera_height(),
        core.stamina().current(),
    );
    Ok(())
}

fn log_events(id: CharacterId, report: &TickReport) {
    if report.jumped {
        log::info!("#{id} jumped on tick {}", report.tick);
    }
    if let Some(landing) = report.landing {
        log::info!(
            "#{id} hard landing on tick {}: air {:.2}s, dip {:.2}m",
            report.tick,
            landing.air_time,
            landing.reduction
        );
    }
    if report.posture_toggled {
        log::info!("#{id} toggled posture on tick {}", report.tick);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = SimulationConfig::default();
    let mut sim = Simulation::new(config, Level::test_course()).context("invalid simulation config")?;

    // One on the floor facing the ramps, one on the ledge facing off it
    let runner = sim.add_character()?;
    let ledge = sim.add_character()?;
    let ids = [runner, ledge];

    for &id in &ids {
        log_state(&sim, id, "spawn")?;
    }

    for phase in timeline() {
        for &id in &ids {
            sim.set_input(id, phase.input);
        }

        let frames = (phase.seconds / FRAME_TIME).round() as u32;
        for _ in 0..frames {
            for (id, report) in sim.advance(FRAME_TIME) {
                log_events(id, &report);
            }
        }

        for &id in &ids {
            log_state(&sim, id, phase.name)?;
        }
    }

    log::info!("Simulated {} ticks", sim.frame);
    Ok(())
}
