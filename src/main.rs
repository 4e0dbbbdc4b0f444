//! Sky Corridor headless driver
//!
//! Runs the simulation at the nominal tick rate with the autopilot flying,
//! feeding each frame to the CPU scene builder and events to audio dispatch.
//!
//! Usage: `sky-corridor [ticks] [seed] [settings.json] [tuning.json]`

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;

use sky_corridor::audio::{AudioManager, open_backend};
use sky_corridor::consts::{TICK_HZ, TICK_SECONDS};
use sky_corridor::renderer::{EnemyModel, Frame, RenderSink, SceneBuilder};
use sky_corridor::sim::{GameEvent, GameState, TickInput, tick};
use sky_corridor::{Settings, Tuning};

const DEFAULT_TICKS: u64 = 30 * TICK_HZ as u64;

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let ticks: u64 = match args.next() {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid tick count '{}'", arg))?,
        None => DEFAULT_TICKS,
    };
    let seed_arg: Option<u64> = args
        .next()
        .map(|arg| {
            arg.parse()
                .with_context(|| format!("invalid seed '{}'", arg))
        })
        .transpose()?;
    let settings = args
        .next()
        .map(|p| Settings::load(&PathBuf::from(p)))
        .unwrap_or_default();
    let tuning = args
        .next()
        .map(|p| Tuning::load(&PathBuf::from(p)))
        .unwrap_or_default();

    let seed = seed_arg.or(settings.seed).unwrap_or_else(time_seed);
    log::info!("Sky Corridor starting (seed {}, {} ticks)", seed, ticks);

    let mut state = GameState::with_tuning(seed, tuning);
    let mut audio = AudioManager::from_settings(open_backend(&settings.sound_dir), &settings);
    audio.start_music();
    let model = EnemyModel::load_or_fallback(settings.enemy_mesh.as_deref());
    let mut scene = SceneBuilder::new(model, settings.show_hud);

    let step = Duration::from_secs_f32(TICK_SECONDS);
    let mut runs = 1u32;
    let mut best_score = 0u64;

    for n in 0..ticks {
        let started = Instant::now();

        let input = TickInput {
            autopilot: true,
            // Restart as soon as a run ends
            any_key: state.is_game_over(),
            ..Default::default()
        };
        let outcome = tick(&mut state, &input);
        if outcome.reset {
            runs += 1;
        }

        audio.on_tick(&outcome, &state.events);
        for event in &state.events {
            if let GameEvent::GameOver { score } = event {
                best_score = best_score.max(*score);
                log::info!("Run {} over with {} pts", runs, score);
            }
        }

        scene.render(&Frame::from_state(&state));

        if n % TICK_HZ as u64 == 0 {
            let draw = scene.draw_list();
            log::info!(
                "[{}] {} | {} triangles, {} entities",
                state.time_ticks,
                draw.hud.join(" | "),
                draw.triangles.len() / 3,
                state.entity_count()
            );
        }

        if let Some(rest) = step.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    best_score = best_score.max(state.score);
    log::info!(
        "Finished after {} ticks: {} runs, best score {} pts",
        state.time_ticks,
        runs,
        best_score
    );
    if log::log_enabled!(log::Level::Debug) {
        let frame = serde_json::to_string(&Frame::from_state(&state))
            .context("failed to serialize final frame")?;
        log::debug!("Final frame: {}", frame);
    }
    Ok(())
}
