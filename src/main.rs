//! Cave Worm entry point
//!
//! Native builds drive the simulation headlessly at 60 Hz with a scripted
//! "tap Up" input, logging progress. Pass a JSON config path to override tuning.

use cave_worm::renderer::HeadlessSink;
use cave_worm::sim::{Game, GameEvent, InputEvent, InputKey, LayeredCave, player_pixel_position};
use cave_worm::{SimConfig, to_pixels_v};

const FRAME_MS: f64 = 1000.0 / 60.0;
const RUN_FRAMES: u32 = 60 * 20;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cave Worm (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(std::path::Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };

    let mut sink = HeadlessSink::new(config.cave_texel_count());
    let cave = LayeredCave::new(config.cave_seed);
    let mut game = match Game::new(config, Box::new(cave), &sink) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to start: {e}");
            std::process::exit(1);
        }
    };

    let mut now = 0.0;
    for frame in 0..RUN_FRAMES {
        // Hold ArrowUp for 0.25s out of every second; Shift is unbound and ignored
        let key_event = match frame % 60 {
            0 => Some(("ArrowUp", true)),
            15 => Some(("ArrowUp", false)),
            30 => Some(("Shift", true)),
            _ => None,
        };
        if let Some((name, held)) = key_event {
            match InputKey::from_key_name(name) {
                Some(key) if held => game.handle_input(InputEvent::KeyDown(key)),
                Some(key) => game.handle_input(InputEvent::KeyUp(key)),
                None => log::trace!("Ignoring unbound key {name:?}"),
            }
        }

        now += FRAME_MS;
        game.update(now, FRAME_MS);
        game.render(&mut sink);

        for event in game.drain_events() {
            match event {
                GameEvent::PlayerCrashed { position } => {
                    log::warn!("Crashed at {:?}px after {} frames", to_pixels_v(position), frame);
                }
            }
        }

        if frame % 60 == 0 {
            let state = game.state();
            log::info!(
                "t={:.2}s player={:?}px vel={:?} camera={:?}m",
                state.time,
                player_pixel_position(state),
                state.player.body.velocity,
                state.camera.position
            );
        }
    }

    log::info!("Done: {} uniform uploads", sink.uploads);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `Game` directly; nothing to do here
}
