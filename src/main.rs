//! simulate - run the game headless for a number of frames
//!
//! USAGE:
//! ```bash
//! cargo run --bin simulate -- --map map.json --frames 600 --right --jump-every 90
//! ```
//!
//! Useful for checking a level (spawners, enemy behaviour, fall deaths) without
//! opening a window. Set `RUST_LOG=debug` for per-frame detail.

use clap::Parser;
use platformer::config::GameConfig;
use platformer::game::{GameWorld, PlayerInput};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// JSON game config; every field is optional
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Map file (overrides the config)
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// RNG seed (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to run
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Hold left for the whole run
    #[arg(long)]
    left: bool,

    /// Hold right for the whole run
    #[arg(long)]
    right: bool,

    /// Press jump every N frames
    #[arg(long, value_name = "N")]
    jump_every: Option<u64>,

    /// Press dash every N frames
    #[arg(long, value_name = "N")]
    dash_every: Option<u64>,

    /// Log a status line every N frames
    #[arg(long, value_name = "N", default_value_t = 60)]
    report_every: u64,
}

fn pressed(every: Option<u64>, frame: u64) -> bool {
    matches!(every, Some(n) if n > 0 && frame % n == 0)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let mut config = match &opts.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(map) = opts.map.clone() {
        config.map_path = map;
    }
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }

    let tilemap = config.load_tilemap()?;
    let animations = config.load_animations()?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut world =
        GameWorld::new(tilemap, animations, config.physics, rng).with_player_speed(config.player_speed);

    for frame in 0..opts.frames {
        let input = PlayerInput {
            left: opts.left,
            right: opts.right,
            jump: pressed(opts.jump_every, frame),
            dash: pressed(opts.dash_every, frame),
        };
        world.tick(&input);

        for sound in world.effects.drain_sounds() {
            log::debug!("frame {}: sound {:?}", frame, sound);
        }

        if opts.report_every > 0 && frame % opts.report_every == 0 {
            log::info!(
                "frame {}: player at {:?} vel {:?}, {} enemies, {} projectiles",
                frame,
                world.player.body.position,
                world.player.body.velocity,
                world.enemies.len(),
                world.effects.projectiles.len()
            );
        }

        if world.player_dead() {
            log::info!("Player died on frame {}", frame);
            break;
        }
    }

    log::info!(
        "Finished after {} frames: player at {:?}, {} enemies left",
        world.frame(),
        world.player.body.position,
        world.enemies.len()
    );
    Ok(())
}
