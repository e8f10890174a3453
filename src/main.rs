//! Backdrop2D headless demo.
//!
//! Builds a background registry (from a JSON manifest or a built-in sample),
//! spawns a few backdrop layers, and runs the scroll + render pass for a
//! number of frames into a recording sink, logging what would be drawn.
//! Useful for exercising the tiling pipeline without a GPU backend.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --frames 5
//! cargo run -- --manifest assets/backgrounds.json
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::info;

use backdrop2d::components::backdrop::Backdrop;
use backdrop2d::components::zindex::ZIndex;
use backdrop2d::graphics::primitives::{RecordingRenderer, TextureHandle};
use backdrop2d::resources::backgroundstore::{AtlasRect, Background, BackgroundStore};
use backdrop2d::resources::gameconfig::GameConfig;
use backdrop2d::resources::worldtime::WorldTime;
use backdrop2d::systems::render::backdrop_pass;
use backdrop2d::systems::scroll::backdrop_scroll;

/// Backdrop2D demo
#[derive(Parser)]
#[command(version, about = "Headless backdrop rendering demo")]
struct Cli {
    /// Background manifest JSON. Falls back to built-in sample backgrounds.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Config INI path (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3)]
    frames: u32,
}

fn sample_store(strict: bool) -> BackgroundStore {
    let mut store = BackgroundStore::new().with_strict(strict);
    store.insert(
        "sky",
        Background {
            width: 256.0,
            height: 256.0,
            atlas: AtlasRect {
                x: 0.0,
                y: 0.0,
                w: 0.5,
                h: 0.5,
            },
            texture: TextureHandle(0),
        },
    );
    store.insert(
        "clouds",
        Background {
            width: 128.0,
            height: 64.0,
            atlas: AtlasRect {
                x: 0.5,
                y: 0.0,
                w: 0.25,
                h: 0.125,
            },
            texture: TextureHandle(0),
        },
    );
    store
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults

    let store = match &cli.manifest {
        Some(path) => {
            let json = match fs::read_to_string(path) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error reading {}: {e}", path.display());
                    return ExitCode::FAILURE;
                }
            };
            let mut store = BackgroundStore::new().with_strict(config.strict_handles);
            match store.load_manifest(&json) {
                Ok(count) => info!("Loaded {count} backgrounds from {}", path.display()),
                Err(e) => {
                    eprintln!("Error parsing {}: {e}", path.display());
                    return ExitCode::FAILURE;
                }
            }
            store
        }
        None => {
            info!("Using built-in sample backgrounds");
            sample_store(config.strict_handles)
        }
    };

    let mut world = World::new();
    world.insert_resource(config.room_size());
    world.insert_resource(WorldTime::default());
    world.insert_resource(store);
    world.insert_resource(config);

    // A stretched far layer and a scrolling tiled near layer.
    world.spawn((Backdrop::stretched(0), ZIndex(0)));
    world.spawn((Backdrop::tiled(1).with_scroll(30.0, 0.0), ZIndex(10)));

    let mut update = Schedule::default();
    update.add_systems(backdrop_scroll);

    let mut sink = RecordingRenderer::new();
    for frame in 0..cli.frames {
        {
            let mut time = world.resource_mut::<WorldTime>();
            time.advance(1.0 / 60.0);
        }
        update.run(&mut world);

        sink.clear();
        backdrop_pass(&mut world, &mut sink);
        info!(
            "frame {frame}: {} quads, {} vertices",
            sink.primitives.len(),
            sink.vertex_count()
        );
    }

    ExitCode::SUCCESS
}
