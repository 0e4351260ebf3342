//! Flipbook main entry point.
//!
//! A sprite-sheet keyframe animation engine written in Rust using:
//! - **raylib** for windowing and graphics
//! - **bevy_ecs** for entity-component-system architecture
//!
//! This executable is a small preview tool: it loads the animation
//! definitions and sprite sheets named in the configuration file, spawns one
//! entity per definition and plays them all with interpolated rendering.
//!
//! # Main Loop
//!
//! 1. Initialize logging, configuration and the raylib window
//! 2. Populate the ECS world: stores, clock, one entity per animation
//! 3. Fold real frame time into the fixed-step accumulator
//! 4. Run the update schedule once per fixed tick
//! 5. Render with the leftover tick fraction as the blend alpha
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::prelude::*;
use std::path::PathBuf;

use flipbook::components::mapposition::MapPosition;
use flipbook::components::signals::Signals;
use flipbook::components::zindex::ZIndex;
use flipbook::resources::animationstore::AnimationStore;
use flipbook::resources::gameconfig::GameConfig;
use flipbook::resources::texturestore::TextureStore;
use flipbook::resources::worldtime::WorldTime;
use flipbook::systems::animation::animation;
use flipbook::systems::render::render_pass;
use flipbook::systems::time::update_world_time;

/// Flipbook sprite animation preview
#[derive(Parser)]
#[command(version, about = "Sprite-sheet keyframe animation engine demo")]
struct Cli {
    /// Path to the configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Preview a single animation by key instead of all of them.
    #[arg(long, value_name = "KEY")]
    animation: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults

    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .title("Flipbook")
        .build();
    rl.set_target_fps(config.target_fps);

    // --------------- Asset stores ---------------
    let mut animations = AnimationStore::new();
    if let Err(e) = animations.load_file(&config.animations_path) {
        log::error!("{}", e);
    }

    let mut textures = TextureStore::new();
    match std::fs::read_dir(&config.textures_path) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("png") {
                    continue;
                }
                let key = match path.file_stem().and_then(|s| s.to_str()) {
                    Some(stem) => stem.to_string(),
                    None => continue,
                };
                if let Err(e) = textures.load_file(&mut rl, &thread, key, &path.to_string_lossy())
                {
                    log::warn!("{}", e);
                }
            }
        }
        Err(e) => log::warn!(
            "Could not scan texture directory {}: {}",
            config.textures_path.display(),
            e
        ),
    }

    // --------------- ECS world + entities ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));

    let mut keys: Vec<String> = animations.animations.keys().cloned().collect();
    keys.sort();
    if let Some(only) = &cli.animation {
        keys.retain(|k| k == only);
        if keys.is_empty() {
            log::error!("No animation named '{}' in the store", only);
        }
    }

    // Lay the previews out on a simple grid
    let columns = ((keys.len() as f32).sqrt().ceil() as usize).max(1);
    let cell_w = window_width as f32 / columns as f32;
    let cell_h = window_height as f32 / columns.max(1) as f32;
    for (i, key) in keys.iter().enumerate() {
        if let Some(prototype) = animations.get(key) {
            let col = (i % columns) as f32;
            let row = (i / columns) as f32;
            world.spawn((
                prototype.clone(),
                MapPosition::new(cell_w * (col + 0.5), cell_h * (row + 0.5)),
                ZIndex(i as i32),
                Signals::default(),
            ));
        }
    }
    log::info!("Previewing {} animation(s)", keys.len());

    world.insert_resource(animations);
    world.insert_resource(textures);
    world.insert_resource(config);

    let mut update = Schedule::default();
    update.add_systems(animation);

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);

        // Drain whole fixed ticks; what remains becomes the render blend
        while world.resource_mut::<WorldTime>().consume_tick() {
            update.run(&mut world);
        }
        let alpha = world.resource::<WorldTime>().alpha();

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(24, 24, 32, 255));
        render_pass(&mut world, &mut d, alpha);
        d.draw_fps(10, 10);
    }
}
