//! Sprite-sheet inspector.
//!
//! Loads an INI sheet definition and either prints a summary, resolves a
//! bookmark, or plays an animation for a number of fixed-delta frames
//! through the same ECS systems a game would run.
//!
//! # Running
//!
//! ```sh
//! cargo run -- assets/hero.ini --animation walk --image 256x64 --dt 0.016 --frames 60
//! cargo run -- assets/hero.ini --bookmark idle --image 256x64
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};

use sheetanim::components::sheetanimation::SheetAnimation;
use sheetanim::components::sprite::Sprite;
use sheetanim::error::SheetError;
use sheetanim::resources::sheetstore::SheetStore;
use sheetanim::resources::worldtime::WorldTime;
use sheetanim::systems::sheetanimation::sheet_animation;
use sheetanim::systems::time::update_world_time;

const SHEET_KEY: &str = "sheet";

/// Inspect and simulate sprite-sheet animation definitions.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI sheet definition.
    config: PathBuf,

    /// Play this animation and print every frame.
    #[arg(long, short)]
    animation: Option<String>,

    /// Resolve this bookmark and print its source rectangle.
    #[arg(long, short)]
    bookmark: Option<String>,

    /// Texture size in pixels, as WIDTHxHEIGHT.
    #[arg(long, default_value = "256x256", value_parser = parse_size)]
    image: (u32, u32),

    /// Fixed frame delta in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Time scale applied to every frame delta.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let w = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Ok((w, h))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SheetError> {
    let mut store = SheetStore::new();
    store.load_from_file(SHEET_KEY, &cli.config)?;
    let (width, height) = cli.image;

    let sheet = store.get_or_err(SHEET_KEY)?;
    let grid = sheet.grid_size();
    let (cell_w, cell_h) = sheet.cell_size(width, height);
    println!(
        "grid {}x{}, cell {}x{} px for a {}x{} image",
        grid.x, grid.y, cell_w, cell_h, width, height
    );

    if let Some(name) = &cli.bookmark {
        let rect = sheet.bookmark_rect(width, height, name)?;
        println!(
            "bookmark {name}: ({}) -> rect {},{} {}x{}",
            sheet.resolve_bookmark(name)?,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
    }

    let Some(animation) = &cli.animation else {
        if cli.bookmark.is_none() {
            print_summary(&store)?;
        }
        return Ok(());
    };

    // Fail before building the world if the name or the step is invalid.
    sheet.animation(animation)?;
    frame_delta(cli.dt, cli.time_scale)?;
    simulate(store, animation, cli)
}

/// Scaled per-frame delta, rejected if negative or non-finite.
fn frame_delta(dt: f32, time_scale: f32) -> Result<f32, SheetError> {
    let delta = dt * time_scale;
    if !(delta.is_finite() && delta >= 0.0) {
        return Err(SheetError::InvalidDelta(delta));
    }
    Ok(delta)
}

fn print_summary(store: &SheetStore) -> Result<(), SheetError> {
    let sheet = store.get_or_err(SHEET_KEY)?;
    for name in sheet.animation_names() {
        let anim = sheet.animation(name)?;
        println!(
            "animation {name}: {} steps, {:.3}s, repeats={}",
            anim.step_count(),
            anim.total_duration(),
            anim.repeats()
        );
        for (i, step) in anim.steps().iter().enumerate() {
            match &step.tag {
                Some(tag) => println!("  {i}: ({}) {:.3}s [{tag}]", step.source, step.duration),
                None => println!("  {i}: ({}) {:.3}s", step.source, step.duration),
            }
        }
    }
    for (name, index) in sheet.bookmarks() {
        println!("bookmark {name}: ({index})");
    }
    Ok(())
}

fn simulate(store: SheetStore, animation: &str, cli: &Cli) -> Result<(), SheetError> {
    let (width, height) = cli.image;
    let mut world = World::new();
    world.insert_resource(store);
    world.insert_resource(WorldTime {
        time_scale: cli.time_scale,
        ..Default::default()
    });
    let entity = world
        .spawn((
            SheetAnimation::new(SHEET_KEY, animation),
            Sprite::new(SHEET_KEY, width, height),
        ))
        .id();

    let mut schedule = Schedule::default();
    schedule.add_systems(sheet_animation);

    info!(
        "Simulating '{}' for {} frames at dt={}",
        animation, cli.frames, cli.dt
    );
    for frame in 0..cli.frames {
        update_world_time(&mut world, cli.dt);
        schedule.run(&mut world);

        let elapsed = world.resource::<WorldTime>().elapsed;
        let Some(state) = world.get::<SheetAnimation>(entity) else {
            break;
        };
        let Some(sprite) = world.get::<Sprite>(entity) else {
            break;
        };
        println!(
            "{frame:>5} t={elapsed:.3} step={} progress={:.3} rect={},{} {}x{}{}{}",
            state.step,
            state.progress,
            sprite.source.x,
            sprite.source.y,
            sprite.source.width,
            sprite.source.height,
            if state.finished { " finished" } else { "" },
            state
                .tag
                .as_deref()
                .map(|t| format!(" [{t}]"))
                .unwrap_or_default()
        );
    }
    Ok(())
}
