//! Example: Print a few frames of the crystal without taking over the terminal
//!
//! Usage: cargo run --example snapshot -- [columns] [rows] [frames]

use std::env;
use std::io::{self, Write};
use std::time::Duration;

use crystal_core::{render, Scene, SceneConfig};
use crystal_terminal::{viewport_for, AsciiRenderer};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let columns = args.get(1).and_then(|v| v.parse().ok()).unwrap_or(60);
    let rows = args.get(2).and_then(|v| v.parse().ok()).unwrap_or(24);
    let frames: u32 = args.get(3).and_then(|v| v.parse().ok()).unwrap_or(3);

    let viewport = viewport_for(columns, rows)?;
    let mut scene = Scene::new(SceneConfig::default(), viewport);
    let mut renderer = AsciiRenderer::new(viewport);

    // Pretend the pointer sits in the top-right corner
    scene.pointer_moved(viewport.width() as f32, 0.0);

    let mut stdout = io::stdout();
    for frame in 0..frames {
        let now = Duration::from_millis(500) * frame;
        match render::render_frame(&mut scene, &mut renderer, now) {
            Ok(()) => {}
            Err(never) => match never {},
        }

        writeln!(stdout, "--- t = {:?} ---", now)?;
        renderer.draw(&mut stdout)?;
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}
