//! Terminal host for the crystal backdrop
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use crystal_core::{render, Scene, SceneConfig, Viewport};

pub mod renderer;

pub use renderer::{viewport_for, AsciiRenderer, CELL_ASPECT};

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    renderer: AsciiRenderer,
    running: bool,
    started: Instant,
    target_frame_time: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: SceneConfig, target_fps: u32) -> anyhow::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let viewport = viewport_for(columns, rows)?;
        Ok(Self::with_viewport(config, viewport, target_fps))
    }

    /// Build the app for a known viewport without querying the terminal
    pub fn with_viewport(config: SceneConfig, viewport: Viewport, target_fps: u32) -> Self {
        Self {
            scene: Scene::new(config, viewport),
            renderer: AsciiRenderer::new(viewport),
            running: true,
            started: Instant::now(),
            target_frame_time: Duration::from_secs(1) / target_fps.max(1),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        tracing::info!(
            frame_ms = self.target_frame_time.as_millis() as u64,
            "terminal loop started"
        );

        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event before drawing
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        tracing::info!(frames = self.scene.frames(), "terminal loop stopped");
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.running = false;
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
                column,
                row,
                ..
            }) => {
                // Aim at the centre of the cell under the cursor
                let x = column as f32 + 0.5;
                let y = (row as f32 + 0.5) * CELL_ASPECT as f32;
                self.scene.pointer_moved(x, y);
            }
            Event::Resize(columns, rows) => self.resize_to(columns, rows),
            _ => {}
        }
    }

    /// Follow a terminal resize; a zero-sized terminal keeps the previous grid
    pub fn resize_to(&mut self, columns: u16, rows: u16) {
        let resized = viewport_for(columns, rows).and_then(|viewport| {
            render::resize(
                &mut self.scene,
                &mut self.renderer,
                viewport.width(),
                viewport.height(),
            )
        });
        if let Err(e) = resized {
            tracing::warn!(columns, rows, error = %e, "ignoring terminal resize");
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let now = self.started.elapsed();
        match render::render_frame(&mut self.scene, &mut self.renderer, now) {
            Ok(()) => {}
            Err(never) => match never {},
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Crystal | FPS: {:.1} | Move the mouse to steer | Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app() -> TerminalApp {
        TerminalApp::with_viewport(SceneConfig::default(), viewport_for(40, 12).unwrap(), 30)
    }

    #[test]
    fn test_zero_size_resize_keeps_running() {
        let mut app = app();
        app.handle_event(Event::Resize(40, 0));
        app.handle_event(Event::Resize(0, 12));

        assert!(app.is_running());
        assert_eq!(app.scene().viewport(), viewport_for(40, 12).unwrap());
        assert_eq!((app.renderer().width(), app.renderer().height()), (40, 12));
    }

    #[test]
    fn test_resize_follows_terminal() {
        let mut app = app();
        app.handle_event(Event::Resize(100, 30));
        assert_eq!(app.scene().viewport(), viewport_for(100, 30).unwrap());
        assert_eq!((app.renderer().width(), app.renderer().height()), (100, 30));
    }

    #[test]
    fn test_mouse_move_starts_tweens() {
        let mut app = app();
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 39,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(app.scene().active_tweens(), 2);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(app.is_running());
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!app.is_running());
    }
}
