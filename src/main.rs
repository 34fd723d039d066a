use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tui_fleet::app::App;
use tui_fleet::{data, ui};

/// Result file shown on startup and reloaded with 'r'.
const DEFAULT_RESULT_PATH: &str = "data/result.json";

fn main() -> Result<()> {
    // Log to a file when asked; stdout belongs to the TUI
    if let Ok(log_path) = std::env::var("FLEET_LOG") {
        WriteLogger::init(
            LevelFilter::Debug,
            Config::default(),
            File::create(&log_path)?,
        )?;
    }

    let result_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULT_PATH));

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &result_path);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Load the result file, falling back to the built-in demo fleet.
fn load_or_demo(path: &Path) -> tui_fleet::fleet::result::RouteResult {
    match data::load_result(path) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("{err:#}; using demo fleet");
            data::demo_result()
        }
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Always track the position for the cursor marker
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, result_path: &Path) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(size.width as usize, size.height as usize);

    app.submit(load_or_demo(result_path));

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Poll at ~60fps; each loop iteration is one tick
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            // Replay the current routes
                            KeyCode::Char('a') | KeyCode::Char(' ') => app.animate(),

                            // Reload the result file
                            KeyCode::Char('r') => app.submit(load_or_demo(result_path)),

                            // Pan with hjkl or arrow keys
                            KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                            KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                            // Zoom
                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        // Advance any running vehicle animation
        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
