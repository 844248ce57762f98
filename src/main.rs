use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::thread_rng;

use road_crossing::compute::GameState;
use road_crossing::config::{GameConfig, CANVAS_HEIGHT, CANVAS_WIDTH};
use road_crossing::display::{self, TerminalSurface, Viewport};
use road_crossing::graphics::SpriteSheet;
use road_crossing::input::move_for_key;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The UI owns the terminal, so logs only go to a file when one is configured.
fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Moves are taken from key releases when the terminal reports them (the
/// keyboard-enhancement path) and from presses otherwise.  Every accepted
/// key lands in the player's queue; the queue is drained once per frame.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> anyhow::Result<()> {
    let mut rng = thread_rng();
    let sprites = SpriteSheet::builtin();
    let mut state = GameState::new(config, &mut rng);
    let mut surface = TerminalSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    let mut viewport: Option<Viewport> = None;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Leave the last row for the controls hint.
        let (cols, rows) = terminal::size()?;
        let fitted = Viewport::fit(CANVAS_WIDTH, CANVAS_HEIGHT, cols, rows.saturating_sub(1));
        if viewport != Some(fitted) {
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            viewport = Some(fitted);
        }

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code, kind, modifiers, ..
                }) => {
                    if kind == KeyEventKind::Press {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                state.restart(&mut rng);
                                continue;
                            }
                            _ => {}
                        }
                    }

                    let trigger = if keyboard_enhanced {
                        KeyEventKind::Release
                    } else {
                        KeyEventKind::Press
                    };
                    if kind == trigger {
                        state.handle_input(move_for_key(code));
                    }
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let (x, y) = fitted.cell_to_canvas(column, row);
                    state.handle_touch(x, y);
                }
                _ => {}
            }
        }

        let dt = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();

        state.frame(dt, &mut surface, &sprites, &mut rng)?;
        display::render(out, &surface, &fitted)?;

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame {
            thread::sleep(config.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;
    info!(
        "starting with {} enemies, {:?} per frame",
        config.num_enemies, config.frame
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Key-release events need the keyboard enhancement protocol; terminals
    // without it fall back to presses.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &config, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("game loop failed: {e:#}");
    }
    result
}
