mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use log::{error, info, LevelFilter};
use rand::thread_rng;

use display::TerminalSurface;
use lane_rush::compute::GameManager;
use lane_rush::config::TuningStore;
use lane_rush::entities::Direction;
use lane_rush::keys::Key;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Virtual viewport the simulation runs in; the terminal surface scales it.
const VIEWPORT_WIDTH: f32 = 800.0;
const VIEWPORT_HEIGHT: f32 = 600.0;

// ── Logging ───────────────────────────────────────────────────────────────────

fn log_path() -> PathBuf {
    std::env::var_os("LANE_RUSH_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("lane_rush.log"))
}

/// stderr is the game screen, so logs go to a file.  Logging is best effort.
fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info).parse_default_env();
    match File::create(log_path()) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Off);
        }
    }
    let _ = builder.try_init();
}

// ── Input translation ─────────────────────────────────────────────────────────

fn to_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::Arrow(Direction::Up),
        KeyCode::Down => Key::Arrow(Direction::Down),
        KeyCode::Left => Key::Arrow(Direction::Left),
        KeyCode::Right => Key::Arrow(Direction::Right),
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Each frame drains pending key presses,
/// advances the simulation once and draws it.
fn game_loop<W: Write>(
    surface: &mut TerminalSurface<W>,
    game: &mut GameManager,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char('q') | KeyCode::Char('Q') if game.is_game_over() => {
                    return Ok(());
                }
                _ => game.handle_key(to_key(code)),
            }
        }

        game.update(&mut rng);

        let (cols, rows) = terminal::size()?;
        surface.resize(cols, rows);
        game.render(surface)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let store = TuningStore::from_env();
    let tuning = store.load();
    info!("tuning loaded from {}", store.path().display());
    let mut game = GameManager::with_tuning(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, tuning);

    let mut surface = TerminalSurface::new(BufWriter::new(stdout()), VIEWPORT_WIDTH, VIEWPORT_HEIGHT);

    terminal::enable_raw_mode()?;
    surface.writer().execute(terminal::EnterAlternateScreen)?;
    surface.writer().execute(cursor::Hide)?;

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

    let result = game_loop(&mut surface, &mut game, &rx);
    if let Err(e) = &result {
        error!("game loop failed: {}", e);
    }
    info!("exiting with score {} after {} frames", game.score, game.frame);

    // Always restore the terminal
    let out = surface.writer();
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
