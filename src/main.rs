use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use top_down_shooter::assets::SpriteSheet;
use top_down_shooter::compute::{init_world, tick};
use top_down_shooter::config::Config;
use top_down_shooter::display::{self, terminal::rows_for, terminal::TerminalScreen};
use top_down_shooter::error::{GameError, Result};
use top_down_shooter::input::{Control, InputTracker};

#[derive(Debug, Parser)]
#[command(author, version, about = "Top-down arcade shooter for the terminal", long_about = None)]
struct Args {
    /// RON config file (defaults to ./top_down_shooter.ron if present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the background and enemy spawns.
    #[arg(long)]
    seed: Option<u64>,
    /// Display width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Display height in pixels (two per terminal row).
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    fps: Option<u32>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(width) = args.width {
        config.display.width = width;
    }
    if let Some(height) = args.height {
        config.display.height = height;
    }
    if let Some(fps) = args.fps {
        config.display.fps = fps;
    }
    config.validate()?;
    Ok(config)
}

/// The screen belongs to the game, so log lines go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| GameError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .init();
    Ok(())
}

fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  One update then one draw per frame.
fn game_loop<W: Write>(
    out: &mut W,
    config: &Config,
    sheet: &SpriteSheet,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_time: Duration = config.display.frame_duration();
    let (width, height) = (config.display.width, config.display.height);

    let mut world = init_world(width, height, &mut rng);
    let mut screen = TerminalScreen::new(width, height);
    let mut tracker = InputTracker::new();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            if let Event::Resize(..) = event {
                screen.invalidate();
            }
            if tracker.handle(&event) == Control::Quit {
                info!("quit after {} frames", world.frame);
                return Ok(());
            }
        }

        let input = tracker.snapshot();
        world = tick(&world, &input, &mut rng);
        display::render(out, &mut screen, &world, sheet)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        } else {
            trace!("frame {} overran by {:?}", world.frame, elapsed - frame_time);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config.log_file)?;
    info!("starting with {:?}", config);

    // A broken sheet is fatal before the terminal is touched.
    let sheet = match &config.sheet {
        Some(path) => SpriteSheet::load(path)?,
        None => SpriteSheet::bundled()?,
    };

    let (cols, rows) = terminal::size()?;
    let (need_cols, need_rows) = (config.display.width as u16, rows_for(config.display.height));
    if cols < need_cols || rows < need_rows {
        return Err(GameError::TerminalTooSmall {
            cols,
            rows,
            need_cols,
            need_rows,
        });
    }

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal(&mut stdout(), keyboard_enhanced);
        default_hook(panic_info);
    }));

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

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        game_loop(&mut out, &config, &sheet, &rx)
    }));

    match result {
        Ok(result) => {
            // Finish any half-written frame before leaving the alternate screen.
            let _ = out.flush();
            restore_terminal(&mut out, keyboard_enhanced);
            result
        }
        Err(payload) => {
            // The hook already restored the terminal; throw away the partial
            // frame rather than let the drop flush it onto the normal screen.
            let (_stdout, _unwritten) = out.into_parts();
            panic::resume_unwind(payload)
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
