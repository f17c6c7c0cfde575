//! Dodge the Blocks entry point
//!
//! Parses arguments, sets up logging and configuration, then hands the
//! terminal to the frame driver.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;

use dodge_blocks::Config;
use dodge_blocks::frontend::App;
use dodge_blocks::sim::GameState;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the block generator, given as a 64-bit integer.
    /// The same seed and the same inputs replay the same game.
    /// Example: `dodge-blocks --seed 42`.
    #[arg(short, long)]
    seed: Option<u64>,
    /// JSON file with `tuning` and/or `settings` overrides.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Frame rate cap (motion is per frame, so this also sets game speed).
    #[arg(long)]
    fps: Option<u32>,
    /// Show an FPS counter in the top-right corner.
    #[arg(long)]
    show_fps: bool,
    /// Write log output to this file (filtered by `RUST_LOG`, default `info`).
    /// Without it, logs go to stderr and are off unless `RUST_LOG` is set.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => env_logger::init(),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;
    log::info!("Dodge the Blocks starting...");

    // Bad config stops us before the terminal is touched
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(fps) = args.fps {
        config.settings.target_fps = fps;
    }
    if args.show_fps {
        config.settings.show_fps = true;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Game initialized with seed: {}", seed);
    let state = GameState::new(seed, config.tuning);

    // Restore the terminal before the panic message is printed, so it is
    // not lost on the alternate screen.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stderr = io::stderr();
        let _ = crossterm::execute!(
            stderr,
            crossterm::style::ResetColor,
            crossterm::cursor::Show,
            crossterm::terminal::LeaveAlternateScreen,
        );
        default_hook(panic_info);
    }));

    let app = App::new(io::BufWriter::new(io::stdout()), state, config.settings)?;
    let state = app.run()?;
    log::info!(
        "Exiting after {} frames, last score {}",
        state.time_ticks,
        state.session.display_score()
    );

    Ok(())
}
