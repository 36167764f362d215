mod application;
mod audio;
mod game_renderers;
mod keybinds_presets;
mod live_input_handler;
mod logging;
mod palette_presets;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::Parser;

use crate::application::{Glyphset, Settings};
use crate::palette_presets::PaletteChoice;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Custom seed for the piece sequence, given as a 64-bit integer.
    /// Playing with the same seed yields the same sequence of pieces.
    /// Example: `./stackfall --seed=42` or `./stackfall -s 42`.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Milliseconds between two gravity ticks.
    #[arg(short, long)]
    tick_ms: Option<u64>,
    /// Colors used to draw pieces.
    #[arg(short, long, value_enum)]
    palette: Option<PaletteChoice>,
    /// Draw with plain ASCII characters only.
    #[arg(long)]
    ascii: bool,
    /// Audio file to loop as background music while playing.
    #[arg(short, long)]
    music: Option<PathBuf>,
    /// Settings file to read instead of the one in the standard config folder.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// File to append log messages to. Nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Most verbose log level written to the log file.
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Read commandline arguments.
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        logging::init(path, args.log_level)?;
    }

    // Gather settings: file first, then commandline overrides.
    let mut settings = Settings::load(args.settings.as_deref());
    if let Some(tick_ms) = args.tick_ms {
        settings.config.tick_interval = std::time::Duration::from_millis(tick_ms.max(1));
    }
    if let Some(palette) = args.palette {
        settings.graphics.palette = palette;
    }
    if args.ascii {
        settings.graphics.glyphset = Glyphset::ASCII;
    }
    if args.music.is_some() {
        settings.music = args.music;
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("starting with seed {seed} and {settings:?}");

    // Initialize application.
    let stdout = io::BufWriter::new(io::stdout());
    let mut app = application::Application::new(stdout, settings, seed);

    // Catch panics and write error to separate file, so it isn't lost due to app's terminal shenanigans.
    std::panic::set_hook(Box::new(|panic_info| {
        // Forcefully reset terminal state.
        let _ = crossterm::terminal::disable_raw_mode();
        let _ =
            crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::style::ResetColor);
        let _ = crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::cursor::Show);
        let _ = crossterm::ExecutableCommand::execute(
            &mut io::stderr(),
            crossterm::terminal::LeaveAlternateScreen,
        );

        log::error!("panic: {panic_info}");
        let crash_file_name = format!(
            "stackfall_crash-msg_{}.txt",
            chrono::Utc::now().format("%Y-%m-%d_%Hh%Mm%Ss")
        );
        if let Ok(mut file) = std::fs::File::create(crash_file_name) {
            let _ = file.write_all(panic_info.to_string().as_bytes());
        }

        // Print the actual panic info.
        eprint!("{panic_info}\n\n");
    }));

    // Run main application.
    let exit_msg = app.run()?;
    drop(app);
    println!("{exit_msg}");

    Ok(())
}
