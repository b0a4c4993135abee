mod cli;
mod terminal_game;

use std::io;

use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal::{disable_raw_mode, enable_raw_mode, size, supports_keyboard_enhancement},
};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use vibe_asteroids::audio::SoundManager;
use vibe_asteroids::game::World;
use vibe_asteroids::highscore::HighScoreStore;
use vibe_asteroids::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use vibe_asteroids::terminal_io::SimulatedInput;

use crate::cli::Cli;
use crate::terminal_game::TerminalGame;

const DEBUG_QUIT_FRAME: u64 = 300;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    simple_logging::log_to_file(&cli.log_file, cli.log_level)?;
    info!("Starting Vibe-asteroids application.");

    let mut rng = match cli.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let high_scores = HighScoreStore::new(&cli.high_score_file);
    let high_score = high_scores.load_or_default();
    info!("High score file: {}", high_scores.path().display());

    let mut stdout_target;
    let simulated_input;
    let terminal_width: u16;
    let terminal_height: u16;
    let key_releases: bool;

    if cli.debug {
        info!("Debug mode enabled.");
        terminal_width = cli.width;
        terminal_height = cli.height;
        info!("Debug resolution set to {}x{}", terminal_width, terminal_height);
        stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(terminal_width, terminal_height));
        simulated_input = Some(SimulatedInput::demo_script(cli.frames.unwrap_or(DEBUG_QUIT_FRAME)));
        key_releases = true;
    } else {
        info!("Attempting to enable raw mode.");
        enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
        terminal_width = width;
        terminal_height = height;
        info!("Terminal size: {}x{}", terminal_width, terminal_height);
        stdout_target = OutputTarget::Stdout(io::stdout());
        simulated_input = None;

        // Release events make held keys exact; without them the driver falls back to a hold window.
        key_releases = supports_keyboard_enhancement().unwrap_or(false);
        if key_releases {
            stdout_target
                .execute_other_command(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
                .map_err(|e| { error!("Failed to enable key release events: {}", e); e })?;
        }
        info!("Key release events {}", if key_releases { "enabled" } else { "unavailable" });

        let game_grid_dummy = GameGrid::new(terminal_width, terminal_height);
        game_grid_dummy
            .clear_screen_manual(&mut stdout_target, terminal_width, terminal_height)
            .map_err(|e| { error!("Failed to clear screen manually: {}", e); e })?;
        stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    }

    let mut game = TerminalGame::new(
        terminal_width,
        terminal_height,
        stdout_target,
        simulated_input,
        cli.debug,
        cli.frames,
        key_releases,
        SoundManager::with_sample_dir(&cli.sound_dir),
        high_scores,
    );

    let (field_width, field_height) = game.field_size();
    let mut world = World::new(field_width, field_height, high_score, &mut rng);
    let result = game.run(&mut world, &mut rng);
    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }

    if !cli.debug {
        if key_releases {
            game.stdout_target.execute_other_command(PopKeyboardEnhancementFlags)?;
        }
        game.stdout_target.execute_other_command(Show).map_err(|e| { error!("Failed to show cursor on exit: {}", e); e })?;
        disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })?;
    }

    info!("Exiting application. High score: {}", world.high_score);
    result
}
