mod best_score;
mod config;
mod constants;
mod entities;
mod game;
mod rendering;
mod sim;
mod spawner;
mod terminal_io;

use std::collections::HashMap;
use std::env;
use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    Clear, ClearType, disable_raw_mode, enable_raw_mode, size, supports_keyboard_enhancement,
};
use log::{error, info};

use crate::best_score::FileBestScore;
use crate::config::{ControlMode, GameConfig};
use crate::game::Game;
use crate::rendering::{OutputTarget, ScreenBuffer};
use crate::terminal_io::SimulatedInput;

fn main() -> io::Result<()> {
    simple_logging::log_to_file("sky-dash.log", log::LevelFilter::Info).unwrap();
    info!("Starting Sky Dash.");

    let args: Vec<String> = env::args().collect();
    let debug_mode_active = args.iter().any(|a| a == "--debug");

    let mut config = GameConfig::default();
    if args.iter().any(|a| a == "--pointer") {
        config.control = ControlMode::Pointer;
    }
    config
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let stdout_target;
    let mut simulated_input: Option<SimulatedInput> = None;
    let mut max_frames: Option<u64> = None;
    let terminal_width: u16;
    let terminal_height: u16;
    let mut enhanced_keys = false;

    if debug_mode_active {
        info!("Debug mode enabled.");
        // --debug [width height [frames]]
        let pos = args.iter().position(|a| a == "--debug").unwrap_or(0);
        terminal_width = args
            .get(pos + 1)
            .and_then(|a| a.parse::<u16>().ok())
            .unwrap_or(80);
        terminal_height = args
            .get(pos + 2)
            .and_then(|a| a.parse::<u16>().ok())
            .unwrap_or(24);
        max_frames = args.get(pos + 3).and_then(|a| a.parse::<u64>().ok());
        info!("Debug resolution set to {}x{}", terminal_width, terminal_height);
        stdout_target =
            OutputTarget::ScreenBuffer(ScreenBuffer::new(terminal_width, terminal_height));

        let mut sim_events = HashMap::new();
        sim_events.insert(10, Event::Key(KeyCode::Left.into()));
        sim_events.insert(40, Event::Key(KeyCode::Right.into()));
        sim_events.insert(80, Event::Key(KeyCode::Char('r').into()));
        if max_frames.is_none() {
            sim_events.insert(200, Event::Key(KeyCode::Char('q').into()));
        }
        simulated_input = Some(SimulatedInput::new(sim_events));
    } else {
        info!("Attempting to enable raw mode.");
        enable_raw_mode().map_err(|e| {
            error!("Failed to enable raw mode: {}", e);
            e
        })?;
        let (width, height) = size().map_err(|e| {
            error!("Failed to get terminal size: {}", e);
            e
        })?;
        terminal_width = width;
        terminal_height = height;
        stdout_target = OutputTarget::Stdout(io::stdout());
        info!("Terminal size: {}x{}", terminal_width, terminal_height);
        enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
        info!("Keyboard enhancement supported: {}", enhanced_keys);
    }

    let mut game = Game::new(
        terminal_width,
        terminal_height,
        stdout_target,
        config,
        Box::new(FileBestScore::new("sky-dash-best.json")),
        simulated_input,
        debug_mode_active,
        max_frames,
    );

    if !debug_mode_active {
        game.stdout_target.execute_other_command(Clear(ClearType::All))?;
        game.stdout_target.execute_other_command(Hide)?;
        game.stdout_target.execute_other_command(EnableMouseCapture)?;
        if enhanced_keys {
            // Release events let held keys stop instantly instead of
            // decaying out through the repeat countdown.
            game.stdout_target
                .execute_other_command(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))?;
        }
    }

    let result = game.run();

    if !debug_mode_active {
        if enhanced_keys {
            let _ = game
                .stdout_target
                .execute_other_command(PopKeyboardEnhancementFlags);
        }
        let _ = game.stdout_target.execute_other_command(DisableMouseCapture);
        let _ = game.stdout_target.execute_other_command(Show);
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode on exit: {}", e);
        }
    }

    info!("Exiting.");
    result
}
