//! Headless play-test client.
//!
//! Reads line commands from stdin, drives a [`PlaySession`] and prints what
//! happens. Logs go to a per-session file so stdout stays a clean transcript.
//!
//! ```bash
//! playmode --data-dir ./project --map town < moves.txt
//! ```

mod commands;
mod logging;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use playmode_content::ContentFactory;
use playmode_core::{FrameInput, Position};
use playmode_runtime::{
    FileSaveRepository, InputAction, PlaySession, RuntimeConfig, Screen, Settings,
};

use commands::{Command, HELP};

/// Frames allowed for a single move to settle before input resumes.
const MAX_SETTLE_FRAMES: usize = 1_000;

/// Headless play-test client
#[derive(Parser)]
#[command(name = "playmode")]
#[command(about = "Play-test a project from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Project directory (overrides PLAYMODE_DATA_DIR)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Map to start on (overrides PLAYMODE_START_MAP)
    #[arg(short, long, value_name = "MAP")]
    map: Option<String>,

    /// Save slot directory (overrides PLAYMODE_SAVE_DIR)
    #[arg(short, long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Spawn cell, e.g. `3,4`; defaults to the map's player placement
    #[arg(long, value_name = "X,Y", value_parser = parse_position)]
    spawn: Option<Position>,

    /// Seconds simulated per frame
    #[arg(long, default_value_t = 0.25, value_parser = parse_frame)]
    frame: f32,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = RuntimeConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.save_dir {
        config.save_dir = Some(dir);
    }
    if let Some(map) = cli.map {
        config.start_map = Some(map);
    }

    let (_session_id, _guard) = logging::setup_logging(config.session_id.as_deref())?;

    let start_map = config
        .start_map
        .clone()
        .ok_or_else(|| anyhow!("no start map: pass --map or set PLAYMODE_START_MAP"))?;

    let mut settings = Settings::default();
    settings.reload(&config.settings_path());

    let factory = ContentFactory::new(&config.data_dir);
    let mut session = PlaySession::start(factory, &start_map, cli.spawn)?.with_settings(settings);
    if let Some(dir) = &config.save_dir {
        session = session.with_repository(FileSaveRepository::new(dir)?);
    }

    println!("{}", HELP);
    let messages = session.update(&FrameInput::default(), cli.frame).messages;
    render(&session, &messages);

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let Some(command) = Command::parse(&line, session.settings()) else {
            continue;
        };
        tracing::debug!("Command: {:?}", command);

        let messages = match command {
            Command::Keys(actions) => press_all(&mut session, &actions, cli.frame),
            Command::Wait(frames) => (0..frames)
                .flat_map(|_| session.update(&FrameInput::default(), cli.frame).messages)
                .collect(),
            Command::Save(slot) => match session.save(&slot) {
                Ok(()) => vec![format!("Saved to '{}'.", slot)],
                Err(e) => vec![format!("Save failed: {}", e)],
            },
            Command::Load(slot) => match session.load(&slot) {
                Ok(()) => {
                    let mut messages = vec![format!("Loaded '{}'.", slot)];
                    messages.extend(session.update(&FrameInput::default(), cli.frame).messages);
                    messages
                }
                Err(e) => vec![format!("Load failed: {}", e)],
            },
            Command::Delete(slot) => match session.delete_save(&slot) {
                Ok(()) => vec![format!("Deleted '{}'.", slot)],
                Err(e) => vec![format!("Delete failed: {}", e)],
            },
            Command::Slots => match session.save_slots() {
                Ok(slots) if slots.is_empty() => vec!["No saves yet.".to_string()],
                Ok(slots) => vec![format!("Saves: {}", slots.join(", "))],
                Err(e) => vec![format!("Listing saves failed: {}", e)],
            },
            Command::Equip(item) => session.equip(&item),
            Command::Unequip(slot) => session.unequip(&slot),
            Command::Use(item) => session.use_item(&item),
            Command::Quests => {
                print_quests(&session);
                Vec::new()
            }
            Command::Status => {
                print_status(&session);
                Vec::new()
            }
            Command::Help => {
                println!("{}", HELP);
                Vec::new()
            }
            Command::Quit => break,
            Command::Unknown(text) => vec![format!("Unknown input '{}'. Type :help.", text)],
        };
        render(&session, &messages);
    }

    tracing::info!("Session ended on '{}'", session.state().current_map());
    Ok(())
}

/// Presses each key once, letting any move it starts settle.
fn press_all(session: &mut PlaySession, actions: &[InputAction], dt: f32) -> Vec<String> {
    let mut messages = Vec::new();
    for action in actions {
        messages.extend(session.update(&action.frame_input(), dt).messages);
        for _ in 0..MAX_SETTLE_FRAMES {
            if !session.orchestrator().is_moving() {
                break;
            }
            messages.extend(session.update(&FrameInput::default(), dt).messages);
        }
    }
    messages
}

fn render(session: &PlaySession, messages: &[String]) {
    for message in messages {
        println!("  > {}", message);
    }
    match session.screen() {
        Screen::Play => {}
        Screen::Dialogue => {
            if let Some(walker) = session.dialogue()
                && let Some(node) = walker.current_node()
            {
                println!("{}: {}", node.speaker, walker.visible_text());
                for (index, choice) in walker.visible_choices().enumerate() {
                    let marker = if index == walker.selected() { '>' } else { ' ' };
                    println!("  {} {}", marker, choice.text);
                }
            }
        }
        Screen::Paused => println!("[paused] p or q to resume"),
        Screen::Inventory => print_inventory(session),
        Screen::QuestLog => print_quests(session),
        Screen::GameOver => println!("[game over] e to restart"),
    }
}

fn print_status(session: &PlaySession) {
    let state = session.state();
    println!(
        "{} {} facing {} | HP {}/{} | ATK {} DEF {} | AP {}",
        state.current_map(),
        state.player.position,
        state.player.facing,
        state.player.health(),
        state.player.max_health(),
        state.effective_attack(),
        state.effective_defense(),
        state.effective_max_ap()
    );
    for effect in state.player.status_effects().iter() {
        println!("  {} ({} steps)", effect.kind.label(), effect.remaining_steps);
    }
}

fn print_inventory(session: &PlaySession) {
    let player = &session.state().player;
    println!("[inventory] i or q to close");
    if player.inventory().is_empty() {
        println!("  (empty)");
    }
    for item in player.inventory().iter() {
        println!("  {}", item);
    }
    for (slot, item) in player.equipment().iter() {
        println!("  [{}] {}", slot, item);
    }
}

fn print_quests(session: &PlaySession) {
    let log = session.quest_log();
    if log.is_empty() {
        println!("No quests yet.");
    }
    for entry in log {
        println!("{} [{}]", entry.name, entry.status);
        for (description, met) in entry.objectives {
            println!("  [{}] {}", if met { 'x' } else { ' ' }, description);
        }
    }
}

fn parse_position(value: &str) -> std::result::Result<Position, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", value))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate '{}': {}", part, e))
    };
    Ok(Position::new(parse(x)?, parse(y)?))
}

fn parse_frame(value: &str) -> std::result::Result<f32, String> {
    match value.parse::<f32>() {
        Ok(seconds) if seconds.is_finite() && seconds > 0.0 => Ok(seconds),
        _ => Err(format!("frame must be a positive number of seconds, got '{}'", value)),
    }
}
