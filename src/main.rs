//! Brick Breaker entry point
//!
//! Headless front end: runs a demo round or drives the level editor model
//! from the command line.
//!
//! Usage:
//!   brick-breaker play [frames]
//!   brick-breaker level <name> [rows] [cols]
//!   brick-breaker show <name>
//!   brick-breaker list
//!
//! Settings are read from `$BRICK_BREAKER_SETTINGS` (default `settings.json`).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use brick_breaker::consts::SIM_DT;
use brick_breaker::editor::{BrickKind, EditorSession, Severity};
use brick_breaker::persistence::{DirStore, LevelStore};
use brick_breaker::settings::Settings;
use brick_breaker::sim::{Arena, GameEvent, GameSession, TickInput, tick};

fn main() -> ExitCode {
    env_logger::init();

    let settings_path = std::env::var_os("BRICK_BREAKER_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let settings = Settings::load(&settings_path);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("play");

    let ok = match command {
        "play" => {
            let frames = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3600);
            play(&settings, frames)
        }
        "level" => match args.get(1) {
            Some(name) => {
                let rows = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(settings.editor.rows);
                let cols = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(settings.editor.cols);
                build_level(&settings, name, rows, cols)
            }
            None => usage(),
        },
        "show" => match args.get(1) {
            Some(name) => show_level(&settings, name),
            None => usage(),
        },
        "list" => {
            let store = DirStore::new(&settings.editor.levels_dir);
            for name in store.list() {
                println!("{}", name);
            }
            true
        }
        _ => usage(),
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn usage() -> bool {
    eprintln!("usage: brick-breaker [play [frames] | level <name> [rows] [cols] | show <name> | list]");
    false
}

/// Idle-mode round with the headless arena
fn play(settings: &Settings, frames: u64) -> bool {
    let Ok(mut session) = GameSession::from_settings(settings) else {
        return false;
    };
    let mut arena = Arena::new(&settings.arena, &settings.ball);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let (mut launches, mut paddle_hits, mut bounces, mut lost) = (0u32, 0u32, 0u32, 0u32);
    for _ in 0..frames {
        tick(&mut session, &input, SIM_DT, &mut arena);
        for event in session.drain_events() {
            match event {
                GameEvent::Launched { .. } => launches += 1,
                GameEvent::PaddleHit { .. } => paddle_hits += 1,
                GameEvent::Bounced { .. } => bounces += 1,
                GameEvent::BallLost => lost += 1,
            }
        }
    }

    println!(
        "{} frames: {} launches, {} paddle hits, {} wall/brick bounces, {} balls lost",
        session.frame, launches, paddle_hits, bounces, lost
    );
    true
}

/// Lay out a demo pattern and save it, asking before overwriting
fn build_level(settings: &Settings, name: &str, rows: usize, cols: usize) -> bool {
    let store = DirStore::new(&settings.editor.levels_dir);
    let mut editor = EditorSession::new(store, &settings.editor);
    editor.resize(rows, cols);

    let kinds = &BrickKind::ALL[1..];
    let (rows, cols) = (editor.grid().rows(), editor.grid().cols());
    for row in 0..rows.min(4) {
        editor.set_brick_kind(kinds[row % kinds.len()]);
        for col in (row % 2..cols).step_by(2) {
            editor.click_cell(row, col);
        }
    }
    print!("{}", editor.grid().render_ascii());

    let mut ask = |prompt: &str| {
        print!("{} [y/N] ", prompt);
        let _ = io::stdout().flush();
        let mut line = String::new();
        let answered = io::stdin().lock().read_line(&mut line).is_ok();
        answered && line.trim().eq_ignore_ascii_case("y")
    };
    let ok = editor.save_level_as(name, &mut ask);
    report(&mut editor);
    ok
}

fn show_level(settings: &Settings, name: &str) -> bool {
    let store = DirStore::new(&settings.editor.levels_dir);
    let mut editor = EditorSession::new(store, &settings.editor);
    let ok = editor.load_level(name);
    if ok {
        let grid = editor.grid();
        println!(
            "{} ({}x{}, cell size {}, {} bricks)",
            name,
            grid.rows(),
            grid.cols(),
            grid.cell_size(),
            grid.occupied()
        );
        print!("{}", grid.render_ascii());
        for (kind, color) in editor.palette().entries() {
            println!("  {} {:<13} {}", kind.glyph(), kind.as_str(), color.to_hex());
        }
    }
    report(&mut editor);
    ok
}

fn report<S: LevelStore>(editor: &mut EditorSession<S>) {
    for note in editor.take_notifications() {
        match note.severity {
            Severity::Success => println!("{}", note.message),
            Severity::Fail => eprintln!("{}", note.message),
        }
    }
}
