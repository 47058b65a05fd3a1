//! Terminal driver for the project board.
//!
//! # Responsibility
//! - Feed line commands from stdin into the board components.
//! - Print the re-rendered board after each change.
//!
//! Usage: `projboard_cli [--config <file.json>] [--log-dir <absolute dir>]`

use log::info;
use projboard_core::{
    core_version, init_logging, projects_json, BoardConfig, InputError, ProjectBoard,
    ProjectState, ProjectStatus,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const HELP: &str = "commands:
  add <title> | <description> | <people>
  move <id or prefix> <active|finished>
  list
  dump
  help
  quit";

struct CliArgs {
    config: Option<String>,
    log_dir: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        config: None,
        log_dir: None,
    };
    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "--config" => &mut parsed.config,
            "--log-dir" => &mut parsed.log_dir,
            other => return Err(format!("unknown argument `{other}`")),
        };
        *slot = Some(args.next().ok_or_else(|| format!("`{arg}` needs a value"))?);
    }
    Ok(parsed)
}

/// File logging only starts with `--log-dir`; a configured level alone does nothing.
fn unused_log_level_warning(config: &BoardConfig) -> Option<String> {
    config.log_level.as_deref().map(|level| {
        format!("config sets log_level `{level}` but logging is off; pass --log-dir to enable it")
    })
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("projboard: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => BoardConfig::from_path(path).map_err(|err| err.to_string())?,
        None => BoardConfig::default(),
    };
    match &args.log_dir {
        Some(log_dir) => init_logging(config.log_level(), log_dir)?,
        None => {
            if let Some(warning) = unused_log_level_warning(&config) {
                eprintln!("projboard: {warning}");
            }
        }
    }
    info!(
        "event=cli_start module=cli status=ok config={}",
        args.config.as_deref().unwrap_or("default")
    );

    let mut board =
        ProjectBoard::new(ProjectState::instance(), &config).map_err(|err| err.to_string())?;

    println!("projboard {} - type `help`", core_version());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| format!("failed to read stdin: {err}"))?;
        if read == 0 {
            return Ok(());
        }

        match execute(&mut board, line.trim()) {
            Outcome::Continue(message) => println!("{message}"),
            Outcome::Quit => return Ok(()),
        }
    }
}

enum Outcome {
    Continue(String),
    Quit,
}

fn execute(board: &mut ProjectBoard, line: &str) -> Outcome {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let message = match command {
        "" => String::new(),
        "add" => add(board, rest),
        "move" => move_card(board, rest),
        "list" => board.render_text(),
        "dump" => dump(board),
        "help" => HELP.to_string(),
        "quit" | "exit" => return Outcome::Quit,
        other => format!("unknown command `{other}`; type `help`"),
    };
    Outcome::Continue(message)
}

fn add(board: &mut ProjectBoard, rest: &str) -> String {
    let mut parts = rest.splitn(3, '|');
    let input = board.input_mut();
    input.set_title(parts.next().unwrap_or_default());
    input.set_description(parts.next().unwrap_or_default());
    input.set_people(parts.next().unwrap_or_default());

    match input.submit() {
        Ok(_) => board.render_text(),
        // Shown in place of a blocking alert.
        Err(err @ InputError::Invalid { .. }) => format!("! {err}"),
        Err(err) => format!("error: {err}"),
    }
}

fn move_card(board: &mut ProjectBoard, rest: &str) -> String {
    let mut parts = rest.split_whitespace();
    let (Some(needle), Some(status)) = (parts.next(), parts.next()) else {
        return "usage: move <id or prefix> <active|finished>".to_string();
    };
    let Some(status) = ProjectStatus::parse(status) else {
        return format!("unknown status `{status}`");
    };
    let Some(id) = board.resolve_id(needle) else {
        return format!("no single project matches `{needle}`");
    };

    match board.drag_card(id, status) {
        Ok(true) => board.render_text(),
        Ok(false) => format!("project already {status}"),
        Err(err) => format!("error: {err}"),
    }
}

fn dump(board: &ProjectBoard) -> String {
    projects_json(&board.store().projects())
        .unwrap_or_else(|err| format!("error: {err}"))
}
