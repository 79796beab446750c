//! The "richer shell" (spec §6/SPEC_FULL.md §2): the same REPL as
//! `picol` plus a persisted, bounded plain-text history file and an
//! init script sourced from a fixed search path before the first
//! prompt.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use picol_core::limits::HISTORY_LEN;
use picol_core::Interp;

fn history_path() -> Option<PathBuf> {
    dirs_home().map(|home| home.join(".picolsh_history"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Candidate init-file locations, most-specific first: a Unix dotfile
/// in `$HOME`, or (on Windows) `picolshrc.pcl` under `%USERPROFILE%`.
fn init_file_candidates() -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(home) = dirs_home() {
        out.push(home.join(".picolshrc"));
    }
    if let Ok(profile) = std::env::var("USERPROFILE") {
        out.push(PathBuf::from(profile).join("picolshrc.pcl"));
    }
    out
}

fn load_init_file(interp: &mut Interp) {
    for candidate in init_file_candidates() {
        if let Ok(text) = std::fs::read_to_string(&candidate) {
            if let Err(e) = interp.eval(&text) {
                eprintln!("picolsh: error in {}: {}", candidate.display(), e.message());
            }
            break;
        }
    }
}

/// Loads the existing history file, if any, trimmed to the last
/// `HISTORY_LEN` lines (older lines are dropped, never the newer ones).
fn load_history() -> Vec<String> {
    let Some(path) = history_path() else { return Vec::new() };
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            let lines: Vec<String> = text.lines().map(str::to_string).collect();
            let start = lines.len().saturating_sub(HISTORY_LEN);
            lines[start..].to_vec()
        }
        Err(_) => Vec::new(),
    }
}

fn save_history(history: &[String]) {
    let Some(path) = history_path() else { return };
    let start = history.len().saturating_sub(HISTORY_LEN);
    let trimmed = history[start..].join("\n");
    let _ = std::fs::write(&path, trimmed);
}

fn main() {
    let mut interp = Interp::new();
    load_init_file(&mut interp);
    let mut history = load_history();

    let stdin = io::stdin();
    let mut status = 0;
    loop {
        print!("picolsh> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let trimmed = line.trim_end_matches('\n').to_string();
        if trimmed.trim().is_empty() {
            continue;
        }
        history.push(trimmed);
        match interp.eval(&line) {
            Ok(c) => {
                status = 0;
                if !c.value.is_empty() {
                    println!("[0] {}", c.value);
                }
            }
            Err(e) => {
                status = 1;
                println!("[1] {}", e.message());
            }
        }
    }

    save_history(&history);
    std::process::exit(status & 0xff);
}
