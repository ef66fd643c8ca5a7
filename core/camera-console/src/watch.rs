//! Interactive `watch` command.
//!
//! The controller runs on the main thread; a reader thread turns stdin lines
//! into events on the runtime's handle.

use std::io::{BufRead, IsTerminal};
use std::thread;

use camera_ui::{Runtime, UiConfig, UiHandle};
use tracing::{debug, warn};

use crate::terminal::Screen;
use crate::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Toggle,
    Refresh,
    Duration(String),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  t, toggle          turn the camera on or off
  r, refresh         fetch the latest image now
  d, duration <secs> set the capture duration
  h, help            show this help
  q, quit            exit";

/// Blank lines yield `None`; unknown words are reported by the caller.
pub fn parse_input(line: &str) -> Option<Result<Input, String>> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let rest: Vec<&str> = words.collect();
    let input = match command.to_ascii_lowercase().as_str() {
        "t" | "toggle" => Input::Toggle,
        "r" | "refresh" => Input::Refresh,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        "d" | "duration" => match rest.as_slice() {
            [value] => Input::Duration((*value).to_string()),
            _ => return Some(Err("usage: duration <secs>".to_string())),
        },
        other => return Some(Err(format!("unknown command {other:?}, try 'help'"))),
    };
    Some(Ok(input))
}

pub fn run(config: UiConfig) -> Result<(), CommandError> {
    let color = std::io::stdout().is_terminal();
    let screen = Screen::new(config.base_url(), color);
    let mut runtime = Runtime::new(config, screen.elements())?;
    let handle = runtime.handle();

    println!("{HELP}");
    thread::Builder::new()
        .name("camera-console-stdin".to_string())
        .spawn(move || read_commands(handle))
        .map_err(CommandError::Stdin)?;

    runtime.run();
    Ok(())
}

fn read_commands(handle: UiHandle) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "Failed to read stdin");
                break;
            }
        };
        let sent = match parse_input(&line) {
            None => continue,
            Some(Err(message)) => {
                eprintln!("{message}");
                continue;
            }
            Some(Ok(Input::Help)) => {
                println!("{HELP}");
                continue;
            }
            Some(Ok(Input::Toggle)) => handle.toggle(),
            Some(Ok(Input::Refresh)) => handle.refresh(),
            Some(Ok(Input::Duration(value))) => handle.set_duration(value),
            Some(Ok(Input::Quit)) => {
                let _ = handle.quit();
                return;
            }
        };
        if sent.is_err() {
            debug!("Event loop gone; stopping stdin reader");
            return;
        }
    }
    let _ = handle.quit();
}
