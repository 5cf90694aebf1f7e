//! Terminal backend for headless/dedicated server console.
//!
//! Reads command lines from stdin and prints new console output to stdout,
//! standing in for the display and input widgets when there is no window.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use bevy::prelude::*;

use crate::core::{Console, ConsoleInputEvent, OutputKind, OutputLine};

/// Plugin that adds terminal (stdin/stdout) console support.
///
/// [`ConsolePlugin`](crate::ConsolePlugin) adds it when the `terminal`
/// feature is enabled.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = mpsc::channel();
        let _handle = spawn_stdin_reader(sender);

        app.insert_resource(StdinReceiver(Mutex::new(receiver)))
            .init_resource::<TerminalConfig>()
            .add_systems(PreUpdate, read_stdin)
            .add_systems(Last, write_stdout);
    }
}

/// Configuration for terminal behavior.
#[derive(Resource)]
pub struct TerminalConfig {
    /// Whether to use colored output (ANSI escape codes).
    pub colored: bool,
    /// Print the `> line` echo of submitted commands.
    pub echo_input: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        // Off by default, some terminals show the raw escape codes
        Self {
            colored: false,
            echo_input: false,
        }
    }
}

#[derive(Resource)]
struct StdinReceiver(Mutex<Receiver<String>>);

fn spawn_stdin_reader(sender: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if sender.send(text.to_string()).is_err() {
                break;
            }
        }
    })
}

fn read_stdin(receiver: Res<StdinReceiver>, mut events: MessageWriter<ConsoleInputEvent>) {
    let Ok(rx) = receiver.0.lock() else {
        return;
    };
    while let Ok(line) = rx.try_recv() {
        events.write(ConsoleInputEvent::new(line));
    }
}

/// Prints lines appended since the last frame.
fn write_stdout(console: Res<Console>, config: Res<TerminalConfig>, mut printed: Local<u64>) {
    let output = console.output();
    if output.next_seq() == *printed {
        return;
    }

    let mut stdout = io::stdout().lock();
    for line in output.since(*printed) {
        if !config.echo_input && line.kind == OutputKind::Plain && line.text.starts_with("> ") {
            continue;
        }
        let _ = writeln!(stdout, "{}", format_line(line, config.colored));
    }
    let _ = stdout.flush();
    *printed = output.next_seq();
}

fn format_line(line: &OutputLine, colored: bool) -> String {
    if !colored {
        return line.text.clone();
    }
    let color = match line.kind {
        OutputKind::Plain => "\x1b[0m",
        OutputKind::Info => "\x1b[36m",
        OutputKind::Warning => "\x1b[33m",
        OutputKind::Error => "\x1b[31m",
    };
    format!("{}{}\x1b[0m", color, line.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(kind: OutputKind, text: &str) -> OutputLine {
        OutputLine {
            seq: 0,
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_line(&line(OutputKind::Error, "bad"), false), "bad");
    }

    #[test]
    fn test_format_colored() {
        assert_eq!(
            format_line(&line(OutputKind::Warning, "careful"), true),
            "\x1b[33mcareful\x1b[0m"
        );
    }
}
