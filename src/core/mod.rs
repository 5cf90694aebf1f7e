//! Core console engine, usable without a running app.
//!
//! This module provides the fundamental building blocks:
//! - [`Console`] - The engine: registry, dispatcher, history, output and lifecycle
//! - [`ConCommand`] - Console commands with handlers and metadata
//! - [`ConsoleRegistry`] - Central registry for all commands
//! - [`Autocomplete`] - Cycling completion over names and argument values
//! - [`HistoryBuffer`] / [`OutputBuffer`] - Bounded input and output logs
//! - [`Trie`] - Fast prefix lookup for autocomplete
//! - [`tokenize`] - Forgiving, quote-aware command tokenizer
//! - Notifications and messages for communication between layers

mod autocomplete;
mod builtins;
mod concommand;
mod console;
mod error;
mod events;
mod history;
mod lifecycle;
mod matcher;
mod output;
mod registry;
mod tokenizer;
mod trie;

pub use autocomplete::{Autocomplete, suggestions};
pub use builtins::register_builtins;
pub use concommand::{CommandArgs, CommandContext, CommandHandler, ConCommand};
pub use console::{Console, ExecOutcome, LOG_TARGET};
pub use error::{CommandError, ConsoleError};
pub use events::{
    ConsoleEventsPlugin, ConsoleInputEvent, ConsoleToggleEvent, ConsoleUnknownCommandEvent,
    HostRequest, ListenerId, Listeners,
};
pub use history::HistoryBuffer;
pub use lifecycle::{ConsoleState, Lifecycle, LifecycleEffect};
pub use matcher::{MAX_SUGGESTION_DISTANCE, closest_match, edit_distance};
pub use output::{OutputBuffer, OutputKind, OutputLine};
pub use registry::ConsoleRegistry;
pub use tokenizer::{
    Token, TokenizedCommand, display_line, quote_token, scan_tokens, tokenize,
};
pub use trie::Trie;
