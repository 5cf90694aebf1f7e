//! An in-process developer console engine for Bevy.
//!
//! bevy_dev_console provides:
//!
//! - **Console**: the engine resource holding commands, history, output and
//!   open/close state
//! - **ConCommand**: console commands with declared arguments, descriptions and
//!   autocomplete values
//! - **Autocomplete**: cycling completion over command names and argument values
//! - **Output**: a styled scrollback buffer that any renderer can draw
//!
//! The engine does not draw text or read keys. A display widget renders
//! [`Console::output`](core::Console::output) and feeds submitted lines back as
//! [`ConsoleInputEvent`]s.
//!
//! # Features
//!
//! - `capture` (default): capture process log events into the console output
//! - `terminal`: stdin/stdout backend for dedicated servers
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_dev_console::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ConsolePlugin)
//!         .add_systems(Startup, setup_console)
//!         .run();
//! }
//!
//! fn setup_console(mut console: ResMut<Console>) {
//!     console
//!         .register_cmd(
//!             ConCommand::new("heal", |args, ctx| {
//!                 let amount: u32 = args.require(0, "amount")?;
//!                 ctx.info(format!("Healed {amount} HP"));
//!                 Ok(())
//!             })
//!             .args(["amount"])
//!             .required(1)
//!             .description("Restore health"),
//!         )
//!         .unwrap();
//! }
//! ```

use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

use bevy::prelude::*;

// Core module (always available, zero optional deps)
pub mod core;

pub mod config;

#[cfg(feature = "capture")]
pub mod logging;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

// Re-export core types at crate root for convenience
pub use core::{
    Autocomplete, CommandArgs, CommandContext, CommandError, CommandHandler, ConCommand, Console,
    ConsoleError, ConsoleEventsPlugin, ConsoleInputEvent, ConsoleRegistry, ConsoleState,
    ConsoleToggleEvent, ConsoleUnknownCommandEvent, ExecOutcome, HistoryBuffer, HostRequest,
    ListenerId, Listeners, OutputBuffer, OutputKind, OutputLine, TokenizedCommand, Trie,
    tokenize,
};

pub use config::ConsoleConfig;

#[cfg(feature = "capture")]
pub use logging::{LogMessage, custom_log_layer};

#[cfg(feature = "terminal")]
pub use terminal::{TerminalConfig, TerminalPlugin};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::ConsolePlugin;
    pub use crate::config::ConsoleConfig;
    pub use crate::core::{
        CommandArgs, CommandContext, CommandError, ConCommand, Console, ConsoleInputEvent,
        ConsoleToggleEvent, ConsoleUnknownCommandEvent, ExecOutcome, HostRequest, OutputKind,
    };
}

/// Main console plugin.
///
/// Inserts a [`Console`] with the built-in commands, built from the
/// [`ConsoleConfig`] resource if one was inserted beforehand, and wires the
/// per-frame systems that execute submitted lines and apply host requests.
///
/// # Configuration
///
/// ```ignore
/// app.insert_resource(ConsoleConfig { pause_enabled: true, ..default() })
///     .add_plugins(ConsolePlugin);
/// ```
#[derive(Default)]
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<ConsoleConfig>()
            .cloned()
            .unwrap_or_default();

        let (sender, receiver) = mpsc::channel();
        let mut console = Console::with_builtins(&config);
        forward_to_channel(&mut console, sender);

        app.insert_resource(AppliedConfig(config.clone()))
            .insert_resource(config)
            .insert_resource(console)
            .insert_resource(ForwardedNotifications(Mutex::new(receiver)))
            .init_resource::<PendingCommands>()
            .register_type::<ConsoleConfig>()
            .add_message::<AppExit>()
            .add_plugins(core::ConsoleEventsPlugin);

        // 1. apply_config_changes: push config edits into the engine
        // 2. queue_console_input: read input messages into the queue
        // 3. execute_pending_input: run queued lines with exclusive World access
        // 4. apply_host_requests: pause/resume virtual time, quit
        // 5. forward_notifications: re-emit engine notifications as messages
        app.add_systems(
            Update,
            (
                apply_config_changes.run_if(resource_changed::<ConsoleConfig>),
                queue_console_input,
                execute_pending_input,
                apply_host_requests,
                forward_notifications,
            )
                .chain(),
        );

        #[cfg(feature = "terminal")]
        {
            app.add_plugins(terminal::TerminalPlugin);
        }
    }
}

/// Lines waiting for [`execute_pending_input`].
#[derive(Resource, Default)]
struct PendingCommands {
    queue: Vec<String>,
}

/// Engine notification carried from a listener to [`forward_notifications`].
#[derive(Debug)]
enum Notification {
    Toggled(bool),
    UnknownCommand(String),
}

#[derive(Resource)]
struct ForwardedNotifications(Mutex<Receiver<Notification>>);

fn forward_to_channel(console: &mut Console, sender: Sender<Notification>) {
    let opened = sender.clone();
    console.on_opened().connect(move |_| {
        let _ = opened.send(Notification::Toggled(true));
    });

    let closed = sender.clone();
    console.on_closed().connect(move |_| {
        let _ = closed.send(Notification::Toggled(false));
    });

    console.on_unknown_command().connect(move |line: &String| {
        let _ = sender.send(Notification::UnknownCommand(line.clone()));
    });
}

/// Config the engine currently reflects, used to apply only edited fields.
#[derive(Resource)]
struct AppliedConfig(ConsoleConfig);

fn apply_config_changes(
    config: Res<ConsoleConfig>,
    mut applied: ResMut<AppliedConfig>,
    mut console: ResMut<Console>,
) {
    if applied.0 == *config {
        return;
    }
    debug!(target: core::LOG_TARGET, "Console: applying config {:?}", *config);
    console.apply_config_changes(&applied.0, &config);
    applied.0 = config.clone();
}

fn queue_console_input(
    mut input: MessageReader<ConsoleInputEvent>,
    mut pending: ResMut<PendingCommands>,
) {
    for event in input.read() {
        pending.queue.push(event.command.clone());
    }
}

/// Exclusive system that executes queued lines with full World access.
///
/// The [`Console`] resource is taken out of the world while the lines run, so
/// handlers reach the console through their context only.
fn execute_pending_input(world: &mut World) {
    let queue = std::mem::take(&mut world.resource_mut::<PendingCommands>().queue);
    if queue.is_empty() {
        return;
    }

    world.resource_scope(|world, mut console: Mut<Console>| {
        for line in &queue {
            console.execute_in(line, world);
        }
    });
}

fn apply_host_requests(
    mut console: ResMut<Console>,
    mut time: Option<ResMut<Time<Virtual>>>,
    mut exit: MessageWriter<AppExit>,
) {
    if !console.has_requests() {
        return;
    }

    for request in console.drain_requests() {
        match (request, time.as_deref_mut()) {
            (HostRequest::Pause, Some(time)) => time.pause(),
            (HostRequest::Resume, Some(time)) => time.unpause(),
            (HostRequest::Pause | HostRequest::Resume, None) => {
                warn!(
                    target: core::LOG_TARGET,
                    "Console: {:?} requested but there is no virtual clock",
                    request
                );
            }
            (HostRequest::Quit, _) => {
                info!(target: core::LOG_TARGET, "Console: quit requested");
                exit.write(AppExit::Success);
            }
        }
    }
}

fn forward_notifications(
    notifications: Res<ForwardedNotifications>,
    mut toggles: MessageWriter<ConsoleToggleEvent>,
    mut unknown: MessageWriter<ConsoleUnknownCommandEvent>,
) {
    let Ok(rx) = notifications.0.lock() else {
        return;
    };
    for notification in rx.try_iter() {
        match notification {
            Notification::Toggled(open) => {
                toggles.write(ConsoleToggleEvent { open });
            }
            Notification::UnknownCommand(line) => {
                unknown.write(ConsoleUnknownCommandEvent::new(line));
            }
        }
    }
}
