//! Console notifications and messages.
//!
//! Two layers:
//! - [`Listeners`]: typed observer lists the engine calls synchronously at the
//!   point of the state change. Usable without an app.
//! - Bevy messages: what [`ConsolePlugin`](crate::ConsolePlugin) re-emits for
//!   systems (`ConsoleToggleEvent`, `ConsoleUnknownCommandEvent`) and reads
//!   from input widgets (`ConsoleInputEvent`).

use bevy::prelude::*;

/// Handle returned by [`Listeners::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Observer list for one notification kind.
///
/// Callbacks run synchronously, in connection order.
pub struct Listeners<T> {
    callbacks: Vec<(ListenerId, Callback<T>)>,
    next_id: u64,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Listeners<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback.
    pub fn connect(&mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if it was not connected.
    pub fn disconnect(&mut self, id: ListenerId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Invoke every callback with `value`.
    pub fn emit(&self, value: &T) {
        for (_, callback) in &self.callbacks {
            callback(value);
        }
    }

    /// Number of connected callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if no callback is connected.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<T> std::fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.callbacks.len())
            .finish()
    }
}

/// Something the console asks the host to do.
///
/// The console only records requests; the host (or [`ConsolePlugin`](crate::ConsolePlugin))
/// drains and applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Freeze simulation time.
    Pause,
    /// Resume simulation time.
    Resume,
    /// Shut the application down.
    Quit,
}

/// Event sent when a command line is submitted to the console.
///
/// # Examples
///
/// ```ignore
/// fn submit_command(mut events: MessageWriter<ConsoleInputEvent>) {
///     events.write(ConsoleInputEvent::new("heal 50"));
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct ConsoleInputEvent {
    /// The raw command line to execute.
    pub command: String,
}

impl ConsoleInputEvent {
    /// Create a new input event.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// Event sent when the console is opened or closed.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleToggleEvent {
    /// Whether the console is now open.
    pub open: bool,
}

impl ConsoleToggleEvent {
    /// Create an event for opening the console.
    pub fn opened() -> Self {
        Self { open: true }
    }

    /// Create an event for closing the console.
    pub fn closed() -> Self {
        Self { open: false }
    }
}

/// Event sent when a submitted line names an unknown command.
///
/// # Examples
///
/// ```ignore
/// fn report_typos(mut events: MessageReader<ConsoleUnknownCommandEvent>) {
///     for event in events.read() {
///         warn!("nobody knows '{}'", event.line);
///     }
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleUnknownCommandEvent {
    /// The raw submitted line.
    pub line: String,
}

impl ConsoleUnknownCommandEvent {
    /// Create a new unknown-command event.
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

/// Plugin that registers all console messages.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleToggleEvent>()
            .add_message::<ConsoleUnknownCommandEvent>();
    }
}
