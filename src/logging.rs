//! Log capture into the console output via [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).
//!
//! ```ignore
//! App::new()
//!     .add_plugins(DefaultPlugins.set(LogPlugin {
//!         custom_layer: custom_log_layer,
//!         ..default()
//!     }))
//!     .add_plugins(ConsolePlugin);
//! ```

use std::sync::mpsc;
use std::time::SystemTime;

use bevy::log::{BoxedLayer, Level};
use bevy::prelude::*;
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::field::Visit;

use crate::core::{Console, LOG_TARGET, OutputKind};

/// Layer factory for [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).
///
/// Captured events become [`LogMessage`]s and are appended to the
/// [`Console`] output once per frame.
pub fn custom_log_layer(app: &mut App) -> Option<BoxedLayer> {
    let (sender, receiver) = mpsc::channel();
    app.add_message::<LogMessage>();
    app.insert_non_send_resource(CapturedLogEvents(receiver));
    app.add_systems(PostUpdate, (transfer_log_events, append_log_messages).chain());

    Some(Box::new(LogCaptureLayer { sender }))
}

/// One captured process log event.
#[derive(Message, Debug, Clone)]
pub struct LogMessage {
    /// The formatted `message` field.
    pub message: String,
    /// Target of the event, usually the module path.
    pub target: &'static str,
    pub level: Level,
    /// The time the log occurred.
    pub time: SystemTime,
}

impl LogMessage {
    /// Output style for this level.
    pub fn output_kind(&self) -> OutputKind {
        output_kind(self.level)
    }
}

/// Map a log level to the console line style.
pub fn output_kind(level: Level) -> OutputKind {
    match level {
        Level::ERROR => OutputKind::Error,
        Level::WARN => OutputKind::Warning,
        Level::INFO => OutputKind::Info,
        _ => OutputKind::Plain,
    }
}

struct CapturedLogEvents(mpsc::Receiver<LogMessage>);

fn transfer_log_events(
    receiver: NonSend<CapturedLogEvents>,
    mut log_events: MessageWriter<LogMessage>,
) {
    for msg in receiver.0.try_iter() {
        log_events.write(msg);
    }
}

fn append_log_messages(mut logs: MessageReader<LogMessage>, console: Option<ResMut<Console>>) {
    let Some(mut console) = console else {
        logs.clear();
        return;
    };
    for log in logs.read() {
        console.output_mut().push(log.output_kind(), &log.message);
    }
}

/// Sends every event with a `message` field, except console mirrors, to the
/// capture channel.
struct LogCaptureLayer {
    sender: mpsc::Sender<LogMessage>,
}

impl<S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>> Layer<S>
    for LogCaptureLayer
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        if metadata.target() == LOG_TARGET {
            return;
        }

        let mut message = None;
        event.record(&mut MessageVisitor(&mut message));
        if let Some(message) = message {
            let _ = self.sender.send(LogMessage {
                message,
                target: metadata.target(),
                level: *metadata.level(),
                time: SystemTime::now(),
            });
        }
    }
}

struct MessageVisitor<'a>(&'a mut Option<String>);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture<F: FnOnce()>(f: F) -> Vec<LogMessage> {
        let (sender, receiver) = mpsc::channel();
        let subscriber = tracing_subscriber::registry().with(LogCaptureLayer { sender });
        tracing::subscriber::with_default(subscriber, f);
        receiver.try_iter().collect()
    }

    #[test]
    fn test_captures_messages() {
        let logs = capture(|| {
            tracing::warn!("low health");
            tracing::info!(target: "game", "spawned");
        });

        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "low health");
        assert_eq!(logs[0].output_kind(), OutputKind::Warning);
        assert_eq!(logs[1].target, "game");
    }

    #[test]
    fn test_skips_console_mirror() {
        let logs = capture(|| {
            tracing::info!(target: LOG_TARGET, "mirrored");
            tracing::error!("real");
        });

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "real");
    }

    #[test]
    fn test_engine_diagnostics_not_captured() {
        use crate::ConsoleConfig;
        use crate::core::{CommandError, ConCommand, ExecOutcome};

        let logs = capture(|| {
            let mut console = Console::new(&ConsoleConfig::default()).with_release_build(true);
            console.enable();
            for _ in 0..2 {
                console
                    .register_cmd(ConCommand::new("fail", |_, _| Err(CommandError::new("nope"))))
                    .unwrap();
            }
            console
                .register_cmd(ConCommand::new("boom", |_, _| panic!("kaboom")))
                .unwrap();

            assert!(matches!(console.execute("fail"), ExecOutcome::HandlerFailed(_)));
            assert!(matches!(console.execute("boom"), ExecOutcome::HandlerFailed(_)));
            console.execute("missing");
        });

        assert!(logs.is_empty(), "captured: {:?}", logs);
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(output_kind(Level::ERROR), OutputKind::Error);
        assert_eq!(output_kind(Level::INFO), OutputKind::Info);
        assert_eq!(output_kind(Level::TRACE), OutputKind::Plain);
    }
}
