//! The console engine.
//!
//! [`Console`] owns the registry, history, output and lifecycle state and is
//! the single object embedding code talks to. It is a Bevy [`Resource`] so
//! [`ConsolePlugin`](crate::ConsolePlugin) can own exactly one instance, but
//! nothing here needs a running app.

use std::panic::{AssertUnwindSafe, catch_unwind};

use bevy::prelude::*;

use super::{
    Autocomplete, CommandArgs, CommandContext, CommandError, CommandHandler, ConCommand, ConsoleError,
    ConsoleRegistry, ConsoleState, HistoryBuffer, HostRequest, Lifecycle, LifecycleEffect,
    Listeners, OutputBuffer, OutputKind, closest_match, register_builtins, tokenize,
};
use crate::config::ConsoleConfig;

/// Log target for the console's own diagnostics and mirrored prints.
///
/// The log capture layer skips this target so these lines are not appended
/// to the output a second time.
pub const LOG_TARGET: &str = "dev_console";

/// Result of [`Console::execute`].
///
/// Every failure has already been written to the output buffer; the outcome
/// is for callers that want to react programmatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The line held no command.
    Empty,
    /// The handler ran and returned `Ok`.
    Executed,
    /// No command with that name is registered.
    UnknownCommand,
    /// Fewer arguments than required; the handler was not invoked.
    MissingArguments { missing: Vec<String> },
    /// The handler returned an error or panicked.
    HandlerFailed(String),
}

impl ExecOutcome {
    /// Whether the handler ran successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Executed)
    }
}

/// The console engine.
///
/// # Examples
///
/// ```
/// use bevy_dev_console::core::{Console, ExecOutcome};
/// use bevy_dev_console::ConsoleConfig;
///
/// let mut console = Console::new(&ConsoleConfig::default());
/// console
///     .register("heal", |args, ctx| {
///         ctx.info(format!("Healed {} HP", &args[0]));
///         Ok(())
///     }, ["amount"], 1, "Restore health")
///     .unwrap();
///
/// assert_eq!(console.execute("heal 50"), ExecOutcome::Executed);
/// assert_eq!(console.output().last().unwrap().text, "Healed 50 HP");
/// ```
#[derive(Resource, Debug)]
pub struct Console {
    registry: ConsoleRegistry,
    history: HistoryBuffer,
    output: OutputBuffer,
    autocomplete: Autocomplete,
    lifecycle: Lifecycle,
    /// Forwarded to the renderer; no effect on the engine.
    font_size: u32,
    requests: Vec<HostRequest>,
    on_opened: Listeners<()>,
    on_closed: Listeners<()>,
    on_unknown_command: Listeners<String>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(&ConsoleConfig::default())
    }
}

impl Console {
    /// Create an engine without any commands.
    pub fn new(config: &ConsoleConfig) -> Self {
        let mut lifecycle = Lifecycle::default();
        lifecycle.set_pause_enabled(config.pause_enabled);
        lifecycle.set_enabled_on_release_build(config.enabled_on_release_build);

        let mut console = Self {
            registry: ConsoleRegistry::new(),
            history: HistoryBuffer::new(config.history_capacity),
            output: OutputBuffer::new(config.max_output_lines),
            autocomplete: Autocomplete::new(),
            lifecycle,
            font_size: config.font_size,
            requests: Vec::new(),
            on_opened: Listeners::new(),
            on_closed: Listeners::new(),
            on_unknown_command: Listeners::new(),
        };

        if config.enabled {
            console.enable();
        }
        console
    }

    /// Create an engine with the built-in commands registered.
    pub fn with_builtins(config: &ConsoleConfig) -> Self {
        let mut console = Self::new(config);
        register_builtins(&mut console);
        console
    }

    /// Override the detected build profile.
    pub fn with_release_build(mut self, release_build: bool) -> Self {
        let effects = self.lifecycle.set_release_build(release_build);
        self.apply_effects(effects);
        self
    }

    /// Apply the fields that differ between `previous` and `config`.
    ///
    /// Untouched fields leave the engine alone, so state changed through the
    /// setters survives edits of unrelated options.
    pub fn apply_config_changes(&mut self, previous: &ConsoleConfig, config: &ConsoleConfig) {
        if previous.enabled_on_release_build != config.enabled_on_release_build {
            self.set_enabled_on_release_build(config.enabled_on_release_build);
        }
        if previous.pause_enabled != config.pause_enabled {
            self.set_pause_enabled(config.pause_enabled);
        }
        if previous.font_size != config.font_size {
            self.set_font_size(config.font_size);
        }
        if previous.history_capacity != config.history_capacity {
            self.history.set_capacity(config.history_capacity);
        }
        if previous.max_output_lines != config.max_output_lines {
            self.output.set_max_lines(config.max_output_lines);
        }
        if previous.enabled != config.enabled {
            if config.enabled {
                self.enable();
            } else {
                self.disable();
            }
        }
    }

    // Registration

    /// Register a visible command.
    ///
    /// Returns `Ok(true)` if newly registered, `Ok(false)` if it replaced a
    /// command with the same name.
    pub fn register<F, I, S>(
        &mut self,
        name: &str,
        handler: F,
        declared_args: I,
        required: usize,
        description: &str,
    ) -> Result<bool, ConsoleError>
    where
        F: Fn(&CommandArgs<'_>, &mut CommandContext<'_>) -> Result<(), CommandError>
            + Send
            + Sync
            + 'static,
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        self.registry.register(
            ConCommand::new(name, handler)
                .args(declared_args)
                .required(required)
                .description(description),
        )
    }

    /// Register a command that is callable but never listed or suggested.
    pub fn register_hidden<I, S>(
        &mut self,
        name: &str,
        handler: impl CommandHandler,
        declared_args: I,
        required: usize,
    ) -> Result<bool, ConsoleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        self.registry.register(
            ConCommand::with_handler(name, handler)
                .args(declared_args)
                .required(required)
                .hidden(true),
        )
    }

    /// Register a fully built command.
    pub fn register_cmd(&mut self, cmd: ConCommand) -> Result<bool, ConsoleError> {
        self.registry.register(cmd)
    }

    /// Remove a command. Returns `false` if it was not registered.
    pub fn remove(&mut self, name: &str) -> bool {
        self.registry.remove(name).is_some()
    }

    /// Set autocomplete values for the first argument of a command.
    pub fn set_autocomplete_values<I, S>(&mut self, name: &str, values: I) -> Result<(), ConsoleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_autocomplete_values_at(name, 0, values)
    }

    /// Set autocomplete values for argument `arg_index` of a command.
    pub fn set_autocomplete_values_at<I, S>(
        &mut self,
        name: &str,
        arg_index: usize,
        values: I,
    ) -> Result<(), ConsoleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.registry.set_autocomplete_values(name, arg_index, values)?;
        self.autocomplete.reset();
        Ok(())
    }

    /// Look up a command by name.
    pub fn lookup(&self, name: &str) -> Option<&ConCommand> {
        self.registry.get(name)
    }

    /// Non-hidden commands in registration order.
    pub fn list_visible(&self) -> impl Iterator<Item = &ConCommand> {
        self.registry.visible()
    }

    #[inline]
    pub fn registry(&self) -> &ConsoleRegistry {
        &self.registry
    }

    // Execution

    /// Parse and run one submitted line.
    pub fn execute(&mut self, line: &str) -> ExecOutcome {
        self.dispatch(line, None)
    }

    /// Parse and run one submitted line with the Bevy world attached.
    pub fn execute_in(&mut self, line: &str, world: &mut World) -> ExecOutcome {
        self.dispatch(line, Some(world))
    }

    fn dispatch(&mut self, line: &str, world: Option<&mut World>) -> ExecOutcome {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            return ExecOutcome::Empty;
        }

        let submitted = line.trim();
        self.output.plain(format!("> {}", submitted));
        self.history.append(submitted);
        self.autocomplete.reset();

        let Some(cmd) = self.registry.get(tokens.command) else {
            debug!(target: LOG_TARGET, "Console: unknown command '{}'", tokens.command);
            self.on_unknown_command.emit(&line.to_string());
            self.output
                .error(format!("Command not found: '{}'", tokens.command));

            let visible = self.registry.visible().map(ConCommand::name);
            if let Some(suggestion) = closest_match(tokens.command, visible) {
                self.output.info(format!("Did you mean '{}'?", suggestion));
            }
            return ExecOutcome::UnknownCommand;
        };

        if tokens.args.len() < cmd.required_count() {
            let missing: Vec<String> = cmd
                .missing_args(tokens.args.len())
                .into_iter()
                .map(String::from)
                .collect();
            let listed = missing
                .iter()
                .map(|arg| format!("<{}>", arg))
                .collect::<Vec<_>>()
                .join(", ");
            self.output.error(format!(
                "Missing argument(s) for '{}': {}. Usage: {}",
                cmd.name(),
                listed,
                cmd.usage()
            ));
            return ExecOutcome::MissingArguments { missing };
        }

        let handler = cmd.handler();
        let name = cmd.name().to_string();
        let args = CommandArgs::new(line, tokens.args);
        let mut ctx = CommandContext::new(
            &self.registry,
            &mut self.output,
            &mut self.history,
            &mut self.requests,
            world,
        );

        let result = catch_unwind(AssertUnwindSafe(|| handler.invoke(&args, &mut ctx)));

        match result {
            Ok(Ok(())) => ExecOutcome::Executed,
            Ok(Err(err)) => {
                warn!(target: LOG_TARGET, "Console: command '{}' failed: {}", name, err);
                self.output.error(format!("{}: {}", name, err));
                ExecOutcome::HandlerFailed(err.to_string())
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                warn!(target: LOG_TARGET, "Console: command '{}' panicked: {}", name, panic_msg);
                self.output
                    .error(format!("Command '{}' panicked: {}", name, panic_msg));
                ExecOutcome::HandlerFailed(panic_msg)
            }
        }
    }

    // Autocomplete

    /// Next autocomplete suggestion for the input line.
    pub fn complete(&mut self, input: &str) -> String {
        self.autocomplete.complete(input, &self.registry)
    }

    /// Forget the cached autocomplete prefix.
    pub fn reset_autocomplete(&mut self) {
        self.autocomplete.reset();
    }

    #[inline]
    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    // History

    /// Step back in history, saving `current_input` as the draft.
    pub fn history_previous(&mut self, current_input: &str) -> String {
        self.history.previous(current_input).to_string()
    }

    /// Step forward in history, returning the draft past the newest entry.
    pub fn history_next(&mut self) -> String {
        self.history.next().to_string()
    }

    /// The input line was edited by hand.
    ///
    /// Leaves history browsing and restarts autocomplete on the next request.
    pub fn input_edited(&mut self) {
        self.history.reset_cursor();
        self.autocomplete.reset();
    }

    /// Clear the history.
    pub fn delete_history(&mut self) {
        self.history.clear();
    }

    #[inline]
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    #[inline]
    pub fn history_mut(&mut self) -> &mut HistoryBuffer {
        &mut self.history
    }

    // Output

    #[inline]
    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    #[inline]
    pub fn output_mut(&mut self) -> &mut OutputBuffer {
        &mut self.output
    }

    /// Clear the output buffer.
    pub fn clear(&mut self) {
        self.output.clear();
    }

    /// Append a plain line, optionally mirroring it to the process log.
    pub fn print_line(&mut self, text: &str, forward_to_log: bool) {
        self.print(OutputKind::Plain, text, forward_to_log);
    }

    /// Append an info line, optionally mirroring it to the process log.
    pub fn print_info(&mut self, text: &str, forward_to_log: bool) {
        self.print(OutputKind::Info, text, forward_to_log);
    }

    /// Append a warning line, optionally mirroring it to the process log.
    pub fn print_warning(&mut self, text: &str, forward_to_log: bool) {
        self.print(OutputKind::Warning, text, forward_to_log);
    }

    /// Append an error line, optionally mirroring it to the process log.
    pub fn print_error(&mut self, text: &str, forward_to_log: bool) {
        self.print(OutputKind::Error, text, forward_to_log);
    }

    fn print(&mut self, kind: OutputKind, text: &str, forward_to_log: bool) {
        self.output.push(kind, text);
        if !forward_to_log {
            return;
        }
        match kind {
            OutputKind::Plain | OutputKind::Info => info!(target: LOG_TARGET, "{}", text),
            OutputKind::Warning => warn!(target: LOG_TARGET, "{}", text),
            OutputKind::Error => error!(target: LOG_TARGET, "{}", text),
        }
    }

    /// Ask the renderer to jump to the newest line.
    pub fn scroll_to_bottom(&mut self) {
        self.output.scroll_to_bottom();
    }

    // Lifecycle

    /// `Disabled -> Closed`, unless blocked in a release build.
    pub fn enable(&mut self) {
        if !self.lifecycle.enable() {
            warn!(target: LOG_TARGET, "Console: not enabled, release builds require enabled_on_release_build");
        }
    }

    /// Close if open, then disable.
    pub fn disable(&mut self) {
        let effects = self.lifecycle.disable();
        self.apply_effects(effects);
    }

    pub fn open(&mut self) {
        let effects = self.lifecycle.open();
        self.apply_effects(effects);
    }

    pub fn close(&mut self) {
        let effects = self.lifecycle.close();
        self.apply_effects(effects);
    }

    pub fn toggle(&mut self) {
        let effects = self.lifecycle.toggle();
        self.apply_effects(effects);
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.lifecycle.is_enabled()
    }

    #[inline]
    pub fn state(&self) -> ConsoleState {
        self.lifecycle.state()
    }

    /// Allow or forbid the console in release builds.
    pub fn set_enabled_on_release_build(&mut self, enabled: bool) {
        let effects = self.lifecycle.set_enabled_on_release_build(enabled);
        self.apply_effects(effects);
    }

    #[inline]
    pub fn enabled_on_release_build(&self) -> bool {
        self.lifecycle.enabled_on_release_build()
    }

    #[inline]
    pub fn pause_enabled(&self) -> bool {
        self.lifecycle.pause_enabled()
    }

    pub fn set_pause_enabled(&mut self, enabled: bool) {
        self.lifecycle.set_pause_enabled(enabled);
    }

    #[inline]
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size;
    }

    fn apply_effects(&mut self, effects: Vec<LifecycleEffect>) {
        for effect in effects {
            match effect {
                LifecycleEffect::Pause => self.requests.push(HostRequest::Pause),
                LifecycleEffect::Resume => self.requests.push(HostRequest::Resume),
                LifecycleEffect::Opened => {
                    debug!(target: LOG_TARGET, "Console: opened");
                    self.on_opened.emit(&());
                }
                LifecycleEffect::Closed => {
                    debug!(target: LOG_TARGET, "Console: closed");
                    self.on_closed.emit(&());
                }
            }
        }
    }

    // Notifications and host requests

    /// Listeners fired when the console opens.
    pub fn on_opened(&mut self) -> &mut Listeners<()> {
        &mut self.on_opened
    }

    /// Listeners fired when the console closes.
    pub fn on_closed(&mut self) -> &mut Listeners<()> {
        &mut self.on_closed
    }

    /// Listeners fired with the raw line when an unknown command is submitted.
    pub fn on_unknown_command(&mut self) -> &mut Listeners<String> {
        &mut self.on_unknown_command
    }

    /// Whether host requests are waiting.
    #[inline]
    pub fn has_requests(&self) -> bool {
        !self.requests.is_empty()
    }

    /// Take the pending host requests in the order they were made.
    pub fn drain_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn console() -> Console {
        Console::new(&ConsoleConfig::default())
    }

    fn noop(_: &CommandArgs<'_>, _: &mut CommandContext<'_>) -> Result<(), CommandError> {
        Ok(())
    }

    /// Register `heal <amount>` with a counting stub.
    fn register_heal(console: &mut Console) -> (Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (c, s) = (Arc::clone(&calls), Arc::clone(&seen));
        console
            .register(
                "heal",
                move |args, _| {
                    c.fetch_add(1, Ordering::SeqCst);
                    *s.lock().unwrap() = args.iter().map(String::from).collect();
                    Ok(())
                },
                ["amount"],
                1,
                "Restore health",
            )
            .unwrap();
        (calls, seen)
    }

    fn error_lines(console: &Console) -> Vec<String> {
        console
            .output()
            .lines()
            .filter(|l| l.kind == OutputKind::Error)
            .map(|l| l.text.clone())
            .collect()
    }

    #[test]
    fn test_execute_invokes_handler() {
        let mut console = console();
        let (calls, seen) = register_heal(&mut console);

        assert_eq!(console.execute("heal 50"), ExecOutcome::Executed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec!["50"]);
        assert_eq!(console.history().last(), Some("heal 50"));
    }

    #[test]
    fn test_missing_arguments_skip_handler() {
        let mut console = console();
        let (calls, _) = register_heal(&mut console);

        let outcome = console.execute("heal");
        assert_eq!(
            outcome,
            ExecOutcome::MissingArguments {
                missing: vec!["amount".to_string()]
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(console.history().len(), 1);
        assert!(error_lines(&console)[0].contains("amount"));
    }

    #[test]
    fn test_missing_lists_required_only() {
        let mut console = console();
        console
            .register("tp", |_, _| Ok(()), ["x", "y", "z"], 2, "Teleport")
            .unwrap();

        let outcome = console.execute("tp 1");
        assert_eq!(
            outcome,
            ExecOutcome::MissingArguments {
                missing: vec!["y".to_string()]
            }
        );
        assert_eq!(
            error_lines(&console),
            vec!["Missing argument(s) for 'tp': <y>. Usage: tp <x> <y> [z]"]
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut console = console();
        register_heal(&mut console);

        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        console
            .on_unknown_command()
            .connect(move |line: &String| sink.lock().unwrap().push(line.clone()));

        assert_eq!(console.execute("heel 1 2 3"), ExecOutcome::UnknownCommand);
        assert_eq!(*fired.lock().unwrap(), vec!["heel 1 2 3"]);
        assert_eq!(console.history().len(), 1);
        assert_eq!(error_lines(&console).len(), 1);

        let hint = console.output().last().unwrap();
        assert_eq!(hint.kind, OutputKind::Info);
        assert_eq!(hint.text, "Did you mean 'heal'?");
    }

    #[test]
    fn test_empty_line_is_noop() {
        let mut console = console();
        assert_eq!(console.execute("   "), ExecOutcome::Empty);
        assert!(console.output().is_empty());
        assert!(console.history().is_empty());
    }

    #[test]
    fn test_echo_before_dispatch() {
        let mut console = console();
        register_heal(&mut console);
        console.execute("  heal 5 ");
        assert_eq!(console.output().lines().next().unwrap().text, "> heal 5");
    }

    #[test]
    fn test_handler_error_is_contained() {
        let mut console = console();
        console
            .register_cmd(ConCommand::new("fail", |_, _| Err(CommandError::new("nope"))))
            .unwrap();

        assert_eq!(
            console.execute("fail"),
            ExecOutcome::HandlerFailed("nope".to_string())
        );
        assert_eq!(error_lines(&console), vec!["fail: nope"]);
    }

    #[test]
    fn test_handler_panic_is_contained() {
        let mut console = console();
        console
            .register_cmd(ConCommand::new("boom", |_, _| panic!("kaboom")))
            .unwrap();
        register_heal(&mut console);

        assert!(matches!(console.execute("boom"), ExecOutcome::HandlerFailed(_)));
        assert!(error_lines(&console)[0].contains("kaboom"));

        // Later commands are unaffected
        assert_eq!(console.execute("heal 1"), ExecOutcome::Executed);
    }

    #[test]
    fn test_world_unavailable_without_app() {
        let mut console = console();
        console
            .register_cmd(ConCommand::new("spawn", |_, ctx| {
                ctx.world()?;
                Ok(())
            }))
            .unwrap();

        assert!(matches!(console.execute("spawn"), ExecOutcome::HandlerFailed(_)));
    }

    #[test]
    fn test_execute_in_world() {
        #[derive(Resource, Default)]
        struct Spawned(u32);

        let mut world = World::new();
        world.init_resource::<Spawned>();

        let mut console = console();
        console
            .register_cmd(
                ConCommand::new("spawn", |args, ctx| {
                    let count: u32 = args.require(0, "count")?;
                    ctx.world()?.resource_mut::<Spawned>().0 += count;
                    Ok(())
                })
                .args(["count"])
                .required(1),
            )
            .unwrap();

        assert_eq!(console.execute_in("spawn 3", &mut world), ExecOutcome::Executed);
        assert_eq!(world.resource::<Spawned>().0, 3);
    }

    #[test]
    fn test_handler_can_read_registry() {
        let mut console = console();
        console
            .register_cmd(ConCommand::new("count", |_, ctx| {
                let n = ctx.registry().len();
                ctx.line(n.to_string());
                Ok(())
            }))
            .unwrap();

        console.execute("count");
        assert_eq!(console.output().last().unwrap().text, "1");
    }

    #[test]
    fn test_lookup_after_register_and_remove() {
        let mut console = console();
        register_heal(&mut console);

        let heal = console.lookup("heal").unwrap();
        assert_eq!(heal.required_count(), 1);
        assert_eq!(heal.get_description(), "Restore health");

        assert!(console.remove("heal"));
        assert!(console.lookup("heal").is_none());
        assert!(!console.remove("heal"));
    }

    #[test]
    fn test_register_required_exceeds_declared() {
        let mut console = console();
        let result = console.register("tp", |_, _| Ok(()), ["x"], 2, "");
        assert!(matches!(result, Err(ConsoleError::InvalidArgument(_))));
    }

    #[test]
    fn test_register_hidden() {
        let mut console = console();
        console
            .register_hidden("secret", noop, ["a"], 0)
            .unwrap();

        assert_eq!(console.list_visible().count(), 0);
        assert_eq!(console.complete("sec"), "sec");
        assert_eq!(console.execute("secret"), ExecOutcome::Executed);
    }

    #[test]
    fn test_set_autocomplete_values() {
        let mut console = console();
        register_heal(&mut console);
        console.set_autocomplete_values("heal", ["10", "50"]).unwrap();

        assert_eq!(console.complete("heal "), "heal 10");
        assert_eq!(console.complete("heal "), "heal 50");
        assert_eq!(
            console.set_autocomplete_values("heel", ["1"]),
            Err(ConsoleError::UnknownCommand("heel".into()))
        );
    }

    #[test]
    fn test_complete_cycles() {
        let mut console = console();
        for name in ["help", "heal", "hide"] {
            console.register(name, |_, _| Ok(()), Vec::<&str>::new(), 0, "").unwrap();
        }

        assert_eq!(console.complete("he"), "heal");
        assert_eq!(console.complete("he"), "help");
        assert_eq!(console.complete("he"), "heal");
        assert_eq!(console.complete("h"), "heal");
    }

    #[test]
    fn test_history_capacity_and_navigation() {
        let mut console = Console::new(&ConsoleConfig {
            history_capacity: 3,
            ..Default::default()
        });
        for line in ["a", "b", "c", "d"] {
            console.execute(line);
        }

        let recalled: Vec<_> = (0..3).map(|_| console.history_previous("draft")).collect();
        assert_eq!(recalled, vec!["d", "c", "b"]);
        assert_eq!(console.history_previous("draft"), "b");

        for _ in 0..3 {
            console.history_next();
        }
        assert_eq!(console.history_next(), "draft");
    }

    #[test]
    fn test_input_edited_resets_browsing() {
        let mut console = console();
        for name in ["help", "heal"] {
            console.register(name, |_, _| Ok(()), Vec::<&str>::new(), 0, "").unwrap();
        }
        console.execute("help");
        console.execute("heal");

        assert_eq!(console.history_previous("he"), "heal");
        assert_eq!(console.history_previous("he"), "help");
        assert_eq!(console.complete("he"), "heal");

        console.input_edited();
        assert_eq!(console.history().cursor(), None);
        assert_eq!(console.history_previous("h"), "heal");
        assert_eq!(console.autocomplete().selected(), None);
        assert_eq!(console.complete("he"), "heal");
    }

    #[test]
    fn test_lifecycle_notifications() {
        let mut console = console();
        let opened = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));
        let (o, c) = (Arc::clone(&opened), Arc::clone(&closed));
        console.on_opened().connect(move |_| {
            o.fetch_add(1, Ordering::SeqCst);
        });
        console.on_closed().connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        console.toggle();
        assert!(console.is_open());
        console.disable();

        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert_eq!(console.state(), ConsoleState::Disabled);

        console.open();
        assert_eq!(opened.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pause_requests() {
        let mut console = Console::new(&ConsoleConfig {
            pause_enabled: true,
            ..Default::default()
        });

        console.open();
        console.close();
        assert_eq!(
            console.drain_requests(),
            vec![HostRequest::Pause, HostRequest::Resume]
        );
        assert!(!console.has_requests());
    }

    #[test]
    fn test_release_build_gate() {
        let mut console = console().with_release_build(true);
        assert!(!console.is_enabled());

        console.enable();
        assert!(!console.is_enabled());

        console.set_enabled_on_release_build(true);
        console.enable();
        assert!(console.is_enabled());
    }

    #[test]
    fn test_disabled_by_config() {
        let console = Console::new(&ConsoleConfig {
            enabled: false,
            ..Default::default()
        });
        assert_eq!(console.state(), ConsoleState::Disabled);
    }

    #[test]
    fn test_print_kinds() {
        let mut console = console();
        console.print_line("plain", false);
        console.print_info("info", false);
        console.print_warning("warning", true);
        console.print_error("error", false);

        let kinds: Vec<_> = console.output().lines().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                OutputKind::Plain,
                OutputKind::Info,
                OutputKind::Warning,
                OutputKind::Error
            ]
        );
    }

    #[test]
    fn test_apply_config_changes() {
        let previous = ConsoleConfig::default();
        let mut console = Console::new(&previous);
        console.apply_config_changes(
            &previous,
            &ConsoleConfig {
                font_size: 20,
                pause_enabled: true,
                enabled: false,
                ..Default::default()
            },
        );

        assert_eq!(console.font_size(), 20);
        assert!(console.pause_enabled());
        assert!(!console.is_enabled());
    }

    #[test]
    fn test_apply_config_changes_keeps_setter_state() {
        let previous = ConsoleConfig::default();
        let mut console = Console::new(&previous);
        console.disable();
        console.set_pause_enabled(true);

        console.apply_config_changes(
            &previous,
            &ConsoleConfig {
                font_size: 20,
                ..Default::default()
            },
        );

        assert_eq!(console.font_size(), 20);
        assert!(console.pause_enabled());
        assert!(!console.is_enabled());
    }

    #[test]
    fn test_builtins_only_with_builtins() {
        assert!(console().lookup("help").is_none());
        assert!(Console::with_builtins(&ConsoleConfig::default()).lookup("help").is_some());
    }
}
