//! Console command (ConCommand) implementation.
//!
//! A ConCommand couples a handler with the metadata the console needs to
//! validate, document and autocomplete it.

use std::collections::BTreeMap;
use std::sync::Arc;

use bevy::prelude::*;

use super::{CommandError, ConsoleRegistry, HistoryBuffer, HostRequest, OutputBuffer, OutputKind};

/// Arguments passed to a command handler.
#[derive(Debug, Clone)]
pub struct CommandArgs<'a> {
    /// The raw command string.
    raw: &'a str,
    /// Parsed arguments (excluding command name).
    args: Vec<&'a str>,
}

impl<'a> CommandArgs<'a> {
    /// Create new command args from a raw string and parsed arguments.
    pub fn new(raw: &'a str, args: Vec<&'a str>) -> Self {
        Self { raw, args }
    }

    /// Get the raw command string.
    #[inline]
    pub fn raw(&self) -> &str {
        self.raw
    }

    /// Get the number of arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if there are no arguments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Get an argument by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// Get an argument or a default value.
    #[inline]
    pub fn get_or(&self, index: usize, default: &'a str) -> &'a str {
        self.get(index).unwrap_or(default)
    }

    /// Try to parse an argument as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, index: usize) -> Option<T> {
        self.get(index).and_then(|s| s.parse().ok())
    }

    /// Parse an argument with a default value.
    pub fn parse_or<T: std::str::FromStr>(&self, index: usize, default: T) -> T {
        self.parse(index).unwrap_or(default)
    }

    /// Parse a required argument, failing with a readable message.
    pub fn require<T: std::str::FromStr>(&self, index: usize, name: &str) -> Result<T, CommandError> {
        let value = self
            .get(index)
            .ok_or_else(|| CommandError::new(format!("missing argument <{}>", name)))?;
        value
            .parse()
            .map_err(|_| CommandError::new(format!("invalid value for <{}>: '{}'", name, value)))
    }

    /// Get all arguments as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[&'a str] {
        &self.args
    }

    /// Iterate over arguments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.args.iter().copied()
    }

    /// Join all arguments with a separator.
    pub fn join(&self, separator: &str) -> String {
        self.args.join(separator)
    }

    /// Join arguments starting from an index.
    pub fn join_from(&self, start: usize, separator: &str) -> String {
        self.args.get(start..).unwrap_or(&[]).join(separator)
    }
}

impl std::ops::Index<usize> for CommandArgs<'_> {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        self.args[index]
    }
}

/// What a running command can reach.
///
/// The registry is read-only while a command runs; output, history and host
/// requests are writable. When the console is driven by
/// [`ConsolePlugin`](crate::ConsolePlugin) the Bevy world is attached too.
pub struct CommandContext<'a> {
    registry: &'a ConsoleRegistry,
    output: &'a mut OutputBuffer,
    history: &'a mut HistoryBuffer,
    requests: &'a mut Vec<HostRequest>,
    world: Option<&'a mut World>,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(
        registry: &'a ConsoleRegistry,
        output: &'a mut OutputBuffer,
        history: &'a mut HistoryBuffer,
        requests: &'a mut Vec<HostRequest>,
        world: Option<&'a mut World>,
    ) -> Self {
        Self {
            registry,
            output,
            history,
            requests,
            world,
        }
    }

    /// The command registry.
    #[inline]
    pub fn registry(&self) -> &ConsoleRegistry {
        self.registry
    }

    /// The output buffer.
    #[inline]
    pub fn output(&mut self) -> &mut OutputBuffer {
        self.output
    }

    /// The history buffer.
    #[inline]
    pub fn history(&mut self) -> &mut HistoryBuffer {
        self.history
    }

    /// Append a styled line to the output.
    pub fn print(&mut self, kind: OutputKind, text: impl AsRef<str>) {
        self.output.push(kind, text);
    }

    /// Append a plain line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.output.plain(text);
    }

    /// Append an info line.
    pub fn info(&mut self, text: impl AsRef<str>) {
        self.output.info(text);
    }

    /// Append a warning line.
    pub fn warn(&mut self, text: impl AsRef<str>) {
        self.output.warning(text);
    }

    /// Append an error line.
    pub fn error(&mut self, text: impl AsRef<str>) {
        self.output.error(text);
    }

    /// Ask the host to do something once the command returns.
    pub fn request(&mut self, request: HostRequest) {
        self.requests.push(request);
    }

    /// Whether a Bevy world is attached.
    #[inline]
    pub fn has_world(&self) -> bool {
        self.world.is_some()
    }

    /// Mutable access to the Bevy world.
    ///
    /// Fails when the console is executed outside of an app.
    pub fn world(&mut self) -> Result<&mut World, CommandError> {
        self.world
            .as_deref_mut()
            .ok_or_else(|| CommandError::new("this command needs a running app"))
    }
}

/// A callable bound to a console command.
///
/// Closures with the matching signature implement this automatically; use a
/// struct when the handler carries its own state.
pub trait CommandHandler: Send + Sync + 'static {
    /// Run the command with validated arguments.
    fn invoke(&self, args: &CommandArgs<'_>, ctx: &mut CommandContext<'_>) -> Result<(), CommandError>;
}

impl<F> CommandHandler for F
where
    F: Fn(&CommandArgs<'_>, &mut CommandContext<'_>) -> Result<(), CommandError> + Send + Sync + 'static,
{
    fn invoke(&self, args: &CommandArgs<'_>, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        self(args, ctx)
    }
}

/// A console command: handler plus metadata.
///
/// # Examples
///
/// ```
/// use bevy_dev_console::core::ConCommand;
///
/// let heal = ConCommand::new("heal", |args, ctx| {
///     let amount: u32 = args.require(0, "amount")?;
///     ctx.info(format!("Healed {amount} HP"));
///     Ok(())
/// })
/// .args(["amount"])
/// .required(1)
/// .description("Restore health");
///
/// assert_eq!(heal.usage(), "heal <amount>");
/// ```
#[derive(Clone)]
pub struct ConCommand {
    name: Box<str>,
    handler: Arc<dyn CommandHandler>,
    args: Vec<Box<str>>,
    required: usize,
    description: Box<str>,
    hidden: bool,
    autocomplete: BTreeMap<usize, Vec<String>>,
}

impl ConCommand {
    /// Create a new command with the given name and handler closure.
    pub fn new<F>(name: impl Into<Box<str>>, handler: F) -> Self
    where
        F: Fn(&CommandArgs<'_>, &mut CommandContext<'_>) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        Self::with_handler(name, handler)
    }

    /// Create a new command from any [`CommandHandler`].
    pub fn with_handler(name: impl Into<Box<str>>, handler: impl CommandHandler) -> Self {
        Self {
            name: name.into(),
            handler: Arc::new(handler),
            args: Vec::new(),
            required: 0,
            description: "".into(),
            hidden: false,
            autocomplete: BTreeMap::new(),
        }
    }

    /// Set the declared argument names, in order.
    pub fn args<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        self.args = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set how many leading declared arguments are mandatory.
    pub fn required(mut self, count: usize) -> Self {
        self.required = count;
        self
    }

    /// Set the description.
    pub fn description(mut self, desc: impl Into<Box<str>>) -> Self {
        self.description = desc.into();
        self
    }

    /// Hide the command from listings and autocomplete. It stays callable.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the autocomplete values for the argument at `index`.
    pub fn autocomplete<I, S>(mut self, index: usize, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_autocomplete(index, values.into_iter().map(Into::into).collect());
        self
    }

    /// Get the command name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description.
    #[inline]
    pub fn get_description(&self) -> &str {
        &self.description
    }

    /// Declared argument names.
    pub fn declared_args(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|a| a.as_ref())
    }

    /// Number of declared arguments.
    #[inline]
    pub fn declared_count(&self) -> usize {
        self.args.len()
    }

    /// Number of mandatory arguments.
    #[inline]
    pub fn required_count(&self) -> usize {
        self.required
    }

    /// Whether the command is hidden from listings.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Declared names of the mandatory arguments missing when `given`
    /// arguments were supplied.
    pub fn missing_args(&self, given: usize) -> Vec<&str> {
        self.args
            .iter()
            .take(self.required)
            .skip(given)
            .map(|a| a.as_ref())
            .collect()
    }

    /// Usage string, e.g. `spawn <kind> [count]`.
    pub fn usage(&self) -> String {
        let mut usage = self.name.to_string();
        for (i, arg) in self.args.iter().enumerate() {
            if i < self.required {
                usage.push_str(&format!(" <{}>", arg));
            } else {
                usage.push_str(&format!(" [{}]", arg));
            }
        }
        usage
    }

    /// Autocomplete values registered for the argument at `index`.
    pub fn autocomplete_values(&self, index: usize) -> &[String] {
        self.autocomplete.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if any argument has autocomplete values.
    #[inline]
    pub fn has_autocomplete(&self) -> bool {
        !self.autocomplete.is_empty()
    }

    pub(crate) fn set_autocomplete(&mut self, index: usize, values: Vec<String>) {
        if values.is_empty() {
            self.autocomplete.remove(&index);
        } else {
            self.autocomplete.insert(index, values);
        }
    }

    /// Shared handle to the handler.
    pub fn handler(&self) -> Arc<dyn CommandHandler> {
        Arc::clone(&self.handler)
    }
}

impl std::fmt::Debug for ConCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConCommand")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("required", &self.required)
            .field("description", &self.description)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}
