//! Console registry for ConCommands.
//!
//! Central storage with trie-based prefix lookup for autocomplete and a
//! registration-order index for listings.

use std::collections::HashMap;

use super::{ConCommand, ConsoleError, LOG_TARGET, Trie};

/// Central registry of console commands.
///
/// Names are case-sensitive and unique; registering a name again replaces the
/// previous command but keeps its listing position.
///
/// # Examples
///
/// ```
/// use bevy_dev_console::core::{ConCommand, ConsoleRegistry};
///
/// let mut registry = ConsoleRegistry::new();
/// registry
///     .register(ConCommand::new("quit", |_, _| Ok(())).description("Exit"))
///     .unwrap();
///
/// assert!(registry.contains("quit"));
/// assert_eq!(registry.get("quit").unwrap().get_description(), "Exit");
/// ```
#[derive(Default, Debug)]
pub struct ConsoleRegistry {
    /// Trie for prefix lookup; values live in `entries`.
    trie: Trie<()>,
    entries: HashMap<Box<str>, ConCommand>,
    /// Names in registration order.
    order: Vec<Box<str>>,
}

impl ConsoleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// Returns `Ok(true)` if newly registered, `Ok(false)` if it replaced an
    /// existing command. Fails with [`ConsoleError::InvalidArgument`] when the
    /// name is empty or contains whitespace, or when more arguments are
    /// required than declared.
    pub fn register(&mut self, cmd: ConCommand) -> Result<bool, ConsoleError> {
        validate(&cmd)?;

        let name: Box<str> = cmd.name().into();
        let is_duplicate = self.entries.contains_key(&name);

        if is_duplicate {
            bevy::log::warn!(target: LOG_TARGET, "Console: Overwriting existing command '{}'", name);
        } else {
            self.trie.insert(&name, ());
            self.order.push(name.clone());
        }

        self.entries.insert(name, cmd);
        Ok(!is_duplicate)
    }

    /// Remove a command. Removing an unknown name is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<ConCommand> {
        let removed = self.entries.remove(name)?;
        self.trie.remove(name);
        self.order.retain(|n| n.as_ref() != name);
        Some(removed)
    }

    /// Set autocomplete values for one argument of a command.
    ///
    /// An empty list removes the values for that argument.
    pub fn set_autocomplete_values(
        &mut self,
        name: &str,
        arg_index: usize,
        values: Vec<String>,
    ) -> Result<(), ConsoleError> {
        let cmd = self
            .entries
            .get_mut(name)
            .ok_or_else(|| ConsoleError::UnknownCommand(name.to_string()))?;
        cmd.set_autocomplete(arg_index, values);
        Ok(())
    }

    /// Look up a command by name.
    pub fn get(&self, name: &str) -> Option<&ConCommand> {
        self.entries.get(name)
    }

    /// Check if a command exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get the number of commands, hidden ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConCommand> {
        self.order.iter().filter_map(|name| self.entries.get(name))
    }

    /// Iterate over non-hidden commands in registration order.
    pub fn visible(&self) -> impl Iterator<Item = &ConCommand> {
        self.iter().filter(|cmd| !cmd.is_hidden())
    }

    /// Names of non-hidden commands starting with `prefix`, sorted.
    pub fn visible_names_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.trie
            .prefix_keys(prefix)
            .filter(|name| self.entries.get(*name).is_some_and(|cmd| !cmd.is_hidden()))
            .collect()
    }
}

fn validate(cmd: &ConCommand) -> Result<(), ConsoleError> {
    let name = cmd.name();

    if name.is_empty() {
        return Err(ConsoleError::InvalidArgument("command name is empty".into()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ConsoleError::InvalidArgument(format!(
            "command name '{}' contains whitespace",
            name
        )));
    }
    if cmd.required_count() > cmd.declared_count() {
        return Err(ConsoleError::InvalidArgument(format!(
            "'{}' requires {} arguments but declares only {}",
            name,
            cmd.required_count(),
            cmd.declared_count()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommandArgs, CommandContext, CommandError};

    fn noop(_: &CommandArgs<'_>, _: &mut CommandContext<'_>) -> Result<(), CommandError> {
        Ok(())
    }

    fn cmd(name: &str) -> ConCommand {
        ConCommand::new(name, noop)
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ConsoleRegistry::new();

        let is_new = registry
            .register(cmd("heal").args(["amount"]).required(1).description("Heal"))
            .unwrap();
        assert!(is_new);

        let found = registry.get("heal").unwrap();
        assert_eq!(found.name(), "heal");
        assert_eq!(found.required_count(), 1);
        assert_eq!(found.declared_args().collect::<Vec<_>>(), vec!["amount"]);
        assert!(registry.get("Heal").is_none());
    }

    #[test]
    fn test_remove() {
        let mut registry = ConsoleRegistry::new();
        registry.register(cmd("heal")).unwrap();

        assert!(registry.remove("heal").is_some());
        assert!(registry.get("heal").is_none());
        assert!(registry.visible_names_with_prefix("he").is_empty());

        // Removing again is not an error
        assert!(registry.remove("heal").is_none());
    }

    #[test]
    fn test_required_exceeds_declared() {
        let mut registry = ConsoleRegistry::new();
        let result = registry.register(cmd("tp").args(["x"]).required(2));
        assert!(matches!(result, Err(ConsoleError::InvalidArgument(_))));
        assert!(!registry.contains("tp"));
    }

    #[test]
    fn test_invalid_names() {
        let mut registry = ConsoleRegistry::new();
        assert!(registry.register(cmd("")).is_err());
        assert!(registry.register(cmd("two words")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let mut registry = ConsoleRegistry::new();
        registry.register(cmd("a")).unwrap();
        registry.register(cmd("b")).unwrap();

        let is_new = registry.register(cmd("a").description("second")).unwrap();
        assert!(!is_new);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a").unwrap().get_description(), "second");

        let order: Vec<_> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_hidden_excluded_from_listing() {
        let mut registry = ConsoleRegistry::new();
        registry.register(cmd("help")).unwrap();
        registry.register(cmd("heal_all").hidden(true)).unwrap();
        registry.register(cmd("heal")).unwrap();

        let visible: Vec<_> = registry.visible().map(|c| c.name()).collect();
        assert_eq!(visible, vec!["help", "heal"]);
        assert_eq!(registry.visible_names_with_prefix("he"), vec!["heal", "help"]);
        assert!(registry.contains("heal_all"));
    }

    #[test]
    fn test_set_autocomplete_values() {
        let mut registry = ConsoleRegistry::new();
        registry.register(cmd("spawn").args(["kind"])).unwrap();

        registry
            .set_autocomplete_values("spawn", 0, vec!["orc".into(), "goblin".into()])
            .unwrap();
        assert_eq!(registry.get("spawn").unwrap().autocomplete_values(0).len(), 2);

        let err = registry.set_autocomplete_values("despawn", 0, Vec::new());
        assert_eq!(err, Err(ConsoleError::UnknownCommand("despawn".into())));
    }
}
