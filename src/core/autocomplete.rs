//! Cycling autocomplete over command names and argument values.
//!
//! Pressing the completion key repeatedly walks through a fixed candidate
//! list for the text that was typed; typing something else starts over.

use super::{ConsoleRegistry, quote_token, scan_tokens};

/// Autocomplete state for one input line.
///
/// # Examples
///
/// ```
/// use bevy_dev_console::core::{Autocomplete, ConCommand, ConsoleRegistry};
///
/// let mut registry = ConsoleRegistry::new();
/// for name in ["help", "heal", "hide"] {
///     registry.register(ConCommand::new(name, |_, _| Ok(()))).unwrap();
/// }
///
/// let mut ac = Autocomplete::new();
/// assert_eq!(ac.complete("he", &registry), "heal");
/// assert_eq!(ac.complete("he", &registry), "help");
/// assert_eq!(ac.complete("he", &registry), "heal");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    /// Input the current candidates were computed from.
    prefix: Option<String>,
    /// Full-line suggestions, sorted.
    candidates: Vec<String>,
    /// Position of the last returned candidate.
    index: usize,
}

impl Autocomplete {
    /// Create an empty autocomplete state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next suggestion for `input`.
    ///
    /// Calling again with the same input, or with the suggestion that was
    /// just returned, advances through the candidates and wraps after the
    /// last one. Any other input recomputes the candidates. Without
    /// candidates the input is returned unchanged.
    pub fn complete(&mut self, input: &str, registry: &ConsoleRegistry) -> String {
        if self.is_cycling(input) {
            if !self.candidates.is_empty() {
                self.index = (self.index + 1) % self.candidates.len();
            }
        } else {
            self.prefix = Some(input.to_string());
            self.candidates = suggestions(input, registry);
            self.index = 0;
        }

        self.candidates
            .get(self.index)
            .cloned()
            .unwrap_or_else(|| input.to_string())
    }

    /// Forget the cached prefix so the next call recomputes.
    pub fn reset(&mut self) {
        self.prefix = None;
        self.candidates.clear();
        self.index = 0;
    }

    /// Candidates for the cached prefix, e.g. for a suggestion popup.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Index of the candidate returned last.
    pub fn selected(&self) -> Option<usize> {
        (!self.candidates.is_empty()).then_some(self.index)
    }

    fn is_cycling(&self, input: &str) -> bool {
        let Some(prefix) = self.prefix.as_deref() else {
            return false;
        };
        prefix == input
            || self
                .candidates
                .get(self.index)
                .is_some_and(|current| current == input)
    }
}

/// Compute the sorted full-line suggestions for `input`.
///
/// With a single token and no trailing whitespace the command name is
/// completed from the visible registry names. Otherwise the last argument
/// is completed from the command's registered values for that position.
pub fn suggestions(input: &str, registry: &ConsoleRegistry) -> Vec<String> {
    let tokens = scan_tokens(input);

    let completing_name = match tokens.as_slice() {
        [] => true,
        [only] => only.end == input.len() && only.quote.is_none(),
        _ => false,
    };

    if completing_name {
        let prefix = tokens.first().map(|t| t.text).unwrap_or("");
        return registry
            .visible_names_with_prefix(prefix)
            .into_iter()
            .map(String::from)
            .collect();
    }

    let Some(cmd) = registry.get(tokens[0].text).filter(|cmd| !cmd.is_hidden()) else {
        return Vec::new();
    };

    // `tokens` has at least one element here.
    let last = tokens[tokens.len() - 1];
    let (arg_index, arg_prefix, replace_from) = if tokens.len() > 1 && last.end == input.len() {
        (tokens.len() - 2, last.text, last.start)
    } else {
        (tokens.len() - 1, "", input.len())
    };

    let mut values: Vec<&str> = cmd
        .autocomplete_values(arg_index)
        .iter()
        .map(String::as_str)
        .filter(|value| value.starts_with(arg_prefix))
        .collect();
    values.sort_unstable();
    values.dedup();

    let head = &input[..replace_from];
    values
        .into_iter()
        .map(|value| format!("{}{}", head, quote_token(value)))
        .collect()
}
