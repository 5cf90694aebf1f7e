//! Error types for console registration and command handlers.

/// Errors surfaced to code that drives the console programmatically.
///
/// Only registration-time misuse is an error. Problems caused by typed input
/// are reported to the output buffer instead, see [`ExecOutcome`](super::ExecOutcome).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// A registration argument is invalid (bad name, required count larger
    /// than the declared argument list).
    InvalidArgument(String),
    /// The named command is not registered.
    UnknownCommand(String),
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ConsoleError::UnknownCommand(name) => write!(f, "unknown command '{}'", name),
        }
    }
}

impl std::error::Error for ConsoleError {}

/// Error returned by a command handler.
///
/// The message is written to the console as an error line; it never
/// propagates past the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for CommandError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<std::num::ParseIntError> for CommandError {
    fn from(err: std::num::ParseIntError) -> Self {
        Self::new(format!("expected an integer: {}", err))
    }
}

impl From<std::num::ParseFloatError> for CommandError {
    fn from(err: std::num::ParseFloatError) -> Self {
        Self::new(format!("expected a number: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_error_display() {
        let err = ConsoleError::UnknownCommand("heel".into());
        assert_eq!(err.to_string(), "unknown command 'heel'");

        let err = ConsoleError::InvalidArgument("name is empty".into());
        assert_eq!(err.to_string(), "invalid argument: name is empty");
    }

    #[test]
    fn test_command_error_from_parse() {
        fn parse(s: &str) -> Result<i32, CommandError> {
            Ok(s.parse::<i32>()?)
        }

        assert_eq!(parse("42"), Ok(42));
        let err = parse("forty").unwrap_err();
        assert!(err.message().starts_with("expected an integer"));
    }
}
