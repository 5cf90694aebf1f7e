//! Tokenizer for console input lines.
//!
//! Splits whitespace-separated tokens with support for quoted strings.
//! Parsing never fails: console input is typed live, so an unterminated
//! quote swallows the rest of the line as a single token.

/// Result of tokenizing a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedCommand<'a> {
    /// The command name (first token). Empty for blank input.
    pub command: &'a str,
    /// The arguments (remaining tokens).
    pub args: Vec<&'a str>,
    /// The raw input string.
    pub raw: &'a str,
}

impl TokenizedCommand<'_> {
    /// Whether the line carried no command at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }

    /// Render the tokens back into a normalized line.
    ///
    /// Tokenizing the result yields the same command and arguments again.
    pub fn to_display(&self) -> String {
        display_line(self.command, &self.args)
    }
}

/// A single token with its position in the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text with surrounding quotes stripped.
    pub text: &'a str,
    /// Byte offset where the token starts, including an opening quote.
    pub start: usize,
    /// Byte offset one past the token, including a closing quote.
    pub end: usize,
    /// The quote character if the token was quoted.
    pub quote: Option<char>,
    /// False for a quoted token that ran to the end of the line.
    pub terminated: bool,
}

/// Tokenize a command line into command name and arguments.
///
/// # Syntax
///
/// - Tokens are separated by runs of whitespace
/// - A token starting with `"` or `'` runs to the matching quote and keeps
///   inner whitespace; the quotes are stripped
/// - A missing closing quote consumes the remainder of the line
/// - Quotes inside a bare word are ordinary characters
///
/// # Examples
///
/// ```
/// use bevy_dev_console::core::tokenize;
///
/// let result = tokenize("heal 50");
/// assert_eq!(result.command, "heal");
/// assert_eq!(result.args, vec!["50"]);
///
/// let result = tokenize(r#"say "hello world""#);
/// assert_eq!(result.args, vec!["hello world"]);
///
/// // Unterminated quotes degrade gracefully.
/// let result = tokenize(r#"say "hello wor"#);
/// assert_eq!(result.args, vec!["hello wor"]);
///
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(input: &str) -> TokenizedCommand<'_> {
    let mut tokens = tokenize_string(input).into_iter();
    let command = tokens.next().unwrap_or("");

    TokenizedCommand {
        command,
        args: tokens.collect(),
        raw: input,
    }
}

/// Token texts, command name included.
fn tokenize_string(input: &str) -> Vec<&str> {
    scan_tokens(input).into_iter().map(|token| token.text).collect()
}

/// Scan a line into positioned tokens.
///
/// Lower-level than [`tokenize`]; autocomplete uses the offsets to replace
/// the token under completion.
pub fn scan_tokens(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => continue,

            '"' | '\'' => {
                let content_start = start + c.len_utf8();
                let mut content_end = input.len();
                let mut end = input.len();
                let mut terminated = false;

                for (i, ch) in chars.by_ref() {
                    if ch == c {
                        content_end = i;
                        end = i + ch.len_utf8();
                        terminated = true;
                        break;
                    }
                }

                tokens.push(Token {
                    text: &input[content_start..content_end],
                    start,
                    end,
                    quote: Some(c),
                    terminated,
                });
            }

            _ => {
                let mut end = start + c.len_utf8();

                while let Some(&(i, ch)) = chars.peek() {
                    if ch.is_whitespace() {
                        break;
                    }
                    end = i + ch.len_utf8();
                    chars.next();
                }

                tokens.push(Token {
                    text: &input[start..end],
                    start,
                    end,
                    quote: None,
                    terminated: true,
                });
            }
        }
    }

    tokens
}

/// Quote a single token so that [`tokenize`] reads it back unchanged.
///
/// Tokens holding whitespace, empty tokens and tokens that start with a
/// quote character get wrapped; double quotes are preferred.
pub fn quote_token(token: &str) -> String {
    let needs_quotes = token.is_empty()
        || token.chars().any(char::is_whitespace)
        || token.starts_with(['"', '\'']);

    if !needs_quotes {
        return token.to_string();
    }

    let quote = if token.contains('"') { '\'' } else { '"' };
    format!("{quote}{token}{quote}")
}

/// Join a command and its arguments into a normalized line.
pub fn display_line(command: &str, args: &[&str]) -> String {
    let mut line = quote_token(command);
    for arg in args {
        line.push(' ');
        line.push_str(&quote_token(arg));
    }
    line
}
