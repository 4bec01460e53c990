//! Resolution of a raw message into a bound command.

use std::ops::Range;
use std::sync::Arc;

use parley_core::Tokenizer;
use tracing::debug;

use crate::binder::ArgumentBinder;
use crate::convert::{ConverterRegistry, TypeConverterRegistry};
use crate::descriptor::CommandDescriptor;
use crate::error::ParseError;
use crate::map::CommandMap;
use crate::value::Argument;

/// Tracing target for message parsing.
pub(crate) const PARSE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::parse");

/// Tokenizes messages, resolves them against a [`CommandMap`] and binds
/// their arguments.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use parley::{CommandBuilder, CommandMap, CommandParser, EmptyRegistry, ParameterBuilder};
///
/// let command = Arc::new(
///     CommandBuilder::new("required_param")
///         .parameter(ParameterBuilder::new::<i32>("param"))
///         .build()?,
/// );
/// let mut commands = CommandMap::new();
/// commands.add_command(&["required_param"], command)?;
///
/// let parser = CommandParser::new(commands, EmptyRegistry);
/// let parsed = parser.parse("!required_param 1", 1)?;
/// assert_eq!(parsed.command().name(), "required_param");
/// assert_eq!(parsed.argument::<i32>(0), Some(&1));
/// assert!(parser.parse("!required_param a", 1).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct CommandParser<R = TypeConverterRegistry> {
    commands: CommandMap,
    converters: R,
    tokenizer: Tokenizer,
}

impl<R: ConverterRegistry> CommandParser<R> {
    /// Creates a parser with the default tokenizer.
    #[must_use]
    pub fn new(commands: CommandMap, converters: R) -> Self {
        Self {
            commands,
            converters,
            tokenizer: Tokenizer::default(),
        }
    }

    /// Replaces the tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Returns the command map.
    #[must_use]
    pub const fn commands(&self) -> &CommandMap {
        &self.commands
    }

    /// Returns the command map for further registration.
    pub const fn commands_mut(&mut self) -> &mut CommandMap {
        &mut self.commands
    }

    /// Returns the converter registry.
    #[must_use]
    pub const fn converters(&self) -> &R {
        &self.converters
    }

    /// Returns the tokenizer.
    #[must_use]
    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Parses `message`, ignoring its first `prefix_len` bytes.
    ///
    /// Candidate matches are tried shallowest first and the first one whose
    /// arguments all bind wins.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Tokenizer`] when the message cannot be tokenized
    /// and [`ParseError::CommandNotFound`] when no candidate binds.
    pub fn parse(&self, message: &str, prefix_len: usize) -> Result<ParsedCommand, ParseError> {
        let tokenized = self.tokenizer.tokenize(message, prefix_len)?;
        let ranges: Vec<Range<usize>> = tokenized.ranges().collect();
        let segments: Vec<&str> = tokenized.tokens().collect();
        let binder = ArgumentBinder::new(
            &self.converters,
            self.tokenizer.config().quote_pairs(),
        );

        let mut candidates = 0;
        for candidate in self.commands.resolve(&segments) {
            candidates += 1;
            match binder.bind(message, &ranges, &candidate) {
                Ok(arguments) => {
                    debug!(
                        target: PARSE_TARGET,
                        command = candidate.command().name(),
                        depth = candidate.path().end,
                        "resolved command"
                    );
                    let path = segments
                        .get(candidate.path())
                        .unwrap_or_default()
                        .iter()
                        .map(|segment| (*segment).to_owned())
                        .collect();
                    return Ok(ParsedCommand {
                        command: Arc::clone(candidate.command()),
                        path,
                        arguments,
                    });
                }
                Err(failure) => debug!(
                    target: PARSE_TARGET,
                    command = candidate.command().name(),
                    %failure,
                    "rejected candidate"
                ),
            }
        }

        debug!(
            target: PARSE_TARGET,
            candidates,
            tokens = segments.len(),
            "no command found"
        );
        Err(ParseError::command_not_found(candidates))
    }
}

/// A message resolved to a command with bound arguments.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    command: Arc<CommandDescriptor>,
    path: Vec<String>,
    arguments: Vec<Argument>,
}

impl ParsedCommand {
    /// Returns the resolved command.
    #[must_use]
    pub const fn command(&self) -> &Arc<CommandDescriptor> {
        &self.command
    }

    /// Returns the alias segments consumed from the message.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Returns the bound arguments in parameter order.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Returns the value bound to the non-variadic parameter at `position`
    /// if it is a `T`.
    #[must_use]
    pub fn argument<T: std::any::Any>(&self, position: usize) -> Option<&T> {
        self.arguments.get(position)?.downcast_ref()
    }

    /// Consumes the result, returning the bound arguments.
    #[must_use]
    pub fn into_arguments(self) -> Vec<Argument> {
        self.arguments
    }
}
