//! Error types for command registration and parsing.
//!
//! Three kinds of failure are kept apart: descriptor and registration
//! errors are precondition violations reported at the offending call,
//! [`BindFailure`](crate::BindFailure)s reject a single candidate match, and
//! [`ParseError`] is what a caller of
//! [`CommandParser::parse`](crate::CommandParser::parse) sees.

use parley_core::TokenizerFailure;
use thiserror::Error;

/// Errors raised when building an invalid command, parameter or module
/// descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DescriptorError {
    /// An alias is the empty string.
    #[error("'{owner}' declares an empty alias")]
    EmptyAlias {
        /// Name of the command or module declaring the alias.
        owner: String,
    },

    /// An alias contains whitespace and could never match a single token.
    #[error("alias '{alias}' of '{owner}' contains whitespace")]
    AliasContainsWhitespace {
        /// Name of the command or module declaring the alias.
        owner: String,
        /// The offending alias.
        alias: String,
    },

    /// A default value does not have the parameter's declared type.
    #[error("default for parameter '{parameter}' is a {actual}, expected {expected}")]
    DefaultTypeMismatch {
        /// The parameter name.
        parameter: String,
        /// The declared type.
        expected: &'static str,
        /// The type of the supplied default.
        actual: &'static str,
    },

    /// A variadic parameter was given a default value.
    #[error("variadic parameter '{parameter}' cannot have a default value")]
    VariadicDefault {
        /// The parameter name.
        parameter: String,
    },

    /// A parameter is marked both remainder and variadic.
    #[error("parameter '{parameter}' cannot be both remainder and variadic")]
    RemainderAndVariadic {
        /// The parameter name.
        parameter: String,
    },

    /// A variadic parameter is followed by another parameter.
    #[error("variadic parameter '{parameter}' of command '{command}' must be last")]
    VariadicNotLast {
        /// The command name.
        command: String,
        /// The parameter name.
        parameter: String,
    },

    /// A remainder parameter is followed by another parameter.
    #[error("remainder parameter '{parameter}' of command '{command}' must be last")]
    RemainderNotLast {
        /// The command name.
        command: String,
        /// The parameter name.
        parameter: String,
    },

    /// A command declares both a remainder and a variadic parameter.
    #[error("command '{command}' cannot combine remainder and variadic parameters")]
    RemainderWithVariadic {
        /// The command name.
        command: String,
    },
}

impl DescriptorError {
    /// Creates an empty-alias error.
    #[must_use]
    pub fn empty_alias(owner: impl Into<String>) -> Self {
        Self::EmptyAlias {
            owner: owner.into(),
        }
    }

    /// Creates an alias-contains-whitespace error.
    #[must_use]
    pub fn alias_contains_whitespace(owner: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::AliasContainsWhitespace {
            owner: owner.into(),
            alias: alias.into(),
        }
    }

    /// Creates a variadic-not-last error.
    #[must_use]
    pub fn variadic_not_last(command: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::VariadicNotLast {
            command: command.into(),
            parameter: parameter.into(),
        }
    }

    /// Creates a remainder-not-last error.
    #[must_use]
    pub fn remainder_not_last(command: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::RemainderNotLast {
            command: command.into(),
            parameter: parameter.into(),
        }
    }
}

/// Errors raised when a command cannot be registered in a
/// [`CommandMap`](crate::CommandMap).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// The registration path has no segments.
    #[error("command '{command}' has an empty registration path")]
    EmptyPath {
        /// The command name.
        command: String,
    },

    /// A path segment is the empty string.
    #[error("command '{command}' has an empty segment at position {position}")]
    EmptySegment {
        /// The command name.
        command: String,
        /// Zero-based position of the empty segment.
        position: usize,
    },
}

impl RegistrationError {
    /// Creates an empty-path error.
    #[must_use]
    pub fn empty_path(command: impl Into<String>) -> Self {
        Self::EmptyPath {
            command: command.into(),
        }
    }

    /// Creates an empty-segment error.
    #[must_use]
    pub fn empty_segment(command: impl Into<String>, position: usize) -> Self {
        Self::EmptySegment {
            command: command.into(),
            position,
        }
    }
}

/// Errors returned by [`CommandParser::parse`](crate::CommandParser::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The message could not be tokenized.
    #[error("tokenization failed: {0}")]
    Tokenizer(#[from] TokenizerFailure),

    /// No registered command matched the message with bindable arguments.
    #[error("no command found ({candidates} candidate(s) rejected)")]
    CommandNotFound {
        /// Number of candidate matches whose arguments failed to bind.
        candidates: usize,
    },
}

impl ParseError {
    /// Creates a command-not-found error.
    #[must_use]
    pub const fn command_not_found(candidates: usize) -> Self {
        Self::CommandNotFound { candidates }
    }

    /// Returns `true` for [`ParseError::CommandNotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::CommandNotFound { .. })
    }
}
