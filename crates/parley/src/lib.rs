//! Command resolution for text command lines.
//!
//! Parley turns a message such as `!ban @someone being rude` into the
//! registered command that handles it and that command's typed arguments.
//! Messages are tokenized by [`parley_core`], matched against a prefix trie
//! of alias paths and bound to each candidate's parameters until one fits.
//!
//! # Core types
//!
//! - [`CommandBuilder`], [`ParameterBuilder`] and [`ModuleBuilder`]: build
//!   validated, immutable descriptors
//! - [`CommandMap`]: prefix trie from alias paths to commands
//! - [`ConverterRegistry`] and [`TypeConverterRegistry`]: text-to-value
//!   conversion keyed by [`ValueType`]
//! - [`ArgumentBinder`]: binds argument tokens to parameters
//! - [`CommandParser`]: tokenize, resolve and bind in one call
//!
//! # Example
//!
//! ```
//! use parley::{
//!     CommandBuilder, CommandMap, CommandParser, ModuleBuilder, ParameterBuilder,
//!     TypeConverterRegistry,
//! };
//!
//! let ban = CommandBuilder::new("ban")
//!     .alias("ban")
//!     .parameter(ParameterBuilder::new::<String>("user"))
//!     .parameter(
//!         ParameterBuilder::new::<String>("reason")
//!             .remainder()
//!             .with_default(String::from("no reason given")),
//!     )
//!     .build()?;
//! let moderation = ModuleBuilder::new("moderation").command(ban).build()?;
//!
//! let commands = CommandMap::from_modules([&moderation])?;
//! let parser = CommandParser::new(commands, TypeConverterRegistry::new());
//!
//! let parsed = parser.parse("!ban @someone 'being rude' again", 1)?;
//! assert_eq!(parsed.path(), ["ban"]);
//! assert_eq!(parsed.argument::<String>(0).map(String::as_str), Some("@someone"));
//! assert_eq!(
//!     parsed.argument::<String>(1).map(String::as_str),
//!     Some("'being rude' again"),
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod binder;
mod convert;
mod descriptor;
mod error;
mod map;
mod parser;
mod value;

pub use binder::{ArgumentBinder, BindFailure};
pub use convert::{
    ConverterRegistry, EmptyRegistry, FromStrConverter, TypeConverterRegistry, ValueConverter,
    builtin_converter,
};
pub use descriptor::{
    CommandBuilder, CommandDescriptor, ModuleBuilder, ModuleDescriptor, ParameterBuilder,
    ParameterDescriptor,
};
pub use error::{DescriptorError, ParseError, RegistrationError};
pub use map::{CommandMap, CommandMatch, Resolve};
pub use parley_core;
pub use parley_core::{
    QuotePair, QuotePairs, Tokenized, Tokenizer, TokenizerConfig, TokenizerFailure,
    TokenizerFailureReason,
};
pub use parser::{CommandParser, ParsedCommand};
pub use value::{Argument, Value, ValueType};

#[cfg(test)]
mod tests;
