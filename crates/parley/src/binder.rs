//! Binding of argument tokens to a candidate command's parameters.

use std::ops::Range;
use std::slice;

use parley_core::QuotePairs;
use thiserror::Error;
use tracing::trace;

use crate::convert::{ConverterRegistry, ValueConverter, builtin_converter};
use crate::descriptor::ParameterDescriptor;
use crate::map::CommandMatch;
use crate::value::{Argument, Value};

/// Tracing target for argument binding.
pub(crate) const BIND_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::bind");

/// Why a candidate match could not be bound.
///
/// A failure rejects only the candidate it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BindFailure {
    /// A required parameter had no token left to bind.
    #[error("missing argument for parameter '{parameter}'")]
    MissingArgument {
        /// The parameter name.
        parameter: String,
    },

    /// The converter rejected the argument text.
    #[error("'{text}' is not a valid {expected} for parameter '{parameter}'")]
    Unconvertible {
        /// The parameter name.
        parameter: String,
        /// The argument text after dequoting.
        text: String,
        /// The declared type name.
        expected: &'static str,
    },

    /// Neither the registry nor the built-ins convert the declared type.
    #[error("no converter for type {value_type} of parameter '{parameter}'")]
    NoConverter {
        /// The parameter name.
        parameter: String,
        /// The declared type name.
        value_type: &'static str,
    },

    /// A converter produced a value of a different type than declared.
    #[error("converter for parameter '{parameter}' produced {actual}, expected {expected}")]
    ConverterTypeMismatch {
        /// The parameter name.
        parameter: String,
        /// The declared type name.
        expected: &'static str,
        /// The type name of the produced value.
        actual: &'static str,
    },

    /// A token range does not address the source text.
    #[error("token range {start}..{end} is outside the source text")]
    TokenOutOfBounds {
        /// Start of the range.
        start: usize,
        /// End of the range.
        end: usize,
    },
}

impl BindFailure {
    fn missing(parameter: &ParameterDescriptor) -> Self {
        Self::MissingArgument {
            parameter: parameter.name().to_owned(),
        }
    }

    fn unconvertible(parameter: &ParameterDescriptor, text: &str) -> Self {
        Self::Unconvertible {
            parameter: parameter.name().to_owned(),
            text: text.to_owned(),
            expected: parameter.value_type().name(),
        }
    }

    fn no_converter(parameter: &ParameterDescriptor) -> Self {
        Self::NoConverter {
            parameter: parameter.name().to_owned(),
            value_type: parameter.value_type().name(),
        }
    }

    fn type_mismatch(parameter: &ParameterDescriptor, value: &Value) -> Self {
        Self::ConverterTypeMismatch {
            parameter: parameter.name().to_owned(),
            expected: parameter.value_type().name(),
            actual: value.value_type().name(),
        }
    }

    const fn out_of_bounds(range: &Range<usize>) -> Self {
        Self::TokenOutOfBounds {
            start: range.start,
            end: range.end,
        }
    }
}

/// Converts a match's argument tokens into the values of its parameters.
///
/// Parameters bind left to right:
///
/// - a plain parameter takes the next token, stripped of one pair of
///   surrounding quotes, or its default once tokens run out;
/// - a remainder parameter takes the source text from the next token to the
///   end of the input, verbatim;
/// - a variadic parameter converts every remaining token.
///
/// Tokens left after the last parameter are ignored.
pub struct ArgumentBinder<'r, R: ?Sized> {
    converters: &'r R,
    quotes: &'r QuotePairs,
}

impl<'r, R: ConverterRegistry + ?Sized> ArgumentBinder<'r, R> {
    /// Creates a binder that converts through `converters` and dequotes with
    /// `quotes`.
    #[must_use]
    pub const fn new(converters: &'r R, quotes: &'r QuotePairs) -> Self {
        Self { converters, quotes }
    }

    /// Binds the arguments of `candidate`.
    ///
    /// `tokens` holds the byte range of every token in `source`, the path
    /// included; `candidate` selects the argument tokens among them.
    ///
    /// # Errors
    ///
    /// Returns a [`BindFailure`] when a required argument is missing, a token
    /// cannot be converted to the declared type, or a token range does not
    /// address `source`.
    pub fn bind(
        &self,
        source: &str,
        tokens: &[Range<usize>],
        candidate: &CommandMatch<'_>,
    ) -> Result<Vec<Argument>, BindFailure> {
        let arguments = candidate.arguments();
        let mut remaining = tokens
            .get(arguments.clone())
            .ok_or_else(|| BindFailure::out_of_bounds(&arguments))?
            .iter();

        let parameters = candidate.command().parameters();
        let mut bound = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            let argument = if parameter.is_variadic() {
                self.bind_variadic(source, parameter, &mut remaining)?
            } else if parameter.is_remainder() {
                self.bind_remainder(source, parameter, &mut remaining)?
            } else {
                self.bind_single(source, parameter, remaining.next())?
            };
            bound.push(argument);
        }
        Ok(bound)
    }

    fn bind_single(
        &self,
        source: &str,
        parameter: &ParameterDescriptor,
        token: Option<&Range<usize>>,
    ) -> Result<Argument, BindFailure> {
        let Some(range) = token else {
            return default_or_missing(parameter);
        };
        let text = self.quotes.dequote(token_text(source, range)?);
        self.convert(parameter, text).map(Argument::Single)
    }

    fn bind_remainder(
        &self,
        source: &str,
        parameter: &ParameterDescriptor,
        remaining: &mut slice::Iter<'_, Range<usize>>,
    ) -> Result<Argument, BindFailure> {
        let Some(first) = remaining.next() else {
            return default_or_missing(parameter);
        };
        let tail = first.start..source.len();
        let text = source
            .get(tail.clone())
            .ok_or_else(|| BindFailure::out_of_bounds(&tail))?;
        self.convert(parameter, text).map(Argument::Single)
    }

    fn bind_variadic(
        &self,
        source: &str,
        parameter: &ParameterDescriptor,
        remaining: &mut slice::Iter<'_, Range<usize>>,
    ) -> Result<Argument, BindFailure> {
        remaining
            .map(|range| {
                let text = self.quotes.dequote(token_text(source, range)?);
                self.convert(parameter, text)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Argument::Variadic)
    }

    fn convert(&self, parameter: &ParameterDescriptor, text: &str) -> Result<Value, BindFailure> {
        let value_type = parameter.value_type();
        let converter: &dyn ValueConverter = self
            .converters
            .converter_for(value_type)
            .or_else(|| builtin_converter(value_type))
            .ok_or_else(|| BindFailure::no_converter(parameter))?;
        let value = converter
            .try_convert(text)
            .ok_or_else(|| BindFailure::unconvertible(parameter, text))?;
        if value.value_type() != value_type {
            return Err(BindFailure::type_mismatch(parameter, &value));
        }
        trace!(
            target: BIND_TARGET,
            parameter = parameter.name(),
            value_type = value_type.name(),
            "bound argument"
        );
        Ok(value)
    }
}

fn default_or_missing(parameter: &ParameterDescriptor) -> Result<Argument, BindFailure> {
    parameter
        .default_value()
        .cloned()
        .map(Argument::Single)
        .ok_or_else(|| BindFailure::missing(parameter))
}

fn token_text<'s>(source: &'s str, range: &Range<usize>) -> Result<&'s str, BindFailure> {
    source
        .get(range.clone())
        .ok_or_else(|| BindFailure::out_of_bounds(range))
}
