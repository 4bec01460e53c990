//! Builders that validate descriptors before freezing them.

use std::any::Any;
use std::sync::Arc;

use crate::error::DescriptorError;
use crate::value::{Value, ValueType};

use super::{CommandDescriptor, ModuleDescriptor, ParameterDescriptor};

/// Builds a [`ParameterDescriptor`].
///
/// # Example
///
/// ```
/// use parley::ParameterBuilder;
///
/// let count = ParameterBuilder::new::<i32>("count").with_default(5_i32).build()?;
/// assert!(count.is_optional());
/// # Ok::<(), parley::DescriptorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ParameterBuilder {
    name: String,
    value_type: ValueType,
    default: Option<Value>,
    remainder: bool,
    variadic: bool,
}

impl ParameterBuilder {
    /// Starts a parameter of type `T`; for a variadic parameter `T` is the
    /// element type.
    #[must_use]
    pub fn new<T: Any>(name: impl Into<String>) -> Self {
        Self::of(name, ValueType::of::<T>())
    }

    /// Starts a parameter of an explicit [`ValueType`].
    #[must_use]
    pub fn of(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: None,
            remainder: false,
            variadic: false,
        }
    }

    /// Makes the parameter optional with `value` as its default.
    #[must_use]
    pub fn with_default<T: Any + Send + Sync>(self, value: T) -> Self {
        self.with_default_value(Value::new(value))
    }

    /// Makes the parameter optional with an already wrapped default.
    #[must_use]
    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Makes the parameter capture the rest of the input verbatim.
    #[must_use]
    pub const fn remainder(mut self) -> Self {
        self.remainder = true;
        self
    }

    /// Makes the parameter collect every remaining token.
    #[must_use]
    pub const fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Validates and freezes the parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptorError`] when the default has the wrong type, a
    /// variadic parameter has a default, or the parameter is both remainder
    /// and variadic.
    pub fn build(self) -> Result<ParameterDescriptor, DescriptorError> {
        if self.remainder && self.variadic {
            return Err(DescriptorError::RemainderAndVariadic {
                parameter: self.name,
            });
        }
        if let Some(default) = &self.default {
            if self.variadic {
                return Err(DescriptorError::VariadicDefault {
                    parameter: self.name,
                });
            }
            if default.value_type() != self.value_type {
                return Err(DescriptorError::DefaultTypeMismatch {
                    expected: self.value_type.name(),
                    actual: default.value_type().name(),
                    parameter: self.name,
                });
            }
        }
        Ok(ParameterDescriptor {
            name: self.name,
            value_type: self.value_type,
            default: self.default,
            remainder: self.remainder,
            variadic: self.variadic,
        })
    }
}

/// Builds a [`CommandDescriptor`].
///
/// # Example
///
/// ```
/// use parley::{CommandBuilder, ParameterBuilder};
///
/// let ban = CommandBuilder::new("ban")
///     .alias("ban")
///     .alias("b")
///     .parameter(ParameterBuilder::new::<String>("user"))
///     .parameter(ParameterBuilder::new::<String>("reason").remainder())
///     .build()?;
/// assert_eq!(ban.aliases(), ["ban", "b"]);
/// assert_eq!(ban.parameters().len(), 2);
/// # Ok::<(), parley::DescriptorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    name: String,
    aliases: Vec<String>,
    parameters: Vec<ParameterBuilder>,
}

impl CommandBuilder {
    /// Starts a command with a diagnostic name and no aliases.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds several aliases in order.
    #[must_use]
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterBuilder) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Validates and freezes the command.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptorError`] when an alias is empty or contains
    /// whitespace, a parameter is invalid, or the remainder and variadic
    /// parameters are misplaced.
    pub fn build(self) -> Result<CommandDescriptor, DescriptorError> {
        validate_aliases(&self.name, &self.aliases)?;
        let parameters = self
            .parameters
            .into_iter()
            .map(ParameterBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;
        validate_parameter_order(&self.name, &parameters)?;
        Ok(CommandDescriptor {
            name: self.name,
            aliases: self.aliases,
            parameters,
        })
    }
}

/// Builds a [`ModuleDescriptor`].
///
/// # Example
///
/// ```
/// use parley::{CommandBuilder, ModuleBuilder};
///
/// let stats = CommandBuilder::new("stats").aliases(["stat", "stats"]).build()?;
/// let module = ModuleBuilder::new("admin").alias("module").command(stats).build()?;
/// assert_eq!(module.commands().len(), 1);
/// # Ok::<(), parley::DescriptorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    name: String,
    aliases: Vec<String>,
    commands: Vec<Arc<CommandDescriptor>>,
    submodules: Vec<ModuleDescriptor>,
}

impl ModuleBuilder {
    /// Starts a module with a diagnostic name and no aliases.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            commands: Vec::new(),
            submodules: Vec::new(),
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds several aliases in order.
    #[must_use]
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Adds a command; accepts an owned or already shared descriptor.
    #[must_use]
    pub fn command(mut self, command: impl Into<Arc<CommandDescriptor>>) -> Self {
        self.commands.push(command.into());
        self
    }

    /// Nests a module.
    #[must_use]
    pub fn submodule(mut self, module: ModuleDescriptor) -> Self {
        self.submodules.push(module);
        self
    }

    /// Validates and freezes the module.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptorError`] when an alias is empty or contains
    /// whitespace.
    pub fn build(self) -> Result<ModuleDescriptor, DescriptorError> {
        validate_aliases(&self.name, &self.aliases)?;
        Ok(ModuleDescriptor {
            name: self.name,
            aliases: self.aliases,
            commands: self.commands,
            submodules: self.submodules,
        })
    }
}

fn validate_aliases(owner: &str, aliases: &[String]) -> Result<(), DescriptorError> {
    for alias in aliases {
        if alias.is_empty() {
            return Err(DescriptorError::empty_alias(owner));
        }
        if alias.chars().any(char::is_whitespace) {
            return Err(DescriptorError::alias_contains_whitespace(owner, alias));
        }
    }
    Ok(())
}

fn validate_parameter_order(
    command: &str,
    parameters: &[ParameterDescriptor],
) -> Result<(), DescriptorError> {
    let has_remainder = parameters.iter().any(ParameterDescriptor::is_remainder);
    let has_variadic = parameters.iter().any(ParameterDescriptor::is_variadic);
    if has_remainder && has_variadic {
        return Err(DescriptorError::RemainderWithVariadic {
            command: command.to_owned(),
        });
    }

    let leading = parameters.split_last().map_or(&[][..], |(_, leading)| leading);
    for parameter in leading {
        if parameter.is_variadic() {
            return Err(DescriptorError::variadic_not_last(command, parameter.name()));
        }
        if parameter.is_remainder() {
            return Err(DescriptorError::remainder_not_last(command, parameter.name()));
        }
    }
    Ok(())
}
