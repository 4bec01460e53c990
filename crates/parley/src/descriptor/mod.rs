//! Immutable descriptions of commands, their parameters and the modules
//! that group them.
//!
//! Descriptors are produced by the builders in this module and never change
//! afterwards. Commands are shared as `Arc<CommandDescriptor>`; the
//! [`CommandMap`](crate::CommandMap) compares them by pointer identity.

mod builder;

use std::sync::Arc;

pub use builder::{CommandBuilder, ModuleBuilder, ParameterBuilder};

use crate::value::{Value, ValueType};

/// A formal parameter of a command.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    name: String,
    value_type: ValueType,
    default: Option<Value>,
    remainder: bool,
    variadic: bool,
}

impl ParameterDescriptor {
    /// Returns the parameter name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the declared type; the element type for a variadic parameter.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns `true` when the parameter has a default and may be omitted.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    /// Returns `true` when the parameter captures the rest of the input.
    #[must_use]
    pub const fn is_remainder(&self) -> bool {
        self.remainder
    }

    /// Returns `true` when the parameter collects every remaining token.
    #[must_use]
    pub const fn is_variadic(&self) -> bool {
        self.variadic
    }
}

/// A registered command: a name, its aliases and its parameters.
///
/// An empty alias list binds the command directly under its module's path.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    name: String,
    aliases: Vec<String>,
    parameters: Vec<ParameterDescriptor>,
}

impl CommandDescriptor {
    /// Returns the command name, used for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the aliases in declaration order.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }
}

/// A group of commands and nested modules sharing alias prefixes.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    name: String,
    aliases: Vec<String>,
    commands: Vec<Arc<CommandDescriptor>>,
    submodules: Vec<ModuleDescriptor>,
}

impl ModuleDescriptor {
    /// Returns the module name, used for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the module aliases; empty means the module adds no segment.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the commands declared directly in this module.
    #[must_use]
    pub fn commands(&self) -> &[Arc<CommandDescriptor>] {
        &self.commands
    }

    /// Returns the nested modules.
    #[must_use]
    pub fn submodules(&self) -> &[Self] {
        &self.submodules
    }
}
