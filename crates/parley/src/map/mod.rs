//! Prefix-trie registry mapping alias paths to commands.
//!
//! Each node maps a segment to the commands registered exactly at that
//! segment and, separately, to a child node for longer paths, so one segment
//! can both end a path and continue it. Commands are compared by pointer
//! identity; the same command may be registered under many paths.

mod resolve;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

pub use resolve::{CommandMatch, Resolve};

use crate::descriptor::{CommandDescriptor, ModuleDescriptor};
use crate::error::RegistrationError;

/// Tracing target for command registration and resolution.
pub(crate) const MAP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::map");

#[derive(Debug, Default)]
struct Node {
    commands: HashMap<String, Vec<Arc<CommandDescriptor>>>,
    children: HashMap<String, Node>,
}

impl Node {
    fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.children.is_empty()
    }
}

/// Registry of commands keyed by their token paths.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use parley::{CommandBuilder, CommandMap};
///
/// let stats = Arc::new(CommandBuilder::new("stats").build()?);
/// let mut map = CommandMap::new();
/// map.add_command(&["module"], Arc::clone(&stats))?;
/// map.add_command(&["module", "stats"], Arc::clone(&stats))?;
///
/// let matches: Vec<_> = map.resolve(&["module", "stats", "now"]).collect();
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].arguments(), 1..3);
/// assert_eq!(matches[1].arguments(), 2..3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct CommandMap {
    root: Node,
    len: usize,
}

impl CommandMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map holding every command of `modules`.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] when a command would be registered
    /// under an empty path.
    pub fn from_modules<'a>(
        modules: impl IntoIterator<Item = &'a ModuleDescriptor>,
    ) -> Result<Self, RegistrationError> {
        let mut map = Self::new();
        for module in modules {
            map.add_module(module)?;
        }
        Ok(map)
    }

    /// Returns the number of registered (path, command) pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Registers `command` under `path`.
    ///
    /// Returns `Ok(false)` when this exact command is already registered at
    /// `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] when `path` or one of its segments is
    /// empty.
    pub fn add_command<S: AsRef<str>>(
        &mut self,
        path: &[S],
        command: Arc<CommandDescriptor>,
    ) -> Result<bool, RegistrationError> {
        let (last, parents) = split_path(path, &command)?;
        let mut node = &mut self.root;
        for segment in parents {
            node = node.children.entry(segment.as_ref().to_owned()).or_default();
        }
        let registered = node.commands.entry(last.as_ref().to_owned()).or_default();
        if registered
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &command))
        {
            return Ok(false);
        }
        debug!(
            target: MAP_TARGET,
            command = command.name(),
            depth = path.len(),
            "registered command"
        );
        registered.push(command);
        self.len += 1;
        Ok(true)
    }

    /// Unregisters `command` from `path`, pruning nodes left empty.
    ///
    /// Returns `Ok(false)` when the command is not registered at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] when `path` or one of its segments is
    /// empty.
    pub fn remove_command<S: AsRef<str>>(
        &mut self,
        path: &[S],
        command: &CommandDescriptor,
    ) -> Result<bool, RegistrationError> {
        split_path(path, command)?;
        let removed = remove_from(&mut self.root, path, command);
        if removed {
            self.len -= 1;
            debug!(
                target: MAP_TARGET,
                command = command.name(),
                depth = path.len(),
                "unregistered command"
            );
        }
        Ok(removed)
    }

    /// Registers every command of `module` and its submodules.
    ///
    /// Each command is added once per combination of module and command
    /// aliases along its nesting; a module or command without aliases adds
    /// no segment. Returns the number of newly registered pairs.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::EmptyPath`] when a command's full path
    /// has no segments. Pairs registered before the error are kept.
    pub fn add_module(&mut self, module: &ModuleDescriptor) -> Result<usize, RegistrationError> {
        let mut path = Vec::new();
        self.add_module_under(&mut path, module)
    }

    /// Lists every match of a prefix of `tokens`, shallowest first.
    ///
    /// For each depth `k` reached in the trie, one match is produced per
    /// command registered at `tokens[k - 1]`, with `tokens[k..]` left as
    /// arguments. The returned iterator is lazy and can be cloned to restart.
    #[must_use]
    pub fn resolve<'m, 't, S: AsRef<str>>(&'m self, tokens: &'t [S]) -> Resolve<'m, 't, S> {
        Resolve::new(&self.root, tokens)
    }

    fn add_module_under<'a>(
        &mut self,
        path: &mut Vec<&'a str>,
        module: &'a ModuleDescriptor,
    ) -> Result<usize, RegistrationError> {
        if module.aliases().is_empty() {
            return self.add_module_contents(path, module);
        }
        let mut added = 0;
        for alias in module.aliases() {
            path.push(alias);
            let result = self.add_module_contents(path, module);
            path.pop();
            added += result?;
        }
        Ok(added)
    }

    fn add_module_contents<'a>(
        &mut self,
        path: &mut Vec<&'a str>,
        module: &'a ModuleDescriptor,
    ) -> Result<usize, RegistrationError> {
        let mut added = 0;
        for command in module.commands() {
            if command.aliases().is_empty() {
                added += usize::from(self.add_command(path.as_slice(), Arc::clone(command))?);
                continue;
            }
            for alias in command.aliases() {
                path.push(alias);
                let result = self.add_command(path.as_slice(), Arc::clone(command));
                path.pop();
                added += usize::from(result?);
            }
        }
        for submodule in module.submodules() {
            added += self.add_module_under(path, submodule)?;
        }
        Ok(added)
    }
}

fn split_path<'p, S: AsRef<str>>(
    path: &'p [S],
    command: &CommandDescriptor,
) -> Result<(&'p S, &'p [S]), RegistrationError> {
    if let Some(position) = path.iter().position(|segment| segment.as_ref().is_empty()) {
        return Err(RegistrationError::empty_segment(command.name(), position));
    }
    path.split_last()
        .ok_or_else(|| RegistrationError::empty_path(command.name()))
}

fn remove_from<S: AsRef<str>>(node: &mut Node, path: &[S], command: &CommandDescriptor) -> bool {
    match path {
        [] => false,
        [last] => {
            let segment = last.as_ref();
            let Some(registered) = node.commands.get_mut(segment) else {
                return false;
            };
            let Some(position) = registered
                .iter()
                .position(|existing| std::ptr::eq(Arc::as_ptr(existing), command))
            else {
                return false;
            };
            registered.remove(position);
            if registered.is_empty() {
                node.commands.remove(segment);
            }
            true
        }
        [first, rest @ ..] => {
            let segment = first.as_ref();
            let Some(child) = node.children.get_mut(segment) else {
                return false;
            };
            let removed = remove_from(child, rest, command);
            if removed && child.is_empty() {
                node.children.remove(segment);
            }
            removed
        }
    }
}
