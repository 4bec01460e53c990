//! Lazy traversal of the command trie along a token sequence.

use std::iter::FusedIterator;
use std::ops::Range;
use std::slice;
use std::sync::Arc;

use tracing::trace;

use crate::descriptor::CommandDescriptor;

use super::{MAP_TARGET, Node};

/// A command whose alias path matches a prefix of the tokens.
#[derive(Debug, Clone)]
pub struct CommandMatch<'m> {
    command: &'m Arc<CommandDescriptor>,
    consumed: usize,
    total: usize,
}

impl<'m> CommandMatch<'m> {
    /// Returns the matched command.
    #[must_use]
    pub const fn command(&self) -> &'m Arc<CommandDescriptor> {
        self.command
    }

    /// Returns the token indices consumed by the alias path.
    #[must_use]
    pub const fn path(&self) -> Range<usize> {
        0..self.consumed
    }

    /// Returns the token indices left over as arguments.
    #[must_use]
    pub const fn arguments(&self) -> Range<usize> {
        self.consumed..self.total
    }

    /// Returns the number of argument tokens.
    #[must_use]
    pub const fn argument_count(&self) -> usize {
        self.total.saturating_sub(self.consumed)
    }
}

/// Iterator over the matches of [`CommandMap::resolve`](super::CommandMap::resolve).
pub struct Resolve<'m, 't, S> {
    tokens: &'t [S],
    node: Option<&'m Node>,
    depth: usize,
    pending: slice::Iter<'m, Arc<CommandDescriptor>>,
}

impl<'m, 't, S> Resolve<'m, 't, S> {
    pub(super) fn new(root: &'m Node, tokens: &'t [S]) -> Self {
        Self {
            tokens,
            node: Some(root),
            depth: 0,
            pending: slice::Iter::default(),
        }
    }
}

impl<S> Clone for Resolve<'_, '_, S> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens,
            node: self.node,
            depth: self.depth,
            pending: self.pending.clone(),
        }
    }
}

impl<S> std::fmt::Debug for Resolve<'_, '_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolve")
            .field("depth", &self.depth)
            .field("tokens", &self.tokens.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<'m, S: AsRef<str>> Iterator for Resolve<'m, '_, S> {
    type Item = CommandMatch<'m>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(command) = self.pending.next() {
                return Some(CommandMatch {
                    command,
                    consumed: self.depth,
                    total: self.tokens.len(),
                });
            }
            let node = self.node?;
            let Some(token) = self.tokens.get(self.depth) else {
                self.node = None;
                return None;
            };
            let segment = token.as_ref();
            if let Some(commands) = node.commands.get(segment) {
                self.pending = commands.iter();
            }
            self.node = node.children.get(segment);
            self.depth += 1;
            trace!(
                target: MAP_TARGET,
                depth = self.depth,
                matches = self.pending.len(),
                descend = self.node.is_some(),
                "visited segment"
            );
        }
    }
}

impl<S: AsRef<str>> FusedIterator for Resolve<'_, '_, S> {}
