//! Builds a client-facing syntax tree out of the grammar engine's match
//! tree.
//!
//! The pipeline is one pass of shape-driven dispatch over the match tree,
//! then gap filling (whitespace, comments, here-doc ghosts), then threading
//! into a single doubly-linked chain. The result retains no reference to
//! any match object.

mod adapter;
mod error;
mod factory;
mod gaps;
mod grammar;
mod root;
mod shape;
mod thread;

#[cfg(test)]
mod tests;

use rakast_errors::Diagnostic;
use rakast_match::Match;
use rakast_tree::{ElementId, Tree};

pub use crate::error::{Error, Result};
use crate::factory::Factory;

/// Builds the tree for one document with default settings.
pub fn build(m: &Match) -> Result<Ast> {
    Builder::new().build(m)
}

/// Build configuration. `debug` surfaces degrade-path diagnostics (inverted
/// gap intervals) that are silently skipped otherwise.
#[derive(Default)]
pub struct Builder {
    debug: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Runs the full pipeline for one top-level match. Every call uses a
    /// fresh factory, so per-document state (the here-doc offset map) never
    /// leaks between parses.
    pub fn build(&self, m: &Match) -> Result<Ast> {
        let mut f = Factory::new(m.orig().as_ref(), self.debug);
        let root = root::document(&mut f, m)?;
        gaps::fill(&mut f, root);
        thread::thread(&mut f.tree, root);
        Ok(Ast { tree: f.tree, root, diagnostics: f.diagnostics })
    }
}

/// The finished, threaded tree plus any non-fatal diagnostics collected
/// while building it.
#[derive(Debug)]
pub struct Ast {
    tree: Tree,
    root: ElementId,
    diagnostics: Vec<Diagnostic>,
}

impl Ast {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// First element of the linear chain, if the document is non-empty.
    pub fn start(&self) -> Option<ElementId> {
        self.tree.first_leaf(self.root)
    }

    /// Concatenated chain content; reproduces the source for any gap-free
    /// build.
    pub fn linear_text(&self) -> String {
        self.start().map_or_else(String::new, |start| self.tree.linear_text(start))
    }

    pub fn debug_dump(&self) -> String {
        self.tree.debug_dump(self.root)
    }
}
