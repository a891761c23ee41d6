//! Gap-free, doubly-linked AST elements in an index-based arena.
//!
//! Elements are addressed by [`ElementId`] handles; sibling and parent
//! relations are handles too, with self-loops standing in for the stream
//! sentinels and the document root.

mod element;
mod kind;
mod tree;

pub use element::{Body, Element, QuoteDetails};
pub use kind::{Arity, ElementKind};
pub use tree::{ElementId, LinearIter, Tree};
