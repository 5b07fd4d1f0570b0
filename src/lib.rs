//! An ordered set implemented with an AVL tree, and a vocabulary of reserved
//! words built on top of it.
//!
//! The tree supports insertion, lookup, min/max and the three depth-first
//! traversals. Elements are never removed individually.
//!
//! A [`Vocabulary`] loads reserved words into a tree and can scan source text
//! for the identifiers it uses, see [`Vocabulary::scan`].

mod error;
pub mod scan;
mod tree;
pub mod vocabulary;

pub use error::{TreeError, VocabularyError};
pub use scan::IdentifierReport;
pub use tree::{AvlTree, Node, Order, Traverse};
pub use vocabulary::{LoadOptions, TokenClass, Vocabulary};
