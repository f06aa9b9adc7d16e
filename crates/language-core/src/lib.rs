//! Core traits and types for interesting offset resolution.
//!
//! This crate provides the data model shared by refactoring helpers: documents,
//! byte offsets, symbol classification results, an arena-backed syntax tree and
//! the collaborator traits that language backends implement.

pub mod filesystem;

mod error;
mod predefined;
mod provider;
mod syntax;
mod types;

pub use error::{SemanticError, SemanticResult};
pub use predefined::PredefinedReferenceFinder;
pub use provider::{ReferenceFinder, SymbolClassifier, SyntaxTreeProvider};
pub use syntax::{Ancestors, BoundaryRule, NodeId, SyntaxNode, SyntaxTree, SyntaxTreeBuilder};
pub use types::{
    ByteOffset, ByteRange, Location, LocationConfidence, PotentialLocation, SymbolContext,
    SymbolKind, TextDocument,
};
