//! PHP collaborators for interesting offset resolution.
//!
//! Parsing is delegated to ast-grep's tree-sitter PHP grammar. The crate
//! exposes two implementations of the `language-core` traits:
//!
//! - [`PhpSyntaxProvider`]: named-node syntax trees for structural ascent
//! - [`PhpSymbolClassifier`]: node-kind based symbol classification
//!
//! Both read parses from a [`TreeCache`]; handing them the same cache makes
//! one tree-sitter parse serve classification and ascent alike.
//!
//! # Example
//!
//! ```no_run
//! use language_core::{ByteOffset, SymbolClassifier, SymbolKind, TextDocument};
//! use language_php::PhpSymbolClassifier;
//!
//! let classifier = PhpSymbolClassifier::new();
//! let document = TextDocument::new("<?php class Foo {}");
//! let context = classifier.classify(&document, ByteOffset::new(6)).unwrap();
//! assert_eq!(context.kind, SymbolKind::Class);
//! ```

mod cache;
mod classifier;
mod error;
mod parser;

pub use cache::TreeCache;
pub use classifier::PhpSymbolClassifier;
pub use error::PhpSemanticError;
pub use parser::{parse_document, ParsedDocument, PhpSyntaxProvider};

// Re-export core types for convenience
pub use language_core::{BoundaryRule, SymbolClassifier, SymbolKind, SyntaxTreeProvider};
