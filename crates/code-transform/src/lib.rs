//! Cursor offset resolution for refactoring tools.
//!
//! A cursor rarely sits exactly on a symbol: it lands on whitespace, braces,
//! keywords or operators. This crate resolves such positions to the nearest
//! enclosing offset that denotes a classifiable symbol, which is what rename,
//! extraction and inflection commands act on.
//!
//! # Example
//!
//! ```
//! use code_transform::{FinderConfig, InterestingOffsetFinder, OffsetFinderFactory};
//! use language_core::{ByteOffset, TextDocument};
//!
//! let finder = OffsetFinderFactory::create("php", FinderConfig::default()).unwrap();
//! let document = TextDocument::new("<?php $x = 1;");
//!
//! // The cursor is on `=`; the assignment target is what can be acted upon.
//! let offset = finder.find(&document, ByteOffset::new(9)).unwrap();
//! assert_eq!(offset, ByteOffset::new(6));
//! ```

mod config;
mod factory;
mod finder;
mod lazy;

pub use config::{ConfigError, FinderConfig};
pub use factory::OffsetFinderFactory;
pub use finder::{InterestingOffsetFinder, SymbolOffsetFinder};
pub use lazy::LazyOffsetFinder;

// Re-export core types for convenience
pub use language_core::{
    BoundaryRule, ByteOffset, PotentialLocation, PredefinedReferenceFinder, ReferenceFinder,
    SemanticError, SemanticResult, TextDocument,
};
