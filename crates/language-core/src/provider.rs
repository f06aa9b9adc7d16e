//! Collaborator traits consumed and exposed by offset resolution.

use crate::{ByteOffset, PotentialLocation, SemanticResult, SymbolContext, SyntaxTree, TextDocument};

/// Classifies what an offset of a document denotes.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single classifier can be
/// shared by finders running on different threads.
pub trait SymbolClassifier: Send + Sync {
    /// Classify the symbol at `offset`.
    ///
    /// # Returns
    ///
    /// * `Ok(context)` - `context.kind` is `SymbolKind::Unknown` when the
    ///   offset does not denote a resolvable symbol
    /// * `Err(e)` - The document could not be analyzed
    fn classify(&self, document: &TextDocument, offset: ByteOffset)
        -> SemanticResult<SymbolContext>;
}

/// Builds syntax trees from raw document text.
pub trait SyntaxTreeProvider: Send + Sync {
    /// Parse the full text into a tree.
    ///
    /// The returned tree decides how boundary offsets are resolved through
    /// its [`crate::BoundaryRule`].
    fn parse(&self, text: &str) -> SemanticResult<SyntaxTree>;
}

/// Enumerates candidate reference locations for a document position.
pub trait ReferenceFinder: Send + Sync {
    /// Find potential references to the symbol at `offset`.
    ///
    /// Every call returns a fresh, finite iterator; no cursor state is shared
    /// between calls.
    fn find_references<'a>(
        &'a self,
        document: &TextDocument,
        offset: ByteOffset,
    ) -> SemanticResult<Box<dyn Iterator<Item = PotentialLocation> + 'a>>;
}
