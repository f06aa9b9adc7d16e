//! Interesting offset resolution.

use std::sync::Arc;

use language_core::{
    ByteOffset, SemanticError, SemanticResult, SymbolClassifier, SyntaxTreeProvider,
    TextDocument,
};

/// Finds the offset a refactoring should act on for a cursor position.
///
/// # Thread Safety
///
/// Finders hold no per-call state and must be `Send + Sync`.
pub trait InterestingOffsetFinder: Send + Sync {
    /// Resolve `offset` to the nearest enclosing classifiable offset.
    ///
    /// # Returns
    ///
    /// * `Ok(offset)` - Always some offset for a valid input, falling back to
    ///   the start of the root node when nothing on the way classifies
    /// * `Err(SemanticError::InvalidOffset)` - `offset` is past the end of
    ///   the document
    /// * `Err(e)` - A collaborator failed; the error is passed through as is
    fn find(&self, document: &TextDocument, offset: ByteOffset) -> SemanticResult<ByteOffset>;
}

/// [`InterestingOffsetFinder`] driven by a symbol classifier and a syntax tree
/// provider.
///
/// The cursor offset is classified first. Only when it does not denote a
/// symbol is the document parsed, and the ancestors of the deepest node at the
/// cursor are tried from the innermost outwards, the deepest node included.
/// The first node whose start offset classifies wins, so a cursor on a method
/// body brace resolves to the method and not to the enclosing class.
#[derive(Clone)]
pub struct SymbolOffsetFinder {
    classifier: Arc<dyn SymbolClassifier>,
    parser: Arc<dyn SyntaxTreeProvider>,
}

impl SymbolOffsetFinder {
    pub fn new(
        classifier: Arc<dyn SymbolClassifier>,
        parser: Arc<dyn SyntaxTreeProvider>,
    ) -> Self {
        Self { classifier, parser }
    }

    /// Returns `offset` when it classifies to something other than unknown.
    fn resolve_interesting_offset(
        &self,
        document: &TextDocument,
        offset: ByteOffset,
    ) -> SemanticResult<Option<ByteOffset>> {
        let context = self.classifier.classify(document, offset)?;
        Ok((!context.is_unknown()).then_some(offset))
    }
}

impl std::fmt::Debug for SymbolOffsetFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolOffsetFinder").finish_non_exhaustive()
    }
}

impl InterestingOffsetFinder for SymbolOffsetFinder {
    fn find(&self, document: &TextDocument, offset: ByteOffset) -> SemanticResult<ByteOffset> {
        let end = document.end_offset()?;
        if offset > end {
            return Err(SemanticError::InvalidOffset {
                offset: offset.get(),
                length: end.get(),
            });
        }

        if let Some(found) = self.resolve_interesting_offset(document, offset)? {
            log::debug!("Offset {} is interesting as is", found);
            return Ok(found);
        }

        let tree = self.parser.parse(document.as_str())?;
        let mut candidate = offset;

        for id in tree.ancestors(tree.deepest_node_at(offset)) {
            let node = tree.node(id);
            candidate = node.start_offset();
            log::trace!("Trying {} node at offset {}", node.kind(), candidate);

            if let Some(found) = self.resolve_interesting_offset(document, candidate)? {
                log::debug!("Resolved offset {} to {} ({})", offset, found, node.kind());
                return Ok(found);
            }
        }

        log::debug!(
            "No ancestor of offset {} classifies, falling back to root offset {}",
            offset,
            candidate
        );
        Ok(candidate)
    }
}
