//! Lazy-initialized offset finder.

use std::sync::{Arc, OnceLock};

use language_core::{filesystem, ByteOffset, SemanticError, SemanticResult, TextDocument};

use crate::config::FinderConfig;
use crate::factory::OffsetFinderFactory;
use crate::finder::InterestingOffsetFinder;

/// An offset finder that creates the underlying finder on first use.
///
/// The language comes from the document's language id, or from its path
/// extension when no id is set. The finder is created for the first supported
/// language seen; documents of unsupported languages are rejected with
/// [`SemanticError::UnsupportedLanguage`].
pub struct LazyOffsetFinder {
    inner: OnceLock<Arc<dyn InterestingOffsetFinder>>,
    config: FinderConfig,
}

impl LazyOffsetFinder {
    pub fn new(config: FinderConfig) -> Self {
        Self {
            inner: OnceLock::new(),
            config,
        }
    }

    /// Whether the underlying finder has been created.
    pub fn is_initialized(&self) -> bool {
        self.inner.get().is_some()
    }

    fn detect_language(document: &TextDocument) -> Option<&str> {
        document
            .language()
            .or_else(|| document.path().and_then(filesystem::language_for_path))
    }

    fn get_or_init(
        &self,
        document: &TextDocument,
    ) -> SemanticResult<&Arc<dyn InterestingOffsetFinder>> {
        let language = Self::detect_language(document).unwrap_or("unknown");
        if !OffsetFinderFactory::supports_language(language) {
            return Err(SemanticError::UnsupportedLanguage {
                language: language.to_string(),
            });
        }

        if let Some(finder) = self.inner.get() {
            return Ok(finder);
        }

        match OffsetFinderFactory::create(language, self.config) {
            Some(finder) => Ok(self.inner.get_or_init(|| finder)),
            None => Err(SemanticError::UnsupportedLanguage {
                language: language.to_string(),
            }),
        }
    }
}

impl Default for LazyOffsetFinder {
    fn default() -> Self {
        Self::new(FinderConfig::default())
    }
}

impl std::fmt::Debug for LazyOffsetFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyOffsetFinder")
            .field("initialized", &self.is_initialized())
            .field("config", &self.config)
            .finish()
    }
}

impl InterestingOffsetFinder for LazyOffsetFinder {
    fn find(&self, document: &TextDocument, offset: ByteOffset) -> SemanticResult<ByteOffset> {
        self.get_or_init(document)?.find(document, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_until_first_use() {
        let finder = LazyOffsetFinder::default();
        assert!(!finder.is_initialized());

        let document = TextDocument::new("<?php $x = 1;").with_language("php");
        assert_eq!(
            finder.find(&document, ByteOffset::new(9)).unwrap(),
            ByteOffset::new(6)
        );
        assert!(finder.is_initialized());
    }

    #[test]
    fn test_language_from_path() {
        let finder = LazyOffsetFinder::default();
        let document = TextDocument::new("<?php class Foo {}").with_path("src/Foo.php");
        assert_eq!(
            finder.find(&document, ByteOffset::new(18)).unwrap(),
            ByteOffset::new(6)
        );
    }

    #[test]
    fn test_unsupported_language() {
        let finder = LazyOffsetFinder::default();
        let document = TextDocument::new("let x = 1;").with_path("main.rs");

        let result = finder.find(&document, ByteOffset::new(0));
        assert!(matches!(
            result,
            Err(SemanticError::UnsupportedLanguage { language }) if language == "unknown"
        ));
        assert!(!finder.is_initialized());
    }

    #[test]
    fn test_unsupported_language_after_init() {
        let finder = LazyOffsetFinder::default();
        let php = TextDocument::new("<?php $x;").with_language("php");
        finder.find(&php, ByteOffset::new(6)).unwrap();

        let python = TextDocument::new("x = 1").with_language("python");
        assert!(matches!(
            finder.find(&python, ByteOffset::new(0)),
            Err(SemanticError::UnsupportedLanguage { .. })
        ));
    }
}
