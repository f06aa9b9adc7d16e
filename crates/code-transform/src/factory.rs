//! Factory for creating offset finders.

use std::sync::Arc;

use language_php::{PhpSymbolClassifier, PhpSyntaxProvider, TreeCache};

use crate::config::FinderConfig;
use crate::finder::{InterestingOffsetFinder, SymbolOffsetFinder};

/// Factory for creating offset finders based on language and configuration.
pub struct OffsetFinderFactory;

impl OffsetFinderFactory {
    /// Create an offset finder for the given language and configuration.
    ///
    /// Returns `None` for languages without a classifier.
    ///
    /// # Example
    ///
    /// ```
    /// use code_transform::{FinderConfig, OffsetFinderFactory};
    ///
    /// let finder = OffsetFinderFactory::create("php", FinderConfig::default());
    /// assert!(finder.is_some());
    /// ```
    pub fn create(
        language: &str,
        config: FinderConfig,
    ) -> Option<Arc<dyn InterestingOffsetFinder>> {
        match language.to_lowercase().as_str() {
            "php" => {
                // One cache for both collaborators: a `find` that climbs the
                // tree reuses the parse made for classification.
                let cache = Arc::new(TreeCache::new());
                let classifier = PhpSymbolClassifier::new()
                    .with_cache(Arc::clone(&cache))
                    .strict(config.strict_parse);
                let parser = PhpSyntaxProvider::new()
                    .with_cache(cache)
                    .with_boundary_rule(config.boundary)
                    .strict(config.strict_parse);
                Some(Arc::new(SymbolOffsetFinder::new(
                    Arc::new(classifier),
                    Arc::new(parser),
                )))
            }
            _ => {
                log::debug!("No offset finder available for language: {}", language);
                None
            }
        }
    }

    /// Check if a language has an offset finder.
    pub fn supports_language(language: &str) -> bool {
        language.eq_ignore_ascii_case("php")
    }
}
