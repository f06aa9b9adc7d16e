//! Reference finder that yields a fixed list of locations.

use crate::{ByteOffset, PotentialLocation, ReferenceFinder, SemanticResult, TextDocument};

/// A reference finder that returns the same predetermined locations for
/// every query.
///
/// This is used to seed refactorings and to test code built on top of
/// [`ReferenceFinder`] without a real semantic engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredefinedReferenceFinder {
    /// Locations yielded, in construction order.
    locations: Vec<PotentialLocation>,
}

impl PredefinedReferenceFinder {
    /// Create a finder that yields `locations` in order.
    pub fn new(locations: Vec<PotentialLocation>) -> Self {
        Self { locations }
    }

    pub fn locations(&self) -> &[PotentialLocation] {
        &self.locations
    }
}

impl FromIterator<PotentialLocation> for PredefinedReferenceFinder {
    fn from_iter<I: IntoIterator<Item = PotentialLocation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl ReferenceFinder for PredefinedReferenceFinder {
    fn find_references<'a>(
        &'a self,
        _document: &TextDocument,
        _offset: ByteOffset,
    ) -> SemanticResult<Box<dyn Iterator<Item = PotentialLocation> + 'a>> {
        // Arguments are ignored: the answer is fixed at construction.
        Ok(Box::new(self.locations.iter().cloned()))
    }
}
