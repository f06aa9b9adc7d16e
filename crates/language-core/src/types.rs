//! Core types for offset resolution and reference finding.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{SemanticError, SemanticResult};
use std::path::{Path, PathBuf};

/// A zero-based byte offset into a document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ByteOffset(u32);

impl ByteOffset {
    /// Create a new byte offset.
    pub fn new(offset: u32) -> Self {
        Self(offset)
    }

    /// The raw offset value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ByteOffset {
    fn from(offset: u32) -> Self {
        Self(offset)
    }
}

impl From<ByteOffset> for u32 {
    fn from(offset: ByteOffset) -> Self {
        offset.0
    }
}

/// Byte lengths convert only when they fit the `u32` offset space.
impl TryFrom<usize> for ByteOffset {
    type Error = SemanticError;

    fn try_from(length: usize) -> Result<Self, Self::Error> {
        u32::try_from(length)
            .map(Self)
            .map_err(|_| SemanticError::DocumentTooLarge { length })
    }
}

impl fmt::Display for ByteOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A byte range in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    /// Start byte offset (inclusive)
    pub start: u32,
    /// End byte offset (exclusive)
    pub end: u32,
}

impl ByteRange {
    /// Create a new byte range.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Check if this range contains the given byte offset.
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if the closed interval `[start, end]` covers the given offset.
    ///
    /// Cursor positions sit between bytes, so a cursor right after the last
    /// byte of a node still touches it.
    pub fn touches(&self, offset: u32) -> bool {
        offset >= self.start && offset <= self.end
    }
}

/// An immutable source document.
///
/// The text is owned by the document; the language id is used by the
/// factories to pick collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    text: String,
    path: Option<PathBuf>,
    language: Option<String>,
}

impl TextDocument {
    /// Create a document without a path or language.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
            language: None,
        }
    }

    /// Attach the path the document was read from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach a language identifier (e.g. "php").
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Length of the document in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Offset of the end of the document, the last valid cursor position.
    ///
    /// Fails with [`SemanticError::DocumentTooLarge`] for documents beyond
    /// the `u32` offset space.
    pub fn end_offset(&self) -> SemanticResult<ByteOffset> {
        ByteOffset::try_from(self.text.len())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Path used in error messages; `<untitled>` for in-memory documents.
    pub fn display_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from("<untitled>"))
    }
}

impl fmt::Display for TextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The kind of symbol (variable, function, class, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKind {
    /// A variable declaration or reference
    Variable,
    /// A function declaration or call
    Function,
    /// A class declaration or reference
    Class,
    /// A method (function inside a class)
    Method,
    /// A property (field in a class or object)
    Property,
    /// An import statement/binding
    Import,
    /// An interface declaration
    Interface,
    /// A trait declaration
    Trait,
    /// An enum declaration
    Enum,
    /// An enum member/variant
    EnumMember,
    /// A namespace or module
    Namespace,
    /// A constant declaration
    Constant,
    /// A parameter in a function signature
    Parameter,
    /// The offset does not denote a resolvable symbol
    Unknown,
}

impl SymbolKind {
    /// Returns a human-readable name for the symbol kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Import => "import",
            SymbolKind::Interface => "interface",
            SymbolKind::Trait => "trait",
            SymbolKind::Enum => "enum",
            SymbolKind::EnumMember => "enumMember",
            SymbolKind::Namespace => "namespace",
            SymbolKind::Constant => "constant",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Unknown => "unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SymbolKind::Unknown)
    }
}

/// Result of classifying an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolContext {
    /// What the offset denotes
    pub kind: SymbolKind,
}

impl SymbolContext {
    pub fn new(kind: SymbolKind) -> Self {
        Self { kind }
    }

    /// A context for offsets that do not denote a symbol.
    pub fn unknown() -> Self {
        Self::new(SymbolKind::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        self.kind.is_unknown()
    }
}

/// A concrete place in a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Path to the file
    pub path: PathBuf,
    /// Byte range inside the file
    pub range: ByteRange,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>, range: ByteRange) -> Self {
        Self {
            path: path.into(),
            range,
        }
    }

    /// A zero-width location at `offset`.
    pub fn at_offset(path: impl Into<PathBuf>, offset: ByteOffset) -> Self {
        Self::new(path, ByteRange::new(offset.get(), offset.get()))
    }
}

/// How certain a reference finder is that a location refers to the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationConfidence {
    /// The location definitely refers to the symbol
    Surely,
    /// The location may refer to the symbol (e.g. untyped member access)
    Maybe,
    /// The location was inspected and does not refer to the symbol
    Not,
}

/// A candidate reference site produced by a [`crate::ReferenceFinder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PotentialLocation {
    pub location: Location,
    pub confidence: LocationConfidence,
}

impl PotentialLocation {
    pub fn new(location: Location, confidence: LocationConfidence) -> Self {
        Self {
            location,
            confidence,
        }
    }

    pub fn surely(location: Location) -> Self {
        Self::new(location, LocationConfidence::Surely)
    }

    pub fn maybe(location: Location) -> Self {
        Self::new(location, LocationConfidence::Maybe)
    }

    pub fn not(location: Location) -> Self {
        Self::new(location, LocationConfidence::Not)
    }

    pub fn is_surely(&self) -> bool {
        self.confidence == LocationConfidence::Surely
    }

    pub fn is_maybe(&self) -> bool {
        self.confidence == LocationConfidence::Maybe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_range_contains() {
        let range = ByteRange::new(10, 20);
        assert!(range.contains(10));
        assert!(range.contains(19));
        assert!(!range.contains(9));
        assert!(!range.contains(20));
    }

    #[test]
    fn test_byte_range_touches_includes_end() {
        let range = ByteRange::new(10, 20);
        assert!(range.touches(10));
        assert!(range.touches(20));
        assert!(!range.touches(21));
        assert!(!range.touches(9));
    }

    #[test]
    fn test_symbol_kind_as_str() {
        assert_eq!(SymbolKind::Variable.as_str(), "variable");
        assert_eq!(SymbolKind::Trait.as_str(), "trait");
        assert_eq!(SymbolKind::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_symbol_context_unknown() {
        assert!(SymbolContext::unknown().is_unknown());
        assert!(!SymbolContext::new(SymbolKind::Class).is_unknown());
    }

    #[test]
    fn test_text_document_len_is_bytes() {
        let doc = TextDocument::new("<?php $é;");
        assert_eq!(doc.len(), 10);
        assert_eq!(doc.end_offset().unwrap(), ByteOffset::new(10));
        assert_eq!(doc.display_path(), PathBuf::from("<untitled>"));

        let doc = doc.with_path("src/Foo.php").with_language("php");
        assert_eq!(doc.path(), Some(Path::new("src/Foo.php")));
        assert_eq!(doc.language(), Some("php"));
    }

    #[test]
    fn test_potential_location_confidence() {
        let location = Location::at_offset("a.php", ByteOffset::new(4));
        assert_eq!(location.range, ByteRange::new(4, 4));

        assert!(PotentialLocation::surely(location.clone()).is_surely());
        assert!(PotentialLocation::maybe(location.clone()).is_maybe());
        assert!(!PotentialLocation::not(location).is_surely());
    }

    #[test]
    fn test_byte_offset_from_length() {
        assert_eq!(ByteOffset::try_from(18usize).unwrap(), ByteOffset::new(18));
        assert_eq!(
            ByteOffset::try_from(u32::MAX as usize).unwrap(),
            ByteOffset::new(u32::MAX)
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_length_beyond_offset_space_is_rejected() {
        let length = u32::MAX as usize + 1;
        assert!(matches!(
            ByteOffset::try_from(length),
            Err(SemanticError::DocumentTooLarge { length: l }) if l == length
        ));
    }

    #[test]
    fn test_byte_offset_serializes_as_number() {
        let json = serde_json::to_string(&ByteOffset::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
