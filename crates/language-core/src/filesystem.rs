//! Virtual filesystem helpers for loading documents.
//!
//! Documents are read through the `vfs` crate so finders can work on real
//! projects as well as on in-memory fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use language_core::filesystem::{load_document, memory_fs};
//!
//! let root = memory_fs();
//! let file = root.join("src/Foo.php")?;
//! let document = load_document(&file)?;
//! assert_eq!(document.language(), Some("php"));
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::{SemanticError, SemanticResult, TextDocument};

// Re-export core vfs types
pub use vfs::{MemoryFS, PhysicalFS, VfsError, VfsPath, VfsResult};

/// Read a file to string from a VfsPath.
pub fn read_to_string(path: &VfsPath) -> VfsResult<String> {
    let mut content = String::new();
    path.open_file()?.read_to_string(&mut content)?;
    Ok(content)
}

/// Load a [`TextDocument`] from a VfsPath.
///
/// The document keeps the virtual path and gets a language id derived from
/// the file extension, when one is known.
pub fn load_document(path: &VfsPath) -> SemanticResult<TextDocument> {
    let content = read_to_string(path).map_err(|e| SemanticError::FileRead {
        path: PathBuf::from(path.as_str()),
        message: e.to_string(),
    })?;

    let document = TextDocument::new(content).with_path(path.as_str());
    Ok(match language_for_extension(&path.extension().unwrap_or_default()) {
        Some(language) => document.with_language(language),
        None => document,
    })
}

/// Map a file extension to a language id.
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "php" | "phtml" | "inc" => Some("php"),
        _ => None,
    }
}

/// Language id for a path, based on its extension.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(language_for_extension)
}

/// Create a VfsPath from a std::path::Path using PhysicalFS.
pub fn physical_path(path: &Path) -> VfsPath {
    PhysicalFS::new(path).into()
}

/// Create a VfsPath backed by an in-memory filesystem.
///
/// This is useful for testing.
pub fn memory_fs() -> VfsPath {
    MemoryFS::new().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_physical_fs_load_document() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Foo.php"), "<?php class Foo {}").unwrap();

        let root = physical_path(dir.path());
        let document = load_document(&root.join("Foo.php").unwrap()).unwrap();

        assert_eq!(document.as_str(), "<?php class Foo {}");
        assert_eq!(document.language(), Some("php"));
        assert_eq!(document.path(), Some(Path::new("/Foo.php")));
    }

    #[test]
    fn test_memory_fs_nested_paths() {
        let root = memory_fs();

        root.join("src").unwrap().create_dir().unwrap();
        let file = root.join("src/Bar.php").unwrap();
        file.create_file()
            .unwrap()
            .write_all(b"<?php $x = 1;")
            .unwrap();

        let document = load_document(&file).unwrap();
        assert_eq!(document.as_str(), "<?php $x = 1;");
        assert_eq!(document.path(), Some(Path::new("/src/Bar.php")));
    }

    #[test]
    fn test_unknown_extension_has_no_language() {
        let root = memory_fs();
        let file = root.join("notes.txt").unwrap();
        file.create_file().unwrap().write_all(b"hello").unwrap();

        let document = load_document(&file).unwrap();
        assert_eq!(document.language(), None);
    }

    #[test]
    fn test_file_not_found() {
        let root = memory_fs();
        let result = load_document(&root.join("missing.php").unwrap());
        assert!(matches!(result, Err(SemanticError::FileRead { .. })));
    }

    #[test]
    fn test_language_for_path() {
        assert_eq!(language_for_path(Path::new("a/B.PHP")), Some("php"));
        assert_eq!(language_for_path(Path::new("a/b.ts")), None);
        assert_eq!(language_for_path(Path::new("Makefile")), None);
    }
}
