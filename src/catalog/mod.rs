//! Persisted book catalog
//!
//! A JSON mapping from canonical book URL to metadata and local file
//! locations. The catalog is loaded once at the start of a run, merged
//! into as books succeed, and written back once at the end, and only
//! when the run actually produced entries. A failed run can never
//! truncate a previous catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Catalog load/persist errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read or write catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// One book's persisted record
///
/// Field names match the on-disk format of earlier revisions of the
/// harvester, `autor` spelling included, so old catalogs keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    pub img_src: String,
    pub book_path: String,
    pub comments: Vec<String>,
    pub genre: Vec<String>,
}

/// In-memory catalog for one run, keyed by canonical book URL
#[derive(Debug, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    /// Loads a catalog from disk, or an empty one if there is no file
    ///
    /// A path that exists but is not a regular file is treated the same
    /// as a missing one. A file that exists but does not parse is an
    /// error; silently discarding a catalog would lose a prior run's
    /// work.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let entries = serde_json::from_str(&content)?;
        Ok(Self { entries })
    }

    /// Inserts or replaces the entry under `key`; last write wins
    pub fn merge(&mut self, key: String, entry: CatalogEntry) {
        self.entries.insert(key, entry);
    }

    /// Writes the whole catalog as pretty JSON
    ///
    /// The write is a plain overwrite, not atomic; a crash mid-write can
    /// leave a truncated file.
    pub fn persist(&self, path: &Path) -> Result<(), CatalogError> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(title: &str) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            author: "Иванов".to_string(),
            img_src: "library/images/1.jpg".to_string(),
            book_path: format!("library/books/{title}.txt"),
            comments: vec!["хорошо".to_string()],
            genre: vec!["Детектив".to_string()],
        }
    }

    #[test]
    fn test_load_missing_file_gives_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::load(&dir.path().join("catalog.json")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_directory_path_gives_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::load(dir.path()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Catalog::load(&path),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut catalog = Catalog::default();
        catalog.merge("https://tululu.org/b1/".to_string(), entry("Первая"));
        catalog.merge("https://tululu.org/b1/".to_string(), entry("Вторая"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("https://tululu.org/b1/").unwrap().title, "Вторая");
    }

    #[test]
    fn test_round_trip_preserves_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");

        let mut catalog = Catalog::default();
        catalog.merge("https://tululu.org/b1/".to_string(), entry("Алиби"));
        catalog.merge("https://tululu.org/b2/".to_string(), entry("Пески Марса"));
        catalog.persist(&path).unwrap();

        let reloaded = Catalog::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.get("https://tululu.org/b1/"),
            catalog.get("https://tululu.org/b1/")
        );
    }

    #[test]
    fn test_persisted_format_uses_source_field_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");

        let mut catalog = Catalog::default();
        catalog.merge("https://tululu.org/b1/".to_string(), entry("Алиби"));
        catalog.persist(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"autor\""));
        assert!(raw.contains("\"img_src\""));
        assert!(raw.contains("\"book_path\""));
        assert!(raw.contains("\"genre\""));
        // Cyrillic must round-trip unescaped
        assert!(raw.contains("Алиби"));
    }

    #[test]
    fn test_loads_catalog_written_by_earlier_revisions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"/b239/": {"title": "Алиби", "autor": "Иванов",
                "img_src": "library/images/239.jpg",
                "book_path": "library/books/Алиби.txt",
                "comments": [], "genre": ["Детектив"]}}"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.get("/b239/").unwrap().author, "Иванов");
    }
}
