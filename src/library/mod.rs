//! Library filesystem layout
//!
//! Book texts go under `<root>/books/`, cover images under
//! `<root>/images/`. Filenames come from untrusted remote data (book
//! titles, image URL segments) and are sanitized before they touch the
//! filesystem.

use std::path::{Path, PathBuf};
use url::Url;

/// A created library root with its two asset directories
#[derive(Debug, Clone)]
pub struct Library {
    books_dir: PathBuf,
    images_dir: PathBuf,
}

impl Library {
    /// Creates `books/` and `images/` under `root`
    ///
    /// Failure here is fatal for a run; nothing can be downloaded without
    /// a writable library.
    pub fn create(root: &Path) -> std::io::Result<Self> {
        let books_dir = root.join("books");
        let images_dir = root.join("images");
        std::fs::create_dir_all(&books_dir)?;
        std::fs::create_dir_all(&images_dir)?;
        Ok(Self {
            books_dir,
            images_dir,
        })
    }

    /// Local path for a book text, named after its sanitized title
    pub fn text_path(&self, title: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.txt", sanitize_filename(title)))
    }

    /// Local path for a cover image, named after the URL's last segment
    pub fn image_path(&self, image_url: &Url) -> PathBuf {
        let name = image_url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .unwrap_or("cover");
        self.images_dir.join(sanitize_filename(name))
    }
}

/// Replaces filesystem-hostile characters in an untrusted filename
///
/// Path separators, Windows-reserved punctuation, and control characters
/// become underscores; dot-only names are neutralized so a title can
/// never escape the library directory.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        return "_".to_string();
    }
    trimmed.to_string()
}
