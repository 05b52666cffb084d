//! Tomeshelf: a rubric bookshelf harvester
//!
//! This crate crawls a fixed site's paginated book rubric, downloads each
//! book's text and cover image into a local library, and records metadata
//! in a JSON catalog keyed by the book's canonical URL. Re-running the
//! harvest skips assets that are already on disk and merges new books into
//! the existing catalog.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod library;

use thiserror::Error;

/// Main error type for Tomeshelf operations
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Tomeshelf operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogEntry};
pub use config::Config;
pub use crawler::{harvest, CrawlSummary, Harvester};
