//! Crawler module for the harvest pipeline
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with redirect-as-failure semantics
//! - Listing and detail page parsing
//! - Idempotent asset downloads
//! - Overall harvest coordination

mod coordinator;
mod downloader;
mod fetcher;
mod parser;

pub use coordinator::{harvest, CrawlSummary, Harvester};
pub use downloader::{download_if_absent, DownloadOutcome};
pub use fetcher::{build_http_client, fetch_bytes, fetch_text, FetchError};
pub use parser::{discover_max_page, parse_detail, parse_listing, BookPage, BookRef};
