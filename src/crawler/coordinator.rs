//! Harvest orchestration
//!
//! Drives the whole pipeline: discover how many pages the rubric has,
//! clamp the requested range against it, collect book references page by
//! page, then fetch every book and merge it into the catalog. A listing
//! page or a single book failing is logged and skipped; only the rubric
//! landing page, the library directories, and the final catalog write can
//! end the run early.

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::Config;
use crate::crawler::downloader::download_if_absent;
use crate::crawler::fetcher::{build_http_client, fetch_text};
use crate::crawler::parser::{discover_max_page, parse_detail, parse_listing, BookRef};
use crate::library::Library;
use crate::{Result, ShelfError};
use indicatif::ProgressBar;
use reqwest::Client;

/// Counters for one finished harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Clamped page range that was actually walked
    pub first_page: u32,
    pub last_page: u32,

    pub pages_fetched: u32,
    pub pages_failed: u32,

    /// Books merged into the catalog this run
    pub books_saved: u32,
    /// Books excluded because the site offers no text for them
    pub books_without_text: u32,
    /// Books skipped because their detail page or an asset failed
    pub books_failed: u32,

    /// Catalog size after the run, previous entries included
    pub catalog_size: usize,
}

/// Owns the client, library, and catalog for the duration of one run
pub struct Harvester {
    config: Config,
    client: Client,
    library: Library,
    catalog: Catalog,
}

impl Harvester {
    /// Prepares a run: builds the client, creates the library
    /// directories, and loads any existing catalog
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client()?;
        let library = Library::create(&config.library.dest_folder)?;

        if let Some(parent) = config.library.catalog_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let catalog = Catalog::load(&config.library.catalog_path)?;
        if !catalog.is_empty() {
            tracing::info!("loaded {} existing catalog entr(ies)", catalog.len());
        }

        Ok(Self {
            config,
            client,
            library,
            catalog,
        })
    }

    /// Runs the harvest to completion
    pub async fn run(&mut self) -> Result<CrawlSummary> {
        let rubric_url = self.config.site.rubric_url()?;

        // Discovering. The landing page is the one fetch that must
        // succeed: without it there is no page range and no references.
        let landing = fetch_text(&self.client, &rubric_url).await?;
        let discovered_max = discover_max_page(&landing);
        tracing::info!("rubric reports {discovered_max} page(s)");

        // ClampingRange
        let start = self.config.range.start_page;
        let end = start.max(self.config.range.end_page.min(discovered_max));
        if start == end {
            println!("downloading books from page {start}");
        } else {
            println!("downloading books from pages {start} to {end}");
        }

        let mut summary = CrawlSummary {
            first_page: start,
            last_page: end,
            ..CrawlSummary::default()
        };

        // CollectingReferences. One bad listing page does not abort the
        // crawl; its books are simply absent from this run.
        let mut refs: Vec<BookRef> = Vec::new();
        for page in start..=end {
            let page_url = rubric_url.join(&page.to_string())?;
            let listing = match fetch_text(&self.client, &page_url).await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!("skipping listing page {page}: {err}");
                    summary.pages_failed += 1;
                    continue;
                }
            };
            let found = parse_listing(&listing, &self.config.site.root_url);
            tracing::debug!("page {page}: {} book reference(s)", found.len());
            refs.extend(found);
            summary.pages_fetched += 1;
        }

        // Downloading. Per-book failures are caught here at the loop
        // boundary and skipped.
        let progress = ProgressBar::new(refs.len() as u64);
        for book_ref in &refs {
            match self.harvest_book(book_ref).await {
                Ok(Some(key)) => {
                    tracing::debug!("saved {key}");
                    summary.books_saved += 1;
                }
                Ok(None) => {
                    tracing::debug!("no text available, excluded: {}", book_ref.detail_url);
                    summary.books_without_text += 1;
                }
                Err(err) => {
                    tracing::warn!("skipping book {}: {err}", book_ref.detail_url);
                    summary.books_failed += 1;
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        // Persisting. Only a run that merged something writes the file,
        // so a run where every page failed leaves a previous catalog
        // byte-identical on disk.
        if summary.books_saved > 0 && !self.catalog.is_empty() {
            self.catalog.persist(&self.config.library.catalog_path)?;
            tracing::info!(
                "persisted {} entr(ies) to {}",
                self.catalog.len(),
                self.config.library.catalog_path.display()
            );
        }
        summary.catalog_size = self.catalog.len();

        Ok(summary)
    }

    /// Fetches one book's detail page, downloads its assets, and merges
    /// its catalog entry
    ///
    /// Returns the catalog key on success and `None` for books without a
    /// downloadable text, which never touch the catalog or the network
    /// beyond their detail page.
    async fn harvest_book(&mut self, book_ref: &BookRef) -> Result<Option<String>> {
        let detail = fetch_text(&self.client, &book_ref.detail_url).await?;
        let page = parse_detail(&detail);
        if !page.has_text() {
            return Ok(None);
        }

        let root = &self.config.site.root_url;
        let text_url = root.join(&page.text_path)?;
        let image_url = root.join(&page.image_path)?;
        let text_path = self.library.text_path(&page.title);
        let image_path = self.library.image_path(&image_url);

        let rewrite = self.config.download.rewrite;
        if !self.config.download.skip_text {
            download_if_absent(&self.client, &text_url, &text_path, rewrite).await?;
        }
        if !self.config.download.skip_images {
            download_if_absent(&self.client, &image_url, &image_path, rewrite).await?;
        }

        let key = if page.canonical_path.is_empty() {
            // Detail page without a canonical link; the reference we
            // arrived by is the next best unique key.
            book_ref.detail_url.to_string()
        } else {
            root.join(&page.canonical_path)?.to_string()
        };
        self.catalog.merge(
            key.clone(),
            CatalogEntry {
                title: page.title,
                author: page.author,
                img_src: image_path.to_string_lossy().into_owned(),
                book_path: text_path.to_string_lossy().into_owned(),
                comments: page.comments,
                genre: page.genres,
            },
        );
        Ok(Some(key))
    }

    /// The in-memory catalog, previous entries plus this run's merges
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// Runs a complete harvest with the given configuration
pub async fn harvest(config: Config) -> std::result::Result<CrawlSummary, ShelfError> {
    let mut harvester = Harvester::new(config)?;
    harvester.run().await
}
