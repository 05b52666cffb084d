//! Tomeshelf main entry point
//!
//! Command-line interface for the rubric bookshelf harvester.

use clap::Parser;
use std::path::PathBuf;
use tomeshelf::config::{validate, Config, DownloadConfig, LibraryConfig, RangeConfig, SiteConfig};
use tomeshelf::crawler::harvest;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Tomeshelf: downloads a site rubric's books into a local library
///
/// Walks the rubric's listing pages, downloads each book's text and cover
/// image, and records metadata in a JSON catalog. Already-downloaded
/// assets are skipped, so interrupted harvests can simply be re-run.
#[derive(Parser, Debug)]
#[command(name = "tomeshelf")]
#[command(version)]
#[command(about = "Downloads a site rubric's books into a local library", long_about = None)]
struct Cli {
    /// First rubric page to harvest
    #[arg(long, default_value_t = 1)]
    start_page: u32,

    /// Last rubric page; clamped to what the rubric actually has
    #[arg(long, default_value_t = 9999)]
    end_page: u32,

    /// Do not download book texts
    #[arg(long)]
    skip_text: bool,

    /// Do not download cover images
    #[arg(long)]
    skip_images: bool,

    /// Re-download assets that already exist locally
    #[arg(long)]
    rewrite: bool,

    /// Library root directory
    #[arg(long, default_value = "library")]
    dest_folder: PathBuf,

    /// Catalog file path (defaults to <DEST_FOLDER>/catalog.json)
    #[arg(long)]
    catalog_path: Option<PathBuf>,

    /// Site root URL
    #[arg(long, default_value = "https://tululu.org")]
    root_url: Url,

    /// Rubric path on the site, with leading and trailing slash
    #[arg(long, default_value = "/l55/")]
    rubric: String,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let catalog_path = self
            .catalog_path
            .unwrap_or_else(|| self.dest_folder.join("catalog.json"));
        Config {
            site: SiteConfig {
                root_url: self.root_url,
                rubric_path: self.rubric,
            },
            range: RangeConfig {
                start_page: self.start_page,
                end_page: self.end_page,
            },
            library: LibraryConfig {
                dest_folder: self.dest_folder,
                catalog_path,
            },
            download: DownloadConfig {
                skip_text: self.skip_text,
                skip_images: self.skip_images,
                rewrite: self.rewrite,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let config = cli.into_config();
    validate(&config)?;

    // Individual page and book failures are logged and skipped inside the
    // harvester; only setup and the rubric landing page fail the process.
    let summary = harvest(config).await?;

    if summary.pages_failed > 0 || summary.books_failed > 0 {
        tracing::warn!(
            "{} listing page(s) and {} book(s) skipped due to errors",
            summary.pages_failed,
            summary.books_failed
        );
    }
    println!(
        "*** harvest finished: {} book(s) saved, {} in catalog ***",
        summary.books_saved, summary.catalog_size
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tomeshelf=info,warn"),
            1 => EnvFilter::new("tomeshelf=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .init();
}
