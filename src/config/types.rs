use std::path::PathBuf;
use url::Url;

/// Full configuration for a harvest run
#[derive(Debug, Clone)]
pub struct Config {
    pub site: SiteConfig,
    pub range: RangeConfig,
    pub library: LibraryConfig,
    pub download: DownloadConfig,
}

/// Which site and which rubric to harvest
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site root, e.g. `https://tululu.org`
    pub root_url: Url,

    /// Rubric path with leading and trailing slash, e.g. `/l55/`
    pub rubric_path: String,
}

impl SiteConfig {
    /// The rubric's landing page URL
    pub fn rubric_url(&self) -> Result<Url, url::ParseError> {
        self.root_url.join(&self.rubric_path)
    }
}

/// Requested listing page range, clamped later against the rubric's pager
#[derive(Debug, Clone)]
pub struct RangeConfig {
    pub start_page: u32,
    pub end_page: u32,
}

/// Where downloaded assets and the catalog live
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Library root; `books/` and `images/` are created under it
    pub dest_folder: PathBuf,

    /// Catalog file path, must carry a `.json` extension
    pub catalog_path: PathBuf,
}

/// Per-asset download behavior
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Do not download book texts (paths are still recorded)
    pub skip_text: bool,

    /// Do not download cover images (paths are still recorded)
    pub skip_images: bool,

    /// Re-download assets that already exist locally
    pub rewrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubric_url_joins_root_and_path() {
        let site = SiteConfig {
            root_url: Url::parse("https://tululu.org").unwrap(),
            rubric_path: "/l55/".to_string(),
        };
        assert_eq!(site.rubric_url().unwrap().as_str(), "https://tululu.org/l55/");
    }

    #[test]
    fn test_rubric_url_page_numbers_append() {
        let site = SiteConfig {
            root_url: Url::parse("https://tululu.org").unwrap(),
            rubric_path: "/l55/".to_string(),
        };
        let page = site.rubric_url().unwrap().join("7").unwrap();
        assert_eq!(page.as_str(), "https://tululu.org/l55/7");
    }
}
