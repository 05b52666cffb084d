use crate::config::types::{Config, LibraryConfig, RangeConfig, SiteConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site(&config.site)?;
    validate_range(&config.range)?;
    validate_library(&config.library)?;
    Ok(())
}

/// Validates the site root and rubric path
fn validate_site(site: &SiteConfig) -> Result<(), ConfigError> {
    if site.root_url.scheme() != "http" && site.root_url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root_url must be http or https, got '{}'",
            site.root_url
        )));
    }

    if site.root_url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "root_url must have a host, got '{}'",
            site.root_url
        )));
    }

    if !site.rubric_path.starts_with('/') || !site.rubric_path.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "rubric path must start and end with '/', got '{}'",
            site.rubric_path
        )));
    }

    Ok(())
}

/// Validates the requested page range
fn validate_range(range: &RangeConfig) -> Result<(), ConfigError> {
    // end_page < start_page is allowed and clamped up later
    if range.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start_page must be >= 1, got {}",
            range.start_page
        )));
    }

    Ok(())
}

/// Validates library paths
fn validate_library(library: &LibraryConfig) -> Result<(), ConfigError> {
    if library.dest_folder.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "dest_folder cannot be empty".to_string(),
        ));
    }

    let extension_is_json = library
        .catalog_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !extension_is_json {
        return Err(ConfigError::Validation(format!(
            "catalog path must have a .json extension, got '{}'",
            library.catalog_path.display()
        )));
    }

    Ok(())
}
