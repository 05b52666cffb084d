//! Run configuration
//!
//! Every knob the harvester needs is collected into plain immutable
//! structs, built once from the CLI and threaded through by parameter.

mod types;
mod validation;

pub use types::{Config, DownloadConfig, LibraryConfig, RangeConfig, SiteConfig};
pub use validation::validate;
