//! CLI command implementations.
//!
//! Available commands:
//! - **analyze**: clean the catalog and render the full report
//! - **validate**: report data-quality findings without producing a report
//! - **init**: write a default configuration file

pub mod analyze;
pub mod init;
pub mod validate;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
pub use validate::{handle_validate, QualityFindings, ValidateConfig};
