//! Configuration management for Folio.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Folio uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - `FOLIO_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level, dry run)
//! - [`ProjectConfig`] - Rights/provenance templates, link template, rendition policies
//! - [`StorageConfig`] - Document store, media root and output directories
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [project]
//! name = "Digitized Prints"
//! rights_owner = "Acme Library"
//! rights_owner_mail = "${FOLIO_RIGHTS_MAIL}"
//! pointer_path = "https://repo.example.org/mets/{id}.xml"
//!
//! [[project.renditions]]
//! use_label = "LOCAL"
//! mime_type = "image/tiff"
//! path = "{id}/images"
//! inclusion = "none"
//!
//! [[project.renditions]]
//! use_label = "DEFAULT"
//! mime_type = "image/jpeg"
//! path = "{id}/jpegs"
//! url_structure = "https://files.example.org/{id}/default/"
//! inclusion = "always"
//!
//! [storage]
//! documents_dir = "./documents"
//! media_root = "./media"
//! output_dir = "./export"
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use folio::config::load_config;
//!
//! # fn example() {
//! match load_config("folio.toml") {
//!     Ok(config) => println!("Configuration valid for {}", config.project.name),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, FolioConfig, LoggingConfig, ProjectConfig, RenditionConfig, StorageConfig,
};
