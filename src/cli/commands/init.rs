//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "folio.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Folio configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your project settings", self.output);
                println!("  2. Point storage.documents_dir at your stored documents");
                println!("  3. Validate configuration: folio validate-config");
                println!("  4. Run export: folio export --all");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Folio Configuration File

[application]
log_level = "info"
dry_run = false

[project]
name = "Digitised Prints"
rights_owner = "Acme Library"
purl = "https://purl.example.org/{id}"
pointer_path = "https://repo.example.org/mets/{id}.xml"

[[project.renditions]]
use_label = "LOCAL"
mime_type = "image/tiff"
path = "{id}/images"
url_structure = "https://files.example.org/{id}/master/"
inclusion = "always"

[[project.renditions]]
use_label = "DEFAULT"
mime_type = "image/jpeg"
path = "{id}/jpgs/default"
url_structure = "https://files.example.org/{id}/default/"
inclusion = "if_exists"

[storage]
documents_dir = "./documents"
media_root = "./media"
output_dir = "./export"

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Folio Configuration File
#
# Every template below may use {token} variables. Each document provides
# {id}, {title} and {baseType} plus the variables stored with it.
# ${VAR} references are replaced from the environment when the file is loaded.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (transform documents without writing them)
dry_run = false

# ============================================================================
# Project Settings
# ============================================================================
[project]
name = "Digitised Prints"

# Rights fields written into every exported document
rights_owner = "Acme Library"
rights_owner_logo = "https://www.example.org/logo.png"
rights_owner_site = "https://www.example.org"
rights_owner_mail = "digital@example.org"

# Digital provenance fields
digiprov_presentation = "https://viewer.example.org/{id}"
digiprov_reference = "https://catalogue.example.org/{id}"

# Technical fields
purl = "https://purl.example.org/{id}"
content_ids = "{id}"

# URI of a linked document; substituted against the linked document
pointer_path = "https://repo.example.org/mets/{id}.xml"

# Use label of the master rendition canonical file names are taken from.
# Defaults to LOCAL when omitted.
# generator_source = "LOCAL"

# ----------------------------------------------------------------------------
# Rendition policies
#
# inclusion:
#   none      - always removed from exported media units
#   if_exists - present iff the file exists below storage.media_root
#   always    - always present
# ----------------------------------------------------------------------------
[[project.renditions]]
use_label = "LOCAL"
mime_type = "image/tiff"
# Folder below storage.media_root
path = "{id}/images"
# Export location; the file name is appended
url_structure = "https://files.example.org/{id}/master/"
inclusion = "always"

[[project.renditions]]
use_label = "DEFAULT"
mime_type = "image/jpeg"
path = "{id}/jpgs/default"
url_structure = "https://files.example.org/{id}/default/"
inclusion = "if_exists"

[[project.renditions]]
use_label = "THUMBS"
mime_type = "image/jpeg"
path = "{id}/jpgs/thumbs"
url_structure = "https://files.example.org/{id}/thumbs/"
inclusion = "none"

# ============================================================================
# Storage
# ============================================================================
[storage]
# Stored documents, one <id>.json per document
documents_dir = "./documents"

# Root of the rendition folders
media_root = "${FOLIO_MEDIA_ROOT}"

# Exported documents are written here
output_dir = "./export"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging
local_enabled = true

# Local log file path
local_path = "./logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
