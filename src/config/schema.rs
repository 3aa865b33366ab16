//! Configuration schema types
//!
//! This module defines the configuration structure for Folio.

use crate::domain::{InclusionMode, RenditionPolicies, RenditionPolicy, Result, LOCAL_USE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main Folio configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Project settings shared by every exported document
    pub project: ProjectConfig,

    /// Storage locations
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FolioConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.project.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (transform documents without writing them)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Project configuration
///
/// The rights, provenance and technical templates are written into every
/// exported document; `pointer_path` builds the URI of linked documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Rights owner
    #[serde(default)]
    pub rights_owner: String,

    /// Rights owner logo URL
    #[serde(default)]
    pub rights_owner_logo: String,

    /// Rights owner web site
    #[serde(default)]
    pub rights_owner_site: String,

    /// Rights owner contact address
    #[serde(default)]
    pub rights_owner_mail: String,

    /// Presentation URL for digital provenance
    #[serde(default)]
    pub digiprov_presentation: String,

    /// Catalogue reference URL for digital provenance
    #[serde(default)]
    pub digiprov_reference: String,

    /// Persistent URL
    #[serde(default)]
    pub purl: String,

    /// Content identifiers
    #[serde(default)]
    pub content_ids: String,

    /// Template for the export URI of a linked document
    pub pointer_path: String,

    /// Use label of the master rendition; `LOCAL` when absent
    #[serde(default)]
    pub generator_source: Option<String>,

    /// Rendition policies, in configuration order
    #[serde(default)]
    pub renditions: Vec<RenditionConfig>,
}

impl ProjectConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("project.name cannot be empty".to_string());
        }

        if self.pointer_path.trim().is_empty() {
            return Err("project.pointer_path cannot be empty".to_string());
        }

        for (index, rendition) in self.renditions.iter().enumerate() {
            rendition
                .validate()
                .map_err(|e| format!("project.renditions[{index}]: {e}"))?;
        }

        if let Some(source) = &self.generator_source {
            if !self.renditions.iter().any(|r| &r.use_label == source) {
                return Err(format!(
                    "project.generator_source '{source}' does not match any rendition use_label"
                ));
            }
        }

        Ok(())
    }

    /// Builds the project's rendition policies
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an inclusion mode is invalid
    pub fn rendition_policies(&self) -> Result<RenditionPolicies> {
        let policies = self
            .renditions
            .iter()
            .map(RenditionConfig::to_policy)
            .collect::<Result<Vec<_>>>()?;

        let policies = RenditionPolicies::new(policies);
        Ok(match &self.generator_source {
            Some(source) => policies.with_generator_source(source.clone()),
            None => policies,
        })
    }

    /// Returns the use label canonical stems are taken from
    pub fn source_use(&self) -> &str {
        self.generator_source.as_deref().unwrap_or(LOCAL_USE)
    }
}

/// Configuration of one rendition policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenditionConfig {
    /// Use label, e.g. `MASTER`
    pub use_label: String,

    /// MIME type of the rendition's files
    pub mime_type: String,

    /// Storage folder template, relative to `storage.media_root`
    #[serde(default)]
    pub path: String,

    /// Export location template the file name is appended to
    #[serde(default)]
    pub url_structure: String,

    /// Inclusion mode (none, if_exists, always)
    #[serde(default = "default_inclusion")]
    pub inclusion: String,
}

impl RenditionConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.use_label.trim().is_empty() {
            return Err("use_label cannot be empty".to_string());
        }
        if self.mime_type.trim().is_empty() {
            return Err(format!("mime_type cannot be empty for '{}'", self.use_label));
        }
        InclusionMode::from_str(&self.inclusion).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Converts the configuration into a domain policy
    pub fn to_policy(&self) -> Result<RenditionPolicy> {
        let inclusion = InclusionMode::from_str(&self.inclusion)?;
        Ok(
            RenditionPolicy::new(self.use_label.clone(), self.mime_type.clone(), inclusion)
                .with_path(self.path.clone())
                .with_url_structure(self.url_structure.clone()),
        )
    }
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of stored documents (`<id>.json`)
    pub documents_dir: String,

    /// Root directory of rendition folders
    pub media_root: String,

    /// Directory exported trees are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl StorageConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.documents_dir.trim().is_empty() {
            return Err("storage.documents_dir cannot be empty".to_string());
        }
        if self.media_root.trim().is_empty() {
            return Err("storage.media_root cannot be empty".to_string());
        }
        if self.output_dir.trim().is_empty() {
            return Err("storage.output_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    /// Console-only logging, used before a configuration file is available
    pub fn console_only() -> Self {
        Self {
            local_enabled: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_inclusion() -> String {
    "always".to_string()
}

fn default_output_dir() -> String {
    "./export".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
