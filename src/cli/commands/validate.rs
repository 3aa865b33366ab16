//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Folio configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Project: {}", config.project.name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Pointer Path: {}", config.project.pointer_path);
        println!("  Master Rendition: {}", config.project.source_use());
        println!("  Renditions:");
        for rendition in &config.project.renditions {
            println!(
                "    - {} ({}, {})",
                rendition.use_label, rendition.mime_type, rendition.inclusion
            );
        }
        println!("  Documents: {}", config.storage.documents_dir);
        println!("  Media Root: {}", config.storage.media_root);
        println!("  Output: {}", config.storage.output_dir);
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_config_exits_zero() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[project]
name = "Prints"
pointer_path = "https://repo.example.org/{{id}}.xml"

[storage]
documents_dir = "./documents"
media_root = "./media"
"#
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_invalid_config_exits_two() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[project]
name = "Prints"
pointer_path = ""

[storage]
documents_dir = "./documents"
media_root = "./media"
"#
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
