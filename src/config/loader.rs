//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FolioConfig;
use crate::domain::errors::FolioError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FolioConfig
/// 4. Applies environment variable overrides (FOLIO_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use folio::config::loader::load_config;
///
/// let config = load_config("folio.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FolioConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FolioError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FolioError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: FolioConfig = toml::from_str(&contents)
        .map_err(|e| FolioError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        FolioError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged. Template tokens such as `{id}` are not
/// touched because they lack the leading `$`.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FolioError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FolioError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using FOLIO_* prefix
///
/// Environment variables follow the pattern: FOLIO_<SECTION>_<KEY>
/// For example: FOLIO_STORAGE_MEDIA_ROOT, FOLIO_APPLICATION_LOG_LEVEL
fn apply_env_overrides(config: &mut FolioConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("FOLIO_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("FOLIO_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Project overrides
    if let Ok(val) = std::env::var("FOLIO_PROJECT_POINTER_PATH") {
        config.project.pointer_path = val;
    }
    if let Ok(val) = std::env::var("FOLIO_PROJECT_GENERATOR_SOURCE") {
        config.project.generator_source = Some(val);
    }
    if let Ok(val) = std::env::var("FOLIO_PROJECT_PURL") {
        config.project.purl = val;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("FOLIO_STORAGE_DOCUMENTS_DIR") {
        config.storage.documents_dir = val;
    }
    if let Ok(val) = std::env::var("FOLIO_STORAGE_MEDIA_ROOT") {
        config.storage.media_root = val;
    }
    if let Ok(val) = std::env::var("FOLIO_STORAGE_OUTPUT_DIR") {
        config.storage.output_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FOLIO_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("FOLIO_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("FOLIO_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("FOLIO_LOADER_TEST_VAR", "test_value");
        let input = "rights_owner = \"${FOLIO_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim_end(), "rights_owner = \"test_value\"");
        std::env::remove_var("FOLIO_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("FOLIO_LOADER_MISSING_VAR");
        let input = "rights_owner = \"${FOLIO_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_keeps_template_tokens() {
        let input = "pointer_path = \"https://repo.example.org/{id}.xml\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim_end(), input);
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("FOLIO_LOADER_COMMENTED_VAR");
        let input = "# owner = \"${FOLIO_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim_end(), input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "info"

[project]
name = "Digitized Prints"
rights_owner = "Acme Library"
pointer_path = "https://repo.example.org/mets/{id}.xml"

[[project.renditions]]
use_label = "LOCAL"
mime_type = "image/tiff"
path = "{id}/images"
inclusion = "none"

[[project.renditions]]
use_label = "DEFAULT"
mime_type = "image/jpeg"
path = "{id}/jpegs"
url_structure = "https://files.example.org/{id}/default/"
inclusion = "always"

[storage]
documents_dir = "./documents"
media_root = "./media"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.project.name, "Digitized Prints");
        assert_eq!(config.project.renditions.len(), 2);
        assert_eq!(config.storage.output_dir, "./export");
    }
}
