//! Domain error types
//!
//! This module defines the error hierarchy for Folio.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Folio error type
///
/// Every fatal export failure aborts the export of the current document.
/// Non-fatal heterogeneity in the input (a rendition without a policy, a media
/// unit without a canonical stem, a node without a link) never surfaces here.
#[derive(Debug, Error)]
pub enum FolioError {
    /// A template contained a token that could not be resolved
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// A rewritten location is not a valid URI
    #[error("Malformed location: {location} ({reason})")]
    MalformedLocation { location: String, reason: String },

    /// A referenced document does not exist
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A rendition locate or existence check failed
    #[error("Rendition locator I/O error: {0}")]
    LocatorIo(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Template substitution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template references a variable missing from the document context
    #[error("Unresolvable token '{token}' in template '{template}'")]
    UnresolvableToken { token: String, template: String },

    /// The template could not be parsed at all
    #[error("Invalid template '{template}': {reason}")]
    Invalid { template: String, reason: String },
}

impl FolioError {
    /// Creates a malformed location error
    pub fn malformed_location(location: impl Into<String>, reason: impl ToString) -> Self {
        FolioError::MalformedLocation {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        FolioError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        FolioError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from URL parse errors
impl From<url::ParseError> for FolioError {
    fn from(err: url::ParseError) -> Self {
        FolioError::MalformedLocation {
            location: String::new(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folio_error_display() {
        let err = FolioError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_template_error_conversion() {
        let template_err = TemplateError::UnresolvableToken {
            token: "owner".to_string(),
            template: "{owner}".to_string(),
        };
        let folio_err: FolioError = template_err.into();
        assert!(matches!(folio_err, FolioError::Template(_)));
        assert!(folio_err.to_string().contains("'owner'"));
    }

    #[test]
    fn test_malformed_location_display() {
        let err = FolioError::malformed_location("not a uri", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "Malformed location: not a uri (relative URL without a base)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let folio_err: FolioError = io_err.into();
        assert!(matches!(folio_err, FolioError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let folio_err: FolioError = json_err.into();
        assert!(matches!(folio_err, FolioError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let folio_err: FolioError = toml_err.into();
        assert!(matches!(folio_err, FolioError::Configuration(_)));
        assert!(folio_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_folio_error_implements_std_error() {
        let err = FolioError::NotFound("42".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
