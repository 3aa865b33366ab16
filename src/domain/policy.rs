//! Rendition policies
//!
//! A project configures, per use label, how a rendition is named, which MIME
//! type it has and whether it is included in an export.

use super::errors::FolioError;
use super::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Use label of the by-convention master rendition
pub const LOCAL_USE: &str = "LOCAL";

/// Whether a rendition is included in an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InclusionMode {
    /// Never included; present renditions are removed
    None,
    /// Included only when the file exists for the canonical stem
    IfExists,
    /// Always included, added when missing
    Always,
}

impl FromStr for InclusionMode {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "no" => Ok(Self::None),
            "if_exists" | "existing" => Ok(Self::IfExists),
            "always" | "all" => Ok(Self::Always),
            _ => Err(FolioError::Configuration(format!(
                "Invalid inclusion mode: {s}. Expected 'none', 'if_exists' or 'always'"
            ))),
        }
    }
}

impl fmt::Display for InclusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InclusionMode::None => "none",
            InclusionMode::IfExists => "if_exists",
            InclusionMode::Always => "always",
        };
        f.write_str(name)
    }
}

/// Per-project policy for one rendition use label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenditionPolicy {
    /// Use label the policy applies to
    pub use_label: String,

    /// MIME type of the rendition's files
    pub mime_type: String,

    /// Storage folder template, relative to the media root
    pub path: String,

    /// Export location template the file name is appended to
    pub url_structure: String,

    /// Inclusion mode
    pub inclusion: InclusionMode,
}

impl RenditionPolicy {
    /// Creates a policy with empty path templates
    pub fn new(
        use_label: impl Into<String>,
        mime_type: impl Into<String>,
        inclusion: InclusionMode,
    ) -> Self {
        Self {
            use_label: use_label.into(),
            mime_type: mime_type.into(),
            path: String::new(),
            url_structure: String::new(),
            inclusion,
        }
    }

    /// Sets the storage folder template
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the export location template
    pub fn with_url_structure(mut self, url_structure: impl Into<String>) -> Self {
        self.url_structure = url_structure.into();
        self
    }
}

/// Ordered list of a project's rendition policies
///
/// When two policies share a use label the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenditionPolicies {
    policies: Vec<RenditionPolicy>,
    generator_source: Option<String>,
}

impl RenditionPolicies {
    /// Creates a policy list
    pub fn new(policies: Vec<RenditionPolicy>) -> Self {
        Self {
            policies,
            generator_source: None,
        }
    }

    /// Sets the use label of the configured master rendition
    pub fn with_generator_source(mut self, use_label: impl Into<String>) -> Self {
        self.generator_source = Some(use_label.into());
        self
    }

    /// Looks up the effective policy for a use label
    pub fn find(&self, use_label: &str) -> Option<&RenditionPolicy> {
        self.policies
            .iter()
            .rev()
            .find(|policy| policy.use_label == use_label)
    }

    /// Returns the policy of the master rendition canonical stems are taken from
    ///
    /// This is the configured generator source, or else the `LOCAL` policy.
    pub fn source_policy(&self) -> Option<&RenditionPolicy> {
        match &self.generator_source {
            Some(use_label) => self.find(use_label),
            None => self.find(LOCAL_USE),
        }
    }

    /// Iterates over the effective policies, one per use label
    pub fn effective(&self) -> impl Iterator<Item = &RenditionPolicy> {
        self.policies.iter().enumerate().filter_map(move |(index, policy)| {
            let shadowed = self.policies[index + 1..]
                .iter()
                .any(|later| later.use_label == policy.use_label);
            (!shadowed).then_some(policy)
        })
    }

    /// Iterates over all policies in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &RenditionPolicy> {
        self.policies.iter()
    }

    /// Number of configured policies
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns true if no policy is configured
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusion_mode_from_str() {
        assert_eq!(InclusionMode::from_str("none").unwrap(), InclusionMode::None);
        assert_eq!(InclusionMode::from_str("NO").unwrap(), InclusionMode::None);
        assert_eq!(
            InclusionMode::from_str("if_exists").unwrap(),
            InclusionMode::IfExists
        );
        assert_eq!(
            InclusionMode::from_str("Existing").unwrap(),
            InclusionMode::IfExists
        );
        assert_eq!(InclusionMode::from_str("always").unwrap(), InclusionMode::Always);
        assert_eq!(InclusionMode::from_str("ALL").unwrap(), InclusionMode::Always);
        assert!(InclusionMode::from_str("sometimes").is_err());
    }

    #[test]
    fn test_inclusion_mode_display_round_trips() {
        for mode in [
            InclusionMode::None,
            InclusionMode::IfExists,
            InclusionMode::Always,
        ] {
            assert_eq!(InclusionMode::from_str(&mode.to_string()).unwrap(), mode);
        }
    }

    #[test]
    fn test_find_last_wins() {
        let policies = RenditionPolicies::new(vec![
            RenditionPolicy::new("MASTER", "image/tiff", InclusionMode::Always),
            RenditionPolicy::new("THUMBS", "image/jpeg", InclusionMode::None),
            RenditionPolicy::new("MASTER", "image/tiff", InclusionMode::None),
        ]);

        assert_eq!(
            policies.find("MASTER").unwrap().inclusion,
            InclusionMode::None
        );
        assert!(policies.find("PREVIEW").is_none());

        let effective: Vec<_> = policies
            .effective()
            .map(|policy| (policy.use_label.as_str(), policy.inclusion))
            .collect();
        assert_eq!(
            effective,
            vec![("THUMBS", InclusionMode::None), ("MASTER", InclusionMode::None)]
        );
    }

    #[test]
    fn test_source_policy_by_convention() {
        let policies = RenditionPolicies::new(vec![
            RenditionPolicy::new("LOCAL", "image/tiff", InclusionMode::None),
            RenditionPolicy::new("MASTER", "image/tiff", InclusionMode::Always),
        ]);
        assert_eq!(policies.source_policy().unwrap().use_label, "LOCAL");

        let configured = policies.clone().with_generator_source("MASTER");
        assert_eq!(configured.source_policy().unwrap().use_label, "MASTER");
    }

    #[test]
    fn test_source_policy_absent() {
        let policies = RenditionPolicies::new(vec![RenditionPolicy::new(
            "MASTER",
            "image/tiff",
            InclusionMode::Always,
        )]);
        assert!(policies.source_policy().is_none());
    }
}
