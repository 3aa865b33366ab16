//! Rendition reconciliation
//!
//! Decides, per media unit, which renditions an export carries. A rendition
//! is removed when no policy covers it, when its policy says `none`, or when
//! its policy says `if_exists` and the file is missing. A rendition is added
//! when its policy says `always`, or says `if_exists` and the file exists.
//!
//! Removal runs to completion before any addition so that a use label is
//! never represented twice.

use crate::adapters::RenditionLocator;
use crate::domain::{
    decoded_file_name, DocumentTree, InclusionMode, MediaUnit, RenditionKind, RenditionPolicies,
    RenditionPolicy, Result,
};

/// What reconciliation changed on one media unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Use labels removed from the unit
    pub removed: Vec<String>,

    /// Use labels added to the unit
    pub added: Vec<String>,
}

/// Totals of a reconciliation pass over a whole tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Units that had a canonical stem and were reconciled
    pub units_reconciled: usize,

    /// Units left untouched because no canonical stem could be derived
    pub units_skipped: usize,

    /// Renditions removed
    pub renditions_removed: usize,

    /// Renditions added
    pub renditions_added: usize,
}

/// Reconciles media unit renditions against a project's policies
pub struct VariantReconciler<'a> {
    policies: &'a RenditionPolicies,
    locator: &'a dyn RenditionLocator,
}

impl<'a> VariantReconciler<'a> {
    /// Creates a reconciler
    pub fn new(policies: &'a RenditionPolicies, locator: &'a dyn RenditionLocator) -> Self {
        Self { policies, locator }
    }

    /// Derives the canonical stem of a unit from its master rendition
    ///
    /// The stem is the percent-decoded file name without its extension.
    /// Returns `None` when the project has no master policy or the unit has
    /// no master rendition.
    pub fn canonical_stem(&self, unit: &MediaUnit) -> Option<String> {
        let source = self.policies.source_policy()?;
        let uri = unit.media_files.get(&source.use_label)?;
        let file_name = decoded_file_name(uri)?;
        let stem = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name.as_str(),
        };
        Some(stem.to_string())
    }

    /// Reconciles every media unit of a tree
    ///
    /// Units without a canonical stem are skipped.
    pub fn reconcile_all(&self, tree: &mut DocumentTree) -> Result<ReconcileStats> {
        let mut stats = ReconcileStats::default();

        for unit in &mut tree.media_units {
            let Some(stem) = self.canonical_stem(unit) else {
                tracing::debug!(media_unit = %unit.id, "No canonical stem, skipping reconciliation");
                stats.units_skipped += 1;
                continue;
            };

            let outcome = self.reconcile(unit, &stem)?;
            stats.units_reconciled += 1;
            stats.renditions_removed += outcome.removed.len();
            stats.renditions_added += outcome.added.len();
        }

        Ok(stats)
    }

    /// Reconciles one media unit for the given canonical stem
    ///
    /// # Errors
    ///
    /// Propagates locator failures; the unit may then be partially reconciled.
    pub fn reconcile(&self, unit: &mut MediaUnit, stem: &str) -> Result<ReconcileOutcome> {
        let mut outcome = ReconcileOutcome::default();

        for use_label in unit.media_files.use_labels() {
            let unwanted = match self.policies.find(&use_label) {
                None => true,
                Some(policy) => !self.is_wanted(policy, stem)?,
            };
            if unwanted {
                unit.media_files.remove(&use_label);
                tracing::trace!(media_unit = %unit.id, use_label = %use_label, "Removed rendition");
                outcome.removed.push(use_label);
            }
        }

        for policy in self.policies.effective() {
            if unit.media_files.contains_use(&policy.use_label) {
                continue;
            }
            if self.is_wanted(policy, stem)? {
                let uri = self.locator.locate(policy, stem)?;
                unit.media_files.insert(
                    RenditionKind::new(policy.use_label.clone(), policy.mime_type.clone()),
                    uri,
                );
                tracing::trace!(media_unit = %unit.id, use_label = %policy.use_label, "Added rendition");
                outcome.added.push(policy.use_label.clone());
            }
        }

        Ok(outcome)
    }

    fn is_wanted(&self, policy: &RenditionPolicy, stem: &str) -> Result<bool> {
        match policy.inclusion {
            InclusionMode::None => Ok(false),
            InclusionMode::Always => Ok(true),
            InclusionMode::IfExists => self.locator.exists(policy, stem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FolioError, MediaUnitId};
    use std::collections::HashSet;
    use url::Url;

    /// Locator backed by a set of existing (use label, stem) pairs
    struct StubLocator {
        existing: HashSet<(String, String)>,
        fail: bool,
    }

    impl StubLocator {
        fn with(existing: &[(&str, &str)]) -> Self {
            Self {
                existing: existing
                    .iter()
                    .map(|(u, s)| (u.to_string(), s.to_string()))
                    .collect(),
                fail: false,
            }
        }
    }

    impl RenditionLocator for StubLocator {
        fn locate(&self, policy: &RenditionPolicy, stem: &str) -> Result<Url> {
            Ok(Url::parse(&format!(
                "file:///media/{}/{stem}",
                policy.use_label.to_lowercase()
            ))
            .unwrap())
        }

        fn exists(&self, policy: &RenditionPolicy, stem: &str) -> Result<bool> {
            if self.fail {
                return Err(FolioError::LocatorIo("disk unavailable".to_string()));
            }
            Ok(self
                .existing
                .contains(&(policy.use_label.clone(), stem.to_string())))
        }
    }

    fn unit(uses: &[&str]) -> MediaUnit {
        let mut unit = MediaUnit::new(MediaUnitId::new("PHYS_0001").unwrap(), 1);
        for use_label in uses {
            unit.media_files.insert(
                RenditionKind::new(*use_label, "image/tiff"),
                Url::parse(&format!("file:///data/{use_label}/00000001.tif")).unwrap(),
            );
        }
        unit
    }

    fn uses(unit: &MediaUnit) -> Vec<String> {
        unit.media_files.use_labels()
    }

    #[test]
    fn test_canonical_stem_from_local() {
        let policies = RenditionPolicies::new(vec![RenditionPolicy::new(
            "LOCAL",
            "image/tiff",
            InclusionMode::None,
        )]);
        let locator = StubLocator::with(&[]);
        let reconciler = VariantReconciler::new(&policies, &locator);

        assert_eq!(
            reconciler.canonical_stem(&unit(&["LOCAL"])),
            Some("00000001".to_string())
        );
        assert_eq!(reconciler.canonical_stem(&unit(&["MASTER"])), None);
    }

    #[test]
    fn test_canonical_stem_is_decoded() {
        let policies = RenditionPolicies::new(vec![RenditionPolicy::new(
            "LOCAL",
            "image/tiff",
            InclusionMode::Always,
        )]);
        let locator = StubLocator::with(&[]);
        let reconciler = VariantReconciler::new(&policies, &locator);
        let unit = MediaUnit::new(MediaUnitId::new("PHYS_0001").unwrap(), 1).with_media_file(
            RenditionKind::new("LOCAL", "image/tiff"),
            Url::parse("file:///data/images/page%201.tif").unwrap(),
        );

        assert_eq!(reconciler.canonical_stem(&unit), Some("page 1".to_string()));
    }

    #[test]
    fn test_canonical_stem_without_source_policy() {
        let policies = RenditionPolicies::new(vec![RenditionPolicy::new(
            "MASTER",
            "image/tiff",
            InclusionMode::Always,
        )]);
        let locator = StubLocator::with(&[]);
        let reconciler = VariantReconciler::new(&policies, &locator);

        assert_eq!(reconciler.canonical_stem(&unit(&["LOCAL", "MASTER"])), None);
    }

    #[test]
    fn test_master_thumbnail_preview_scenario() {
        let policies = RenditionPolicies::new(vec![
            RenditionPolicy::new("MASTER", "image/tiff", InclusionMode::Always),
            RenditionPolicy::new("THUMBNAIL", "image/jpeg", InclusionMode::None),
            RenditionPolicy::new("PREVIEW", "image/jpeg", InclusionMode::IfExists),
        ]);
        let locator = StubLocator::with(&[("PREVIEW", "00000001")]);
        let reconciler = VariantReconciler::new(&policies, &locator);
        let mut unit = unit(&["MASTER", "THUMBNAIL"]);

        let outcome = reconciler.reconcile(&mut unit, "00000001").unwrap();

        assert_eq!(uses(&unit), vec!["MASTER", "PREVIEW"]);
        assert_eq!(outcome.removed, vec!["THUMBNAIL"]);
        assert_eq!(outcome.added, vec!["PREVIEW"]);
        assert_eq!(
            unit.media_files.get("PREVIEW").unwrap().as_str(),
            "file:///media/preview/00000001"
        );
    }

    #[test]
    fn test_rendition_without_policy_is_removed() {
        let policies = RenditionPolicies::new(vec![RenditionPolicy::new(
            "MASTER",
            "image/tiff",
            InclusionMode::Always,
        )]);
        let locator = StubLocator::with(&[]);
        let reconciler = VariantReconciler::new(&policies, &locator);
        let mut unit = unit(&["MASTER", "FULLTEXT"]);

        reconciler.reconcile(&mut unit, "00000001").unwrap();

        assert_eq!(uses(&unit), vec!["MASTER"]);
    }

    #[test]
    fn test_if_exists_removed_when_file_missing() {
        let policies = RenditionPolicies::new(vec![RenditionPolicy::new(
            "PREVIEW",
            "image/jpeg",
            InclusionMode::IfExists,
        )]);
        let locator = StubLocator::with(&[]);
        let reconciler = VariantReconciler::new(&policies, &locator);
        let mut unit = unit(&["PREVIEW"]);

        let outcome = reconciler.reconcile(&mut unit, "00000001").unwrap();

        assert!(unit.media_files.is_empty());
        assert_eq!(outcome.removed, vec!["PREVIEW"]);
        assert!(outcome.added.is_empty());
    }

    #[test]
    fn test_existing_always_rendition_keeps_its_uri() {
        let policies = RenditionPolicies::new(vec![RenditionPolicy::new(
            "MASTER",
            "image/tiff",
            InclusionMode::Always,
        )]);
        let locator = StubLocator::with(&[]);
        let reconciler = VariantReconciler::new(&policies, &locator);
        let mut unit = unit(&["MASTER"]);

        reconciler.reconcile(&mut unit, "00000001").unwrap();

        assert_eq!(
            unit.media_files.get("MASTER").unwrap().as_str(),
            "file:///data/MASTER/00000001.tif"
        );
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let policies = RenditionPolicies::new(vec![
            RenditionPolicy::new("LOCAL", "image/tiff", InclusionMode::None),
            RenditionPolicy::new("MAX", "image/jpeg", InclusionMode::Always),
            RenditionPolicy::new("MIN", "image/jpeg", InclusionMode::IfExists),
            RenditionPolicy::new("OCR", "text/xml", InclusionMode::IfExists),
        ]);
        let locator = StubLocator::with(&[("MIN", "00000001")]);
        let reconciler = VariantReconciler::new(&policies, &locator);
        let mut unit = unit(&["LOCAL", "OCR", "UNKNOWN"]);

        reconciler.reconcile(&mut unit, "00000001").unwrap();
        let first = unit.clone();
        let second = reconciler.reconcile(&mut unit, "00000001").unwrap();

        assert_eq!(unit, first);
        assert_eq!(second, ReconcileOutcome::default());
        assert_eq!(uses(&unit), vec!["MAX", "MIN"]);
    }

    #[test]
    fn test_reconcile_all_skips_units_without_stem() {
        let policies = RenditionPolicies::new(vec![
            RenditionPolicy::new("LOCAL", "image/tiff", InclusionMode::Always),
            RenditionPolicy::new("MAX", "image/jpeg", InclusionMode::Always),
        ]);
        let locator = StubLocator::with(&[]);
        let reconciler = VariantReconciler::new(&policies, &locator);
        let untouched = unit(&["THUMBS"]);
        let mut tree = DocumentTree::new(
            crate::domain::StructuralNode::new("monograph"),
            vec![unit(&["LOCAL"]), untouched.clone()],
        );

        let stats = reconciler.reconcile_all(&mut tree).unwrap();

        assert_eq!(stats.units_reconciled, 1);
        assert_eq!(stats.units_skipped, 1);
        assert_eq!(stats.renditions_added, 1);
        assert_eq!(tree.media_units[1], untouched);
        assert_eq!(uses(&tree.media_units[0]), vec!["LOCAL", "MAX"]);
    }

    #[test]
    fn test_locator_failure_is_fatal() {
        let policies = RenditionPolicies::new(vec![RenditionPolicy::new(
            "PREVIEW",
            "image/jpeg",
            InclusionMode::IfExists,
        )]);
        let mut locator = StubLocator::with(&[]);
        locator.fail = true;
        let reconciler = VariantReconciler::new(&policies, &locator);
        let mut unit = unit(&[]);

        let err = reconciler.reconcile(&mut unit, "00000001").unwrap_err();
        assert!(matches!(err, FolioError::LocatorIo(_)));
    }
}
