//! Structural tree and media model of a digital object
//!
//! A [`DocumentTree`] owns one root [`StructuralNode`] and the ordered list of
//! [`MediaUnit`]s. Nodes own their children; cross references to other
//! documents are recorded as [`CrossReference`] values and never become
//! structural edges.

use super::ids::MediaUnitId;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// Locator type written to every resolved cross reference
pub const LOCTYPE_URL: &str = "URL";

/// Metadata section a metadata entry is exported into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MdSec {
    /// Descriptive metadata
    DmdSec,
    /// Source metadata
    SourceMd,
    /// Digital provenance metadata
    DigiprovMd,
    /// Rights metadata
    RightsMd,
    /// Technical metadata
    TechMd,
}

impl fmt::Display for MdSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MdSec::DmdSec => "DMD_SEC",
            MdSec::SourceMd => "SOURCE_MD",
            MdSec::DigiprovMd => "DIGIPROV_MD",
            MdSec::RightsMd => "RIGHTS_MD",
            MdSec::TechMd => "TECH_MD",
        };
        f.write_str(name)
    }
}

/// A single key/value metadata entry
///
/// Metadata is multi-valued: a node may carry several entries with the same
/// domain and key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Section the entry belongs to
    pub domain: MdSec,

    /// Metadata key
    pub key: String,

    /// Metadata value
    pub value: String,
}

impl MetadataEntry {
    /// Creates a new metadata entry
    pub fn new(domain: MdSec, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            domain,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A rendition ("media variant") of a media unit
///
/// Equality, ordering and hashing consider the use label only, so a rendition
/// map holds at most one entry per use label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenditionKind {
    /// Use label, e.g. `MASTER` or `THUMBS`
    #[serde(rename = "use")]
    pub use_label: String,

    /// MIME type of the rendition's files
    pub mime_type: String,
}

impl RenditionKind {
    /// Creates a new rendition kind
    pub fn new(use_label: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            use_label: use_label.into(),
            mime_type: mime_type.into(),
        }
    }
}

impl PartialEq for RenditionKind {
    fn eq(&self, other: &Self) -> bool {
        self.use_label == other.use_label
    }
}

impl Eq for RenditionKind {}

impl PartialOrd for RenditionKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RenditionKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.use_label.cmp(&other.use_label)
    }
}

impl Hash for RenditionKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.use_label.hash(state);
    }
}

impl Borrow<str> for RenditionKind {
    fn borrow(&self) -> &str {
        &self.use_label
    }
}

/// One rendition map entry in its serialized form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    /// Rendition kind
    #[serde(flatten)]
    pub kind: RenditionKind,

    /// Storage URI
    pub uri: Url,
}

/// Last non-empty path segment of a URI, still percent-encoded
pub fn file_name(uri: &Url) -> Option<&str> {
    uri.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
}

/// Last non-empty path segment of a URI as it is named on disk
///
/// `file:///data/page%201.tif` yields `page 1.tif`.
pub fn decoded_file_name(uri: &Url) -> Option<String> {
    file_name(uri).map(|name| {
        percent_encoding::percent_decode_str(name)
            .decode_utf8_lossy()
            .into_owned()
    })
}

/// Mapping from rendition kind to storage URI, unique per use label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<MediaFile>", into = "Vec<MediaFile>")]
pub struct RenditionMap(BTreeMap<RenditionKind, Url>);

impl RenditionMap {
    /// Creates an empty rendition map
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the URI stored for a use label
    pub fn get(&self, use_label: &str) -> Option<&Url> {
        self.0.get(use_label)
    }

    /// Returns whether a rendition with this use label is present
    pub fn contains_use(&self, use_label: &str) -> bool {
        self.0.contains_key(use_label)
    }

    /// Inserts a rendition, replacing any entry with the same use label
    ///
    /// The stored kind is replaced too, so a changed MIME type takes effect.
    pub fn insert(&mut self, kind: RenditionKind, uri: Url) -> Option<Url> {
        let previous = self.0.remove(kind.use_label.as_str());
        self.0.insert(kind, uri);
        previous
    }

    /// Removes the rendition with this use label
    pub fn remove(&mut self, use_label: &str) -> Option<Url> {
        self.0.remove(use_label)
    }

    /// Iterates over all renditions in use label order
    pub fn iter(&self) -> impl Iterator<Item = (&RenditionKind, &Url)> {
        self.0.iter()
    }

    /// Iterates over all renditions with mutable access to the URIs
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&RenditionKind, &mut Url)> {
        self.0.iter_mut()
    }

    /// Returns the use labels currently present
    pub fn use_labels(&self) -> Vec<String> {
        self.0.keys().map(|kind| kind.use_label.clone()).collect()
    }

    /// Number of renditions
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no rendition is present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<MediaFile>> for RenditionMap {
    fn from(files: Vec<MediaFile>) -> Self {
        let mut map = RenditionMap::new();
        for file in files {
            map.insert(file.kind, file.uri);
        }
        map
    }
}

impl From<RenditionMap> for Vec<MediaFile> {
    fn from(map: RenditionMap) -> Self {
        map.0
            .into_iter()
            .map(|(kind, uri)| MediaFile { kind, uri })
            .collect()
    }
}

/// One digitized page or asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUnit {
    /// Identity used by views
    pub id: MediaUnitId,

    /// Physical order of the unit within the object
    #[serde(default)]
    pub order: u32,

    /// Renditions of this unit
    #[serde(default)]
    pub media_files: RenditionMap,
}

impl MediaUnit {
    /// Creates a media unit without renditions
    pub fn new(id: MediaUnitId, order: u32) -> Self {
        Self {
            id,
            order,
            media_files: RenditionMap::new(),
        }
    }

    /// Adds a rendition
    pub fn with_media_file(mut self, kind: RenditionKind, uri: Url) -> Self {
        self.media_files.insert(kind, uri);
        self
    }
}

/// Pointer from a structural node to a separately managed document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    /// Locator type, `URL` once resolved
    #[serde(default)]
    pub loctype: String,

    /// Target URI; the unresolved form encodes the target document id
    #[serde(default)]
    pub uri: String,
}

impl CrossReference {
    /// Creates an unresolved cross reference
    pub fn new(loctype: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            loctype: loctype.into(),
            uri: uri.into(),
        }
    }
}

/// A node in the logical structure of a digital object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralNode {
    /// Type label, e.g. `volume` or `chapter`
    #[serde(rename = "type", default)]
    pub node_type: String,

    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Owned child nodes in document order
    #[serde(default)]
    pub children: Vec<StructuralNode>,

    /// Descriptive metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,

    /// Link to another document, if this node stands for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<CrossReference>,

    /// Media units visible at or under this node
    #[serde(default)]
    pub views: BTreeSet<MediaUnitId>,
}

impl StructuralNode {
    /// Creates an empty node with the given type label
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            ..Self::default()
        }
    }

    /// Adds a child node
    pub fn with_child(mut self, child: StructuralNode) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the cross reference
    pub fn with_link(mut self, link: CrossReference) -> Self {
        self.link = Some(link);
        self
    }

    /// Adds views
    pub fn with_views<I>(mut self, views: I) -> Self
    where
        I: IntoIterator<Item = MediaUnitId>,
    {
        self.views.extend(views);
        self
    }

    /// Counts this node and all of its descendants
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(StructuralNode::node_count)
            .sum::<usize>()
    }
}

/// Export view of one digital object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    /// Root of the logical structure
    pub root: StructuralNode,

    /// Media units in physical order
    #[serde(default)]
    pub media_units: Vec<MediaUnit>,
}

impl DocumentTree {
    /// Creates a tree from a root node and media units
    pub fn new(root: StructuralNode, media_units: Vec<MediaUnit>) -> Self {
        Self { root, media_units }
    }
}
