//! Filesystem rendition locator
//!
//! Rendition files of one document live below a media root, one folder per
//! policy. The folder is the policy's `path` template substituted against the
//! document context; the file name is the canonical stem plus the extension
//! belonging to the policy's MIME type.

use super::traits::{RenditionLocator, TemplateResolver};
use crate::domain::{DocumentContext, FolioError, RenditionPolicy, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Returns the file extension used for a MIME type
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type.to_lowercase().as_str() {
        "image/tiff" | "image/tif" => "tif",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/jp2" | "image/jpx" => "jp2",
        "application/pdf" => "pdf",
        "application/xml" | "text/xml" => "xml",
        "text/plain" => "txt",
        "text/html" => "html",
        _ => "bin",
    }
}

/// [`RenditionLocator`] over a local directory tree
pub struct FsRenditionLocator {
    media_root: PathBuf,
    resolver: Arc<dyn TemplateResolver>,
    context: DocumentContext,
}

impl FsRenditionLocator {
    /// Creates a locator for one document
    ///
    /// A relative `media_root` is resolved against the current directory so
    /// that located files can be expressed as `file://` URLs.
    ///
    /// # Errors
    ///
    /// Returns `LocatorIo` if the current directory cannot be determined.
    pub fn new(
        media_root: impl AsRef<Path>,
        resolver: Arc<dyn TemplateResolver>,
        context: DocumentContext,
    ) -> Result<Self> {
        let media_root = media_root.as_ref();
        let media_root = if media_root.is_absolute() {
            media_root.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| FolioError::LocatorIo(format!("Cannot resolve media root: {e}")))?
                .join(media_root)
        };

        Ok(Self {
            media_root,
            resolver,
            context,
        })
    }

    /// Returns the folder holding the policy's files
    pub fn folder(&self, policy: &RenditionPolicy) -> Result<PathBuf> {
        let relative = self.resolver.substitute(&policy.path, &self.context)?;
        Ok(self.media_root.join(relative.trim_start_matches('/')))
    }

    /// Returns the path of the rendition file of `stem`
    pub fn file_path(&self, policy: &RenditionPolicy, stem: &str) -> Result<PathBuf> {
        let extension = extension_for_mime(&policy.mime_type);
        Ok(self.folder(policy)?.join(format!("{stem}.{extension}")))
    }
}

impl RenditionLocator for FsRenditionLocator {
    fn locate(&self, policy: &RenditionPolicy, stem: &str) -> Result<Url> {
        let path = self.file_path(policy, stem)?;
        Url::from_file_path(&path).map_err(|_| {
            FolioError::LocatorIo(format!(
                "Cannot express {} as a file URL",
                path.display()
            ))
        })
    }

    fn exists(&self, policy: &RenditionPolicy, stem: &str) -> Result<bool> {
        let path = self.file_path(policy, stem)?;
        path.try_exists().map_err(|e| {
            FolioError::LocatorIo(format!(
                "Failed to check {}: {e}",
                path.display()
            ))
        })
    }
}
