//! Cross-document link resolution
//!
//! Nodes that stand for another document carry an unresolved
//! [`CrossReference`] naming that document. Resolution looks the document up,
//! builds its export URI from the project's pointer template and takes over
//! its base type as the node's type.

use crate::adapters::{DocumentLookup, TemplateResolver};
use crate::domain::{
    CrossReference, DocumentId, DocumentIdentity, FolioError, Result, StructuralNode,
    LOCTYPE_URL,
};
use url::Url;

/// Resolves cross references against the document store
pub struct LinkResolver<'a> {
    lookup: &'a dyn DocumentLookup,
    resolver: &'a dyn TemplateResolver,
    pointer_path: &'a str,
}

impl<'a> LinkResolver<'a> {
    /// Creates a link resolver
    pub fn new(
        lookup: &'a dyn DocumentLookup,
        resolver: &'a dyn TemplateResolver,
        pointer_path: &'a str,
    ) -> Self {
        Self {
            lookup,
            resolver,
            pointer_path,
        }
    }

    /// Resolves every cross reference below `root`, pre-order
    ///
    /// Only the owned child lists are walked; a cross reference never leads
    /// the walk into another document. Returns the number of resolved links.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown targets and `Template` or
    /// `MalformedLocation` if the export URI cannot be built.
    pub async fn resolve_links(&self, root: &mut StructuralNode) -> Result<usize> {
        let mut resolved = 0;
        let mut stack: Vec<&mut StructuralNode> = vec![root];

        while let Some(node) = stack.pop() {
            if let Some(link) = &node.link {
                let id = DocumentId::from_link_uri(&link.uri).map_err(|e| {
                    FolioError::NotFound(format!("Unresolvable link '{}': {e}", link.uri))
                })?;
                let identity = self.lookup.lookup(&id).await?;
                self.apply(node, &identity)?;
                resolved += 1;
            }
            stack.extend(node.children.iter_mut().rev());
        }

        tracing::debug!(resolved, "Resolved cross-document links");
        Ok(resolved)
    }

    /// Places `root` under a synthetic node linking to the parent document
    ///
    /// Returns the new root, whose only child is the old root.
    pub async fn relink_parent(
        &self,
        root: StructuralNode,
        parent: &DocumentId,
    ) -> Result<StructuralNode> {
        let identity = self.lookup.lookup(parent).await?;

        let mut link_holder = StructuralNode::default().with_link(CrossReference::default());
        self.apply(&mut link_holder, &identity)?;
        link_holder.children.push(root);

        tracing::debug!(parent = %parent, base_type = %identity.base_type, "Linked to parent document");
        Ok(link_holder)
    }

    fn apply(&self, node: &mut StructuralNode, identity: &DocumentIdentity) -> Result<()> {
        let uri = self
            .resolver
            .substitute(self.pointer_path, &identity.context)?;
        Url::parse(&uri).map_err(|e| FolioError::malformed_location(uri.as_str(), e))?;

        let link = node.link.get_or_insert_with(CrossReference::default);
        link.loctype = LOCTYPE_URL.to_string();
        link.uri = uri;
        node.node_type = identity.base_type.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::VariableReplacer;
    use crate::domain::DocumentContext;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const POINTER: &str = "https://repo.example.org/mets/{id}.xml";

    /// In-memory document lookup recording the ids it was asked for
    struct MapLookup {
        documents: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl MapLookup {
        fn new(documents: &[(&str, &str)]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(id, base)| (id.to_string(), base.to_string()))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DocumentLookup for MapLookup {
        async fn lookup(&self, id: &DocumentId) -> Result<DocumentIdentity> {
            self.requests.lock().unwrap().push(id.to_string());
            let base_type = self
                .documents
                .get(id.as_str())
                .ok_or_else(|| FolioError::NotFound(id.to_string()))?;
            Ok(DocumentIdentity::new(
                id.clone(),
                format!("Document {id}"),
                base_type.clone(),
                DocumentContext::new(),
            ))
        }
    }

    fn linked(target: &str) -> StructuralNode {
        StructuralNode::new("link").with_link(CrossReference::new(
            "OTHER",
            format!("database://?process.id={target}"),
        ))
    }

    #[tokio::test]
    async fn test_resolves_single_link() {
        let lookup = MapLookup::new(&[("42", "monograph")]);
        let resolver = VariableReplacer::new();
        let mut root = StructuralNode::new("multivolume_work").with_child(linked("42"));

        let count = LinkResolver::new(&lookup, &resolver, POINTER)
            .resolve_links(&mut root)
            .await
            .unwrap();

        let node = &root.children[0];
        assert_eq!(count, 1);
        assert_eq!(node.node_type, "monograph");
        let link = node.link.as_ref().unwrap();
        assert_eq!(link.loctype, "URL");
        assert_eq!(link.uri, "https://repo.example.org/mets/42.xml");
        assert_eq!(root.node_type, "multivolume_work");
    }

    #[tokio::test]
    async fn test_resolves_pre_order_through_unlinked_nodes() {
        let lookup = MapLookup::new(&[("1", "volume"), ("2", "volume"), ("3", "volume")]);
        let resolver = VariableReplacer::new();
        let mut root = linked("1")
            .with_child(StructuralNode::new("section").with_child(linked("2")))
            .with_child(linked("3"));

        let count = LinkResolver::new(&lookup, &resolver, POINTER)
            .resolve_links(&mut root)
            .await
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(*lookup.requests.lock().unwrap(), vec!["1", "2", "3"]);
        assert_eq!(root.children[0].node_type, "section");
        assert_eq!(root.children[0].children[0].node_type, "volume");
    }

    #[tokio::test]
    async fn test_unknown_target_is_fatal() {
        let lookup = MapLookup::new(&[]);
        let resolver = VariableReplacer::new();
        let mut root = StructuralNode::new("work").with_child(linked("99"));

        let err = LinkResolver::new(&lookup, &resolver, POINTER)
            .resolve_links(&mut root)
            .await
            .unwrap_err();

        assert!(matches!(err, FolioError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_pointer_path() {
        let lookup = MapLookup::new(&[("42", "monograph")]);
        let resolver = VariableReplacer::new();
        let mut root = linked("42");

        let err = LinkResolver::new(&lookup, &resolver, "mets/{id}.xml")
            .resolve_links(&mut root)
            .await
            .unwrap_err();

        assert!(matches!(err, FolioError::MalformedLocation { .. }));
    }

    #[tokio::test]
    async fn test_relink_parent_wraps_root() {
        let lookup = MapLookup::new(&[("7", "periodical")]);
        let resolver = VariableReplacer::new();
        let root = StructuralNode::new("volume").with_child(StructuralNode::new("chapter"));
        let before = root.clone();

        let new_root = LinkResolver::new(&lookup, &resolver, POINTER)
            .relink_parent(root, &DocumentId::new("7").unwrap())
            .await
            .unwrap();

        assert_eq!(new_root.node_type, "periodical");
        assert_eq!(new_root.children, vec![before]);
        let link = new_root.link.as_ref().unwrap();
        assert_eq!(link.loctype, "URL");
        assert_eq!(link.uri, "https://repo.example.org/mets/7.xml");
    }
}
