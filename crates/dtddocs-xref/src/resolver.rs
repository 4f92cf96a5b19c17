//! Cross-reference resolution for content links and attribute anchors.

use dtddocs_schema::SchemaModel;

use crate::registry::{IdentifierRegistry, RegistryError};

/// A resolved reference: what to show and where it points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Display text, unmodified.
    pub text: String,
    /// Link target: a registry identifier for content links, a `#`-anchor
    /// for attribute links.
    pub target: String,
}

/// Cross-reference failure.
#[derive(Debug, thiserror::Error)]
pub enum XrefError {
    /// A content model names an element the schema never declares
    /// (malformed DTD, or a reference into an unresolved external
    /// entity).
    #[error("content model references undeclared element `{0}`")]
    UnresolvedReference(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Resolves references against a schema model and a populated registry.
///
/// Borrows both: the registry is owned by the extraction pipeline and
/// shared with the page emitter.
pub struct CrossRefResolver<'a> {
    schema: &'a SchemaModel,
    registry: &'a IdentifierRegistry,
}

impl<'a> CrossRefResolver<'a> {
    #[must_use]
    pub fn new(schema: &'a SchemaModel, registry: &'a IdentifierRegistry) -> Self {
        Self { schema, registry }
    }

    /// Resolve a content-model reference to the target tag's page
    /// identifier.
    ///
    /// Every declared tag must already be registered; a name absent from
    /// the schema model is an [`XrefError::UnresolvedReference`], never a
    /// silently dangling link.
    pub fn content_link(&self, element_name: &str) -> Result<Link, XrefError> {
        if !self.schema.contains(element_name) {
            return Err(XrefError::UnresolvedReference(element_name.to_owned()));
        }
        let target = self.registry.resolve(element_name)?;
        Ok(Link {
            text: element_name.to_owned(),
            target: target.to_owned(),
        })
    }

    /// Synthesize the anchor for an attribute's section on its tag's page.
    ///
    /// Pure derivation, no registry lookup: the lowercase attribute name
    /// embedded in a fixed template. Must agree byte-for-byte with the
    /// anchor the page emitter generates for the attribute heading.
    #[must_use]
    pub fn attribute_anchor(&self, _element_name: &str, attribute_name: &str) -> Link {
        Link {
            text: attribute_name.to_owned(),
            target: format!("#the-{}-attribute", attribute_name.to_lowercase()),
        }
    }
}
