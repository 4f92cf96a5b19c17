//! Whole-site rendering.

use dtddocs_schema::SchemaModel;
use dtddocs_xref::{CrossRefResolver, IdentifierRegistry, RegistryError};

use crate::page;

/// Page emission failure.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("schema declares no elements")]
    EmptySchema,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to write documentation pages: {0}")]
    Io(#[from] std::io::Error),
}

/// One rendered output page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// File name including the `.rst` extension.
    pub file_name: String,
    /// Full page text.
    pub content: String,
}

/// A content reference that could not be resolved to a declared tag.
///
/// The offending reference was rendered as plain text, never as a
/// dangling link; callers decide whether this fails the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWarning {
    /// Tag whose page contains the reference.
    pub tag: String,
    /// The referenced, undeclared element name.
    pub reference: String,
}

/// The rendered site: index page first, then one page per tag in
/// declaration order.
#[derive(Debug)]
pub struct RenderedSite {
    pub pages: Vec<RenderedPage>,
    pub warnings: Vec<PageWarning>,
}

/// Render all pages for a schema.
///
/// Registration order is fixed so identifiers are reproducible: tags
/// sorted lexicographically first, the index title last. The index title
/// names the first-declared tag; whether that is the schema's true
/// document root is not verified.
pub fn render_site(schema: &SchemaModel) -> Result<RenderedSite, EmitError> {
    let root = schema.root_tag().ok_or(EmitError::EmptySchema)?;
    let index_title = format!("The {root} file format");

    let mut tags: Vec<&str> = schema.iter().map(|element| element.name.as_str()).collect();
    tags.sort_unstable();

    let mut registry = IdentifierRegistry::new();
    for tag in &tags {
        registry.assign(tag)?;
    }
    registry.assign(&index_title)?;

    let resolver = CrossRefResolver::new(schema, &registry);
    let mut pages = Vec::with_capacity(schema.len() + 1);
    let mut warnings = Vec::new();

    let tag_files: Vec<String> = tags
        .iter()
        .map(|tag| registry.resolve(tag).map(ToOwned::to_owned))
        .collect::<Result<_, _>>()?;
    pages.push(RenderedPage {
        file_name: format!("{}.rst", registry.resolve(&index_title)?),
        content: page::index_page(&index_title, &tag_files),
    });

    for element in schema {
        let content = page::tag_page(element, &resolver, &mut warnings)?;
        pages.push(RenderedPage {
            file_name: format!("{}.rst", registry.resolve(&element.name)?),
            content,
        });
    }

    tracing::debug!(
        pages = pages.len(),
        warnings = warnings.len(),
        "rendered site"
    );
    Ok(RenderedSite { pages, warnings })
}

#[cfg(test)]
mod tests {
    use dtddocs_schema::extract_str;
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(source: &str) -> RenderedSite {
        render_site(&extract_str(source).unwrap()).unwrap()
    }

    #[test]
    fn test_index_first_then_tags_in_declaration_order() {
        let site = render(
            "<!ELEMENT zebra (apple)>\n<!ELEMENT apple EMPTY>",
        );
        let files: Vec<&str> = site.pages.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(
            files,
            ["the_zebra_file_format.rst", "zebra.rst", "apple.rst"]
        );
    }

    #[test]
    fn test_index_title_uses_first_declared_tag() {
        let site = render("<!ELEMENT novel EMPTY>\n<!ELEMENT chapter EMPTY>");
        assert!(site.pages[0].content.contains("The novel file format"));
    }

    #[test]
    fn test_index_toctree_lists_sorted_identifiers() {
        let site = render(
            "<!ELEMENT zebra EMPTY>\n<!ELEMENT apple EMPTY>\n<!ELEMENT mango EMPTY>",
        );
        assert!(site.pages[0].content.contains("   apple\n   mango\n   zebra"));
    }

    #[test]
    fn test_case_colliding_tags_get_distinct_pages() {
        let site = render("<!ELEMENT Item EMPTY>\n<!ELEMENT item EMPTY>");
        let files: Vec<&str> = site.pages.iter().map(|p| p.file_name.as_str()).collect();
        // Sorted registration order: "Item" before "item".
        assert!(files.contains(&"item.rst"));
        assert!(files.contains(&"_item.rst"));
    }

    #[test]
    fn test_duplicate_content_references_link_to_same_target() {
        let site = render(
            "<!ELEMENT Book (Author, Author)>\n<!ELEMENT Author (#PCDATA)>",
        );
        let book_page = &site.pages[1].content;
        assert_eq!(book_page.matches("`Author <author.html>`__").count(), 2);
        assert!(site.warnings.is_empty());
    }

    #[test]
    fn test_unresolved_reference_warns_and_renders_plain() {
        let site = render("<!ELEMENT book (phantom)>");
        assert_eq!(site.warnings.len(), 1);
        assert_eq!(site.warnings[0].tag, "book");
        assert_eq!(site.warnings[0].reference, "phantom");

        let book_page = &site.pages[1].content;
        assert!(book_page.contains("      - phantom\n"));
        assert!(!book_page.contains("`phantom <"));
    }

    #[test]
    fn test_empty_schema_is_error() {
        let schema = extract_str("<!-- nothing declared -->").unwrap();
        assert!(matches!(render_site(&schema), Err(EmitError::EmptySchema)));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let source = "<!ELEMENT b (a, c)>\n<!ELEMENT a EMPTY>\n<!ELEMENT c EMPTY>";
        let first = render(source);
        let second = render(source);
        assert_eq!(first.pages, second.pages);
    }
}
