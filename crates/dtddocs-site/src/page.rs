//! Single-page rst assembly.
//!
//! Page layout follows a fixed framework: a first-level heading, an
//! admonition box with the purpose placeholder and the attribute/content
//! link lists, then a second-level section per attribute ready to be
//! filled in manually.

use dtddocs_schema::ElementModel;
use dtddocs_xref::{CrossRefResolver, XrefError};

use crate::site::{EmitError, PageWarning};

/// Underline (and overline) character for page titles.
const TITLE_UNDERLINER: char = '=';

/// Underline character for attribute sections.
const SECTION_UNDERLINER: char = '-';

/// Anchor id for an attribute's section on its tag's page.
///
/// This is the emitter side of the anchor contract: the resolver's
/// [`attribute_anchor`](CrossRefResolver::attribute_anchor) must produce
/// `#` followed by exactly this string, byte for byte.
pub(crate) fn attribute_target_id(attribute_name: &str) -> String {
    format!("the-{}-attribute", attribute_name.to_lowercase())
}

/// An rst heading block: the text with an underline (and, for titles, an
/// overline) of matching width.
fn heading(text: &str, underliner: char, overline: bool) -> String {
    let bar: String = std::iter::repeat_n(underliner, text.chars().count()).collect();
    if overline {
        format!("{bar}\n{text}\n{bar}")
    } else {
        format!("{text}\n{bar}")
    }
}

/// The index page: title heading plus a toctree over all tag pages.
///
/// `tag_files` are the page identifiers in the order they should appear.
pub(crate) fn index_page(title: &str, tag_files: &[String]) -> String {
    let mut lines = vec![
        heading(title, TITLE_UNDERLINER, true),
        String::new(),
        ".. toctree::".to_owned(),
        "   :maxdepth: 1".to_owned(),
        "   :caption: XML tags".to_owned(),
        String::new(),
    ];
    for file in tag_files {
        lines.push(format!("   {file}"));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// One tag's page.
///
/// Unresolved content references are recorded in `warnings` and rendered
/// as plain text instead of a link; registry misuse propagates.
pub(crate) fn tag_page(
    element: &ElementModel,
    resolver: &CrossRefResolver<'_>,
    warnings: &mut Vec<PageWarning>,
) -> Result<String, EmitError> {
    let mut lines = vec![
        heading(
            &format!("The <{}> tag", element.name),
            TITLE_UNDERLINER,
            true,
        ),
        String::new(),
        format!(".. admonition:: <{}>", element.name),
        String::new(),
        "   Purpose".to_owned(),
    ];

    if !element.attributes.is_empty() {
        lines.push(String::new());
        lines.push("   Attributes".to_owned());
        for attr in &element.attributes {
            let link = resolver.attribute_anchor(&element.name, &attr.name);
            lines.push(format!("      - `{} <{}>`__", link.text, link.target));
        }
    }

    if !element.contents.is_empty() {
        lines.push(String::new());
        lines.push("   Content".to_owned());
        for name in &element.contents {
            match resolver.content_link(name) {
                Ok(link) => {
                    lines.push(format!("      - `{} <{}.html>`__", link.text, link.target));
                }
                Err(XrefError::UnresolvedReference(reference)) => {
                    tracing::warn!(
                        tag = %element.name,
                        reference = %reference,
                        "unresolved content reference"
                    );
                    lines.push(format!("      - {reference}"));
                    warnings.push(PageWarning {
                        tag: element.name.clone(),
                        reference,
                    });
                }
                Err(XrefError::Registry(err)) => return Err(err.into()),
            }
        }
    }

    for attr in &element.attributes {
        lines.push(String::new());
        lines.push(format!(".. _{}:", attribute_target_id(&attr.name)));
        lines.push(String::new());
        lines.push(heading(
            &format!("The {} attribute", attr.name),
            SECTION_UNDERLINER,
            false,
        ));
        lines.push(String::new());
        if attr.attr_type.is_enumerated() {
            for literal in attr.attr_type.values() {
                lines.push(format!("- {literal}: "));
            }
            lines.push(String::new());
        }
        match attr.default.value() {
            Some(value) => lines.push(format!("Default value: {value}")),
            None => lines.push(format!("Default: {}", attr.default.label())),
        }
    }

    lines.push(String::new());
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use dtddocs_schema::extract_str;
    use dtddocs_xref::IdentifierRegistry;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_with_overline() {
        assert_eq!(heading("Title", '=', true), "=====\nTitle\n=====");
    }

    #[test]
    fn test_heading_without_overline() {
        assert_eq!(heading("Section", '-', false), "Section\n-------");
    }

    #[test]
    fn test_heading_width_counts_chars_not_bytes() {
        let block = heading("Tägé", '=', false);
        assert_eq!(block, "Tägé\n====");
    }

    #[test]
    fn test_index_page_layout() {
        let page = index_page(
            "The book file format",
            &["author".to_owned(), "book".to_owned()],
        );
        assert!(page.starts_with(
            "====================\nThe book file format\n====================\n"
        ));
        assert!(page.contains(".. toctree::\n   :maxdepth: 1\n   :caption: XML tags\n"));
        assert!(page.contains("\n   author\n   book\n"));
    }

    #[test]
    fn test_attribute_anchor_round_trip_with_resolver() {
        // The emitter's target id and the resolver's link anchor are two
        // independent derivations that must agree byte for byte.
        let schema = extract_str(
            r#"<!ELEMENT Book (#PCDATA)>
               <!ATTLIST Book Title CDATA #IMPLIED>"#,
        )
        .unwrap();
        let mut registry = IdentifierRegistry::new();
        registry.assign("Book").unwrap();
        let resolver = CrossRefResolver::new(&schema, &registry);

        let link = resolver.attribute_anchor("Book", "Title");
        assert_eq!(link.target, format!("#{}", attribute_target_id("Title")));

        let mut warnings = Vec::new();
        let page = tag_page(schema.get("Book").unwrap(), &resolver, &mut warnings).unwrap();
        assert!(page.contains(&format!(".. _{}:", attribute_target_id("Title"))));
        assert!(page.contains(&format!("`Title <{}>`__", link.target)));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_tag_page_enumerated_attribute() {
        let schema = extract_str(
            r#"<!ELEMENT note (#PCDATA)>
               <!ATTLIST note priority (a | b) "a">"#,
        )
        .unwrap();
        let mut registry = IdentifierRegistry::new();
        registry.assign("note").unwrap();
        let resolver = CrossRefResolver::new(&schema, &registry);

        let mut warnings = Vec::new();
        let page = tag_page(schema.get("note").unwrap(), &resolver, &mut warnings).unwrap();
        assert!(page.contains("The priority attribute\n----------------------"));
        assert!(page.contains("- a: \n- b: \n\nDefault value: a"));
    }

    #[test]
    fn test_tag_page_plain_attribute_shows_default_kind() {
        let schema = extract_str(
            r#"<!ELEMENT note (#PCDATA)>
               <!ATTLIST note lang CDATA #IMPLIED>"#,
        )
        .unwrap();
        let mut registry = IdentifierRegistry::new();
        registry.assign("note").unwrap();
        let resolver = CrossRefResolver::new(&schema, &registry);

        let mut warnings = Vec::new();
        let page = tag_page(schema.get("note").unwrap(), &resolver, &mut warnings).unwrap();
        assert!(page.contains("Default: implied"));
    }

    #[test]
    fn test_tag_page_without_attributes_or_content() {
        let schema = extract_str("<!ELEMENT hr EMPTY>").unwrap();
        let mut registry = IdentifierRegistry::new();
        registry.assign("hr").unwrap();
        let resolver = CrossRefResolver::new(&schema, &registry);

        let mut warnings = Vec::new();
        let page = tag_page(schema.get("hr").unwrap(), &resolver, &mut warnings).unwrap();
        assert!(page.contains("The <hr> tag"));
        assert!(page.contains("   Purpose"));
        assert!(!page.contains("   Attributes"));
        assert!(!page.contains("   Content"));
    }
}
