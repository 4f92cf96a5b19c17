//! Schema model extraction.
//!
//! Walks the declared elements of a parsed [`Dtd`] in declaration order,
//! flattens each content-particle tree and carries the attribute table
//! over unchanged. The particle trees are not retained past this point.

use crate::model::{ElementModel, SchemaModel};
use crate::parser::{Dtd, ParseError, parse};
use crate::particle::flatten;

/// Build the [`SchemaModel`] from a parsed DTD.
///
/// Element iteration order is preserved; nothing is re-sorted.
#[must_use]
pub fn extract(dtd: &Dtd) -> SchemaModel {
    let mut schema = SchemaModel::new();
    for element in &dtd.elements {
        let contents = flatten(element.content.as_ref());
        tracing::debug!(
            element = %element.name,
            contents = contents.len(),
            attributes = element.attributes.len(),
            "extracted element"
        );
        schema.insert(ElementModel {
            name: element.name.clone(),
            contents,
            attributes: element.attributes.clone(),
        });
    }
    schema
}

/// Parse DTD source and extract its schema model in one step.
///
/// A source that cannot be parsed as a DTD at all is a fatal
/// [`ParseError`]; there is no partial result.
pub fn extract_str(source: &str) -> Result<SchemaModel, ParseError> {
    Ok(extract(&parse(source)?))
}
