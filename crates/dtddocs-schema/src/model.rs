//! The extracted schema model.

use std::collections::HashMap;

use crate::attribute::AttributeSpec;

/// One declared tag: its flattened content list and attribute table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElementModel {
    /// Tag name, unique within the schema.
    pub name: String,
    /// Referenced element names in declared reading order. Duplicates are
    /// kept and nothing is sorted.
    pub contents: Vec<String>,
    /// Attributes in declaration order.
    pub attributes: Vec<AttributeSpec>,
}

/// All declared tags, in schema-declaration order.
///
/// The first declared tag is treated as the "root tag" for the index page
/// title. This is positional only; nothing verifies it is the actual
/// document root of instances using the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    elements: Vec<ElementModel>,
    index: HashMap<String, usize>,
}

impl SchemaModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. Insertion order is preserved by [`Self::iter`].
    ///
    /// The DTD parser rejects duplicate element declarations, so a name
    /// can only be inserted once; a repeated insert replaces the index
    /// entry but keeps both positional entries out of reach of lookups.
    pub(crate) fn insert(&mut self, element: ElementModel) {
        self.index.insert(element.name.clone(), self.elements.len());
        self.elements.push(element);
    }

    /// Look up a tag by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ElementModel> {
        self.index.get(name).map(|&idx| &self.elements[idx])
    }

    /// Whether a tag with this name is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Tags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementModel> {
        self.elements.iter()
    }

    /// The first-declared tag, used for the index page title.
    #[must_use]
    pub fn root_tag(&self) -> Option<&str> {
        self.elements.first().map(|element| element.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> IntoIterator for &'a SchemaModel {
    type Item = &'a ElementModel;
    type IntoIter = std::slice::Iter<'a, ElementModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SchemaModel {
    /// Serializes as a map from tag name to element, preserving
    /// declaration order.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.elements.len()))?;
        for element in &self.elements {
            map.serialize_entry(&element.name, element)?;
        }
        map.end()
    }
}
