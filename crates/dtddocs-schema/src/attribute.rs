//! Attribute declaration types.
//!
//! Mirrors the standard DTD attribute-type vocabulary. Enumerated values
//! live inside the type variant, so a non-enumerated attribute cannot
//! carry values by construction.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Declared type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttributeType {
    CData,
    Id,
    IdRef,
    IdRefs,
    Entity,
    Entities,
    NmToken,
    NmTokens,
    /// `NOTATION (a | b)` - allowed notation names in declaration order.
    Notation(Vec<String>),
    /// `(a | b)` - enumerated literals in declaration order.
    Enumeration(Vec<String>),
}

impl AttributeType {
    /// Whether this is an enumerated kind (`NOTATION` or a plain
    /// enumeration).
    #[must_use]
    pub fn is_enumerated(&self) -> bool {
        matches!(self, Self::Notation(_) | Self::Enumeration(_))
    }

    /// The enumerated literals, in declaration order.
    ///
    /// Empty for every non-enumerated kind.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Notation(values) | Self::Enumeration(values) => values,
            _ => &[],
        }
    }

    /// Lowercase type label as reported in generated documentation.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CData => "cdata",
            Self::Id => "id",
            Self::IdRef => "idref",
            Self::IdRefs => "idrefs",
            Self::Entity => "entity",
            Self::Entities => "entities",
            Self::NmToken => "nmtoken",
            Self::NmTokens => "nmtokens",
            Self::Notation(_) => "notation",
            Self::Enumeration(_) => "enumeration",
        }
    }
}

/// Default disposition of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttributeDefault {
    /// `#REQUIRED` - must be given on every instance.
    Required,
    /// `#IMPLIED` - optional, no default.
    Implied,
    /// `#FIXED "v"` - fixed to the given literal.
    Fixed(String),
    /// A plain default literal with no `#` keyword.
    Value(String),
}

impl AttributeDefault {
    /// Lowercase default-kind label (`required`, `implied`, `fixed`,
    /// `none`).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Implied => "implied",
            Self::Fixed(_) => "fixed",
            Self::Value(_) => "none",
        }
    }

    /// The default literal, when one was declared.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Fixed(value) | Self::Value(value) => Some(value),
            Self::Required | Self::Implied => None,
        }
    }
}

/// One declared attribute of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AttributeSpec {
    /// Attribute name as declared.
    pub name: String,
    /// Declared type, carrying enumerated values when applicable.
    pub attr_type: AttributeType,
    /// Default disposition, carrying the default literal when declared.
    pub default: AttributeDefault,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_values_empty_for_non_enumerated() {
        assert_eq!(AttributeType::CData.values(), &[] as &[String]);
        assert_eq!(AttributeType::Id.values(), &[] as &[String]);
        assert!(!AttributeType::NmTokens.is_enumerated());
    }

    #[test]
    fn test_values_for_enumeration() {
        let ty = AttributeType::Enumeration(vec!["a".to_owned(), "b".to_owned()]);
        assert!(ty.is_enumerated());
        assert_eq!(ty.values(), ["a", "b"]);
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(AttributeDefault::Required.label(), "required");
        assert_eq!(AttributeDefault::Implied.label(), "implied");
        assert_eq!(AttributeDefault::Fixed("v".to_owned()).label(), "fixed");
        assert_eq!(AttributeDefault::Value("v".to_owned()).label(), "none");
    }

    #[test]
    fn test_default_value() {
        assert_eq!(AttributeDefault::Implied.value(), None);
        assert_eq!(AttributeDefault::Fixed("v".to_owned()).value(), Some("v"));
    }
}
