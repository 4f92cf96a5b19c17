//! Content-particle trees and the content model flattener.
//!
//! A DTD content model such as `(title, (chapter | appendix)+)` is a
//! recursive grammar expression. The parser materializes it as a binary
//! tree of [`ContentParticle`] nodes; [`flatten`] walks that tree and
//! yields the referenced element names in declared reading order.

/// Occurrence indicator attached to a content particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occurrence {
    /// Exactly once (no indicator).
    #[default]
    Once,
    /// `?` - zero or one.
    Optional,
    /// `*` - zero or more.
    ZeroOrMore,
    /// `+` - one or more.
    OneOrMore,
}

impl Occurrence {
    /// The indicator as it appears in DTD source (`""`, `"?"`, `"*"`, `"+"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Once => "",
            Self::Optional => "?",
            Self::ZeroOrMore => "*",
            Self::OneOrMore => "+",
        }
    }
}

/// What a content particle represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// A reference to a declared element; `name` is set.
    Element,
    /// `#PCDATA` in a mixed content model; `name` is absent.
    Pcdata,
    /// A `,`-separated group; children hang off `left`/`right`.
    Sequence,
    /// A `|`-separated group; children hang off `left`/`right`.
    Choice,
}

/// One node of a content-model expression tree.
///
/// Groups with more than two members are right-folded into nested binary
/// nodes, so `(a, b, c)` becomes `seq(a, seq(b, c))`. A node carrying a
/// `name` may still have children; traversal must visit the name and both
/// children regardless of kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentParticle {
    /// Particle kind (element reference, `#PCDATA`, sequence, choice).
    pub kind: ParticleKind,
    /// Occurrence indicator (`?`, `*`, `+` or none).
    pub occurrence: Occurrence,
    /// Referenced element name; set only on element leaves.
    pub name: Option<String>,
    /// First member of a group.
    pub left: Option<Box<ContentParticle>>,
    /// Remaining members of a group (right-folded).
    pub right: Option<Box<ContentParticle>>,
}

impl ContentParticle {
    /// An element-reference leaf.
    #[must_use]
    pub fn element(name: impl Into<String>, occurrence: Occurrence) -> Self {
        Self {
            kind: ParticleKind::Element,
            occurrence,
            name: Some(name.into()),
            left: None,
            right: None,
        }
    }

    /// A `#PCDATA` leaf.
    #[must_use]
    pub fn pcdata() -> Self {
        Self {
            kind: ParticleKind::Pcdata,
            occurrence: Occurrence::Once,
            name: None,
            left: None,
            right: None,
        }
    }

    /// An operator node joining two particles.
    #[must_use]
    pub fn group(
        kind: ParticleKind,
        occurrence: Occurrence,
        left: ContentParticle,
        right: ContentParticle,
    ) -> Self {
        Self {
            kind,
            occurrence,
            name: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }
}

/// Flatten a content-particle tree into the ordered sequence of referenced
/// element names.
///
/// Performs a pre-order traversal: the node's own name (if any) first, then
/// the left child, then the right child. Duplicates are kept and nothing is
/// sorted; the result is the declared reading order of child elements. An
/// absent tree (`EMPTY`/`ANY` content) yields an empty sequence.
///
/// Uses an explicit stack rather than recursion: the nesting depth of the
/// tree is controlled by the input schema.
#[must_use]
pub fn flatten(root: Option<&ContentParticle>) -> Vec<String> {
    let mut names = Vec::new();
    let Some(root) = root else {
        return names;
    };

    let mut stack = vec![root];
    while let Some(particle) = stack.pop() {
        if let Some(name) = &particle.name {
            names.push(name.clone());
        }
        // Right pushed first so left is visited first.
        if let Some(right) = particle.right.as_deref() {
            stack.push(right);
        }
        if let Some(left) = particle.left.as_deref() {
            stack.push(left);
        }
    }
    names
}
