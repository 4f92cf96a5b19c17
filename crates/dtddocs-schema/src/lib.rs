//! DTD declaration parsing and schema model extraction.
//!
//! This crate turns a Document Type Definition into a [`SchemaModel`]:
//! an ordered map from declared tag name to its flattened content list
//! and attribute table. It provides:
//!
//! - [`parse`]: parse `<!ELEMENT>`, `<!ATTLIST>` and parameter-entity
//!   declarations into a [`Dtd`]
//! - [`flatten`]: flatten a content-particle tree into the ordered
//!   sequence of referenced element names
//! - [`extract`] / [`extract_str`]: build the [`SchemaModel`] consumed
//!   by the cross-reference and page-emission crates
//!
//! # Example
//!
//! ```
//! use dtddocs_schema::extract_str;
//!
//! let schema = extract_str(
//!     r#"<!ELEMENT book (title, chapter+)>
//!        <!ELEMENT title (#PCDATA)>
//!        <!ELEMENT chapter (#PCDATA)>
//!        <!ATTLIST book lang CDATA #IMPLIED>"#,
//! )?;
//!
//! assert_eq!(schema.root_tag(), Some("book"));
//! assert_eq!(schema.get("book").unwrap().contents, ["title", "chapter"]);
//! # Ok::<(), dtddocs_schema::ParseError>(())
//! ```

mod attribute;
mod extractor;
mod model;
mod parser;
mod particle;

pub use attribute::{AttributeDefault, AttributeSpec, AttributeType};
pub use extractor::{extract, extract_str};
pub use model::{ElementModel, SchemaModel};
pub use parser::{Dtd, ElementDecl, ParseError, parse};
pub use particle::{ContentParticle, Occurrence, ParticleKind, flatten};
