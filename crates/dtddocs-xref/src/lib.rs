//! Output identifier registry and cross-reference resolution.
//!
//! [`IdentifierRegistry`] assigns stable, collision-free, case-insensitive
//! identifiers to display strings; the identifiers double as output file
//! names and hyperlink targets. [`CrossRefResolver`] turns content-model
//! and attribute references into `(display text, target)` pairs for the
//! page emitter.

mod registry;
mod resolver;

pub use registry::{IdentifierRegistry, RegistryError};
pub use resolver::{CrossRefResolver, Link, XrefError};
