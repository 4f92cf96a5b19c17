//! reStructuredText page assembly and output writing.
//!
//! Turns a [`SchemaModel`](dtddocs_schema::SchemaModel) into a set of
//! cross-linked rst pages: one page per tag (purpose box, attribute and
//! content link lists, one section per attribute) plus an index page with
//! a toctree over all tags. [`render_site`] produces the pages in memory;
//! [`write_site`] writes them to an output directory.
//!
//! Writing is destructive: the output directory is removed wholesale and
//! recreated on every run. Nothing is merged with prior contents.

mod page;
mod site;
mod writer;

pub use site::{EmitError, PageWarning, RenderedPage, RenderedSite, render_site};
pub use writer::write_site;
