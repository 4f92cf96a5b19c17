//! Output directory writing.

use std::fs;
use std::path::Path;

use crate::site::{EmitError, RenderedSite};

/// Write all rendered pages into `out_dir`.
///
/// Destructive: an existing output directory is removed wholesale first,
/// so stale pages from earlier runs never survive.
pub fn write_site(site: &RenderedSite, out_dir: &Path) -> Result<(), EmitError> {
    if out_dir.exists() {
        tracing::info!(dir = %out_dir.display(), "removing existing output directory");
        fs::remove_dir_all(out_dir)?;
    }
    fs::create_dir_all(out_dir)?;

    for page in &site.pages {
        fs::write(out_dir.join(&page.file_name), &page.content)?;
    }
    tracing::info!(
        pages = site.pages.len(),
        dir = %out_dir.display(),
        "wrote documentation pages"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::site::RenderedPage;

    fn site_with(pages: &[(&str, &str)]) -> RenderedSite {
        RenderedSite {
            pages: pages
                .iter()
                .map(|(file_name, content)| RenderedPage {
                    file_name: (*file_name).to_owned(),
                    content: (*content).to_owned(),
                })
                .collect(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_writes_all_pages() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("dtd-docs");
        let site = site_with(&[("index.rst", "index"), ("book.rst", "book")]);

        write_site(&site, &out).unwrap();

        assert_eq!(fs::read_to_string(out.join("index.rst")).unwrap(), "index");
        assert_eq!(fs::read_to_string(out.join("book.rst")).unwrap(), "book");
    }

    #[test]
    fn test_rerun_removes_stale_pages() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("dtd-docs");

        write_site(&site_with(&[("stale.rst", "old")]), &out).unwrap();
        write_site(&site_with(&[("fresh.rst", "new")]), &out).unwrap();

        assert!(!out.join("stale.rst").exists());
        assert_eq!(fs::read_to_string(out.join("fresh.rst")).unwrap(), "new");
    }
}
