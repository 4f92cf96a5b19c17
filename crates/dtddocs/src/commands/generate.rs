//! `generate` command: render documentation pages from a DTD.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use dtddocs_schema::extract_str;
use dtddocs_site::{render_site, write_site};

use crate::error::CliError;
use crate::output::Output;

/// Default output directory name, created next to the DTD file.
const DEFAULT_OUT_DIR: &str = "dtd-docs";

#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to the DTD file.
    pub(crate) dtd: PathBuf,

    /// Output directory (removed and recreated on every run).
    ///
    /// Defaults to a `dtd-docs` directory next to the DTD file.
    #[arg(short, long)]
    pub(crate) out_dir: Option<PathBuf>,

    /// Fail the run when a content model references an undeclared element.
    #[arg(long)]
    pub(crate) strict: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl GenerateArgs {
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        let source = fs::read_to_string(&self.dtd)?;
        let schema = extract_str(&source)?;
        output.info(&format!(
            "DTD \"{}\" successfully read ({} tags).",
            self.dtd.display(),
            schema.len()
        ));

        let site = render_site(&schema)?;
        for warning in &site.warnings {
            output.warning(&format!(
                "Warning: <{}> references undeclared element `{}`.",
                warning.tag, warning.reference
            ));
        }
        if self.strict && !site.warnings.is_empty() {
            return Err(CliError::Validation(format!(
                "{} unresolved content reference(s)",
                site.warnings.len()
            )));
        }

        let out_dir = self.out_dir.clone().unwrap_or_else(|| {
            self.dtd
                .parent()
                .map_or_else(|| PathBuf::from(DEFAULT_OUT_DIR), |dir| dir.join(DEFAULT_OUT_DIR))
        });
        write_site(&site, &out_dir)?;
        output.success(&format!(
            "{} pages written to \"{}\".",
            site.pages.len(),
            out_dir.display()
        ));
        Ok(())
    }
}
