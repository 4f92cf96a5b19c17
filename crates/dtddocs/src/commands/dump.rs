//! `dump` command: print the extracted schema model as JSON.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use dtddocs_schema::extract_str;

use crate::error::CliError;

#[derive(Args)]
pub(crate) struct DumpArgs {
    /// Path to the DTD file.
    pub(crate) dtd: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub(crate) pretty: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl DumpArgs {
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let source = fs::read_to_string(&self.dtd)?;
        let schema = extract_str(&source)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&schema)?
        } else {
            serde_json::to_string(&schema)?
        };

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
