//! CLI subcommands.

mod dump;
mod generate;

pub(crate) use dump::DumpArgs;
pub(crate) use generate::GenerateArgs;
