use std::path::PathBuf;

use clap::Parser;
use xml_equiv::config::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "xml-equiv")]
#[command(about = "Check XML documents for semantic equivalence")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compare two XML files; exits non-zero when they are not equivalent.
    Compare(CompareArgs),
    /// Show the parsed structure of a single XML file.
    Inspect(InspectArgs),
    /// Show the DOCTYPE identifiers, notations and entities of an XML file.
    Doctype(DoctypeArgs),
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    pub expected: PathBuf,
    pub actual: PathBuf,
    /// Overrides `report.format` from the config file.
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,
    /// Print only the one-line verdict.
    #[arg(short, long)]
    pub quiet: bool,
    /// Do not print document outlines after a mismatch.
    #[arg(long)]
    pub no_trees: bool,
    /// Config file to use instead of ./xml-equiv.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
}

#[derive(Parser, Debug)]
pub struct DoctypeArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}
