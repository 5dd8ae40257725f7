use anyhow::{bail, Context, Result};
use clap::Parser;
use xml_equiv::config::{resolve_config, ReportFormat};
use xml_equiv::doctype::build_doctype_report;
use xml_equiv::report::{render_doctype, render_summary, render_trees, render_verdict};
use xml_equiv_core::{compare, format_json, parse_file, render_tree};

mod cli;

use cli::{Cli, Command, CompareArgs, DoctypeArgs, InspectArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compare(args) => run_compare(args),
        Command::Inspect(args) => run_inspect(args),
        Command::Doctype(args) => run_doctype(args),
    }
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref());
    if !config.report.color {
        colored::control::set_override(false);
    }

    let expected = parse_file(&args.expected)
        .with_context(|| format!("failed to parse {}", args.expected.display()))?;
    let actual = parse_file(&args.actual)
        .with_context(|| format!("failed to parse {}", args.actual.display()))?;

    let comparison = compare(&expected, &actual).with_context(|| {
        format!(
            "failed to compare {} with {}",
            args.expected.display(),
            args.actual.display()
        )
    })?;

    if args.quiet {
        println!("{}", render_summary(&comparison));
    } else {
        match args.format.unwrap_or(config.report.format) {
            ReportFormat::Text => {
                println!("{}", render_verdict(&comparison));
                if !comparison.is_equivalent() && config.report.show_trees && !args.no_trees {
                    println!();
                    println!(
                        "{}",
                        render_trees(&expected, &actual, config.report.tree_depth)
                    );
                }
            }
            ReportFormat::Json => println!("{}", format_json(&comparison)),
        }
    }

    if !comparison.is_equivalent() {
        bail!(
            "{} and {} are not equivalent",
            args.expected.display(),
            args.actual.display()
        );
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let node = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    print!("{}", render_tree(&node, args.depth));
    Ok(())
}

fn run_doctype(args: DoctypeArgs) -> Result<()> {
    let node = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    let report = build_doctype_report(&node)
        .with_context(|| format!("failed to read DOCTYPE of {}", args.file.display()))?;
    let Some(report) = report else {
        println!("doctype=none");
        return Ok(());
    };

    match args.format {
        ReportFormat::Text => println!("{}", render_doctype(&report)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
