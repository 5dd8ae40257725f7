use colored::Colorize;
use xml_equiv_core::{format_summary, format_text, render_tree, Comparison, XmlNode};

use crate::doctype::DocTypeReport;

/// Render a comparison verdict for terminal output.
pub fn render_verdict(comparison: &Comparison<'_>) -> String {
    let raw = format_text(comparison);
    let mut out = Vec::new();

    for line in raw.lines() {
        let colored = if line.starts_with('=') {
            line.green().to_string()
        } else if line.starts_with('!') {
            line.red().bold().to_string()
        } else if line.trim_start().starts_with("reason:") {
            line.yellow().to_string()
        } else {
            line.to_string()
        };
        out.push(colored);
    }

    out.join("\n")
}

/// Render the one-line verdict.
pub fn render_summary(comparison: &Comparison<'_>) -> String {
    format_summary(comparison).cyan().to_string()
}

/// Render outlines of both documents, one after the other.
pub fn render_trees(expected: &XmlNode, actual: &XmlNode, max_depth: usize) -> String {
    let mut out = Vec::new();
    out.push("expected tree".bold().to_string());
    out.push(render_tree(expected, max_depth).trim_end().to_string());
    out.push(String::new());
    out.push("actual tree".bold().to_string());
    out.push(render_tree(actual, max_depth).trim_end().to_string());
    out.join("\n")
}

/// Render DOCTYPE identifiers and declarations.
pub fn render_doctype(report: &DocTypeReport) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "doctype name={} public={} system={}",
        report.name,
        show(report.public.as_deref()),
        show(report.system.as_deref())
    ));

    out.push(format!("notations ({})", report.notations.len()));
    for notation in &report.notations {
        out.push(format!(
            "- {} public={} system={}",
            notation.name,
            show(notation.public.as_deref()),
            show(notation.system.as_deref())
        ));
    }

    out.push(format!("entities ({})", report.entities.len()));
    for entity in &report.entities {
        let name = if entity.parameter {
            format!("%{}", entity.name)
        } else {
            entity.name.clone()
        };
        let mut line = format!("- {name}");
        if let Some(value) = &entity.value {
            line.push_str(&format!(" value={value:?}"));
        }
        if let Some(public) = &entity.public {
            line.push_str(&format!(" public={public}"));
        }
        if let Some(system) = &entity.system {
            line.push_str(&format!(" system={system}"));
        }
        if let Some(ndata) = &entity.ndata {
            line.push_str(&format!(" ndata={ndata}"));
        }
        out.push(line);
    }

    out.join("\n")
}

fn show(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[cfg(test)]
mod tests {
    use xml_equiv_core::{compare, parse_str};

    use super::{render_doctype, render_summary, render_trees, render_verdict};
    use crate::doctype::build_doctype_report;

    #[test]
    fn verdict_lines_keep_their_text() {
        colored::control::set_override(false);
        let expected = parse_str("<a>1</a>").expect("parse");
        let actual = parse_str("<a>2</a>").expect("parse");
        let comparison = compare(&expected, &actual).expect("compare");

        let out = render_verdict(&comparison);
        assert!(out.starts_with("! not equivalent at /a/text() (node #2)"));
        assert!(out.contains("reason:   text differs"));
        assert_eq!(
            render_summary(&comparison),
            "equivalent=false position=2 path=/a/text()"
        );
    }

    #[test]
    fn trees_are_rendered_to_the_requested_depth() {
        colored::control::set_override(false);
        let expected = parse_str("<a><b><c/></b></a>").expect("parse");
        let actual = parse_str("<a/>").expect("parse");

        let out = render_trees(&expected, &actual, 2);
        assert!(out.contains("expected tree\n#document\n  <a>\n    <b>"));
        assert!(!out.contains("<c>"));
        assert!(out.ends_with("actual tree\n#document\n  <a>"));
    }

    #[test]
    fn doctype_listing_marks_parameter_entities() {
        let doc = parse_str(r#"<!DOCTYPE r SYSTEM "r.dtd" [<!ENTITY % p "x">]><r/>"#).expect("parse");
        let report = build_doctype_report(&doc)
            .expect("report")
            .expect("doctype present");

        let out = render_doctype(&report);
        assert!(out.contains("doctype name=r public=- system=r.dtd"));
        assert!(out.contains("notations (0)"));
        assert!(out.contains("- %p value=\"x\""));
    }
}
