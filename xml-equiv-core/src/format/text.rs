use crate::equiv::Comparison;
use crate::tree::XmlNode;

/// Format a comparison result as plain text.
pub fn format_text(comparison: &Comparison<'_>) -> String {
    let Some(mismatch) = comparison.mismatch() else {
        return "= equivalent".to_string();
    };

    let mut lines = vec![
        format!("! not equivalent at {} (node #{})", mismatch.path, mismatch.position),
        format!("  reason:   {}", mismatch.reason),
    ];
    lines.push(format!("  expected: {}", describe(mismatch.expected)));
    lines.push(format!("  actual:   {}", describe(mismatch.actual)));
    lines.join("\n")
}

/// Format a one-line verdict.
pub fn format_summary(comparison: &Comparison<'_>) -> String {
    match comparison.mismatch() {
        None => "equivalent=true".to_string(),
        Some(mismatch) => format!(
            "equivalent=false position={} path={}",
            mismatch.position, mismatch.path
        ),
    }
}

/// Render an outline of a tree with a configurable max depth.
pub fn render_tree(node: &XmlNode, max_depth: usize) -> String {
    let mut out = String::new();
    render_node(node, 0, max_depth, &mut out);
    out
}

fn render_node(node: &XmlNode, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{}{}\n", indent, node.label()));

    if depth >= max_depth {
        return;
    }

    for child in &node.children {
        render_node(child, depth + 1, max_depth, out);
    }
}

fn describe(node: Option<&XmlNode>) -> String {
    node.map_or_else(|| "(none)".to_string(), XmlNode::label)
}
