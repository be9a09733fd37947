//! Graphviz DOT export of a forest.

use std::fmt::Write;

use crate::segment::PipelineSegment;
use crate::tree::PipeTree;

// Characters with meaning inside a record label.
fn escape_record(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' | '}' | '|' | '<' | '>' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the forest as a directed graph, one `subgraph G_n` per tree.
///
/// Each node label holds the segment name and the text returned by
/// `size_label` (typically the pipe size label). Edges run parent to child.
pub fn to_dot<'a, I, F>(forest: I, size_label: F) -> String
where
    I: IntoIterator<Item = &'a PipeTree>,
    F: FnMut(&PipelineSegment) -> String,
{
    to_dot_bounded(forest, 2, size_label)
}

/// [`to_dot`] visiting at most `budget_factor` × tree size nodes per tree.
pub fn to_dot_bounded<'a, I, F>(forest: I, budget_factor: usize, mut size_label: F) -> String
where
    I: IntoIterator<Item = &'a PipeTree>,
    F: FnMut(&PipelineSegment) -> String,
{
    let mut out = String::from("digraph G {\n");
    for (n, tree) in forest.into_iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "subgraph G_{n} {{");
        out.push_str("node [shape=record, fontname=\"monospace bold\"];\n");

        let traversal = tree.depth_first(tree.len().saturating_mul(budget_factor));
        for &idx in &traversal.order {
            let seg = tree.segment(idx);
            let _ = writeln!(
                out,
                "seg{} [label=\"{{{}\\n{}}}\"];",
                seg.id,
                escape_record(&seg.name),
                escape_record(&size_label(seg))
            );
        }
        for &idx in &traversal.order {
            for &child in tree.children(idx) {
                let _ = writeln!(
                    out,
                    "seg{} -> seg{};",
                    tree.segment(idx).id,
                    tree.segment(child).id
                );
            }
        }
        out.push_str("}\n");
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_record_syntax() {
        assert_eq!(escape_record("a|b"), "a\\|b");
        assert_eq!(escape_record("{x}"), "\\{x\\}");
        assert_eq!(escape_record("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_record("DN100-ø114.3/250"), "DN100-ø114.3/250");
    }
}
