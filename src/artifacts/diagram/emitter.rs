//! Object graph to PlantUML text
//!
//! ```text
//! @startuml
//! skinparam defaultFontName Courier
//! "<parent-label>" --> "<child-label>"
//! ...
//! @enduml
//! ```
//!
//! Edges are listed in pre-order: for each child in order, the edge to it, then every
//! edge below it, then the next sibling.

use crate::artifacts::graph::node::GraphNode;

pub const DIAGRAM_START: &str = "@startuml";
pub const DIAGRAM_SKINPARAM: &str = "skinparam defaultFontName Courier";
pub const DIAGRAM_END: &str = "@enduml";

/// Render a label for use inside a quoted PlantUML name
///
/// Line breaks become the two characters `\n` and double quotes become the
/// `<U+0022>` unicode escape, which would otherwise close the quoted name.
pub fn format_label(label: &str) -> String {
    label.replace('"', "<U+0022>").replace('\n', "\\n")
}

/// PlantUML text for a graph, lines joined with `\n` and no trailing newline
pub fn emit(root: &GraphNode) -> String {
    let mut lines = vec![DIAGRAM_START.to_string(), DIAGRAM_SKINPARAM.to_string()];

    let mut stack = vec![(root, root.children().iter())];
    while let Some((parent, children)) = stack.last_mut() {
        match children.next() {
            Some(child) => {
                lines.push(format!(
                    "\"{}\" --> \"{}\"",
                    format_label(parent.label()),
                    format_label(child.label())
                ));
                stack.push((child, child.children().iter()));
            }
            None => {
                stack.pop();
            }
        }
    }

    lines.push(DIAGRAM_END.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(label: &str, children: Vec<GraphNode>) -> GraphNode {
        let mut node = GraphNode::leaf(label.to_string());
        for child in children {
            node.push_child(child);
        }
        node
    }

    #[test]
    fn test_single_node_has_no_edges() {
        assert_eq!(
            emit(&node("[blob]\nabcdef", vec![])),
            "@startuml\nskinparam defaultFontName Courier\n@enduml"
        );
    }

    #[test]
    fn test_two_levels_emit_one_edge() {
        let root = node("[tree]\n111111", vec![node("[blob]\n222222\\na.txt", vec![])]);

        assert_eq!(
            emit(&root),
            "@startuml\n\
             skinparam defaultFontName Courier\n\
             \"[tree]\\n111111\" --> \"[blob]\\n222222\\na.txt\"\n\
             @enduml"
        );
    }

    #[test]
    fn test_edges_descend_before_next_sibling() {
        let root = node(
            "r",
            vec![
                node("a", vec![node("a1", vec![]), node("a2", vec![])]),
                node("b", vec![node("b1", vec![])]),
            ],
        );

        let text = emit(&root);
        let edges = text.lines().skip(2).take(5).collect::<Vec<_>>();

        assert_eq!(
            edges,
            vec![
                "\"r\" --> \"a\"",
                "\"a\" --> \"a1\"",
                "\"a\" --> \"a2\"",
                "\"r\" --> \"b\"",
                "\"b\" --> \"b1\"",
            ]
        );
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_quotes_in_labels_are_escaped() {
        let root = node("[tree]\n111111", vec![node("[blob]\n222222\\nsay \"hi\".txt", vec![])]);

        assert_eq!(
            emit(&root).lines().nth(2),
            Some("\"[tree]\\n111111\" --> \"[blob]\\n222222\\nsay <U+0022>hi<U+0022>.txt\"")
        );
    }

    #[test]
    fn test_deep_graph_emits_iteratively() {
        let mut root = GraphNode::leaf("0".to_string());
        for depth in 1..50_000 {
            let mut parent = GraphNode::leaf(depth.to_string());
            parent.push_child(root);
            root = parent;
        }

        assert_eq!(emit(&root).lines().count(), 49_999 + 3);
    }
}
