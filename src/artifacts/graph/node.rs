use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;

/// Number of hash characters shown in a node label
pub const LABEL_OID_LENGTH: usize = 6;

/// One resolved object in a walk
///
/// Nodes own their children; shared objects are represented by separate nodes
/// carrying the same label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    label: String,
    children: Vec<GraphNode>,
}

impl GraphNode {
    pub fn leaf(label: String) -> Self {
        GraphNode {
            label,
            children: Vec::new(),
        }
    }

    /// Label for an object: `[<type>]` and the hash prefix on separate lines,
    /// followed by a literal `\n` and the tree entry name when reached through a tree.
    pub fn label_for(object_type: ObjectType, oid: &ObjectId, entry_name: Option<&str>) -> String {
        let mut label = format!("[{}]\n{}", object_type, oid.prefix(LABEL_OID_LENGTH));
        if let Some(entry_name) = entry_name {
            label.push_str("\\n");
            label.push_str(entry_name);
        }
        label
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[GraphNode] {
        &self.children
    }

    pub fn push_child(&mut self, child: GraphNode) {
        self.children.push(child);
    }

    /// Total number of nodes, this one included
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl Drop for GraphNode {
    // long commit chains nest thousands of levels deep; the default drop would recurse
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}
