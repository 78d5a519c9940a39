//! Resolution of an object into a graph of everything reachable from it
//!
//! The walk is depth-first and uses an explicit stack of frames, so the length of a
//! commit chain is limited by memory rather than by the thread's stack. Children are
//! visited in object order: tree entries as stored, and for commits the tree first,
//! then each parent in header order.

use crate::areas::database::ObjectLocator;
use crate::artifacts::graph::node::GraphNode;
use crate::artifacts::objects::error::ObjectError;
use crate::artifacts::objects::object::ParsedObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// How objects reachable along several paths are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkPolicy {
    /// Expand an object every time it is reached; the result is a pure tree
    #[default]
    Expand,
    /// Expand an object the first time only; later references become leaves
    Dedup,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    pub policy: WalkPolicy,
    /// Deepest allowed node, the starting object being at depth 0
    pub max_depth: Option<usize>,
}

/// An object whose children are still being resolved
struct Frame {
    oid: ObjectId,
    node: GraphNode,
    pending: std::vec::IntoIter<(ObjectId, Option<String>)>,
}

pub struct GraphWalker<'l, L: ObjectLocator + ?Sized> {
    locator: &'l L,
    options: WalkOptions,
}

impl<'l, L: ObjectLocator + ?Sized> GraphWalker<'l, L> {
    pub fn new(locator: &'l L, options: WalkOptions) -> Self {
        GraphWalker { locator, options }
    }

    /// Build the graph of every object reachable from `oid`
    ///
    /// Any object that is missing, corrupt or malformed aborts the whole walk.
    pub fn resolve(&self, oid: &ObjectId) -> Result<GraphNode, ObjectError> {
        let mut seen: HashMap<ObjectId, ObjectType> = HashMap::new();
        let mut on_path: HashSet<ObjectId> = HashSet::new();

        let mut current = self.open(oid, None, &mut seen)?;
        let mut ancestors: Vec<Frame> = Vec::new();
        on_path.insert(oid.clone());
        let mut resolved = 1usize;

        let root = loop {
            let Some((child_oid, entry_name)) = current.pending.next() else {
                on_path.remove(&current.oid);
                match ancestors.pop() {
                    Some(parent) => {
                        let done = std::mem::replace(&mut current, parent);
                        current.node.push_child(done.node);
                        continue;
                    }
                    None => break current.node,
                }
            };

            if on_path.contains(&child_oid) {
                return Err(ObjectError::Cycle { oid: child_oid });
            }
            if let Some(limit) = self.options.max_depth {
                if ancestors.len() + 1 > limit {
                    return Err(ObjectError::DepthExceeded {
                        oid: child_oid,
                        limit,
                    });
                }
            }

            let known = seen.get(&child_oid).copied();
            match (self.options.policy, known) {
                (WalkPolicy::Dedup, Some(object_type)) => current.node.push_child(GraphNode::leaf(
                    GraphNode::label_for(object_type, &child_oid, entry_name.as_deref()),
                )),
                _ => {
                    let child = self.open(&child_oid, entry_name.as_deref(), &mut seen)?;
                    on_path.insert(child_oid);
                    resolved += 1;
                    ancestors.push(std::mem::replace(&mut current, child));
                }
            }
        };

        info!(
            root = %oid,
            objects = resolved,
            distinct = seen.len(),
            "resolved object graph"
        );
        Ok(root)
    }

    fn open(
        &self,
        oid: &ObjectId,
        entry_name: Option<&str>,
        seen: &mut HashMap<ObjectId, ObjectType>,
    ) -> Result<Frame, ObjectError> {
        let (object_type, pending) = match self.locator.parse_object(oid)? {
            ParsedObject::Blob(_) => (ObjectType::Blob, Vec::new()),
            ParsedObject::Tree(tree) => (
                ObjectType::Tree,
                tree.into_entries()
                    .map(|entry| (entry.oid, Some(entry.name)))
                    .collect(),
            ),
            ParsedObject::Commit(commit) => (
                ObjectType::Commit,
                std::iter::once(commit.tree_oid())
                    .chain(commit.parents())
                    .map(|oid| (oid.clone(), None))
                    .collect(),
            ),
        };

        debug!(oid = %oid, %object_type, children = pending.len(), "resolved object");
        seen.insert(oid.clone(), object_type);

        Ok(Frame {
            oid: oid.clone(),
            node: GraphNode::leaf(GraphNode::label_for(object_type, oid, entry_name)),
            pending: pending.into_iter(),
        })
    }
}
