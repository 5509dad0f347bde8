#![deny(missing_docs)]

//! # Traversal Guard
//!
//! Per-pass state that keeps recursive walks finite over cyclic graphs.
//!
//! `$ref` embeds a graph (with sharing and cycles) into a tree that is
//! acyclic in storage. Two mechanisms bound the walk:
//! - a handled-node set: each distinct node is processed at most once per
//!   pass;
//! - an ancestor stack: a node already on the current branch terminates the
//!   visit silently, contributing no error.

use crate::path::JsonPath;
use serde_json::Value;
use std::collections::HashSet;

/// Identity of one JSON node within a single pass.
///
/// Each pass runs over an immutable snapshot, so the address of the borrowed
/// node is a stable identity for the lifetime of the pass. Identities are
/// only compared, never dereferenced. Distinct textual occurrences are
/// distinct nodes; sharing arises exclusively by following `$ref`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Captures the identity of `value`.
    pub fn of(value: &Value) -> Self {
        NodeId(value as *const Value as usize)
    }
}

/// Per-pass record of node identities that were already fully processed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    handled: HashSet<NodeId>,
}

impl VisitedSet {
    /// True when `value` was already processed this pass; the caller must
    /// stop descending, contributing no errors. Otherwise records it and
    /// answers false.
    pub fn already_handled(&mut self, value: &Value) -> bool {
        !self.handled.insert(NodeId::of(value))
    }
}

/// Immutable traversal cursor: current location, ancestor identities, and
/// the document root used to resolve `$ref` targets.
///
/// Cursors are cheap snapshots: `descend` and friends return a child and
/// never mutate the parent. The handled-node set is deliberately *not* part
/// of the cursor: it is pass-global and threaded `&mut` through the
/// recursion.
#[derive(Debug, Clone)]
pub struct Context<'doc> {
    path: JsonPath,
    ancestors: Vec<NodeId>,
    root: &'doc Value,
}

impl<'doc> Context<'doc> {
    /// Root cursor for one pass over `root`.
    pub fn new(root: &'doc Value) -> Self {
        Context {
            path: JsonPath::new(),
            ancestors: Vec::new(),
            root,
        }
    }

    /// The document root, for resolving `$ref` pointers.
    pub fn root(&self) -> &'doc Value {
        self.root
    }

    /// The current location.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Child cursor: path extended by `key`, `node` pushed onto the ancestor
    /// stack.
    pub fn descend(&self, key: impl Into<String>, node: &Value) -> Context<'doc> {
        let mut child = self.clone();
        child.path.push(key);
        child.ancestors.push(NodeId::of(node));
        child
    }

    /// Child cursor extending only the path. Array elements keep their
    /// containing object as nearest ancestor.
    pub fn at(&self, key: impl Into<String>) -> Context<'doc> {
        let mut child = self.clone();
        child.path.push(key);
        child
    }

    /// Cursor for following a `$ref`: the location jumps to the resolved
    /// target while `node` (the referencing node) joins the ancestor stack.
    pub fn rebased(&self, path: JsonPath, node: &Value) -> Context<'doc> {
        let mut child = self.clone();
        child.path = path;
        child.ancestors.push(NodeId::of(node));
        child
    }

    /// True when `value` sits on the current ancestor stack.
    pub fn on_stack(&self, value: &Value) -> bool {
        self.ancestors.contains(&NodeId::of(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_already_handled_flips_on_second_visit() {
        let value = json!({ "type": "string" });
        let mut visited = VisitedSet::default();
        assert!(!visited.already_handled(&value));
        assert!(visited.already_handled(&value));
    }

    #[test]
    fn test_distinct_nodes_have_distinct_identities() {
        let document = json!({ "a": { "type": "string" }, "b": { "type": "string" } });
        let mut visited = VisitedSet::default();
        assert!(!visited.already_handled(&document["a"]));
        assert!(!visited.already_handled(&document["b"]));
    }

    #[test]
    fn test_descend_is_pure() {
        let root = json!({ "definitions": {} });
        let parent = Context::new(&root);
        let child = parent.descend("definitions", &root);
        assert_eq!(parent.path(), &JsonPath::new());
        assert_eq!(child.path(), &JsonPath::from_segments(["definitions"]));
        assert!(child.on_stack(&root));
        assert!(!parent.on_stack(&root));
    }

    #[test]
    fn test_rebased_replaces_path_and_tracks_referer() {
        let root = json!({ "definitions": { "a": {} } });
        let referer = json!({ "$ref": "#/definitions/a" });
        let cursor = Context::new(&root).descend("paths", &root);
        let jumped = cursor.rebased(JsonPath::from_segments(["definitions", "a"]), &referer);
        assert_eq!(jumped.path(), &JsonPath::from_segments(["definitions", "a"]));
        assert!(jumped.on_stack(&referer));
    }
}
