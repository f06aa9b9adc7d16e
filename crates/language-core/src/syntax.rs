//! Arena-backed syntax tree handed out by [`crate::SyntaxTreeProvider`]s.
//!
//! Nodes live in a flat vector and point at their parent by [`NodeId`], so a
//! tree is a plain owned value with O(1) ascent and no reference cycles.

use crate::{ByteOffset, ByteRange};
use serde::{Deserialize, Serialize};

/// Stable index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How [`SyntaxTree::deepest_node_at`] breaks ties between siblings.
///
/// Offsets are cursor positions, so an offset equal to one node's end and
/// its next sibling's start touches both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundaryRule {
    /// Descend into the first child (in source order) touching the offset.
    #[default]
    Preceding,
    /// Descend into the last child touching the offset.
    Following,
}

/// A single node of a [`SyntaxTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: String,
    range: ByteRange,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SyntaxNode {
    /// Grammar-specific node kind, e.g. `class_declaration`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn range(&self) -> ByteRange {
        self.range
    }

    pub fn start_offset(&self) -> ByteOffset {
        ByteOffset::new(self.range.start)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// An immutable parse tree of one document snapshot.
///
/// Node `0` is the root. Children are stored in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    boundary: BoundaryRule,
}

impl SyntaxTree {
    /// Start building a tree whose root has the given kind and range.
    pub fn builder(root_kind: impl Into<String>, root_range: ByteRange) -> SyntaxTreeBuilder {
        SyntaxTreeBuilder::new(root_kind, root_range)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn boundary_rule(&self) -> BoundaryRule {
        self.boundary
    }

    /// The same tree with a different tie rule.
    pub fn with_boundary_rule(mut self, boundary: BoundaryRule) -> Self {
        self.boundary = boundary;
        self
    }

    /// Access a node. Ids are only ever produced by this tree, so lookups
    /// cannot miss.
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk from `id` up to the root, `id` included.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// Find the deepest node covering `offset`.
    ///
    /// Coverage uses the closed interval `[start, end]` of each node. The
    /// root is always returned for offsets it does not touch, which keeps
    /// the lookup total. Siblings sharing a boundary are resolved with the
    /// tree's [`BoundaryRule`].
    pub fn deepest_node_at(&self, offset: ByteOffset) -> NodeId {
        let offset = offset.get();
        let mut current = self.root();

        loop {
            let mut touching = self
                .node(current)
                .children
                .iter()
                .copied()
                .filter(|child| self.node(*child).range.touches(offset));

            let next = match self.boundary {
                BoundaryRule::Preceding => touching.next(),
                BoundaryRule::Following => touching.last(),
            };

            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }
}

/// Iterator returned by [`SyntaxTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Incremental constructor for [`SyntaxTree`].
///
/// Children must be pushed after their parent and in source order.
#[derive(Debug)]
pub struct SyntaxTreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTreeBuilder {
    pub fn new(root_kind: impl Into<String>, root_range: ByteRange) -> Self {
        Self {
            nodes: vec![SyntaxNode {
                kind: root_kind.into(),
                range: root_range,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child of `parent` and return its id.
    pub fn push(&mut self, parent: NodeId, kind: impl Into<String>, range: ByteRange) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind: kind.into(),
            range,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn finish(self) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            boundary: BoundaryRule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // <?php $a = $b;
    fn assignment_tree(boundary: BoundaryRule) -> SyntaxTree {
        let mut builder = SyntaxTree::builder("program", ByteRange::new(0, 14));
        let root = builder.root();
        builder.push(root, "php_tag", ByteRange::new(0, 5));
        let statement = builder.push(root, "expression_statement", ByteRange::new(6, 14));
        let assignment = builder.push(statement, "assignment_expression", ByteRange::new(6, 13));
        builder.push(assignment, "variable_name", ByteRange::new(6, 8));
        builder.push(assignment, "variable_name", ByteRange::new(11, 13));
        builder.finish().with_boundary_rule(boundary)
    }

    #[test]
    fn test_deepest_node_inside_leaf() {
        let tree = assignment_tree(BoundaryRule::Preceding);
        let node = tree.deepest_node_at(ByteOffset::new(12));
        assert_eq!(tree.node(node).kind(), "variable_name");
        assert_eq!(tree.node(node).start_offset(), ByteOffset::new(11));
    }

    #[test]
    fn test_deepest_node_between_children_is_parent() {
        let tree = assignment_tree(BoundaryRule::Preceding);
        let node = tree.deepest_node_at(ByteOffset::new(9));
        assert_eq!(tree.node(node).kind(), "assignment_expression");
    }

    #[test]
    fn test_offset_outside_every_child_is_root() {
        let tree = assignment_tree(BoundaryRule::Preceding);
        assert_eq!(tree.deepest_node_at(ByteOffset::new(40)), tree.root());
    }

    #[test]
    fn test_boundary_rule_preceding_and_following() {
        let mut builder = SyntaxTree::builder("root", ByteRange::new(0, 6));
        let root = builder.root();
        builder.push(root, "left", ByteRange::new(0, 3));
        builder.push(root, "right", ByteRange::new(3, 6));
        let preceding = builder.finish();

        let node = preceding.deepest_node_at(ByteOffset::new(3));
        assert_eq!(preceding.node(node).kind(), "left");

        let following = preceding.with_boundary_rule(BoundaryRule::Following);
        let node = following.deepest_node_at(ByteOffset::new(3));
        assert_eq!(following.node(node).kind(), "right");
    }

    #[test]
    fn test_ancestors_are_inclusive_and_end_at_root() {
        let tree = assignment_tree(BoundaryRule::Preceding);
        let leaf = tree.deepest_node_at(ByteOffset::new(7));
        let kinds: Vec<_> = tree
            .ancestors(leaf)
            .map(|id| tree.node(id).kind().to_string())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "variable_name",
                "assignment_expression",
                "expression_statement",
                "program"
            ]
        );
        assert_eq!(tree.parent(tree.root()), None);
    }
}
