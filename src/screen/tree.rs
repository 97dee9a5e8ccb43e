//! Arena representation of an accessibility tree snapshot.
//!
//! Nodes are addressed by index, so duplicated or cyclic child references
//! coming from caching layers are harmless: traversals keep a visited set
//! sized to the arena.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// On-screen bounding rectangle in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (i32, i32) {
        (self.left + self.width() / 2, self.top + self.height() / 2)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Accessible label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    pub visible: bool,
    pub bounds: Rect,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
}

impl UiNode {
    /// A visible node with no text, label or id.
    pub fn container() -> Self {
        Self {
            visible: true,
            ..Default::default()
        }
    }

    pub fn labelled(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::container()
        }
    }

    pub fn with_content_desc(mut self, desc: impl Into<String>) -> Self {
        self.content_desc = Some(desc.into());
        self
    }

    pub fn with_view_id(mut self, id: impl Into<String>) -> Self {
        self.view_id = Some(id.into());
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn text_str(&self) -> Option<&str> {
        non_blank(self.text.as_deref())
    }

    pub fn content_desc_str(&self) -> Option<&str> {
        non_blank(self.content_desc.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Immutable snapshot with exact-match indexes over text and view id.
#[derive(Debug, Clone, Default)]
pub struct UiTree {
    nodes: Vec<UiNode>,
    root: Option<NodeId>,
    text_index: HashMap<String, Vec<NodeId>>,
    id_index: HashMap<String, Vec<NodeId>>,
}

impl UiTree {
    pub fn new(nodes: Vec<UiNode>, root: Option<NodeId>) -> Self {
        let mut text_index: HashMap<String, Vec<NodeId>> = HashMap::new();
        let mut id_index: HashMap<String, Vec<NodeId>> = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            if let Some(text) = node.text_str() {
                text_index.entry(text.to_string()).or_default().push(NodeId(i));
            }
            if let Some(id) = node.view_id.as_deref() {
                id_index.entry(id.to_string()).or_default().push(NodeId(i));
            }
        }
        let root = root.filter(|r| r.0 < nodes.len());
        Self {
            nodes,
            root,
            text_index,
            id_index,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&UiNode> {
        self.nodes.get(id.0)
    }

    /// Child references that point inside the arena.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|c| c.0 < self.nodes.len())
    }

    /// Indexed lookup: exact (case-sensitive) match on trimmed text.
    pub fn find_by_text(&self, text: &str) -> &[NodeId] {
        self.text_index
            .get(text.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Indexed lookup on the view identifier.
    pub fn find_by_view_id(&self, id: &str) -> &[NodeId] {
        self.id_index
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Incremental construction, mostly for providers and tests.
#[derive(Debug, Default)]
pub struct UiTreeBuilder {
    nodes: Vec<UiNode>,
}

impl UiTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: UiNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Adds `node` as the last child of `parent`.
    pub fn child(&mut self, parent: NodeId, node: UiNode) -> NodeId {
        let id = self.add(node);
        self.link(parent, id);
        id
    }

    /// Adds an edge; duplicates and back-edges are allowed.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(child);
        }
    }

    pub fn build(self, root: NodeId) -> UiTree {
        UiTree::new(self.nodes, Some(root))
    }
}
