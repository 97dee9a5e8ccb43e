use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

use super::tree::{NodeId, Rect, UiNode, UiTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Text,
    Id,
    ContentDesc,
}

impl MatchKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(MatchKind::Text),
            "id" => Some(MatchKind::Id),
            "content_desc" => Some(MatchKind::ContentDesc),
            _ => None,
        }
    }
}

/// Target element as described by the remote model.
///
/// `by` is kept as free text: an unsupported kind is a locator miss, not a
/// malformed reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    pub by: String,
    pub value: String,
}

impl Selector {
    pub fn new(by: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            by: by.into(),
            value: value.into(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new("text", value)
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::new("id", value)
    }

    pub fn content_desc(value: impl Into<String>) -> Self {
        Self::new("content_desc", value)
    }

    pub fn kind(&self) -> Option<MatchKind> {
        MatchKind::from_name(&self.by)
    }
}

/// Finds the best visible node for `selector`.
pub fn locate(tree: &UiTree, selector: &Selector) -> Option<NodeId> {
    let found = match selector.kind()? {
        MatchKind::Text => first_visible(tree, tree.find_by_text(&selector.value)).or_else(|| {
            breadth_first(tree, |node| {
                eq_ci(node.text_str(), &selector.value)
                    || eq_ci(node.content_desc_str(), &selector.value)
            })
        }),
        MatchKind::Id => first_visible(tree, tree.find_by_view_id(&selector.value)),
        MatchKind::ContentDesc => breadth_first(tree, |node| {
            eq_ci(node.content_desc_str(), &selector.value)
        }),
    };
    debug!(by = %selector.by, found = ?found, "Selector resolved");
    found
}

/// Bounding rectangle of the located node.
pub fn locate_bounds(tree: &UiTree, selector: &Selector) -> Option<Rect> {
    locate(tree, selector)
        .and_then(|id| tree.node(id))
        .map(|node| node.bounds)
}

fn first_visible(tree: &UiTree, hits: &[NodeId]) -> Option<NodeId> {
    hits.iter()
        .copied()
        .find(|id| tree.node(*id).is_some_and(|n| n.visible))
}

fn breadth_first(tree: &UiTree, matches: impl Fn(&UiNode) -> bool) -> Option<NodeId> {
    let root = tree.root()?;
    let mut visited = vec![false; tree.len()];
    let mut queue = VecDeque::from([root]);
    visited[root.0] = true;

    while let Some(id) = queue.pop_front() {
        if let Some(node) = tree.node(id) {
            if node.visible && matches(node) {
                return Some(id);
            }
        }
        for child in tree.children(id) {
            if !visited[child.0] {
                visited[child.0] = true;
                queue.push_back(child);
            }
        }
    }
    None
}

fn eq_ci(candidate: Option<&str>, wanted: &str) -> bool {
    candidate.is_some_and(|c| c.to_lowercase() == wanted.trim().to_lowercase())
}
