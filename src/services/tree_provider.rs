use parking_lot::Mutex;

use crate::screen::tree::UiTree;

/// Source of the live accessibility tree.
pub trait UiTreeProvider: Send + Sync {
    /// Snapshot of the current screen, `None` when no window is inspectable.
    fn current_tree(&self) -> Option<UiTree>;
}

/// Holds whatever tree was last pushed into it.
#[derive(Debug, Default)]
pub struct SnapshotTreeProvider {
    tree: Mutex<Option<UiTree>>,
}

impl SnapshotTreeProvider {
    pub fn new(tree: Option<UiTree>) -> Self {
        Self {
            tree: Mutex::new(tree),
        }
    }

    pub fn replace(&self, tree: Option<UiTree>) {
        *self.tree.lock() = tree;
    }
}

impl UiTreeProvider for SnapshotTreeProvider {
    fn current_tree(&self) -> Option<UiTree> {
        self.tree.lock().clone()
    }
}
