pub mod digest;
pub mod locator;
pub mod monitor;
pub mod tree;
pub mod watcher;
pub mod window;

pub use digest::{digest, has_changed, ScreenDigest};
pub use locator::{locate, Selector};
pub use tree::{NodeId, Rect, UiNode, UiTree, UiTreeBuilder};
pub use window::{ActiveWindow, FollowUpWindow};
