use sha2::{Digest as _, Sha256};

use super::tree::{NodeId, UiTree};

/// Only this many characters of the rendered screen take part in hashing.
pub const DIGEST_CHAR_LIMIT: usize = 2000;

/// Bounded textual summary of one screen, compared only against its predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenDigest {
    pub normalized_text: String,
    pub hash: u64,
}

impl ScreenDigest {
    fn from_text(normalized_text: String) -> Self {
        let hash = hash_text(&normalized_text);
        Self {
            normalized_text,
            hash,
        }
    }
}

/// Depth-first rendering of every visible node carrying text or a label,
/// one line per node, indented two spaces per level.
///
/// Invisible nodes emit nothing but their subtrees are still walked. Each
/// arena slot is visited at most once.
pub fn digest(tree: &UiTree) -> ScreenDigest {
    let mut out = String::new();
    let mut chars = 0usize;

    if let Some(root) = tree.root() {
        let mut visited = vec![false; tree.len()];
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];

        while let Some((id, depth)) = stack.pop() {
            if chars >= DIGEST_CHAR_LIMIT {
                break;
            }
            if std::mem::replace(&mut visited[id.0], true) {
                continue;
            }
            let Some(node) = tree.node(id) else { continue };

            if node.visible {
                if let Some(label) = line_label(node.text_str(), node.content_desc_str()) {
                    if !out.is_empty() {
                        out.push('\n');
                        chars += 1;
                    }
                    let line = format!("{}{}", "  ".repeat(depth), label);
                    chars += line.chars().count();
                    out.push_str(&line);
                }
            }

            let children: Vec<NodeId> = tree.children(id).collect();
            for child in children.into_iter().rev() {
                if !visited[child.0] {
                    stack.push((child, depth + 1));
                }
            }
        }
    }

    ScreenDigest::from_text(truncate_chars(out, DIGEST_CHAR_LIMIT))
}

pub fn has_changed(previous: &ScreenDigest, current: &ScreenDigest) -> bool {
    previous.hash != current.hash
}

fn line_label(text: Option<&str>, desc: Option<&str>) -> Option<String> {
    match (text, desc) {
        (Some(t), Some(d)) if t != d => Some(format!("{t} [{d}]")),
        (Some(t), _) => Some(t.to_string()),
        (None, Some(d)) => Some(d.to_string()),
        (None, None) => None,
    }
}

fn truncate_chars(mut text: String, limit: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(limit) {
        text.truncate(byte_idx);
    }
    text
}

/// First eight bytes of SHA-256, stable across processes and releases.
fn hash_text(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
