use voice_assist::screen::digest::DIGEST_CHAR_LIMIT;
use voice_assist::screen::locator::locate_bounds;
use voice_assist::screen::{digest, has_changed, locate, Rect, Selector, UiNode, UiTree, UiTreeBuilder};

fn settings_screen() -> UiTree {
    let mut b = UiTreeBuilder::new();
    let root = b.add(UiNode::container());
    let list = b.child(root, UiNode::container().hidden());
    b.child(list, UiNode::labelled("Wi-Fi").with_view_id("wifi"));
    b.child(list, UiNode::labelled("Bluetooth").with_content_desc("Toggle Bluetooth"));
    b.child(root, UiNode::container().with_content_desc("Back"));
    b.build(root)
}

#[test]
fn test_digest_idempotent() {
    let tree = settings_screen();
    assert!(!has_changed(&digest(&tree), &digest(&tree)));
}

#[test]
fn test_digest_walks_through_invisible_container() {
    let d = digest(&settings_screen());
    assert_eq!(
        d.normalized_text,
        "    Wi-Fi\n    Bluetooth [Toggle Bluetooth]\n  Back"
    );
}

#[test]
fn test_digest_skips_invisible_and_blank_nodes() {
    let mut b = UiTreeBuilder::new();
    let root = b.add(UiNode::labelled("Title"));
    b.child(root, UiNode::labelled("Secret").hidden());
    b.child(root, UiNode::labelled("   "));
    let d = digest(&b.build(root));
    assert_eq!(d.normalized_text, "Title");
}

#[test]
fn test_digest_survives_cycles_and_duplicates() {
    let mut b = UiTreeBuilder::new();
    let root = b.add(UiNode::labelled("Root"));
    let child = b.child(root, UiNode::labelled("Child"));
    b.link(child, root);
    b.link(root, child);
    let d = digest(&b.build(root));
    assert_eq!(d.normalized_text, "Root\n  Child");
}

#[test]
fn test_digest_detects_change() {
    let before = digest(&settings_screen());

    let mut b = UiTreeBuilder::new();
    let root = b.add(UiNode::container());
    b.child(root, UiNode::labelled("Wi-Fi is off"));
    let after = digest(&b.build(root));

    assert!(has_changed(&before, &after));
}

#[test]
fn test_digest_truncated_before_hashing() {
    let long = "x".repeat(DIGEST_CHAR_LIMIT + 10);
    let mut b = UiTreeBuilder::new();
    let root = b.add(UiNode::labelled(long.clone()));
    b.child(root, UiNode::labelled("only past the limit"));
    let first = digest(&b.build(root));

    let mut b = UiTreeBuilder::new();
    let root = b.add(UiNode::labelled(long));
    b.child(root, UiNode::labelled("something else entirely"));
    let second = digest(&b.build(root));

    assert_eq!(first.normalized_text.chars().count(), DIGEST_CHAR_LIMIT);
    assert!(!has_changed(&first, &second));
}

#[test]
fn test_empty_tree_digest() {
    let d = digest(&UiTree::empty());
    assert!(d.normalized_text.is_empty());
}

#[test]
fn test_locator_indexed_text() {
    let tree = settings_screen();
    let found = locate(&tree, &Selector::text("Wi-Fi")).expect("indexed hit");
    assert_eq!(tree.node(found).and_then(|n| n.view_id.as_deref()), Some("wifi"));
}

#[test]
fn test_locator_fallback_case_differing() {
    let tree = settings_screen();
    assert!(tree.find_by_text("bluetooth").is_empty());

    let found = locate(&tree, &Selector::text("bluetooth")).expect("fallback hit");
    assert_eq!(tree.node(found).and_then(|n| n.text_str()), Some("Bluetooth"));
}

#[test]
fn test_locator_text_falls_back_to_description() {
    let tree = settings_screen();
    let found = locate(&tree, &Selector::text("back")).expect("label hit");
    assert_eq!(tree.node(found).and_then(|n| n.content_desc_str()), Some("Back"));
}

#[test]
fn test_locator_by_id_and_description() {
    let tree = settings_screen();
    assert!(locate(&tree, &Selector::id("wifi")).is_some());
    assert!(locate(&tree, &Selector::id("WIFI")).is_none());
    assert!(locate(&tree, &Selector::content_desc("toggle bluetooth")).is_some());
    assert!(locate(&tree, &Selector::content_desc("Bluetooth")).is_none());
}

#[test]
fn test_locator_ignores_invisible_nodes() {
    let mut b = UiTreeBuilder::new();
    let root = b.add(UiNode::container());
    b.child(root, UiNode::labelled("Pay").hidden().with_view_id("pay"));
    let tree = b.build(root);

    assert!(locate(&tree, &Selector::text("Pay")).is_none());
    assert!(locate(&tree, &Selector::id("pay")).is_none());
}

#[test]
fn test_locator_unknown_kind_is_a_miss() {
    let tree = settings_screen();
    assert!(locate(&tree, &Selector::new("xpath", "//Wi-Fi")).is_none());
}

#[test]
fn test_locate_bounds() {
    let mut b = UiTreeBuilder::new();
    let root = b.add(UiNode::container());
    b.child(root, UiNode::labelled("OK").with_bounds(Rect::new(10, 20, 110, 70)));
    let tree = b.build(root);

    let bounds = locate_bounds(&tree, &Selector::text("OK")).expect("bounds");
    assert_eq!(bounds.center(), (60, 45));
}
