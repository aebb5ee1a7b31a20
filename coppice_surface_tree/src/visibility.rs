// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visibility probe: is a subtree actually rendered?
//!
//! Presence in the tree is not the question — overlays and collapsed panels
//! stay in the tree while hidden. The probe answers whether an element is
//! *rendered*: its own style does not hide it, layout assigned it a non-zero
//! box, and no ancestor collapses the subtree it sits in.

use crate::tree::SurfaceTree;
use crate::types::{Display, NodeId, Visibility};

/// Utility class that collapses an element (display:none semantics).
///
/// The styling layer defines `hidden` this way, and the disclosure machines
/// toggle it on content regions, so the probe must honor it alongside the
/// reduced style.
pub const HIDDEN_CLASS: &str = "hidden";

fn collapsed(tree: &SurfaceTree, id: NodeId) -> bool {
    tree.style(id)
        .is_none_or(|s| s.display == Display::None)
        || tree.has_class(id, HIDDEN_CLASS)
}

/// Whether the element's own style and class list permit rendering.
///
/// Ancestors and layout size are not consulted; see [`is_visible`] for the
/// full probe.
pub fn is_self_visible(tree: &SurfaceTree, id: NodeId) -> bool {
    let Some(style) = tree.style(id) else {
        return false;
    };
    !collapsed(tree, id) && style.visibility == Visibility::Visible && style.opacity > 0.0
}

/// The full visibility probe.
///
/// An element is visible iff:
/// - its own display, visibility, and opacity permit rendering,
/// - its layout size is non-zero in both dimensions, and
/// - no ancestor is collapsed (display:none or the `hidden` class), which
///   would zero out the whole subtree's boxes.
///
/// Visibility and opacity are *not* checked on ancestors: the reduced style
/// mirrors computed values, and a collapsed ancestor is the only ancestor
/// condition that erases a descendant's box.
pub fn is_visible(tree: &SurfaceTree, id: NodeId) -> bool {
    if !is_self_visible(tree, id) {
        return false;
    }
    let size = tree.layout_size(id);
    if size.width <= 0.0 || size.height <= 0.0 {
        return false;
    }
    let mut current = tree.parent_of(id);
    while let Some(ancestor) = current {
        if collapsed(tree, ancestor) {
            return false;
        }
        current = tree.parent_of(ancestor);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementData;
    use kurbo::Size;

    fn sized() -> ElementData {
        ElementData::new().with_size(Size::new(100.0, 50.0))
    }

    #[test]
    fn zero_size_is_not_visible() {
        let mut tree = SurfaceTree::new();
        let node = tree.insert(None, ElementData::new());
        assert!(is_self_visible(&tree, node));
        assert!(!is_visible(&tree, node));

        tree.set_layout_size(node, Size::new(10.0, 10.0));
        assert!(is_visible(&tree, node));
    }

    #[test]
    fn own_style_hides() {
        let mut tree = SurfaceTree::new();
        let node = tree.insert(None, sized());
        assert!(is_visible(&tree, node));

        tree.set_visibility(node, Visibility::Hidden);
        assert!(!is_visible(&tree, node));
        tree.set_visibility(node, Visibility::Visible);

        tree.set_opacity(node, 0.0);
        assert!(!is_visible(&tree, node));
        tree.set_opacity(node, 0.5);
        assert!(is_visible(&tree, node));

        tree.set_display(node, Display::None);
        assert!(!is_visible(&tree, node));
    }

    #[test]
    fn hidden_class_collapses() {
        let mut tree = SurfaceTree::new();
        let node = tree.insert(None, sized().with_class(HIDDEN_CLASS));
        assert!(!is_self_visible(&tree, node));
        assert!(!is_visible(&tree, node));

        tree.remove_class(node, HIDDEN_CLASS);
        assert!(is_visible(&tree, node));
    }

    #[test]
    fn collapsed_ancestor_hides_descendants() {
        let mut tree = SurfaceTree::new();
        let overlay = tree.insert(None, sized().with_class(HIDDEN_CLASS));
        let inner = tree.insert(Some(overlay), sized());
        let leaf = tree.insert(Some(inner), sized());

        assert!(is_self_visible(&tree, leaf));
        assert!(!is_visible(&tree, leaf));

        // Revealing the overlay reveals the whole subtree.
        tree.remove_class(overlay, HIDDEN_CLASS);
        assert!(is_visible(&tree, leaf));
    }

    #[test]
    fn hidden_ancestor_visibility_does_not_collapse() {
        // visibility:hidden keeps boxes; only collapse erases descendants.
        let mut tree = SurfaceTree::new();
        let parent = tree.insert(None, sized());
        let child = tree.insert(Some(parent), sized());
        tree.set_visibility(parent, Visibility::Hidden);

        assert!(is_visible(&tree, child));
        assert!(!is_visible(&tree, parent));
    }

    #[test]
    fn stale_id_is_not_visible() {
        let mut tree = SurfaceTree::new();
        let node = tree.insert(None, sized());
        tree.remove(node);
        assert!(!is_visible(&tree, node));
        assert!(!is_self_visible(&tree, node));
    }
}
