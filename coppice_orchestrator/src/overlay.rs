// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close control for the modal overlays.

use alloc::vec::Vec;

use coppice_disclosure::markup::{attr, class};
use coppice_disclosure::{Surface, ToggleOutcome};
use coppice_event_state::BindingRegistry;
use coppice_surface_tree::{NodeId, Overflow, SurfaceTree};

use crate::registry::OwnerKey;

/// Controls one modal overlay surface.
///
/// The controller owns the overlay's `hidden` class, mirrors the open state
/// onto every opener's `aria-expanded`, and locks document scrolling while
/// the overlay is up. Revealing the overlay is what the deferred machines'
/// visibility watch reacts to; the controller itself knows nothing about
/// them.
#[derive(Debug)]
pub struct OverlayController {
    surface: Surface,
    root: NodeId,
    document: NodeId,
    openers: Vec<NodeId>,
    closers: Vec<NodeId>,
}

impl OverlayController {
    /// Create a controller for the overlay rooted at `root`.
    ///
    /// Returns `None` for a non-modal surface.
    pub fn new(surface: Surface, root: NodeId, document: NodeId) -> Option<Self> {
        surface.is_modal().then_some(Self {
            surface,
            root,
            document,
            openers: Vec::new(),
            closers: Vec::new(),
        })
    }

    /// The controlled surface.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Find and claim the overlay's opener and closer elements.
    ///
    /// Openers live anywhere in the document (the navigation hamburger sits
    /// in the page header, outside the overlay); closers, cancel buttons,
    /// and the backdrop live wherever the markup put them. Returns the
    /// number of bindings claimed.
    pub fn bind(
        &mut self,
        tree: &SurfaceTree,
        registry: &mut BindingRegistry<NodeId, OwnerKey>,
    ) -> usize {
        let (opener_class, closer_classes): (&str, &[&str]) = match self.surface {
            Surface::NavigationOverlay => {
                (class::NAV_TRIGGER, &[class::NAV_CLOSE, class::NAV_BACKDROP])
            }
            Surface::CategoryOverlay => (
                class::CATEGORY_TRIGGER,
                &[
                    class::CATEGORY_CLOSE,
                    class::CATEGORY_CANCEL,
                    class::CATEGORY_BACKDROP,
                ],
            ),
            Surface::BottomPanel => return 0,
        };

        let owner = OwnerKey::Overlay(self.surface);
        let mut claimed = 0;
        for node in tree.all_with_class(self.document, opener_class) {
            if registry.try_bind(node, owner) {
                self.openers.push(node);
                claimed += 1;
            }
        }
        for closer_class in closer_classes {
            for node in tree.all_with_class(self.document, closer_class) {
                if registry.try_bind(node, owner) {
                    self.closers.push(node);
                    claimed += 1;
                }
            }
        }
        if self.openers.is_empty() {
            log::warn!("overlay '{}' has no opener elements", self.surface.name());
        }
        claimed
    }

    /// Release this controller's bindings.
    pub fn teardown(&mut self, registry: &mut BindingRegistry<NodeId, OwnerKey>) {
        for node in self.openers.drain(..).chain(self.closers.drain(..)) {
            registry.release(&node);
        }
    }

    /// Whether the overlay is currently shown.
    pub fn is_open(&self, tree: &SurfaceTree) -> bool {
        !tree.has_class(self.root, class::HIDDEN)
    }

    /// Dispatch a click on `node`.
    pub fn handle_click(&mut self, tree: &mut SurfaceTree, node: NodeId) -> ToggleOutcome {
        if self.openers.contains(&node) {
            self.open(tree);
            ToggleOutcome::Opened
        } else if self.closers.contains(&node) {
            self.close(tree);
            ToggleOutcome::Closed
        } else {
            ToggleOutcome::Ignored
        }
    }

    /// Show the overlay, mirror `aria-expanded`, and lock scrolling.
    pub fn open(&self, tree: &mut SurfaceTree) {
        tree.remove_class(self.root, class::HIDDEN);
        for opener in &self.openers {
            tree.set_attr(*opener, attr::ARIA_EXPANDED, "true");
        }
        tree.set_overflow(self.document, Overflow::Hidden);
    }

    /// Hide the overlay, mirror `aria-expanded`, and unlock scrolling.
    pub fn close(&self, tree: &mut SurfaceTree) {
        tree.add_class(self.root, class::HIDDEN);
        for opener in &self.openers {
            tree.set_attr(*opener, attr::ARIA_EXPANDED, "false");
        }
        tree.set_overflow(self.document, Overflow::Visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coppice_surface_tree::ElementData;
    use kurbo::Size;

    fn sized() -> ElementData {
        ElementData::new().with_size(Size::new(375.0, 667.0))
    }

    fn nav_fixture() -> (SurfaceTree, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = SurfaceTree::new();
        let document = tree.insert(None, sized());
        let opener = tree.insert(Some(document), sized().with_class(class::NAV_TRIGGER));
        let overlay = tree.insert(
            Some(document),
            sized().with_class(class::NAV_OVERLAY).with_class(class::HIDDEN),
        );
        let closer = tree.insert(Some(overlay), sized().with_class(class::NAV_CLOSE));
        let backdrop = tree.insert(Some(overlay), sized().with_class(class::NAV_BACKDROP));
        (tree, document, overlay, opener, closer, backdrop)
    }

    #[test]
    fn open_and_close_mirror_state_everywhere() {
        let (mut tree, document, overlay, opener, closer, _backdrop) = nav_fixture();
        let mut controller =
            OverlayController::new(Surface::NavigationOverlay, overlay, document).unwrap();
        let mut registry = BindingRegistry::new();
        assert_eq!(controller.bind(&tree, &mut registry), 3);

        assert_eq!(
            controller.handle_click(&mut tree, opener),
            ToggleOutcome::Opened
        );
        assert!(controller.is_open(&tree));
        assert_eq!(tree.attr(opener, attr::ARIA_EXPANDED), Some("true"));
        assert_eq!(
            tree.style(document).map(|s| s.overflow),
            Some(Overflow::Hidden)
        );

        assert_eq!(
            controller.handle_click(&mut tree, closer),
            ToggleOutcome::Closed
        );
        assert!(!controller.is_open(&tree));
        assert_eq!(tree.attr(opener, attr::ARIA_EXPANDED), Some("false"));
        assert_eq!(
            tree.style(document).map(|s| s.overflow),
            Some(Overflow::Visible)
        );
    }

    #[test]
    fn backdrop_click_closes() {
        let (mut tree, document, overlay, opener, _closer, backdrop) = nav_fixture();
        let mut controller =
            OverlayController::new(Surface::NavigationOverlay, overlay, document).unwrap();
        let mut registry = BindingRegistry::new();
        controller.bind(&tree, &mut registry);

        controller.handle_click(&mut tree, opener);
        assert_eq!(
            controller.handle_click(&mut tree, backdrop),
            ToggleOutcome::Closed
        );
        assert!(tree.has_class(overlay, class::HIDDEN));
    }

    #[test]
    fn non_modal_surfaces_have_no_controller() {
        let mut tree = SurfaceTree::new();
        let document = tree.insert(None, sized());
        let panel = tree.insert(Some(document), sized().with_class(class::BOTTOM_PANEL));
        assert!(OverlayController::new(Surface::BottomPanel, panel, document).is_none());
    }

    #[test]
    fn teardown_releases_bindings() {
        let (tree, document, overlay, ..) = nav_fixture();
        let mut controller =
            OverlayController::new(Surface::NavigationOverlay, overlay, document).unwrap();
        let mut registry = BindingRegistry::new();
        let claimed = controller.bind(&tree, &mut registry);
        assert_eq!(registry.len(), claimed);

        controller.teardown(&mut registry);
        assert!(registry.is_empty());
        assert_eq!(controller.bind(&tree, &mut registry), claimed);
    }
}
