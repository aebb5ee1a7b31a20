// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bottom panel: footer buttons with mutually exclusive sections.

use alloc::vec::Vec;

use coppice_disclosure::markup::class;
use coppice_disclosure::ToggleOutcome;
use coppice_event_state::BindingRegistry;
use coppice_surface_tree::{NodeId, Overflow, SurfaceTree};

use crate::registry::OwnerKey;

const PAIRS: [(&str, &str); 3] = [
    (class::PANEL_FILTER_BUTTON, class::PANEL_FILTER_SECTION),
    (class::PANEL_STATS_BUTTON, class::PANEL_STATS_SECTION),
    (class::PANEL_ACCOUNT_BUTTON, class::PANEL_ACCOUNT_SECTION),
];

/// Controls the persistent bottom panel.
///
/// Each footer button activates its section; activating one deactivates the
/// others. Re-tapping the active button, or tapping the backdrop, closes the
/// whole panel. The shared body and backdrop carry the `active` class while
/// any section is up, and document scrolling is locked for the duration.
#[derive(Debug)]
pub struct BottomPanelController {
    root: NodeId,
    document: NodeId,
    pairs: Vec<(NodeId, NodeId)>,
    body: Option<NodeId>,
    backdrop: Option<NodeId>,
}

impl BottomPanelController {
    /// Create a controller for the panel rooted at `root`.
    pub fn new(root: NodeId, document: NodeId) -> Self {
        Self {
            root,
            document,
            pairs: Vec::new(),
            body: None,
            backdrop: None,
        }
    }

    /// Find and claim the panel's buttons and backdrop.
    ///
    /// Buttons without a matching section are skipped. Returns the number of
    /// bindings claimed.
    pub fn bind(
        &mut self,
        tree: &SurfaceTree,
        registry: &mut BindingRegistry<NodeId, OwnerKey>,
    ) -> usize {
        let mut claimed = 0;
        for (button_class, section_class) in PAIRS {
            let Some(button) = tree.first_with_class(self.root, button_class) else {
                continue;
            };
            let Some(section) = tree.first_with_class(self.root, section_class) else {
                log::warn!("panel button '{button_class}' has no section; skipped");
                continue;
            };
            if registry.try_bind(button, OwnerKey::Panel) {
                self.pairs.push((button, section));
                claimed += 1;
            }
        }
        self.body = tree.first_with_class(self.root, class::PANEL_BODY);
        self.backdrop = tree.first_with_class(self.document, class::PANEL_BACKDROP);
        if let Some(backdrop) = self.backdrop {
            if registry.try_bind(backdrop, OwnerKey::Panel) {
                claimed += 1;
            }
        }
        claimed
    }

    /// Release this controller's bindings.
    pub fn teardown(&mut self, registry: &mut BindingRegistry<NodeId, OwnerKey>) {
        for (button, _) in self.pairs.drain(..) {
            registry.release(&button);
        }
        if let Some(backdrop) = self.backdrop.take() {
            registry.release(&backdrop);
        }
        self.body = None;
    }

    /// The section currently active, if any.
    pub fn active_section(&self, tree: &SurfaceTree) -> Option<NodeId> {
        self.pairs
            .iter()
            .map(|(_, section)| *section)
            .find(|section| tree.has_class(*section, class::ACTIVE))
    }

    /// Dispatch a click on `node`.
    pub fn handle_click(&mut self, tree: &mut SurfaceTree, node: NodeId) -> ToggleOutcome {
        if self.backdrop == Some(node) {
            self.close(tree);
            return ToggleOutcome::Closed;
        }
        let Some((button, section)) = self
            .pairs
            .iter()
            .copied()
            .find(|(button, _)| *button == node)
        else {
            return ToggleOutcome::Ignored;
        };

        if tree.has_class(section, class::ACTIVE) {
            self.close(tree);
            return ToggleOutcome::Closed;
        }
        for (other_button, other_section) in &self.pairs {
            tree.remove_class(*other_button, class::ACTIVE);
            tree.remove_class(*other_section, class::ACTIVE);
        }
        tree.add_class(button, class::ACTIVE);
        tree.add_class(section, class::ACTIVE);
        if let Some(body) = self.body {
            tree.add_class(body, class::ACTIVE);
        }
        if let Some(backdrop) = self.backdrop {
            tree.add_class(backdrop, class::ACTIVE);
        }
        tree.set_overflow(self.document, Overflow::Hidden);
        ToggleOutcome::Opened
    }

    /// Deactivate every section and unlock scrolling.
    pub fn close(&self, tree: &mut SurfaceTree) {
        for (button, section) in &self.pairs {
            tree.remove_class(*button, class::ACTIVE);
            tree.remove_class(*section, class::ACTIVE);
        }
        if let Some(body) = self.body {
            tree.remove_class(body, class::ACTIVE);
        }
        if let Some(backdrop) = self.backdrop {
            tree.remove_class(backdrop, class::ACTIVE);
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
        ElementData::new().with_size(Size::new(375.0, 80.0))
    }

    struct Fixture {
        tree: SurfaceTree,
        document: NodeId,
        root: NodeId,
        filter_button: NodeId,
        filter_section: NodeId,
        stats_button: NodeId,
        stats_section: NodeId,
        body: NodeId,
        backdrop: NodeId,
    }

    fn fixture() -> Fixture {
        let mut tree = SurfaceTree::new();
        let document = tree.insert(None, sized());
        let root = tree.insert(Some(document), sized().with_class(class::BOTTOM_PANEL));
        let body = tree.insert(Some(root), sized().with_class(class::PANEL_BODY));
        let filter_section =
            tree.insert(Some(body), sized().with_class(class::PANEL_FILTER_SECTION));
        let stats_section =
            tree.insert(Some(body), sized().with_class(class::PANEL_STATS_SECTION));
        let filter_button =
            tree.insert(Some(root), sized().with_class(class::PANEL_FILTER_BUTTON));
        let stats_button =
            tree.insert(Some(root), sized().with_class(class::PANEL_STATS_BUTTON));
        let backdrop = tree.insert(Some(document), sized().with_class(class::PANEL_BACKDROP));
        Fixture {
            tree,
            document,
            root,
            filter_button,
            filter_section,
            stats_button,
            stats_section,
            body,
            backdrop,
        }
    }

    fn bound(f: &Fixture) -> (BottomPanelController, BindingRegistry<NodeId, OwnerKey>) {
        let mut controller = BottomPanelController::new(f.root, f.document);
        let mut registry = BindingRegistry::new();
        // Two button pairs (no account markup) plus the backdrop.
        assert_eq!(controller.bind(&f.tree, &mut registry), 3);
        (controller, registry)
    }

    #[test]
    fn sections_are_mutually_exclusive() {
        let mut f = fixture();
        let (mut controller, _registry) = bound(&f);

        assert_eq!(
            controller.handle_click(&mut f.tree, f.filter_button),
            ToggleOutcome::Opened
        );
        assert!(f.tree.has_class(f.filter_section, class::ACTIVE));
        assert!(f.tree.has_class(f.body, class::ACTIVE));

        assert_eq!(
            controller.handle_click(&mut f.tree, f.stats_button),
            ToggleOutcome::Opened
        );
        assert!(!f.tree.has_class(f.filter_section, class::ACTIVE));
        assert!(!f.tree.has_class(f.filter_button, class::ACTIVE));
        assert!(f.tree.has_class(f.stats_section, class::ACTIVE));
        assert_eq!(controller.active_section(&f.tree), Some(f.stats_section));
    }

    #[test]
    fn retapping_the_active_button_closes_the_panel() {
        let mut f = fixture();
        let (mut controller, _registry) = bound(&f);

        controller.handle_click(&mut f.tree, f.filter_button);
        assert_eq!(
            f.tree.style(f.document).map(|s| s.overflow),
            Some(Overflow::Hidden)
        );

        assert_eq!(
            controller.handle_click(&mut f.tree, f.filter_button),
            ToggleOutcome::Closed
        );
        assert!(controller.active_section(&f.tree).is_none());
        assert!(!f.tree.has_class(f.body, class::ACTIVE));
        assert!(!f.tree.has_class(f.backdrop, class::ACTIVE));
        assert_eq!(
            f.tree.style(f.document).map(|s| s.overflow),
            Some(Overflow::Visible)
        );
    }

    #[test]
    fn backdrop_closes_whatever_is_open() {
        let mut f = fixture();
        let (mut controller, _registry) = bound(&f);

        controller.handle_click(&mut f.tree, f.stats_button);
        assert_eq!(
            controller.handle_click(&mut f.tree, f.backdrop),
            ToggleOutcome::Closed
        );
        assert!(controller.active_section(&f.tree).is_none());
    }

    #[test]
    fn teardown_releases_bindings() {
        let f = fixture();
        let (mut controller, mut registry) = bound(&f);
        controller.teardown(&mut registry);
        assert!(registry.is_empty());
        assert_eq!(controller.bind(&f.tree, &mut registry), 3);
    }
}
