// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat accordion headers outside the nested category machines.
//!
//! Headers are single-level disclosures scoped to the category and account
//! search sections. The same header value may legitimately appear in several
//! sections at once, so notifications qualify it with the owning section's
//! identity instead of assuming global uniqueness.

use alloc::string::{String, ToString};

use coppice_event_state::BindingRegistry;
use coppice_surface_tree::{NodeId, SurfaceTree};

use crate::machine::ToggleOutcome;
use crate::markup::{attr, class};
use crate::notify::{NoticeHub, ToggleNotice};

const SECTION_MARKERS: [&str; 2] = [class::CATEGORY_SECTION, class::ACCOUNT_SECTION];

#[derive(Clone, Debug)]
struct HeaderBinding {
    value: String,
    section: NodeId,
    section_id: String,
}

/// Manages every flat accordion header in the document.
///
/// Binding claims header elements through the shared [`BindingRegistry`], so
/// repeat initialization runs and overlap with the category machines can
/// never double-handle an element.
#[derive(Debug, Default)]
pub struct HeaderToggleManager {
    document: Option<NodeId>,
    headers: hashbrown::HashMap<NodeId, HeaderBinding>,
}

impl HeaderToggleManager {
    /// Create an unbound manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of headers this manager holds bindings for.
    pub fn binding_count(&self) -> usize {
        self.headers.len()
    }

    /// Find and claim every header under the section roots in `document`.
    ///
    /// A header is an element carrying the header marker class and a toggle
    /// attribute, inside a category or account section root. Returns the
    /// number of bindings claimed by this call.
    pub fn bind<O: Clone>(
        &mut self,
        tree: &SurfaceTree,
        document: NodeId,
        registry: &mut BindingRegistry<NodeId, O>,
        owner: O,
    ) -> usize {
        self.document = Some(document);
        let mut claimed = 0;
        for marker in SECTION_MARKERS {
            for section in tree.all_with_class(document, marker) {
                let section_id = tree
                    .data(section)
                    .and_then(|d| d.classes.first().cloned())
                    .unwrap_or_else(|| "unknown-section".to_string());
                let headers = tree.select_all(section, |t, n| {
                    t.has_class(n, class::HEADER) && t.attr(n, attr::HEADER_TOGGLE).is_some()
                });
                for header in headers {
                    let Some(value) = tree.attr(header, attr::HEADER_TOGGLE) else {
                        continue;
                    };
                    if registry.try_bind(header, owner.clone()) {
                        self.headers.insert(
                            header,
                            HeaderBinding {
                                value: value.to_string(),
                                section,
                                section_id: section_id.clone(),
                            },
                        );
                        claimed += 1;
                    } else {
                        log::debug!("header '{value}' already bound; skipped");
                    }
                }
            }
        }
        log::debug!("bound {claimed} flat header(s)");
        claimed
    }

    /// Release this manager's header bindings and forget them.
    pub fn teardown<O>(&mut self, registry: &mut BindingRegistry<NodeId, O>) {
        for node in self.headers.keys() {
            registry.release(node);
        }
        self.headers.clear();
        self.document = None;
    }

    /// Dispatch a click on `node`, emitting a notice on a successful toggle.
    pub fn handle_click(
        &mut self,
        tree: &mut SurfaceTree,
        node: NodeId,
        hub: &mut NoticeHub,
    ) -> ToggleOutcome {
        let Some(binding) = self.headers.get(&node).cloned() else {
            return ToggleOutcome::Ignored;
        };
        let Some(region) = self.content_region(tree, &binding) else {
            log::warn!(
                "no content region for header '{}' in {}; state untouched",
                binding.value,
                binding.section_id
            );
            return ToggleOutcome::Ignored;
        };

        let hidden_after = tree.toggle_class(region, class::HIDDEN);
        let is_open = !hidden_after;
        if let Some(icon) =
            tree.select_first(node, |t, n| t.attr(n, attr::HEADER_ICON).is_some())
        {
            if is_open {
                tree.add_class(icon, class::ROTATED);
            } else {
                tree.remove_class(icon, class::ROTATED);
            }
        }
        if is_open {
            tree.add_class(node, class::ACTIVE);
        } else {
            tree.remove_class(node, class::ACTIVE);
        }

        hub.emit(&ToggleNotice {
            toggle_value: binding.value.clone(),
            unique_value: alloc::format!("{}-{}", binding.section_id, binding.value),
            section_id: binding.section_id,
            is_open,
        });
        if is_open {
            ToggleOutcome::Opened
        } else {
            ToggleOutcome::Closed
        }
    }

    /// Resolve the header's content region: inside its own section first,
    /// then inside the enclosing surface, then anywhere in the document.
    fn content_region(&self, tree: &SurfaceTree, binding: &HeaderBinding) -> Option<NodeId> {
        tree.first_with_attr_eq(binding.section, attr::SECTION, &binding.value)
            .or_else(|| {
                enclosing_surface(tree, binding.section)
                    .and_then(|s| tree.first_with_attr_eq(s, attr::SECTION, &binding.value))
            })
            .or_else(|| {
                self.document
                    .and_then(|d| tree.first_with_attr_eq(d, attr::SECTION, &binding.value))
            })
    }
}

fn enclosing_surface(tree: &SurfaceTree, node: NodeId) -> Option<NodeId> {
    tree.closest(node, |t, n| {
        t.has_class(n, class::NAV_OVERLAY)
            || t.has_class(n, class::CATEGORY_OVERLAY)
            || t.has_class(n, class::BOTTOM_PANEL)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use coppice_surface_tree::ElementData;
    use core::cell::RefCell;
    use kurbo::Size;

    fn sized() -> ElementData {
        ElementData::new().with_size(Size::new(320.0, 44.0))
    }

    struct Fixture {
        tree: SurfaceTree,
        document: NodeId,
        category_header: NodeId,
        category_icon: NodeId,
        category_region: NodeId,
        account_header: NodeId,
        shared_region: NodeId,
    }

    /// A category section with a local `main` region, plus an account
    /// section whose `main` header resolves document-wide.
    fn fixture() -> Fixture {
        let mut tree = SurfaceTree::new();
        let document = tree.insert(None, sized());

        let account = tree.insert(Some(document), sized().with_class(class::ACCOUNT_SECTION));
        let account_header = tree.insert(
            Some(account),
            sized()
                .with_class(class::HEADER)
                .with_attr(attr::HEADER_TOGGLE, "main"),
        );
        // No `main` region inside the account section; the shared one at
        // document level is the fallback.
        let shared_region = tree.insert(
            Some(document),
            sized()
                .with_attr(attr::SECTION, "main")
                .with_class(class::HIDDEN),
        );

        let category = tree.insert(Some(document), sized().with_class(class::CATEGORY_SECTION));
        let category_header = tree.insert(
            Some(category),
            sized()
                .with_class(class::HEADER)
                .with_attr(attr::HEADER_TOGGLE, "main"),
        );
        let category_icon =
            tree.insert(Some(category_header), sized().with_attr(attr::HEADER_ICON, ""));
        let category_region = tree.insert(
            Some(category),
            sized()
                .with_attr(attr::SECTION, "main")
                .with_class(class::HIDDEN),
        );

        Fixture {
            tree,
            document,
            category_header,
            category_icon,
            category_region,
            account_header,
            shared_region,
        }
    }

    fn bound(f: &Fixture) -> (HeaderToggleManager, BindingRegistry<NodeId, u8>) {
        let mut manager = HeaderToggleManager::new();
        let mut registry = BindingRegistry::new();
        manager.bind(&f.tree, f.document, &mut registry, 0u8);
        (manager, registry)
    }

    #[test]
    fn toggles_region_icon_and_active_state() {
        let mut f = fixture();
        let (mut manager, _registry) = bound(&f);
        let mut hub = NoticeHub::new();

        assert_eq!(
            manager.handle_click(&mut f.tree, f.category_header, &mut hub),
            ToggleOutcome::Opened
        );
        assert!(!f.tree.has_class(f.category_region, class::HIDDEN));
        assert!(f.tree.has_class(f.category_header, class::ACTIVE));
        assert!(f.tree.has_class(f.category_icon, class::ROTATED));

        assert_eq!(
            manager.handle_click(&mut f.tree, f.category_header, &mut hub),
            ToggleOutcome::Closed
        );
        assert!(f.tree.has_class(f.category_region, class::HIDDEN));
        assert!(!f.tree.has_class(f.category_header, class::ACTIVE));
        assert!(!f.tree.has_class(f.category_icon, class::ROTATED));
    }

    #[test]
    fn same_value_in_two_sections_stays_distinguishable() {
        let mut f = fixture();
        let (mut manager, _registry) = bound(&f);
        assert_eq!(manager.binding_count(), 2);

        let seen: Rc<RefCell<Vec<(String, String)>>> = Rc::default();
        let mut hub = NoticeHub::new();
        {
            let seen = Rc::clone(&seen);
            hub.subscribe(move |n| {
                seen.borrow_mut()
                    .push((n.unique_value.clone(), n.section_id.clone()));
                Ok(())
            });
        }

        manager.handle_click(&mut f.tree, f.category_header, &mut hub);
        manager.handle_click(&mut f.tree, f.account_header, &mut hub);
        assert_eq!(
            seen.borrow().as_slice(),
            &[
                (
                    "category-search-section-main".to_string(),
                    "category-search-section".to_string()
                ),
                (
                    "account-search-section-main".to_string(),
                    "account-search-section".to_string()
                ),
            ]
        );
    }

    #[test]
    fn falls_back_to_a_document_level_region() {
        let mut f = fixture();
        let (mut manager, _registry) = bound(&f);
        let mut hub = NoticeHub::new();

        assert_eq!(
            manager.handle_click(&mut f.tree, f.account_header, &mut hub),
            ToggleOutcome::Opened
        );
        assert!(!f.tree.has_class(f.shared_region, class::HIDDEN));
        // The category section's own region is not the account fallback.
        assert!(f.tree.has_class(f.category_region, class::HIDDEN));
    }

    #[test]
    fn rebinding_claims_nothing_while_bindings_are_live() {
        let f = fixture();
        let (mut manager, mut registry) = bound(&f);
        assert_eq!(manager.bind(&f.tree, f.document, &mut registry, 1u8), 0);

        manager.teardown(&mut registry);
        assert!(registry.is_empty());
        assert_eq!(manager.bind(&f.tree, f.document, &mut registry, 1u8), 2);
    }

    #[test]
    fn headerless_click_is_ignored_without_notices() {
        let mut f = fixture();
        let (mut manager, _registry) = bound(&f);
        let notices: Rc<RefCell<usize>> = Rc::default();
        let mut hub = NoticeHub::new();
        {
            let notices = Rc::clone(&notices);
            hub.subscribe(move |_| {
                *notices.borrow_mut() += 1;
                Ok(())
            });
        }

        let stray = f.tree.insert(Some(f.document), sized());
        assert_eq!(
            manager.handle_click(&mut f.tree, stray, &mut hub),
            ToggleOutcome::Ignored
        );
        assert_eq!(*notices.borrow(), 0);
    }
}
