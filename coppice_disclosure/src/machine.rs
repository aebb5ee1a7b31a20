// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-section disclosure state machine.
//!
//! One machine instance governs one section on one surface. The machine owns
//! two coexisting trees of state: the wide variant's nested parent/child
//! accordion (at most one open parent per row, at most one open child per
//! open parent) and the narrow variant's independent toggles with duplicate
//! activation suppression. Both operate purely on the element tree; time
//! enters only as caller-supplied millisecond timestamps.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use coppice_event_state::{ActivationGuard, BindingRegistry};
use coppice_surface_tree::{NodeId, SurfaceTree};

use crate::locator::{self, LocatedSection};
use crate::markup::{attr, class, prefix};
use crate::types::{Section, Surface, parent_id_of};

/// Suppression window for duplicate narrow parent-level activations.
const NARROW_PARENT_SUPPRESS_MS: u64 = 300;
/// Suppression window for duplicate narrow child-level activations.
const NARROW_CHILD_SUPPRESS_MS: u64 = 200;

/// What a bound trigger element does when clicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerRole {
    /// Wide-variant parent trigger within a row.
    WideParent {
        /// Trigger identifier (`parent-` prefixed).
        id: String,
        /// Row the trigger sits in.
        row: String,
    },
    /// Wide-variant child trigger within a row.
    WideChild {
        /// Child identifier; the owning parent id is derived from it.
        id: String,
        /// Row the trigger sits in.
        row: String,
    },
    /// Narrow-variant parent trigger.
    NarrowParent {
        /// Trigger identifier (`parent-` prefixed).
        id: String,
    },
    /// Narrow-variant child trigger.
    NarrowChild {
        /// Trigger identifier (`child-` prefixed).
        id: String,
    },
}

/// Result of dispatching a click to a machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The trigger's content region is now open.
    Opened,
    /// The trigger's content region is now closed.
    Closed,
    /// A duplicate activation inside the suppression window was dropped.
    Suppressed,
    /// The click did not belong to this machine, or its trigger has no
    /// usable content region. No state was touched.
    Ignored,
}

/// Disclosure state machine for one (surface, section) pair.
///
/// Construction is free of element-tree work. [`DisclosureMachine::bind`]
/// performs the locating pass and claims trigger elements through a shared
/// [`BindingRegistry`]; on a modal surface the host delays that call until
/// the overlay first becomes visible.
#[derive(Debug)]
pub struct DisclosureMachine {
    surface: Surface,
    section: Section,
    surface_root: NodeId,
    located: LocatedSection,
    bound: bool,
    triggers: hashbrown::HashMap<NodeId, TriggerRole>,
    /// row id -> open parent id
    active_parent_by_row: hashbrown::HashMap<String, String>,
    /// (parent id, row id) -> open child id
    active_child_by_parent_row: hashbrown::HashMap<(String, String), String>,
    narrow_parent_guard: ActivationGuard<String>,
    narrow_child_guard: ActivationGuard<String>,
}

impl DisclosureMachine {
    /// Create an unbound machine for `section` hosted on `surface`.
    pub fn new(surface: Surface, section: Section, surface_root: NodeId) -> Self {
        Self {
            surface,
            section,
            surface_root,
            located: LocatedSection::default(),
            bound: false,
            triggers: hashbrown::HashMap::new(),
            active_parent_by_row: hashbrown::HashMap::new(),
            active_child_by_parent_row: hashbrown::HashMap::new(),
            narrow_parent_guard: ActivationGuard::new(NARROW_PARENT_SUPPRESS_MS),
            narrow_child_guard: ActivationGuard::new(NARROW_CHILD_SUPPRESS_MS),
        }
    }

    /// The hosting surface.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// The governed section.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Whether [`bind`](Self::bind) has run since construction or the last
    /// teardown.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Whether the machine is still waiting for its modal surface to become
    /// visible before binding.
    pub fn is_deferred(&self) -> bool {
        self.surface.is_modal() && !self.bound
    }

    /// Number of trigger elements this machine holds bindings for.
    pub fn binding_count(&self) -> usize {
        self.triggers.len()
    }

    /// The element resolution from the last [`bind`](Self::bind).
    pub fn located(&self) -> &LocatedSection {
        &self.located
    }

    /// The open wide parent in `row`, if any.
    pub fn active_parent(&self, row: &str) -> Option<&str> {
        self.active_parent_by_row.get(row).map(String::as_str)
    }

    /// The open wide child under `parent_id` in `row`, if any.
    pub fn active_child(&self, parent_id: &str, row: &str) -> Option<&str> {
        self.active_child_by_parent_row
            .get(&(parent_id.to_string(), row.to_string()))
            .map(String::as_str)
    }

    /// Locate the section's elements and claim its trigger elements.
    ///
    /// Triggers already bound in `registry` are skipped, so a repeated
    /// initialization run never stacks a second handler on an element.
    /// Returns the number of bindings claimed by this call.
    pub fn bind<O: Clone>(
        &mut self,
        tree: &SurfaceTree,
        registry: &mut BindingRegistry<NodeId, O>,
        owner: O,
    ) -> usize {
        self.located = locator::locate(tree, self.surface_root, self.section);

        let mut candidates: Vec<(NodeId, TriggerRole)> = Vec::new();
        if let Some(wide) = self.located.wide {
            for node in tree.all_with_attr_prefix(wide, attr::WIDE_TOGGLE, prefix::PARENT) {
                let Some(id) = tree.attr(node, attr::WIDE_TOGGLE) else {
                    continue;
                };
                let Some(row) = tree.attr(node, attr::WIDE_ROW) else {
                    log::warn!("wide trigger '{id}' carries no row attribute; skipped");
                    continue;
                };
                candidates.push((
                    node,
                    TriggerRole::WideParent {
                        id: id.to_string(),
                        row: row.to_string(),
                    },
                ));
            }
            for node in tree.all_with_attr(wide, attr::WIDE_CHILD) {
                let Some(id) = tree.attr(node, attr::WIDE_CHILD) else {
                    continue;
                };
                let Some(row) = tree.attr(node, attr::WIDE_ROW) else {
                    log::warn!("wide child trigger '{id}' carries no row attribute; skipped");
                    continue;
                };
                candidates.push((
                    node,
                    TriggerRole::WideChild {
                        id: id.to_string(),
                        row: row.to_string(),
                    },
                ));
            }
        }
        if let Some(narrow) = self.located.narrow {
            for node in tree.all_with_attr(narrow, attr::NARROW_TOGGLE) {
                let Some(id) = tree.attr(node, attr::NARROW_TOGGLE) else {
                    continue;
                };
                let role = if id.starts_with(prefix::CHILD) {
                    TriggerRole::NarrowChild { id: id.to_string() }
                } else if id.starts_with(prefix::PARENT) {
                    TriggerRole::NarrowParent { id: id.to_string() }
                } else {
                    log::warn!("narrow trigger '{id}' has an unrecognized prefix; skipped");
                    continue;
                };
                candidates.push((node, role));
            }
        }

        let mut claimed = 0;
        for (node, role) in candidates {
            if registry.try_bind(node, owner.clone()) {
                self.triggers.insert(node, role);
                claimed += 1;
            } else {
                log::debug!(
                    "trigger already bound elsewhere; skipped on {}/{}",
                    self.surface.name(),
                    self.section.as_str()
                );
            }
        }
        self.bound = true;
        log::debug!(
            "bound {claimed} trigger(s) for {}/{}",
            self.surface.name(),
            self.section.as_str()
        );
        claimed
    }

    /// Release this machine's trigger bindings and forget all state.
    ///
    /// Element classes are not rewritten; the next [`bind`](Self::bind)
    /// re-resolves everything from the tree.
    pub fn teardown<O>(&mut self, registry: &mut BindingRegistry<NodeId, O>) {
        for node in self.triggers.keys() {
            registry.release(node);
        }
        self.triggers.clear();
        self.active_parent_by_row.clear();
        self.active_child_by_parent_row.clear();
        self.narrow_parent_guard.clear();
        self.narrow_child_guard.clear();
        self.located = LocatedSection::default();
        self.bound = false;
    }

    /// Dispatch a click on `node` at `now_ms`.
    pub fn handle_click(
        &mut self,
        tree: &mut SurfaceTree,
        node: NodeId,
        now_ms: u64,
    ) -> ToggleOutcome {
        let Some(role) = self.triggers.get(&node).cloned() else {
            return ToggleOutcome::Ignored;
        };
        match role {
            TriggerRole::WideParent { id, row } => self.toggle_wide_parent(tree, node, &id, &row),
            TriggerRole::WideChild { id, row } => self.toggle_wide_child(tree, node, &id, &row),
            TriggerRole::NarrowParent { id } => self.toggle_narrow(tree, node, &id, false, now_ms),
            TriggerRole::NarrowChild { id } => self.toggle_narrow(tree, node, &id, true, now_ms),
        }
    }

    fn toggle_wide_parent(
        &mut self,
        tree: &mut SurfaceTree,
        toggle: NodeId,
        id: &str,
        row: &str,
    ) -> ToggleOutcome {
        let Some(wide) = self.located.wide else {
            return ToggleOutcome::Ignored;
        };
        let Some(region) = wide_parent_region(tree, wide, id, row) else {
            log::warn!("no expanded-content region for '{id}' in row {row}; state untouched");
            return ToggleOutcome::Ignored;
        };

        if self.active_parent_by_row.get(row).map(String::as_str) == Some(id) {
            self.active_parent_by_row.remove(row);
            self.close_wide_child(tree, id, row);
            apply_open(tree, toggle, region, attr::WIDE_ICON, false);
            return ToggleOutcome::Closed;
        }

        if let Some(previous) = self.active_parent_by_row.remove(row) {
            self.close_wide_child(tree, &previous, row);
            if let Some(prev_toggle) = self.wide_parent_node(&previous, row) {
                tree.remove_class(prev_toggle, class::ACTIVE);
                if let Some(icon) = icon_in(tree, prev_toggle, attr::WIDE_ICON) {
                    tree.remove_class(icon, class::ROTATED);
                }
            }
            if let Some(prev_region) = wide_parent_region(tree, wide, &previous, row) {
                tree.add_class(prev_region, class::HIDDEN);
            }
        }

        self.active_parent_by_row
            .insert(row.to_string(), id.to_string());
        apply_open(tree, toggle, region, attr::WIDE_ICON, true);
        ToggleOutcome::Opened
    }

    fn toggle_wide_child(
        &mut self,
        tree: &mut SurfaceTree,
        toggle: NodeId,
        child_id: &str,
        row: &str,
    ) -> ToggleOutcome {
        let Some(wide) = self.located.wide else {
            return ToggleOutcome::Ignored;
        };
        let Some(region) = tree.first_with_attr_eq(wide, attr::WIDE_GRANDCHILD, child_id) else {
            log::warn!("no grandchild-content region for '{child_id}'; state untouched");
            return ToggleOutcome::Ignored;
        };

        let key = (parent_id_of(child_id), row.to_string());
        if self.active_child_by_parent_row.get(&key).map(String::as_str) == Some(child_id) {
            self.active_child_by_parent_row.remove(&key);
            apply_open(tree, toggle, region, attr::WIDE_CHILD_ICON, false);
            return ToggleOutcome::Closed;
        }

        if let Some(previous) = self.active_child_by_parent_row.remove(&key) {
            if let Some(prev_toggle) = self.wide_child_node(&previous, row) {
                tree.remove_class(prev_toggle, class::ACTIVE);
                if let Some(icon) = icon_in(tree, prev_toggle, attr::WIDE_CHILD_ICON) {
                    tree.remove_class(icon, class::ROTATED);
                }
            }
            if let Some(prev_region) =
                tree.first_with_attr_eq(wide, attr::WIDE_GRANDCHILD, &previous)
            {
                tree.add_class(prev_region, class::HIDDEN);
            }
        }

        self.active_child_by_parent_row
            .insert(key, child_id.to_string());
        apply_open(tree, toggle, region, attr::WIDE_CHILD_ICON, true);
        ToggleOutcome::Opened
    }

    /// Close the open wide child under (`parent_id`, `row`), visuals included.
    fn close_wide_child(&mut self, tree: &mut SurfaceTree, parent_id: &str, row: &str) {
        let key = (parent_id.to_string(), row.to_string());
        let Some(child_id) = self.active_child_by_parent_row.remove(&key) else {
            return;
        };
        if let Some(toggle) = self.wide_child_node(&child_id, row) {
            tree.remove_class(toggle, class::ACTIVE);
            if let Some(icon) = icon_in(tree, toggle, attr::WIDE_CHILD_ICON) {
                tree.remove_class(icon, class::ROTATED);
            }
        }
        if let Some(wide) = self.located.wide {
            if let Some(region) = tree.first_with_attr_eq(wide, attr::WIDE_GRANDCHILD, &child_id) {
                tree.add_class(region, class::HIDDEN);
            }
        }
    }

    fn toggle_narrow(
        &mut self,
        tree: &mut SurfaceTree,
        toggle: NodeId,
        id: &str,
        child: bool,
        now_ms: u64,
    ) -> ToggleOutcome {
        let guard = if child {
            &mut self.narrow_child_guard
        } else {
            &mut self.narrow_parent_guard
        };
        if !guard.allow(id.to_string(), now_ms) {
            log::debug!("duplicate activation of '{id}' suppressed");
            return ToggleOutcome::Suppressed;
        }

        let Some(narrow) = self.located.narrow else {
            return ToggleOutcome::Ignored;
        };
        let Some(region) = tree.first_with_attr_eq(narrow, attr::NARROW_CONTENT, id) else {
            log::warn!("no content region for '{id}'; state untouched");
            return ToggleOutcome::Ignored;
        };

        let hidden_after = tree.toggle_class(region, class::HIDDEN);
        if let Some(icon) = icon_in(tree, toggle, attr::NARROW_ICON) {
            if hidden_after {
                tree.remove_class(icon, class::ROTATED);
            } else {
                tree.add_class(icon, class::ROTATED);
            }
        }
        if hidden_after {
            tree.remove_class(toggle, class::ACTIVE);
        } else {
            tree.add_class(toggle, class::ACTIVE);
        }

        if hidden_after && !child {
            self.collapse_narrow_descendants(tree, region);
        }
        if hidden_after {
            ToggleOutcome::Closed
        } else {
            ToggleOutcome::Opened
        }
    }

    /// Collapse everything nested under a closing narrow parent region.
    fn collapse_narrow_descendants(&self, tree: &mut SurfaceTree, region: NodeId) {
        for content in tree.all_with_class(region, class::NARROW_GRANDCHILD_CONTENT) {
            tree.add_class(content, class::HIDDEN);
        }
        for header in tree.all_with_class(region, class::NARROW_CHILD_HEADER) {
            for toggle in tree.all_with_attr(header, attr::NARROW_TOGGLE) {
                tree.remove_class(toggle, class::ACTIVE);
            }
            for icon in tree.all_with_attr(header, attr::NARROW_ICON) {
                tree.remove_class(icon, class::ROTATED);
            }
        }
    }

    /// Collapse every disclosure on both variants and forget all state.
    ///
    /// Applied when the layout crosses into the narrow range, where stale
    /// wide state would otherwise leak into the other variant's rendering.
    pub fn reset_state(&mut self, tree: &mut SurfaceTree) {
        let open: Vec<(String, String)> = self
            .active_parent_by_row
            .iter()
            .map(|(row, parent)| (row.clone(), parent.clone()))
            .collect();
        for (row, parent) in open {
            self.close_wide_child(tree, &parent, &row);
            if let Some(toggle) = self.wide_parent_node(&parent, &row) {
                tree.remove_class(toggle, class::ACTIVE);
                if let Some(icon) = icon_in(tree, toggle, attr::WIDE_ICON) {
                    tree.remove_class(icon, class::ROTATED);
                }
            }
            if let Some(wide) = self.located.wide {
                if let Some(region) = wide_parent_region(tree, wide, &parent, &row) {
                    tree.add_class(region, class::HIDDEN);
                }
            }
        }
        self.active_parent_by_row.clear();

        // Children recorded without an open parent still get closed.
        let stragglers: Vec<(String, String)> =
            self.active_child_by_parent_row.keys().cloned().collect();
        for (parent, row) in stragglers {
            self.close_wide_child(tree, &parent, &row);
        }

        self.clear_narrow_state(tree);
    }

    /// Collapse the narrow variant only, leaving wide state intact.
    ///
    /// Applied when the layout crosses into the wide range: the wide
    /// accordion keeps whatever the user had open, but hidden narrow markup
    /// must not come back expanded on the next narrow visit.
    pub fn clear_narrow_state(&mut self, tree: &mut SurfaceTree) {
        if let Some(narrow) = self.located.narrow {
            for region in tree.all_with_attr(narrow, attr::NARROW_CONTENT) {
                tree.add_class(region, class::HIDDEN);
            }
            for content in tree.all_with_class(narrow, class::NARROW_GRANDCHILD_CONTENT) {
                tree.add_class(content, class::HIDDEN);
            }
            for toggle in tree.all_with_attr(narrow, attr::NARROW_TOGGLE) {
                tree.remove_class(toggle, class::ACTIVE);
            }
            for icon in tree.all_with_attr(narrow, attr::NARROW_ICON) {
                tree.remove_class(icon, class::ROTATED);
            }
        }
        self.narrow_parent_guard.clear();
        self.narrow_child_guard.clear();
    }

    fn wide_parent_node(&self, id: &str, row: &str) -> Option<NodeId> {
        self.triggers.iter().find_map(|(node, role)| match role {
            TriggerRole::WideParent { id: tid, row: trow } if tid == id && trow == row => {
                Some(*node)
            }
            _ => None,
        })
    }

    fn wide_child_node(&self, id: &str, row: &str) -> Option<NodeId> {
        self.triggers.iter().find_map(|(node, role)| match role {
            TriggerRole::WideChild { id: tid, row: trow } if tid == id && trow == row => {
                Some(*node)
            }
            _ => None,
        })
    }
}

fn icon_in(tree: &SurfaceTree, node: NodeId, name: &str) -> Option<NodeId> {
    tree.select_first(node, |t, n| t.attr(n, name).is_some())
}

fn wide_parent_region(tree: &SurfaceTree, wide: NodeId, id: &str, row: &str) -> Option<NodeId> {
    tree.select_first(wide, |t, n| {
        t.attr(n, attr::WIDE_EXPANDED) == Some(id)
            && t.attr(n, attr::WIDE_EXPANDED_ROW) == Some(row)
    })
}

/// Write the open/closed visual state for a wide trigger and its region.
fn apply_open(tree: &mut SurfaceTree, toggle: NodeId, region: NodeId, icon_attr: &str, open: bool) {
    let icon = icon_in(tree, toggle, icon_attr);
    if open {
        tree.remove_class(region, class::HIDDEN);
        tree.add_class(toggle, class::ACTIVE);
        if let Some(icon) = icon {
            tree.add_class(icon, class::ROTATED);
        }
    } else {
        tree.add_class(region, class::HIDDEN);
        tree.remove_class(toggle, class::ACTIVE);
        if let Some(icon) = icon {
            tree.remove_class(icon, class::ROTATED);
        }
    }
}
