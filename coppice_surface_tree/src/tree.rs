// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, mutation, queries.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use kurbo::Size;

use crate::mutation::{MutationKind, MutationRecord};
use crate::types::{Display, ElementData, NodeId, Overflow, Style, Visibility};

/// Headless element tree.
///
/// Elements live in a generational slot arena: a [`NodeId`] embeds its slot
/// index and the generation it was created in, so handles to removed
/// elements go stale instead of aliasing a reused slot. All accessors return
/// `None`/empty for stale ids; nothing panics.
///
/// Every write that an observer could care about (attributes, classes,
/// style, layout size, child list) appends a [`MutationRecord`] to an
/// internal log. The host drains the log with [`SurfaceTree::take_mutations`]
/// at whatever cadence suits its event loop.
///
/// ## Example
///
/// ```rust
/// use coppice_surface_tree::{ElementData, SurfaceTree};
///
/// let mut tree = SurfaceTree::new();
/// let root = tree.insert(None, ElementData::new().with_class("surface"));
/// let child = tree.insert(Some(root), ElementData::new().with_attr("data-content", "main"));
///
/// assert_eq!(tree.parent_of(child), Some(root));
/// assert_eq!(tree.attr(child, "data-content"), Some("main"));
/// assert_eq!(tree.first_with_attr_eq(root, "data-content", "main"), Some(child));
/// ```
pub struct SurfaceTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    epoch: u64,
    log: Vec<MutationRecord>,
}

impl core::fmt::Debug for SurfaceTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("SurfaceTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("epoch", &self.epoch)
            .field("pending_mutations", &self.log.len())
            .finish_non_exhaustive()
    }
}

impl Default for SurfaceTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: ElementData,
}

impl SurfaceTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            epoch: 0,
            log: Vec::new(),
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let node = self.nodes.get(id.idx())?.as_ref()?;
        (node.generation == id.1).then_some(node)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let node = self.nodes.get_mut(id.idx())?.as_mut()?;
        (node.generation == id.1).then_some(node)
    }

    fn record(&mut self, target: NodeId, kind: MutationKind) {
        self.epoch += 1;
        self.log.push(MutationRecord {
            target,
            kind,
            epoch: self.epoch,
        });
    }

    /// Insert a new element under `parent` (or as a root when `None`).
    ///
    /// Records a child-list mutation on the parent. Inserting under a stale
    /// parent id creates a detached root instead.
    pub fn insert(&mut self, parent: Option<NodeId>, data: ElementData) -> NodeId {
        let parent = parent.filter(|p| self.node(*p).is_some());
        let id = match self.free_list.pop() {
            Some(idx) => {
                let generation = self.generations[idx] + 1;
                self.generations[idx] = generation;
                let id = NodeId::new(idx as u32, generation);
                self.nodes[idx] = Some(Node {
                    generation,
                    parent,
                    children: Vec::new(),
                    data,
                });
                id
            }
            None => {
                let idx = self.nodes.len();
                let generation = 1;
                self.generations.push(generation);
                let id = NodeId::new(idx as u32, generation);
                self.nodes.push(Some(Node {
                    generation,
                    parent,
                    children: Vec::new(),
                    data,
                }));
                id
            }
        };
        if let Some(p) = parent {
            if let Some(parent_node) = self.node_mut(p) {
                parent_node.children.push(id);
            }
            self.record(p, MutationKind::ChildList);
        }
        id
    }

    /// Remove an element and its whole subtree.
    ///
    /// Records a child-list mutation on the former parent. Stale ids are a
    /// no-op.
    pub fn remove(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let parent = node.parent;
        let mut stack = alloc::vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.idx()).and_then(Option::take) {
                stack.extend(node.children);
                self.free_list.push(current.idx());
            }
        }
        if let Some(p) = parent {
            if let Some(parent_node) = self.node_mut(p) {
                parent_node.children.retain(|c| *c != id);
            }
            self.record(p, MutationKind::ChildList);
        }
    }

    /// Whether `id` refers to a live element.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Parent of a live element, if any.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Children of a live element, in insertion order.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element data of a live element.
    pub fn data(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).map(|n| &n.data)
    }

    // --- attributes -------------------------------------------------------

    /// Attribute value, if present.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.data.attributes.get(name).map(String::as_str)
    }

    /// Write an attribute. Records a mutation only when the value actually
    /// changes.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let changed = node.data.attributes.get(name).map(String::as_str) != Some(value);
        if changed {
            node.data
                .attributes
                .insert(name.to_string(), value.to_string());
            self.record(
                id,
                MutationKind::Attribute {
                    name: name.to_string(),
                },
            );
        }
    }

    /// Remove an attribute. Records a mutation only when it was present.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.data.attributes.remove(name).is_some() {
            self.record(
                id,
                MutationKind::Attribute {
                    name: name.to_string(),
                },
            );
        }
    }

    // --- classes ----------------------------------------------------------

    /// Whether the element carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id)
            .is_some_and(|n| n.data.classes.iter().any(|c| c == class))
    }

    /// Add a class. Records a mutation only on a membership change.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if !node.data.classes.iter().any(|c| c == class) {
            node.data.classes.push(class.to_string());
            self.record(id, MutationKind::Classes);
        }
    }

    /// Remove a class. Records a mutation only on a membership change.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let before = node.data.classes.len();
        node.data.classes.retain(|c| c != class);
        if node.data.classes.len() != before {
            self.record(id, MutationKind::Classes);
        }
    }

    /// Toggle a class; returns whether it is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            self.contains(id)
        }
    }

    // --- style and layout -------------------------------------------------

    /// Reduced style of a live element.
    pub fn style(&self, id: NodeId) -> Option<Style> {
        self.node(id).map(|n| n.data.style)
    }

    /// Layout size of a live element (zero for stale ids).
    pub fn layout_size(&self, id: NodeId) -> Size {
        self.node(id).map(|n| n.data.layout_size).unwrap_or_default()
    }

    /// Set the display mode. Records a style mutation on change.
    pub fn set_display(&mut self, id: NodeId, display: Display) {
        self.update_style(id, |s| {
            let changed = s.display != display;
            s.display = display;
            changed
        });
    }

    /// Set the visibility. Records a style mutation on change.
    pub fn set_visibility(&mut self, id: NodeId, visibility: Visibility) {
        self.update_style(id, |s| {
            let changed = s.visibility != visibility;
            s.visibility = visibility;
            changed
        });
    }

    /// Set the opacity. Records a style mutation on change.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f64) {
        self.update_style(id, |s| {
            let changed = s.opacity != opacity;
            s.opacity = opacity;
            changed
        });
    }

    /// Set the overflow behavior. Records a style mutation on change.
    pub fn set_overflow(&mut self, id: NodeId, overflow: Overflow) {
        self.update_style(id, |s| {
            let changed = s.overflow != overflow;
            s.overflow = overflow;
            changed
        });
    }

    /// Set the layout size. Records a style mutation on change.
    pub fn set_layout_size(&mut self, id: NodeId, size: Size) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.data.layout_size != size {
            node.data.layout_size = size;
            self.record(id, MutationKind::Style);
        }
    }

    fn update_style(&mut self, id: NodeId, f: impl FnOnce(&mut Style) -> bool) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if f(&mut node.data.style) {
            self.record(id, MutationKind::Style);
        }
    }

    // --- traversal and queries --------------------------------------------

    /// Nearest ancestor-or-self matching the predicate.
    pub fn closest(
        &self,
        id: NodeId,
        pred: impl Fn(&Self, NodeId) -> bool,
    ) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if !self.contains(node) {
                return None;
            }
            if pred(self, node) {
                return Some(node);
            }
            current = self.parent_of(node);
        }
        None
    }

    /// All descendants of `root` in depth-first document order, excluding
    /// `root` itself.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.node(root) else {
            return out;
        };
        let mut stack: Vec<NodeId> = node.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if let Some(node) = self.node(current) {
                out.push(current);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// First descendant of `root` (document order) matching the predicate.
    pub fn select_first(
        &self,
        root: NodeId,
        pred: impl Fn(&Self, NodeId) -> bool,
    ) -> Option<NodeId> {
        self.descendants(root).into_iter().find(|n| pred(self, *n))
    }

    /// All descendants of `root` (document order) matching the predicate.
    pub fn select_all(
        &self,
        root: NodeId,
        pred: impl Fn(&Self, NodeId) -> bool,
    ) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| pred(self, *n))
            .collect()
    }

    /// First descendant carrying `class`.
    pub fn first_with_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.select_first(root, |t, n| t.has_class(n, class))
    }

    /// All descendants carrying `class`.
    pub fn all_with_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.select_all(root, |t, n| t.has_class(n, class))
    }

    /// First descendant where attribute `name` equals `value`.
    pub fn first_with_attr_eq(&self, root: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.select_first(root, |t, n| t.attr(n, name) == Some(value))
    }

    /// All descendants carrying attribute `name` (any value).
    pub fn all_with_attr(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.select_all(root, |t, n| t.attr(n, name).is_some())
    }

    /// All descendants where attribute `name` starts with `prefix`.
    pub fn all_with_attr_prefix(&self, root: NodeId, name: &str, prefix: &str) -> Vec<NodeId> {
        self.select_all(root, |t, n| {
            t.attr(n, name).is_some_and(|v| v.starts_with(prefix))
        })
    }

    // --- mutation log -----------------------------------------------------

    /// Drain all pending mutation records, in the order they occurred.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        core::mem::take(&mut self.log)
    }

    /// Number of pending (undrained) mutation records.
    pub fn pending_mutations(&self) -> usize {
        self.log.len()
    }

    /// Current mutation epoch (total writes over the tree's lifetime).
    pub fn mutation_epoch(&self) -> u64 {
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::MutationKind;

    #[test]
    fn insert_and_parent_links() {
        let mut tree = SurfaceTree::new();
        let root = tree.insert(None, ElementData::new());
        let a = tree.insert(Some(root), ElementData::new());
        let b = tree.insert(Some(root), ElementData::new());

        assert_eq!(tree.parent_of(a), Some(root));
        assert_eq!(tree.children_of(root), &[a, b]);
        assert!(tree.parent_of(root).is_none());
    }

    #[test]
    fn removed_ids_go_stale_and_slots_are_reused() {
        let mut tree = SurfaceTree::new();
        let root = tree.insert(None, ElementData::new());
        let child = tree.insert(Some(root), ElementData::new());

        tree.remove(child);
        assert!(!tree.contains(child));
        assert!(tree.children_of(root).is_empty());

        let reused = tree.insert(Some(root), ElementData::new());
        // Same slot, different generation: the old handle stays dead.
        assert!(tree.contains(reused));
        assert!(!tree.contains(child));
        assert_ne!(child, reused);
    }

    #[test]
    fn remove_takes_whole_subtree() {
        let mut tree = SurfaceTree::new();
        let root = tree.insert(None, ElementData::new());
        let mid = tree.insert(Some(root), ElementData::new());
        let leaf = tree.insert(Some(mid), ElementData::new());

        tree.remove(mid);
        assert!(!tree.contains(mid));
        assert!(!tree.contains(leaf));
        assert!(tree.contains(root));
    }

    #[test]
    fn attribute_writes_record_only_changes() {
        let mut tree = SurfaceTree::new();
        let node = tree.insert(None, ElementData::new());
        tree.take_mutations();

        tree.set_attr(node, "aria-expanded", "true");
        tree.set_attr(node, "aria-expanded", "true"); // no-op
        tree.set_attr(node, "aria-expanded", "false");
        tree.remove_attr(node, "missing"); // no-op

        let records = tree.take_mutations();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| matches!(
            &r.kind,
            MutationKind::Attribute { name } if name == "aria-expanded"
        )));
        assert!(records[0].epoch < records[1].epoch);
    }

    #[test]
    fn class_toggle_reports_membership() {
        let mut tree = SurfaceTree::new();
        let node = tree.insert(None, ElementData::new().with_class("active"));

        assert!(!tree.toggle_class(node, "active"));
        assert!(tree.toggle_class(node, "active"));
        assert!(tree.has_class(node, "active"));

        tree.add_class(node, "active"); // no-op, already present
        tree.take_mutations();
        tree.add_class(node, "active");
        assert!(tree.take_mutations().is_empty());
    }

    #[test]
    fn closest_walks_ancestors_inclusive() {
        let mut tree = SurfaceTree::new();
        let root = tree.insert(None, ElementData::new().with_class("surface"));
        let mid = tree.insert(Some(root), ElementData::new().with_attr("data-content", "main"));
        let leaf = tree.insert(Some(mid), ElementData::new());

        assert_eq!(
            tree.closest(leaf, |t, n| t.attr(n, "data-content").is_some()),
            Some(mid)
        );
        assert_eq!(tree.closest(leaf, |t, n| t.has_class(n, "surface")), Some(root));
        assert_eq!(tree.closest(mid, |t, n| t.attr(n, "data-content").is_some()), Some(mid));
        assert!(tree.closest(leaf, |t, n| t.has_class(n, "absent")).is_none());
    }

    #[test]
    fn descendant_queries_are_document_order_and_scoped() {
        let mut tree = SurfaceTree::new();
        let root = tree.insert(None, ElementData::new());
        let first = tree.insert(Some(root), ElementData::new().with_class("item"));
        let nested = tree.insert(Some(first), ElementData::new().with_class("item"));
        let second = tree.insert(Some(root), ElementData::new().with_class("item"));
        let outside = tree.insert(None, ElementData::new().with_class("item"));

        assert_eq!(tree.all_with_class(root, "item"), alloc::vec![first, nested, second]);
        assert_eq!(tree.first_with_class(root, "item"), Some(first));
        // Root itself and unrelated roots are excluded.
        assert!(!tree.all_with_class(root, "item").contains(&outside));
    }

    #[test]
    fn attr_prefix_query() {
        let mut tree = SurfaceTree::new();
        let root = tree.insert(None, ElementData::new());
        let parent = tree.insert(
            Some(root),
            ElementData::new().with_attr("data-pc-toggle", "parent-1"),
        );
        let child = tree.insert(
            Some(root),
            ElementData::new().with_attr("data-pc-toggle", "child-1-a"),
        );

        assert_eq!(
            tree.all_with_attr_prefix(root, "data-pc-toggle", "parent-"),
            alloc::vec![parent]
        );
        assert_eq!(tree.all_with_attr(root, "data-pc-toggle"), alloc::vec![parent, child]);
    }

    #[test]
    fn stale_ids_are_defensive_no_ops() {
        let mut tree = SurfaceTree::new();
        let node = tree.insert(None, ElementData::new());
        tree.remove(node);
        tree.take_mutations();

        tree.set_attr(node, "x", "y");
        tree.add_class(node, "c");
        tree.set_display(node, Display::None);
        assert!(tree.take_mutations().is_empty());
        assert!(tree.attr(node, "x").is_none());
        assert!(!tree.toggle_class(node, "c"));
    }
}
