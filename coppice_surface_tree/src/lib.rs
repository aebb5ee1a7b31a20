// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Surface Tree: a headless element tree for disclosure surfaces.
//!
//! This crate models the slice of a rendered document that disclosure state
//! machines care about: a hierarchy of elements carrying string attributes,
//! utility class lists, a reduced style model, and a layout size. It is the
//! shared substrate for the rest of the Coppice workspace — locators query
//! it, state machines mutate it, and observers consume its mutation log.
//!
//! - Elements live in a generational slot arena; [`NodeId`] handles stay
//!   cheap and detect stale access after removal.
//! - Attribute, class, and style writes are appended to an in-order
//!   [`MutationRecord`] log that hosts drain with
//!   [`SurfaceTree::take_mutations`] and feed to observers.
//! - [`is_visible`] implements the visibility probe: an element counts as
//!   rendered only if its own style does not hide it, its layout size is
//!   non-zero, and no ancestor collapses it.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_surface_tree::{ElementData, SurfaceTree, is_visible};
//! use kurbo::Size;
//!
//! let mut tree = SurfaceTree::new();
//! let root = tree.insert(None, ElementData::new().with_size(Size::new(320.0, 640.0)));
//! let panel = tree.insert(
//!     Some(root),
//!     ElementData::new()
//!         .with_class("hidden")
//!         .with_size(Size::new(320.0, 200.0)),
//! );
//! // Drain the structural mutations recorded during setup.
//! tree.take_mutations();
//!
//! // The `hidden` utility class collapses the element.
//! assert!(!is_visible(&tree, panel));
//!
//! tree.remove_class(panel, "hidden");
//! assert!(is_visible(&tree, panel));
//!
//! // The class change was recorded for observers.
//! let records = tree.take_mutations();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].target, panel);
//! ```
//!
//! ## Not a DOM
//!
//! There is no parsing, no layout, and no cascade. Hosts are expected to
//! mirror whatever subset of their real scene matters: set layout sizes from
//! their layout pass, and keep the reduced [`Style`] in sync with the
//! styles that affect rendering of the governed subtree. The `hidden`
//! utility class is interpreted as display:none because that is what the
//! styling layer defines it to mean.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod mutation;
mod tree;
mod types;
mod visibility;

pub use mutation::{MutationInterest, MutationKind, MutationRecord};
pub use tree::SurfaceTree;
pub use types::{Display, ElementData, NodeId, Overflow, Style, Visibility};
pub use visibility::{HIDDEN_CLASS, is_self_visible, is_visible};
