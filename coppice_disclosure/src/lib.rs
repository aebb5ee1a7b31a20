// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Disclosure: multi-level disclosure state machines.
//!
//! This crate turns clicks on trigger elements into accordion state over a
//! [`coppice_surface_tree::SurfaceTree`]. It covers three disclosure styles:
//!
//! - [`DisclosureMachine`]: one nested parent/child accordion per
//!   ([`Surface`], [`Section`]) pair, with a wide variant (at most one open
//!   parent per row, one open child per parent) and a narrow variant
//!   (independent toggles with duplicate-activation suppression).
//! - [`HeaderToggleManager`]: flat single-level headers in the category and
//!   account search sections, with section-qualified [`ToggleNotice`]
//!   notifications through a [`NoticeHub`].
//! - [`locate`]: the scoped locating pass that picks which rendered copy of
//!   a section a machine governs when the markup is duplicated across
//!   surfaces, preferring visible non-modal copies and flagging modal ones
//!   for deferred binding.
//!
//! Machines never consult a wall clock; every click carries a host-supplied
//! millisecond timestamp. Trigger ownership goes through a shared
//! [`coppice_event_state::BindingRegistry`], so repeated initialization runs
//! are idempotent by construction.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_disclosure::{DisclosureMachine, Section, Surface, ToggleOutcome, markup};
//! use coppice_event_state::BindingRegistry;
//! use coppice_surface_tree::{ElementData, NodeId, SurfaceTree};
//! use kurbo::Size;
//!
//! let mut tree = SurfaceTree::new();
//! let sized = || ElementData::new().with_size(Size::new(200.0, 50.0));
//! let surface = tree.insert(None, sized().with_class(markup::class::BOTTOM_PANEL));
//! let section = tree.insert(Some(surface), sized().with_attr(markup::attr::SECTION, "main"));
//! let wide = tree.insert(Some(section), sized().with_class(markup::class::WIDE_COMPONENT));
//! let toggle = tree.insert(
//!     Some(wide),
//!     sized()
//!         .with_attr(markup::attr::WIDE_TOGGLE, "parent-1")
//!         .with_attr(markup::attr::WIDE_ROW, "1"),
//! );
//! let region = tree.insert(
//!     Some(wide),
//!     sized()
//!         .with_attr(markup::attr::WIDE_EXPANDED, "parent-1")
//!         .with_attr(markup::attr::WIDE_EXPANDED_ROW, "1")
//!         .with_class(markup::class::HIDDEN),
//! );
//!
//! let mut machine = DisclosureMachine::new(Surface::BottomPanel, Section::Main, surface);
//! let mut registry: BindingRegistry<NodeId, &str> = BindingRegistry::new();
//! machine.bind(&tree, &mut registry, "bottom-menu/main");
//!
//! assert_eq!(machine.handle_click(&mut tree, toggle, 0), ToggleOutcome::Opened);
//! assert!(!tree.has_class(region, markup::class::HIDDEN));
//! assert_eq!(machine.active_parent("1"), Some("parent-1"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod header;
mod locator;
mod machine;
pub mod markup;
mod notify;
mod types;

pub use header::HeaderToggleManager;
pub use locator::{LocatedSection, locate};
pub use machine::{DisclosureMachine, ToggleOutcome, TriggerRole};
pub use notify::{NoticeHub, NotifyError, ToggleNotice};
pub use types::{Layout, Section, Surface, parent_id_of};
