// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Orchestrator: lifecycle wiring for disclosure surfaces.
//!
//! The [`DisclosureSystem`] is the single object a host embeds. It owns the
//! per-section [`coppice_disclosure::DisclosureMachine`]s, the flat header
//! manager, the modal overlay and bottom panel controllers, the shared
//! trigger [`coppice_event_state::BindingRegistry`], and the visibility
//! watches that delay work on modal surfaces until first reveal.
//!
//! The host's contract is small:
//!
//! - call [`DisclosureSystem::initialize_all`] after each document render
//!   (re-running is safe; the previous generation is torn down first),
//! - forward clicks through [`DisclosureSystem::dispatch_click`] with a
//!   millisecond timestamp,
//! - report viewport resizes through [`DisclosureSystem::note_resize`],
//! - call [`DisclosureSystem::pump`] from its frame or idle loop so
//!   deferred binding and the debounced layout reconciliation can run.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_orchestrator::DisclosureSystem;
//! use coppice_surface_tree::{ElementData, SurfaceTree};
//! use kurbo::Size;
//!
//! let mut tree = SurfaceTree::new();
//! let document = tree.insert(None, ElementData::new().with_size(Size::new(1280.0, 800.0)));
//!
//! let mut system = DisclosureSystem::new(1280.0);
//! system.initialize_all(&tree, document);
//!
//! // No disclosure markup in this document; the system simply has nothing
//! // bound, and pumping is a cheap no-op.
//! assert_eq!(system.status().trigger_bindings, 0);
//! system.pump(&mut tree, 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod overlay;
mod panel;
mod registry;
mod system;

pub use overlay::OverlayController;
pub use panel::BottomPanelController;
pub use registry::{MachineKey, MachineRegistry, OwnerKey};
pub use system::{DisclosureSystem, SystemStatus};
