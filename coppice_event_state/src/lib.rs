// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Event State: clock-injected interaction-state primitives.
//!
//! Three small, host-driven state machines shared by the disclosure crates:
//!
//! - [`ActivationGuard`]: keyed duplicate-activation suppression. Overlapping
//!   listener registration in layered UIs can deliver the same tap twice
//!   within a few frames; the guard rejects a second activation of the same
//!   key inside a configurable window.
//! - [`Debouncer`]: trailing-edge coalescing of event bursts (viewport
//!   resizes) into one pass after a quiet period.
//! - [`BindingRegistry`]: explicit bookkeeping of which owner holds the
//!   single permitted binding for each trigger element, replacing
//!   structural tricks (clone-and-replace) for listener deduplication.
//!
//! No wall clock is consulted anywhere: every time-sensitive call takes a
//! `now_ms: u64` timestamp supplied by the host, which keeps behavior
//! deterministic and tests free of real delays.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_event_state::ActivationGuard;
//!
//! let mut guard: ActivationGuard<&str> = ActivationGuard::new(300);
//!
//! assert!(guard.allow("parent-1", 1_000));
//! // A duplicate 150ms later is suppressed…
//! assert!(!guard.allow("parent-1", 1_150));
//! // …but an unrelated key is not.
//! assert!(guard.allow("parent-2", 1_150));
//! // After the window has passed, the key is live again.
//! assert!(guard.allow("parent-1", 1_300));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod binding;
mod debounce;
mod guard;

pub use binding::BindingRegistry;
pub use debounce::Debouncer;
pub use guard::ActivationGuard;
