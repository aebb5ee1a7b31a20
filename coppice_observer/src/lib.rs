// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coppice Observer: deferred activation monitoring.
//!
//! Machines hosted inside a modal overlay must not resolve elements or bind
//! triggers while the overlay has never been shown. A [`VisibilityWatch`]
//! monitors one node — the overlay root — and reports the *first* transition
//! to visible, at most once, after which it is spent.
//!
//! The watch is a pollable state machine, not a callback holder: the host
//! (the orchestrator) drains the tree's mutation log and feeds the records
//! in via [`VisibilityWatch::observe`], then reacts to the returned
//! [`WatchOutcome`]. This keeps visibility detection decoupled from what
//! happens on activation.
//!
//! ## Semantics
//!
//! - The first [`observe`](VisibilityWatch::observe) call always probes,
//!   even with no records: a root that is *already* visible at watch time
//!   activates immediately, with no mutation required.
//! - Later calls probe only when some record is a style or class change on
//!   the watched root; unrelated mutations are ignored.
//! - [`WatchOutcome::BecameVisible`] is returned exactly once. Every call
//!   after that (or after [`disconnect`](VisibilityWatch::disconnect))
//!   returns [`WatchOutcome::Disconnected`], regardless of further
//!   mutations.
//!
//! ## Minimal example
//!
//! ```rust
//! use coppice_observer::{VisibilityWatch, WatchOutcome};
//! use coppice_surface_tree::{ElementData, HIDDEN_CLASS, SurfaceTree};
//! use kurbo::Size;
//!
//! let mut tree = SurfaceTree::new();
//! let overlay = tree.insert(
//!     None,
//!     ElementData::new()
//!         .with_class(HIDDEN_CLASS)
//!         .with_size(Size::new(375.0, 667.0)),
//! );
//!
//! let mut watch = VisibilityWatch::new(overlay);
//! // Hidden at watch time: nothing happens yet.
//! let records = tree.take_mutations();
//! assert_eq!(watch.observe(&tree, &records), WatchOutcome::Pending);
//!
//! // Revealing the overlay is the mutation the watch is waiting for.
//! tree.remove_class(overlay, HIDDEN_CLASS);
//! let records = tree.take_mutations();
//! assert_eq!(watch.observe(&tree, &records), WatchOutcome::BecameVisible);
//!
//! // Spent: later mutations never re-fire.
//! assert_eq!(watch.observe(&tree, &[]), WatchOutcome::Disconnected);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use coppice_surface_tree::{MutationInterest, MutationRecord, NodeId, SurfaceTree, is_visible};

/// Result of feeding mutations to a [`VisibilityWatch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The root is still not visible; keep feeding mutations.
    Pending,
    /// First transition to visible. Returned exactly once per watch.
    BecameVisible,
    /// The watch already fired or was disconnected; it will never fire.
    Disconnected,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Waiting,
    Spent,
}

/// Watches one node for its first transition to visible.
///
/// See the [crate docs](crate) for the full semantics.
#[derive(Clone, Debug)]
pub struct VisibilityWatch {
    root: NodeId,
    state: State,
    /// False until the first observe call; forces an initial probe so a
    /// root that is already visible activates without any mutation.
    primed: bool,
}

/// Style and class changes are what toggle overlay visibility; everything
/// else (attribute bookkeeping, child churn) is noise to this watch.
const INTEREST: MutationInterest = MutationInterest::STYLE.union(MutationInterest::CLASSES);

impl VisibilityWatch {
    /// Watch `root` for its first transition to visible.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            state: State::Waiting,
            primed: false,
        }
    }

    /// The watched node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether the watch can still fire.
    pub fn is_watching(&self) -> bool {
        self.state == State::Waiting
    }

    /// Feed a batch of drained mutation records.
    ///
    /// Probes the visibility of the watched root when warranted (first call,
    /// or a style/class record targeting the root) and reports the outcome.
    pub fn observe(&mut self, tree: &SurfaceTree, records: &[MutationRecord]) -> WatchOutcome {
        if self.state == State::Spent {
            return WatchOutcome::Disconnected;
        }
        if !tree.contains(self.root) {
            // The watched subtree is gone; nothing to activate.
            log::debug!("visibility watch target removed before activation");
            self.state = State::Spent;
            return WatchOutcome::Disconnected;
        }

        let relevant = !self.primed
            || records
                .iter()
                .any(|r| r.matches(INTEREST, Some(self.root)));
        self.primed = true;

        if relevant && is_visible(tree, self.root) {
            self.state = State::Spent;
            WatchOutcome::BecameVisible
        } else {
            WatchOutcome::Pending
        }
    }

    /// Stop watching. The watch will never fire afterwards.
    pub fn disconnect(&mut self) {
        self.state = State::Spent;
    }
}
