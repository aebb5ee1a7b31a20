// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-effort toggle notifications for read-only collaborators.
//!
//! Analytics and similar collaborators can subscribe to toggle activity
//! without being trusted: emission never waits on a subscriber, a failing
//! subscriber is logged and skipped, and state already applied is never
//! rolled back on a dispatch failure.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// A structured record of one flat-header toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleNotice {
    /// The toggled identifier as carried by the trigger attribute.
    pub toggle_value: String,
    /// Section-qualified identifier, unique across same-named toggles in
    /// different sections.
    pub unique_value: String,
    /// Identifier of the originating section.
    pub section_id: String,
    /// Open state after the toggle.
    pub is_open: bool,
}

/// Error a subscriber may report; carried only into the warning log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifyError(pub String);

impl core::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

type Subscriber = Box<dyn FnMut(&ToggleNotice) -> Result<(), NotifyError>>;

/// Subscriber list for [`ToggleNotice`] dispatch.
#[derive(Default)]
pub struct NoticeHub {
    subscribers: Vec<Subscriber>,
}

impl core::fmt::Debug for NoticeHub {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NoticeHub")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl NoticeHub {
    /// Create a hub with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&ToggleNotice) -> Result<(), NotifyError> + 'static,
    ) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Dispatch a notice to every subscriber, best-effort.
    ///
    /// A subscriber error is logged as a warning; later subscribers still
    /// run and the caller's state is unaffected.
    pub fn emit(&mut self, notice: &ToggleNotice) {
        for subscriber in &mut self.subscribers {
            if let Err(error) = subscriber(notice) {
                log::warn!(
                    "toggle notification subscriber failed for '{}': {}",
                    notice.unique_value,
                    error
                );
            }
        }
    }

    /// Number of registered subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether no subscribers are registered.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
