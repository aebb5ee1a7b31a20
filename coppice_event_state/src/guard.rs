// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed duplicate-activation suppression.

use core::hash::Hash;
use hashbrown::HashMap;

/// Suppresses near-simultaneous repeat activations of the same key.
///
/// Each key remembers the timestamp of its last *allowed* activation. A new
/// activation inside `window_ms` of that timestamp is rejected, and — unlike
/// a throttle that extends itself — a rejected attempt does not refresh the
/// window, so a burst of duplicates drains after one window length.
///
/// Keys are host-defined; scoping the key to (section, toggle id) is what
/// keeps independent machine instances from suppressing each other.
#[derive(Clone, Debug)]
pub struct ActivationGuard<K> {
    window_ms: u64,
    last_allowed: HashMap<K, u64>,
}

impl<K: Eq + Hash> ActivationGuard<K> {
    /// Create a guard with the given suppression window in milliseconds.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_allowed: HashMap::new(),
        }
    }

    /// The configured suppression window in milliseconds.
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Attempt an activation of `key` at `now_ms`.
    ///
    /// Returns `true` (and records the timestamp) if the key has never been
    /// activated or its last allowed activation is at least `window_ms` in
    /// the past. Returns `false` without recording anything otherwise.
    pub fn allow(&mut self, key: K, now_ms: u64) -> bool {
        match self.last_allowed.get(&key) {
            Some(&last) if now_ms.saturating_sub(last) < self.window_ms => false,
            _ => {
                self.last_allowed.insert(key, now_ms);
                true
            }
        }
    }

    /// Forget all recorded activations.
    pub fn clear(&mut self) {
        self.last_allowed.clear();
    }

    /// Number of keys with a recorded activation.
    pub fn len(&self) -> usize {
        self.last_allowed.len()
    }

    /// Whether no key has a recorded activation.
    pub fn is_empty(&self) -> bool {
        self.last_allowed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_activation_is_allowed_even_at_time_zero() {
        let mut guard: ActivationGuard<u32> = ActivationGuard::new(300);
        assert!(guard.allow(1, 0));
    }

    #[test]
    fn duplicate_within_window_is_suppressed() {
        let mut guard: ActivationGuard<u32> = ActivationGuard::new(300);
        assert!(guard.allow(1, 1_000));
        assert!(!guard.allow(1, 1_150));
        assert!(!guard.allow(1, 1_299));
        assert!(guard.allow(1, 1_300));
    }

    #[test]
    fn suppressed_attempts_do_not_extend_the_window() {
        let mut guard: ActivationGuard<u32> = ActivationGuard::new(300);
        assert!(guard.allow(1, 1_000));
        // Hammering inside the window never pushes the deadline out.
        assert!(!guard.allow(1, 1_100));
        assert!(!guard.allow(1, 1_200));
        assert!(guard.allow(1, 1_300));
    }

    #[test]
    fn keys_are_independent() {
        let mut guard: ActivationGuard<(u8, u8)> = ActivationGuard::new(200);
        assert!(guard.allow((0, 1), 500));
        assert!(guard.allow((0, 2), 500));
        assert!(!guard.allow((0, 1), 600));
        assert!(guard.allow((1, 1), 600));
    }

    #[test]
    fn clear_forgets_history() {
        let mut guard: ActivationGuard<u32> = ActivationGuard::new(300);
        assert!(guard.allow(1, 1_000));
        guard.clear();
        assert!(guard.is_empty());
        assert!(guard.allow(1, 1_001));
    }
}
