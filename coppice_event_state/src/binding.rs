// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit bookkeeping of trigger-element bindings.

use core::hash::Hash;
use hashbrown::HashMap;

/// Records which owner holds the single permitted binding for each trigger.
///
/// A trigger element may receive at most one handler for its entire
/// lifetime, no matter how many times initialization logic runs or how many
/// machine instances overlap the same subtree. Instead of marking elements
/// or structurally replacing them to shed stale listeners, owners register
/// here: the first [`try_bind`](BindingRegistry::try_bind) for a key wins
/// and every later attempt — same owner or not — is refused.
///
/// `K` is the trigger identity (typically a node id); `O` identifies the
/// owning machine or manager so teardown can release exactly its bindings.
#[derive(Clone, Debug, Default)]
pub struct BindingRegistry<K, O> {
    bound: HashMap<K, O>,
}

impl<K: Eq + Hash, O> BindingRegistry<K, O> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bound: HashMap::new(),
        }
    }

    /// Claim the binding for `key` on behalf of `owner`.
    ///
    /// Returns `true` if the claim succeeded, `false` if the key is already
    /// bound (a duplicate-binding attempt, silently refused).
    pub fn try_bind(&mut self, key: K, owner: O) -> bool {
        match self.bound.entry(key) {
            hashbrown::hash_map::Entry::Occupied(_) => false,
            hashbrown::hash_map::Entry::Vacant(entry) => {
                entry.insert(owner);
                true
            }
        }
    }

    /// Whether `key` is currently bound.
    pub fn is_bound(&self, key: &K) -> bool {
        self.bound.contains_key(key)
    }

    /// The owner bound to `key`, if any.
    pub fn owner(&self, key: &K) -> Option<&O> {
        self.bound.get(key)
    }

    /// Release the binding for `key`, returning the former owner.
    pub fn release(&mut self, key: &K) -> Option<O> {
        self.bound.remove(key)
    }

    /// Release every binding held by `owner`; returns how many were dropped.
    pub fn release_owner(&mut self, owner: &O) -> usize
    where
        O: PartialEq,
    {
        let before = self.bound.len();
        self.bound.retain(|_, o| o != owner);
        before - self.bound.len()
    }

    /// Release all bindings.
    pub fn clear(&mut self) {
        self.bound.clear();
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    /// Whether no bindings are live.
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Iterate over `(key, owner)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &O)> {
        self.bound.iter()
    }
}
