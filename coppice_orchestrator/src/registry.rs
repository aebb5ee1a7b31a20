// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit machine ownership, keyed by (surface, section).

use coppice_disclosure::{DisclosureMachine, Section, Surface};
use coppice_event_state::BindingRegistry;
use coppice_surface_tree::NodeId;

/// Identity of one machine instance within the system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MachineKey {
    /// Hosting surface.
    pub surface: Surface,
    /// Governed section.
    pub section: Section,
}

/// Who holds a given trigger binding in the system-wide registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OwnerKey {
    /// A disclosure machine.
    Machine(MachineKey),
    /// The flat header manager.
    Headers,
    /// An overlay controller.
    Overlay(Surface),
    /// The bottom panel controller.
    Panel,
}

/// Holds every live machine instance, addressable by [`MachineKey`].
///
/// The registry is the single place machines live; re-initialization tears
/// every one of them down through the shared [`BindingRegistry`] before
/// anything is rebuilt, which is what makes repeat initialization runs
/// idempotent.
#[derive(Debug, Default)]
pub struct MachineRegistry {
    machines: hashbrown::HashMap<MachineKey, DisclosureMachine>,
}

impl MachineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the machine for `key`.
    pub fn insert(&mut self, key: MachineKey, machine: DisclosureMachine) {
        self.machines.insert(key, machine);
    }

    /// The machine for `key`, if present.
    pub fn get(&self, key: MachineKey) -> Option<&DisclosureMachine> {
        self.machines.get(&key)
    }

    /// Mutable access to the machine for `key`.
    pub fn get_mut(&mut self, key: MachineKey) -> Option<&mut DisclosureMachine> {
        self.machines.get_mut(&key)
    }

    /// Iterate over all machines.
    pub fn iter(&self) -> impl Iterator<Item = (&MachineKey, &DisclosureMachine)> {
        self.machines.iter()
    }

    /// Iterate mutably over all machines.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&MachineKey, &mut DisclosureMachine)> {
        self.machines.iter_mut()
    }

    /// Mutable access to every machine hosted on `surface`.
    pub fn on_surface_mut(
        &mut self,
        surface: Surface,
    ) -> impl Iterator<Item = &mut DisclosureMachine> {
        self.machines
            .iter_mut()
            .filter_map(move |(key, machine)| (key.surface == surface).then_some(machine))
    }

    /// Tear down every machine, releasing its bindings, then drop them all.
    pub fn teardown_all(&mut self, bindings: &mut BindingRegistry<NodeId, OwnerKey>) {
        for machine in self.machines.values_mut() {
            machine.teardown(bindings);
        }
        self.machines.clear();
    }

    /// Number of live machines.
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    /// Whether no machines are live.
    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coppice_surface_tree::{ElementData, SurfaceTree};

    #[test]
    fn teardown_all_releases_every_binding() {
        let mut tree = SurfaceTree::new();
        let root = tree.insert(None, ElementData::new());
        let mut registry = MachineRegistry::new();
        let mut bindings: BindingRegistry<NodeId, OwnerKey> = BindingRegistry::new();

        for section in [Section::Main, Section::Sub1] {
            let key = MachineKey {
                surface: Surface::BottomPanel,
                section,
            };
            let mut machine = DisclosureMachine::new(key.surface, key.section, root);
            machine.bind(&tree, &mut bindings, OwnerKey::Machine(key));
            registry.insert(key, machine);
        }
        assert_eq!(registry.len(), 2);

        registry.teardown_all(&mut bindings);
        assert!(registry.is_empty());
        assert!(bindings.is_empty());
    }

    #[test]
    fn surface_filtering() {
        let mut tree = SurfaceTree::new();
        let root = tree.insert(None, ElementData::new());
        let mut registry = MachineRegistry::new();
        for (surface, section) in [
            (Surface::BottomPanel, Section::Main),
            (Surface::BottomPanel, Section::Sub1),
            (Surface::NavigationOverlay, Section::Main),
        ] {
            let key = MachineKey { surface, section };
            registry.insert(key, DisclosureMachine::new(surface, section, root));
        }

        assert_eq!(registry.on_surface_mut(Surface::BottomPanel).count(), 2);
        assert_eq!(registry.on_surface_mut(Surface::NavigationOverlay).count(), 1);
        assert_eq!(registry.on_surface_mut(Surface::CategoryOverlay).count(), 0);
    }
}
