// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The disclosure system: one object wiring every component together.

use coppice_disclosure::{
    DisclosureMachine, HeaderToggleManager, Layout, NoticeHub, NotifyError, Section, Surface,
    ToggleNotice, ToggleOutcome,
};
use coppice_event_state::{BindingRegistry, Debouncer};
use coppice_observer::{VisibilityWatch, WatchOutcome};
use coppice_surface_tree::{NodeId, SurfaceTree};

use crate::overlay::OverlayController;
use crate::panel::BottomPanelController;
use crate::registry::{MachineKey, MachineRegistry, OwnerKey};

/// Quiet period after the last viewport resize before reconciling.
const RESIZE_QUIET_MS: u64 = 300;

/// Snapshot of the system's bookkeeping, for logging and diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SystemStatus {
    /// Machines created, bound or not.
    pub machines: usize,
    /// Machines that have completed a binding pass.
    pub bound_machines: usize,
    /// Machines still waiting for their modal surface's first reveal.
    pub deferred_machines: usize,
    /// Trigger elements currently claimed in the binding registry.
    pub trigger_bindings: usize,
    /// Visibility watches still able to fire.
    pub pending_watches: usize,
}

/// Owns and coordinates every disclosure component over one document.
///
/// The host drives the system with four calls: [`initialize_all`] after the
/// document (re)renders, [`dispatch_click`] per click, [`note_resize`] per
/// viewport resize, and [`pump`] from its frame or idle loop. `pump` is
/// where deferred work happens: drained mutation records feed the modal
/// visibility watches, and the resize debouncer's firing triggers the layout
/// reconciliation pass.
///
/// [`initialize_all`]: DisclosureSystem::initialize_all
/// [`dispatch_click`]: DisclosureSystem::dispatch_click
/// [`note_resize`]: DisclosureSystem::note_resize
/// [`pump`]: DisclosureSystem::pump
#[derive(Debug)]
pub struct DisclosureSystem {
    document: Option<NodeId>,
    machines: MachineRegistry,
    headers: HeaderToggleManager,
    bindings: BindingRegistry<NodeId, OwnerKey>,
    notices: NoticeHub,
    watches: hashbrown::HashMap<Surface, VisibilityWatch>,
    overlays: hashbrown::HashMap<Surface, OverlayController>,
    panel: Option<BottomPanelController>,
    resize: Debouncer,
    viewport_width: f64,
}

impl DisclosureSystem {
    /// Create a system for a viewport of the given width.
    pub fn new(viewport_width: f64) -> Self {
        Self {
            document: None,
            machines: MachineRegistry::new(),
            headers: HeaderToggleManager::new(),
            bindings: BindingRegistry::new(),
            notices: NoticeHub::new(),
            watches: hashbrown::HashMap::new(),
            overlays: hashbrown::HashMap::new(),
            panel: None,
            resize: Debouncer::new(RESIZE_QUIET_MS),
            viewport_width,
        }
    }

    /// The layout variant for the current viewport width.
    pub fn layout(&self) -> Layout {
        Layout::of(self.viewport_width)
    }

    /// Register a toggle-notification subscriber.
    pub fn subscribe_toggles(
        &mut self,
        subscriber: impl FnMut(&ToggleNotice) -> Result<(), NotifyError> + 'static,
    ) {
        self.notices.subscribe(subscriber);
    }

    /// Build (or rebuild) every component over `document`.
    ///
    /// Any previous generation is torn down first, releasing all of its
    /// trigger bindings, so running this after each re-render is safe and
    /// never stacks handlers. Machines on modal surfaces are created unbound
    /// and paired with a visibility watch on their overlay root; everything
    /// else binds immediately.
    pub fn initialize_all(&mut self, tree: &SurfaceTree, document: NodeId) {
        self.teardown();
        self.document = Some(document);

        self.headers
            .bind(tree, document, &mut self.bindings, OwnerKey::Headers);

        for surface in Surface::ALL {
            let Some(root) = tree.first_with_class(document, surface.marker_class()) else {
                log::debug!("surface '{}' absent from this document", surface.name());
                continue;
            };
            for section in Section::ALL {
                let key = MachineKey { surface, section };
                let mut machine = DisclosureMachine::new(surface, section, root);
                if !surface.is_modal() {
                    machine.bind(tree, &mut self.bindings, OwnerKey::Machine(key));
                }
                self.machines.insert(key, machine);
            }
            if surface.is_modal() {
                self.watches.insert(surface, VisibilityWatch::new(root));
                if let Some(mut controller) = OverlayController::new(surface, root, document) {
                    controller.bind(tree, &mut self.bindings);
                    self.overlays.insert(surface, controller);
                }
            } else {
                let mut panel = BottomPanelController::new(root, document);
                panel.bind(tree, &mut self.bindings);
                self.panel = Some(panel);
            }
        }

        let status = self.status();
        log::debug!(
            "initialized: {} machine(s), {} binding(s), {} deferred",
            status.machines,
            status.trigger_bindings,
            status.deferred_machines
        );
    }

    fn teardown(&mut self) {
        self.machines.teardown_all(&mut self.bindings);
        self.headers.teardown(&mut self.bindings);
        for controller in self.overlays.values_mut() {
            controller.teardown(&mut self.bindings);
        }
        self.overlays.clear();
        if let Some(mut panel) = self.panel.take() {
            panel.teardown(&mut self.bindings);
        }
        self.watches.clear();
        self.resize.cancel();
        self.document = None;
    }

    /// Route a click on `node` at `now_ms` to whichever component owns it.
    pub fn dispatch_click(
        &mut self,
        tree: &mut SurfaceTree,
        node: NodeId,
        now_ms: u64,
    ) -> ToggleOutcome {
        match self.bindings.owner(&node).copied() {
            Some(OwnerKey::Machine(key)) => match self.machines.get_mut(key) {
                Some(machine) => machine.handle_click(tree, node, now_ms),
                None => ToggleOutcome::Ignored,
            },
            Some(OwnerKey::Headers) => self.headers.handle_click(tree, node, &mut self.notices),
            Some(OwnerKey::Overlay(surface)) => match self.overlays.get_mut(&surface) {
                Some(controller) => controller.handle_click(tree, node),
                None => ToggleOutcome::Ignored,
            },
            Some(OwnerKey::Panel) => match self.panel.as_mut() {
                Some(panel) => panel.handle_click(tree, node),
                None => ToggleOutcome::Ignored,
            },
            None => ToggleOutcome::Ignored,
        }
    }

    /// Record a viewport resize at `now_ms`.
    ///
    /// Nothing reconciles until [`pump`](Self::pump) observes the quiet
    /// period elapsing; a resize burst costs one pass.
    pub fn note_resize(&mut self, viewport_width: f64, now_ms: u64) {
        self.viewport_width = viewport_width;
        self.resize.note(now_ms);
    }

    /// Process deferred work at `now_ms`.
    ///
    /// Drains the tree's mutation log into the modal visibility watches,
    /// binding a surface's machines on its first reveal, and runs the
    /// debounced layout reconciliation: settling wide collapses only the
    /// narrow variants (open wide disclosures survive), settling narrow
    /// resets everything.
    pub fn pump(&mut self, tree: &mut SurfaceTree, now_ms: u64) {
        let records = tree.take_mutations();

        let mut activated: alloc::vec::Vec<Surface> = alloc::vec::Vec::new();
        self.watches.retain(|surface, watch| {
            match watch.observe(tree, &records) {
                WatchOutcome::Pending => true,
                WatchOutcome::BecameVisible => {
                    activated.push(*surface);
                    false
                }
                WatchOutcome::Disconnected => false,
            }
        });
        for surface in activated {
            log::debug!("surface '{}' became visible; binding its machines", surface.name());
            for (key, machine) in self.machines.iter_mut() {
                if key.surface == surface && !machine.is_bound() {
                    machine.bind(tree, &mut self.bindings, OwnerKey::Machine(*key));
                }
            }
        }

        if self.resize.fire(now_ms) {
            match self.layout() {
                Layout::Wide => {
                    log::debug!("viewport settled wide; collapsing narrow variants");
                    for (_, machine) in self.machines.iter_mut() {
                        machine.clear_narrow_state(tree);
                    }
                }
                Layout::Narrow => {
                    log::debug!("viewport settled narrow; resetting all disclosure state");
                    for (_, machine) in self.machines.iter_mut() {
                        machine.reset_state(tree);
                    }
                }
            }
        }
    }

    /// Snapshot the system's bookkeeping.
    pub fn status(&self) -> SystemStatus {
        let bound = self
            .machines
            .iter()
            .filter(|(_, machine)| machine.is_bound())
            .count();
        let deferred = self
            .machines
            .iter()
            .filter(|(_, machine)| machine.is_deferred())
            .count();
        SystemStatus {
            machines: self.machines.len(),
            bound_machines: bound,
            deferred_machines: deferred,
            trigger_bindings: self.bindings.len(),
            pending_watches: self.watches.values().filter(|w| w.is_watching()).count(),
        }
    }

    /// The machine for `key`, if one exists.
    pub fn machine(&self, key: MachineKey) -> Option<&DisclosureMachine> {
        self.machines.get(key)
    }
}
