// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped section locating: which rendered copy of a section do we govern?
//!
//! The same logical section can be rendered redundantly — once in a visible
//! page region and again inside a hidden overlay copy. The locator resolves
//! that ambiguity deterministically instead of surfacing it as an error.

use coppice_surface_tree::{NodeId, SurfaceTree, is_visible};

use crate::markup::{attr, class};
use crate::types::Section;

/// Result of locating a section within a surface.
#[derive(Clone, Debug, Default)]
pub struct LocatedSection {
    /// Nearest section-root element (`data-content` match) of the chosen
    /// candidate, or the direct fallback match within the surface.
    pub section_root: Option<NodeId>,
    /// Chosen wide-variant component, if any matched.
    pub wide: Option<NodeId>,
    /// Narrow-variant component under the section root, if any.
    pub narrow: Option<NodeId>,
    /// Whether the chosen candidate sits inside a modal overlay and must
    /// wait for the overlay's first visibility before binding.
    ///
    /// The orchestrator keys deferral on the hosting surface's modality
    /// instead, which subsumes this flag for its fixed surface set; the flag
    /// is the per-candidate signal for hosts driving machines directly.
    pub deferred: bool,
}

/// Preference rank for a wide-variant candidate. Lower is better.
fn rank(tree: &SurfaceTree, candidate: NodeId, in_modal: bool) -> u8 {
    if in_modal {
        2
    } else if is_visible(tree, candidate) {
        0
    } else {
        1
    }
}

fn in_modal(tree: &SurfaceTree, candidate: NodeId) -> bool {
    tree.closest(candidate, |t, n| {
        t.has_class(n, class::NAV_OVERLAY) || t.has_class(n, class::CATEGORY_OVERLAY)
    })
    .is_some()
}

/// Locate the wide and narrow components governing `section` within
/// `surface_root`.
///
/// Candidates are all wide-variant component roots under the surface whose
/// nearest enclosing section root carries the section's id. The first
/// candidate of the best rank wins: (0) visible outside any modal overlay,
/// (1) hidden outside any modal overlay, (2) inside a modal overlay —
/// flagged [`LocatedSection::deferred`]. If no wide candidate matches, the
/// section root is resolved directly within the surface and only the narrow
/// component (if present under it) is located.
pub fn locate(tree: &SurfaceTree, surface_root: NodeId, section: Section) -> LocatedSection {
    let mut best: Option<(u8, NodeId, NodeId)> = None;

    for candidate in tree.all_with_class(surface_root, class::WIDE_COMPONENT) {
        let Some(section_root) =
            tree.closest(candidate, |t, n| t.attr(n, attr::SECTION).is_some())
        else {
            continue;
        };
        if tree.attr(section_root, attr::SECTION) != Some(section.as_str()) {
            continue;
        }
        let rank = rank(tree, candidate, in_modal(tree, candidate));
        // Strictly-better keeps the first candidate of each rank.
        if best.is_none_or(|(best_rank, _, _)| rank < best_rank) {
            best = Some((rank, candidate, section_root));
        }
        if rank == 0 {
            break;
        }
    }

    let mut located = match best {
        Some((rank, wide, section_root)) => LocatedSection {
            section_root: Some(section_root),
            wide: Some(wide),
            narrow: None,
            deferred: rank == 2,
        },
        None => LocatedSection {
            section_root: tree.first_with_attr_eq(surface_root, attr::SECTION, section.as_str()),
            wide: None,
            narrow: None,
            deferred: false,
        },
    };

    if let Some(section_root) = located.section_root {
        located.narrow = tree.first_with_class(section_root, class::NARROW_COMPONENT);
    }
    if located.section_root.is_none() {
        log::debug!(
            "section '{}' not present under this surface",
            section.as_str()
        );
    }
    located
}
