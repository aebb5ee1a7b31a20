// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core vocabulary: surfaces, sections, responsive layout.

use alloc::string::{String, ToString};

use crate::markup::class;

/// A top-level container that can host disclosure sections.
///
/// Surfaces are a fixed set, each identified by a marker class on its root
/// element. They are re-queried across initialization runs, never recreated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Surface {
    /// The full-page navigation overlay.
    NavigationOverlay,
    /// The category-selection overlay.
    CategoryOverlay,
    /// The persistent bottom panel.
    BottomPanel,
}

impl Surface {
    /// Every surface, in initialization order.
    pub const ALL: [Self; 3] = [
        Self::NavigationOverlay,
        Self::CategoryOverlay,
        Self::BottomPanel,
    ];

    /// Marker class carried by the surface's root element.
    pub fn marker_class(self) -> &'static str {
        match self {
            Self::NavigationOverlay => class::NAV_OVERLAY,
            Self::CategoryOverlay => class::CATEGORY_OVERLAY,
            Self::BottomPanel => class::BOTTOM_PANEL,
        }
    }

    /// Whether the surface is a modal overlay.
    ///
    /// Machines hosted on a modal surface defer element resolution and
    /// binding until the overlay is first visible.
    pub fn is_modal(self) -> bool {
        matches!(self, Self::NavigationOverlay | Self::CategoryOverlay)
    }

    /// Stable name, used in registry keys and log lines.
    pub fn name(self) -> &'static str {
        match self {
            Self::NavigationOverlay => "modal-menu",
            Self::CategoryOverlay => "modal-category",
            Self::BottomPanel => "bottom-menu",
        }
    }
}

/// A logical filter group, independently instantiated per surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// Primary category filters.
    Main,
    /// First secondary group.
    Sub1,
    /// Second secondary group.
    Sub2,
    /// Primary account filters.
    AccountMain,
    /// First secondary account group.
    AccountSub1,
    /// Second secondary account group.
    AccountSub2,
}

impl Section {
    /// Every section, in initialization order.
    pub const ALL: [Self; 6] = [
        Self::Main,
        Self::Sub1,
        Self::Sub2,
        Self::AccountMain,
        Self::AccountSub1,
        Self::AccountSub2,
    ];

    /// The section identifier as it appears in `data-content` markup.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Sub1 => "sub1",
            Self::Sub2 => "sub2",
            Self::AccountMain => "account-main",
            Self::AccountSub1 => "account-sub1",
            Self::AccountSub2 => "account-sub2",
        }
    }
}

/// Responsive layout variant, selected by viewport width.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Wide layout (viewport at or above the breakpoint).
    Wide,
    /// Narrow layout (viewport below the breakpoint).
    Narrow,
}

impl Layout {
    /// Viewport width at and above which the wide layout applies.
    pub const BREAKPOINT: f64 = 1024.0;

    /// Classify a viewport width.
    pub fn of(viewport_width: f64) -> Self {
        if viewport_width >= Self::BREAKPOINT {
            Self::Wide
        } else {
            Self::Narrow
        }
    }
}

/// Derive a child trigger's owning parent id.
///
/// Parent ids are the first two dash-delimited segments of the child id
/// (`parent-1-shoes-running` belongs to `parent-1`). Ids with fewer than two
/// segments are returned unchanged.
pub fn parent_id_of(child_id: &str) -> String {
    let mut split = child_id.splitn(3, '-');
    match (split.next(), split.next()) {
        (Some(a), Some(b)) => {
            let mut out = String::with_capacity(a.len() + 1 + b.len());
            out.push_str(a);
            out.push('-');
            out.push_str(b);
            out
        }
        _ => child_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_breakpoint_is_inclusive_on_the_wide_side() {
        assert_eq!(Layout::of(1024.0), Layout::Wide);
        assert_eq!(Layout::of(1023.9), Layout::Narrow);
        assert_eq!(Layout::of(390.0), Layout::Narrow);
        assert_eq!(Layout::of(1920.0), Layout::Wide);
    }

    #[test]
    fn parent_id_takes_first_two_segments() {
        assert_eq!(parent_id_of("parent-1-shoes-running"), "parent-1");
        assert_eq!(parent_id_of("parent-2-a"), "parent-2");
        assert_eq!(parent_id_of("parent-3"), "parent-3");
        assert_eq!(parent_id_of("parent"), "parent");
    }

    #[test]
    fn surface_modality() {
        assert!(Surface::NavigationOverlay.is_modal());
        assert!(Surface::CategoryOverlay.is_modal());
        assert!(!Surface::BottomPanel.is_modal());
    }

    #[test]
    fn section_ids_round_trip_markup_values() {
        let ids: alloc::vec::Vec<&str> = Section::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            ids,
            ["main", "sub1", "sub2", "account-main", "account-sub1", "account-sub2"]
        );
    }
}
