// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The markup contract: attribute names, value prefixes, and marker classes.
//!
//! These strings are the wire contract between the markup and the state
//! machines. Trigger attributes pair an identifier with a content region
//! (`data-pc-expanded-content` + `data-pc-expanded-row` locate the region
//! for a wide parent; `data-pc-grandchild-content` locates the region for a
//! wide child), and identifier prefixes distinguish trigger levels. The
//! machines own every class listed here within their governed subtrees;
//! co-located widgets must neither read nor write them.

/// Attribute names consumed from markup.
pub mod attr {
    /// Section root identifier (`main`, `sub1`, …).
    pub const SECTION: &str = "data-content";
    /// Wide-variant parent trigger; value is prefixed `parent-`.
    pub const WIDE_TOGGLE: &str = "data-pc-toggle";
    /// Row position of a wide-variant trigger.
    pub const WIDE_ROW: &str = "data-pc-row";
    /// Wide-variant child trigger; value is a child id.
    pub const WIDE_CHILD: &str = "data-pc-child";
    /// Content region for a wide parent; value pairs with [`WIDE_TOGGLE`].
    pub const WIDE_EXPANDED: &str = "data-pc-expanded-content";
    /// Row qualifier for [`WIDE_EXPANDED`].
    pub const WIDE_EXPANDED_ROW: &str = "data-pc-expanded-row";
    /// Content region for a wide child; value pairs with [`WIDE_CHILD`].
    pub const WIDE_GRANDCHILD: &str = "data-pc-grandchild-content";
    /// Indicator icon inside a wide parent trigger.
    pub const WIDE_ICON: &str = "data-pc-icon";
    /// Indicator icon inside a wide child trigger.
    pub const WIDE_CHILD_ICON: &str = "data-pc-child-icon";
    /// Narrow-variant trigger; value is prefixed `parent-` or `child-`.
    pub const NARROW_TOGGLE: &str = "data-sp-toggle";
    /// Content region for a narrow trigger; value pairs with [`NARROW_TOGGLE`].
    pub const NARROW_CONTENT: &str = "data-sp-content";
    /// Indicator icon inside a narrow trigger.
    pub const NARROW_ICON: &str = "data-sp-icon";
    /// Flat header trigger; value names a [`SECTION`] id.
    pub const HEADER_TOGGLE: &str = "data-toggle";
    /// Indicator icon inside a flat header.
    pub const HEADER_ICON: &str = "data-icon";
    /// Mirrored expansion state on overlay trigger buttons.
    pub const ARIA_EXPANDED: &str = "aria-expanded";
}

/// Identifier prefixes within trigger attribute values.
pub mod prefix {
    /// Parent-level trigger values.
    pub const PARENT: &str = "parent-";
    /// Child-level trigger values.
    pub const CHILD: &str = "child-";
}

/// Marker and state classes.
pub mod class {
    /// Collapses an element; re-exported probe contract.
    pub use coppice_surface_tree::HIDDEN_CLASS as HIDDEN;

    /// Open/active state on triggers, buttons, and panel sections.
    pub const ACTIVE: &str = "active";
    /// Rotated state on indicator icons.
    pub const ROTATED: &str = "rotate-180";

    /// Wide-variant component root of a section.
    pub const WIDE_COMPONENT: &str = "prj-filter-category-pc-component";
    /// Narrow-variant component root of a section.
    pub const NARROW_COMPONENT: &str = "prj-filter-category-sp-component";
    /// Narrow-variant grandchild content region.
    pub const NARROW_GRANDCHILD_CONTENT: &str = "prj-filter-category-sp-grandchild-content";
    /// Narrow-variant child header wrapper.
    pub const NARROW_CHILD_HEADER: &str = "prj-filter-category-sp-child-header";

    /// Flat accordion header.
    pub const HEADER: &str = "prj-filter-menu-accordion-header";
    /// Category section root (flat accordion scope).
    pub const CATEGORY_SECTION: &str = "category-search-section";
    /// Account section root (flat accordion scope).
    pub const ACCOUNT_SECTION: &str = "account-search-section";

    /// Navigation overlay surface root.
    pub const NAV_OVERLAY: &str = "prj-modal-menu-component";
    /// Category overlay surface root.
    pub const CATEGORY_OVERLAY: &str = "prj-modal-category-component";
    /// Bottom panel surface root.
    pub const BOTTOM_PANEL: &str = "prj-bottom-menu-component";

    /// Navigation overlay trigger (hamburger button).
    pub const NAV_TRIGGER: &str = "prj-header-hamburger-button";
    /// Navigation overlay close button.
    pub const NAV_CLOSE: &str = "prj-modal-menu-close";
    /// Navigation overlay backdrop.
    pub const NAV_BACKDROP: &str = "prj-modal-menu-overlay";
    /// Category overlay trigger buttons (may appear several times).
    pub const CATEGORY_TRIGGER: &str = "prj-button-category-component";
    /// Category overlay close button.
    pub const CATEGORY_CLOSE: &str = "prj-modal-category-close";
    /// Category overlay cancel button.
    pub const CATEGORY_CANCEL: &str = "prj-modal-category-cancel";
    /// Category overlay backdrop.
    pub const CATEGORY_BACKDROP: &str = "prj-modal-category-overlay";

    /// Bottom panel filter button.
    pub const PANEL_FILTER_BUTTON: &str = "prj-bottom-menu-footer-button-filter";
    /// Bottom panel stats button.
    pub const PANEL_STATS_BUTTON: &str = "prj-bottom-menu-footer-button-stats";
    /// Bottom panel account button.
    pub const PANEL_ACCOUNT_BUTTON: &str = "prj-bottom-menu-footer-button-account";
    /// Bottom panel filter section.
    pub const PANEL_FILTER_SECTION: &str = "prj-bottom-menu-filter-section";
    /// Bottom panel stats section.
    pub const PANEL_STATS_SECTION: &str = "prj-bottom-menu-stats-section";
    /// Bottom panel account section.
    pub const PANEL_ACCOUNT_SECTION: &str = "prj-bottom-menu-account-section";
    /// Bottom panel shared body.
    pub const PANEL_BODY: &str = "prj-bottom-menu-body";
    /// Bottom panel backdrop.
    pub const PANEL_BACKDROP: &str = "prj-bottom-menu-overlay";
}
