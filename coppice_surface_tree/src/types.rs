// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the surface tree: node identifiers, style, element data.

use alloc::string::{String, ToString};
use hashbrown::HashMap;
use kurbo::Size;
use smallvec::SmallVec;

/// Identifier for an element in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Reduced display model: either the element generates a box or it does not.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Display {
    /// The element generates a box and participates in layout.
    #[default]
    Block,
    /// The element and its whole subtree are removed from layout.
    None,
}

/// Reduced visibility model.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The element is painted.
    #[default]
    Visible,
    /// The element keeps its box but is not painted.
    Hidden,
}

/// Reduced overflow model, used for the document scroll lock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Content may scroll.
    #[default]
    Visible,
    /// Scrolling is suppressed (scroll lock engaged).
    Hidden,
}

/// Reduced per-element style.
///
/// This covers exactly what the visibility probe and the scroll lock read.
/// Values are the element's own effective style; there is no cascade here,
/// so hosts mirror computed values, not authored ones.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Style {
    /// Whether the element generates a box.
    pub display: Display,
    /// Whether the element is painted.
    pub visibility: Visibility,
    /// Effective opacity in `[0.0, 1.0]`. Zero counts as not rendered.
    pub opacity: f64,
    /// Overflow behavior. Only meaningful on the document root.
    pub overflow: Overflow,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            display: Display::Block,
            visibility: Visibility::Visible,
            opacity: 1.0,
            overflow: Overflow::Visible,
        }
    }
}

/// Per-element data: attributes, classes, style, and layout size.
#[derive(Clone, Debug, Default)]
pub struct ElementData {
    /// String attributes (`data-*`, `aria-*`, and friends).
    pub attributes: HashMap<String, String>,
    /// Utility class list. Order is preserved; membership is what matters.
    pub classes: SmallVec<[String; 4]>,
    /// Reduced style (see [`Style`]).
    pub style: Style,
    /// Size the layout pass assigned to this element. Defaults to zero,
    /// meaning "not laid out"; the visibility probe treats that as hidden.
    pub layout_size: Size,
}

impl ElementData {
    /// Create empty element data (no attributes, no classes, default style,
    /// zero layout size).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class. Intended for building fixtures and initial scenes.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    /// Set an attribute. Intended for building fixtures and initial scenes.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the layout size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.layout_size = size;
        self
    }

    /// Set the reduced style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}
