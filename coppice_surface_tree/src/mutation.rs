// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation records appended by the tree and drained by the host.
//!
//! Every attribute, class, style, or child-list write on a
//! [`SurfaceTree`](crate::SurfaceTree) appends one [`MutationRecord`] to an
//! in-order log. Hosts drain the log with
//! [`SurfaceTree::take_mutations`](crate::SurfaceTree::take_mutations) and
//! feed the records to whatever is observing — typically a deferred
//! activation watch that only cares about style/class changes on one node.
//!
//! Records carry a monotonically increasing `epoch` so consumers can reason
//! about ordering across separate drains.

use alloc::string::String;

use crate::types::NodeId;

bitflags::bitflags! {
    /// Mask of mutation categories an observer is interested in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MutationInterest: u8 {
        /// Attribute writes and removals.
        const ATTRIBUTES = 0b0000_0001;
        /// Class-list membership changes.
        const CLASSES    = 0b0000_0010;
        /// Reduced-style or layout-size changes.
        const STYLE      = 0b0000_0100;
        /// Child insertion or subtree removal.
        const CHILD_LIST = 0b0000_1000;
    }
}

impl Default for MutationInterest {
    fn default() -> Self {
        Self::all()
    }
}

/// What changed on the target element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationKind {
    /// An attribute was written or removed.
    Attribute {
        /// Name of the attribute that changed.
        name: String,
    },
    /// The class list changed membership.
    Classes,
    /// The reduced style or layout size changed.
    Style,
    /// A child was inserted or a subtree removed.
    ChildList,
}

impl MutationKind {
    /// The interest category this kind belongs to.
    pub fn interest(&self) -> MutationInterest {
        match self {
            Self::Attribute { .. } => MutationInterest::ATTRIBUTES,
            Self::Classes => MutationInterest::CLASSES,
            Self::Style => MutationInterest::STYLE,
            Self::ChildList => MutationInterest::CHILD_LIST,
        }
    }
}

/// One recorded change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    /// Element the change applied to. For child-list changes this is the
    /// parent, not the inserted or removed child.
    pub target: NodeId,
    /// What changed.
    pub kind: MutationKind,
    /// Monotonic sequence number across the tree's lifetime.
    pub epoch: u64,
}

impl MutationRecord {
    /// Whether this record matches an interest mask and an optional target.
    pub fn matches(&self, interest: MutationInterest, target: Option<NodeId>) -> bool {
        interest.contains(self.kind.interest()) && target.is_none_or(|t| t == self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn kind_maps_to_interest() {
        assert_eq!(
            MutationKind::Attribute {
                name: "data-content".to_string()
            }
            .interest(),
            MutationInterest::ATTRIBUTES
        );
        assert_eq!(MutationKind::Classes.interest(), MutationInterest::CLASSES);
        assert_eq!(MutationKind::Style.interest(), MutationInterest::STYLE);
        assert_eq!(
            MutationKind::ChildList.interest(),
            MutationInterest::CHILD_LIST
        );
    }

    #[test]
    fn matches_filters_by_interest_and_target() {
        let a = NodeId::new(0, 1);
        let b = NodeId::new(1, 1);
        let record = MutationRecord {
            target: a,
            kind: MutationKind::Classes,
            epoch: 7,
        };

        assert!(record.matches(MutationInterest::all(), None));
        assert!(record.matches(MutationInterest::CLASSES, Some(a)));
        assert!(!record.matches(MutationInterest::CLASSES, Some(b)));
        assert!(!record.matches(MutationInterest::STYLE, Some(a)));
        assert!(record.matches(
            MutationInterest::CLASSES | MutationInterest::STYLE,
            Some(a)
        ));
    }
}
