// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use storyboard_box_tree::NodeId;
use thiserror::Error;

/// Misuse of the [`Editor`](crate::Editor) entry points.
///
/// None of these leave the tree in a changed state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum EditorError {
    /// The id does not belong to the edited tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// A header or toggle gesture was aimed at a leaf.
    #[error("node {0:?} is not a composite")]
    NotComposite(NodeId),
    /// A move or release arrived without a matching press.
    #[error("no active gesture")]
    NoActiveGesture,
}
