// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the box tree: node identifiers, kinds, flags, and text content.

use alloc::string::String;
use kurbo::{Point, Size, Vec2};

/// Identifier for a node in the tree.
///
/// Nodes are never removed, so an id stays valid for the lifetime of the
/// [`Tree`](crate::Tree) that issued it. Ids from another tree are rejected by
/// the bounds check in [`Tree::is_alive`](crate::Tree::is_alive) only when they
/// are out of range; do not mix trees.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The four levels of the storyboard hierarchy.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// Top-level container. Usually the single root.
    Act,
    /// Second level container, holds steps side by side.
    Sequence,
    /// Third level container, holds beats stacked vertically.
    Step,
    /// Leaf node.
    Beat,
}

impl NodeKind {
    /// Returns `true` for kinds that own children and can collapse.
    pub const fn is_composite(self) -> bool {
        !matches!(self, Self::Beat)
    }

    /// Fixed paint and hit-test layer. Higher is on top.
    pub const fn layer(self) -> i32 {
        match self {
            Self::Act => 0,
            Self::Sequence => 1,
            Self::Step => 2,
            Self::Beat => 4,
        }
    }

    /// Kind of the children assembled under this kind, if any.
    pub const fn child_kind(self) -> Option<Self> {
        match self {
            Self::Act => Some(Self::Sequence),
            Self::Sequence => Some(Self::Step),
            Self::Step => Some(Self::Beat),
            Self::Beat => None,
        }
    }

    /// Short uppercase label used for default titles.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Act => "ACT",
            Self::Sequence => "SEQ",
            Self::Step => "STEP",
            Self::Beat => "BEAT",
        }
    }
}

/// Layer of resize handles; above every node.
pub const HANDLE_LAYER: i32 = 10;

bitflags::bitflags! {
    /// Per-node state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (painted and hit-testable).
        const VISIBLE  = 0b0000_0001;
        /// Node position is slaved to its parent's inner content origin.
        const ATTACHED = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Title and body text of a node. The engine copies it but never interprets it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Content {
    /// Single line title shown in the header.
    pub title: String,
    /// Free-form body text.
    pub body: String,
}

impl Content {
    /// Content with the given title and the placeholder body.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::from("Body..."),
        }
    }
}

/// Where a newly inserted node is placed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Placement {
    /// Attached to the parent at this offset from its inner content origin.
    ///
    /// For roots the offset is measured from the scene origin and the node is
    /// not flagged as attached.
    Attached(Vec2),
    /// Floating at this scene-space top-left corner.
    Detached(Point),
}

/// Description of a node to insert with [`Tree::insert`](crate::Tree::insert).
#[derive(Clone, Debug)]
pub struct NewNode {
    /// Level of the node.
    pub kind: NodeKind,
    /// Title and body text.
    pub content: Content,
    /// Initial size. Composites start expanded at this size.
    pub size: Size,
    /// Initial placement.
    pub placement: Placement,
}

impl NewNode {
    /// A node of `kind` attached at `offset`, titled with the kind's label.
    pub fn attached(kind: NodeKind, size: Size, offset: Vec2) -> Self {
        Self {
            kind,
            content: Content::titled(kind.label()),
            size,
            placement: Placement::Attached(offset),
        }
    }

    /// A floating node of `kind` with its top-left corner at `origin`.
    pub fn detached(kind: NodeKind, size: Size, origin: Point) -> Self {
        Self {
            kind,
            content: Content::titled(kind.label()),
            size,
            placement: Placement::Detached(origin),
        }
    }

    /// Replace the content.
    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }
}
