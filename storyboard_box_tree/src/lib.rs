// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storyboard Box Tree: geometry and state for nested, collapsible containers.
//!
//! A storyboard is a four-level tree of rectangles (Act, Sequence, Step, Beat)
//! that the user collapses, drags, resizes, and drops in and out of each other.
//! This crate keeps that tree coherent. It owns the rectangles and the
//! expand/attach state, and answers the queries a renderer needs.
//!
//! - Composites (Act, Sequence, Step) expand and collapse, refit to their
//!   children, and remember a manual size where their policy says so.
//! - Children are either *attached*, slaved to the parent's inner content
//!   origin plus a remembered offset, or *detached* and floating.
//! - Attachment is decided by containment when a drag of the child is released.
//!
//! ## Invariants
//!
//! Every mutating call finishes its cascades before returning, so the following
//! hold between any two calls. There is no layout pass to run.
//!
//! - A composite is [`Metrics::collapsed_height`] tall iff it is collapsed.
//! - Every attached child sits at its parent's
//!   [`inner_content_origin`](Tree::inner_content_origin) plus its
//!   [`relative_offset`](Tree::relative_offset).
//! - A node is visible iff it is a root, is detached, or its parent is visible
//!   and expanded.
//! - Moving, resizing, or collapsing a node never moves or hides a detached
//!   descendant.
//! - Attachment and offsets change only in [`Tree::evaluate_attachment`] (and at
//!   insertion).
//!
//! ## Not a layout engine
//!
//! Apart from the fit rules of [`CompositePolicy`] this crate does no
//! measurement or arrangement. Positions come from the user's drags and the
//! offsets captured when children attach.
//!
//! ## API overview
//!
//! - [`Tree`]: the node arena, its queries, and its mutations.
//! - [`NodeId`], [`NodeKind`], [`NodeFlags`], [`Content`]: per-node identity and state.
//! - [`NewNode`] / [`Placement`]: describe a node to [`Tree::insert`].
//! - [`Toggleable`] / [`CompositeMut`]: expand/collapse, only reachable for composites.
//! - [`Decorations`]: header, title, body, glyph, and handle anchors.
//! - [`Hit`] / [`HitRegion`]: what a pointer press lands on.
//! - [`GridSpec`] / [`Storyboard`]: the default nested grid.
//! - [`Damage`]: regions touched since the last frame.
//!
//! Key operations:
//! - [`Tree::assemble`] builds the initial grid.
//! - [`Tree::move_to`] / [`Tree::move_by`] translate a node with its attached descendants.
//! - [`Tree::resize_to`] resizes and reflows.
//! - [`Tree::toggle`] / [`Tree::set_expanded`] collapse and expand.
//! - [`Tree::evaluate_attachment`] attaches or detaches by containment.
//! - [`Tree::duplicate`] creates a floating copy.
//! - [`Tree::hit_test`] and [`Tree::decorations`] serve the renderer.
//!
//! ## Logging
//!
//! State transitions are reported with `tracing` at `debug` level and
//! per-move geometry at `trace`. The crate never installs a subscriber.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod assembly;
mod attach;
mod composite;
mod damage;
mod decorations;
mod hit;
mod metrics;
mod tree;
mod types;

pub use assembly::{GridSpec, Storyboard};
pub use composite::{CompositeMut, Toggleable};
pub use damage::Damage;
pub use decorations::Decorations;
pub use hit::{Hit, HitRegion};
pub use metrics::{CompositePolicy, FitRule, Metrics};
pub use tree::Tree;
pub use types::{Content, HANDLE_LAYER, NewNode, NodeFlags, NodeId, NodeKind, Placement};
