// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout constants and per-kind composite policies.

use crate::types::NodeKind;

/// Layout constants shared by every node of a [`Tree`](crate::Tree).
///
/// All values are in scene units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Metrics {
    /// Height of a composite's header strip.
    pub header_height: f64,
    /// Extra height kept below the header while collapsed.
    pub collapsed_margin: f64,
    /// Inset of the inner content origin from the left edge and from the header.
    pub inner_pad: f64,
    /// Inset of the attachment test area from the left, right and bottom edges
    /// and from the header.
    pub containment_inset: f64,
    /// Vertical gap between stacked children (see [`FitRule::Stacked`]).
    pub stack_gap: f64,
    /// Half the side length of the square resize handle.
    pub handle_half: f64,
}

impl Metrics {
    /// Height of every collapsed composite.
    pub fn collapsed_height(&self) -> f64 {
        self.header_height + self.collapsed_margin
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            header_height: 36.0,
            collapsed_margin: 8.0,
            inner_pad: 12.0,
            containment_inset: 6.0,
            stack_gap: 12.0,
            handle_half: 6.0,
        }
    }
}

/// How an expanding composite derives its height from its children.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitRule {
    /// Children sit side by side; fit the tallest one.
    Tallest,
    /// Children are stacked top to bottom with [`Metrics::stack_gap`] between them.
    Stacked,
}

/// The knobs in which Act, Sequence and Step containers differ.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompositePolicy {
    /// Height rule used when expanding with children.
    pub fit: FitRule,
    /// Body height below the header when expanding without any children.
    pub empty_body_height: f64,
    /// Remember the last expanded size and never expand below it.
    pub remember_content_size: bool,
}

impl CompositePolicy {
    /// Policy for a composite kind, or `None` for leaves.
    pub const fn for_kind(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Act => Some(Self {
                fit: FitRule::Tallest,
                empty_body_height: 220.0,
                remember_content_size: false,
            }),
            NodeKind::Sequence => Some(Self {
                fit: FitRule::Tallest,
                empty_body_height: 200.0,
                remember_content_size: false,
            }),
            NodeKind::Step => Some(Self {
                fit: FitRule::Stacked,
                empty_body_height: 120.0,
                remember_content_size: true,
            }),
            NodeKind::Beat => None,
        }
    }
}
