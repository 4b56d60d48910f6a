// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite containers: expand/collapse, fit to children, inner content geometry.

use kurbo::{Point, Rect, Size, Vec2};
use tracing::debug;

use crate::metrics::FitRule;
use crate::tree::Tree;
use crate::types::NodeId;

/// Something that can be expanded and collapsed.
///
/// Only composite nodes implement this, through [`CompositeMut`]. Code that
/// toggles (a header click, a toggle glyph) holds a `Toggleable` and never has
/// to ask whether a node supports it.
pub trait Toggleable {
    /// Returns `true` while expanded.
    fn is_expanded(&self) -> bool;

    /// Expand or collapse, refitting the height and updating the visibility of
    /// attached descendants.
    fn set_expanded(&mut self, expanded: bool);

    /// Flip the state and return the new one.
    fn toggle(&mut self) -> bool {
        let expanded = !self.is_expanded();
        self.set_expanded(expanded);
        expanded
    }
}

/// Mutable view of a composite node, obtained from [`Tree::composite_mut`].
#[derive(Debug)]
pub struct CompositeMut<'a> {
    tree: &'a mut Tree,
    id: NodeId,
}

impl CompositeMut<'_> {
    /// The viewed node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Move every attached child back onto its remembered offset.
    pub fn reposition_attached_children(&mut self) {
        self.tree.reposition_attached_children(self.id);
    }
}

impl Toggleable for CompositeMut<'_> {
    fn is_expanded(&self) -> bool {
        self.tree.is_expanded(self.id).unwrap_or(false)
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.tree.apply_expanded(self.id, expanded);
    }
}

impl Tree {
    /// View a node as a composite, or `None` for leaves and stale ids.
    pub fn composite_mut(&mut self, id: NodeId) -> Option<CompositeMut<'_>> {
        self.node_opt(id)?.composite.as_ref()?;
        Some(CompositeMut { tree: self, id })
    }

    /// Toggle a composite and return its new expanded state.
    pub fn toggle(&mut self, id: NodeId) -> Option<bool> {
        Some(self.composite_mut(id)?.toggle())
    }

    /// Expand or collapse a composite. Returns `false` for leaves and stale ids.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        match self.composite_mut(id) {
            Some(mut c) => {
                c.set_expanded(expanded);
                true
            }
            None => false,
        }
    }

    /// Scene-space anchor below the header where attached children are placed.
    ///
    /// Always derived from the current rect. `None` for leaves.
    pub fn inner_content_origin(&self, id: NodeId) -> Option<Point> {
        let node = self.node_opt(id)?;
        node.composite.as_ref()?;
        let m = &self.metrics;
        Some(node.rect.origin() + Vec2::new(m.inner_pad, m.header_height + m.inner_pad))
    }

    /// Scene-space rectangle used for attachment tests.
    ///
    /// Empty while the composite is collapsed, so nothing can attach to it.
    /// `None` for leaves.
    pub fn inner_content_area(&self, id: NodeId) -> Option<Rect> {
        let node = self.node_opt(id)?;
        let composite = node.composite.as_ref()?;
        let r = node.rect;
        if !composite.expanded {
            return Some(Rect::from_origin_size(r.origin(), Size::ZERO));
        }
        let m = &self.metrics;
        let inset = m.containment_inset;
        Some(Rect::new(
            r.x0 + inset,
            r.y0 + m.header_height + inset,
            r.x1 - inset,
            r.y1 - inset,
        ))
    }

    /// Move every attached child of `id` to its parent's inner content origin
    /// plus its remembered offset.
    ///
    /// Idempotent: a second call without intervening changes moves nothing.
    pub fn reposition_attached_children(&mut self, id: NodeId) {
        let Some(base) = self.inner_content_origin(id) else {
            return;
        };
        for child in self.attached_children(id) {
            let target = base + self.node(child).relative_offset;
            self.move_to(child, target);
        }
    }

    /// Size the composite takes when it is (re)expanded now.
    ///
    /// Fits every owned child, attached or not, according to the kind's
    /// [`FitRule`], or uses the empty body height when there are none. Composites that remember their content
    /// size never go below it.
    pub fn expanded_size(&self, id: NodeId) -> Option<Size> {
        let node = self.node_opt(id)?;
        let composite = node.composite.as_ref()?;
        let m = &self.metrics;
        let heights = composite
            .children
            .iter()
            .map(|&c| self.node(c).rect.height());
        let count = heights.len();
        let fit = if count == 0 {
            m.header_height + composite.policy.empty_body_height
        } else {
            let body = match composite.policy.fit {
                FitRule::Tallest => heights.fold(0.0, f64::max),
                FitRule::Stacked => heights.sum::<f64>() + m.stack_gap * (count - 1) as f64,
            };
            m.header_height + m.inner_pad + body + m.inner_pad
        };
        let width = node.rect.width();
        Some(match composite.content_size {
            Some(remembered) => Size::new(width.max(remembered.width), fit.max(remembered.height)),
            None => Size::new(width, fit),
        })
    }

    pub(crate) fn apply_expanded(&mut self, id: NodeId, expanded: bool) {
        let collapsed_height = self.metrics.collapsed_height();
        let size = if expanded {
            self.expanded_size(id)
        } else {
            self.rect(id).map(|r| Size::new(r.width(), collapsed_height))
        };
        let Some(size) = size else {
            return;
        };
        let origin = self.node(id).rect.origin();
        if let Some(c) = self.node_mut(id).composite.as_mut() {
            c.expanded = expanded;
        }
        debug!(?id, expanded, width = size.width, height = size.height, "toggled composite");
        self.set_rect(id, Rect::from_origin_size(origin, size));
        for child in self.attached_children(id) {
            self.sync_visibility(child);
        }
        self.on_resized(id);
    }
}
