// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attachment by containment, and the visibility rule that follows from it.

use alloc::vec;
use kurbo::{Point, Rect};
use tracing::debug;

use crate::tree::Tree;
use crate::types::{NodeFlags, NodeId};

impl Tree {
    /// Re-evaluate whether `id` is attached to its structural parent.
    ///
    /// Call this when a drag of `id` is released. The node attaches if the
    /// center of its rect lies inside the parent's
    /// [inner content area](Tree::inner_content_area), capturing its offset
    /// from the parent's inner content origin; otherwise it detaches. A
    /// collapsed or degenerate area never contains anything.
    ///
    /// Returns the new attachment state, or `None` for roots and stale ids.
    /// The structural parent never changes.
    pub fn evaluate_attachment(&mut self, id: NodeId) -> Option<bool> {
        let node = self.node_opt(id)?;
        let parent = node.parent?;
        let rect = node.rect;
        let area = self.inner_content_area(parent)?;
        let inner_origin = self.inner_content_origin(parent)?;
        let attached = area_contains(area, rect.center());

        let node = self.node_mut(id);
        if attached {
            node.flags.insert(NodeFlags::ATTACHED);
            node.relative_offset = rect.origin() - inner_origin;
            debug!(?id, ?parent, offset = ?node.relative_offset, "attached");
        } else {
            node.flags.remove(NodeFlags::ATTACHED);
            debug!(?id, ?parent, "detached");
        }
        self.sync_visibility(id);
        Some(attached)
    }

    /// Recompute the visibility of `id` and of its attached descendants.
    ///
    /// Parents are settled before their children, so each node reads an
    /// up-to-date parent flag.
    pub(crate) fn sync_visibility(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let visible = self.derived_visibility(current);
            self.set_visible(current, visible);
            stack.extend(self.attached_children(current));
        }
    }

    fn derived_visibility(&self, id: NodeId) -> bool {
        let node = self.node(id);
        match node.parent {
            Some(p) if node.is_attached() => {
                let parent = self.node(p);
                parent.flags.contains(NodeFlags::VISIBLE) && parent.shows_content()
            }
            _ => true,
        }
    }
}

/// Containment test that treats empty and inverted rects as containing nothing.
fn area_contains(area: Rect, point: Point) -> bool {
    area.width() > 0.0 && area.height() > 0.0 && area.contains(point)
}
