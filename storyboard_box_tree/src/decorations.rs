// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoration anchors for the renderer, derived from the current rect.

use kurbo::{Point, Rect, Size, Vec2};

use crate::tree::Tree;
use crate::types::NodeId;

const GLYPH_OFFSET: Vec2 = Vec2::new(6.0, 11.0);
const GLYPH_SIZE: Size = Size::new(14.0, 14.0);
const COMPOSITE_TITLE: Vec2 = Vec2::new(24.0, 9.0);
const LEAF_TITLE: Vec2 = Vec2::new(10.0, 8.0);
const LEAF_BODY: Vec2 = Vec2::new(10.0, 32.0);
const MIN_BODY_WIDTH: f64 = 10.0;

/// Scene-space placement of a node's decorations.
///
/// Nothing here is stored; [`Tree::decorations`] recomputes it from the
/// node's state on every call, so renderers should not cache it either.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decorations {
    /// Header band of a composite. `None` for leaves.
    pub header: Option<Rect>,
    /// Top-left of the title text.
    pub title: Point,
    /// Top-left of the body text.
    pub body: Point,
    /// Width available to the body text.
    pub body_width: f64,
    /// Whether the body is shown. Collapsed composites hide it.
    pub body_visible: bool,
    /// Expand/collapse glyph of a composite. `None` for leaves.
    pub toggle_glyph: Option<Rect>,
    /// Square resize handle centered on the bottom-right corner.
    pub resize_handle: Rect,
}

impl Tree {
    /// Decoration anchors of a node, or `None` for stale ids.
    pub fn decorations(&self, id: NodeId) -> Option<Decorations> {
        let node = self.node_opt(id)?;
        let m = &self.metrics;
        let r = node.rect;
        let origin = r.origin();
        let resize_handle = Rect::from_center_size(
            Point::new(r.x1, r.y1),
            Size::new(2.0 * m.handle_half, 2.0 * m.handle_half),
        );
        Some(match node.composite.as_ref() {
            Some(composite) => Decorations {
                header: Some(Rect::from_origin_size(
                    origin,
                    Size::new(r.width(), m.header_height),
                )),
                title: origin + COMPOSITE_TITLE,
                body: origin + Vec2::new(m.inner_pad, m.header_height + m.inner_pad),
                body_width: (r.width() - 2.0 * m.inner_pad).max(MIN_BODY_WIDTH),
                body_visible: composite.expanded,
                toggle_glyph: Some(Rect::from_origin_size(origin + GLYPH_OFFSET, GLYPH_SIZE)),
                resize_handle,
            },
            None => Decorations {
                header: None,
                title: origin + LEAF_TITLE,
                body: origin + LEAF_BODY,
                body_width: (r.width() - 2.0 * LEAF_TITLE.x).max(MIN_BODY_WIDTH),
                body_visible: true,
                toggle_glyph: None,
                resize_handle,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewNode, NodeKind};

    #[test]
    fn composite_anchors_follow_rect() {
        let mut tree = Tree::new();
        let step = tree
            .insert(
                None,
                NewNode::detached(NodeKind::Step, Size::new(220.0, 300.0), Point::new(100.0, 50.0)),
            )
            .unwrap();
        let d = tree.decorations(step).unwrap();
        assert_eq!(d.header, Some(Rect::new(100.0, 50.0, 320.0, 86.0)));
        assert_eq!(d.toggle_glyph, Some(Rect::new(106.0, 61.0, 120.0, 75.0)));
        assert_eq!(d.title, Point::new(124.0, 59.0));
        assert_eq!(d.body, Point::new(112.0, 98.0));
        assert_eq!(d.body_width, 196.0);
        assert!(d.body_visible);
        assert_eq!(d.resize_handle, Rect::new(314.0, 344.0, 326.0, 356.0));

        tree.toggle(step);
        let d = tree.decorations(step).unwrap();
        assert!(!d.body_visible);
        assert_eq!(d.resize_handle.center(), Point::new(320.0, 94.0));
    }

    #[test]
    fn leaf_anchors_and_narrow_body() {
        let mut tree = Tree::new();
        let beat = tree
            .insert(None, NewNode::detached(NodeKind::Beat, Size::new(196.0, 140.0), Point::ZERO))
            .unwrap();
        let d = tree.decorations(beat).unwrap();
        assert_eq!(d.header, None);
        assert_eq!(d.toggle_glyph, None);
        assert_eq!(d.title, Point::new(10.0, 8.0));
        assert_eq!(d.body, Point::new(10.0, 32.0));
        assert_eq!(d.body_width, 176.0);

        tree.resize_to(beat, Size::new(15.0, 80.0));
        assert_eq!(tree.decorations(beat).unwrap().body_width, 10.0);
    }

    #[test]
    fn stale_id_has_no_decorations() {
        assert!(Tree::new().decorations(NodeId::new(0)).is_none());
    }
}
