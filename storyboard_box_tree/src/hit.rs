// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classify a scene point into the node region a pointer press lands on.

use kurbo::Point;

use crate::tree::Tree;
use crate::types::{HANDLE_LAYER, NodeId};

/// Part of a node under a pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitRegion {
    /// The square handle on the bottom-right corner.
    ResizeHandle,
    /// The expand/collapse glyph of a composite.
    ToggleGlyph,
    /// The header band of a composite, outside the glyph.
    Header,
    /// Anywhere else inside the node.
    Body,
}

/// Result of a hit test.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// The node that was hit.
    pub node: NodeId,
    /// Which part of it.
    pub region: HitRegion,
}

impl Tree {
    /// Topmost visible node region under `point`.
    ///
    /// Resize handles sit on [`HANDLE_LAYER`], above every node. Otherwise the
    /// node's [kind layer](crate::NodeKind::layer) decides, and the
    /// later-created node wins between equal layers. Hidden nodes are never hit.
    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        let mut best: Option<(Hit, i32)> = None;
        for id in self.ids() {
            if !self.is_visible(id) {
                continue;
            }
            let Some((region, layer)) = self.classify(id, point) else {
                continue;
            };
            // Ids grow in creation order, so a later id wins ties.
            if best.is_none_or(|(b, z)| layer > z || (layer == z && id > b.node)) {
                best = Some((Hit { node: id, region }, layer));
            }
        }
        best.map(|(hit, _)| hit)
    }

    fn classify(&self, id: NodeId, point: Point) -> Option<(HitRegion, i32)> {
        let d = self.decorations(id)?;
        if d.resize_handle.contains(point) {
            return Some((HitRegion::ResizeHandle, HANDLE_LAYER));
        }
        let node = self.node(id);
        if !node.rect.contains(point) {
            return None;
        }
        let region = if d.toggle_glyph.is_some_and(|g| g.contains(point)) {
            HitRegion::ToggleGlyph
        } else if d.header.is_some_and(|h| h.contains(point)) {
            HitRegion::Header
        } else {
            HitRegion::Body
        };
        Some((region, node.kind.layer()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewNode, NodeKind};
    use kurbo::{Size, Vec2};

    fn step_and_beat() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new();
        let step = tree
            .insert(
                None,
                NewNode::detached(NodeKind::Step, Size::new(220.0, 300.0), Point::ZERO),
            )
            .unwrap();
        let beat = tree
            .insert(
                Some(step),
                NewNode::attached(NodeKind::Beat, Size::new(196.0, 140.0), Vec2::ZERO),
            )
            .unwrap();
        (tree, step, beat)
    }

    #[test]
    fn regions_of_a_composite() {
        let (tree, step, _) = step_and_beat();
        let hit = |x, y| tree.hit_test(Point::new(x, y));
        assert_eq!(hit(10.0, 15.0), Some(Hit { node: step, region: HitRegion::ToggleGlyph }));
        assert_eq!(hit(100.0, 20.0), Some(Hit { node: step, region: HitRegion::Header }));
        assert_eq!(hit(5.0, 250.0), Some(Hit { node: step, region: HitRegion::Body }));
        assert_eq!(hit(219.0, 299.0), Some(Hit { node: step, region: HitRegion::ResizeHandle }));
        assert_eq!(hit(500.0, 500.0), None);
    }

    #[test]
    fn higher_layer_wins() {
        let (tree, _, beat) = step_and_beat();
        let hit = tree.hit_test(Point::new(100.0, 100.0)).unwrap();
        assert_eq!(hit, Hit { node: beat, region: HitRegion::Body });
    }

    #[test]
    fn handle_beats_overlapping_leaf() {
        let (mut tree, step, beat) = step_and_beat();
        // Pull the beat's body under the step's bottom-right corner.
        tree.move_to(beat, Point::new(150.0, 250.0));
        let hit = tree.hit_test(Point::new(222.0, 302.0)).unwrap();
        assert_eq!(hit, Hit { node: step, region: HitRegion::ResizeHandle });
    }

    #[test]
    fn later_node_wins_equal_layers() {
        let (mut tree, step, beat) = step_and_beat();
        let copy = tree.duplicate(beat, Point::new(50.0, 60.0)).unwrap();
        let hit = tree.hit_test(Point::new(100.0, 100.0)).unwrap();
        assert_eq!(hit.node, copy);
        assert_eq!(tree.parent_of(copy), Some(step));
    }

    #[test]
    fn hidden_nodes_are_skipped() {
        let (mut tree, step, _) = step_and_beat();
        tree.toggle(step);
        // The beat used to be here; now only empty scene remains below the header.
        assert_eq!(tree.hit_test(Point::new(100.0, 100.0)), None);
        assert_eq!(
            tree.hit_test(Point::new(100.0, 20.0)).map(|h| h.node),
            Some(step)
        );
    }
}
