// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot construction of the default Act / Sequence / Step / Beat grid.

use alloc::format;
use alloc::vec::Vec;
use kurbo::{Point, Size, Vec2};
use tracing::debug;

use crate::tree::Tree;
use crate::types::{Content, NewNode, NodeId, NodeKind};

/// Shape of the initial grid built by [`Tree::assemble`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridSpec {
    /// Scene-space top-left corner of the Act.
    pub origin: Point,
    /// Sequences placed side by side inside the Act.
    pub sequences: u32,
    /// Steps placed side by side inside each Sequence.
    pub steps_per_sequence: u32,
    /// Beats stacked inside each Step.
    pub beats_per_step: u32,
    /// Width of every Step.
    pub step_width: f64,
    /// Height of every Beat.
    pub beat_height: f64,
    /// Horizontal gap between neighbouring Sequences and between Steps.
    pub gap: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            origin: Point::new(40.0, 40.0),
            sequences: 2,
            steps_per_sequence: 4,
            beats_per_step: 4,
            step_width: 220.0,
            beat_height: 140.0,
            gap: 20.0,
        }
    }
}

/// Ids of an assembled grid, each list in creation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Storyboard {
    /// The root Act.
    pub act: NodeId,
    /// Sequences, left to right.
    pub sequences: Vec<NodeId>,
    /// Steps, grouped by Sequence and left to right within each.
    pub steps: Vec<NodeId>,
    /// Beats, grouped by Step and top to bottom within each.
    pub beats: Vec<NodeId>,
}

impl Tree {
    /// Build the initial grid described by `grid` and return its ids.
    ///
    /// Containers are sized to hold their children exactly, and every child is
    /// attached at an offset from its parent's inner content origin, so the
    /// first child of each container sits on that origin.
    pub fn assemble(&mut self, grid: &GridSpec) -> Storyboard {
        let m = self.metrics;
        let pad = m.inner_pad;
        let span = |count: u32, each: f64, gap: f64| {
            f64::from(count) * each + f64::from(count.saturating_sub(1)) * gap
        };

        let beat = Size::new(grid.step_width - 2.0 * pad, grid.beat_height);
        let step = Size::new(
            grid.step_width,
            m.header_height + 2.0 * pad + span(grid.beats_per_step, beat.height, m.stack_gap),
        );
        let seq = Size::new(
            span(grid.steps_per_sequence, step.width, grid.gap) + 2.0 * pad,
            m.header_height + 2.0 * pad + step.height,
        );
        let act = Size::new(
            span(grid.sequences, seq.width, grid.gap) + 2.0 * pad,
            m.header_height + 2.0 * pad + seq.height,
        );

        let root = NewNode::detached(NodeKind::Act, act, grid.origin);
        let mut board = Storyboard {
            act: self.insert(None, root).expect("root insertion cannot fail"),
            sequences: Vec::new(),
            steps: Vec::new(),
            beats: Vec::new(),
        };
        for i in 0..grid.sequences {
            let offset = Vec2::new(f64::from(i) * (seq.width + grid.gap), 0.0);
            let s = self.insert_child(board.act, NodeKind::Sequence, i, seq, offset);
            board.sequences.push(s);
            for j in 0..grid.steps_per_sequence {
                let offset = Vec2::new(f64::from(j) * (step.width + grid.gap), 0.0);
                let st = self.insert_child(s, NodeKind::Step, j, step, offset);
                board.steps.push(st);
                for k in 0..grid.beats_per_step {
                    let offset = Vec2::new(0.0, f64::from(k) * (beat.height + m.stack_gap));
                    let b = self.insert_child(st, NodeKind::Beat, k, beat, offset);
                    board.beats.push(b);
                }
            }
        }
        debug!(
            nodes = self.len(),
            act_width = act.width,
            act_height = act.height,
            "assembled storyboard"
        );
        board
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        index: u32,
        size: Size,
        offset: Vec2,
    ) -> NodeId {
        let content = Content::titled(format!("{} {}", kind.label(), index + 1));
        let new = NewNode::attached(kind, size, offset).with_content(content);
        self.insert(Some(parent), new)
            .expect("assembled parents are live composites")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_sizes() {
        let mut tree = Tree::new();
        let board = tree.assemble(&GridSpec::default());
        assert_eq!(board.sequences.len(), 2);
        assert_eq!(board.steps.len(), 8);
        assert_eq!(board.beats.len(), 32);
        assert_eq!(tree.len(), 43);

        let size = |id| tree.rect(id).unwrap().size();
        assert_eq!(size(board.act), Size::new(1972.0, 776.0));
        assert_eq!(size(board.sequences[0]), Size::new(964.0, 716.0));
        assert_eq!(size(board.steps[0]), Size::new(220.0, 656.0));
        assert_eq!(size(board.beats[0]), Size::new(196.0, 140.0));
    }

    #[test]
    fn children_sit_inside_their_parents() {
        let mut tree = Tree::new();
        let board = tree.assemble(&GridSpec::default());
        for id in board.sequences.iter().chain(&board.steps).chain(&board.beats) {
            let parent = tree.parent_of(*id).unwrap();
            let area = tree.inner_content_area(parent).unwrap();
            let rect = tree.rect(*id).unwrap();
            assert!(area.contains(rect.center()), "{id:?} outside its parent");
            assert!(tree.is_attached(*id));
            assert!(tree.is_visible(*id));
        }
        let second = tree.rect(board.sequences[1]).unwrap();
        assert_eq!(second.origin(), Point::new(40.0 + 12.0 + 964.0 + 20.0, 40.0 + 48.0));
    }

    #[test]
    fn assembled_titles_are_numbered() {
        let mut tree = Tree::new();
        let board = tree.assemble(&GridSpec::default());
        assert_eq!(tree.content(board.act).unwrap().title, "ACT");
        assert_eq!(tree.content(board.sequences[1]).unwrap().title, "SEQ 2");
        assert_eq!(tree.content(board.steps[5]).unwrap().title, "STEP 2");
        assert_eq!(tree.content(board.beats[3]).unwrap().title, "BEAT 4");
    }

    #[test]
    fn refit_matches_assembled_heights() {
        let mut tree = Tree::new();
        let board = tree.assemble(&GridSpec::default());
        for id in [board.act, board.sequences[0], board.steps[0]] {
            let before = tree.rect(id).unwrap();
            tree.toggle(id);
            tree.toggle(id);
            assert_eq!(tree.rect(id).unwrap(), before);
        }
    }
}
