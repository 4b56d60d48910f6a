// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of collapse, refit, transport, and detachment.

use kurbo::{Point, Size, Vec2};
use storyboard_box_tree::{GridSpec, NewNode, NodeKind, Tree};

#[test]
fn step_refit_keeps_remembered_size_when_children_need_more() {
    let mut tree = Tree::new();
    let step = tree
        .insert(
            None,
            NewNode::detached(NodeKind::Step, Size::new(220.0, 600.0), Point::new(0.0, 0.0)),
        )
        .unwrap();
    for j in 0..4_u32 {
        let offset = Vec2::new(0.0, f64::from(j) * 152.0);
        tree.insert(
            Some(step),
            NewNode::attached(NodeKind::Beat, Size::new(196.0, 140.0), offset),
        )
        .unwrap();
    }
    assert_eq!(tree.content_size(step), Some(Size::new(220.0, 600.0)));

    assert_eq!(tree.toggle(step), Some(false));
    assert_eq!(tree.rect(step).unwrap().height(), 44.0);
    assert_eq!(tree.toggle(step), Some(true));
    assert_eq!(tree.rect(step).unwrap().height(), 656.0);
    assert_eq!(tree.content_size(step), Some(Size::new(220.0, 656.0)));
}

#[test]
fn sequence_collapses_to_header_and_refits_to_its_step() {
    let mut tree = Tree::new();
    let seq = tree
        .insert(
            None,
            NewNode::detached(NodeKind::Sequence, Size::new(500.0, 500.0), Point::new(10.0, 10.0)),
        )
        .unwrap();
    tree.insert(
        Some(seq),
        NewNode::attached(NodeKind::Step, Size::new(220.0, 300.0), Vec2::ZERO),
    )
    .unwrap();

    tree.toggle(seq);
    assert_eq!(tree.rect(seq).unwrap().height(), 44.0);
    tree.toggle(seq);
    assert_eq!(tree.rect(seq).unwrap().height(), 360.0);
    assert_eq!(tree.rect(seq).unwrap().width(), 500.0);
}

#[test]
fn dragging_the_act_carries_sequences_but_not_detached_beats() {
    let mut tree = Tree::new();
    let board = tree.assemble(&GridSpec::default());
    let loose = board.beats[5];
    tree.move_to(loose, Point::new(3000.0, 3000.0));
    assert_eq!(tree.evaluate_attachment(loose), Some(false));

    let sequences: Vec<_> = board
        .sequences
        .iter()
        .map(|&s| tree.rect(s).unwrap())
        .collect();
    let attached_beat = tree.rect(board.beats[4]).unwrap();
    let loose_rect = tree.rect(loose).unwrap();

    let delta = Vec2::new(50.0, -20.0);
    tree.move_by(board.act, delta);

    for (&s, before) in board.sequences.iter().zip(&sequences) {
        assert_eq!(tree.rect(s).unwrap(), *before + delta);
    }
    assert_eq!(tree.rect(board.beats[4]).unwrap(), attached_beat + delta);
    assert_eq!(tree.rect(loose).unwrap(), loose_rect);
}

#[test]
fn detached_beat_survives_collapse_of_its_step() {
    let mut tree = Tree::new();
    let board = tree.assemble(&GridSpec::default());
    let step = board.steps[0];
    let (detached, sibling) = (board.beats[0], board.beats[1]);

    tree.move_to(detached, Point::new(2500.0, 100.0));
    assert_eq!(tree.evaluate_attachment(detached), Some(false));

    tree.toggle(step);
    assert!(tree.is_visible(detached));
    assert!(!tree.is_visible(sibling));

    // Collapsing the whole act still leaves the floating beat alone.
    tree.toggle(board.act);
    assert!(tree.is_visible(detached));
    assert!(!tree.is_visible(step));
}

#[test]
fn expanding_the_act_keeps_a_collapsed_step_closed() {
    let mut tree = Tree::new();
    let board = tree.assemble(&GridSpec::default());
    let step = board.steps[2];
    tree.toggle(step);
    tree.toggle(board.act);
    tree.toggle(board.act);

    assert!(tree.is_visible(step));
    assert_eq!(tree.is_expanded(step), Some(false));
    assert!(!tree.is_visible(board.beats[8]));
}

#[test]
fn duplicate_attaches_after_a_drop_inside_its_parent() {
    let mut tree = Tree::new();
    let board = tree.assemble(&GridSpec::default());
    let source = board.beats[0];
    let copy = tree.duplicate(source, Point::new(2500.0, 0.0)).unwrap();
    assert!(!tree.is_attached(copy));

    // Drop it in the gap under the step's last beat.
    let step = board.steps[0];
    tree.resize_to(step, Size::new(220.0, 820.0));
    let last = tree.rect(board.beats[3]).unwrap();
    let target = Point::new(last.x0, last.y1 + 12.0);
    tree.move_to(copy, target);
    assert_eq!(tree.evaluate_attachment(copy), Some(true));
    assert_eq!(
        tree.relative_offset(copy),
        Some(target - tree.inner_content_origin(step).unwrap())
    );

    let before = tree.rect(copy).unwrap();
    tree.move_by(step, Vec2::new(0.0, 40.0));
    assert_eq!(tree.rect(copy).unwrap(), before + Vec2::new(0.0, 40.0));
}
