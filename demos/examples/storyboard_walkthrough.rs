// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted editing session over the default storyboard grid.
//!
//! The pointer is driven through the hit-routed editor entry points: a header
//! click, a header drag, a resize, a body drag out of a step, and a duplicate.
//! After each gesture the example prints the state the renderer would query.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p storyboard_demos --example storyboard_walkthrough`

use kurbo::Point;
use storyboard_box_tree::{GridSpec, NodeId, Tree};
use storyboard_editor::{Editor, EditorError};
use storyboard_event_state::GestureConfig;
use tracing_subscriber::EnvFilter;

fn gesture(editor: &mut Editor, path: &[(f64, f64)]) -> Result<(), EditorError> {
    let Some((&(x, y), rest)) = path.split_first() else {
        return Ok(());
    };
    editor.pointer_down(Point::new(x, y))?;
    let mut last = Point::new(x, y);
    for &(x, y) in rest {
        last = Point::new(x, y);
        editor.pointer_move(last)?;
    }
    editor.pointer_up(last)
}

fn describe(tree: &Tree, label: &str, id: NodeId) {
    let rect = tree.rect(id).unwrap_or_default();
    let title = tree.content(id).map_or("?", |c| c.title.as_str());
    println!(
        "  {label:<14} {title:<8} at ({:>6.1}, {:>6.1}) size {:>6.1} x {:>6.1}  expanded={:?} visible={} attached={}",
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height(),
        tree.is_expanded(id),
        tree.is_visible(id),
        tree.is_attached(id),
    );
}

fn main() -> Result<(), EditorError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = Tree::new();
    let board = tree.assemble(&GridSpec::default());
    let mut editor = Editor::with_config(tree, GestureConfig::default());
    tracing::info!(nodes = editor.tree().len(), "storyboard assembled");

    let step = board.steps[0];
    let (beat, sibling) = (board.beats[0], board.beats[1]);

    println!("Initial grid:");
    describe(editor.tree(), "act", board.act);
    describe(editor.tree(), "sequence", board.sequences[0]);
    describe(editor.tree(), "step", step);
    describe(editor.tree(), "beat", beat);

    println!("Header click on the first step:");
    gesture(&mut editor, &[(150.0, 150.0), (151.0, 151.0)])?;
    describe(editor.tree(), "step", step);
    describe(editor.tree(), "beat", beat);

    println!("Header click again, then drag the act by (50, -20):");
    gesture(&mut editor, &[(150.0, 150.0)])?;
    gesture(&mut editor, &[(500.0, 50.0), (520.0, 40.0), (550.0, 30.0)])?;
    describe(editor.tree(), "act", board.act);
    describe(editor.tree(), "sequence", board.sequences[0]);
    describe(editor.tree(), "beat", beat);

    println!("Resize the first step from its handle:");
    let handle = editor
        .tree()
        .decorations(step)
        .map(|d| d.resize_handle.center())
        .unwrap_or_default();
    gesture(
        &mut editor,
        &[(handle.x, handle.y), (handle.x + 40.0, handle.y + 120.0)],
    )?;
    describe(editor.tree(), "step", step);
    println!("  remembered     {:?}", editor.tree().content_size(step));

    println!("Drag the first beat out of its step, then collapse the step:");
    let grab = editor.tree().rect(beat).unwrap_or_default().center();
    gesture(&mut editor, &[(grab.x, grab.y), (grab.x, grab.y + 1200.0)])?;
    let glyph = editor
        .tree()
        .decorations(step)
        .and_then(|d| d.toggle_glyph)
        .unwrap_or_default()
        .center();
    gesture(&mut editor, &[(glyph.x, glyph.y)])?;
    describe(editor.tree(), "detached beat", beat);
    describe(editor.tree(), "sibling", sibling);

    println!("Duplicate the detached beat:");
    let copy = editor.duplicate(beat, Point::new(2200.0, 200.0))?;
    describe(editor.tree(), "copy", copy);

    let damage = editor.take_damage();
    println!(
        "Pending damage: {} rects, union {:?}",
        damage.dirty_rects.len(),
        damage.union_rect()
    );
    Ok(())
}
