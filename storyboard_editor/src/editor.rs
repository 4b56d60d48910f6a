// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction controller.
//!
//! ## Gestures
//!
//! - Header: press, then either release in place to toggle the composite, or
//!   drag it past the threshold to move it with its attached descendants.
//!   Dragging a container by its header never changes its attachment.
//! - Resize handle: the node takes the starting size plus the pointer travel,
//!   clamped to [`GestureConfig::min_size`].
//! - Body: dragging moves the node; releasing a drag re-evaluates attachment
//!   against the node's structural parent.
//! - Toggle glyph: toggles on press.
//!
//! The per-gesture entry points take the node the host resolved. The
//! `pointer_*` entry points resolve it with [`Tree::hit_test`] instead.

use kurbo::{Point, Size};
use storyboard_box_tree::{Damage, Hit, HitRegion, NodeId, Toggleable, Tree};
use storyboard_event_state::{DragEnd, DragState, GestureConfig, ResizeState};
use tracing::{debug, trace};

use crate::EditorError;

/// Routes pointer gestures to a [`Tree`].
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use storyboard_box_tree::{GridSpec, Tree};
/// use storyboard_editor::Editor;
///
/// let mut tree = Tree::new();
/// let board = tree.assemble(&GridSpec::default());
/// let mut editor = Editor::new(tree);
///
/// // Press and release on the act header: a click, which collapses it.
/// let header = Point::new(200.0, 50.0);
/// editor.pointer_down(header).unwrap();
/// editor.pointer_up(header).unwrap();
/// assert_eq!(editor.tree().is_expanded(board.act), Some(false));
/// assert!(!editor.tree().is_visible(board.sequences[0]));
/// ```
#[derive(Debug)]
pub struct Editor {
    tree: Tree,
    config: GestureConfig,
    header: DragState<NodeId>,
    body: DragState<NodeId>,
    resize: ResizeState<NodeId>,
    /// Gesture started by the last routed press.
    routed: Option<Hit>,
}

impl Editor {
    /// Edit `tree` with the default [`GestureConfig`].
    pub fn new(tree: Tree) -> Self {
        Self::with_config(tree, GestureConfig::default())
    }

    /// Edit `tree` with custom gesture thresholds.
    pub fn with_config(tree: Tree, config: GestureConfig) -> Self {
        Self {
            tree,
            config,
            header: DragState::with_threshold(config.drag_threshold),
            body: DragState::with_threshold(config.drag_threshold),
            resize: ResizeState::with_min_size(config.min_size),
            routed: None,
        }
    }

    /// The edited tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the edited tree, for programmatic changes.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Give the tree back.
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Gesture thresholds in use.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Take the damage accumulated since the previous call.
    pub fn take_damage(&mut self) -> Damage {
        self.tree.take_damage()
    }

    // --- header ---

    /// Start a header gesture on composite `id`.
    pub fn on_header_pointer_down(&mut self, id: NodeId, pos: Point) -> Result<(), EditorError> {
        self.composite(id)?;
        self.header.on_down(id, pos);
        Ok(())
    }

    /// Move the composite once the pointer is past the drag threshold.
    pub fn on_header_pointer_move(&mut self, id: NodeId, pos: Point) -> Result<(), EditorError> {
        expect_target(self.header.target(), id)?;
        if let Some(delta) = self.header.on_move(pos) {
            trace!(?id, ?delta, "header drag");
            self.tree.move_by(id, delta);
        }
        Ok(())
    }

    /// Finish a header gesture: a click toggles, a drag applies its last delta.
    pub fn on_header_pointer_up(
        &mut self,
        id: NodeId,
        pos: Point,
    ) -> Result<DragEnd<NodeId>, EditorError> {
        expect_target(self.header.target(), id)?;
        let end = self.header.on_up(pos).ok_or(EditorError::NoActiveGesture)?;
        match end {
            DragEnd::Click(_) => {
                debug!(?id, "header click");
                self.toggle(id)?;
            }
            DragEnd::Drag { delta, .. } => {
                debug!(?id, "header drag released");
                self.tree.move_by(id, delta);
            }
        }
        Ok(end)
    }

    // --- resize handle ---

    /// Start resizing `id` from its current size.
    pub fn on_resize_handle_pointer_down(
        &mut self,
        id: NodeId,
        pos: Point,
    ) -> Result<(), EditorError> {
        let rect = self.tree.rect(id).ok_or(EditorError::UnknownNode(id))?;
        self.resize.on_down(id, pos, rect.size());
        Ok(())
    }

    /// Resize `id` to the starting size plus the pointer travel, clamped.
    pub fn on_resize_handle_pointer_move(
        &mut self,
        id: NodeId,
        pos: Point,
    ) -> Result<Size, EditorError> {
        expect_target(self.resize.target(), id)?;
        let size = self
            .resize
            .on_move(pos)
            .ok_or(EditorError::NoActiveGesture)?;
        trace!(?id, ?size, "resize");
        self.tree.resize_to(id, size);
        Ok(size)
    }

    /// End a resize. The last move already applied the final size.
    pub fn on_resize_handle_pointer_up(
        &mut self,
        id: NodeId,
        _pos: Point,
    ) -> Result<(), EditorError> {
        expect_target(self.resize.target(), id)?;
        self.resize.on_up();
        debug!(?id, "resize released");
        Ok(())
    }

    // --- body ---

    /// Start a body drag of `id`.
    pub fn on_child_pointer_down(&mut self, id: NodeId, pos: Point) -> Result<(), EditorError> {
        if !self.tree.is_alive(id) {
            return Err(EditorError::UnknownNode(id));
        }
        self.body.on_down(id, pos);
        Ok(())
    }

    /// Move the node once the pointer is past the drag threshold.
    ///
    /// Attachment is left alone until release.
    pub fn on_child_pointer_move(&mut self, id: NodeId, pos: Point) -> Result<(), EditorError> {
        expect_target(self.body.target(), id)?;
        if let Some(delta) = self.body.on_move(pos) {
            trace!(?id, ?delta, "body drag");
            self.tree.move_by(id, delta);
        }
        Ok(())
    }

    /// Finish a body gesture.
    ///
    /// After a drag the node attaches to its structural parent if its center
    /// ended up inside the parent's content area, and detaches otherwise. A
    /// release without a drag leaves attachment untouched.
    pub fn on_child_pointer_up(
        &mut self,
        id: NodeId,
        pos: Point,
    ) -> Result<DragEnd<NodeId>, EditorError> {
        expect_target(self.body.target(), id)?;
        let end = self.body.on_up(pos).ok_or(EditorError::NoActiveGesture)?;
        if let DragEnd::Drag { delta, .. } = end {
            self.tree.move_by(id, delta);
            let attached = self.tree.evaluate_attachment(id);
            debug!(?id, ?attached, "body drag released");
        }
        Ok(end)
    }

    // --- toggle glyph ---

    /// Toggle composite `id` immediately. Returns the new expanded state.
    pub fn on_toggle_glyph_pressed(&mut self, id: NodeId) -> Result<bool, EditorError> {
        self.toggle(id)
    }

    // --- routed ---

    /// Press at `pos`: classify it with [`Tree::hit_test`] and start the
    /// matching gesture. Returns the hit, or `None` over empty scene.
    pub fn pointer_down(&mut self, pos: Point) -> Result<Option<Hit>, EditorError> {
        self.routed = None;
        let Some(hit) = self.tree.hit_test(pos) else {
            return Ok(None);
        };
        debug!(node = ?hit.node, region = ?hit.region, "pointer down");
        match hit.region {
            HitRegion::ResizeHandle => self.on_resize_handle_pointer_down(hit.node, pos)?,
            HitRegion::ToggleGlyph => {
                self.on_toggle_glyph_pressed(hit.node)?;
            }
            HitRegion::Header => self.on_header_pointer_down(hit.node, pos)?,
            HitRegion::Body => self.on_child_pointer_down(hit.node, pos)?,
        }
        self.routed = Some(hit);
        Ok(Some(hit))
    }

    /// Forward a move to the gesture started by [`Editor::pointer_down`].
    ///
    /// Hosts forward moves only while a button is held.
    pub fn pointer_move(&mut self, pos: Point) -> Result<(), EditorError> {
        let hit = self.routed.ok_or(EditorError::NoActiveGesture)?;
        match hit.region {
            HitRegion::ResizeHandle => self.on_resize_handle_pointer_move(hit.node, pos).map(drop),
            HitRegion::ToggleGlyph => Ok(()),
            HitRegion::Header => self.on_header_pointer_move(hit.node, pos),
            HitRegion::Body => self.on_child_pointer_move(hit.node, pos),
        }
    }

    /// Finish the gesture started by [`Editor::pointer_down`].
    pub fn pointer_up(&mut self, pos: Point) -> Result<(), EditorError> {
        let hit = self.routed.take().ok_or(EditorError::NoActiveGesture)?;
        match hit.region {
            HitRegion::ResizeHandle => self.on_resize_handle_pointer_up(hit.node, pos),
            HitRegion::ToggleGlyph => Ok(()),
            HitRegion::Header => self.on_header_pointer_up(hit.node, pos).map(drop),
            HitRegion::Body => self.on_child_pointer_up(hit.node, pos).map(drop),
        }
    }

    /// Forget every gesture in progress.
    ///
    /// Moves and resizes already applied stay applied, and attachment is not
    /// re-evaluated. Returns `true` if anything was in progress.
    pub fn cancel_gestures(&mut self) -> bool {
        let header = self.header.cancel();
        let body = self.body.cancel();
        let resize = self.resize.cancel();
        let routed = self.routed.take().is_some();
        let any = header || body || resize || routed;
        if any {
            debug!("gestures cancelled");
        }
        any
    }

    // --- other ---

    /// Create a floating copy of `source` at `drop_pos`.
    ///
    /// The copy has the same kind, text and size under the same structural
    /// parent, and stays detached until it is dragged by its body and released
    /// inside that parent.
    pub fn duplicate(&mut self, source: NodeId, drop_pos: Point) -> Result<NodeId, EditorError> {
        self.tree
            .duplicate(source, drop_pos)
            .ok_or(EditorError::UnknownNode(source))
    }

    fn composite(&self, id: NodeId) -> Result<(), EditorError> {
        match self.tree.kind(id) {
            None => Err(EditorError::UnknownNode(id)),
            Some(kind) if !kind.is_composite() => Err(EditorError::NotComposite(id)),
            Some(_) => Ok(()),
        }
    }

    fn toggle(&mut self, id: NodeId) -> Result<bool, EditorError> {
        self.composite(id)?;
        let mut composite = self
            .tree
            .composite_mut(id)
            .ok_or(EditorError::NotComposite(id))?;
        let expanded = composite.toggle();
        composite.reposition_attached_children();
        debug!(?id, expanded, "toggled");
        Ok(expanded)
    }
}

fn expect_target(active: Option<&NodeId>, id: NodeId) -> Result<(), EditorError> {
    match active {
        Some(&target) if target == id => Ok(()),
        _ => Err(EditorError::NoActiveGesture),
    }
}
