// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, shared node contract, queries.

use alloc::{vec, vec::Vec};
use kurbo::{Point, Rect, Size, Vec2};
use tracing::{debug, trace};

use crate::damage::Damage;
use crate::metrics::{CompositePolicy, Metrics};
use crate::types::{Content, NewNode, NodeFlags, NodeId, NodeKind, Placement};

/// Tree of collapsible, attachable containers in one shared scene space.
///
/// Every mutation completes its cascades (child repositioning, resize-to-fit,
/// visibility) before returning, so the invariants documented at the crate
/// root hold between any two calls. There is no separate layout pass.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Size, Vec2};
/// use storyboard_box_tree::{NewNode, NodeKind, Tree};
///
/// let mut tree = Tree::new();
/// let step = tree
///     .insert(None, NewNode::detached(NodeKind::Step, Size::new(220.0, 300.0), Point::new(40.0, 40.0)))
///     .unwrap();
/// let beat = tree
///     .insert(Some(step), NewNode::attached(NodeKind::Beat, Size::new(196.0, 140.0), Vec2::ZERO))
///     .unwrap();
///
/// // Attached children sit at the parent's inner content origin plus their offset.
/// assert_eq!(tree.rect(beat).unwrap().origin(), Point::new(52.0, 88.0));
///
/// // ...and travel with it.
/// tree.move_by(step, Vec2::new(10.0, 0.0));
/// assert_eq!(tree.rect(beat).unwrap().origin(), Point::new(62.0, 88.0));
/// ```
pub struct Tree {
    nodes: Vec<Node>,
    pub(crate) metrics: Metrics,
    damage: Damage,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let visible = self
            .nodes
            .iter()
            .filter(|n| n.flags.contains(NodeFlags::VISIBLE))
            .count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_visible", &visible)
            .field("metrics", &self.metrics)
            .field("pending_damage", &self.damage.dirty_rects.len())
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Composite {
    pub(crate) expanded: bool,
    pub(crate) children: Vec<NodeId>,
    /// Last expanded size, for policies that remember it.
    pub(crate) content_size: Option<Size>,
    pub(crate) policy: CompositePolicy,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) rect: Rect,
    pub(crate) flags: NodeFlags,
    /// Offset from the parent's inner content origin, captured at attach time.
    pub(crate) relative_offset: Vec2,
    pub(crate) content: Content,
    pub(crate) composite: Option<Composite>,
}

impl Node {
    fn new(kind: NodeKind, content: Content, rect: Rect, parent: Option<NodeId>) -> Self {
        let composite = CompositePolicy::for_kind(kind).map(|policy| Composite {
            expanded: true,
            children: Vec::new(),
            content_size: policy.remember_content_size.then(|| rect.size()),
            policy,
        });
        Self {
            kind,
            parent,
            rect,
            flags: NodeFlags::VISIBLE,
            relative_offset: Vec2::ZERO,
            content,
            composite,
        }
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.parent.is_some() && self.flags.contains(NodeFlags::ATTACHED)
    }

    /// Leaves always show their content; composites only while expanded.
    pub(crate) fn shows_content(&self) -> bool {
        self.composite.as_ref().is_none_or(|c| c.expanded)
    }
}

impl Tree {
    /// Create an empty tree with [`Metrics::default`].
    pub fn new() -> Self {
        Self::with_metrics(Metrics::default())
    }

    /// Create an empty tree with custom layout constants.
    pub fn with_metrics(metrics: Metrics) -> Self {
        Self {
            nodes: Vec::new(),
            metrics,
            damage: Damage::default(),
        }
    }

    /// Layout constants of this tree.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Insert a node as a child of `parent` (or as a root if `None`).
    ///
    /// Returns `None` if `parent` is not a live composite, or if the node is
    /// placed with [`Placement::Attached`] under a parent that cannot provide an
    /// inner content origin.
    pub fn insert(&mut self, parent: Option<NodeId>, new: NewNode) -> Option<NodeId> {
        let (origin, offset) = match (parent, new.placement) {
            (Some(p), Placement::Attached(offset)) => (self.inner_content_origin(p)? + offset, Some(offset)),
            (Some(p), Placement::Detached(origin)) => {
                if self.node_opt(p)?.composite.is_none() {
                    return None;
                }
                (origin, None)
            }
            (None, Placement::Attached(offset)) => (Point::ORIGIN + offset, None),
            (None, Placement::Detached(origin)) => (origin, None),
        };
        let rect = Rect::from_origin_size(origin, new.size);
        let mut node = Node::new(new.kind, new.content, rect, parent);
        if let Some(offset) = offset {
            node.flags.insert(NodeFlags::ATTACHED);
            node.relative_offset = offset;
        }

        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        self.sync_visibility(id);
        self.damage.push(rect);
        debug!(?id, kind = ?new.kind, ?parent, attached = offset.is_some(), "inserted node");
        Some(id)
    }

    /// Create a floating copy of `source` with its top-left corner at `drop_pos`.
    ///
    /// The copy has the same kind, title, body and size, and the same structural
    /// parent, but starts detached and without children. It attaches the first
    /// time it is released inside the parent's content area (see
    /// [`Tree::evaluate_attachment`]). A copy of a collapsed composite starts
    /// collapsed and keeps the source's remembered content size.
    pub fn duplicate(&mut self, source: NodeId, drop_pos: Point) -> Option<NodeId> {
        let node = self.node_opt(source)?;
        let parent = node.parent;
        let state = node.composite.as_ref().map(|c| (c.expanded, c.content_size));
        let new = NewNode {
            kind: node.kind,
            content: node.content.clone(),
            size: node.rect.size(),
            placement: Placement::Detached(drop_pos),
        };
        let id = self.insert(parent, new)?;
        if let Some((expanded, content_size)) = state
            && let Some(c) = self.node_mut(id).composite.as_mut()
        {
            c.expanded = expanded;
            c.content_size = content_size;
        }
        debug!(?source, copy = ?id, "duplicated node");
        Some(id)
    }

    /// Returns true if `id` refers to a node of this tree.
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all node ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices."
        )]
        (0..self.nodes.len()).map(|i| NodeId::new(i as u32))
    }

    /// Returns the kind of a node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node_opt(id).map(|n| n.kind)
    }

    /// Returns the scene-space bounding rectangle of a node.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.rect)
    }

    /// Returns the structural parent of a node, or `None` for roots.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or an empty slice for leaves.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id).and_then(|n| n.composite.as_ref()) {
            Some(c) => &c.children,
            None => &[],
        }
    }

    /// Returns the flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Returns whether a composite is expanded, or `None` for leaves.
    pub fn is_expanded(&self, id: NodeId) -> Option<bool> {
        self.node_opt(id)?.composite.as_ref().map(|c| c.expanded)
    }

    /// Returns `true` if the node is visible.
    ///
    /// A node is visible if it is a root, is detached, or its parent is visible
    /// and expanded.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::VISIBLE))
    }

    /// Returns `true` if the node is attached to its parent.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(Node::is_attached)
    }

    /// Offset from the parent's inner content origin captured at the last attach.
    pub fn relative_offset(&self, id: NodeId) -> Option<Vec2> {
        self.node_opt(id).map(|n| n.relative_offset)
    }

    /// Remembered expanded size of a composite whose policy keeps one.
    pub fn content_size(&self, id: NodeId) -> Option<Size> {
        self.node_opt(id)?.composite.as_ref()?.content_size
    }

    /// Title and body text of a node.
    pub fn content(&self, id: NodeId) -> Option<&Content> {
        self.node_opt(id).map(|n| &n.content)
    }

    /// Replace the title and body text of a node.
    pub fn set_content(&mut self, id: NodeId, content: Content) {
        if let Some(n) = self.node_opt_mut(id) {
            n.content = content;
        }
    }

    /// Set the size of a node, keeping its top-left corner, then refit.
    ///
    /// This does not clamp. The resize handle enforces a minimum size before
    /// calling; direct callers own that obligation. Collapsed composites only
    /// take the new width, their height stays at [`Metrics::collapsed_height`].
    ///
    /// Composites reposition their attached children afterwards, and composites
    /// that remember their content size record the new size while expanded.
    pub fn resize_to(&mut self, id: NodeId, size: Size) -> bool {
        debug_assert!(
            size.width.is_finite() && size.height.is_finite(),
            "resize_to needs finite dimensions"
        );
        debug_assert!(
            size.width >= 0.0 && size.height >= 0.0,
            "resize_to needs non-negative dimensions"
        );
        let collapsed_height = self.metrics.collapsed_height();
        let Some(node) = self.node_opt(id) else {
            return false;
        };
        let height = if node.shows_content() {
            size.height
        } else {
            collapsed_height
        };
        let rect = Rect::from_origin_size(node.rect.origin(), Size::new(size.width, height));
        trace!(?id, ?rect, "resize");
        self.set_rect(id, rect);
        self.on_resized(id);
        true
    }

    /// Move a node so its top-left corner is at `origin`.
    ///
    /// Attached descendants travel by the same delta; detached ones stay put.
    pub fn move_to(&mut self, id: NodeId, origin: Point) -> bool {
        let Some(node) = self.node_opt(id) else {
            return false;
        };
        let delta = origin - node.rect.origin();
        self.translate_subtree(id, delta);
        true
    }

    /// Translate a node and its attached descendants by `delta`.
    ///
    /// This is a plain translation: attached children are shifted, not snapped
    /// back onto their offsets.
    pub fn move_by(&mut self, id: NodeId, delta: Vec2) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.translate_subtree(id, delta);
        true
    }

    /// Take the damage accumulated since the previous call.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.damage)
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(id.idx()).expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes.get_mut(id.idx()).expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.idx())
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(c) = self.node_mut(parent).composite.as_mut() {
            c.children.push(id);
        }
    }

    /// Children of `id` that are currently attached to it, in stacking order.
    pub(crate) fn attached_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children_of(id)
            .iter()
            .copied()
            .filter(|&c| self.node(c).is_attached())
            .collect()
    }

    pub(crate) fn set_rect(&mut self, id: NodeId, rect: Rect) {
        let node = self.node_mut(id);
        let old = node.rect;
        if old == rect {
            return;
        }
        node.rect = rect;
        let visible = node.flags.contains(NodeFlags::VISIBLE);
        if visible {
            self.damage.push(old);
            self.damage.push(rect);
        }
    }

    pub(crate) fn set_visible(&mut self, id: NodeId, visible: bool) {
        let node = self.node_mut(id);
        if node.flags.contains(NodeFlags::VISIBLE) == visible {
            return;
        }
        node.flags.set(NodeFlags::VISIBLE, visible);
        let rect = node.rect;
        self.damage.push(rect);
    }

    /// The resize hook: composites reflow attached children and record their
    /// content size. Leaf decorations are derived on demand, nothing to do.
    pub(crate) fn on_resized(&mut self, id: NodeId) {
        let Some(composite) = self.node(id).composite.as_ref() else {
            return;
        };
        let remember = composite.policy.remember_content_size && composite.expanded;
        self.reposition_attached_children(id);
        if remember {
            let size = self.node(id).rect.size();
            if let Some(c) = self.node_mut(id).composite.as_mut() {
                c.content_size = Some(size);
            }
        }
    }

    /// Translate `id` and, transitively, every attached descendant.
    fn translate_subtree(&mut self, id: NodeId, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        trace!(?id, ?delta, "translate subtree");
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let rect = self.node(current).rect + delta;
            self.set_rect(current, rect);
            stack.extend(self.attached_children(current));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_with_beats(tree: &mut Tree, count: u32) -> (NodeId, Vec<NodeId>) {
        let step = tree
            .insert(
                None,
                NewNode::detached(NodeKind::Step, Size::new(220.0, 600.0), Point::new(100.0, 100.0)),
            )
            .unwrap();
        let beats = (0..count)
            .map(|j| {
                let y = f64::from(j) * 152.0;
                tree.insert(
                    Some(step),
                    NewNode::attached(NodeKind::Beat, Size::new(196.0, 140.0), Vec2::new(0.0, y)),
                )
                .unwrap()
            })
            .collect();
        (step, beats)
    }

    #[test]
    fn attached_insert_sits_at_inner_origin_plus_offset() {
        let mut tree = Tree::new();
        let (step, beats) = step_with_beats(&mut tree, 2);
        let origin = tree.inner_content_origin(step).unwrap();
        assert_eq!(origin, Point::new(112.0, 148.0));
        assert_eq!(tree.rect(beats[0]).unwrap().origin(), origin);
        assert_eq!(
            tree.rect(beats[1]).unwrap().origin(),
            origin + Vec2::new(0.0, 152.0)
        );
        assert!(tree.is_attached(beats[1]));
        assert_eq!(tree.children_of(step), beats.as_slice());
    }

    #[test]
    fn insert_under_leaf_is_rejected() {
        let mut tree = Tree::new();
        let (_, beats) = step_with_beats(&mut tree, 1);
        let child = NewNode::attached(NodeKind::Beat, Size::new(10.0, 10.0), Vec2::ZERO);
        assert!(tree.insert(Some(beats[0]), child.clone()).is_none());
        let floating = NewNode::detached(NodeKind::Beat, Size::new(10.0, 10.0), Point::ZERO);
        assert!(tree.insert(Some(beats[0]), floating).is_none());
        assert!(tree.insert(Some(NodeId::new(999)), child).is_none());
    }

    #[test]
    fn roots_are_never_attached() {
        let mut tree = Tree::new();
        let act = tree
            .insert(
                None,
                NewNode::attached(NodeKind::Act, Size::new(300.0, 300.0), Vec2::new(40.0, 40.0)),
            )
            .unwrap();
        assert!(!tree.is_attached(act));
        assert_eq!(tree.rect(act).unwrap().origin(), Point::new(40.0, 40.0));
        assert!(tree.is_visible(act));
    }

    #[test]
    fn resize_keeps_origin_and_does_not_clamp() {
        let mut tree = Tree::new();
        let (_, beats) = step_with_beats(&mut tree, 1);
        let before = tree.rect(beats[0]).unwrap();
        assert!(tree.resize_to(beats[0], Size::new(50.0, 20.0)));
        let after = tree.rect(beats[0]).unwrap();
        assert_eq!(after.origin(), before.origin());
        assert_eq!(after.size(), Size::new(50.0, 20.0));
    }

    #[test]
    fn move_to_translates_attached_descendants_only() {
        let mut tree = Tree::new();
        let (step, beats) = step_with_beats(&mut tree, 2);
        tree.node_mut(beats[1]).flags.remove(NodeFlags::ATTACHED);
        let b0 = tree.rect(beats[0]).unwrap();
        let b1 = tree.rect(beats[1]).unwrap();

        assert!(tree.move_to(step, Point::new(130.0, 90.0)));
        assert_eq!(tree.rect(beats[0]).unwrap(), b0 + Vec2::new(30.0, -10.0));
        assert_eq!(tree.rect(beats[1]).unwrap(), b1);
    }

    #[test]
    fn move_by_is_a_translation_not_a_snap() {
        let mut tree = Tree::new();
        let (step, beats) = step_with_beats(&mut tree, 1);
        // Knock the child off its nominal offset without re-evaluating attachment.
        tree.move_by(beats[0], Vec2::new(0.5, 0.25));
        let drifted = tree.rect(beats[0]).unwrap();
        tree.move_by(step, Vec2::new(10.0, 10.0));
        assert_eq!(
            tree.rect(beats[0]).unwrap(),
            drifted + Vec2::new(10.0, 10.0)
        );
    }

    #[test]
    fn duplicate_copies_content_and_size_but_starts_detached() {
        let mut tree = Tree::new();
        let (step, beats) = step_with_beats(&mut tree, 1);
        tree.set_content(
            beats[0],
            Content {
                title: "Opening".into(),
                body: "Wide shot".into(),
            },
        );
        let copy = tree.duplicate(beats[0], Point::new(900.0, 900.0)).unwrap();
        assert_eq!(tree.kind(copy), Some(NodeKind::Beat));
        assert_eq!(tree.content(copy), tree.content(beats[0]));
        assert_eq!(
            tree.rect(copy).unwrap(),
            Rect::from_origin_size((900.0, 900.0), (196.0, 140.0))
        );
        assert!(!tree.is_attached(copy));
        assert!(tree.is_visible(copy));
        assert_eq!(tree.parent_of(copy), Some(step));

        // Floating copies ignore their parent's moves.
        tree.move_by(step, Vec2::new(5.0, 5.0));
        assert_eq!(tree.rect(copy).unwrap().origin(), Point::new(900.0, 900.0));
    }

    #[test]
    fn duplicate_of_collapsed_step_stays_collapsed() {
        let mut tree = Tree::new();
        let (step, _) = step_with_beats(&mut tree, 2);
        tree.toggle(step);
        let copy = tree.duplicate(step, Point::new(500.0, 100.0)).unwrap();
        assert_eq!(tree.is_expanded(copy), Some(false));
        assert_eq!(tree.rect(copy).unwrap().height(), 44.0);
        assert!(tree.children_of(copy).is_empty());

        tree.toggle(copy);
        assert_eq!(tree.rect(copy).unwrap().size(), Size::new(220.0, 600.0));
    }

    #[test]
    fn damage_collects_old_and_new_rects() {
        let mut tree = Tree::new();
        let (step, _) = step_with_beats(&mut tree, 1);
        let _ = tree.take_damage();
        let before = tree.rect(step).unwrap();
        tree.move_by(step, Vec2::new(10.0, 0.0));
        let damage = tree.take_damage();
        assert!(damage.dirty_rects.contains(&before));
        assert!(damage.dirty_rects.contains(&(before + Vec2::new(10.0, 0.0))));
        assert!(tree.take_damage().is_empty());
    }

    #[test]
    fn stale_ids_are_ignored() {
        let mut tree = Tree::new();
        let ghost = NodeId::new(3);
        assert!(!tree.is_alive(ghost));
        assert!(!tree.resize_to(ghost, Size::new(10.0, 10.0)));
        assert!(!tree.move_by(ghost, Vec2::new(1.0, 1.0)));
        assert!(tree.rect(ghost).is_none());
        assert!(tree.children_of(ghost).is_empty());
        assert!(!tree.is_visible(ghost));
    }
}
