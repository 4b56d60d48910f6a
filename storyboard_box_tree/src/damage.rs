// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage accumulated between renderer frames.

use alloc::vec::Vec;
use kurbo::Rect;

/// Scene-space regions touched by geometry or visibility changes since the
/// last [`crate::Tree::take_damage`].
///
/// Rectangles may overlap and are not a minimal cover.
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Scene-space rectangles that should be repainted.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Returns `true` if nothing needs repainting.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    pub(crate) fn push(&mut self, rect: Rect) {
        if rect.width() > 0.0 && rect.height() > 0.0 {
            self.dirty_rects.push(rect);
        }
    }
}
