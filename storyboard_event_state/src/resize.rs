// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize-handle tracking.
//!
//! A press captures the size of the object being resized. Every move maps the
//! pointer travel since the press onto that starting size and clamps the
//! result to [`ResizeState::min_size`]. Release ends the gesture and has no
//! effect of its own.
//!
//! ```
//! use kurbo::{Point, Size};
//! use storyboard_event_state::ResizeState;
//!
//! let mut resize: ResizeState<u32> = ResizeState::new();
//! resize.on_down(3, Point::new(200.0, 200.0), Size::new(200.0, 150.0));
//! assert_eq!(resize.on_move(Point::new(230.0, 100.0)), Some(Size::new(230.0, 80.0)));
//! assert_eq!(resize.on_up(), Some(3));
//! ```

use kurbo::{Point, Size};

use crate::GestureConfig;

#[derive(Clone, Debug)]
struct ResizePress<K> {
    target: K,
    down_position: Point,
    start_size: Size,
}

/// Resize-handle state machine for one pointer.
#[derive(Clone, Debug)]
pub struct ResizeState<K> {
    press: Option<ResizePress<K>>,
    /// Smallest size [`ResizeState::on_move`] returns.
    pub min_size: Size,
}

impl<K> ResizeState<K> {
    /// Create a resize state with the default minimum of 120 × 80.
    pub fn new() -> Self {
        Self::with_min_size(GestureConfig::default().min_size)
    }

    /// Create a resize state with a custom minimum size.
    pub fn with_min_size(min_size: Size) -> Self {
        Self {
            press: None,
            min_size,
        }
    }

    /// Start resizing `target` from `start_size`, replacing any press in progress.
    pub fn on_down(&mut self, target: K, position: Point, start_size: Size) {
        self.press = Some(ResizePress {
            target,
            down_position: position,
            start_size,
        });
    }

    /// The size to apply for the pointer at `position`, or `None` without a press.
    pub fn on_move(&self, position: Point) -> Option<Size> {
        let press = self.press.as_ref()?;
        let travel = position - press.down_position;
        Some(Size::new(
            (press.start_size.width + travel.x).max(self.min_size.width),
            (press.start_size.height + travel.y).max(self.min_size.height),
        ))
    }

    /// End the gesture, returning its target if one was active.
    pub fn on_up(&mut self) -> Option<K> {
        self.press.take().map(|p| p.target)
    }

    /// Drop the press. Returns `true` if one was active.
    pub fn cancel(&mut self) -> bool {
        self.press.take().is_some()
    }

    /// Check if a press is active.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Target of the active press.
    pub fn target(&self) -> Option<&K> {
        self.press.as_ref().map(|p| &p.target)
    }
}

impl<K> Default for ResizeState<K> {
    fn default() -> Self {
        Self::new()
    }
}
