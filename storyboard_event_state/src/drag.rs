// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-versus-drag discrimination for a single press.
//!
//! A press starts undecided. As soon as the pointer has travelled more than the
//! threshold along either axis from the down position, the press becomes a
//! drag, and it stays one until release even if the pointer comes back. Only
//! moves decide: a press released without any move ever crossing the
//! threshold is a click, wherever the release lands.
//!
//! While dragging, [`DragState::on_move`] yields the delta to apply to the
//! dragged object. The first delta is measured from the down position, so the
//! object catches up with the travel that happened before the threshold was
//! crossed; later deltas are measured from the previous move.
//!
//! ## Usage
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use storyboard_event_state::{DragEnd, DragState};
//!
//! let mut drag: DragState<u32> = DragState::new();
//! drag.on_down(7, Point::new(10.0, 10.0));
//!
//! // Within the threshold: nothing to apply yet.
//! assert_eq!(drag.on_move(Point::new(12.0, 11.0)), None);
//!
//! // Past it: the whole travel so far is applied at once.
//! assert_eq!(drag.on_move(Point::new(15.0, 11.0)), Some(Vec2::new(5.0, 1.0)));
//! assert_eq!(drag.on_move(Point::new(16.0, 11.0)), Some(Vec2::new(1.0, 0.0)));
//!
//! assert_eq!(
//!     drag.on_up(Point::new(16.0, 11.0)),
//!     Some(DragEnd::Drag { target: 7, delta: Vec2::ZERO })
//! );
//! ```

use kurbo::{Point, Vec2};

use crate::GestureConfig;

/// State for an active press.
#[derive(Clone, Debug)]
pub struct DragPress<K> {
    /// Target the press landed on.
    pub target: K,
    /// Pointer position at press time.
    pub down_position: Point,
    /// Position up to which deltas have been handed out.
    pub last_position: Point,
    /// True once the threshold has been crossed.
    pub dragging: bool,
}

/// How a press ended.
#[derive(Clone, Debug, PartialEq)]
pub enum DragEnd<K> {
    /// The pointer never left the threshold box.
    Click(K),
    /// The press was a drag. `delta` is the travel since the last move that
    /// still has to be applied.
    Drag {
        /// Target of the press.
        target: K,
        /// Remaining travel.
        delta: Vec2,
    },
}

/// Click-versus-drag state machine for one pointer.
#[derive(Clone, Debug)]
pub struct DragState<K> {
    press: Option<DragPress<K>>,
    /// Per-axis travel beyond which a press becomes a drag.
    pub threshold: f64,
}

impl<K> DragState<K> {
    /// Create a drag state with the default threshold of 3 scene units.
    pub fn new() -> Self {
        Self::with_threshold(GestureConfig::default().drag_threshold)
    }

    /// Create a drag state with a custom per-axis threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            press: None,
            threshold,
        }
    }

    /// Start a press on `target`, replacing any press in progress.
    pub fn on_down(&mut self, target: K, position: Point) {
        self.press = Some(DragPress {
            target,
            down_position: position,
            last_position: position,
            dragging: false,
        });
    }

    /// Track pointer travel.
    ///
    /// Returns the delta to apply to the dragged object, or `None` while the
    /// press is still undecided or when there is no press.
    pub fn on_move(&mut self, position: Point) -> Option<Vec2> {
        let threshold = self.threshold;
        let press = self.press.as_mut()?;
        if !press.dragging {
            let travel = position - press.down_position;
            let within = |d: f64| -threshold <= d && d <= threshold;
            if within(travel.x) && within(travel.y) {
                return None;
            }
            press.dragging = true;
        }
        let delta = position - press.last_position;
        press.last_position = position;
        Some(delta)
    }

    /// Finish the press at `position`.
    ///
    /// The release position does not take part in the classification: a
    /// press released past the threshold without any move in between is still
    /// a click. A drag carries the travel since the last move.
    /// Returns `None` when there is no press.
    pub fn on_up(&mut self, position: Point) -> Option<DragEnd<K>> {
        let press = self.press.take()?;
        Some(if press.dragging {
            DragEnd::Drag {
                target: press.target,
                delta: position - press.last_position,
            }
        } else {
            DragEnd::Click(press.target)
        })
    }

    /// Drop the press without classifying it. Returns `true` if one was active.
    pub fn cancel(&mut self) -> bool {
        self.press.take().is_some()
    }

    /// Check if a press is active.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Check if the active press has become a drag.
    pub fn is_dragging(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.dragging)
    }

    /// Target of the active press.
    pub fn target(&self) -> Option<&K> {
        self.press.as_ref().map(|p| &p.target)
    }

    /// The active press, if any.
    pub fn press(&self) -> Option<&DragPress<K>> {
        self.press.as_ref()
    }
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        Self::new()
    }
}
