// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Thresholds shared by the gesture state machines.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Travel along either axis, in scene units, that turns a press into a drag.
    /// The comparison is strict: travel equal to the threshold is still a click.
    pub drag_threshold: f64,
    /// Smallest size a resize handle produces.
    pub min_size: Size,
}

impl GestureConfig {
    /// Configuration with custom thresholds.
    pub const fn with_thresholds(drag_threshold: f64, min_size: Size) -> Self {
        Self {
            drag_threshold,
            min_size,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::with_thresholds(3.0, Size::new(120.0, 80.0))
    }
}
