// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storyboard Event State: small state machines that turn pointer phases into gestures.
//!
//! These types know nothing about trees or nodes. They are generic over a
//! target key `K` (usually a node id) and only interpret positions:
//!
//! - [`DragState`]: a press that becomes a drag once the pointer travels past a
//!   per-axis threshold, and a click otherwise. Yields the deltas to apply while
//!   dragging.
//! - [`ResizeState`]: a press on a resize handle that maps pointer travel to a
//!   new size, clamped to a minimum.
//! - [`GestureConfig`]: the shared thresholds.
//!
//! Each state tracks a single press. Hosts with several pointers keep one state
//! per pointer.
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod resize;

mod config;

pub use config::GestureConfig;
pub use drag::{DragEnd, DragState};
pub use resize::ResizeState;
