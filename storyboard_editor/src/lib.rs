// Copyright 2025 the Storyboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storyboard Editor: turns pointer gestures into box tree operations.
//!
//! [`Editor`] owns a [`storyboard_box_tree::Tree`] and one state machine from
//! [`storyboard_event_state`] per gesture kind. Hosts either forward pointer
//! phases for a node they resolved themselves (`on_header_pointer_*`,
//! `on_resize_handle_pointer_*`, `on_child_pointer_*`,
//! [`Editor::on_toggle_glyph_pressed`]) or let the editor hit test
//! ([`Editor::pointer_down`], [`Editor::pointer_move`], [`Editor::pointer_up`]).
//!
//! Every entry point returns [`EditorError`] on misuse (a stale id, a header
//! gesture on a leaf, a release without a press) instead of panicking.
//!
//! The editor is single threaded and synchronous: each call completes its
//! cascades before returning. Hosts that share it across threads must
//! serialise access themselves.
//!
//! This crate is `no_std` and uses `alloc` through its dependencies.

#![no_std]

mod editor;
mod error;

pub use editor::Editor;
pub use error::EditorError;
