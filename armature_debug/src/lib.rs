// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for armature diagnostics.
//!
//! This crate provides [`TraceSink`](armature_scene::trace::TraceSink)
//! implementations and exporters for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json`]: writes a [`DrawList`](armature_scene::DrawList) or a
//!   recording as JSON.

pub mod json;
pub mod pretty;
pub mod recorder;
