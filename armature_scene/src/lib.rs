// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene controller, hit testing, and draw lists for skeleton editing.
//!
//! This crate sits between [`armature_core`]'s skeleton and the host
//! application. It defines:
//!
//! - [`Controller`]: owns a [`Skeleton`](armature_core::skeleton::Skeleton),
//!   keeps a flat list of [`SceneItem`]s in traversal order, and applies edit
//!   commands (select, add, delete, drag, attach image) to the right entity.
//! - [`Selectable`]: the tagged union that edit commands dispatch on.
//! - [`coords`]: the screen/skeleton coordinate mapping (Y flipped, origin
//!   at the root offset).
//! - [`DrawList`]: an ordered list of draw commands for one frame, built by
//!   [`Controller::draw_list`] and replayed into a [`RenderSink`].
//! - [`Session`]: event-loop glue that turns [`Command`]s into controller
//!   calls and reports what happened through a [`Tracer`](trace::Tracer).
//!
//! ```text
//!   PointerEvent / Command
//!           │
//!           ▼
//!   Session::dispatch ──► Controller ──► Skeleton mutation
//!                              │
//!                              ▼
//!                        rebuild() ──► SceneItems ──► DrawList ──► RenderSink
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod config;
mod controller;
pub mod coords;
mod error;
mod item;
mod plan;
mod session;
mod sink;
mod style;
pub mod trace;

pub use config::EditorConfig;
pub use controller::Controller;
pub use error::SceneError;
pub use item::{ItemKind, SceneItem, Selectable};
pub use plan::{DrawCommand, DrawList};
pub use session::{Command, PointerEvent, PointerKind, Session};
pub use sink::{ImageLoadError, ImageLoader, RenderSink};
pub use style::{Color, Style};
