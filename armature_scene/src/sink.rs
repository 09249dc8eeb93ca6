// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborator contracts.
//!
//! The editor core never draws or decodes images itself. A host provides:
//!
//! - **Render sink**: Implements [`RenderSink`] to receive the draw commands
//!   of a [`DrawList`](crate::DrawList), in order, once per frame. All
//!   positions are in screen space.
//!
//! - **Image loader**: Implements [`ImageLoader`] to turn a filename into an
//!   [`ImageHandle`]. Loading happens only when an image is attached and may
//!   fail; a failure never changes the skeleton.
//!
//! - **Pointer input**: Feeds [`PointerEvent`](crate::PointerEvent)s in
//!   screen space to a [`Session`](crate::Session).

use armature_core::skeleton::ImageHandle;
use kurbo::Point;

use crate::style::Color;

/// Receives draw commands replayed from a [`DrawList`](crate::DrawList).
///
/// Both real canvases and test doubles implement this trait.
pub trait RenderSink {
    /// Draws a straight line between two points.
    fn draw_segment(&mut self, from: Point, to: Point, color: Color);

    /// Draws a circle marker, filled or as an outline.
    fn draw_marker(&mut self, center: Point, radius: f64, color: Color, filled: bool);

    /// Draws a sprite centred on `anchor`, rotated counter-clockwise by
    /// `rotation` radians.
    fn draw_sprite(&mut self, image: ImageHandle, rotation: f64, anchor: Point);
}

/// Why an image could not be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ImageLoadError {
    /// No resource exists under the requested name.
    #[error("image resource not found")]
    NotFound,
    /// The resource exists but could not be decoded.
    #[error("image resource is corrupt")]
    Corrupt,
}

/// Loads image resources on behalf of the editor.
pub trait ImageLoader {
    /// Loads `filename` and returns a handle the render sink understands.
    ///
    /// # Errors
    ///
    /// Returns an [`ImageLoadError`] if the resource is missing or
    /// unreadable.
    fn load_image(&mut self, filename: &str) -> Result<ImageHandle, ImageLoadError>;
}
