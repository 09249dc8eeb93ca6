// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite images bound to bones.

use alloc::string::String;
use core::fmt;

/// An opaque handle to a loaded image resource.
///
/// Handles are assigned by the host's image loader and passed through the
/// skeleton and the draw list without interpretation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageHandle(pub u64);

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageHandle({})", self.0)
    }
}

/// A sprite attached to a bone.
///
/// The sprite is drawn at the bone's end joint, turned by the bone's
/// absolute rotation. The owning bone is the slot the image is stored in;
/// a bone holds at most one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    filename: String,
    handle: ImageHandle,
}

impl Image {
    /// Creates an image record for an already loaded resource.
    #[must_use]
    pub fn new(filename: impl Into<String>, handle: ImageHandle) -> Self {
        Self {
            filename: filename.into(),
            handle,
        }
    }

    /// Returns the filename the image was loaded from.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the loader's handle for the image.
    #[must_use]
    pub const fn handle(&self) -> ImageHandle {
        self.handle
    }
}
