// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by the scene controller.

use alloc::string::String;

use crate::sink::ImageLoadError;

/// Recoverable failures of editor commands.
///
/// None of these leave the skeleton in a partially edited state; the next
/// user action can proceed normally.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The image for the selected bone could not be loaded. The bone keeps
    /// its previous image, if any.
    #[error("failed to load image `{filename}`")]
    ImageLoad {
        /// The requested file.
        filename: String,
        /// What the loader reported.
        #[source]
        source: ImageLoadError,
    },
}
