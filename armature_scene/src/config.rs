// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor configuration.

use armature_core::skeleton::Skeleton;

use crate::style::Style;

/// Configuration for the [`Controller`](crate::Controller).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
    /// Length of bones created by [`add_bone`](crate::Controller::add_bone),
    /// in skeleton units.
    pub default_bone_length: f64,
    /// Pick radius around a joint (root included), in skeleton units.
    pub joint_hit_radius: f64,
    /// Pick radius around a bone's midpoint, in skeleton units.
    pub bone_hit_radius: f64,
    /// Drawing policy.
    pub style: Style,
}

impl EditorConfig {
    /// The classic editor: 50-unit bones and 5-unit pick radii.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            default_bone_length: Skeleton::DEFAULT_BONE_LENGTH,
            joint_hit_radius: 5.0,
            bone_hit_radius: 5.0,
            style: Style::classic(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::classic()
    }
}
