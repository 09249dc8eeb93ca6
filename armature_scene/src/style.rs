// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colours and marker sizes used when turning scene items into draw commands.

/// An opaque 8-bit RGB colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a colour from its channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the channels as an array.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Per-state drawing policy for joints and bones.
///
/// Joints are drawn as a marker. Bones are drawn as a segment plus a
/// *selector* marker at their midpoint, which is also where they are
/// hit-tested. Hilighting (hover) enlarges markers and draws them as
/// outlines; selection switches to the selected colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Joint marker colour.
    pub joint_color: Color,
    /// Joint marker colour while selected.
    pub joint_selected_color: Color,
    /// Joint marker radius.
    pub joint_radius: f64,
    /// Joint marker radius while hilighted.
    pub joint_hilighted_radius: f64,
    /// Joint marker radius while selected.
    pub joint_selected_radius: f64,
    /// Bone segment colour.
    pub bone_color: Color,
    /// Bone segment colour while hilighted or selected.
    pub bone_active_color: Color,
    /// Bone selector colour.
    pub selector_color: Color,
    /// Bone selector colour while selected.
    pub selector_selected_color: Color,
    /// Bone selector radius.
    pub selector_radius: f64,
    /// Bone selector radius while hilighted.
    pub selector_hilighted_radius: f64,
}

impl Style {
    /// The classic grey-on-white palette.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            joint_color: Color::rgb(175, 175, 175),
            joint_selected_color: Color::rgb(0, 255, 0),
            joint_radius: 2.0,
            joint_hilighted_radius: 5.0,
            joint_selected_radius: 3.0,
            bone_color: Color::rgb(150, 150, 150),
            bone_active_color: Color::rgb(100, 200, 100),
            selector_color: Color::rgb(0, 0, 255),
            selector_selected_color: Color::rgb(0, 255, 0),
            selector_radius: 3.0,
            selector_hilighted_radius: 5.0,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::classic()
    }
}
