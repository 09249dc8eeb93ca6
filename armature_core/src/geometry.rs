// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar helpers shared by the kinematics model and the scene controller.
//!
//! All angles are in radians, measured counter-clockwise from the positive
//! X axis of skeleton space (Y up).

use kurbo::{Point, Vec2};

/// Returns the angle of the vector from `from` to `to`.
///
/// This is `atan2(to.y - from.y, to.x - from.x)`, so the result lies in
/// `(-π, π]`.
#[inline]
#[must_use]
pub fn heading(from: Point, to: Point) -> f64 {
    (to - from).atan2()
}

/// Returns the Euclidean distance between two points.
#[inline]
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Returns the displacement from a bone's start joint to its end joint.
#[inline]
#[must_use]
pub fn bone_offset(length: f64, rotation: f64) -> Vec2 {
    Vec2::from_angle(rotation) * length
}
