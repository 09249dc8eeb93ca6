// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between screen space and skeleton space.
//!
//! Skeleton space has its origin at the root joint and Y growing upward.
//! Screen space has Y growing downward. The root is drawn at the skeleton's
//! [`root_offset`](armature_core::skeleton::Skeleton::root_offset), which is
//! a screen-space point.

use kurbo::Point;

/// Converts a screen-space point to skeleton space.
///
/// `skeleton = (screen.x - offset.x, -(screen.y - offset.y))`.
#[inline]
#[must_use]
pub fn screen_to_skeleton(offset: Point, screen: Point) -> Point {
    Point::new(screen.x - offset.x, -(screen.y - offset.y))
}

/// Converts a skeleton-space point to screen space.
///
/// `screen = (skeleton.x + offset.x, -skeleton.y + offset.y)`.
#[inline]
#[must_use]
pub fn skeleton_to_screen(offset: Point, skeleton: Point) -> Point {
    Point::new(skeleton.x + offset.x, -skeleton.y + offset.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_axis_is_flipped() {
        let offset = Point::new(100.0, 100.0);
        assert_eq!(
            screen_to_skeleton(offset, Point::new(100.0, 50.0)),
            Point::new(0.0, 50.0)
        );
        assert_eq!(
            skeleton_to_screen(offset, Point::new(50.0, 0.0)),
            Point::new(150.0, 100.0)
        );
    }

    #[test]
    fn round_trip_is_identity() {
        let offsets = [
            Point::ZERO,
            Point::new(100.0, 100.0),
            Point::new(-37.5, 812.25),
        ];
        let points = [
            Point::ZERO,
            Point::new(1.0, 2.0),
            Point::new(-640.0, 480.0),
            Point::new(0.125, -3.5),
        ];
        for offset in offsets {
            for p in points {
                assert_eq!(skeleton_to_screen(offset, screen_to_skeleton(offset, p)), p);
                assert_eq!(screen_to_skeleton(offset, skeleton_to_screen(offset, p)), p);
            }
        }
    }

    #[test]
    fn root_offset_maps_to_origin() {
        let offset = Point::new(320.0, 240.0);
        assert_eq!(screen_to_skeleton(offset, offset), Point::new(0.0, 0.0));
    }
}
