// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw list: an ordered sequence of draw commands for one frame.

use alloc::vec::Vec;

use armature_core::skeleton::ImageHandle;
use kurbo::Point;

use crate::controller::Controller;
use crate::item::{ItemKind, SceneItem};
use crate::sink::RenderSink;
use crate::style::Color;

/// A single draw command in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// A straight line.
    Segment {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line colour.
        color: Color,
    },
    /// A circle marker.
    Marker {
        /// Centre of the circle.
        center: Point,
        /// Radius in pixels.
        radius: f64,
        /// Fill or outline colour.
        color: Color,
        /// Filled disc if `true`, outline otherwise.
        filled: bool,
    },
    /// A bone's image.
    Sprite {
        /// The loaded image.
        image: ImageHandle,
        /// Counter-clockwise rotation in radians.
        rotation: f64,
        /// Where the sprite is centred.
        anchor: Point,
    },
}

/// An ordered list of draw commands for a single frame.
///
/// Commands are in item order, so later commands paint over earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    /// Draw commands, back to front.
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty draw list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the list for reuse.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Issues every command to `sink`, in order.
    pub fn replay(&self, sink: &mut dyn RenderSink) {
        for command in &self.commands {
            match *command {
                DrawCommand::Segment { from, to, color } => sink.draw_segment(from, to, color),
                DrawCommand::Marker {
                    center,
                    radius,
                    color,
                    filled,
                } => sink.draw_marker(center, radius, color, filled),
                DrawCommand::Sprite {
                    image,
                    rotation,
                    anchor,
                } => sink.draw_sprite(image, rotation, anchor),
            }
        }
    }
}

impl Controller {
    /// Builds the draw list for the current item list.
    #[must_use]
    pub fn draw_list(&self) -> DrawList {
        let mut list = DrawList::new();
        self.draw_into(&mut list);
        list
    }

    /// Rebuilds `list` in place from the current item list.
    pub fn draw_into(&self, list: &mut DrawList) {
        list.clear();
        for item in self.items() {
            self.draw_item(item, &mut list.commands);
        }
    }

    fn draw_item(&self, item: &SceneItem, out: &mut Vec<DrawCommand>) {
        let style = &self.config().style;
        let skeleton = self.skeleton();
        match item.kind {
            ItemKind::Root(joint) | ItemKind::Joint(joint) => {
                let radius = if item.selected {
                    style.joint_selected_radius
                } else if item.hilighted {
                    style.joint_hilighted_radius
                } else {
                    style.joint_radius
                };
                let color = if item.selected {
                    style.joint_selected_color
                } else {
                    style.joint_color
                };
                out.push(DrawCommand::Marker {
                    center: self.to_screen(skeleton.world_position(joint)),
                    radius,
                    color,
                    filled: !item.hilighted,
                });
            }
            ItemKind::Bone(bone) => {
                let from = self.to_screen(skeleton.world_position(skeleton.start(bone)));
                let to = self.to_screen(skeleton.world_position(skeleton.end(bone)));
                let active = item.selected || item.hilighted;
                out.push(DrawCommand::Segment {
                    from,
                    to,
                    color: if active {
                        style.bone_active_color
                    } else {
                        style.bone_color
                    },
                });
                out.push(DrawCommand::Marker {
                    center: from.midpoint(to),
                    radius: if item.hilighted {
                        style.selector_hilighted_radius
                    } else {
                        style.selector_radius
                    },
                    color: if item.selected {
                        style.selector_selected_color
                    } else {
                        style.selector_color
                    },
                    filled: !item.hilighted,
                });
            }
            ItemKind::Image(bone) => {
                let Some(image) = skeleton.image(bone) else {
                    return;
                };
                out.push(DrawCommand::Sprite {
                    image: image.handle(),
                    rotation: skeleton.absolute_rotation(bone),
                    anchor: self.to_screen(skeleton.world_position(skeleton.end(bone))),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use armature_core::skeleton::{BoneId, ImageHandle};

    use super::*;
    use crate::item::Selectable;
    use crate::sink::{ImageLoadError, ImageLoader};
    use crate::style::Style;

    struct AnyLoader;

    impl ImageLoader for AnyLoader {
        fn load_image(&mut self, filename: &str) -> Result<ImageHandle, ImageLoadError> {
            Ok(ImageHandle(filename.len() as u64))
        }
    }

    /// Records replayed calls as strings.
    #[derive(Default)]
    struct Log(Vec<String>);

    impl RenderSink for Log {
        fn draw_segment(&mut self, from: Point, to: Point, _color: Color) {
            self.0.push(format!("segment {from:?} {to:?}"));
        }

        fn draw_marker(&mut self, center: Point, radius: f64, _color: Color, filled: bool) {
            self.0.push(format!("marker {center:?} {radius} {filled}"));
        }

        fn draw_sprite(&mut self, image: ImageHandle, _rotation: f64, anchor: Point) {
            self.0.push(format!("sprite {} {anchor:?}", image.0));
        }
    }

    fn one_bone(offset: Point) -> (Controller, BoneId) {
        let mut controller = Controller::default();
        controller.set_root_offset(offset);
        controller.select(Some(Selectable::Root(controller.skeleton().root())));
        let bone = controller.add_bone().unwrap();
        controller.select(None);
        (controller, bone)
    }

    #[test]
    fn idle_rig_uses_default_style() {
        let (controller, _) = one_bone(Point::new(100.0, 100.0));
        let style = Style::classic();
        assert_eq!(
            controller.draw_list().commands,
            vec![
                DrawCommand::Marker {
                    center: Point::new(100.0, 100.0),
                    radius: style.joint_radius,
                    color: style.joint_color,
                    filled: true,
                },
                DrawCommand::Segment {
                    from: Point::new(100.0, 100.0),
                    to: Point::new(150.0, 100.0),
                    color: style.bone_color,
                },
                DrawCommand::Marker {
                    center: Point::new(125.0, 100.0),
                    radius: style.selector_radius,
                    color: style.selector_color,
                    filled: true,
                },
                DrawCommand::Marker {
                    center: Point::new(150.0, 100.0),
                    radius: style.joint_radius,
                    color: style.joint_color,
                    filled: true,
                },
            ]
        );
    }

    #[test]
    fn selected_bone_switches_colors() {
        let (mut controller, bone) = one_bone(Point::ZERO);
        controller.select(Some(Selectable::Bone(bone)));
        let style = Style::classic();
        let list = controller.draw_list();
        assert_eq!(
            list.commands[1],
            DrawCommand::Segment {
                from: Point::ZERO,
                to: Point::new(50.0, 0.0),
                color: style.bone_active_color,
            }
        );
        assert_eq!(
            list.commands[2],
            DrawCommand::Marker {
                center: Point::new(25.0, 0.0),
                radius: style.selector_radius,
                color: style.selector_selected_color,
                filled: true,
            }
        );
    }

    #[test]
    fn hilighted_markers_are_outlines() {
        let (mut controller, _) = one_bone(Point::ZERO);
        controller.hover_at(Point::new(25.0, 0.0));
        let list = controller.draw_list();
        let style = Style::classic();
        assert_eq!(
            list.commands[2],
            DrawCommand::Marker {
                center: Point::new(25.0, 0.0),
                radius: style.selector_hilighted_radius,
                color: style.selector_color,
                filled: false,
            }
        );

        controller.hover_at(Point::ZERO);
        let root = controller.draw_list().commands[0];
        assert_eq!(
            root,
            DrawCommand::Marker {
                center: Point::ZERO,
                radius: style.joint_hilighted_radius,
                color: style.joint_color,
                filled: false,
            }
        );
    }

    #[test]
    fn selected_joint_keeps_outline_when_hilighted() {
        let (mut controller, _) = one_bone(Point::ZERO);
        controller.press(Point::ZERO);
        controller.hover_at(Point::ZERO);
        let style = Style::classic();
        assert_eq!(
            controller.draw_list().commands[0],
            DrawCommand::Marker {
                center: Point::ZERO,
                radius: style.joint_selected_radius,
                color: style.joint_selected_color,
                filled: false,
            }
        );
    }

    #[test]
    fn sprite_anchors_at_end_joint() {
        let (mut controller, bone) = one_bone(Point::new(10.0, 20.0));
        controller.select(Some(Selectable::Bone(bone)));
        controller
            .attach_image_to_selected("hand.png", &mut AnyLoader)
            .unwrap();
        // Screen (10, -30) is skeleton (0, 50): straight up.
        controller.drag(Point::new(10.0, -30.0));

        let list = controller.draw_list();
        let DrawCommand::Sprite {
            image,
            rotation,
            anchor,
        } = list.commands[3]
        else {
            panic!("expected sprite after bone selector, got {:?}", list.commands[3]);
        };
        assert_eq!(image, ImageHandle(8));
        assert!((rotation - core::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((anchor - Point::new(10.0, -30.0)).hypot() < 1e-9);
    }

    #[test]
    fn replay_preserves_order() {
        let (mut controller, bone) = one_bone(Point::ZERO);
        controller.select(Some(Selectable::Bone(bone)));
        controller
            .attach_image_to_selected("a.png", &mut AnyLoader)
            .unwrap();
        let mut log = Log::default();
        controller.draw_list().replay(&mut log);
        assert_eq!(log.0.len(), 5);
        assert!(log.0[0].starts_with("marker"));
        assert!(log.0[1].starts_with("segment"));
        assert!(log.0[2].starts_with("marker"));
        assert!(log.0[3].starts_with("sprite 5"));
        assert!(log.0[4].starts_with("marker"));
    }

    #[test]
    fn draw_into_reuses_list() {
        let (controller, _) = one_bone(Point::ZERO);
        let mut list = controller.draw_list();
        controller.draw_into(&mut list);
        assert_eq!(list.commands.len(), 4);
        list.clear();
        assert!(list.commands.is_empty());
    }
}
