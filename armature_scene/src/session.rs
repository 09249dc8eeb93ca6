// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-loop glue: turns host input into controller calls.

use alloc::string::String;

use armature_core::skeleton::{Image, Skeleton};
use kurbo::Point;

use crate::controller::Controller;
use crate::error::SceneError;
use crate::item::Selectable;
use crate::sink::ImageLoader;
use crate::trace::{
    BoneAddedEvent, DeleteEvent, DragEvent, ImageAttachedEvent, ImageDetachedEvent,
    ImageFailedEvent, RebuildEvent, SelectionEvent, Tracer,
};

/// What the pointer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Motion with no button held. Updates the hover state.
    Move,
    /// Button pressed. Selects the item under the pointer.
    Press,
    /// Motion with the button held. Drags the selection.
    Drag,
    /// Button released. The selection stays.
    Release,
}

/// A pointer event in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Where it happened, in screen space.
    pub position: Point,
}

impl PointerEvent {
    /// Creates a pointer event.
    #[inline]
    #[must_use]
    pub const fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// One unit of host input.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Pointer input.
    Pointer(PointerEvent),
    /// Attach a default-length bone to the selection.
    AddBone,
    /// Delete the selection.
    DeleteSelected,
    /// Load the named image and attach it to the selected bone.
    AttachImage(String),
    /// Remove the selected bone's image.
    DetachImage,
    /// Remove every bone.
    Reset,
}

/// A controller paired with the host's image loader.
///
/// [`dispatch`](Self::dispatch) processes one command to completion (hit
/// test, mutation, rebuild) before returning, and reports what happened to a
/// [`Tracer`].
#[derive(Debug)]
pub struct Session<L: ImageLoader> {
    controller: Controller,
    loader: L,
}

impl<L: ImageLoader> Session<L> {
    /// Creates a session around a controller.
    #[must_use]
    pub fn new(controller: Controller, loader: L) -> Self {
        Self { controller, loader }
    }

    /// Returns the controller.
    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Returns the controller mutably, for host-driven setup such as placing
    /// the root.
    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Returns the image loader.
    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Returns the skeleton being edited.
    #[must_use]
    pub fn skeleton(&self) -> &Skeleton {
        self.controller.skeleton()
    }

    /// Consumes the session, returning the controller and the loader.
    #[must_use]
    pub fn into_parts(self) -> (Controller, L) {
        (self.controller, self.loader)
    }

    /// Applies one command.
    ///
    /// Emits the command's own event, then a [`SelectionEvent`] if the
    /// selection changed and a [`RebuildEvent`] if the item list was rebuilt.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ImageLoad`] if an [`Command::AttachImage`] fails
    /// to load. Nothing is changed in that case, and the failure is also
    /// reported to the tracer.
    pub fn dispatch(
        &mut self,
        command: Command,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), SceneError> {
        let previous = self.controller.selection();
        let rebuilds = self.controller.rebuild_count();

        let result = self.apply(command, tracer);

        let current = self.controller.selection();
        if current != previous {
            tracer.selection(&SelectionEvent { previous, current });
        }
        if self.controller.rebuild_count() != rebuilds {
            tracer.rebuild(&RebuildEvent::from(&self.controller));
        }
        result
    }

    fn apply(&mut self, command: Command, tracer: &mut Tracer<'_>) -> Result<(), SceneError> {
        match command {
            Command::Pointer(PointerEvent { kind, position }) => match kind {
                PointerKind::Move => {
                    self.controller.hover_at(position);
                }
                PointerKind::Press => {
                    self.controller.press(position);
                }
                PointerKind::Drag => {
                    if let Some(target) = self.controller.drag(position) {
                        tracer.drag(&DragEvent {
                            target,
                            screen: position,
                        });
                    }
                }
                PointerKind::Release => {}
            },
            Command::AddBone => {
                if let Some(bone) = self.controller.add_bone() {
                    let skeleton = self.controller.skeleton();
                    tracer.bone_added(&BoneAddedEvent {
                        bone,
                        at: skeleton.start(bone),
                        length: skeleton.length(bone),
                    });
                }
            }
            Command::DeleteSelected => {
                if let Some(target) = self.controller.selection() {
                    let removed = self.controller.delete_selected();
                    tracer.delete(&DeleteEvent { target, removed });
                }
            }
            Command::AttachImage(filename) => {
                let target = self.controller.selection();
                match self
                    .controller
                    .attach_image_to_selected(&filename, &mut self.loader)
                {
                    Ok(Some(bone)) => {
                        if let Some(handle) = self.controller.skeleton().image(bone).map(Image::handle)
                        {
                            tracer.image_attached(&ImageAttachedEvent {
                                bone,
                                filename: &filename,
                                handle,
                            });
                        }
                    }
                    Ok(None) => {}
                    Err(err) => {
                        if let (Some(Selectable::Bone(bone)), SceneError::ImageLoad { source, .. }) =
                            (target, &err)
                        {
                            tracer.image_failed(&ImageFailedEvent {
                                bone,
                                filename: &filename,
                                error: *source,
                            });
                        }
                        return Err(err);
                    }
                }
            }
            Command::DetachImage => {
                if let Some(bone) = self.controller.detach_image_from_selected() {
                    tracer.image_detached(&ImageDetachedEvent { bone });
                }
            }
            Command::Reset => {
                let root = self.controller.skeleton().root();
                let removed = self.controller.reset();
                tracer.delete(&DeleteEvent {
                    target: Selectable::Root(root),
                    removed,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use armature_core::skeleton::ImageHandle;

    use super::*;
    use crate::item::ItemKind;
    use crate::sink::ImageLoadError;

    /// Accepts `*.png` names and rejects everything else.
    #[derive(Debug, Default)]
    struct PngLoader {
        next: u64,
    }

    impl ImageLoader for PngLoader {
        fn load_image(&mut self, filename: &str) -> Result<ImageHandle, ImageLoadError> {
            if filename.ends_with(".png") {
                self.next += 1;
                Ok(ImageHandle(self.next))
            } else {
                Err(ImageLoadError::NotFound)
            }
        }
    }

    fn pointer(kind: PointerKind, x: f64, y: f64) -> Command {
        Command::Pointer(PointerEvent::new(kind, Point::new(x, y)))
    }

    fn session() -> Session<PngLoader> {
        let mut controller = Controller::default();
        controller.set_root_offset(Point::new(100.0, 100.0));
        Session::new(controller, PngLoader::default())
    }

    fn run(session: &mut Session<PngLoader>, commands: Vec<Command>) {
        let mut tracer = Tracer::none();
        for command in commands {
            session.dispatch(command, &mut tracer).unwrap();
        }
    }

    #[test]
    fn scripted_arm() {
        let mut s = session();
        run(
            &mut s,
            alloc::vec![
                pointer(PointerKind::Press, 100.0, 100.0),
                Command::AddBone,
                pointer(PointerKind::Release, 100.0, 100.0),
                pointer(PointerKind::Press, 150.0, 100.0),
                pointer(PointerKind::Drag, 120.0, 80.0),
                pointer(PointerKind::Drag, 100.0, 50.0),
                pointer(PointerKind::Release, 100.0, 50.0),
            ],
        );
        let skeleton = s.skeleton();
        assert_eq!(skeleton.bone_count(), 1);
        let root = skeleton.root();
        let bone = skeleton.bones_out(root).next().unwrap();
        assert!((skeleton.length(bone) - 50.0).abs() < 1e-9);
        assert!((skeleton.absolute_rotation(bone) - core::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert_eq!(
            s.controller().selection(),
            Some(Selectable::Joint(skeleton.end(bone)))
        );
    }

    #[test]
    fn move_sets_hover_without_selecting() {
        let mut s = session();
        run(&mut s, alloc::vec![pointer(PointerKind::Move, 101.0, 99.0)]);
        let root = s.skeleton().root();
        assert_eq!(s.controller().hovered(), Some(Selectable::Root(root)));
        assert_eq!(s.controller().selection(), None);
    }

    #[test]
    fn image_failure_is_returned_and_harmless() {
        let mut s = session();
        run(
            &mut s,
            alloc::vec![pointer(PointerKind::Press, 100.0, 100.0), Command::AddBone],
        );
        // Select the bone through its midpoint.
        run(&mut s, alloc::vec![pointer(PointerKind::Press, 125.0, 100.0)]);
        let before = s.controller().items().to_vec();

        let err = s
            .dispatch(
                Command::AttachImage(String::from("arm.bmp")),
                &mut Tracer::none(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::ImageLoad {
                source: ImageLoadError::NotFound,
                ..
            }
        ));
        assert_eq!(s.controller().items(), &before[..]);

        s.dispatch(
            Command::AttachImage(String::from("arm.png")),
            &mut Tracer::none(),
        )
        .unwrap();
        assert!(
            s.controller()
                .items()
                .iter()
                .any(|item| matches!(item.kind, ItemKind::Image(_)))
        );
        assert_eq!(s.loader().next, 1);
    }

    #[test]
    fn reset_and_delete() {
        let mut s = session();
        run(
            &mut s,
            alloc::vec![
                pointer(PointerKind::Press, 100.0, 100.0),
                Command::AddBone,
                Command::AddBone,
                Command::DeleteSelected,
            ],
        );
        assert_eq!(s.skeleton().bone_count(), 0);
        run(
            &mut s,
            alloc::vec![
                pointer(PointerKind::Press, 100.0, 100.0),
                Command::AddBone,
                Command::Reset,
            ],
        );
        assert_eq!(s.skeleton().bone_count(), 0);
        assert_eq!(s.controller().items().len(), 1);
    }

    #[test]
    fn commands_without_selection_are_noops() {
        let mut s = session();
        run(
            &mut s,
            alloc::vec![
                Command::AddBone,
                Command::DeleteSelected,
                Command::AttachImage(String::from("a.png")),
                Command::DetachImage,
                pointer(PointerKind::Drag, 10.0, 10.0),
            ],
        );
        assert_eq!(s.skeleton().bone_count(), 0);
        assert_eq!(s.controller().rebuild_count(), 1);
        assert_eq!(s.loader().next, 0);
        let (controller, _) = s.into_parts();
        assert_eq!(controller.skeleton().root_offset(), Point::new(100.0, 100.0));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn dispatch_reports_events() {
        use alloc::string::ToString;

        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Log(Vec<String>);

        impl TraceSink for Log {
            fn on_selection(&mut self, _: &SelectionEvent) {
                self.0.push("selection".to_string());
            }
            fn on_bone_added(&mut self, _: &BoneAddedEvent) {
                self.0.push("bone".to_string());
            }
            fn on_delete(&mut self, e: &DeleteEvent) {
                self.0.push(alloc::format!("delete {}", e.removed));
            }
            fn on_drag(&mut self, _: &DragEvent) {
                self.0.push("drag".to_string());
            }
            fn on_image_failed(&mut self, e: &ImageFailedEvent<'_>) {
                self.0.push(alloc::format!("failed {}", e.filename));
            }
            fn on_rebuild(&mut self, e: &RebuildEvent) {
                self.0.push(alloc::format!("rebuild {}", e.items));
            }
        }

        let mut s = session();
        let mut log = Log::default();
        let mut tracer = Tracer::new(&mut log);
        for command in [
            pointer(PointerKind::Press, 100.0, 100.0),
            Command::AddBone,
            pointer(PointerKind::Press, 125.0, 100.0),
            pointer(PointerKind::Drag, 125.0, 50.0),
        ] {
            s.dispatch(command, &mut tracer).unwrap();
        }
        let _ = s.dispatch(Command::AttachImage(String::from("x.gif")), &mut tracer);
        s.dispatch(Command::DeleteSelected, &mut tracer).unwrap();
        drop(tracer);

        assert_eq!(
            log.0,
            [
                "selection",
                "bone",
                "rebuild 3",
                "selection",
                "drag",
                "failed x.gif",
                "delete 1",
                "selection",
                "rebuild 1",
            ]
        );
    }
}
