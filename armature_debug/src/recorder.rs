// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records. Filenames are stored length-prefixed.
//! [`decode`] reads them back as an iterator of [`RecordedEvent`].
//!
//! Joint and bone handles are recorded as raw `(index, generation)` pairs
//! ([`RawId`]); a decoded recording never hands out live handles.

use armature_core::skeleton::{BoneId, JointId};
use armature_scene::trace::{
    BoneAddedEvent, DeleteEvent, DragEvent, ImageAttachedEvent, ImageDetachedEvent,
    ImageFailedEvent, RebuildEvent, SelectionEvent, TraceSink,
};
use armature_scene::{ImageLoadError, Selectable};
use kurbo::Point;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SELECTION: u8 = 1;
const TAG_BONE_ADDED: u8 = 2;
const TAG_DELETE: u8 = 3;
const TAG_DRAG: u8 = 4;
const TAG_IMAGE_ATTACHED: u8 = 5;
const TAG_IMAGE_FAILED: u8 = 6;
const TAG_IMAGE_DETACHED: u8 = 7;
const TAG_REBUILD: u8 = 8;

// ---------------------------------------------------------------------------
// Recorded identities
// ---------------------------------------------------------------------------

/// A joint or bone handle as stored in a recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawId {
    /// Slot index.
    pub index: u32,
    /// Slot generation.
    pub generation: u32,
}

impl From<JointId> for RawId {
    fn from(id: JointId) -> Self {
        Self {
            index: id.index(),
            generation: id.generation(),
        }
    }
}

impl From<BoneId> for RawId {
    fn from(id: BoneId) -> Self {
        Self {
            index: id.index(),
            generation: id.generation(),
        }
    }
}

/// Which kind of entity a [`RecordedTarget`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// The root joint.
    Root,
    /// A non-root joint.
    Joint,
    /// A bone.
    Bone,
}

/// A [`Selectable`] as stored in a recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordedTarget {
    /// Entity kind.
    pub kind: TargetKind,
    /// Entity handle.
    pub id: RawId,
}

impl From<Selectable> for RecordedTarget {
    fn from(target: Selectable) -> Self {
        match target {
            Selectable::Root(joint) => Self {
                kind: TargetKind::Root,
                id: joint.into(),
            },
            Selectable::Joint(joint) => Self {
                kind: TargetKind::Joint,
                id: joint.into(),
            },
            Selectable::Bone(bone) => Self {
                kind: TargetKind::Bone,
                id: bone.into(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_count(&mut self, v: usize) {
        self.write_u64(u64::try_from(v).unwrap_or(u64::MAX));
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_point(&mut self, p: Point) {
        self.write_f64(p.x);
        self.write_f64(p.y);
    }

    fn write_str(&mut self, s: &str) {
        let len = u32::try_from(s.len()).unwrap_or(u32::MAX);
        self.write_u32(len);
        self.buf.extend_from_slice(&s.as_bytes()[..len as usize]);
    }

    fn write_id(&mut self, id: RawId) {
        self.write_u32(id.index);
        self.write_u32(id.generation);
    }

    fn write_target(&mut self, target: Option<Selectable>) {
        let Some(target) = target.map(RecordedTarget::from) else {
            self.write_u8(0);
            return;
        };
        self.write_u8(match target.kind {
            TargetKind::Root => 1,
            TargetKind::Joint => 2,
            TargetKind::Bone => 3,
        });
        self.write_id(target.id);
    }

    fn write_load_error(&mut self, error: ImageLoadError) {
        self.write_u8(match error {
            ImageLoadError::NotFound => 0,
            ImageLoadError::Corrupt => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_selection(&mut self, e: &SelectionEvent) {
        self.write_u8(TAG_SELECTION);
        self.write_target(e.previous);
        self.write_target(e.current);
    }

    fn on_bone_added(&mut self, e: &BoneAddedEvent) {
        self.write_u8(TAG_BONE_ADDED);
        self.write_id(e.bone.into());
        self.write_id(e.at.into());
        self.write_f64(e.length);
    }

    fn on_delete(&mut self, e: &DeleteEvent) {
        self.write_u8(TAG_DELETE);
        self.write_target(Some(e.target));
        self.write_count(e.removed);
    }

    fn on_drag(&mut self, e: &DragEvent) {
        self.write_u8(TAG_DRAG);
        self.write_target(Some(e.target));
        self.write_point(e.screen);
    }

    fn on_image_attached(&mut self, e: &ImageAttachedEvent<'_>) {
        self.write_u8(TAG_IMAGE_ATTACHED);
        self.write_id(e.bone.into());
        self.write_str(e.filename);
        self.write_u64(e.handle.0);
    }

    fn on_image_failed(&mut self, e: &ImageFailedEvent<'_>) {
        self.write_u8(TAG_IMAGE_FAILED);
        self.write_id(e.bone.into());
        self.write_str(e.filename);
        self.write_load_error(e.error);
    }

    fn on_image_detached(&mut self, e: &ImageDetachedEvent) {
        self.write_u8(TAG_IMAGE_DETACHED);
        self.write_id(e.bone.into());
    }

    fn on_rebuild(&mut self, e: &RebuildEvent) {
        self.write_u8(TAG_REBUILD);
        self.write_u64(e.rebuild_index);
        self.write_count(e.items);
        self.write_count(e.bones);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`SelectionEvent`].
    Selection {
        /// Selection before the change.
        previous: Option<RecordedTarget>,
        /// Selection after the change.
        current: Option<RecordedTarget>,
    },
    /// A [`BoneAddedEvent`].
    BoneAdded {
        /// The new bone.
        bone: RawId,
        /// The joint it hangs from.
        at: RawId,
        /// Its initial length.
        length: f64,
    },
    /// A [`DeleteEvent`].
    Delete {
        /// What was deleted.
        target: RecordedTarget,
        /// Number of bones removed.
        removed: u64,
    },
    /// A [`DragEvent`].
    Drag {
        /// What was dragged.
        target: RecordedTarget,
        /// Pointer position in screen space.
        screen: Point,
    },
    /// An [`ImageAttachedEvent`].
    ImageAttached {
        /// The bone.
        bone: RawId,
        /// The requested file.
        filename: String,
        /// The loader's handle.
        handle: u64,
    },
    /// An [`ImageFailedEvent`].
    ImageFailed {
        /// The bone.
        bone: RawId,
        /// The requested file.
        filename: String,
        /// What the loader reported.
        error: ImageLoadError,
    },
    /// An [`ImageDetachedEvent`].
    ImageDetached {
        /// The bone.
        bone: RawId,
    },
    /// A [`RebuildEvent`].
    Rebuild {
        /// Rebuild counter.
        rebuild_index: u64,
        /// Items in the rebuilt list.
        items: u64,
        /// Live bones.
        bones: u64,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take(&mut self, n: usize) -> Option<&[u8]> {
        let bytes = self.data.get(self.pos..self.pos.checked_add(n)?)?;
        self.pos += n;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.take(8)?.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_point(&mut self) -> Option<Point> {
        Some(Point::new(self.read_f64()?, self.read_f64()?))
    }

    fn read_string(&mut self) -> Option<String> {
        let len = usize::try_from(self.read_u32()?).ok()?;
        let bytes = self.take(len)?;
        Some(core::str::from_utf8(bytes).ok()?.to_owned())
    }

    fn read_id(&mut self) -> Option<RawId> {
        Some(RawId {
            index: self.read_u32()?,
            generation: self.read_u32()?,
        })
    }

    fn read_target(&mut self) -> Option<Option<RecordedTarget>> {
        let kind = match self.read_u8()? {
            0 => return Some(None),
            1 => TargetKind::Root,
            2 => TargetKind::Joint,
            _ => TargetKind::Bone,
        };
        Some(Some(RecordedTarget {
            kind,
            id: self.read_id()?,
        }))
    }

    fn read_load_error(&mut self) -> Option<ImageLoadError> {
        Some(match self.read_u8()? {
            0 => ImageLoadError::NotFound,
            _ => ImageLoadError::Corrupt,
        })
    }

    fn decode_selection(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Selection {
            previous: self.read_target()?,
            current: self.read_target()?,
        })
    }

    fn decode_bone_added(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::BoneAdded {
            bone: self.read_id()?,
            at: self.read_id()?,
            length: self.read_f64()?,
        })
    }

    fn decode_delete(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Delete {
            target: self.read_target()??,
            removed: self.read_u64()?,
        })
    }

    fn decode_drag(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Drag {
            target: self.read_target()??,
            screen: self.read_point()?,
        })
    }

    fn decode_image_attached(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ImageAttached {
            bone: self.read_id()?,
            filename: self.read_string()?,
            handle: self.read_u64()?,
        })
    }

    fn decode_image_failed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ImageFailed {
            bone: self.read_id()?,
            filename: self.read_string()?,
            error: self.read_load_error()?,
        })
    }

    fn decode_rebuild(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Rebuild {
            rebuild_index: self.read_u64()?,
            items: self.read_u64()?,
            bones: self.read_u64()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SELECTION => self.decode_selection(),
            TAG_BONE_ADDED => self.decode_bone_added(),
            TAG_DELETE => self.decode_delete(),
            TAG_DRAG => self.decode_drag(),
            TAG_IMAGE_ATTACHED => self.decode_image_attached(),
            TAG_IMAGE_FAILED => self.decode_image_failed(),
            TAG_IMAGE_DETACHED => Some(RecordedEvent::ImageDetached {
                bone: self.read_id()?,
            }),
            TAG_REBUILD => self.decode_rebuild(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use armature_core::skeleton::ImageHandle;
    use armature_scene::trace::Tracer;
    use armature_scene::{Command, Controller, ImageLoader, PointerEvent, PointerKind, Session};

    use super::*;

    #[derive(Debug)]
    struct OnlyPng;

    impl ImageLoader for OnlyPng {
        fn load_image(&mut self, filename: &str) -> Result<ImageHandle, ImageLoadError> {
            if filename.ends_with(".png") {
                Ok(ImageHandle(9))
            } else {
                Err(ImageLoadError::Corrupt)
            }
        }
    }

    fn press(x: f64, y: f64) -> Command {
        Command::Pointer(PointerEvent::new(PointerKind::Press, Point::new(x, y)))
    }

    /// Runs a short editing session and returns the recording plus the final
    /// skeleton's single bone.
    fn record_session() -> (Vec<u8>, BoneId) {
        let mut session = Session::new(Controller::default(), OnlyPng);
        let mut rec = RecorderSink::new();
        let mut tracer = Tracer::new(&mut rec);
        for command in [
            press(0.0, 0.0),
            Command::AddBone,
            press(25.0, 0.0),
            Command::Pointer(PointerEvent::new(PointerKind::Drag, Point::new(0.0, -40.0))),
            Command::AttachImage(String::from("arm.png")),
        ] {
            session.dispatch(command, &mut tracer).unwrap();
        }
        let _ = session.dispatch(Command::AttachImage(String::from("arm.jpg")), &mut tracer);
        drop(tracer);
        let root = session.skeleton().root();
        let bone = session.skeleton().bones_out(root).next().unwrap();
        (rec.into_bytes(), bone)
    }

    #[test]
    fn session_recording_decodes_in_order() {
        let (bytes, bone) = record_session();
        let events: Vec<_> = decode(&bytes).collect();
        let bone_id = RawId::from(bone);
        let bone_target = RecordedTarget {
            kind: TargetKind::Bone,
            id: bone_id,
        };

        assert_eq!(events.len(), 8);
        assert!(matches!(
            events[0],
            RecordedEvent::Selection {
                previous: None,
                current: Some(RecordedTarget {
                    kind: TargetKind::Root,
                    ..
                }),
            }
        ));
        match &events[1] {
            RecordedEvent::BoneAdded { bone, length, .. } => {
                assert_eq!(*bone, bone_id);
                assert_eq!(*length, 50.0);
            }
            other => panic!("expected BoneAdded, got {other:?}"),
        }
        assert_eq!(
            events[2],
            RecordedEvent::Rebuild {
                rebuild_index: 2,
                items: 3,
                bones: 1,
            }
        );
        assert!(matches!(
            events[3],
            RecordedEvent::Selection {
                current: Some(RecordedTarget {
                    kind: TargetKind::Bone,
                    ..
                }),
                ..
            }
        ));
        assert_eq!(
            events[4],
            RecordedEvent::Drag {
                target: bone_target,
                screen: Point::new(0.0, -40.0),
            }
        );
        assert_eq!(
            events[5],
            RecordedEvent::ImageAttached {
                bone: bone_id,
                filename: String::from("arm.png"),
                handle: 9,
            }
        );
        assert!(matches!(events[6], RecordedEvent::Rebuild { items: 4, .. }));
        assert_eq!(
            events[7],
            RecordedEvent::ImageFailed {
                bone: bone_id,
                filename: String::from("arm.jpg"),
                error: ImageLoadError::Corrupt,
            }
        );
    }

    #[test]
    fn delete_and_detach_round_trip() {
        let mut controller = Controller::default();
        let root = controller.skeleton().root();
        controller.select(Some(Selectable::Root(root)));
        let bone = controller.add_bone().unwrap();

        let mut rec = RecorderSink::new();
        rec.on_image_detached(&ImageDetachedEvent { bone });
        rec.on_delete(&DeleteEvent {
            target: Selectable::Root(root),
            removed: 1,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(
            events,
            [
                RecordedEvent::ImageDetached { bone: bone.into() },
                RecordedEvent::Delete {
                    target: RecordedTarget {
                        kind: TargetKind::Root,
                        id: root.into(),
                    },
                    removed: 1,
                },
            ]
        );
    }

    #[test]
    fn truncated_recording_stops_cleanly() {
        let (bytes, _) = record_session();
        let full = decode(&bytes).count();
        let partial = decode(&bytes[..bytes.len() - 1]).count();
        assert_eq!(partial, full - 1);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
