// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for editor sessions.
//!
//! This module provides a [`TraceSink`] trait with one method per edit event.
//! [`Session::dispatch`](crate::Session::dispatch) calls them as commands are
//! applied. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use armature_core::skeleton::{BoneId, ImageHandle, JointId};
use kurbo::Point;

use crate::controller::Controller;
use crate::item::Selectable;
use crate::sink::ImageLoadError;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the selection changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionEvent {
    /// The selection before the change.
    pub previous: Option<Selectable>,
    /// The selection after the change.
    pub current: Option<Selectable>,
}

/// Emitted after a bone is attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneAddedEvent {
    /// The new bone.
    pub bone: BoneId,
    /// The joint it was attached to.
    pub at: JointId,
    /// Its initial length.
    pub length: f64,
}

/// Emitted after a delete or reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeleteEvent {
    /// What was deleted. A reset reports the root.
    pub target: Selectable,
    /// Number of bones removed.
    pub removed: usize,
}

/// Emitted for each drag step that moved something.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
    /// What was dragged.
    pub target: Selectable,
    /// Pointer position in screen space.
    pub screen: Point,
}

/// Emitted after an image is attached to a bone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageAttachedEvent<'a> {
    /// The bone that received the image.
    pub bone: BoneId,
    /// The requested file.
    pub filename: &'a str,
    /// What the loader returned.
    pub handle: ImageHandle,
}

/// Emitted when the loader rejects an image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageFailedEvent<'a> {
    /// The bone the image was meant for.
    pub bone: BoneId,
    /// The requested file.
    pub filename: &'a str,
    /// What the loader reported.
    pub error: ImageLoadError,
}

/// Emitted after an image is removed from a bone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageDetachedEvent {
    /// The bone that lost its image.
    pub bone: BoneId,
}

/// Emitted after the item list is rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RebuildEvent {
    /// Rebuild counter.
    pub rebuild_index: u64,
    /// Number of items in the new list.
    pub items: usize,
    /// Number of live bones.
    pub bones: usize,
}

impl From<&Controller> for RebuildEvent {
    fn from(controller: &Controller) -> Self {
        Self {
            rebuild_index: controller.rebuild_count(),
            items: controller.items().len(),
            bones: controller.skeleton().bone_count(),
        }
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from an editor session.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the selection changes.
    fn on_selection(&mut self, e: &SelectionEvent) {
        _ = e;
    }

    /// Called after a bone is attached.
    fn on_bone_added(&mut self, e: &BoneAddedEvent) {
        _ = e;
    }

    /// Called after a delete or reset.
    fn on_delete(&mut self, e: &DeleteEvent) {
        _ = e;
    }

    /// Called for each drag step.
    fn on_drag(&mut self, e: &DragEvent) {
        _ = e;
    }

    /// Called after an image is attached.
    fn on_image_attached(&mut self, e: &ImageAttachedEvent<'_>) {
        _ = e;
    }

    /// Called when an image fails to load.
    fn on_image_failed(&mut self, e: &ImageFailedEvent<'_>) {
        _ = e;
    }

    /// Called after an image is detached.
    fn on_image_detached(&mut self, e: &ImageDetachedEvent) {
        _ = e;
    }

    /// Called after the item list is rebuilt.
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Expands to a `Tracer` method that forwards one event to the sink.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident => $hook:ident($ty:ty)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$hook(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`SelectionEvent`].
        selection => on_selection(SelectionEvent)
    );
    forward!(
        /// Emits a [`BoneAddedEvent`].
        bone_added => on_bone_added(BoneAddedEvent)
    );
    forward!(
        /// Emits a [`DeleteEvent`].
        delete => on_delete(DeleteEvent)
    );
    forward!(
        /// Emits a [`DragEvent`].
        drag => on_drag(DragEvent)
    );
    forward!(
        /// Emits an [`ImageAttachedEvent`].
        image_attached => on_image_attached(ImageAttachedEvent<'_>)
    );
    forward!(
        /// Emits an [`ImageFailedEvent`].
        image_failed => on_image_failed(ImageFailedEvent<'_>)
    );
    forward!(
        /// Emits an [`ImageDetachedEvent`].
        image_detached => on_image_detached(ImageDetachedEvent)
    );
    forward!(
        /// Emits a [`RebuildEvent`].
        rebuild => on_rebuild(RebuildEvent)
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_event_from_controller() {
        let mut controller = Controller::default();
        controller.select(Some(Selectable::Root(controller.skeleton().root())));
        controller.add_bone();
        let evt = RebuildEvent::from(&controller);
        assert_eq!(evt.rebuild_index, 2);
        assert_eq!(evt.items, 3);
        assert_eq!(evt.bones, 1);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_selection(&SelectionEvent {
            previous: None,
            current: None,
        });
        sink.on_rebuild(&RebuildEvent {
            rebuild_index: 0,
            items: 1,
            bones: 0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut controller = Controller::default();
        controller.select(Some(Selectable::Root(controller.skeleton().root())));
        let bone = controller.add_bone().unwrap();

        let mut tracer = Tracer::none();
        tracer.selection(&SelectionEvent {
            previous: None,
            current: None,
        });
        tracer.image_failed(&ImageFailedEvent {
            bone,
            filename: "x.png",
            error: ImageLoadError::Corrupt,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct CountingSink {
            rebuilds: Vec<u64>,
        }
        impl TraceSink for CountingSink {
            fn on_rebuild(&mut self, e: &RebuildEvent) {
                self.rebuilds.push(e.rebuild_index);
            }
        }

        let mut sink = CountingSink {
            rebuilds: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.rebuild(&RebuildEvent {
            rebuild_index: 7,
            items: 1,
            bones: 0,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.rebuilds, &[7]);
    }
}
