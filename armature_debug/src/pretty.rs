// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Each line
//! is prefixed with a running event counter.

use std::io::Write;

use armature_scene::Selectable;
use armature_scene::trace::{
    BoneAddedEvent, DeleteEvent, DragEvent, ImageAttachedEvent, ImageDetachedEvent,
    ImageFailedEvent, RebuildEvent, SelectionEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    seq: u64,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer, seq: 0 }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer, seq: 0 }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

struct Target(Option<Selectable>);

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => f.write_str("none"),
            Some(Selectable::Root(j)) => write!(f, "root#{}", j.index()),
            Some(Selectable::Joint(j)) => write!(f, "joint#{}", j.index()),
            Some(Selectable::Bone(b)) => write!(f, "bone#{}", b.index()),
        }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_selection(&mut self, e: &SelectionEvent) {
        let seq = self.next_seq();
        let _ = writeln!(
            self.writer,
            "{seq:>4} [select] {} -> {}",
            Target(e.previous),
            Target(e.current),
        );
    }

    fn on_bone_added(&mut self, e: &BoneAddedEvent) {
        let seq = self.next_seq();
        let _ = writeln!(
            self.writer,
            "{seq:>4} [add] bone#{} at joint#{} length={:.1}",
            e.bone.index(),
            e.at.index(),
            e.length,
        );
    }

    fn on_delete(&mut self, e: &DeleteEvent) {
        let seq = self.next_seq();
        let _ = writeln!(
            self.writer,
            "{seq:>4} [delete] {} removed={}",
            Target(Some(e.target)),
            e.removed,
        );
    }

    fn on_drag(&mut self, e: &DragEvent) {
        let seq = self.next_seq();
        let _ = writeln!(
            self.writer,
            "{seq:>4} [drag] {} to ({:.1}, {:.1})",
            Target(Some(e.target)),
            e.screen.x,
            e.screen.y,
        );
    }

    fn on_image_attached(&mut self, e: &ImageAttachedEvent<'_>) {
        let seq = self.next_seq();
        let _ = writeln!(
            self.writer,
            "{seq:>4} [image] bone#{} <- {} (handle {})",
            e.bone.index(),
            e.filename,
            e.handle.0,
        );
    }

    fn on_image_failed(&mut self, e: &ImageFailedEvent<'_>) {
        let seq = self.next_seq();
        let _ = writeln!(
            self.writer,
            "{seq:>4} [image:FAILED] bone#{} <- {}: {}",
            e.bone.index(),
            e.filename,
            e.error,
        );
    }

    fn on_image_detached(&mut self, e: &ImageDetachedEvent) {
        let seq = self.next_seq();
        let _ = writeln!(self.writer, "{seq:>4} [image:detach] bone#{}", e.bone.index());
    }

    fn on_rebuild(&mut self, e: &RebuildEvent) {
        let seq = self.next_seq();
        let _ = writeln!(
            self.writer,
            "{seq:>4} [rebuild] #{} items={} bones={}",
            e.rebuild_index, e.items, e.bones,
        );
    }
}
