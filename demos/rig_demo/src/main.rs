// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted editing session that exercises the controller and diagnostics.
//!
//! Builds a small arm rig through pointer and keyboard commands, tracing every
//! edit to both a [`PrettyPrintSink`](armature_debug::pretty::PrettyPrintSink)
//! and a [`RecorderSink`](armature_debug::recorder::RecorderSink). One image
//! attach succeeds and one fails. The final frame is replayed into a text
//! renderer and exported as `rig.json`, the recording as `rig_trace.json`.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use armature_core::skeleton::ImageHandle;
use armature_scene::trace::{
    BoneAddedEvent, DeleteEvent, DragEvent, ImageAttachedEvent, ImageDetachedEvent,
    ImageFailedEvent, RebuildEvent, SelectionEvent, TraceSink, Tracer,
};
use armature_scene::{
    Color, Command, Controller, EditorConfig, ImageLoadError, ImageLoader, PointerEvent,
    PointerKind, RenderSink, Session,
};
use kurbo::Point;

use armature_debug::pretty::PrettyPrintSink;
use armature_debug::recorder::RecorderSink;

/// Where the root is drawn.
const ORIGIN: Point = Point::new(320.0, 240.0);

/// Resolves image names against a directory on disk.
///
/// Missing files are [`ImageLoadError::NotFound`]; empty files are
/// [`ImageLoadError::Corrupt`]. Handles are issued sequentially.
#[derive(Debug)]
struct DirLoader {
    root: PathBuf,
    next: u64,
}

impl ImageLoader for DirLoader {
    fn load_image(&mut self, filename: &str) -> Result<ImageHandle, ImageLoadError> {
        let meta = fs::metadata(self.root.join(filename)).map_err(|_| ImageLoadError::NotFound)?;
        if !meta.is_file() {
            return Err(ImageLoadError::NotFound);
        }
        if meta.len() == 0 {
            return Err(ImageLoadError::Corrupt);
        }
        self.next += 1;
        Ok(ImageHandle(self.next))
    }
}

/// Prints draw calls to stdout.
#[derive(Debug)]
struct TextRenderer;

impl RenderSink for TextRenderer {
    fn draw_segment(&mut self, from: Point, to: Point, color: Color) {
        println!(
            "  line   ({:7.1}, {:7.1}) -> ({:7.1}, {:7.1}) rgb{:?}",
            from.x,
            from.y,
            to.x,
            to.y,
            color.to_array()
        );
    }

    fn draw_marker(&mut self, center: Point, radius: f64, color: Color, filled: bool) {
        let style = if filled { "disc" } else { "ring" };
        println!(
            "  {style}   ({:7.1}, {:7.1}) r={radius} rgb{:?}",
            center.x,
            center.y,
            color.to_array()
        );
    }

    fn draw_sprite(&mut self, image: ImageHandle, rotation: f64, anchor: Point) {
        println!(
            "  sprite #{} at ({:7.1}, {:7.1}) rot={:.3}",
            image.0, anchor.x, anchor.y, rotation
        );
    }
}

/// Forwards every event to two sinks.
struct Fanout<'a> {
    first: &'a mut dyn TraceSink,
    second: &'a mut dyn TraceSink,
}

impl TraceSink for Fanout<'_> {
    fn on_selection(&mut self, e: &SelectionEvent) {
        self.first.on_selection(e);
        self.second.on_selection(e);
    }

    fn on_bone_added(&mut self, e: &BoneAddedEvent) {
        self.first.on_bone_added(e);
        self.second.on_bone_added(e);
    }

    fn on_delete(&mut self, e: &DeleteEvent) {
        self.first.on_delete(e);
        self.second.on_delete(e);
    }

    fn on_drag(&mut self, e: &DragEvent) {
        self.first.on_drag(e);
        self.second.on_drag(e);
    }

    fn on_image_attached(&mut self, e: &ImageAttachedEvent<'_>) {
        self.first.on_image_attached(e);
        self.second.on_image_attached(e);
    }

    fn on_image_failed(&mut self, e: &ImageFailedEvent<'_>) {
        self.first.on_image_failed(e);
        self.second.on_image_failed(e);
    }

    fn on_image_detached(&mut self, e: &ImageDetachedEvent) {
        self.first.on_image_detached(e);
        self.second.on_image_detached(e);
    }

    fn on_rebuild(&mut self, e: &RebuildEvent) {
        self.first.on_rebuild(e);
        self.second.on_rebuild(e);
    }
}

fn pointer(kind: PointerKind, x: f64, y: f64) -> Command {
    Command::Pointer(PointerEvent::new(kind, Point::new(x, y)))
}

/// Presses at `from`, drags in `steps` even increments to `to`, releases.
fn drag(script: &mut Vec<Command>, from: Point, to: Point, steps: u32) {
    script.push(pointer(PointerKind::Press, from.x, from.y));
    for i in 1..=steps {
        let p = from.lerp(to, f64::from(i) / f64::from(steps));
        script.push(pointer(PointerKind::Drag, p.x, p.y));
    }
    script.push(pointer(PointerKind::Release, to.x, to.y));
}

fn script() -> Vec<Command> {
    let mut script = Vec::new();
    // Upper arm and forearm along +x.
    script.push(pointer(PointerKind::Move, ORIGIN.x, ORIGIN.y));
    script.push(pointer(PointerKind::Press, ORIGIN.x, ORIGIN.y));
    script.push(Command::AddBone);
    script.push(pointer(PointerKind::Press, ORIGIN.x + 25.0, ORIGIN.y));
    script.push(Command::AddBone);
    // Raise the elbow, then stretch the wrist out and down.
    drag(
        &mut script,
        Point::new(ORIGIN.x + 50.0, ORIGIN.y),
        Point::new(ORIGIN.x + 30.0, ORIGIN.y - 40.0),
        4,
    );
    drag(
        &mut script,
        Point::new(ORIGIN.x + 80.0, ORIGIN.y - 40.0),
        Point::new(ORIGIN.x + 100.0, ORIGIN.y + 10.0),
        4,
    );
    // Dress the upper arm; the hand image is missing.
    script.push(pointer(PointerKind::Press, ORIGIN.x + 15.0, ORIGIN.y - 20.0));
    script.push(Command::AttachImage(String::from("upper_arm.png")));
    script.push(Command::AttachImage(String::from("hand.png")));
    // Add a stray bone on the root and delete it again.
    script.push(pointer(PointerKind::Press, ORIGIN.x, ORIGIN.y));
    script.push(Command::AddBone);
    script.push(pointer(PointerKind::Press, ORIGIN.x + 25.0, ORIGIN.y));
    script.push(Command::DeleteSelected);
    // Move the whole rig.
    drag(&mut script, ORIGIN, Point::new(ORIGIN.x - 40.0, ORIGIN.y + 20.0), 2);
    script
}

fn main() {
    let assets = std::env::temp_dir().join("rig_demo_assets");
    fs::create_dir_all(&assets).expect("failed to create asset directory");
    fs::write(assets.join("upper_arm.png"), b"\x89PNG").expect("failed to write asset");

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- session -----------------------------------------------------------
    let mut controller = Controller::new(EditorConfig::classic());
    controller.set_root_offset(ORIGIN);
    let loader = DirLoader {
        root: assets,
        next: 0,
    };
    let mut session = Session::new(controller, loader);

    println!("-- edits --");
    {
        let mut fanout = Fanout {
            first: &mut pretty,
            second: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut fanout);
        for command in script() {
            if let Err(err) = session.dispatch(command, &mut tracer) {
                println!("     ! {err}");
            }
        }
    }

    // -- final frame -------------------------------------------------------
    let list = session.controller().draw_list();
    println!("-- frame ({} commands) --", list.commands.len());
    list.replay(&mut TextRenderer);

    // -- export ------------------------------------------------------------
    let path = "rig.json";
    let file = File::create(path).expect("failed to create rig.json");
    let mut writer = BufWriter::new(file);
    armature_debug::json::export_draw_list(&list, &mut writer)
        .expect("failed to write draw list");

    let trace_path = "rig_trace.json";
    let file = File::create(trace_path).expect("failed to create rig_trace.json");
    let mut writer = BufWriter::new(file);
    armature_debug::json::export_recording(recorder.as_bytes(), &mut writer)
        .expect("failed to write recording");

    println!(
        "Wrote {path} and {trace_path} ({} bones)",
        session.skeleton().bone_count()
    );
}
