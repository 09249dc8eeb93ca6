// Copyright 2026 the Armature Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporters.
//!
//! [`export_draw_list`] writes one frame's [`DrawList`] as an array of
//! command objects in screen space, for snapshot diffs and external viewers.
//! [`export_recording`] does the same for bytes captured by a
//! [`RecorderSink`](super::recorder::RecorderSink).

use std::io::{self, Write};

use armature_scene::{Color, DrawCommand, DrawList};
use kurbo::Point;
use serde_json::{Value, json};

use crate::recorder::{RawId, RecordedEvent, RecordedTarget, decode};

/// Writes a draw list as a JSON array.
///
/// Each element has a `"type"` of `"segment"`, `"marker"` or `"sprite"`.
/// Points are `[x, y]` pairs and colours `[r, g, b]` triples.
pub fn export_draw_list(list: &DrawList, writer: &mut dyn Write) -> io::Result<()> {
    let commands: Vec<Value> = list.commands.iter().map(command_json).collect();
    serde_json::to_writer_pretty(&mut *writer, &commands)?;
    writeln!(writer)
}

/// Writes recorded events as a JSON array, one object per event.
pub fn export_recording(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(|e| event_json(&e)).collect();
    serde_json::to_writer_pretty(&mut *writer, &events)?;
    writeln!(writer)
}

fn point(p: Point) -> Value {
    json!([p.x, p.y])
}

fn color(c: Color) -> Value {
    json!(c.to_array())
}

fn command_json(command: &DrawCommand) -> Value {
    match *command {
        DrawCommand::Segment { from, to, color: c } => json!({
            "type": "segment",
            "from": point(from),
            "to": point(to),
            "color": color(c),
        }),
        DrawCommand::Marker {
            center,
            radius,
            color: c,
            filled,
        } => json!({
            "type": "marker",
            "center": point(center),
            "radius": radius,
            "color": color(c),
            "filled": filled,
        }),
        DrawCommand::Sprite {
            image,
            rotation,
            anchor,
        } => json!({
            "type": "sprite",
            "image": image.0,
            "rotation": rotation,
            "anchor": point(anchor),
        }),
    }
}

fn id(raw: RawId) -> Value {
    json!([raw.index, raw.generation])
}

fn target(t: Option<RecordedTarget>) -> Value {
    t.map_or(Value::Null, |t| {
        json!({
            "kind": format!("{:?}", t.kind),
            "id": id(t.id),
        })
    })
}

fn event_json(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Selection { previous, current } => json!({
            "event": "selection",
            "previous": target(*previous),
            "current": target(*current),
        }),
        RecordedEvent::BoneAdded { bone, at, length } => json!({
            "event": "bone_added",
            "bone": id(*bone),
            "at": id(*at),
            "length": length,
        }),
        RecordedEvent::Delete { target: t, removed } => json!({
            "event": "delete",
            "target": target(Some(*t)),
            "removed": removed,
        }),
        RecordedEvent::Drag { target: t, screen } => json!({
            "event": "drag",
            "target": target(Some(*t)),
            "screen": point(*screen),
        }),
        RecordedEvent::ImageAttached {
            bone,
            filename,
            handle,
        } => json!({
            "event": "image_attached",
            "bone": id(*bone),
            "filename": filename,
            "handle": handle,
        }),
        RecordedEvent::ImageFailed {
            bone,
            filename,
            error,
        } => json!({
            "event": "image_failed",
            "bone": id(*bone),
            "filename": filename,
            "error": error.to_string(),
        }),
        RecordedEvent::ImageDetached { bone } => json!({
            "event": "image_detached",
            "bone": id(*bone),
        }),
        RecordedEvent::Rebuild {
            rebuild_index,
            items,
            bones,
        } => json!({
            "event": "rebuild",
            "index": rebuild_index,
            "items": items,
            "bones": bones,
        }),
    }
}

#[cfg(test)]
mod tests {
    use armature_scene::trace::{SelectionEvent, TraceSink};
    use armature_scene::{Controller, Selectable};

    use super::*;
    use crate::recorder::RecorderSink;

    #[test]
    fn draw_list_exports_commands() {
        let mut controller = Controller::default();
        controller.set_root_offset(Point::new(100.0, 100.0));
        controller.select(Some(Selectable::Root(controller.skeleton().root())));
        controller.add_bone();

        let mut out = Vec::new();
        export_draw_list(&controller.draw_list(), &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let commands = parsed.as_array().unwrap();
        assert_eq!(commands.len(), 4);

        assert_eq!(commands[0]["type"], "marker");
        assert_eq!(commands[0]["center"], json!([100.0, 100.0]));
        assert_eq!(commands[0]["color"], json!([0, 255, 0]));
        assert_eq!(commands[1]["type"], "segment");
        assert_eq!(commands[1]["to"], json!([150.0, 100.0]));
        assert_eq!(commands[2]["center"], json!([125.0, 100.0]));
        assert_eq!(commands[3]["filled"], true);
    }

    #[test]
    fn empty_draw_list_is_empty_array() {
        let mut out = Vec::new();
        export_draw_list(&DrawList::new(), &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, json!([]));
    }

    #[test]
    fn recording_exports_events() {
        let controller = Controller::default();
        let root = controller.skeleton().root();
        let mut rec = RecorderSink::new();
        rec.on_selection(&SelectionEvent {
            previous: None,
            current: Some(Selectable::Root(root)),
        });

        let mut out = Vec::new();
        export_recording(rec.as_bytes(), &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            parsed,
            json!([{
                "event": "selection",
                "previous": null,
                "current": { "kind": "Root", "id": [0, 0] },
            }])
        );
    }
}
