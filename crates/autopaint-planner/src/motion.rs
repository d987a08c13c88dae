//! Motion streaming
//!
//! Turns ordered polylines into the primitive commands the motion controller
//! understands, dropping pen-ups while the pen is already up and tool changes
//! to the tool already loaded.

use autopaint_core::{EventSink, MotionCommand, PlotEvent, ToolId, VectorPath};

/// Stateful command filter; keeps pen and tool state across polylines.
#[derive(Debug, Clone, Default)]
pub struct MotionStreamer {
    tool: Option<ToolId>,
    pen_up: bool,
    emitted: usize,
}

impl MotionStreamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Forward `command` unless it would change nothing.
    pub fn push(&mut self, command: MotionCommand, sink: &mut dyn EventSink) {
        match command {
            MotionCommand::PenUp if self.pen_up => return,
            MotionCommand::PenUp => self.pen_up = true,
            MotionCommand::PenDown => self.pen_up = false,
            MotionCommand::ToolChange { tool } if self.tool == Some(tool) => return,
            MotionCommand::ToolChange { tool } => self.tool = Some(tool),
            MotionCommand::MoveTo { .. } => {}
        }
        self.emitted += 1;
        sink.emit(PlotEvent::motion(command));
    }

    /// Status line plus the full command sequence for one polyline.
    pub fn stream_path(&mut self, path: &VectorPath, sink: &mut dyn EventSink) {
        let Some(first) = path.first_point() else {
            return;
        };
        if let Some(tool) = path.tool {
            self.push(MotionCommand::ToolChange { tool }, sink);
        }
        sink.emit(PlotEvent::status(
            format!("Drawing {} {}", path.role, path.name),
            true,
        ));
        self.push(MotionCommand::PenUp, sink);
        self.push(
            MotionCommand::MoveTo {
                x: first.x,
                y: first.y,
            },
            sink,
        );
        self.push(MotionCommand::PenDown, sink);
        for p in path.points().skip(1) {
            self.push(MotionCommand::MoveTo { x: p.x, y: p.y }, sink);
        }
        self.push(MotionCommand::PenUp, sink);
    }
}

/// Stream every polyline in order.
pub fn stream(paths: &[VectorPath], sink: &mut dyn EventSink) {
    let mut streamer = MotionStreamer::new();
    for path in paths {
        streamer.stream_path(path, sink);
    }
}

/// Stream a single polyline on its own, tool change included.
pub fn stream_path(path: &VectorPath, sink: &mut dyn EventSink) {
    MotionStreamer::new().stream_path(path, sink);
}
