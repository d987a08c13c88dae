//! Notifications emitted while a job runs.
//!
//! Events are cloneable and serializable so a host can log or replay them.

use crate::palette::ToolId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive motion for the downstream motion controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
pub enum MotionCommand {
    PenUp,
    PenDown,
    MoveTo { x: f64, y: f64 },
    ToolChange { tool: ToolId },
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionCommand::PenUp => write!(f, "pen-up"),
            MotionCommand::PenDown => write!(f, "pen-down"),
            MotionCommand::MoveTo { x, y } => write!(f, "move-to {:.3} {:.3}", x, y),
            MotionCommand::ToolChange { tool } => write!(f, "tool-change {}", tool),
        }
    }
}

/// Everything a job reports to its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PlotEvent {
    /// Human-readable status; `replace` overwrites the previous status line.
    Status { message: String, replace: bool },
    /// Numeric progress within the current phase.
    Progress { completed: usize, total: usize },
    Motion { command: MotionCommand },
    Complete,
    Canceled,
}

impl PlotEvent {
    pub fn status(message: impl Into<String>, replace: bool) -> Self {
        PlotEvent::Status {
            message: message.into(),
            replace,
        }
    }

    pub fn motion(command: MotionCommand) -> Self {
        PlotEvent::Motion { command }
    }

    /// True for `Complete` and `Canceled`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlotEvent::Complete | PlotEvent::Canceled)
    }

    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            PlotEvent::Status { message, .. } => format!("status: {}", message),
            PlotEvent::Progress { completed, total } => format!("progress {}/{}", completed, total),
            PlotEvent::Motion { command } => command.to_string(),
            PlotEvent::Complete => "complete".to_string(),
            PlotEvent::Canceled => "canceled".to_string(),
        }
    }
}

/// Receives events from a running job.
pub trait EventSink {
    fn emit(&mut self, event: PlotEvent);
}

impl EventSink for Vec<PlotEvent> {
    fn emit(&mut self, event: PlotEvent) {
        self.push(event);
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct CallbackSink<F: FnMut(PlotEvent)>(pub F);

impl<F: FnMut(PlotEvent)> EventSink for CallbackSink<F> {
    fn emit(&mut self, event: PlotEvent) {
        (self.0)(event)
    }
}

/// Motion commands in a recorded event list, in order.
pub fn motions(events: &[PlotEvent]) -> Vec<MotionCommand> {
    events
        .iter()
        .filter_map(|e| match e {
            PlotEvent::Motion { command } => Some(*command),
            _ => None,
        })
        .collect()
}
