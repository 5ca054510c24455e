//! Notifications a typing run reports while it progresses.

use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Callback invoked from the run loop for every [`EngineEvent`].
///
/// It runs on the engine's task, so a receiver that owns a display must
/// marshal the event to its own context.
pub type EventHandler = Arc<dyn Fn(&EngineEvent) + Send + Sync>;

/// A single notification produced by a run.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Share of the text typed so far, in `[0, 100]`.
    Progress(f64),

    /// Lifecycle change, meant for display.
    Status(Status),
}

impl EngineEvent {
    pub fn as_status(&self) -> Option<Status> {
        match self {
            EngineEvent::Status(status) => Some(*status),
            EngineEvent::Progress(_) => None,
        }
    }

    pub fn as_progress(&self) -> Option<f64> {
        match self {
            EngineEvent::Progress(value) => Some(*value),
            EngineEvent::Status(_) => None,
        }
    }
}

/// Lifecycle states announced on the status channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Started,
    NewParagraph,
    Complete,
    Stopped,
}

impl Status {
    /// Display text. Only [`Status::Complete`] contains the word "complete".
    pub fn message(&self) -> &'static str {
        match self {
            Status::Started => "Typing started...",
            Status::NewParagraph => "Typing... (new paragraph)",
            Status::Complete => "Typing complete!",
            Status::Stopped => "Typing stopped",
        }
    }

    /// Whether this is the last notification of a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Complete | Status::Stopped)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Build a handler that forwards every event into an unbounded channel.
///
/// The receiver yields the run's events in order and ends once the handler
/// (and therefore the engine holding it) is dropped.
pub fn channel() -> (EventHandler, UnboundedReceiver<EngineEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handler: EventHandler = Arc::new(move |event: &EngineEvent| {
        // A receiver that hung up just stops listening.
        let _ = tx.send(event.clone());
    });
    (handler, rx)
}

/// Default handler: status to `info`, progress to `trace`.
pub(crate) fn log_handler() -> EventHandler {
    Arc::new(|event: &EngineEvent| match event {
        EngineEvent::Status(status) => tracing::info!("{}", status),
        EngineEvent::Progress(value) => tracing::trace!(progress = value, "progress"),
    })
}
