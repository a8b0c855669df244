pub mod sink;

use serde::Serialize;
use uuid::Uuid;

pub use sink::{ConsoleSink, EventSink, RecordingSink};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    InstanceCreated { instance_id: Uuid },
    Message { text: String },
    WorkerFailed { label: String, reason: String },
    Interrupted,
    AllFinished,
}

impl Event {
    pub fn render(&self) -> String {
        match self {
            Event::InstanceCreated { .. } => "Singleton instance created.".to_owned(),
            Event::Message { text } => format!("Message from Singleton: {text}"),
            Event::WorkerFailed { label, reason } => format!("Worker {label} failed: {reason}"),
            Event::Interrupted => "Thread interrupted.".to_owned(),
            Event::AllFinished => "All threads have finished execution.".to_owned(),
        }
    }
}
