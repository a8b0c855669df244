use std::io::Write;
use std::sync::Mutex;

use crate::events::Event;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn write_event<W: Write>(writer: &mut W, event: &Event) -> bool {
        match writeln!(writer, "{}", event.render()).and_then(|()| writer.flush()) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%error, ?event, "failed to write event to console");
                false
            }
        }
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: Event) {
        tracing::debug!(?event, "emitting event");
        Self::write_event(&mut std::io::stdout().lock(), &event);
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(Event::render).collect()
    }

    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Event) -> bool,
    {
        self.lock().iter().filter(|event| predicate(event)).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Event>> {
        self.events
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.lock().push(event);
    }
}
