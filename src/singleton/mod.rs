pub mod provider;

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::events::{Event, EventSink};

pub use provider::SingletonProvider;

pub struct Singleton {
    instance_id: Uuid,
    sink: Arc<dyn EventSink>,
}

impl Singleton {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            sink,
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn show_message(&self, message: &str) {
        tracing::debug!(instance_id = %self.instance_id, message, "showing message");
        self.sink.emit(Event::Message {
            text: message.to_owned(),
        });
    }
}

impl fmt::Debug for Singleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Singleton")
            .field("instance_id", &self.instance_id)
            .finish_non_exhaustive()
    }
}
