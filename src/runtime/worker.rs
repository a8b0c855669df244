use std::any::Any;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::Sender;

use crate::error::{AppError, AppResult};
use crate::singleton::SingletonProvider;

#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub label: String,
    pub result: Result<(), String>,
}

pub struct WorkerHandle {
    pub label: String,
    pub join: thread::JoinHandle<()>,
}

pub fn spawn_worker(
    label: String,
    message: String,
    provider: Arc<SingletonProvider>,
    report_tx: Sender<WorkerReport>,
) -> AppResult<WorkerHandle> {
    let worker_label = label.clone();
    let join = thread::Builder::new()
        .name(format!("worker-{label}"))
        .spawn(move || {
            let result = provider
                .get_instance()
                .map(|instance| instance.show_message(&message))
                .map_err(|error| error.to_string());
            if let Err(reason) = &result {
                tracing::warn!(label = %worker_label, %reason, "worker could not obtain singleton");
            }

            let report = WorkerReport {
                label: worker_label,
                result,
            };
            if report_tx.send(report).is_err() {
                tracing::debug!("orchestrator stopped listening before worker reported");
            }
        })
        .map_err(|error| AppError::Spawn(format!("worker {label}: {error}")))?;

    Ok(WorkerHandle { label, join })
}

pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{panic_message, spawn_worker};
    use crate::events::{Event, RecordingSink};
    use crate::singleton::SingletonProvider;
    use std::sync::Arc;

    #[test]
    fn worker_shows_message_then_reports() {
        let sink = Arc::new(RecordingSink::new());
        let provider = Arc::new(SingletonProvider::new(sink.clone()));
        let (report_tx, report_rx) = crossbeam_channel::unbounded();

        let handle = spawn_worker(
            "3".to_owned(),
            "Thread 3".to_owned(),
            provider,
            report_tx,
        )
        .expect("spawn worker");
        assert_eq!(handle.label, "3");
        handle.join.join().expect("worker thread");

        let report = report_rx.recv().expect("report");
        assert_eq!(report.label, "3");
        assert_eq!(report.result, Ok(()));
        assert_eq!(
            sink.lines().last().map(String::as_str),
            Some("Message from Singleton: Thread 3")
        );
        assert_eq!(
            sink.count(|event| matches!(event, Event::InstanceCreated { .. })),
            1
        );
    }

    #[test]
    fn panic_payloads_are_rendered() {
        let static_str: Box<dyn std::any::Any + Send> = Box::new("boom");
        let owned: Box<dyn std::any::Any + Send> = Box::new("kaboom".to_owned());
        let other: Box<dyn std::any::Any + Send> = Box::new(42_u8);

        assert_eq!(panic_message(static_str.as_ref()), "panicked: boom");
        assert_eq!(panic_message(owned.as_ref()), "panicked: kaboom");
        assert_eq!(panic_message(other.as_ref()), "panicked");
    }
}
