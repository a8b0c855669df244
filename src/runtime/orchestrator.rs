use std::sync::Arc;

use chrono::Utc;
use crossbeam_channel::{RecvTimeoutError, Sender};
use serde::Serialize;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::events::{Event, EventSink};
use crate::runtime::interrupt::Interrupt;
use crate::runtime::topology::RuntimeTopology;
use crate::runtime::worker::{panic_message, spawn_worker, WorkerHandle, WorkerReport};
use crate::singleton::SingletonProvider;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerFailure {
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub workers_spawned: usize,
    pub completed: Vec<String>,
    pub failures: Vec<WorkerFailure>,
    pub unfinished: Vec<String>,
    pub interrupted: bool,
    pub instance_id: Option<Uuid>,
    pub finished_at_rfc3339: String,
}

impl RunSummary {
    fn new(workers_spawned: usize) -> Self {
        Self {
            workers_spawned,
            completed: Vec::new(),
            failures: Vec::new(),
            unfinished: Vec::new(),
            interrupted: false,
            instance_id: None,
            finished_at_rfc3339: String::new(),
        }
    }

    fn record_failure(&mut self, sink: &dyn EventSink, label: String, reason: String) {
        tracing::warn!(%label, %reason, "worker failed");
        sink.emit(Event::WorkerFailed {
            label: label.clone(),
            reason: reason.clone(),
        });
        self.failures.push(WorkerFailure { label, reason });
    }

    fn record(&mut self, sink: &dyn EventSink, report: WorkerReport) {
        match report.result {
            Ok(()) => self.completed.push(report.label),
            Err(reason) => self.record_failure(sink, report.label, reason),
        }
    }

    fn is_accounted(&self, label: &str) -> bool {
        self.completed.iter().any(|done| done == label)
            || self.failures.iter().any(|failure| failure.label == label)
    }
}

pub fn run_workers(
    provider: Arc<SingletonProvider>,
    config: &AppConfig,
    interrupt: &Interrupt,
) -> AppResult<RunSummary> {
    run_workers_with(provider, config, interrupt, spawn_worker)
}

// A spawn failure stops further spawning; the workers already running are
// still waited for and `AllFinished` is still emitted before the error returns.
fn run_workers_with<SpawnFn>(
    provider: Arc<SingletonProvider>,
    config: &AppConfig,
    interrupt: &Interrupt,
    mut spawn: SpawnFn,
) -> AppResult<RunSummary>
where
    SpawnFn: FnMut(
        String,
        String,
        Arc<SingletonProvider>,
        Sender<WorkerReport>,
    ) -> AppResult<WorkerHandle>,
{
    let sink = provider.sink();
    let RuntimeTopology {
        report_tx,
        report_rx,
    } = RuntimeTopology::new();

    let mut handles: Vec<WorkerHandle> = Vec::with_capacity(config.workers.count);
    let mut spawn_error = None;
    for label in config.workers.labels() {
        let message = config.workers.message_for(&label);
        match spawn(label, message, Arc::clone(&provider), report_tx.clone()) {
            Ok(handle) => handles.push(handle),
            Err(error) => {
                tracing::error!(%error, spawned = handles.len(), "worker spawn failed");
                spawn_error = Some(error);
                break;
            }
        }
    }
    // Workers hold the only remaining senders, so the channel disconnects
    // exactly when the last worker exits, panicked or not.
    drop(report_tx);

    tracing::info!(workers = handles.len(), "workers started");

    let mut summary = RunSummary::new(handles.len());
    let poll_interval = config.orchestrator.poll_interval();

    loop {
        if interrupt.is_raised() {
            tracing::warn!("interrupted while waiting for workers");
            sink.emit(Event::Interrupted);
            summary.interrupted = true;
            break;
        }

        match report_rx.recv_timeout(poll_interval) {
            Ok(report) => summary.record(sink.as_ref(), report),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if summary.interrupted {
        while let Ok(report) = report_rx.try_recv() {
            summary.record(sink.as_ref(), report);
        }
        for handle in handles {
            if !summary.is_accounted(&handle.label) {
                summary.unfinished.push(handle.label);
            }
        }
    } else {
        for handle in handles {
            if let Err(payload) = handle.join.join() {
                let reason = panic_message(payload.as_ref());
                summary.record_failure(sink.as_ref(), handle.label, reason);
            }
        }
    }

    summary.instance_id = provider.peek().map(|instance| instance.instance_id());
    summary.finished_at_rfc3339 = Utc::now().to_rfc3339();

    tracing::info!(
        completed = summary.completed.len(),
        failed = summary.failures.len(),
        unfinished = summary.unfinished.len(),
        interrupted = summary.interrupted,
        "all workers accounted for"
    );
    sink.emit(Event::AllFinished);

    match spawn_error {
        Some(error) => Err(error),
        None => Ok(summary),
    }
}
