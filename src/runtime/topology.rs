use crossbeam_channel::{Receiver, Sender};

use crate::runtime::worker::WorkerReport;

pub struct RuntimeTopology {
    pub report_tx: Sender<WorkerReport>,
    pub report_rx: Receiver<WorkerReport>,
}

impl RuntimeTopology {
    pub fn new() -> Self {
        let (report_tx, report_rx) = crossbeam_channel::unbounded();

        Self {
            report_tx,
            report_rx,
        }
    }
}

impl Default for RuntimeTopology {
    fn default() -> Self {
        Self::new()
    }
}
