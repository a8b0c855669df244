pub mod interrupt;
pub mod orchestrator;
pub mod topology;
pub mod worker;

pub use interrupt::Interrupt;
pub use orchestrator::{run_workers, RunSummary, WorkerFailure};
