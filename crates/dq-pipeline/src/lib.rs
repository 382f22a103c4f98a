//! Run orchestration: cleaning, integrity resolution, reporting, and
//! persistence over one data root.

pub mod orchestrator;
pub mod sink;

pub use orchestrator::PipelineOrchestrator;
pub use sink::{CsvSink, LOAD_ORDER, SinkError, TableSink};
