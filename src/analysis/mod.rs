//! Graph algorithms over the resolved causal graph.
pub mod flow;
pub mod paths;
pub mod topology;

pub use flow::{normalize, FlowFactors, SinkOutflow};
pub use paths::find_paths;
pub use topology::{schedule, Schedule, ScheduleError};
