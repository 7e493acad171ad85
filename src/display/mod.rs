//! Renderer inputs and human-readable reports.
pub mod diagram;
pub mod report;

pub use diagram::{FlowDiagram, FlowLink};
pub use report::format_impacts;
