//! Run diagnostics shared by the pipeline and the tools.

pub mod timing;

pub use timing::{timed, StageTiming, TimingBreakdown};
