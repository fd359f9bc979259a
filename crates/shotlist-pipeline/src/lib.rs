//! Image intake and generation orchestration.
//!
//! This crate provides:
//! - [`ImageIntake`]: the ordered list of product photos awaiting submission
//! - [`Orchestrator`]: the plan-then-render state machine
//! - [`RunLogger`]: structured run lifecycle logging

pub mod error;
pub mod intake;
pub mod logging;
pub mod orchestrator;

pub use error::{IntakeError, IntakeResult, PipelineError, PipelineResult};
pub use intake::{ImageIntake, IncomingFile, IntakeReport, RejectedFile};
pub use logging::RunLogger;
pub use orchestrator::{Orchestrator, RunOutcome, PLANNING_LABEL};
