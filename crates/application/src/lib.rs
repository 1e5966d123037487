//! Application layer - Use cases and orchestration
//!
//! Contains the blog-to-podcast pipeline, its stage services and the port
//! definitions the infrastructure layer implements.
//!
//! Each stage runs an ordered chain of strategies. Optional strategies that
//! fail are reported as [`StageWarning`]s; the last strategy in a chain is
//! mandatory and its failure ends the run with a [`PipelineError`].

pub mod error;
pub mod outcome;
pub mod ports;
pub mod request;
pub mod services;

pub use error::{ApplicationError, PipelineError};
pub use outcome::{PipelineResult, PipelineStage, StageOutcome, StageWarning};
pub use ports::*;
pub use request::{Credentials, PipelineRequest};
pub use services::*;
