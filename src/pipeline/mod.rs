//! Pipeline execution and error reporting.
//!
//! ## Submodules
//!
//! - [`artifacts`]: Run options and the output of one run
//! - [`traits`]: Stage trait definitions for the model-fitting stages
//! - [`runner`]: Pipeline orchestration
//! - [`observer`]: Stage boundary hooks and timing
//! - [`errors`] / [`error_code`]: Runtime errors with stable codes

pub mod artifacts;
pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod traits;

pub use artifacts::{PipelineOutput, RunOptions};
pub use error_code::ErrorCode;
pub use errors::PipelineRuntimeError;
pub use observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use runner::Pipeline;
pub use traits::{ClusterAssigner, TopicExtractor};
