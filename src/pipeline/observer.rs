//! Stage boundary hooks.
//!
//! The runner calls a [`PipelineObserver`] when each stage starts and ends.
//! [`NoopObserver`] costs nothing; [`StageTimingObserver`] keeps a report
//! per stage for profiling.

use std::time::{Duration, Instant};

pub const STAGE_VALIDATE: &str = "validate";
pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_VECTORIZE: &str = "vectorize";
pub const STAGE_CLUSTER: &str = "cluster";
pub const STAGE_TOPICS: &str = "topics";
pub const STAGE_KEYWORDS: &str = "keywords";
pub const STAGE_RECOMMEND: &str = "recommend";
pub const STAGE_SUMMARY: &str = "summary";

/// Every stage name, in execution order.
pub const ALL_STAGES: [&str; 8] = [
    STAGE_VALIDATE,
    STAGE_NORMALIZE,
    STAGE_VECTORIZE,
    STAGE_CLUSTER,
    STAGE_TOPICS,
    STAGE_KEYWORDS,
    STAGE_RECOMMEND,
    STAGE_SUMMARY,
];

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What one stage did.
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Items the stage produced (tokens, rows, topics, ...), when meaningful.
    pub items: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            items: None,
        }
    }

    pub fn with_items(mut self, items: usize) -> Self {
        self.items = Some(items);
        self
    }
}

/// Callbacks at stage boundaries. Both methods default to doing nothing.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Collects one report per finished stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Names of the stages that finished, in order.
    pub fn stages(&self) -> Vec<&'static str> {
        self.reports.iter().map(|(name, _)| *name).collect()
    }

    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}
