//! Error types for the QSR model

/// Invariant violations detected on model values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Passed plus failed tests exceed the executed count
    #[error("build {build}: passed + failed ({outcomes}) exceeds executed ({executed})")]
    OutcomesExceedExecuted {
        /// Build number
        build: u32,
        /// Passed plus failed
        outcomes: u64,
        /// Executed count
        executed: u32,
    },

    /// More tests executed than designed
    #[error("build {build}: executed ({executed}) exceeds designed ({designed})")]
    ExecutedExceedsDesigned {
        /// Build number
        build: u32,
        /// Executed count
        executed: u32,
        /// Designed count
        designed: u32,
    },

    /// Pass and fail percentages do not add up to 100
    #[error("build {build}: pass + fail percentage is {sum}, expected 100")]
    PercentagesDoNotSum {
        /// Build number
        build: u32,
        /// Actual sum
        sum: f64,
    },
}
