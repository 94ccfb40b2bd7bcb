use thiserror::Error;

/// Error type for a simulation that cannot proceed.
///
/// The computation is deterministic, so none of these are retryable: every
/// variant indicates either a bad configuration or a configuration that
/// produces a degenerate state at a specific step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Scenario parameters that cannot produce a well-defined run,
    /// surfaced before the integration loop starts.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A flux total used as an isotope-mixing denominator was exactly zero.
    #[error("{flux} flux is exactly zero at step {step}; isotope mixing is undefined")]
    ZeroTotalFlux { flux: &'static str, step: usize },
    /// A delayed lookup past the end of a series. The pre-history side is
    /// covered by the defined fallback, so this is always a coordination
    /// defect between the regime schedule and the delay lengths.
    #[error("delayed lookup at step {step} (lag {lag}) is outside a series of length {len}")]
    DelayIndex { step: usize, lag: usize, len: usize },
}

/// Convenience type for `Result<T, ModelError>`.
pub type ModelResult<T> = Result<T, ModelError>;
