use thiserror::Error;

/// Errors raised by the WER core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WerError {
    /// WER is normalized by the reference length, so the reference must have at least one word.
    #[error("invalid argument: reference word sequence is empty")]
    EmptyReference,

    /// Backtracking reached a cell that none of the recurrence cases explain.
    #[error("internal inconsistency: distance table does not match the sequences at ({x}, {y})")]
    InconsistentTable { x: usize, y: usize },
}
