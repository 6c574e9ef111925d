use thiserror::Error;

/// Errors surfaced by the grid engine.
///
/// `OutOfSpace` is an internal-invariant violation: reachable states always
/// leave a free cell before a spawn. The others are caller misuse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no empty cells left to spawn a tile into")]
    OutOfSpace,
    #[error("unknown movement direction: {0:?}")]
    UnknownDirection(String),
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
    #[error("no notification is awaiting acknowledgement")]
    NothingToAcknowledge,
}
