use thiserror::Error as ThisError;

/// Crate-wide error type. `GameOver` is deliberately absent: a won/lost
/// reveal is ordinary control flow (`RevealOutcome`), not a failure.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid game configuration: {reason}")]
    ConfigInvalid { reason: String },

    /// The game collaborator violated its contract, or propagation/enumeration
    /// derived an impossible state. Fatal; the turn loop does not retry.
    #[error("board contradiction: {reason}")]
    BoardContradiction { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config_invalid(reason: impl Into<String>) -> Self {
        Error::ConfigInvalid {
            reason: reason.into(),
        }
    }

    pub fn board_contradiction(reason: impl Into<String>) -> Self {
        Error::BoardContradiction {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
