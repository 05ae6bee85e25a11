use thiserror::Error;

/// Failures from the construction and persistence paths. Game intents
/// themselves never fail; they degrade to no-ops.
#[derive(Debug, Error)]
pub enum Error {
    /// The text is not an algebraic square such as `e4`
    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    /// The text is not a two-character piece code such as `wK`
    #[error("Invalid piece code: {0:?}")]
    InvalidPiece(String),

    /// A board layout string could not be parsed
    #[error("Invalid board layout: {0}")]
    InvalidLayout(String),

    /// Writing the game log failed
    #[error("Failed to write game log: {0}")]
    Io(#[from] std::io::Error),
}
