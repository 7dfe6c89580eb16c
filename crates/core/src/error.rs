//! Board error taxonomy.

use thiserror::Error;

/// Errors surfaced by board operations.
///
/// Rejected swaps and swaps that produce no match are not errors; they are
/// reported as outcomes by the swap controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A cell-addressed operation received a position outside the grid.
    #[error("position ({col}, {row}) is outside the {width}x{height} board")]
    OutOfBounds {
        col: i16,
        row: i16,
        width: u8,
        height: u8,
    },
    /// Internal invariant violation. The operation aborted without touching
    /// the remaining cells.
    #[error("board invariant violated: {0}")]
    Inconsistent(String),
    /// The layout mask itself is unusable.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    /// Rejection sampling never produced a match-free board.
    #[error("no match-free layout found after {attempts} attempts")]
    LayoutExhausted { attempts: u32 },
    /// A chain reaction kept producing matches past the pass limit.
    #[error("cascade did not settle within {passes} passes")]
    CascadeLimit { passes: u32 },
}

impl BoardError {
    /// Build an [`BoardError::Inconsistent`] and log it at error level.
    pub(crate) fn inconsistent(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::error!("board invariant violated: {}", msg);
        BoardError::Inconsistent(msg)
    }
}
