//! Swap controller - the selection state machine.
//!
//! `Idle -> AwaitingSecond -> Resolving -> Idle`. An accepted swap is applied
//! to the board immediately; resolution waits for the settle delay to run
//! down through [`SwapController::tick`]. While resolving, every selection is
//! ignored.

use tui_match3_core::{resolve, Board, BoardError, CascadeReport, TileFactory};
use tui_match3_types::Position;

/// Result of a single `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First tile stored; waiting for the second.
    Pending,
    /// The pending tile was selected again and deselected.
    Cleared,
    /// Second tile was not adjacent. Nothing moved.
    Rejected,
    /// Tiles exchanged; resolution is scheduled.
    Swapped,
    /// Input not honored (resolving, or no tile at the position).
    Ignored,
}

/// A completed swap resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    pub a: Position,
    pub b: Position,
    /// False when the swap was reverted.
    pub matched: bool,
    pub report: CascadeReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    AwaitingSecond {
        pending: Position,
    },
    Resolving {
        a: Position,
        b: Position,
        remaining_ms: u32,
    },
}

#[derive(Debug, Clone)]
pub struct SwapController {
    phase: Phase,
    settle_delay_ms: u32,
}

impl SwapController {
    pub fn new(settle_delay_ms: u32) -> Self {
        Self {
            phase: Phase::Idle,
            settle_delay_ms,
        }
    }

    pub fn settle_delay_ms(&self) -> u32 {
        self.settle_delay_ms
    }

    /// The processing flag: a swap is waiting for or undergoing resolution.
    pub fn is_processing(&self) -> bool {
        matches!(self.phase, Phase::Resolving { .. })
    }

    pub fn pending(&self) -> Option<Position> {
        match self.phase {
            Phase::AwaitingSecond { pending } => Some(pending),
            _ => None,
        }
    }

    /// Milliseconds left before the in-flight swap resolves.
    pub fn remaining_ms(&self) -> Option<u32> {
        match self.phase {
            Phase::Resolving { remaining_ms, .. } => Some(remaining_ms),
            _ => None,
        }
    }

    /// Drop any pending selection or in-flight swap without resolving it.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Handle a tile selection.
    ///
    /// Out-of-bounds positions are an error; blocked or empty cells are
    /// ignored.
    pub fn select(&mut self, board: &mut Board, pos: Position) -> Result<SelectOutcome, BoardError> {
        if self.is_processing() {
            log::warn!("selection at ({}, {}) ignored while resolving", pos.col, pos.row);
            return Ok(SelectOutcome::Ignored);
        }
        if board.tile_at(pos)?.is_none() {
            return Ok(SelectOutcome::Ignored);
        }

        match self.phase {
            Phase::Idle => {
                self.phase = Phase::AwaitingSecond { pending: pos };
                Ok(SelectOutcome::Pending)
            }
            Phase::AwaitingSecond { pending } if pending == pos => {
                self.phase = Phase::Idle;
                Ok(SelectOutcome::Cleared)
            }
            Phase::AwaitingSecond { pending } => {
                self.phase = Phase::Idle;
                if !pending.is_adjacent(pos) {
                    return Ok(SelectOutcome::Rejected);
                }
                board.swap_tiles(pending, pos)?;
                self.phase = Phase::Resolving {
                    a: pending,
                    b: pos,
                    remaining_ms: self.settle_delay_ms,
                };
                log::debug!(
                    "swapped ({}, {}) <-> ({}, {})",
                    pending.col,
                    pending.row,
                    pos.col,
                    pos.row
                );
                Ok(SelectOutcome::Swapped)
            }
            // Handled by the processing check above.
            Phase::Resolving { .. } => Ok(SelectOutcome::Ignored),
        }
    }

    /// Advance the settle delay; resolves the swap once it runs out.
    pub fn tick(
        &mut self,
        board: &mut Board,
        factory: &mut dyn TileFactory,
        elapsed_ms: u32,
    ) -> Result<Option<TurnResult>, BoardError> {
        let Phase::Resolving {
            a,
            b,
            remaining_ms,
        } = self.phase
        else {
            return Ok(None);
        };

        let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
        if remaining_ms > 0 {
            self.phase = Phase::Resolving { a, b, remaining_ms };
            return Ok(None);
        }
        self.finish(board, factory, a, b).map(Some)
    }

    /// Resolve an in-flight swap now, skipping the rest of the delay.
    pub fn flush(
        &mut self,
        board: &mut Board,
        factory: &mut dyn TileFactory,
    ) -> Result<Option<TurnResult>, BoardError> {
        match self.phase {
            Phase::Resolving { a, b, .. } => self.finish(board, factory, a, b).map(Some),
            _ => Ok(None),
        }
    }

    fn finish(
        &mut self,
        board: &mut Board,
        factory: &mut dyn TileFactory,
        a: Position,
        b: Position,
    ) -> Result<TurnResult, BoardError> {
        // The processing flag clears even if resolution fails.
        self.phase = Phase::Idle;

        let report = resolve(board, factory)?;
        let matched = report.has_match();
        if !matched {
            board.swap_tiles(a, b)?;
            log::debug!("no match, swap reverted");
        }
        Ok(TurnResult {
            a,
            b,
            matched,
            report,
        })
    }
}

impl Default for SwapController {
    fn default() -> Self {
        Self::new(tui_match3_types::SETTLE_DELAY_MS)
    }
}
