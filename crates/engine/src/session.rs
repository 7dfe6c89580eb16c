//! A playable level: board, tile bag, swap controller and progress together.

use thiserror::Error;
use tui_match3_core::{Board, BoardError, BoardSnapshot, LayoutMask, Motion, TileBag};
use tui_match3_types::{Position, MAX_LAYOUT_ATTEMPTS};

use crate::config::{ConfigError, LevelConfig};
use crate::controller::{SelectOutcome, SwapController, TurnResult};
use crate::hint::{find_swap, is_deadlocked};
use crate::progress::{Outcome, Progress};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("board is {found_w}x{found_h}, level expects {width}x{height}")]
    BoardSize {
        found_w: u8,
        found_h: u8,
        width: u8,
        height: u8,
    },
    #[error("cell ({col}, {row}) disagrees with the level mask")]
    MaskMismatch { col: i16, row: i16 },
}

/// A match-free board with at least one productive swap.
fn playable_board(mask: &LayoutMask, bag: &mut TileBag) -> Result<Board, BoardError> {
    Board::generate_accepting(mask, bag, MAX_LAYOUT_ATTEMPTS, &mut |b| !is_deadlocked(b))
}

/// Everything a front end draws, copied out of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub board: BoardSnapshot,
    pub pending: Option<Position>,
    pub hint: Option<(Position, Position)>,
    pub processing: bool,
    pub points: u32,
    pub goal: u32,
    pub moves_left: u32,
    pub outcome: Outcome,
    pub turns: u32,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.outcome.is_over() && !self.processing
    }
}

pub struct GameSession {
    config: LevelConfig,
    mask: LayoutMask,
    bag: TileBag,
    board: Board,
    controller: SwapController,
    progress: Progress,
    hint: Option<(Position, Position)>,
    last_turn: Option<TurnResult>,
    turns: u32,
}

impl GameSession {
    /// Build a level with a freshly generated, match-free board.
    pub fn new(config: LevelConfig) -> Result<Self, SessionError> {
        let mask = config.mask()?;
        let mut bag = TileBag::new(config.kinds(), config.seed);
        let board = playable_board(&mask, &mut bag)?;
        log::info!("level {}", config.to_json()?);
        Ok(Self::assemble(config, mask, bag, board))
    }

    /// Start from a prepared board. Refills still come from the seeded bag.
    ///
    /// The board must have the level's size and blocked cells, since later
    /// rebuilds use the level's mask.
    pub fn with_board(config: LevelConfig, board: Board) -> Result<Self, SessionError> {
        config.validate()?;
        board.check_consistency()?;
        let mask = config.mask()?;
        if (board.width(), board.height()) != (config.width, config.height) {
            return Err(SessionError::BoardSize {
                found_w: board.width(),
                found_h: board.height(),
                width: config.width,
                height: config.height,
            });
        }
        if let Some(pos) = board
            .positions()
            .find(|&p| board.is_usable(p) == mask.is_blocked(p))
        {
            return Err(SessionError::MaskMismatch {
                col: pos.col,
                row: pos.row,
            });
        }
        let bag = TileBag::new(config.kinds(), config.seed);
        Ok(Self::assemble(config, mask, bag, board))
    }

    fn assemble(config: LevelConfig, mask: LayoutMask, bag: TileBag, board: Board) -> Self {
        Self {
            controller: SwapController::new(config.settle_delay_ms),
            progress: Progress::new(config.moves, config.goal),
            config,
            mask,
            bag,
            board,
            hint: None,
            last_turn: None,
            turns: 0,
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn controller(&self) -> &SwapController {
        &self.controller
    }

    /// Forward a selection to the swap controller.
    ///
    /// Once the level is won or lost every selection is ignored.
    pub fn select(&mut self, pos: Position) -> Result<SelectOutcome, SessionError> {
        if self.progress.outcome().is_over() {
            log::warn!("selection ignored: level is over");
            return Ok(SelectOutcome::Ignored);
        }
        let outcome = self.controller.select(&mut self.board, pos)?;
        if outcome == SelectOutcome::Swapped {
            self.hint = None;
        }
        Ok(outcome)
    }

    /// Advance by `elapsed_ms`. Returns the turn when a swap finished resolving.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<Option<TurnResult>, SessionError> {
        let turn = self
            .controller
            .tick(&mut self.board, &mut self.bag, elapsed_ms)?;
        self.complete(turn)
    }

    /// Resolve an in-flight swap immediately.
    pub fn flush(&mut self) -> Result<Option<TurnResult>, SessionError> {
        let turn = self.controller.flush(&mut self.board, &mut self.bag)?;
        self.complete(turn)
    }

    fn complete(&mut self, turn: Option<TurnResult>) -> Result<Option<TurnResult>, SessionError> {
        let Some(turn) = turn else {
            return Ok(None);
        };
        self.turns += 1;

        // Reverted swaps are not reported to the progress tracker.
        if turn.matched {
            let outcome = self.progress.process_turn(turn.report.points(), true);
            if !outcome.is_over() && is_deadlocked(&self.board) {
                log::info!("no productive swap left, rebuilding the board");
                self.board = playable_board(&self.mask, &mut self.bag)?;
            }
        }

        self.last_turn = Some(turn.clone());
        Ok(Some(turn))
    }

    /// Most recent completed turn, consumed on read.
    pub fn take_last_turn(&mut self) -> Option<TurnResult> {
        self.last_turn.take()
    }

    /// Rebuild the level. The bag keeps its sequence, so the new board differs.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.board = playable_board(&self.mask, &mut self.bag)?;
        self.controller.reset();
        self.progress = Progress::new(self.config.moves, self.config.goal);
        self.hint = None;
        self.last_turn = None;
        self.turns = 0;
        log::info!("level restarted");
        Ok(())
    }

    /// Put the level back in a playable state after a failed turn.
    ///
    /// The in-flight swap is dropped and the board is rebuilt from the mask.
    /// Score and moves are kept.
    pub fn recover(&mut self, err: &SessionError) -> Result<(), SessionError> {
        log::error!("turn failed, rebuilding the board: {}", err);
        self.controller.reset();
        self.hint = None;
        self.last_turn = None;
        self.board = playable_board(&self.mask, &mut self.bag)?;
        Ok(())
    }

    /// Look for a productive swap and remember it for display.
    pub fn hint(&mut self) -> Option<(Position, Position)> {
        self.hint = find_swap(&self.board);
        self.hint
    }

    pub fn drain_motions(&mut self) -> Vec<Motion> {
        self.board.drain_motions()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snap = SessionSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Like [`GameSession::snapshot`] but reuses `out`'s buffers.
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.board.fill_from(&self.board);
        out.pending = self.controller.pending();
        out.hint = self.hint;
        out.processing = self.controller.is_processing();
        out.points = self.progress.points();
        out.goal = self.progress.goal();
        out.moves_left = self.progress.moves_left();
        out.outcome = self.progress.outcome();
        out.turns = self.turns;
    }
}
