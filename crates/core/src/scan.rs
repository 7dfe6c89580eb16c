//! Board scanner and chain-reaction loop.
//!
//! A scan clears every `matched` flag, then sweeps the grid column by column
//! (floor to top within a column). Each unmatched tile is run through the
//! detector and the super-match classifier; shapes of three or more tiles are
//! flagged so later origins can not claim them again.
//!
//! [`resolve`] repeats scan, remove, compact and refill until a scan comes
//! back empty, bounded by [`MAX_CASCADE_PASSES`].

use crate::board::Board;
use crate::cascade::remove_and_refill;
use crate::classify::promote;
use crate::detect::{is_connected, MatchShape};
use crate::error::BoardError;
use crate::rng::TileFactory;
use crate::tile::TileId;
use crate::types::{MatchKind, Position, MAX_CASCADE_PASSES, POINTS_PER_TILE};

/// Outcome of a full chain resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Remove/refill passes performed (0 when the board had no match).
    pub passes: u32,
    pub removed: u32,
    pub fell: u32,
    pub spawned: u32,
    /// Classification of every removed shape, in removal order.
    pub shapes: Vec<MatchKind>,
}

impl CascadeReport {
    pub fn has_match(&self) -> bool {
        self.passes > 0
    }

    pub fn points(&self) -> u32 {
        self.removed.saturating_mul(POINTS_PER_TILE)
    }

    /// Passes beyond the first one.
    pub fn chain_length(&self) -> u32 {
        self.passes.saturating_sub(1)
    }
}

/// Sweep the board and flag every match.
///
/// Matched tiles are left with `matched = true`.
pub fn find_matches(board: &mut Board) -> Vec<MatchShape> {
    board.clear_matched();

    let mut shapes = Vec::new();
    let (w, h) = (board.width() as i16, board.height() as i16);
    for col in 0..w {
        for row in 0..h {
            let Some(id) = board.occupant(Position::new(col, row)) else {
                continue;
            };
            if board.tile(id).map(|t| t.matched).unwrap_or(true) {
                continue;
            }

            let line = is_connected(board, id);
            if !line.is_match() {
                continue;
            }
            let shape = promote(board, line);
            log::debug!(
                "{} match of {} at ({}, {})",
                shape.kind.as_str(),
                shape.len(),
                col,
                row
            );
            for &t in &shape.tiles {
                if let Some(tile) = board.tile_mut(t) {
                    tile.matched = true;
                }
            }
            shapes.push(shape);
        }
    }
    shapes
}

/// Dry run: does the board currently contain a match?
///
/// Flags are cleared again before returning, so repeated calls on an
/// unchanged board give the same answer.
pub fn has_match(board: &mut Board) -> bool {
    let found = !find_matches(board).is_empty();
    board.clear_matched();
    found
}

/// Scan entry point.
///
/// Without a factory this is the dry run of [`has_match`]. With one, every
/// match is removed and refilled until the board settles.
pub fn scan(board: &mut Board, factory: Option<&mut dyn TileFactory>) -> Result<bool, BoardError> {
    match factory {
        None => Ok(has_match(board)),
        Some(factory) => resolve(board, factory).map(|report| report.has_match()),
    }
}

/// Remove and refill until no match remains.
pub fn resolve(board: &mut Board, factory: &mut dyn TileFactory) -> Result<CascadeReport, BoardError> {
    resolve_with_limit(board, factory, MAX_CASCADE_PASSES)
}

/// [`resolve`] with an explicit pass limit.
pub fn resolve_with_limit(
    board: &mut Board,
    factory: &mut dyn TileFactory,
    max_passes: u32,
) -> Result<CascadeReport, BoardError> {
    let mut report = CascadeReport::default();

    loop {
        let shapes = find_matches(board);
        if shapes.is_empty() {
            break;
        }
        if report.passes >= max_passes {
            board.clear_matched();
            log::error!("cascade still matching after {} passes", max_passes);
            return Err(BoardError::CascadeLimit { passes: max_passes });
        }
        report.passes += 1;

        let mut doomed: Vec<TileId> = shapes
            .iter()
            .flat_map(|s| s.tiles.iter().copied())
            .collect();
        doomed.sort_unstable();
        doomed.dedup();
        report.shapes.extend(shapes.iter().map(|s| s.kind));

        // Removed tiles' flags go with them; survivors must be eligible again.
        board.clear_matched();
        let stats = remove_and_refill(board, &doomed, factory)?;
        report.removed += stats.removed;
        report.fell += stats.fell;
        report.spawned += stats.spawned;

        log::debug!(
            "cascade pass {}: {} shapes, removed {}, spawned {}",
            report.passes,
            shapes.len(),
            stats.removed,
            stats.spawned
        );
    }

    Ok(report)
}
