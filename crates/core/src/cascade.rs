//! Cascade resolver - removal, gravity compaction and refill.
//!
//! Compaction walks each column from the floor up. Every usable empty cell
//! takes the nearest tile above it in the same column (tiles fall straight
//! through blocked cells); when nothing is left above, a new tile is spawned
//! into the lowest empty row of the column and enters from above the top
//! edge. Because targets are visited floor first, one pass leaves every
//! usable cell occupied.

use crate::board::Board;
use crate::error::BoardError;
use crate::rng::TileFactory;
use crate::tile::TileId;
use crate::types::Position;

/// Counters for one remove/refill pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefillStats {
    pub removed: u32,
    pub fell: u32,
    pub spawned: u32,
}

/// Destroy `doomed`, compact every column and spawn replacements.
///
/// Stale ids in `doomed` are skipped. On an invariant violation the pass
/// stops at the offending cell and reports [`BoardError::Inconsistent`];
/// cells already processed keep their new state.
pub fn remove_and_refill(
    board: &mut Board,
    doomed: &[TileId],
    factory: &mut dyn TileFactory,
) -> Result<RefillStats, BoardError> {
    let mut stats = RefillStats::default();

    for &id in doomed {
        let Some(pos) = board.tile(id).map(|t| t.pos) else {
            log::warn!("skipping removal of a tile that no longer exists");
            continue;
        };
        if board.remove_tile(pos)?.is_some() {
            stats.removed += 1;
        }
    }

    compact(board, factory, &mut stats)?;
    Ok(stats)
}

fn compact(
    board: &mut Board,
    factory: &mut dyn TileFactory,
    stats: &mut RefillStats,
) -> Result<(), BoardError> {
    let (w, h) = (board.width() as i16, board.height() as i16);

    for col in 0..w {
        // Spawns in the same column queue up above the edge, one row apart.
        let mut queued: i16 = 0;
        for row in 0..h {
            let target = Position::new(col, row);
            if !board.is_usable(target) || board.occupant(target).is_some() {
                continue;
            }

            match donor_above(board, target) {
                Some(src) => {
                    board.move_tile(src, target)?;
                    stats.fell += 1;
                }
                None => {
                    spawn_at_top(board, col, queued, factory)?;
                    queued += 1;
                    stats.spawned += 1;
                }
            }
        }
    }
    Ok(())
}

/// Nearest occupied cell strictly above `pos` in its column.
fn donor_above(board: &Board, pos: Position) -> Option<Position> {
    (pos.row + 1..board.height() as i16)
        .map(|row| Position::new(pos.col, row))
        .find(|&p| board.occupant(p).is_some())
}

fn spawn_at_top(
    board: &mut Board,
    col: i16,
    queued: i16,
    factory: &mut dyn TileFactory,
) -> Result<TileId, BoardError> {
    let Some(row) = board.lowest_empty_row(col) else {
        return Err(BoardError::inconsistent(format!(
            "no empty row left in column {} to spawn into",
            col
        )));
    };
    let to = Position::new(col, row);
    let from = Position::new(col, board.height() as i16 + queued);
    let kind = factory.make(to);
    board.spawn_tile(to, kind, from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Motion;
    use crate::types::TileKind;

    fn ids(board: &Board, cells: &[(i16, i16)]) -> Vec<TileId> {
        cells
            .iter()
            .map(|&(c, r)| board.occupant(Position::new(c, r)).unwrap())
            .collect()
    }

    #[test]
    fn test_single_gap_pulls_column_down() {
        let mut board = Board::from_rows(&["B", "G", "R", "Y"]).unwrap();
        let doomed = ids(&board, &[(0, 1)]);
        let mut factory = |_: Position| TileKind::Purple;

        let stats = remove_and_refill(&mut board, &doomed, &mut factory).unwrap();
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.fell, 2);
        assert_eq!(stats.spawned, 1);
        assert_eq!(board.to_rows(), vec!["P", "B", "G", "Y"]);
        board.check_consistency().unwrap();
    }

    #[test]
    fn test_multi_gap_column_fills_in_one_pass() {
        let mut board = Board::from_rows(&["B", "R", "G", "R", "Y"]).unwrap();
        let doomed = ids(&board, &[(0, 1), (0, 3)]);
        let mut factory = |_: Position| TileKind::Orange;

        remove_and_refill(&mut board, &doomed, &mut factory).unwrap();
        assert_eq!(board.to_rows(), vec!["O", "O", "B", "G", "Y"]);
        assert!(board.is_full());
        board.check_consistency().unwrap();
    }

    #[test]
    fn test_tiles_fall_through_blocked_cells() {
        let mut board = Board::from_rows(&["G", "#", "R"]).unwrap();
        let doomed = ids(&board, &[(0, 0)]);
        let mut factory = |_: Position| TileKind::Blue;

        remove_and_refill(&mut board, &doomed, &mut factory).unwrap();
        assert_eq!(board.to_rows(), vec!["B", "#", "G"]);
        board.check_consistency().unwrap();
    }

    #[test]
    fn test_spawns_enter_from_above_in_order() {
        let mut board = Board::from_rows(&["R", "R", "R"]).unwrap();
        let doomed = ids(&board, &[(0, 0), (0, 1), (0, 2)]);
        board.drain_motions();
        let mut factory = |_: Position| TileKind::Green;

        let stats = remove_and_refill(&mut board, &doomed, &mut factory).unwrap();
        assert_eq!(stats.spawned, 3);

        let spawns: Vec<_> = board
            .motions()
            .iter()
            .filter_map(|m| match m {
                Motion::Spawned { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(
            spawns,
            vec![
                (Position::new(0, 3), Position::new(0, 0)),
                (Position::new(0, 4), Position::new(0, 1)),
                (Position::new(0, 5), Position::new(0, 2)),
            ]
        );
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let mut board = Board::from_rows(&["R", "G"]).unwrap();
        let doomed = ids(&board, &[(0, 0)]);
        let mut factory = |_: Position| TileKind::Yellow;
        remove_and_refill(&mut board, &doomed, &mut factory).unwrap();

        // Same id again: already destroyed.
        let stats = remove_and_refill(&mut board, &doomed, &mut factory).unwrap();
        assert_eq!(stats, RefillStats::default());
        assert_eq!(board.to_rows(), vec!["Y", "R"]);
    }
}
