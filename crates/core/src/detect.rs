//! Run detection.
//!
//! A run is the contiguous sequence of same-kind, not-yet-matched tiles
//! reachable from an origin tile along one direction. Horizontal runs are
//! tried first; the vertical axis is only examined when the horizontal one
//! does not qualify.

use crate::board::Board;
use crate::tile::TileId;
use crate::types::{Direction, MatchKind, MIN_MATCH_LEN};

/// A classified set of tiles. Tiles are unique and kept in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchShape {
    pub kind: MatchKind,
    pub tiles: Vec<TileId>,
}

impl MatchShape {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Large enough to be removed.
    pub fn is_match(&self) -> bool {
        self.tiles.len() >= MIN_MATCH_LEN
    }
}

/// Tiles connected to `origin` in direction `dir`, nearest first.
///
/// Walks from one step past the origin while the next cell is in bounds,
/// usable, occupied by an unmatched tile of the origin's kind. The origin
/// itself is never included.
pub fn connected(board: &Board, origin: TileId, dir: Direction) -> Vec<TileId> {
    let mut out = Vec::new();
    extend_connected(board, origin, dir, &mut out);
    out
}

/// Like [`connected`] but appends into `out`.
pub(crate) fn extend_connected(board: &Board, origin: TileId, dir: Direction, out: &mut Vec<TileId>) {
    let Some(tile) = board.tile(origin) else {
        return;
    };
    let kind = tile.kind;
    let mut pos = tile.pos.step(dir);

    while let Some(id) = board.occupant(pos) {
        let Some(next) = board.tile(id) else {
            break;
        };
        if next.matched || next.kind != kind {
            break;
        }
        out.push(id);
        pos = pos.step(dir);
    }
}

/// Classify the straight run through `origin`.
///
/// Returns the horizontal run when it has at least three tiles, otherwise
/// the vertical run when that qualifies, otherwise `MatchKind::None` with
/// just the origin.
pub fn is_connected(board: &Board, origin: TileId) -> MatchShape {
    let mut tiles = vec![origin];
    extend_connected(board, origin, Direction::Right, &mut tiles);
    extend_connected(board, origin, Direction::Left, &mut tiles);

    if tiles.len() >= MIN_MATCH_LEN {
        let kind = if tiles.len() == MIN_MATCH_LEN {
            MatchKind::Horizontal
        } else {
            MatchKind::LongHorizontal
        };
        return MatchShape { kind, tiles };
    }

    tiles.truncate(1);
    extend_connected(board, origin, Direction::Up, &mut tiles);
    extend_connected(board, origin, Direction::Down, &mut tiles);

    let kind = match tiles.len() {
        n if n == MIN_MATCH_LEN => MatchKind::Vertical,
        n if n > MIN_MATCH_LEN => MatchKind::LongVertical,
        _ => {
            tiles.truncate(1);
            MatchKind::None
        }
    };
    MatchShape { kind, tiles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn id_at(board: &Board, col: i16, row: i16) -> TileId {
        board.occupant(Position::new(col, row)).unwrap()
    }

    #[test]
    fn test_connected_stops_at_other_kind() {
        let board = Board::from_rows(&["GRRRB"]).unwrap();
        let origin = id_at(&board, 1, 0);
        let right = connected(&board, origin, Direction::Right);
        assert_eq!(right, vec![id_at(&board, 2, 0), id_at(&board, 3, 0)]);
        assert!(connected(&board, origin, Direction::Left).is_empty());
    }

    #[test]
    fn test_connected_stops_at_blocked_and_empty() {
        let board = Board::from_rows(&["RR#RR", "RR.RR"]).unwrap();
        let origin = id_at(&board, 0, 1);
        assert_eq!(connected(&board, origin, Direction::Right).len(), 1);
        let origin = id_at(&board, 0, 0);
        assert_eq!(connected(&board, origin, Direction::Right).len(), 1);
    }

    #[test]
    fn test_connected_skips_matched() {
        let mut board = Board::from_rows(&["RRR"]).unwrap();
        let mid = id_at(&board, 1, 0);
        board.tile_mut(mid).unwrap().matched = true;
        assert!(connected(&board, id_at(&board, 0, 0), Direction::Right).is_empty());
    }

    #[test]
    fn test_horizontal_priority() {
        // Origin at (1,1) is in both a horizontal and a vertical run of 3.
        let board = Board::from_rows(&["GRG", "RRR", "BRB"]).unwrap();
        let shape = is_connected(&board, id_at(&board, 1, 1));
        assert_eq!(shape.kind, MatchKind::Horizontal);
        assert_eq!(shape.len(), 3);
    }

    #[test]
    fn test_vertical_and_long_vertical() {
        let board = Board::from_rows(&["R", "R", "R", "R", "G"]).unwrap();
        let shape = is_connected(&board, id_at(&board, 0, 2));
        assert_eq!(shape.kind, MatchKind::LongVertical);
        assert_eq!(shape.len(), 4);

        let board = Board::from_rows(&["R", "R", "R", "G"]).unwrap();
        let shape = is_connected(&board, id_at(&board, 0, 1));
        assert_eq!(shape.kind, MatchKind::Vertical);
    }

    #[test]
    fn test_no_match_returns_singleton() {
        let board = Board::from_rows(&["RRG", "GBR"]).unwrap();
        let origin = id_at(&board, 0, 1);
        let shape = is_connected(&board, origin);
        assert_eq!(shape.kind, MatchKind::None);
        assert_eq!(shape.tiles, vec![origin]);
        assert!(!shape.is_match());
    }
}
