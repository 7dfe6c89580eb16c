//! Hint search.

use tui_match3_core::{has_match, Board};
use tui_match3_types::Position;

/// First adjacent swap (column-major, floor first) that would produce a match.
///
/// Works on a clone; the live board and its motion queue are untouched.
pub fn find_swap(board: &Board) -> Option<(Position, Position)> {
    let mut probe = board.clone();
    let positions: Vec<Position> = probe.positions().collect();

    for a in positions {
        if probe.occupant(a).is_none() {
            continue;
        }
        // Only partners after `a` in position order, so each pair is tried once.
        for b in probe.neighbors(a) {
            if b < a || probe.occupant(b).is_none() {
                continue;
            }
            if probe.kind_at(a) == probe.kind_at(b) {
                continue;
            }
            if probe.swap_tiles(a, b).is_err() {
                continue;
            }
            let found = has_match(&mut probe);
            if probe.swap_tiles(a, b).is_err() {
                return None;
            }
            if found {
                return Some((a, b));
            }
        }
    }
    None
}

/// No swap anywhere produces a match.
pub fn is_deadlocked(board: &Board) -> bool {
    find_swap(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_swap() {
        let board = Board::from_rows(&["GRRB", "RGBY"]).unwrap();
        let (a, b) = find_swap(&board).unwrap();
        assert_eq!((a, b), (Position::new(0, 0), Position::new(0, 1)));
    }

    #[test]
    fn test_live_board_untouched() {
        let board = Board::from_rows(&["GRRB", "RGBY"]).unwrap();
        let before = board.to_rows();
        find_swap(&board);
        assert_eq!(board.to_rows(), before);
        assert!(board.motions().is_empty());
    }

    #[test]
    fn test_swap_into_blocked_cell_is_never_offered() {
        // The only productive-looking move would cross the blocked cell.
        let board = Board::from_rows(&["RGB", "R#R", "GRG"]).unwrap();
        if let Some((a, b)) = find_swap(&board) {
            assert!(board.is_usable(a) && board.is_usable(b));
            assert!(a.is_adjacent(b));
            assert!(a < b);
        }
    }

    #[test]
    fn test_pairs_found_in_either_direction() {
        // The productive swap is vertical, below a horizontal dud.
        let board = Board::from_rows(&["GBG", "RGR"]).unwrap();
        assert_eq!(
            find_swap(&board),
            Some((Position::new(1, 0), Position::new(1, 1)))
        );
    }

    #[test]
    fn test_deadlock() {
        let board = Board::from_rows(&["RG", "GR"]).unwrap();
        assert!(is_deadlocked(&board));
    }
}
