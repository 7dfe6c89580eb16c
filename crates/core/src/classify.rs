//! Super-match promotion.
//!
//! A qualifying line match is promoted to [`MatchKind::Super`] when one of its
//! tiles has at least two same-kind tiles stacked perpendicular to the line.
//! The first such tile in line order wins; no attempt is made to find the
//! largest possible shape.

use crate::board::Board;
use crate::detect::{extend_connected, MatchShape};
use crate::types::{Direction, MatchKind, SUPER_EXTENSION_MIN};

/// Try to promote a line match. Non-line shapes are returned unchanged.
pub fn promote(board: &Board, shape: MatchShape) -> MatchShape {
    let (a, b) = if shape.kind.is_horizontal() {
        (Direction::Up, Direction::Down)
    } else if shape.kind.is_vertical() {
        (Direction::Right, Direction::Left)
    } else {
        return shape;
    };

    let mut extension = Vec::new();
    for &id in &shape.tiles {
        extension.clear();
        extend_connected(board, id, a, &mut extension);
        extend_connected(board, id, b, &mut extension);

        if extension.len() >= SUPER_EXTENSION_MIN {
            log::debug!(
                "{} match promoted to super (+{} tiles)",
                shape.kind.as_str(),
                extension.len()
            );
            for t in &shape.tiles {
                if !extension.contains(t) {
                    extension.push(*t);
                }
            }
            return MatchShape {
                kind: MatchKind::Super,
                tiles: extension,
            };
        }
    }

    shape
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::is_connected;
    use crate::types::Position;

    #[test]
    fn test_t_shape_promotes() {
        // Horizontal RRR on row 0 with two more R stacked on the middle.
        let board = Board::from_rows(&["GRB", "BRG", "RRR"]).unwrap();
        let origin = board.occupant(Position::new(0, 0)).unwrap();
        let shape = promote(&board, is_connected(&board, origin));
        assert_eq!(shape.kind, MatchKind::Super);
        assert_eq!(shape.len(), 5);
    }

    #[test]
    fn test_single_perpendicular_tile_does_not_promote() {
        let board = Board::from_rows(&["GBG", "BRG", "RRR"]).unwrap();
        let origin = board.occupant(Position::new(0, 0)).unwrap();
        let shape = promote(&board, is_connected(&board, origin));
        assert_eq!(shape.kind, MatchKind::Horizontal);
        assert_eq!(shape.len(), 3);
    }

    #[test]
    fn test_vertical_l_shape_promotes() {
        let board = Board::from_rows(&["RGB", "RGB", "RRR"]).unwrap();
        // (0,2) only has a vertical run; the corner tile carries the extension.
        let origin = board.occupant(Position::new(0, 2)).unwrap();
        let line = is_connected(&board, origin);
        assert_eq!(line.kind, MatchKind::Vertical);
        let shape = promote(&board, line);
        assert_eq!(shape.kind, MatchKind::Super);
        assert_eq!(shape.len(), 5);
    }

    #[test]
    fn test_none_is_untouched() {
        let board = Board::from_rows(&["RG"]).unwrap();
        let origin = board.occupant(Position::new(0, 0)).unwrap();
        let shape = is_connected(&board, origin);
        assert_eq!(promote(&board, shape.clone()), shape);
    }
}
