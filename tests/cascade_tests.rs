//! Removal, compaction and chain-reaction tests

use tui_match3::core::{
    has_match, remove_and_refill, resolve, Board, LayoutMask, Motion, TileBag, TileId,
};
use tui_match3::types::{Position, TileKind};

fn assert_columns_full(board: &Board) {
    for col in 0..board.width() as i16 {
        assert_eq!(
            board.column_occupancy(col),
            board.column_capacity(col),
            "column {} not refilled:\n{}",
            col,
            board
        );
    }
}

#[test]
fn test_removal_conservation_on_random_boards() {
    let mask = LayoutMask::from_rows(&[
        "......", "..#...", "......", "....#.", "......", ".#....", "......", "......",
    ])
    .unwrap();

    for seed in 1..=20u32 {
        let mut bag = TileBag::with_kind_count(5, seed);
        let mut board = Board::generate(&mask, &mut bag).unwrap();

        // Knock out every third tile, scattered across columns and rows.
        let doomed: Vec<TileId> = board
            .positions()
            .filter_map(|p| board.occupant(p))
            .step_by(3)
            .collect();
        let stats = remove_and_refill(&mut board, &doomed, &mut bag).unwrap();

        assert_eq!(stats.removed as usize, doomed.len());
        assert_eq!(stats.spawned, stats.removed);
        assert_columns_full(&board);
        board.check_consistency().unwrap();
    }
}

#[test]
fn test_removed_ids_go_stale() {
    let mut board = Board::from_rows(&["G", "R"]).unwrap();
    let old = board.occupant(Position::new(0, 0)).unwrap();
    let mut refill = |_: Position| TileKind::Blue;
    remove_and_refill(&mut board, &[old], &mut refill).unwrap();

    assert!(board.tile(old).is_none());
    // The slot may be reused, but never under the old id.
    assert_ne!(board.occupant(Position::new(0, 1)), Some(old));
}

#[test]
fn test_gap_under_blocked_cell_is_filled_from_above() {
    let mut board = Board::from_rows(&["Y", "#", "G", "R"]).unwrap();
    let doomed = [
        board.occupant(Position::new(0, 0)).unwrap(),
        board.occupant(Position::new(0, 1)).unwrap(),
    ];
    let mut refill = |_: Position| TileKind::Purple;
    remove_and_refill(&mut board, &doomed, &mut refill).unwrap();
    assert_eq!(board.to_rows(), vec!["P", "#", "P", "Y"]);
}

#[test]
fn test_motions_describe_every_move() {
    let mut board = Board::from_rows(&["B", "G", "R"]).unwrap();
    board.drain_motions();
    let doomed = [board.occupant(Position::new(0, 0)).unwrap()];
    let mut refill = |_: Position| TileKind::Yellow;
    remove_and_refill(&mut board, &doomed, &mut refill).unwrap();

    let motions = board.drain_motions();
    let removed = motions
        .iter()
        .filter(|m| matches!(m, Motion::Removed { .. }))
        .count();
    let fell: Vec<_> = motions
        .iter()
        .filter_map(|m| match m {
            Motion::Fell { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    let spawned: Vec<_> = motions
        .iter()
        .filter_map(|m| match m {
            Motion::Spawned { kind, from, to, .. } => Some((*kind, *from, *to)),
            _ => None,
        })
        .collect();

    assert_eq!(removed, 1);
    assert_eq!(
        fell,
        vec![
            (Position::new(0, 1), Position::new(0, 0)),
            (Position::new(0, 2), Position::new(0, 1)),
        ]
    );
    assert_eq!(
        spawned,
        vec![(TileKind::Yellow, Position::new(0, 3), Position::new(0, 2))]
    );
}

#[test]
fn test_cascade_terminates_on_saturated_boards() {
    let rows = ["RRRRRR"; 8];
    for seed in 1..=10u32 {
        let mut board = Board::from_rows(&rows).unwrap();
        let mut bag = TileBag::with_kind_count(4, seed);
        let report = resolve(&mut board, &mut bag).unwrap();

        assert!(report.has_match());
        assert!(report.removed >= 48);
        assert!(!has_match(&mut board));
        assert!(board.is_full());
        board.check_consistency().unwrap();
    }
}

#[test]
fn test_chain_reaction_reports_each_pass() {
    // Clearing the vertical R run in column 2 drops its top G onto the floor
    // beside two more G tiles.
    let mut board = Board::from_rows(&["BYG", "YBR", "BYR", "GGR"]).unwrap();
    let palette = [TileKind::Orange, TileKind::Purple];
    let mut refill = |p: Position| palette[((p.col + p.row) % 2) as usize];

    let report = resolve(&mut board, &mut refill).unwrap();
    assert_eq!(report.passes, 2);
    assert_eq!(report.removed, 6);
    assert_eq!(report.spawned, 6);
    assert_eq!(report.points(), 6);
    assert_eq!(board.to_rows(), vec!["POP", "BYP", "YBO", "BYP"]);
}
