//! Swap controller and session flow tests

use tui_match3::core::Board;
use tui_match3::engine::{
    GameSession, LevelConfig, Outcome, SelectOutcome, SwapController,
};
use tui_match3::types::{Position, TileKind, SETTLE_DELAY_MS, TICK_MS};

/// Refill pattern with no run of two in either direction.
fn striped(p: Position) -> TileKind {
    [TileKind::Orange, TileKind::Purple, TileKind::Yellow][((p.col + 2 * p.row) % 3) as usize]
}

#[test]
fn test_adjacency_law() {
    let rows = ["RGB", "GBR", "BRG"];
    let all: Vec<Position> = Board::from_rows(&rows).unwrap().positions().collect();

    for &a in &all {
        for &b in &all {
            if a == b {
                continue;
            }
            let mut board = Board::from_rows(&rows).unwrap();
            let mut ctl = SwapController::new(0);
            ctl.select(&mut board, a).unwrap();
            let outcome = ctl.select(&mut board, b).unwrap();

            if a.distance(b) == 1 {
                assert_eq!(outcome, SelectOutcome::Swapped, "{:?} -> {:?}", a, b);
                let mut refill = striped;
                ctl.flush(&mut board, &mut refill).unwrap();
            } else {
                assert_eq!(outcome, SelectOutcome::Rejected, "{:?} -> {:?}", a, b);
                assert_eq!(board.to_rows(), rows.to_vec());
                assert!(board.motions().is_empty());
            }
            assert!(!ctl.is_processing());
            board.check_consistency().unwrap();
        }
    }
}

#[test]
fn test_no_match_swap_restores_board_exactly() {
    let mut board = Board::from_rows(&["RGBY", "GBYR", "BYRG"]).unwrap();
    let before = board.to_rows();
    let ids_before: Vec<_> = board.positions().map(|p| board.occupant(p)).collect();

    let mut ctl = SwapController::new(SETTLE_DELAY_MS);
    ctl.select(&mut board, Position::new(1, 1)).unwrap();
    ctl.select(&mut board, Position::new(1, 2)).unwrap();

    let mut refill = striped;
    let mut turn = None;
    for _ in 0..100 {
        turn = ctl.tick(&mut board, &mut refill, TICK_MS).unwrap();
        if turn.is_some() {
            break;
        }
    }
    let turn = turn.unwrap();
    assert!(!turn.matched);
    assert_eq!(board.to_rows(), before);
    let ids_after: Vec<_> = board.positions().map(|p| board.occupant(p)).collect();
    assert_eq!(ids_after, ids_before);
}

#[test]
fn test_processing_flag_blocks_selection() {
    let mut board = Board::from_rows(&["GRRB", "RGBY"]).unwrap();
    let mut ctl = SwapController::new(100);
    ctl.select(&mut board, Position::new(0, 0)).unwrap();
    ctl.select(&mut board, Position::new(0, 1)).unwrap();
    assert!(ctl.is_processing());

    for pos in board.positions().collect::<Vec<_>>() {
        assert_eq!(ctl.select(&mut board, pos).unwrap(), SelectOutcome::Ignored);
    }
    assert_eq!(ctl.pending(), None);

    let mut refill = striped;
    assert!(ctl.tick(&mut board, &mut refill, 99).unwrap().is_none());
    let turn = ctl.tick(&mut board, &mut refill, 1).unwrap().unwrap();
    assert!(turn.matched);
    assert_eq!(
        ctl.select(&mut board, Position::new(0, 0)).unwrap(),
        SelectOutcome::Pending
    );
}

#[test]
fn test_session_scores_once_per_matched_turn() {
    let config = LevelConfig {
        width: 4,
        height: 2,
        goal: 1000,
        moves: 5,
        settle_delay_ms: 32,
        ..LevelConfig::default()
    };
    let board = Board::from_rows(&["GRRB", "RGBY"]).unwrap();
    let mut session = GameSession::with_board(config, board).unwrap();

    session.select(Position::new(0, 0)).unwrap();
    session.select(Position::new(0, 1)).unwrap();
    assert!(session.snapshot().processing);

    assert!(session.tick(TICK_MS).unwrap().is_none());
    let turn = session.tick(TICK_MS).unwrap().unwrap();
    assert!(turn.matched);

    let snap = session.snapshot();
    assert_eq!(snap.points, turn.report.points());
    assert_eq!(snap.moves_left, 4);
    assert_eq!(snap.outcome, Outcome::InProgress);
    assert!(session.tick(TICK_MS).unwrap().is_none());
    assert_eq!(session.snapshot().moves_left, 4);
}

#[test]
fn test_session_runs_out_of_moves() {
    let config = LevelConfig {
        width: 4,
        height: 2,
        goal: 1000,
        moves: 1,
        settle_delay_ms: 0,
        ..LevelConfig::default()
    };
    let board = Board::from_rows(&["GRRB", "RGBY"]).unwrap();
    let mut session = GameSession::with_board(config, board).unwrap();
    session.select(Position::new(0, 0)).unwrap();
    session.select(Position::new(0, 1)).unwrap();
    session.flush().unwrap();

    let snap = session.snapshot();
    assert_eq!(snap.outcome, Outcome::Defeat);
    assert!(!snap.playable());
    assert_eq!(
        session.select(Position::new(1, 0)).unwrap(),
        SelectOutcome::Ignored
    );
}
