//! Score, goal and move bookkeeping.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    Victory,
    Defeat,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::InProgress => "in_progress",
            Outcome::Victory => "victory",
            Outcome::Defeat => "defeat",
        }
    }
}

/// Consumer of turn results: points towards a goal within a move budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    points: u32,
    goal: u32,
    moves_left: u32,
    outcome: Outcome,
}

impl Progress {
    pub fn new(moves: u32, goal: u32) -> Self {
        Self {
            points: 0,
            goal,
            moves_left: moves,
            outcome: Outcome::InProgress,
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Record one completed turn.
    ///
    /// Victory is checked before defeat, so reaching the goal on the last
    /// move wins. Turns after the game has ended are ignored.
    pub fn process_turn(&mut self, points: u32, consume_move: bool) -> Outcome {
        if self.outcome.is_over() {
            return self.outcome;
        }

        self.points = self.points.saturating_add(points);
        if consume_move {
            self.moves_left = self.moves_left.saturating_sub(1);
        }

        if self.points >= self.goal {
            self.outcome = Outcome::Victory;
            log::info!("goal reached with {} points", self.points);
        } else if self.moves_left == 0 {
            self.outcome = Outcome::Defeat;
            log::info!("out of moves at {}/{} points", self.points, self.goal);
        }
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_accumulate() {
        let mut p = Progress::new(5, 10);
        assert_eq!(p.process_turn(3, true), Outcome::InProgress);
        assert_eq!(p.process_turn(4, true), Outcome::InProgress);
        assert_eq!(p.points(), 7);
        assert_eq!(p.moves_left(), 3);
    }

    #[test]
    fn test_victory_on_last_move_beats_defeat() {
        let mut p = Progress::new(1, 3);
        assert_eq!(p.process_turn(3, true), Outcome::Victory);
        assert_eq!(p.moves_left(), 0);
    }

    #[test]
    fn test_defeat_when_moves_run_out() {
        let mut p = Progress::new(2, 100);
        p.process_turn(3, true);
        assert_eq!(p.process_turn(3, true), Outcome::Defeat);
        assert!(p.outcome().is_over());
    }

    #[test]
    fn test_turns_after_end_are_ignored() {
        let mut p = Progress::new(1, 100);
        p.process_turn(0, true);
        assert_eq!(p.process_turn(500, true), Outcome::Defeat);
        assert_eq!(p.points(), 0);
    }

    #[test]
    fn test_free_turn_keeps_moves() {
        let mut p = Progress::new(1, 100);
        p.process_turn(3, false);
        assert_eq!(p.moves_left(), 1);
        assert_eq!(p.outcome(), Outcome::InProgress);
    }
}
