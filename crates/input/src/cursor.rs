//! Board cursor.

use crate::types::{Direction, Position};

/// Keyboard cursor over a `width` x `height` board, clamped to its edges.
///
/// Blocked cells are not skipped; selecting one is simply ignored by the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
    width: u8,
    height: u8,
}

impl Cursor {
    /// Start at the bottom-left cell.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            pos: Position::new(0, 0),
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Move one cell; returns false when already at that edge.
    pub fn step(&mut self, dir: Direction) -> bool {
        let next = self.pos.step(dir);
        if next.col < 0
            || next.row < 0
            || next.col >= self.width as i16
            || next.row >= self.height as i16
        {
            return false;
        }
        self.pos = next;
        true
    }

    pub fn set(&mut self, pos: Position) {
        self.pos = Position::new(
            pos.col.clamp(0, self.width as i16 - 1),
            pos.row.clamp(0, self.height as i16 - 1),
        );
    }

    /// Adopt new board dimensions, keeping the cursor inside.
    pub fn resize(&mut self, width: u8, height: u8) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.set(self.pos);
    }
}
