use crate::board::Board;
use crate::types::{Position, TileKind};

/// What a renderer needs to know about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnapshotCell {
    #[default]
    Blocked,
    Empty,
    Tile(TileKind),
}

impl SnapshotCell {
    pub fn kind(&self) -> Option<TileKind> {
        match self {
            SnapshotCell::Tile(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Plain copy of a board's visible state, row-major with row 0 at the floor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    pub cells: Vec<SnapshotCell>,
}

impl BoardSnapshot {
    pub fn get(&self, pos: Position) -> Option<SnapshotCell> {
        if pos.col < 0
            || pos.row < 0
            || pos.col >= self.width as i16
            || pos.row >= self.height as i16
        {
            return None;
        }
        self.cells
            .get(pos.row as usize * self.width as usize + pos.col as usize)
            .copied()
    }

    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
    }

    /// Overwrite in place, reusing the cell buffer.
    pub fn fill_from(&mut self, board: &Board) {
        self.width = board.width();
        self.height = board.height();
        self.cells.clear();
        for row in 0..board.height() as i16 {
            for col in 0..board.width() as i16 {
                let pos = Position::new(col, row);
                let cell = if !board.is_usable(pos) {
                    SnapshotCell::Blocked
                } else {
                    board
                        .kind_at(pos)
                        .map(SnapshotCell::Tile)
                        .unwrap_or(SnapshotCell::Empty)
                };
                self.cells.push(cell);
            }
        }
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        let mut snap = Self::default();
        snap.fill_from(board);
        snap
    }
}
