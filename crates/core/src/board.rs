//! Board module - manages the game grid
//!
//! The board is a width x height grid of cells. Each cell is either usable or
//! permanently blocked, and a usable cell holds at most one tile by id.
//! Coordinates: (col, row) where col ranges 0..width (left to right) and row
//! ranges 0..height (floor to top).
//!
//! Storage is a flat row-major array (`row * width + col`). Tiles live in a
//! [`TileArena`] next to the cells; every mutation that moves a tile updates
//! the owning cell and the tile's stored position together.

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::BoardError;
use crate::layout::{LayoutMask, BLOCKED_CHAR};
use crate::rng::TileFactory;
use crate::scan;
use crate::tile::{Tile, TileArena, TileId};
use crate::types::{Direction, Position, TileKind, MAX_LAYOUT_ATTEMPTS};

/// Character marking a usable cell with no tile in textual layouts.
pub const EMPTY_CHAR: char = '.';

/// A fixed board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    usable: bool,
    occupant: Option<TileId>,
}

impl Cell {
    pub fn is_usable(&self) -> bool {
        self.usable
    }

    pub fn occupant(&self) -> Option<TileId> {
        self.occupant
    }
}

/// Side effect for the renderer: where a tile should animate to.
///
/// The engine pushes these and never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Two tiles exchanged cells.
    Swapped {
        a: TileId,
        a_to: Position,
        b: TileId,
        b_to: Position,
    },
    /// A tile fell into a gap below it.
    Fell {
        tile: TileId,
        from: Position,
        to: Position,
    },
    /// A new tile entered from above the top edge.
    Spawned {
        tile: TileId,
        kind: TileKind,
        from: Position,
        to: Position,
    },
    /// A matched tile was destroyed.
    Removed { tile: TileId, at: Position },
}

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
    tiles: TileArena,
    motions: Vec<Motion>,
}

impl Board {
    /// Create a board with the mask's geometry and no tiles.
    pub fn empty(mask: &LayoutMask) -> Self {
        let (w, h) = (mask.width(), mask.height());
        let mut cells = Vec::with_capacity(w as usize * h as usize);
        for row in 0..h as i16 {
            for col in 0..w as i16 {
                cells.push(Cell {
                    usable: !mask.is_blocked(Position::new(col, row)),
                    occupant: None,
                });
            }
        }
        Self {
            width: w,
            height: h,
            cells,
            tiles: TileArena::with_capacity(w as usize * h as usize),
            motions: Vec::new(),
        }
    }

    /// Build a match-free board from a mask, drawing kinds from `factory`.
    ///
    /// Boards that start with a match are discarded and rebuilt, at most
    /// [`MAX_LAYOUT_ATTEMPTS`] times.
    pub fn generate(mask: &LayoutMask, factory: &mut dyn TileFactory) -> Result<Self, BoardError> {
        Self::generate_with_limit(mask, factory, MAX_LAYOUT_ATTEMPTS)
    }

    /// [`Board::generate`] with an explicit attempt budget.
    pub fn generate_with_limit(
        mask: &LayoutMask,
        factory: &mut dyn TileFactory,
        max_attempts: u32,
    ) -> Result<Self, BoardError> {
        Self::generate_accepting(mask, factory, max_attempts, &mut |_| true)
    }

    /// Rejection sampling with an extra condition: a candidate must be
    /// match-free and satisfy `accept`. Both count against `max_attempts`.
    pub fn generate_accepting(
        mask: &LayoutMask,
        factory: &mut dyn TileFactory,
        max_attempts: u32,
        accept: &mut dyn FnMut(&Board) -> bool,
    ) -> Result<Self, BoardError> {
        for attempt in 1..=max_attempts {
            let mut board = Self::empty(mask);
            board.populate(factory);
            if scan::has_match(&mut board) {
                log::debug!("initial layout has matches, rebuilding (attempt {})", attempt);
                continue;
            }
            if !accept(&board) {
                log::debug!("initial layout rejected, rebuilding (attempt {})", attempt);
                continue;
            }
            if attempt > 1 {
                log::info!("layout found after {} attempts", attempt);
            }
            return Ok(board);
        }
        log::error!("gave up building a match-free layout after {} attempts", max_attempts);
        Err(BoardError::LayoutExhausted {
            attempts: max_attempts,
        })
    }

    /// Fill every usable cell with a fresh tile.
    fn populate(&mut self, factory: &mut dyn TileFactory) {
        for row in 0..self.height as i16 {
            for col in 0..self.width as i16 {
                let pos = Position::new(col, row);
                let idx = self.flat(pos);
                if !self.cells[idx].usable {
                    continue;
                }
                let kind = factory.make(pos);
                let id = self.tiles.insert(kind, pos);
                self.cells[idx].occupant = Some(id);
            }
        }
    }

    /// Build an exact board from rows written top first.
    ///
    /// `#` is blocked, `.` is a usable empty cell, a tile letter places a tile.
    /// No match-free check is performed.
    ///
    /// ```
    /// use tui_match3_core::Board;
    /// use tui_match3_types::{Position, TileKind};
    ///
    /// let board = Board::from_rows(&["RG#", "BYR"]).unwrap();
    /// assert_eq!(board.kind_at(Position::new(0, 1)), Some(TileKind::Red));
    /// assert_eq!(board.kind_at(Position::new(0, 0)), Some(TileKind::Blue));
    /// assert!(!board.is_usable(Position::new(2, 1)));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let mask = LayoutMask::from_rows(rows)?;
        let mut board = Self::empty(&mask);
        let height = rows.len();
        for (line, text) in rows.iter().enumerate() {
            let row = (height - 1 - line) as i16;
            for (col, ch) in text.as_ref().chars().enumerate() {
                if ch == BLOCKED_CHAR || ch == EMPTY_CHAR {
                    continue;
                }
                let kind = TileKind::from_char(ch).ok_or_else(|| {
                    BoardError::InvalidLayout(format!("unknown cell character {:?}", ch))
                })?;
                let pos = Position::new(col as i16, row);
                let id = board.tiles.insert(kind, pos);
                let idx = board.flat(pos);
                board.cells[idx].occupant = Some(id);
            }
        }
        Ok(board)
    }

    /// Rows top first, in the [`Board::from_rows`] notation.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as i16)
            .rev()
            .map(|row| {
                (0..self.width as i16)
                    .map(|col| {
                        let cell = self.cells[self.flat(Position::new(col, row))];
                        if !cell.usable {
                            BLOCKED_CHAR
                        } else {
                            cell.occupant
                                .and_then(|id| self.tiles.get(id))
                                .map(|t| t.kind.as_char())
                                .unwrap_or(EMPTY_CHAR)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    #[inline(always)]
    fn flat(&self, pos: Position) -> usize {
        pos.row as usize * self.width as usize + pos.col as usize
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(self.flat(pos))
        } else {
            None
        }
    }

    fn checked_index(&self, pos: Position) -> Result<usize, BoardError> {
        self.index(pos).ok_or(BoardError::OutOfBounds {
            col: pos.col,
            row: pos.row,
            width: self.width,
            height: self.height,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.col >= 0 && pos.row >= 0 && pos.col < self.width as i16 && pos.row < self.height as i16
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell, BoardError> {
        let idx = self.checked_index(pos)?;
        Ok(&self.cells[idx])
    }

    /// In bounds and not permanently blocked.
    pub fn is_usable(&self, pos: Position) -> bool {
        self.index(pos).map(|i| self.cells[i].usable).unwrap_or(false)
    }

    /// Live occupant of a cell; `None` when empty, blocked or out of bounds.
    pub fn occupant(&self, pos: Position) -> Option<TileId> {
        let id = self.cells[self.index(pos)?].occupant?;
        self.tiles.contains(id).then_some(id)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id)
    }

    /// Tile at `pos`, erroring on invalid coordinates.
    pub fn tile_at(&self, pos: Position) -> Result<Option<&Tile>, BoardError> {
        let idx = self.checked_index(pos)?;
        Ok(self.cells[idx].occupant.and_then(|id| self.tiles.get(id)))
    }

    pub fn kind_at(&self, pos: Position) -> Option<TileKind> {
        self.occupant(pos)
            .and_then(|id| self.tiles.get(id))
            .map(|t| t.kind)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Every position in scan order: column-major, floor first.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width as i16, self.height as i16);
        (0..w).flat_map(move |col| (0..h).map(move |row| Position::new(col, row)))
    }

    /// Usable in-bounds neighbors of `pos`.
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        Direction::ALL
            .iter()
            .map(|&d| pos.step(d))
            .filter(|&p| self.is_usable(p))
            .collect()
    }

    /// Every usable cell holds a tile.
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|c| !c.usable || c.occupant.is_some())
    }

    /// Occupied cells in a column.
    pub fn column_occupancy(&self, col: i16) -> usize {
        (0..self.height as i16)
            .filter(|&row| self.occupant(Position::new(col, row)).is_some())
            .count()
    }

    /// Usable cells in a column.
    pub fn column_capacity(&self, col: i16) -> usize {
        (0..self.height as i16)
            .filter(|&row| self.is_usable(Position::new(col, row)))
            .count()
    }

    /// Lowest usable empty row in a column, if any.
    pub fn lowest_empty_row(&self, col: i16) -> Option<i16> {
        (0..self.height as i16).find(|&row| {
            let pos = Position::new(col, row);
            self.is_usable(pos) && self.occupant(pos).is_none()
        })
    }

    /// Exchange the tiles at `a` and `b`.
    ///
    /// Cells and stored tile positions are updated together. Adjacency is the
    /// caller's concern; both cells must hold tiles.
    pub fn swap_tiles(&mut self, a: Position, b: Position) -> Result<(), BoardError> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        let (Some(ta), Some(tb)) = (self.occupant(a), self.occupant(b)) else {
            return Err(BoardError::inconsistent(format!(
                "swap between ({}, {}) and ({}, {}) needs two tiles",
                a.col, a.row, b.col, b.row
            )));
        };

        self.cells[ia].occupant = Some(tb);
        self.cells[ib].occupant = Some(ta);
        if let Some(t) = self.tiles.get_mut(ta) {
            t.pos = b;
        }
        if let Some(t) = self.tiles.get_mut(tb) {
            t.pos = a;
        }
        self.motions.push(Motion::Swapped {
            a: ta,
            a_to: b,
            b: tb,
            b_to: a,
        });
        Ok(())
    }

    /// Destroy the tile at `pos`, leaving the cell usable and empty.
    pub(crate) fn remove_tile(&mut self, pos: Position) -> Result<Option<Tile>, BoardError> {
        let idx = self.checked_index(pos)?;
        let Some(id) = self.cells[idx].occupant.take() else {
            return Ok(None);
        };
        let tile = self.tiles.remove(id);
        if let Some(t) = tile {
            self.motions.push(Motion::Removed { tile: t.id, at: pos });
        }
        Ok(tile)
    }

    /// Move the tile at `from` into the empty usable cell `to`.
    pub(crate) fn move_tile(&mut self, from: Position, to: Position) -> Result<TileId, BoardError> {
        let src = self.checked_index(from)?;
        let dst = self.checked_index(to)?;
        if !self.cells[dst].usable || self.cells[dst].occupant.is_some() {
            return Err(BoardError::inconsistent(format!(
                "cannot move into ({}, {}): cell is blocked or occupied",
                to.col, to.row
            )));
        }
        let Some(id) = self.cells[src].occupant.take() else {
            return Err(BoardError::inconsistent(format!(
                "no tile to move at ({}, {})",
                from.col, from.row
            )));
        };
        self.cells[dst].occupant = Some(id);
        if let Some(t) = self.tiles.get_mut(id) {
            t.pos = to;
        }
        self.motions.push(Motion::Fell { tile: id, from, to });
        Ok(id)
    }

    /// Create a tile in the empty usable cell `to`, animating in from `from`.
    pub(crate) fn spawn_tile(
        &mut self,
        to: Position,
        kind: TileKind,
        from: Position,
    ) -> Result<TileId, BoardError> {
        let idx = self.checked_index(to)?;
        if !self.cells[idx].usable || self.cells[idx].occupant.is_some() {
            return Err(BoardError::inconsistent(format!(
                "cannot spawn into ({}, {}): cell is blocked or occupied",
                to.col, to.row
            )));
        }
        let id = self.tiles.insert(kind, to);
        self.cells[idx].occupant = Some(id);
        self.motions.push(Motion::Spawned {
            tile: id,
            kind,
            from,
            to,
        });
        Ok(id)
    }

    /// Reset every tile's `matched` flag.
    pub fn clear_matched(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.matched = false;
        }
    }

    /// Pending renderer side effects, oldest first.
    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    /// Take all pending renderer side effects.
    pub fn drain_motions(&mut self) -> Vec<Motion> {
        std::mem::take(&mut self.motions)
    }

    /// Verify every cell/tile invariant.
    ///
    /// - blocked cells have no occupant
    /// - every occupant id is live and its tile's position equals the cell
    /// - no live tile is left without a cell
    pub fn check_consistency(&self) -> Result<(), BoardError> {
        let mut occupied = 0usize;
        for pos in self.positions() {
            let cell = self.cells[self.flat(pos)];
            let Some(id) = cell.occupant else {
                continue;
            };
            if !cell.usable {
                return Err(BoardError::Inconsistent(format!(
                    "blocked cell ({}, {}) holds a tile",
                    pos.col, pos.row
                )));
            }
            let Some(tile) = self.tiles.get(id) else {
                return Err(BoardError::Inconsistent(format!(
                    "cell ({}, {}) refers to a destroyed tile",
                    pos.col, pos.row
                )));
            };
            if tile.pos != pos {
                return Err(BoardError::Inconsistent(format!(
                    "tile at ({}, {}) believes it is at ({}, {})",
                    pos.col, pos.row, tile.pos.col, tile.pos.row
                )));
            }
            occupied += 1;
        }
        if occupied != self.tiles.len() {
            return Err(BoardError::Inconsistent(format!(
                "{} live tiles but {} occupied cells",
                self.tiles.len(),
                occupied
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
