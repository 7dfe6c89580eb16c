//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board logic, swap control, terminal rendering).
//!
//! # Board Geometry
//!
//! The default level is a 6x8 grid:
//!
//! - **Width**: 6 columns (indexed 0-5, left to right)
//! - **Height**: 8 rows (indexed 0-7, row 0 is the floor)
//!
//! Tiles fall toward row 0. "Up" means increasing row index, and new tiles
//! enter from above row `height - 1`.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SETTLE_DELAY_MS` | 200 | Pause between an accepted swap and its resolution |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Direction, Position, TileKind, DEFAULT_BOARD_WIDTH};
//!
//! let kind = TileKind::from_char('g').unwrap();
//! assert_eq!(kind, TileKind::Green);
//!
//! let p = Position::new(2, 3);
//! assert_eq!(p.step(Direction::Up), Position::new(2, 4));
//! assert!(p.is_adjacent(Position::new(3, 3)));
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 6);
//! ```

/// Default board width in cells (6 columns)
pub const DEFAULT_BOARD_WIDTH: u8 = 6;

/// Default board height in cells (8 rows)
pub const DEFAULT_BOARD_HEIGHT: u8 = 8;

/// Largest supported board side.
pub const MAX_BOARD_SIDE: u8 = 64;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Settle delay between an accepted swap and the board scan (200ms)
pub const SETTLE_DELAY_MS: u32 = 200;

/// Minimum run length that counts as a match
pub const MIN_MATCH_LEN: usize = 3;

/// Minimum perpendicular extension that promotes a line into a super match
pub const SUPER_EXTENSION_MIN: usize = 2;

/// Upper bound on rejection-sampling attempts when building a match-free layout
pub const MAX_LAYOUT_ATTEMPTS: u32 = 10_000;

/// Upper bound on remove/refill passes triggered by a single swap
pub const MAX_CASCADE_PASSES: u32 = 256;

/// Points awarded per removed tile
pub const POINTS_PER_TILE: u32 = 1;

/// Default number of tile kinds in play
pub const DEFAULT_KIND_COUNT: usize = 5;

/// Default move budget per level
pub const DEFAULT_MOVES: u32 = 20;

/// Default points needed to win a level
pub const DEFAULT_GOAL: u32 = 60;

/// The tile kinds
///
/// Kinds are compared by equality only; they carry no behavior of their own.
/// Each kind has a single-letter code used by textual layouts:
/// `R`, `O`, `Y`, `G`, `B`, `P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileKind {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl TileKind {
    /// Every kind, in palette order.
    pub const ALL: [TileKind; 6] = [
        TileKind::Red,
        TileKind::Orange,
        TileKind::Yellow,
        TileKind::Green,
        TileKind::Blue,
        TileKind::Purple,
    ];

    /// The first `count` kinds of the palette (clamped to `1..=6`).
    pub fn palette(count: usize) -> &'static [TileKind] {
        let n = count.clamp(1, Self::ALL.len());
        &Self::ALL[..n]
    }

    /// Parse from a layout letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_char('R'), Some(TileKind::Red));
    /// assert_eq!(TileKind::from_char('p'), Some(TileKind::Purple));
    /// assert_eq!(TileKind::from_char('#'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(TileKind::Red),
            'O' => Some(TileKind::Orange),
            'Y' => Some(TileKind::Yellow),
            'G' => Some(TileKind::Green),
            'B' => Some(TileKind::Blue),
            'P' => Some(TileKind::Purple),
            _ => None,
        }
    }

    /// Layout letter (uppercase)
    pub fn as_char(&self) -> char {
        match self {
            TileKind::Red => 'R',
            TileKind::Orange => 'O',
            TileKind::Yellow => 'Y',
            TileKind::Green => 'G',
            TileKind::Blue => 'B',
            TileKind::Purple => 'P',
        }
    }

    /// Parse from a full name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileKind::Red),
            "orange" => Some(TileKind::Orange),
            "yellow" => Some(TileKind::Yellow),
            "green" => Some(TileKind::Green),
            "blue" => Some(TileKind::Blue),
            "purple" => Some(TileKind::Purple),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Red => "red",
            TileKind::Orange => "orange",
            TileKind::Yellow => "yellow",
            TileKind::Green => "green",
            TileKind::Blue => "blue",
            TileKind::Purple => "purple",
        }
    }
}

/// A board coordinate.
///
/// Signed so that stepping past an edge produces an out-of-bounds position
/// instead of wrapping; the board rejects such positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub col: i16,
    pub row: i16,
}

impl Position {
    pub const fn new(col: i16, row: i16) -> Self {
        Self { col, row }
    }

    /// One step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dc, dr) = dir.delta();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// Manhattan distance to `other`.
    pub fn distance(self, other: Position) -> u32 {
        (self.col - other.col).unsigned_abs() as u32 + (self.row - other.row).unsigned_abs() as u32
    }

    /// Grid adjacency: Manhattan distance exactly 1.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }
}

/// The four axis directions.
///
/// `Up` is toward the top of the board (row + 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (column delta, row delta)
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Classification of a match shape.
///
/// - **Horizontal / Vertical**: exactly three in a line
/// - **LongHorizontal / LongVertical**: four or more in a line
/// - **Super**: a line plus a perpendicular extension of two or more tiles
/// - **None**: no qualifying run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Horizontal,
    LongHorizontal,
    Vertical,
    LongVertical,
    Super,
    None,
}

impl MatchKind {
    pub fn is_horizontal(self) -> bool {
        matches!(self, MatchKind::Horizontal | MatchKind::LongHorizontal)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, MatchKind::Vertical | MatchKind::LongVertical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Horizontal => "horizontal",
            MatchKind::LongHorizontal => "long_horizontal",
            MatchKind::Vertical => "vertical",
            MatchKind::LongVertical => "long_vertical",
            MatchKind::Super => "super",
            MatchKind::None => "none",
        }
    }
}

/// Player actions delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the board cursor one cell
    Cursor(Direction),
    /// Select the tile under the cursor
    Select,
    /// Highlight a swap that would match
    Hint,
    /// Rebuild the level
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
    /// assert_eq!(GameAction::from_str("cursorUp"), Some(GameAction::Cursor(Direction::Up)));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::Cursor(Direction::Up)),
            "cursordown" => Some(GameAction::Cursor(Direction::Down)),
            "cursorleft" => Some(GameAction::Cursor(Direction::Left)),
            "cursorright" => Some(GameAction::Cursor(Direction::Right)),
            "select" => Some(GameAction::Select),
            "hint" => Some(GameAction::Hint),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Cursor(Direction::Up) => "cursorUp",
            GameAction::Cursor(Direction::Down) => "cursorDown",
            GameAction::Cursor(Direction::Left) => "cursorLeft",
            GameAction::Cursor(Direction::Right) => "cursorRight",
            GameAction::Select => "select",
            GameAction::Hint => "hint",
            GameAction::Restart => "restart",
        }
    }
}
