//! Layout mask - which cells are permanently blocked.
//!
//! Read once at board construction. Storage is row-major with row 0 at the
//! floor; textual layouts are written top row first.

use crate::error::BoardError;
use crate::types::{Position, MAX_BOARD_SIDE};

/// Character marking a blocked cell in textual layouts.
pub const BLOCKED_CHAR: char = '#';

/// A width x height grid of blocked flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMask {
    width: u8,
    height: u8,
    blocked: Vec<bool>,
}

impl LayoutMask {
    /// Build a mask from row-major flags (`blocked[row * width + col]`, row 0 at the floor).
    pub fn new(width: u8, height: u8, blocked: Vec<bool>) -> Result<Self, BoardError> {
        check_dims(width, height)?;
        let expected = width as usize * height as usize;
        if blocked.len() != expected {
            return Err(BoardError::InvalidLayout(format!(
                "expected {} cells for a {}x{} mask, got {}",
                expected,
                width,
                height,
                blocked.len()
            )));
        }
        Ok(Self {
            width,
            height,
            blocked,
        })
    }

    /// A mask with no blocked cells.
    pub fn open(width: u8, height: u8) -> Result<Self, BoardError> {
        check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            blocked: vec![false; width as usize * height as usize],
        })
    }

    /// Parse rows written top first. `#` is blocked, anything else is usable.
    ///
    /// ```
    /// use tui_match3_core::LayoutMask;
    /// use tui_match3_types::Position;
    ///
    /// let mask = LayoutMask::from_rows(&["#..", "...", "..#"]).unwrap();
    /// assert!(mask.is_blocked(Position::new(0, 2)));
    /// assert!(mask.is_blocked(Position::new(2, 0)));
    /// assert!(!mask.is_blocked(Position::new(1, 1)));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height > MAX_BOARD_SIDE as usize || width > MAX_BOARD_SIDE as usize {
            return Err(BoardError::InvalidLayout(format!(
                "{}x{} exceeds the maximum side of {}",
                width, height, MAX_BOARD_SIDE
            )));
        }
        check_dims(width as u8, height as u8)?;

        let mut blocked = vec![false; width * height];
        for (line, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            if text.chars().count() != width {
                return Err(BoardError::InvalidLayout(format!(
                    "row {} has {} cells, expected {}",
                    line,
                    text.chars().count(),
                    width
                )));
            }
            let row = height - 1 - line;
            for (col, ch) in text.chars().enumerate() {
                blocked[row * width + col] = ch == BLOCKED_CHAR;
            }
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            blocked,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Out-of-bounds positions report as blocked.
    pub fn is_blocked(&self, pos: Position) -> bool {
        if pos.col < 0
            || pos.row < 0
            || pos.col >= self.width as i16
            || pos.row >= self.height as i16
        {
            return true;
        }
        self.blocked[pos.row as usize * self.width as usize + pos.col as usize]
    }

    /// Number of usable cells.
    pub fn usable_count(&self) -> usize {
        self.blocked.iter().filter(|b| !**b).count()
    }
}

fn check_dims(width: u8, height: u8) -> Result<(), BoardError> {
    if width == 0 || height == 0 {
        return Err(BoardError::InvalidLayout(format!(
            "board must be at least 1x1 (got {}x{})",
            width, height
        )));
    }
    if width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
        return Err(BoardError::InvalidLayout(format!(
            "{}x{} exceeds the maximum side of {}",
            width, height, MAX_BOARD_SIDE
        )));
    }
    Ok(())
}
