//! Core match-3 logic - pure, deterministic, and testable
//!
//! This crate owns the board model and every rule that changes it. It has
//! **no dependencies** on terminal, timing, or I/O:
//!
//! - **Deterministic**: the same seed and the same selections replay exactly
//! - **Headless**: tests drive boards built from text rows
//! - **Renderer-agnostic**: visual side effects are queued as [`Motion`]s
//!
//! # Module Structure
//!
//! - [`layout`]: blocked/usable cell masks
//! - [`tile`]: generational tile arena
//! - [`board`]: grid of cells, tile placement, motion queue
//! - [`detect`]: straight run detection through an origin tile
//! - [`classify`]: promotion of crossing runs to super matches
//! - [`scan`]: board sweep and the chain-reaction loop
//! - [`cascade`]: removal, gravity compaction and refill
//! - [`rng`]: seeded tile factories
//! - [`snapshot`]: render-friendly copies of a board
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{resolve, Board};
//! use tui_match3_types::{Position, TileKind};
//!
//! let mut board = Board::from_rows(&["GBY", "RRR"]).unwrap();
//! let mut refill = |p: Position| if p.col == 1 { TileKind::Purple } else { TileKind::Orange };
//!
//! let report = resolve(&mut board, &mut refill).unwrap();
//! assert_eq!(report.removed, 3);
//! assert_eq!(board.to_rows(), vec!["OPO", "GBY"]);
//! ```

pub mod board;
pub mod cascade;
pub mod classify;
pub mod detect;
pub mod error;
pub mod layout;
pub mod rng;
pub mod scan;
pub mod snapshot;
pub mod tile;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Motion, EMPTY_CHAR};
pub use cascade::{remove_and_refill, RefillStats};
pub use classify::promote;
pub use detect::{connected, is_connected, MatchShape};
pub use error::BoardError;
pub use layout::{LayoutMask, BLOCKED_CHAR};
pub use rng::{SimpleRng, TileBag, TileFactory};
pub use scan::{find_matches, has_match, resolve, resolve_with_limit, scan, CascadeReport};
pub use snapshot::{BoardSnapshot, SnapshotCell};
pub use tile::{Tile, TileArena, TileId};
