//! Game flow on top of the core board rules.
//!
//! - [`controller`]: selection state machine with a tick-driven settle delay
//! - [`progress`]: points, goal and remaining moves
//! - [`hint`]: search for a productive swap
//! - [`config`]: level description, JSON and environment loading
//! - [`session`]: one playable level wiring the pieces together

pub mod config;
pub mod controller;
pub mod hint;
pub mod progress;
pub mod session;

pub use config::{ConfigError, LevelConfig};
pub use controller::{SelectOutcome, SwapController, TurnResult};
pub use hint::{find_swap, is_deadlocked};
pub use progress::{Outcome, Progress};
pub use session::{GameSession, SessionError, SessionSnapshot};
