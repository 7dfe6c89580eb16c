//! TUI Match-3 (workspace facade crate).
//!
//! Re-exports the member crates as `tui_match3::{types, core, engine, input, term}`
//! so the binary and the integration tests depend on a single package.

pub mod logging;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
