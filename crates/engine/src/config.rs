//! Level configuration.
//!
//! Levels are JSON documents; every field is optional and falls back to the
//! default level. Environment variables override individual fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tui_match3_core::{LayoutMask, BLOCKED_CHAR, EMPTY_CHAR};
use tui_match3_types::{
    TileKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_GOAL, DEFAULT_KIND_COUNT,
    DEFAULT_MOVES, MAX_BOARD_SIDE, SETTLE_DELAY_MS,
};

/// Smallest palette that can still be match-free.
pub const MIN_KIND_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub width: u8,
    pub height: u8,
    /// Mask rows, top first. `#` blocked, `.` open. Empty means fully open.
    pub blocked: Vec<String>,
    pub kind_count: usize,
    pub moves: u32,
    pub goal: u32,
    pub seed: u32,
    pub settle_delay_ms: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            blocked: Vec::new(),
            kind_count: DEFAULT_KIND_COUNT,
            moves: DEFAULT_MOVES,
            goal: DEFAULT_GOAL,
            seed: 1,
            settle_delay_ms: SETTLE_DELAY_MS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board size {width}x{height} must be between 1 and {max} per side")]
    InvalidSize { width: u8, height: u8, max: u8 },
    #[error("mask has {rows} rows, expected {expected}")]
    MaskHeight { rows: usize, expected: u8 },
    #[error("mask row {row} has {len} cells, expected {expected}")]
    MaskWidth { row: usize, len: usize, expected: u8 },
    #[error("mask row {row} has unknown character {ch:?}")]
    MaskChar { row: usize, ch: char },
    #[error("mask leaves no usable cell")]
    NoUsableCells,
    #[error("kind_count must be in {min}..={max} (got {value})")]
    KindCount { value: usize, min: usize, max: usize },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

impl LevelConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Compact JSON of the effective level, accepted by [`LevelConfig::from_json_str`].
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded level from {}", path.display());
        Ok(config)
    }

    /// Build from environment variables.
    ///
    /// `MATCH3_LEVEL` names a JSON level file (defaults are used otherwise);
    /// `MATCH3_SEED` and `MATCH3_SETTLE_MS` override single fields.
    /// Unparseable numbers are ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        use std::env;

        let mut config = match env::var("MATCH3_LEVEL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(seed) = env::var("MATCH3_SEED").ok().and_then(|s| s.trim().parse().ok()) {
            config.seed = seed;
        }
        if let Some(ms) = env::var("MATCH3_SETTLE_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            config.settle_delay_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0
            || self.height == 0
            || self.width > MAX_BOARD_SIDE
            || self.height > MAX_BOARD_SIDE
        {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_SIDE,
            });
        }

        let max = TileKind::ALL.len();
        if self.kind_count < MIN_KIND_COUNT || self.kind_count > max {
            return Err(ConfigError::KindCount {
                value: self.kind_count,
                min: MIN_KIND_COUNT,
                max,
            });
        }
        if self.moves == 0 {
            return Err(ConfigError::Zero { field: "moves" });
        }
        if self.goal == 0 {
            return Err(ConfigError::Zero { field: "goal" });
        }

        if self.blocked.is_empty() {
            return Ok(());
        }
        if self.blocked.len() != self.height as usize {
            return Err(ConfigError::MaskHeight {
                rows: self.blocked.len(),
                expected: self.height,
            });
        }
        let mut usable = 0usize;
        for (row, text) in self.blocked.iter().enumerate() {
            let len = text.chars().count();
            if len != self.width as usize {
                return Err(ConfigError::MaskWidth {
                    row,
                    len,
                    expected: self.width,
                });
            }
            for ch in text.chars() {
                match ch {
                    BLOCKED_CHAR => {}
                    EMPTY_CHAR => usable += 1,
                    other => return Err(ConfigError::MaskChar { row, ch: other }),
                }
            }
        }
        if usable == 0 {
            return Err(ConfigError::NoUsableCells);
        }
        Ok(())
    }

    /// Palette the level draws from.
    pub fn kinds(&self) -> &'static [TileKind] {
        TileKind::palette(self.kind_count.clamp(MIN_KIND_COUNT, TileKind::ALL.len()))
    }

    /// The layout mask described by `width`, `height` and `blocked`.
    pub fn mask(&self) -> Result<LayoutMask, ConfigError> {
        self.validate()?;
        let mask = if self.blocked.is_empty() {
            LayoutMask::open(self.width, self.height)
        } else {
            LayoutMask::from_rows(self.blocked.as_slice())
        };
        // Dimensions were validated above.
        mask.map_err(|_| ConfigError::InvalidSize {
            width: self.width,
            height: self.height,
            max: MAX_BOARD_SIDE,
        })
    }
}
