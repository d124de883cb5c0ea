//! Editor limits and persisted UI preferences.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::PersistenceError;
use crate::grid::DEFAULT_MAX_GRID_SIZE;
use crate::history::DEFAULT_MAX_HISTORY;
use crate::palette::SWATCHES;
use crate::tools::{DEFAULT_MAX_BRUSH_RADIUS, DEFAULT_SHADE_STEP};

/// Limits and defaults for an editor session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct EditorConfig {
    pub max_grid_size: usize,
    pub default_grid_size: usize,
    /// Maximum entries kept on each of the undo and redo stacks
    pub max_history: usize,
    pub max_brush_radius: usize,
    /// Lightness points added or removed per lighten/darken application
    pub shade_step: f64,
    pub background: Color,
    pub primary: Color,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_grid_size: DEFAULT_MAX_GRID_SIZE,
            default_grid_size: 16,
            max_history: DEFAULT_MAX_HISTORY,
            max_brush_radius: DEFAULT_MAX_BRUSH_RADIUS,
            shade_step: DEFAULT_SHADE_STEP,
            background: Color::WHITE,
            primary: Color::BLACK,
        }
    }
}

impl EditorConfig {
    /// Parses a config, rejecting one that cannot hold any grid.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let config: Self = serde_json::from_str(json)?;
        if config.max_grid_size == 0 {
            let err = serde::de::Error::custom("max_grid_size must be at least 1");
            return Err(PersistenceError::Serialization(err));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Clamps a requested grid size into `[1, max_grid_size]`
    pub fn clamp_grid_size(&self, size: usize) -> usize {
        size.clamp(1, self.max_grid_size.max(1))
    }
}

/// UI flags remembered between runs. None of these affect cell state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub cell_outline: bool,
    pub mouse_trail: bool,
    pub grid_size: usize,
    pub dark_mode: bool,
    pub swatch_index: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            cell_outline: false,
            mouse_trail: false,
            grid_size: EditorConfig::default().default_grid_size,
            dark_mode: false,
            swatch_index: 0,
        }
    }
}

impl Preferences {
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Brings stored values back into range for `config`.
    pub fn sanitized(mut self, config: &EditorConfig) -> Self {
        let grid_size = config.clamp_grid_size(self.grid_size);
        if grid_size != self.grid_size {
            warn!("Stored grid size {} out of range, using {}", self.grid_size, grid_size);
            self.grid_size = grid_size;
        }
        self.swatch_index %= SWATCHES.len();
        self
    }
}
