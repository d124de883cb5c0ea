//! The editor session: one grid, its history, and the tool state that drives
//! edits to it.
//!
//! The session is a synchronous state machine. Every entry point returns the
//! list of [`Effect`]s the presentation layer must apply; the session itself
//! never renders anything.

use std::collections::HashMap;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::color::Color;
use crate::error::{GridError, GridResult};
use crate::grid::{Coord, Grid, Snapshot};
use crate::history::History;
use crate::input::{ButtonAction, InputEvent, KeyCommand, Phase, PointerId};
use crate::settings::EditorConfig;
use crate::tools::{self, BrushRadius, Paint, ToolKind, ToolOutcome};

/// A change the presentation layer must mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// One cell now shows `color`
    SetCellDisplay { coord: Coord, color: Color },
    /// The grid was rebuilt or cleared: every cell shows `background`
    GridReset { size: usize, background: Color },
    PrimaryColorChanged(Color),
    ToolChanged(ToolKind),
    /// Step counts for the undo/redo display
    HistoryChanged { undo_steps: usize, redo_steps: usize },
}

/// Per-pointer state for an in-progress gesture
#[derive(Debug, Clone, Copy, Default)]
struct Gesture {
    last_cell: Option<Coord>,
}

pub struct EditorSession {
    config: EditorConfig,
    grid: Grid,
    history: History,
    tool: ToolKind,
    primary: Color,
    radius: BrushRadius,
    gestures: HashMap<PointerId, Gesture>,
    rng: StdRng,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("size", &self.grid.size())
            .field("tool", &self.tool)
            .field("primary", &self.primary)
            .field("radius", &self.radius)
            .field("undo_steps", &self.history.undo_steps())
            .field("redo_steps", &self.history.redo_steps())
            .field("active_gestures", &self.gestures.len())
            .finish()
    }
}

impl EditorSession {
    /// Creates a session with a grid of `config.default_grid_size`.
    pub fn new(config: EditorConfig) -> GridResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a session whose rainbow colors come from a fixed seed
    pub fn with_seed(config: EditorConfig, seed: u64) -> GridResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EditorConfig, rng: StdRng) -> GridResult<Self> {
        let grid =
            Grid::with_limit(config.default_grid_size, config.background, config.max_grid_size)?;
        Ok(Self {
            history: History::new(config.max_history),
            tool: ToolKind::default(),
            primary: config.primary,
            radius: BrushRadius::SINGLE_CELL,
            gestures: HashMap::new(),
            grid,
            config,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn primary_color(&self) -> Color {
        self.primary
    }

    pub fn brush_radius(&self) -> BrushRadius {
        self.radius
    }

    pub fn undo_steps(&self) -> usize {
        self.history.undo_steps()
    }

    pub fn redo_steps(&self) -> usize {
        self.history.redo_steps()
    }

    /// Whether any pointer is currently held down on the grid
    pub fn is_drawing(&self) -> bool {
        !self.gestures.is_empty()
    }

    fn paint(&self) -> Paint {
        Paint {
            primary: self.primary,
            background: self.config.background,
            radius: self.radius,
            shade_step: self.config.shade_step,
        }
    }

    /// Processes one normalized pointer event.
    ///
    /// `Begin` records one undo point and applies the tool; `Move` applies
    /// the tool again unless the pointer is still on the same cell; `End`
    /// closes the gesture. Moves for pointers without an open gesture are
    /// ignored.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event.phase {
            Phase::Begin => {
                let Some(coord) = event.coord else {
                    return effects;
                };
                debug!("Gesture begin: pointer {} at {:?}", event.pointer, coord);

                self.history.save_state(&self.grid);
                effects.push(self.history_effect());

                self.gestures.insert(event.pointer, Gesture { last_cell: Some(coord) });
                if let Some(action) = event.action() {
                    self.apply_action(action, coord, &mut effects);
                }
            }
            Phase::Move => {
                let Some(gesture) = self.gestures.get_mut(&event.pointer) else {
                    return effects;
                };
                let Some(coord) = event.coord else {
                    return effects;
                };
                if gesture.last_cell == Some(coord) {
                    return effects;
                }
                gesture.last_cell = Some(coord);

                if let Some(action) = event.action() {
                    self.apply_action(action, coord, &mut effects);
                }
            }
            Phase::End => {
                if self.gestures.remove(&event.pointer).is_some() {
                    debug!("Gesture end: pointer {}", event.pointer);
                }
            }
        }

        effects
    }

    fn apply_action(&mut self, action: ButtonAction, coord: Coord, effects: &mut Vec<Effect>) {
        let tool = action.resolve(self.tool);
        let paint = self.paint();

        let outcome = match tools::apply(tool, coord, &paint, &self.grid, &mut self.rng) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("{} ignored: {}", tool.name(), err);
                return;
            }
        };

        match outcome {
            ToolOutcome::Writes(writes) => {
                if let Err(err) = tools::commit(&mut self.grid, &writes) {
                    // Writes come from in-bounds coordinates only
                    warn!("Failed to commit {} writes: {}", tool.name(), err);
                    return;
                }
                effects.extend(
                    writes
                        .into_iter()
                        .map(|w| Effect::SetCellDisplay { coord: w.coord, color: w.color }),
                );
            }
            ToolOutcome::Pick { color, switch_to } => {
                debug!("Picked {} at {:?}", color, coord);
                effects.extend(self.set_primary_color(color));
                effects.extend(self.select_tool(switch_to));
            }
        }
    }

    /// Makes `tool` the active tool. Has no effect on the grid.
    pub fn select_tool(&mut self, tool: ToolKind) -> Vec<Effect> {
        if self.tool == tool {
            return Vec::new();
        }
        info!("Tool changed: {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        vec![Effect::ToolChanged(tool)]
    }

    pub fn set_primary_color(&mut self, color: Color) -> Vec<Effect> {
        if self.primary == color {
            return Vec::new();
        }
        self.primary = color;
        vec![Effect::PrimaryColorChanged(color)]
    }

    /// Parses `input` as a color and makes it the primary color.
    pub fn set_primary_hex(&mut self, input: &str) -> GridResult<Vec<Effect>> {
        let color = Color::parse_css(input).inspect_err(|err| warn!("{}", err))?;
        Ok(self.set_primary_color(color))
    }

    /// Sets the brush radius, clamped to the configured maximum.
    pub fn set_brush_radius(&mut self, radius: usize) -> BrushRadius {
        self.radius = BrushRadius::clamped(radius, self.config.max_brush_radius);
        if self.radius.get() != radius {
            warn!("Brush radius {} clamped to {}", radius, self.radius.get());
        }
        self.radius
    }

    /// Restores the most recent undo point. A no-op when there is none.
    pub fn undo(&mut self) -> Vec<Effect> {
        let before = self.grid.snapshot();
        match self.history.undo(&mut self.grid) {
            Ok(true) => self.restored_effects(&before),
            Ok(false) => Vec::new(),
            Err(err) => {
                warn!("Undo failed: {}", err);
                Vec::new()
            }
        }
    }

    /// Re-applies the most recently undone state. A no-op when there is none.
    pub fn redo(&mut self) -> Vec<Effect> {
        let before = self.grid.snapshot();
        match self.history.redo(&mut self.grid) {
            Ok(true) => self.restored_effects(&before),
            Ok(false) => Vec::new(),
            Err(err) => {
                warn!("Redo failed: {}", err);
                Vec::new()
            }
        }
    }

    fn restored_effects(&self, before: &Snapshot) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self
            .grid
            .cells()
            .filter(|(coord, color)| before.get(*coord) != Some(*color))
            .map(|(coord, color)| Effect::SetCellDisplay { coord, color })
            .collect();
        effects.push(self.history_effect());
        effects
    }

    /// Fills the grid with the background color and drops all history.
    pub fn clear_grid(&mut self) -> Vec<Effect> {
        info!("Clearing {}x{} grid", self.grid.size(), self.grid.size());
        self.history.clear();
        self.gestures.clear();
        self.grid.fill(self.config.background);
        vec![
            Effect::GridReset { size: self.grid.size(), background: self.config.background },
            self.history_effect(),
        ]
    }

    /// Replaces the grid with a blank `new_size x new_size` one and drops all
    /// history. Fails with `InvalidSize`, leaving everything untouched.
    pub fn resize_grid(&mut self, new_size: usize) -> GridResult<Vec<Effect>> {
        self.grid
            .resize(new_size, self.config.background)
            .inspect_err(|err| warn!("Resize rejected: {}", err))?;
        info!("Grid resized to {}x{}", new_size, new_size);

        self.history.clear();
        self.gestures.clear();
        Ok(vec![
            Effect::GridReset { size: new_size, background: self.config.background },
            self.history_effect(),
        ])
    }

    pub fn execute_key(&mut self, command: KeyCommand) -> Vec<Effect> {
        match command {
            KeyCommand::SelectTool(tool) => self.select_tool(tool),
            KeyCommand::Undo => self.undo(),
            KeyCommand::Redo => self.redo(),
        }
    }

    /// Color of one cell
    pub fn cell(&self, coord: Coord) -> Result<Color, GridError> {
        self.grid.get(coord)
    }

    fn history_effect(&self) -> Effect {
        Effect::HistoryChanged {
            undo_steps: self.history.undo_steps(),
            redo_steps: self.history.redo_steps(),
        }
    }
}
