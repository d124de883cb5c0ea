//! Drawing tools and the engine that turns one tool application into cell
//! writes.
//!
//! [`apply`] is a pure function of the tool, the grid it reads from and the
//! paint settings: it never mutates the grid. The caller commits the returned
//! writes in order.

mod brush;

pub use brush::{footprint, BrushRadius, DEFAULT_MAX_BRUSH_RADIUS};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{random_color, Color};
use crate::error::GridResult;
use crate::grid::{Coord, Grid};

/// Lightness step, in percentage points, used by lighten and darken
pub const DEFAULT_SHADE_STEP: f64 = 5.0;

/// The mutually exclusive drawing modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
    Picker,
    Rainbow,
    Lighten,
    Darken,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Picker,
        ToolKind::Rainbow,
        ToolKind::Lighten,
        ToolKind::Darken,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Eraser => "Eraser",
            Self::Picker => "Picker",
            Self::Rainbow => "Rainbow",
            Self::Lighten => "Lighten",
            Self::Darken => "Darken",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Pencil => "✏",
            Self::Eraser => "⌫",
            Self::Picker => "💧",
            Self::Rainbow => "🌈",
            Self::Lighten => "☀",
            Self::Darken => "🌙",
        }
    }

    /// Tool bound to the digit key `1..=6`
    pub fn from_shortcut(digit: u8) -> Option<Self> {
        Self::ALL.get(usize::from(digit).checked_sub(1)?).copied()
    }

    pub fn shortcut(self) -> u8 {
        match self {
            Self::Pencil => 1,
            Self::Eraser => 2,
            Self::Picker => 3,
            Self::Rainbow => 4,
            Self::Lighten => 5,
            Self::Darken => 6,
        }
    }

    /// New color for one affected cell, or `None` to leave it alone.
    fn paint_cell<R: Rng + ?Sized>(
        self,
        current: Color,
        paint: &Paint,
        rng: &mut R,
    ) -> Option<Color> {
        match self {
            Self::Pencil => Some(paint.primary),
            Self::Eraser => Some(paint.background),
            Self::Rainbow => Some(random_color(rng)),
            Self::Lighten => (current != Color::WHITE).then(|| current.lighten(paint.shade_step)),
            Self::Darken => (current != Color::BLACK).then(|| current.darken(paint.shade_step)),
            Self::Picker => None,
        }
    }
}

/// Paint settings a tool application reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub primary: Color,
    pub background: Color,
    pub radius: BrushRadius,
    pub shade_step: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            primary: Color::BLACK,
            background: Color::WHITE,
            radius: BrushRadius::SINGLE_CELL,
            shade_step: DEFAULT_SHADE_STEP,
        }
    }
}

/// One pending cell assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWrite {
    pub coord: Coord,
    pub color: Color,
}

/// What a tool application asks the caller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Cell writes to commit in order
    Writes(Vec<CellWrite>),
    /// The picker read a color: make it the primary color and switch tools
    Pick { color: Color, switch_to: ToolKind },
}

impl ToolOutcome {
    pub fn writes(&self) -> &[CellWrite] {
        match self {
            Self::Writes(writes) => writes,
            Self::Pick { .. } => &[],
        }
    }
}

/// Computes the effect of applying `tool` at `target`.
///
/// The target cell is processed once, then every other in-bounds cell within
/// the brush radius. Each cell reads its own current color, and the rainbow
/// tool draws a fresh color per cell. Fails with `OutOfBounds` only when the
/// target itself lies outside the grid.
pub fn apply<R: Rng + ?Sized>(
    tool: ToolKind,
    target: Coord,
    paint: &Paint,
    grid: &Grid,
    rng: &mut R,
) -> GridResult<ToolOutcome> {
    let target_color = grid.get(target)?;

    if tool == ToolKind::Picker {
        return Ok(ToolOutcome::Pick {
            color: target_color,
            switch_to: ToolKind::Pencil,
        });
    }

    let mut writes = Vec::new();
    for coord in footprint(target, paint.radius, grid.size()) {
        let current = grid.get(coord)?;
        if let Some(color) = tool.paint_cell(current, paint, rng) {
            writes.push(CellWrite { coord, color });
        }
    }
    Ok(ToolOutcome::Writes(writes))
}

/// Commits writes to the grid in order
pub fn commit(grid: &mut Grid, writes: &[CellWrite]) -> GridResult<()> {
    for write in writes {
        grid.set(write.coord, write.color)?;
    }
    Ok(())
}
