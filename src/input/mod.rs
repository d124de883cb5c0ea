//! Normalized input accepted by [`crate::EditorSession`].
//!
//! Device specifics (hit-testing, button state, touch ids) are resolved by a
//! router before events reach the session. The egui front end does this
//! in [`InputRouter`].

use crate::grid::Coord;
use crate::tools::ToolKind;

mod router;
pub use router::InputRouter;

/// Identifies one pointer or touch contact. The mouse always uses [`MOUSE_POINTER`].
pub type PointerId = u64;

pub const MOUSE_POINTER: PointerId = 0;

/// Position of an event within a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Pointer pressed or finger down
    Begin,
    /// Pointer moved while held down
    Move,
    /// Pointer released, finger lifted, or capture lost
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Mouse,
    Touch,
}

/// Mouse buttons held during an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl PointerButtons {
    pub const NONE: PointerButtons =
        PointerButtons { primary: false, secondary: false, middle: false };
    pub const PRIMARY: PointerButtons = PointerButtons { primary: true, ..Self::NONE };
    pub const SECONDARY: PointerButtons = PointerButtons { secondary: true, ..Self::NONE };
    pub const MIDDLE: PointerButtons = PointerButtons { middle: true, ..Self::NONE };

    /// Maps the held buttons to what the press should do.
    ///
    /// Touch has no buttons and always applies the active tool. For the mouse
    /// exactly one button must be held; chords do nothing.
    pub fn action(self, device: Device) -> Option<ButtonAction> {
        if device == Device::Touch {
            return Some(ButtonAction::ActiveTool);
        }
        match (self.primary, self.secondary, self.middle) {
            (true, false, false) => Some(ButtonAction::ActiveTool),
            (false, true, false) => Some(ButtonAction::Secondary),
            (false, false, true) => Some(ButtonAction::Picker),
            _ => None,
        }
    }
}

/// Logical action derived from the held buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Apply whichever tool is selected
    ActiveTool,
    /// Eraser, or darken while a shading tool is selected
    Secondary,
    /// Pick the color under the pointer
    Picker,
}

impl ButtonAction {
    /// The tool this action applies given the selected tool
    pub fn resolve(self, active: ToolKind) -> ToolKind {
        match self {
            Self::ActiveTool => active,
            Self::Secondary => match active {
                ToolKind::Lighten | ToolKind::Darken => ToolKind::Darken,
                _ => ToolKind::Eraser,
            },
            Self::Picker => ToolKind::Picker,
        }
    }
}

/// A pointer event resolved to grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub phase: Phase,
    pub pointer: PointerId,
    pub device: Device,
    /// Cell under the pointer, or `None` when it is outside the grid
    pub coord: Option<Coord>,
    pub buttons: PointerButtons,
}

impl InputEvent {
    pub fn mouse(phase: Phase, coord: Option<Coord>, buttons: PointerButtons) -> Self {
        Self {
            phase,
            pointer: MOUSE_POINTER,
            device: Device::Mouse,
            coord,
            buttons,
        }
    }

    pub fn touch(pointer: PointerId, phase: Phase, coord: Option<Coord>) -> Self {
        Self {
            phase,
            pointer,
            device: Device::Touch,
            coord,
            buttons: PointerButtons::NONE,
        }
    }

    pub fn action(&self) -> Option<ButtonAction> {
        self.buttons.action(self.device)
    }
}

/// Keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    SelectTool(ToolKind),
    Undo,
    Redo,
}

impl KeyCommand {
    /// Digits `1..=6` pick a tool, `Ctrl+Shift+Z` redoes and `Ctrl+Z` undoes.
    pub fn from_key(key: char, ctrl: bool, shift: bool) -> Option<Self> {
        if let Some(digit) = key.to_digit(10) {
            return ToolKind::from_shortcut(digit as u8).map(Self::SelectTool);
        }
        if ctrl && key.eq_ignore_ascii_case(&'z') {
            return Some(if shift { Self::Redo } else { Self::Undo });
        }
        None
    }
}
