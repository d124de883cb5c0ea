#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod components;
pub mod error;
pub mod grid;
pub mod history;
pub mod input;
pub mod palette;
pub mod panels;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod tools;

pub use app::PixelApp;
pub use color::Color;
pub use error::{ExportError, GridError, GridResult, PersistenceError};
pub use grid::{Coord, Grid, Snapshot};
pub use history::History;
pub use input::{InputEvent, InputRouter, KeyCommand, Phase, PointerButtons};
pub use palette::{SwatchBook, SWATCHES};
pub use renderer::CanvasView;
pub use session::{EditorSession, Effect};
pub use settings::{EditorConfig, Preferences};
pub use tools::{BrushRadius, ToolKind};
