use log::{debug, info, warn};

use crate::color::Color;
use crate::error::{GridResult, PersistenceError};
use crate::input::InputRouter;
use crate::palette::SwatchBook;
use crate::panels;
use crate::renderer::CanvasView;
use crate::session::{EditorSession, Effect};
use crate::settings::{EditorConfig, Preferences};
use crate::tools::{BrushRadius, ToolKind};

/// Storage key the preferences are persisted under
pub const PREFERENCES_KEY: &str = "pixel_canvas.preferences";

/// Storage key of the editor limits and defaults
pub const CONFIG_KEY: &str = "pixel_canvas.config";

/// File name used by the PNG export
#[cfg(not(target_arch = "wasm32"))]
pub const EXPORT_FILE_NAME: &str = "pixel-art.png";

/// Pixels per cell in the exported image
#[cfg(not(target_arch = "wasm32"))]
const EXPORT_CELL_PX: u32 = 16;

pub struct PixelApp {
    session: EditorSession,
    view: CanvasView,
    router: InputRouter,
    prefs: Preferences,
    swatches: SwatchBook,
    /// Contents of the hex color field
    pub hex_input: String,
    status: Option<String>,
}

impl PixelApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> GridResult<Self> {
        let config = load_stored(cc.storage, CONFIG_KEY, EditorConfig::from_json);
        let prefs = load_stored(cc.storage, PREFERENCES_KEY, Preferences::from_json);
        Self::with_preferences(config.unwrap_or_default(), prefs.unwrap_or_default())
    }

    pub fn with_preferences(config: EditorConfig, prefs: Preferences) -> GridResult<Self> {
        let prefs = prefs.sanitized(&config);
        let config = EditorConfig { default_grid_size: prefs.grid_size, ..config };
        let session = EditorSession::new(config)?;

        let mut view = CanvasView::new(session.grid());
        view.set_cell_outline(prefs.cell_outline);
        view.set_mouse_trail(prefs.mouse_trail);

        info!("Starting with a {}x{} grid", prefs.grid_size, prefs.grid_size);
        Ok(Self {
            hex_input: session.primary_color().to_hex(),
            swatches: SwatchBook::new(prefs.swatch_index),
            router: InputRouter::new(),
            session,
            view,
            prefs,
            status: None,
        })
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn view(&self) -> &CanvasView {
        &self.view
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn swatches(&self) -> &SwatchBook {
        &self.swatches
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Mirrors session effects into the view and the widgets.
    pub fn apply_effects(&mut self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        debug!("Applying {} effects", effects.len());
        self.view.apply(&effects);
        for effect in effects {
            match effect {
                Effect::PrimaryColorChanged(color) => self.hex_input = color.to_hex(),
                Effect::GridReset { size, .. } => self.prefs.grid_size = size,
                _ => {}
            }
        }
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        let effects = self.session.select_tool(tool);
        self.apply_effects(effects);
    }

    pub fn set_primary_color(&mut self, color: Color) {
        let effects = self.session.set_primary_color(color);
        self.apply_effects(effects);
    }

    /// Applies the hex field. Invalid input is reported and the field reset.
    pub fn commit_hex_input(&mut self) {
        match self.session.set_primary_hex(&self.hex_input) {
            Ok(effects) => {
                self.status = None;
                self.apply_effects(effects);
            }
            Err(err) => {
                self.status = Some(err.to_string());
                self.hex_input = self.session.primary_color().to_hex();
            }
        }
    }

    /// Sets the brush from its 1-based size
    pub fn set_brush_size(&mut self, size: usize) {
        let radius = BrushRadius::from_brush_size(size, self.session.config().max_brush_radius);
        self.session.set_brush_radius(radius.get());
    }

    pub fn resize_grid(&mut self, size: usize) {
        match self.session.resize_grid(size) {
            Ok(effects) => {
                self.status = None;
                self.apply_effects(effects);
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub fn clear_grid(&mut self) {
        let effects = self.session.clear_grid();
        self.apply_effects(effects);
    }

    pub fn undo(&mut self) {
        let effects = self.session.undo();
        self.apply_effects(effects);
    }

    pub fn redo(&mut self) {
        let effects = self.session.redo();
        self.apply_effects(effects);
    }

    pub fn next_swatch(&mut self) {
        self.swatches.next();
        self.prefs.swatch_index = self.swatches.index();
    }

    pub fn previous_swatch(&mut self) {
        self.swatches.previous();
        self.prefs.swatch_index = self.swatches.index();
    }

    pub fn set_cell_outline(&mut self, enabled: bool) {
        self.prefs.cell_outline = enabled;
        self.view.set_cell_outline(enabled);
    }

    pub fn set_mouse_trail(&mut self, enabled: bool) {
        self.prefs.mouse_trail = enabled;
        self.view.set_mouse_trail(enabled);
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.prefs.dark_mode = enabled;
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_png(&mut self) {
        let path = std::path::Path::new(EXPORT_FILE_NAME);
        self.status = Some(match self.view.export_png(path, EXPORT_CELL_PX) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                warn!("Export failed: {}", err);
                err.to_string()
            }
        });
    }

    /// Routes this frame's canvas input through the session.
    pub(crate) fn handle_canvas_input(
        &mut self,
        ctx: &egui::Context,
        rect: egui::Rect,
        layer: egui::LayerId,
    ) {
        for event in self.router.collect(ctx, &self.view, rect, layer) {
            let effects = self.session.handle(event);
            self.apply_effects(effects);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        for command in self.router.key_commands(ctx) {
            let effects = self.session.execute_key(command);
            self.apply_effects(effects);
        }
    }

    pub(crate) fn view_mut(&mut self) -> &mut CanvasView {
        &mut self.view
    }
}

/// Reads and parses the JSON stored under `key`. Unparsable entries are
/// logged and ignored.
fn load_stored<T>(
    storage: Option<&dyn eframe::Storage>,
    key: &str,
    parse: fn(&str) -> Result<T, PersistenceError>,
) -> Option<T> {
    let json = storage?.get_string(key)?;
    parse(&json)
        .inspect_err(|err| warn!("Ignoring stored {}: {}", key, err))
        .ok()
}

impl eframe::App for PixelApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.prefs.to_json() {
            Ok(json) => storage.set_string(PREFERENCES_KEY, json),
            Err(err) => warn!("Could not save preferences: {}", err),
        }
        match self.session.config().to_json() {
            Ok(json) => storage.set_string(CONFIG_KEY, json),
            Err(err) => warn!("Could not save editor config: {}", err),
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.prefs.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        self.handle_shortcuts(ctx);
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
    }
}
