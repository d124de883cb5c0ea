// src/renderer.rs
use std::path::Path;

use eframe::egui::{self, Color32, Pos2, Rect, Stroke};
use log::info;

use crate::color::Color;
use crate::error::ExportError;
use crate::grid::{Coord, Grid};
use crate::session::Effect;

/// Seconds a mouse-trail highlight takes to fade out
const TRAIL_FADE_SECS: f64 = 0.4;

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Presentation projection of the grid.
///
/// Holds the displayed color of every cell and is only ever updated from
/// session effects; it never writes back to the grid.
#[derive(Debug)]
pub struct CanvasView {
    size: usize,
    cells: Vec<Color>,
    show_outline: bool,
    mouse_trail: bool,
    /// Recently hovered cells and the time they were entered
    trail: Vec<(Coord, f64)>,
    hovered: Option<Coord>,
}

impl CanvasView {
    pub fn new(grid: &Grid) -> Self {
        Self {
            size: grid.size(),
            cells: grid.cells().map(|(_, color)| color).collect(),
            show_outline: false,
            mouse_trail: false,
            trail: Vec::new(),
            hovered: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Mirrors the cell-related effects; other effects are ignored.
    pub fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            match *effect {
                Effect::SetCellDisplay { coord, color } => self.set_cell_display(coord, color),
                Effect::GridReset { size, background } => {
                    self.size = size;
                    self.cells = vec![background; size * size];
                    self.trail.clear();
                    self.hovered = None;
                }
                _ => {}
            }
        }
    }

    pub fn set_cell_display(&mut self, coord: Coord, color: Color) {
        if coord.row < self.size && coord.col < self.size {
            self.cells[coord.row * self.size + coord.col] = color;
        }
    }

    pub fn cell_display(&self, coord: Coord) -> Option<Color> {
        (coord.row < self.size && coord.col < self.size)
            .then(|| self.cells[coord.row * self.size + coord.col])
    }

    pub fn set_cell_outline(&mut self, enabled: bool) {
        self.show_outline = enabled;
    }

    pub fn set_mouse_trail(&mut self, enabled: bool) {
        self.mouse_trail = enabled;
        if !enabled {
            self.trail.clear();
        }
    }

    /// Records the cell under the pointer for the trail effect.
    pub fn hover(&mut self, coord: Option<Coord>, now: f64) {
        if coord != self.hovered {
            self.hovered = coord;
            if let (true, Some(coord)) = (self.mouse_trail, coord) {
                self.trail.retain(|(c, _)| *c != coord);
                self.trail.push((coord, now));
            }
        }
    }

    /// Largest square that fits in `available`, centered
    pub fn canvas_rect(&self, available: Rect) -> Rect {
        let side = available.width().min(available.height()).max(1.0);
        Rect::from_center_size(available.center(), egui::vec2(side, side))
    }

    /// Resolves a screen position to the cell under it.
    pub fn hit_test(&self, rect: Rect, pos: Pos2) -> Option<Coord> {
        if self.size == 0 || !rect.contains(pos) {
            return None;
        }
        let cell = rect.width() / self.size as f32;
        let to_index = |offset: f32| ((offset / cell) as usize).min(self.size - 1);
        Some(Coord::new(to_index(pos.y - rect.min.y), to_index(pos.x - rect.min.x)))
    }

    fn cell_rect(&self, rect: Rect, coord: Coord) -> Rect {
        let cell = rect.width() / self.size as f32;
        Rect::from_min_size(
            rect.min + egui::vec2(coord.col as f32 * cell, coord.row as f32 * cell),
            egui::vec2(cell, cell),
        )
    }

    /// Draws the canvas. Returns true while the trail is still fading and
    /// another frame is needed.
    pub fn paint(&mut self, painter: &egui::Painter, rect: Rect, now: f64) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                let coord = Coord::new(row, col);
                let color = self.cells[row * self.size + col];
                // Expand slightly so neighbouring cells leave no hairline gaps
                let cell_rect = self.cell_rect(rect, coord).expand(0.5);
                painter.rect_filled(cell_rect, 0.0, to_color32(color));
            }
        }

        if self.show_outline {
            let stroke = Stroke::new(1.0, Color32::from_gray(160));
            let cell = rect.width() / self.size as f32;
            for i in 0..=self.size {
                let offset = i as f32 * cell;
                let column = egui::vec2(offset, 0.0);
                let (top, bottom) = (rect.left_top() + column, rect.left_bottom() + column);
                painter.line_segment([top, bottom], stroke);
                let row = egui::vec2(0.0, offset);
                painter.line_segment([rect.left_top() + row, rect.right_top() + row], stroke);
            }
        }

        self.trail.retain(|(_, entered)| now - entered < TRAIL_FADE_SECS);
        for (coord, entered) in &self.trail {
            let fade = 1.0 - ((now - entered) / TRAIL_FADE_SECS) as f32;
            let alpha = (fade.clamp(0.0, 1.0) * 120.0) as u8;
            painter.rect_filled(
                self.cell_rect(rect, *coord),
                0.0,
                Color32::from_rgba_unmultiplied(255, 255, 255, alpha),
            );
        }

        !self.trail.is_empty()
    }

    /// Rasterizes the displayed cells, `cell_px` pixels per cell.
    pub fn to_image(&self, cell_px: u32) -> Result<image::RgbImage, ExportError> {
        if self.size == 0 || cell_px == 0 {
            return Err(ExportError::EmptyGrid);
        }
        let side = self.size as u32 * cell_px;
        Ok(image::RgbImage::from_fn(side, side, |x, y| {
            let coord = Coord::new((y / cell_px) as usize, (x / cell_px) as usize);
            let color = self.cells[coord.row * self.size + coord.col];
            image::Rgb([color.r, color.g, color.b])
        }))
    }

    /// Writes the displayed cells to a PNG file.
    pub fn export_png(&self, path: &Path, cell_px: u32) -> Result<(), ExportError> {
        let image = self.to_image(cell_px)?;
        image.save_with_format(path, image::ImageFormat::Png)?;
        info!("Exported {}x{} image to {}", image.width(), image.height(), path.display());
        Ok(())
    }
}
