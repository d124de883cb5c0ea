use eframe::egui;

use crate::PixelApp;
use crate::components::ToolButton;
use crate::color::Color;
use crate::renderer::to_color32;
use crate::tools::ToolKind;

pub fn tools_panel(app: &mut PixelApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.horizontal_wrapped(|ui| {
                let active = app.session().tool();
                for tool in ToolKind::ALL {
                    if ToolButton::new(tool, tool == active).show(ui).clicked() {
                        app.select_tool(tool);
                    }
                }
            });
            ui.label(app.session().tool().name());

            ui.separator();
            color_section(app, ui);

            ui.separator();
            let max_radius = app.session().config().max_brush_radius;
            let mut brush_size = app.session().brush_radius().brush_size();
            if ui
                .add(egui::Slider::new(&mut brush_size, 1..=max_radius + 1).text("Brush size"))
                .changed()
            {
                app.set_brush_size(brush_size);
            }

            // Resizing starts a blank canvas and drops the history
            let max_grid = app.session().config().max_grid_size;
            let mut grid_size = app.session().grid().size();
            if ui
                .add(egui::Slider::new(&mut grid_size, 1..=max_grid).text("Grid size"))
                .changed()
            {
                app.resize_grid(grid_size);
            }

            ui.separator();
            ui.horizontal(|ui| {
                let history = app.session().history();
                let undo = egui::Button::new(format!("Undo ({})", history.undo_steps()));
                let redo = egui::Button::new(format!("Redo ({})", history.redo_steps()));
                let (can_undo, can_redo) = (history.can_undo(), history.can_redo());
                if ui.add_enabled(can_undo, undo).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, redo).clicked() {
                    app.redo();
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    app.clear_grid();
                }
                #[cfg(not(target_arch = "wasm32"))]
                if ui.button("Export PNG").clicked() {
                    app.export_png();
                }
            });

            ui.separator();
            let mut outline = app.preferences().cell_outline;
            if ui.checkbox(&mut outline, "Cell outline").changed() {
                app.set_cell_outline(outline);
            }
            let mut trail = app.preferences().mouse_trail;
            if ui.checkbox(&mut trail, "Mouse trail").changed() {
                app.set_mouse_trail(trail);
            }
            let mut dark = app.preferences().dark_mode;
            if ui.checkbox(&mut dark, "Dark mode").changed() {
                app.set_dark_mode(dark);
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}

fn color_section(app: &mut PixelApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let primary = app.session().primary_color();
        let mut rgb = [primary.r, primary.g, primary.b];
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            app.set_primary_color(Color::rgb(rgb[0], rgb[1], rgb[2]));
        }

        let response = ui.add(egui::TextEdit::singleline(&mut app.hex_input).desired_width(80.0));
        if response.lost_focus() {
            app.commit_hex_input();
        }
    });

    ui.horizontal(|ui| {
        if ui.small_button("◀").clicked() {
            app.previous_swatch();
        }
        ui.label(app.swatches().current().name);
        if ui.small_button("▶").clicked() {
            app.next_swatch();
        }
    });
    ui.horizontal(|ui| {
        for color in app.swatches().current().colors {
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::click());
            ui.painter().rect_filled(rect, 2.0, to_color32(color));
            if color == app.session().primary_color() {
                ui.painter().rect_stroke(rect, 2.0, ui.visuals().selection.stroke);
            }
            if response.on_hover_text(color.to_hex()).clicked() {
                app.set_primary_color(color);
            }
        }
    });
}
