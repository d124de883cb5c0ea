use eframe::egui;

use crate::PixelApp;

pub fn central_panel(app: &mut PixelApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_rect = app.view().canvas_rect(ui.available_rect_before_wrap());
        let response = ui.allocate_rect(canvas_rect, egui::Sense::click_and_drag());

        // Handle input
        app.handle_canvas_input(ctx, canvas_rect, ui.layer_id());

        let now = ctx.input(|i| i.time);
        let hovered = response
            .hover_pos()
            .and_then(|pos| app.view().hit_test(canvas_rect, pos));
        let view = app.view_mut();
        view.hover(hovered, now);

        // Render the canvas
        if view.paint(ui.painter(), canvas_rect, now) {
            ctx.request_repaint();
        }
    });
}
