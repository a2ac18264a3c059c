use crate::PaintApp;

/// The drawing area: the canvas texture at one canvas pixel per point
pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let size = egui::vec2(app.canvas().width() as f32, app.canvas().height() as f32);
            let (canvas_rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

            // Presses count only where the canvas is visible and not under a scroll bar
            let hit_rect = if response.hovered() {
                canvas_rect.intersect(ui.clip_rect())
            } else {
                egui::Rect::NOTHING
            };

            // Handle input before painting so this frame shows the new segment
            app.handle_canvas_input(ctx, canvas_rect, hit_rect);

            let texture = app.texture_id(ctx);
            ui.painter().image(
                texture,
                canvas_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        });
    });
}
