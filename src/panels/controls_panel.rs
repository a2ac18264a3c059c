use crate::PaintApp;
use crate::command::Command;
use crate::prompt::Prompt;
use crate::stroke::BrushWidth;
use crate::tools::Tool;

/// The control strip above the canvas
pub fn controls_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("controls_panel").show(ctx, |ui| {
        ui.add_enabled_ui(app.prompt().is_none(), |ui| {
            ui.horizontal_wrapped(|ui| {
                if ui
                    .button("Save")
                    .on_hover_text(ctx.format_shortcut(&crate::app::SAVE_SHORTCUT))
                    .clicked()
                {
                    app.open_prompt(Prompt::Save { path: String::new() });
                }

                if ui.button("Clear").clicked() {
                    app.run_command(Command::Clear);
                }

                ui.separator();

                let (swatch, _) =
                    ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 2.0, app.tools().brush_color());
                if ui
                    .button("Color")
                    .on_hover_text(ctx.format_shortcut(&crate::app::COLOR_SHORTCUT))
                    .clicked()
                {
                    app.open_color_prompt();
                }

                ui.separator();
                brush_size_controls(app, ui);
                ui.separator();

                let erasing = app.tools().active() == Tool::Eraser;
                if ui.selectable_label(erasing, "Eraser").clicked() {
                    app.tools_mut().toggle_eraser();
                }

                let placing_text = app.tools().active() == Tool::Text;
                let text_button = ui.add_enabled(
                    app.has_text_support(),
                    egui::SelectableLabel::new(placing_text, "Text"),
                );
                if text_button.clicked() {
                    if placing_text {
                        app.tools_mut().cancel_text();
                    } else {
                        app.open_prompt(Prompt::Text { text: String::new() });
                    }
                }

                ui.separator();

                if ui.button("Resize").clicked() {
                    app.open_resize_prompt();
                }
                if ui.button("Background").clicked() {
                    app.open_background_prompt();
                }

                ui.separator();
                ui.label(format!(
                    "{} | {}x{}",
                    app.tools().active().name(),
                    app.canvas().width(),
                    app.canvas().height()
                ));
            });
        });
    });
}

/// Dropdown and slider bound to the same width, so each shows the other's value
fn brush_size_controls(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.label("Size:");

    let width = app.tools_mut().width_mut();
    egui::ComboBox::from_id_salt("brush_size")
        .width(40.0)
        .selected_text(width.get().to_string())
        .show_ui(ui, |ui| {
            for choice in BrushWidth::all() {
                ui.selectable_value(width, choice, choice.get().to_string());
            }
        });

    let mut value = width.get();
    if ui
        .add(egui::Slider::new(&mut value, BrushWidth::MIN..=BrushWidth::MAX).show_value(false))
        .changed()
    {
        *width = BrushWidth::new(value);
    }
}
