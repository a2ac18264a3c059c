use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::stroke::BrushWidth;

/// Startup settings, restored from eframe storage when available.
///
/// Only settings are kept between runs, never the drawing itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintSettings {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Color32,
    pub brush_color: Color32,
    pub brush_width: BrushWidth,
    /// Pixel height of stamped text
    pub text_size: f32,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 400,
            background: Color32::WHITE,
            brush_color: Color32::BLACK,
            brush_width: BrushWidth::default(),
            text_size: 20.0,
        }
    }
}

impl PaintSettings {
    /// Fall back to defaults for any value a stale store could have broken
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if crate::canvas::validate_dimensions(self.canvas_width, self.canvas_height).is_err() {
            log::warn!(
                "Ignoring stored canvas size {}x{}",
                self.canvas_width,
                self.canvas_height
            );
            self.canvas_width = defaults.canvas_width;
            self.canvas_height = defaults.canvas_height;
        }
        if !(self.text_size.is_finite() && self.text_size >= 4.0) {
            self.text_size = defaults.text_size;
        }
        self
    }
}
