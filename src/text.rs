use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use egui::{FontDefinitions, FontFamily, Pos2};

use crate::error::{PaintError, PaintResult};
use crate::raster::CoverageMask;

/// Rasterizes text into coverage masks using egui's bundled proportional font
#[derive(Clone)]
pub struct TextRasterizer {
    font: FontArc,
    size: f32,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer").field("size", &self.size).finish()
    }
}

impl TextRasterizer {
    /// Load the first proportional font of egui's default font set
    pub fn from_default_fonts(size: f32) -> PaintResult<Self> {
        let definitions = FontDefinitions::default();
        let name = definitions
            .families
            .get(&FontFamily::Proportional)
            .and_then(|names| names.first())
            .ok_or_else(|| PaintError::Font("no proportional font registered".to_owned()))?;
        let data = definitions
            .font_data
            .get(name)
            .ok_or_else(|| PaintError::Font(format!("missing font data for {name}")))?;
        let font = FontArc::try_from_vec(data.font.to_vec())
            .map_err(|err| PaintError::Font(format!("{name}: {err}")))?;

        log::debug!("Loaded text font {name} at {size}px");
        Ok(Self { font, size })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Lay out `text` on one line with its top-left corner at `origin` and
    /// return the covered pixels
    pub fn rasterize(&self, text: &str, origin: Pos2) -> CoverageMask {
        let scale = PxScale::from(self.size);
        let scaled = self.font.as_scaled(scale);

        let mut caret = point(origin.x, origin.y + scaled.ascent());
        let mut previous: Option<GlyphId> = None;
        let mut mask = CoverageMask::default();

        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
                outlined.draw(|gx, gy, coverage| {
                    mask.pixels
                        .push((left + i64::from(gx), top + i64::from(gy), coverage));
                });
            }
        }

        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_loads() {
        let text = TextRasterizer::from_default_fonts(20.0).unwrap();
        assert_eq!(text.size(), 20.0);
    }

    #[test]
    fn test_rasterize_places_glyphs_right_of_origin() {
        let text = TextRasterizer::from_default_fonts(20.0).unwrap();
        let mask = text.rasterize("Hi", Pos2::new(50.0, 30.0));

        assert!(!mask.is_empty());
        assert!(mask.pixels.iter().all(|&(x, y, _)| x >= 49 && y >= 29));
        assert!(mask.pixels.iter().any(|&(_, _, c)| c > 0.5));
    }

    #[test]
    fn test_whitespace_has_no_coverage() {
        let text = TextRasterizer::from_default_fonts(20.0).unwrap();
        assert!(text.rasterize("   ", Pos2::ZERO).is_empty());
        assert!(text.rasterize("", Pos2::ZERO).is_empty());
    }
}
