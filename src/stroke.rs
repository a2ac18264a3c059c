use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

/// Brush width in pixels, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct BrushWidth(u8);

impl BrushWidth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Create a width, clamping out-of-range values
    pub fn new(width: u8) -> Self {
        Self(width.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        f32::from(self.0)
    }

    /// Every selectable width, smallest first
    pub fn all() -> impl Iterator<Item = BrushWidth> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for BrushWidth {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<u8> for BrushWidth {
    fn from(width: u8) -> Self {
        Self::new(width)
    }
}

impl From<BrushWidth> for u8 {
    fn from(width: BrushWidth) -> Self {
        width.0
    }
}

/// One line piece between two consecutive pointer positions of a drag.
///
/// Segments are transient: they are drawn onto the canvas and then dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSegment {
    pub from: Pos2,
    pub to: Pos2,
    pub width: BrushWidth,
    pub color: Color32,
}

impl StrokeSegment {
    pub fn new(from: Pos2, to: Pos2, width: BrushWidth, color: Color32) -> Self {
        Self {
            from,
            to,
            width,
            color,
        }
    }

    /// Radius of the round pen drawing this segment
    pub fn radius(&self) -> f32 {
        (self.width.as_f32() / 2.0).max(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_width_clamps() {
        assert_eq!(BrushWidth::new(0).get(), 1);
        assert_eq!(BrushWidth::new(5).get(), 5);
        assert_eq!(BrushWidth::new(42).get(), 10);
        assert_eq!(BrushWidth::from(11u8), BrushWidth::new(10));
    }

    #[test]
    fn test_brush_width_choices() {
        let widths: Vec<u8> = BrushWidth::all().map(BrushWidth::get).collect();
        assert_eq!(widths, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_segment_radius_never_below_half_pixel() {
        let thin = StrokeSegment::new(Pos2::ZERO, Pos2::new(5.0, 0.0), BrushWidth::new(1), Color32::BLACK);
        assert_eq!(thin.radius(), 0.5);

        let thick = StrokeSegment { width: BrushWidth::new(8), ..thin };
        assert_eq!(thick.radius(), 4.0);
    }
}
