//! Pixel-level drawing shared by every surface.
//!
//! Both the on-screen canvas and the export buffer implement [`PixelTarget`],
//! and all drawing goes through the free functions here. Running the same
//! rasterizer over both targets is what keeps them pixel-identical.

use egui::{Color32, Pos2};

use crate::stroke::StrokeSegment;

/// An opaque RGB pixel
pub type Rgb = [u8; 3];

pub fn to_rgb(color: Color32) -> Rgb {
    [color.r(), color.g(), color.b()]
}

pub fn from_rgb(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// A width×height grid of opaque RGB pixels that can be drawn on
pub trait PixelTarget {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Read a pixel. Callers guarantee the coordinate is in bounds.
    fn get(&self, x: u32, y: u32) -> Rgb;

    /// Write a pixel. Callers guarantee the coordinate is in bounds.
    fn put(&mut self, x: u32, y: u32, rgb: Rgb);

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width()) && y < i64::from(self.height())
    }
}

/// A coverage mask produced by the text rasterizer, in surface pixel coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageMask {
    pub pixels: Vec<(i64, i64, f32)>,
}

impl CoverageMask {
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Draw a rounded-cap line. Pixel (x, y) is painted when its distance to the
/// segment is at most the pen radius.
pub fn draw_segment(target: &mut impl PixelTarget, segment: &StrokeSegment) {
    let radius = segment.radius();
    let rgb = to_rgb(segment.color);

    let min_x = (segment.from.x.min(segment.to.x) - radius).floor() as i64;
    let max_x = (segment.from.x.max(segment.to.x) + radius).ceil() as i64;
    let min_y = (segment.from.y.min(segment.to.y) - radius).floor() as i64;
    let max_y = (segment.from.y.max(segment.to.y) + radius).ceil() as i64;

    // Clip the scan box to the surface
    let min_x = min_x.max(0);
    let min_y = min_y.max(0);
    let max_x = max_x.min(i64::from(target.width()) - 1);
    let max_y = max_y.min(i64::from(target.height()) - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Pos2::new(x as f32, y as f32);
            if distance_to_line_segment(center, segment.from, segment.to) <= radius {
                target.put(x as u32, y as u32, rgb);
            }
        }
    }
}

/// Fill the whole target with one color
pub fn fill(target: &mut impl PixelTarget, color: Color32) {
    let rgb = to_rgb(color);
    for y in 0..target.height() {
        for x in 0..target.width() {
            target.put(x, y, rgb);
        }
    }
}

/// Replace every pixel equal to `from` with `to`
pub fn recolor(target: &mut impl PixelTarget, from: Color32, to: Color32) {
    let (from, to) = (to_rgb(from), to_rgb(to));
    for y in 0..target.height() {
        for x in 0..target.width() {
            if target.get(x, y) == from {
                target.put(x, y, to);
            }
        }
    }
}

/// Copy `source` into the top-left corner of `target`, cropping whatever does not fit
pub fn copy_into(target: &mut impl PixelTarget, source: &impl PixelTarget) {
    let width = target.width().min(source.width());
    let height = target.height().min(source.height());
    for y in 0..height {
        for x in 0..width {
            target.put(x, y, source.get(x, y));
        }
    }
}

/// Linear blend of `src` over `dst` by `coverage` in `0..=1`
pub fn blend(dst: Rgb, src: Rgb, coverage: f32) -> Rgb {
    let a = coverage.clamp(0.0, 1.0);
    let mix = |d: u8, s: u8| (f32::from(d) + (f32::from(s) - f32::from(d)) * a).round() as u8;
    [mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2])]
}

/// Blend a coverage mask onto the target in the given color
pub fn apply_mask(target: &mut impl PixelTarget, mask: &CoverageMask, color: Color32) {
    let rgb = to_rgb(color);
    for &(x, y, coverage) in &mask.pixels {
        if coverage <= 0.0 || !target.contains(x, y) {
            continue;
        }
        let (x, y) = (x as u32, y as u32);
        let blended = blend(target.get(x, y), rgb, coverage);
        target.put(x, y, blended);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::BrushWidth;

    /// Minimal in-memory target for exercising the rasterizer
    struct Grid {
        width: u32,
        height: u32,
        pixels: Vec<Rgb>,
    }

    impl Grid {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pixels: vec![[255, 255, 255]; (width * height) as usize],
            }
        }

        fn painted(&self) -> usize {
            self.pixels.iter().filter(|p| **p != [255, 255, 255]).count()
        }
    }

    impl PixelTarget for Grid {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn get(&self, x: u32, y: u32) -> Rgb {
            self.pixels[(y * self.width + x) as usize]
        }

        fn put(&mut self, x: u32, y: u32, rgb: Rgb) {
            self.pixels[(y * self.width + x) as usize] = rgb;
        }
    }

    fn segment(from: (f32, f32), to: (f32, f32), width: u8) -> StrokeSegment {
        StrokeSegment::new(
            Pos2::new(from.0, from.1),
            Pos2::new(to.0, to.1),
            BrushWidth::new(width),
            Color32::BLACK,
        )
    }

    #[test]
    fn test_distance_to_line_segment() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        assert_eq!(distance_to_line_segment(Pos2::new(5.0, 3.0), a, b), 3.0);
        // Beyond the end the distance is measured to the endpoint
        assert_eq!(distance_to_line_segment(Pos2::new(13.0, 4.0), a, b), 5.0);
        // Degenerate segment
        assert_eq!(distance_to_line_segment(Pos2::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_thin_horizontal_line_paints_one_row() {
        let mut grid = Grid::new(20, 5);
        draw_segment(&mut grid, &segment((2.0, 2.0), (12.0, 2.0), 1));

        for x in 2..=12 {
            assert_eq!(grid.get(x, 2), [0, 0, 0]);
        }
        assert_eq!(grid.painted(), 11);
    }

    #[test]
    fn test_thin_diagonal_line_is_connected() {
        let mut grid = Grid::new(20, 20);
        draw_segment(&mut grid, &segment((1.0, 1.0), (15.0, 8.0), 1));

        // Every column crossed by the line holds at least one painted pixel
        for x in 1..=15 {
            assert!((0..20).any(|y| grid.get(x, y) == [0, 0, 0]), "gap in column {x}");
        }
    }

    #[test]
    fn test_round_cap_extends_past_endpoints() {
        let mut grid = Grid::new(30, 30);
        draw_segment(&mut grid, &segment((10.0, 15.0), (20.0, 15.0), 6));

        assert_eq!(grid.get(7, 15), [0, 0, 0]);
        assert_eq!(grid.get(23, 15), [0, 0, 0]);
        // Corners of the bounding box stay outside the cap
        assert_eq!(grid.get(7, 12), [255, 255, 255]);
    }

    #[test]
    fn test_dot_for_degenerate_segment() {
        let mut grid = Grid::new(10, 10);
        draw_segment(&mut grid, &segment((4.0, 4.0), (4.0, 4.0), 1));
        assert_eq!(grid.painted(), 1);
        assert_eq!(grid.get(4, 4), [0, 0, 0]);
    }

    #[test]
    fn test_segment_clipped_to_surface() {
        let mut grid = Grid::new(10, 10);
        draw_segment(&mut grid, &segment((-20.0, 5.0), (30.0, 5.0), 3));
        assert_eq!(grid.get(0, 5), [0, 0, 0]);
        assert_eq!(grid.get(9, 5), [0, 0, 0]);
    }

    #[test]
    fn test_recolor_only_touches_matching_pixels() {
        let mut grid = Grid::new(4, 1);
        grid.put(1, 0, [1, 2, 3]);
        recolor(&mut grid, Color32::WHITE, Color32::from_rgb(0, 0, 255));

        assert_eq!(grid.get(0, 0), [0, 0, 255]);
        assert_eq!(grid.get(1, 0), [1, 2, 3]);
    }

    #[test]
    fn test_copy_into_crops() {
        let mut source = Grid::new(4, 4);
        fill(&mut source, Color32::RED);
        let mut target = Grid::new(2, 6);
        copy_into(&mut target, &source);

        assert_eq!(target.get(1, 3), [255, 0, 0]);
        assert_eq!(target.get(1, 4), [255, 255, 255]);
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend([0, 0, 0], [255, 255, 255], 0.0), [0, 0, 0]);
        assert_eq!(blend([0, 0, 0], [255, 255, 255], 1.0), [255, 255, 255]);
        assert_eq!(blend([0, 100, 200], [200, 100, 0], 0.5), [100, 100, 100]);
    }

    #[test]
    fn test_apply_mask_skips_out_of_bounds() {
        let mut grid = Grid::new(3, 3);
        let mask = CoverageMask {
            pixels: vec![(1, 1, 1.0), (-1, 0, 1.0), (5, 5, 1.0), (0, 0, 0.0)],
        };
        apply_mask(&mut grid, &mask, Color32::BLACK);

        assert_eq!(grid.get(1, 1), [0, 0, 0]);
        assert_eq!(grid.painted(), 1);
    }
}
