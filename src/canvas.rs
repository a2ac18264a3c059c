use std::path::{Path, PathBuf};

use egui::{Color32, Pos2};

use crate::error::{PaintError, PaintResult};
use crate::export;
use crate::raster::{self, CoverageMask, PixelTarget, from_rgb};
use crate::stroke::StrokeSegment;
use crate::surface::{DisplayCanvas, RasterBuffer};

/// Largest accepted width or height
pub const MAX_DIMENSION: u32 = 8192;

/// What to do with the existing drawing when the canvas changes shape or background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPolicy {
    Keep,
    Discard,
}

/// The drawing area: one displayed surface and one exportable raster buffer
/// that always hold the same pixels.
#[derive(Debug)]
pub struct Canvas {
    background: Color32,
    display: DisplayCanvas,
    raster: RasterBuffer,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color32) -> PaintResult<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            background,
            display: DisplayCanvas::new(width, height, background),
            raster: RasterBuffer::new(width, height, background),
        })
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn display(&self) -> &DisplayCanvas {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayCanvas {
        &mut self.display
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    /// Whether a canvas-local position lies on the canvas
    pub fn contains(&self, pos: Pos2) -> bool {
        self.raster.contains(pos.x.floor() as i64, pos.y.floor() as i64)
    }

    /// Draw one segment of a stroke on both surfaces
    pub fn draw_segment(&mut self, segment: &StrokeSegment) {
        raster::draw_segment(&mut self.display, segment);
        raster::draw_segment(&mut self.raster, segment);
    }

    /// Blend a text mask on both surfaces
    pub fn stamp(&mut self, mask: &CoverageMask, color: Color32) {
        raster::apply_mask(&mut self.display, mask, color);
        raster::apply_mask(&mut self.raster, mask, color);
    }

    /// Read the exported color at a canvas-local position
    pub fn pixel_at(&self, pos: Pos2) -> Option<Color32> {
        let (x, y) = (pos.x.floor() as i64, pos.y.floor() as i64);
        self.raster
            .contains(x, y)
            .then(|| from_rgb(self.raster.get(x as u32, y as u32)))
    }

    /// Wipe the drawing, keeping size and background
    pub fn clear(&mut self) {
        raster::fill(&mut self.display, self.background);
        raster::fill(&mut self.raster, self.background);
    }

    /// Replace both surfaces with new dimensions and background
    pub fn resize(&mut self, width: u32, height: u32, background: Color32, policy: ContentPolicy) -> PaintResult<()> {
        validate_dimensions(width, height)?;

        let mut display = DisplayCanvas::new(width, height, background);
        let mut raster = RasterBuffer::new(width, height, background);
        if policy == ContentPolicy::Keep {
            raster::copy_into(&mut display, &self.display);
            raster::copy_into(&mut raster, &self.raster);
        }

        log::info!(
            "Canvas resized {}x{} -> {}x{} ({:?})",
            self.width(),
            self.height(),
            width,
            height,
            policy
        );
        self.display = display;
        self.raster = raster;
        self.background = background;
        Ok(())
    }

    /// Switch to a new background color
    pub fn set_background(&mut self, background: Color32, policy: ContentPolicy) {
        match policy {
            ContentPolicy::Keep => {
                raster::recolor(&mut self.display, self.background, background);
                raster::recolor(&mut self.raster, self.background, background);
            }
            ContentPolicy::Discard => {
                raster::fill(&mut self.display, background);
                raster::fill(&mut self.raster, background);
            }
        }
        log::info!("Background changed {:?} -> {:?} ({:?})", self.background, background, policy);
        self.background = background;
    }

    /// Write the raster buffer as PNG; returns the path actually written
    pub fn export_png(&self, path: &Path) -> PaintResult<PathBuf> {
        export::save_png(self.raster.image(), path)
    }
}

pub fn validate_dimensions(width: u32, height: u32) -> PaintResult<()> {
    if (1..=MAX_DIMENSION).contains(&width) && (1..=MAX_DIMENSION).contains(&height) {
        Ok(())
    } else {
        Err(PaintError::InvalidDimensions { width, height })
    }
}
