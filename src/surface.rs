use egui::{Color32, ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use image::{Rgb as ImageRgb, RgbImage};

use crate::raster::{PixelTarget, Rgb, from_rgb, to_rgb};

/// The in-memory image that gets exported.
///
/// This is the source of truth for the dropper and for PNG export.
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    image: RgbImage,
}

impl RasterBuffer {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, ImageRgb(to_rgb(background))),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

impl PixelTarget for RasterBuffer {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn get(&self, x: u32, y: u32) -> Rgb {
        self.image.get_pixel(x, y).0
    }

    fn put(&mut self, x: u32, y: u32, rgb: Rgb) {
        self.image.put_pixel(x, y, ImageRgb(rgb));
    }
}

/// The pixels shown on screen, uploaded to a texture on demand
pub struct DisplayCanvas {
    image: ColorImage,
    texture: Option<TextureHandle>,
    dirty: bool,
}

// Custom Debug implementation to keep the pixel data out of log output
impl std::fmt::Debug for DisplayCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayCanvas")
            .field("size", &self.image.size)
            .field("has_texture", &self.texture.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl DisplayCanvas {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            image: ColorImage::new([width as usize, height as usize], from_rgb(to_rgb(background))),
            texture: None,
            dirty: true,
        }
    }

    /// Whether the on-screen texture lags behind the pixels
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Upload pending changes and return the texture to paint with
    pub fn texture_id(&mut self, ctx: &Context) -> TextureId {
        match &mut self.texture {
            Some(handle) if self.dirty => {
                handle.set(self.image.clone(), TextureOptions::NEAREST);
            }
            Some(_) => {}
            None => {
                log::debug!("Creating canvas texture {:?}", self.image.size);
                self.texture = Some(ctx.load_texture(
                    "canvas",
                    self.image.clone(),
                    TextureOptions::NEAREST,
                ));
            }
        }
        self.dirty = false;

        match &self.texture {
            Some(handle) => handle.id(),
            None => TextureId::default(),
        }
    }
}

impl PixelTarget for DisplayCanvas {
    fn width(&self) -> u32 {
        self.image.size[0] as u32
    }

    fn height(&self) -> u32 {
        self.image.size[1] as u32
    }

    fn get(&self, x: u32, y: u32) -> Rgb {
        to_rgb(self.image.pixels[y as usize * self.image.size[0] + x as usize])
    }

    fn put(&mut self, x: u32, y: u32, rgb: Rgb) {
        let index = y as usize * self.image.size[0] + x as usize;
        self.image.pixels[index] = from_rgb(rgb);
        self.dirty = true;
    }
}
