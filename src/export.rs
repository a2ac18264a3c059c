use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

use crate::error::{PaintError, PaintResult};

/// Append `.png` unless the path already ends with it (case-insensitive)
pub fn png_path(path: &Path) -> PathBuf {
    let has_png = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);

    if has_png {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".png");
        PathBuf::from(name)
    }
}

/// Encode `image` as PNG at `path` (with the extension fixed up) and
/// return the path that was written
pub fn save_png(image: &RgbImage, path: &Path) -> PaintResult<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(PaintError::EmptyPath);
    }

    let path = png_path(path);
    let file = File::create(&path).map_err(|source| PaintError::Io {
        path: path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    image.write_to(&mut writer, ImageFormat::Png)?;
    writer.flush().map_err(|source| PaintError::Io {
        path: path.clone(),
        source,
    })?;

    log::info!("Saved {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(path)
}
