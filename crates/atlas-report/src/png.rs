//! [`PngCanvas`] — the production raster, backed by `image::RgbImage`.

use std::{fs, path::Path};

use image::RgbImage;

use crate::{
  Result,
  canvas::{Canvas, Color},
  font,
};

pub struct PngCanvas {
  img: RgbImage,
}

impl PngCanvas {
  /// A canvas of the given size, flooded with `background`.
  pub fn new(width: u32, height: u32, background: Color) -> Self {
    let pixel = image::Rgb([background.r, background.g, background.b]);
    Self { img: RgbImage::from_pixel(width, height, pixel) }
  }

  fn put(&mut self, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
      return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < self.img.width() && y < self.img.height() {
      self.img.put_pixel(x, y, image::Rgb([color.r, color.g, color.b]));
    }
  }

  /// Encode as PNG and atomically replace whatever lives at `path`.
  ///
  /// The image is written to a sibling temp file first and renamed into
  /// place, so a concurrent reader never sees a torn artifact.
  pub fn save_atomic(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("png.tmp");
    self.img.save_with_format(&tmp, image::ImageFormat::Png)?;
    fs::rename(&tmp, path)?;
    Ok(())
  }
}

impl Canvas for PngCanvas {
  fn width(&self) -> u32 { self.img.width() }

  fn height(&self) -> u32 { self.img.height() }

  fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
    for dy in 0..h as i32 {
      for dx in 0..w as i32 {
        self.put(x + dx, y + dy, color);
      }
    }
  }

  fn hline(&mut self, x0: i32, x1: i32, y: i32, thickness: u32, color: Color) {
    self.fill_rect(x0.min(x1), y, x0.abs_diff(x1) + 1, thickness, color);
  }

  fn text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Color) {
    let scale = scale.max(1) as i32;
    let mut pen_x = x;

    for c in text.chars() {
      let rows = font::glyph(c);
      for (row, bits) in rows.iter().enumerate() {
        for col in 0..5 {
          if bits & (0b10000 >> col) != 0 {
            let px = pen_x + col as i32 * scale;
            let py = y + row as i32 * scale;
            self.fill_rect(px, py, scale as u32, scale as u32, color);
          }
        }
      }
      pen_x += font::ADVANCE as i32 * scale;
    }
  }
}
