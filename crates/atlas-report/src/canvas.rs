//! The abstract raster capability the summary layout draws onto.
//!
//! Keeping the drawing surface behind a trait lets tests assert the layout
//! with a recording canvas instead of decoding pixels.

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Color {
  pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

/// A fixed-size drawing surface.
///
/// Coordinates are top-left origin. Drawing outside the surface clips
/// silently. Text is drawn with its top-left corner at `(x, y)`; callers
/// centre or right-align via [`crate::font::text_width`].
pub trait Canvas {
  fn width(&self) -> u32;
  fn height(&self) -> u32;

  fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color);

  /// Horizontal rule of the given thickness.
  fn hline(&mut self, x0: i32, x1: i32, y: i32, thickness: u32, color: Color);

  /// Draw `text` with the embedded bitmap font at integer `scale`.
  fn text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Color);
}
