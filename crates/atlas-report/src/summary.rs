//! The fixed-layout summary report.
//!
//! Proportions mirror the artifact consumers already expect: 800x600, a blue
//! header band, a total-count line, the top-five GDP ranking, and a footer
//! with the last-refresh timestamp. Positions are absolute; keep them stable.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
  Result,
  canvas::{Canvas, Color},
  font,
  png::PngCanvas,
};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

const WHITE: Color = Color::new(255, 255, 255);
const PRIMARY: Color = Color::new(41, 128, 185);
const SECONDARY: Color = Color::new(52, 73, 94);
const ACCENT: Color = Color::new(46, 204, 113);
const TEXT: Color = Color::new(44, 62, 80);

const SCALE: u32 = 2;

/// Everything the report shows. `top` is expected to arrive ranked —
/// highest GDP first, at most five entries.
#[derive(Debug, Clone)]
pub struct Summary {
  pub total_countries: u64,
  pub top:             Vec<(String, f64)>,
  pub last_refresh:    Option<DateTime<Utc>>,
}

/// Render `summary` onto any canvas.
pub fn render(summary: &Summary, canvas: &mut impl Canvas) {
  let width = canvas.width() as i32;
  let height = canvas.height() as i32;

  canvas.fill_rect(0, 0, canvas.width(), canvas.height(), WHITE);

  // Header band with centred title.
  canvas.fill_rect(0, 0, canvas.width(), 100, PRIMARY);
  text_centered(canvas, width / 2, 50, "Countries Summary Report", WHITE);

  let mut y = 130;
  canvas.text(
    50,
    y,
    &format!("Total Countries: {}", summary.total_countries),
    SCALE,
    ACCENT,
  );

  y += 60;
  canvas.text(50, y, "Top 5 Countries by GDP:", SCALE, SECONDARY);

  y += 40;
  for (rank, (name, gdp)) in summary.top.iter().take(5).enumerate() {
    canvas.text(70, y, &format!("{}. {name}", rank + 1), SCALE, TEXT);
    canvas.text(500, y, &format_gdp(*gdp), SCALE, PRIMARY);
    y += 35;
  }

  let footer = match summary.last_refresh {
    Some(ts) => format!(
      "Last Refreshed: {}",
      ts.to_rfc3339_opts(SecondsFormat::Micros, true)
    ),
    None => "Last Refreshed: Never".to_string(),
  };
  text_centered(canvas, width / 2, height - 60, &footer, SECONDARY);

  canvas.hline(50, width - 50, height - 40, 2, PRIMARY);
}

/// Render and atomically write the PNG artifact at `path`.
pub fn write_summary(summary: &Summary, path: &Path) -> Result<()> {
  let mut canvas = PngCanvas::new(WIDTH, HEIGHT, WHITE);
  render(summary, &mut canvas);
  canvas.save_atomic(path)
}

/// `$1,234,567.89`, or `N/A` for a zero (or otherwise unusable) value.
pub fn format_gdp(gdp: f64) -> String {
  if !gdp.is_finite() || gdp <= 0.0 {
    return "N/A".to_string();
  }

  let fixed = format!("{gdp:.2}");
  let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));

  let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
  for (i, c) in int_part.chars().enumerate() {
    if i > 0 && (int_part.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }

  format!("${grouped}.{frac_part}")
}

fn text_centered(
  canvas: &mut impl Canvas,
  cx: i32,
  cy: i32,
  text: &str,
  color: Color,
) {
  let w = font::text_width(text, SCALE) as i32;
  let h = (font::HEIGHT * SCALE) as i32;
  canvas.text(cx - w / 2, cy - h / 2, text, SCALE, color);
}
