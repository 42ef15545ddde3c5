use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: geography → Color32
// ---------------------------------------------------------------------------

/// One stable colour per geography, shared by both charts so the detail line
/// matches its marker in the scatterplot.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(geographies: &[String]) -> Self {
        let palette = generate_palette(geographies.len());
        let mapping = geographies
            .iter()
            .cloned()
            .zip(palette)
            .collect::<BTreeMap<String, Color32>>();

        ColorMap {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }

    pub fn color_for(&self, geography: &str) -> Color32 {
        self.mapping
            .get(geography)
            .copied()
            .unwrap_or(self.default_color)
    }
}
