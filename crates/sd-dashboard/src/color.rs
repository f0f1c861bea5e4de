//! Color-by-magnitude for chart bars.
//!
//! Values are placed on one hue by lightness: the largest value is the
//! lightest shade, the smallest the darkest, everything else linear in
//! between.

/// Color for every bar when values cannot be told apart
pub const DEFAULT_BAR_COLOR: &str = "hsl(var(--chart-1))";
/// Fill of bars outside the selected month
pub const MUTED_BAR_COLOR: &str = "hsl(var(--muted))";

const HUE: u16 = 221;
const SATURATION: u8 = 83;
const DARKEST_LIGHTNESS: f64 = 30.0;
const LIGHTEST_LIGHTNESS: f64 = 75.0;

/// One fill per value, in input order.
pub fn magnitude_colors(values: &[f64]) -> Vec<String> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        });

    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return vec![DEFAULT_BAR_COLOR.to_string(); values.len()];
    }

    values
        .iter()
        .map(|&value| {
            let position = ((value - min) / range).clamp(0.0, 1.0);
            shade(DARKEST_LIGHTNESS + position * (LIGHTEST_LIGHTNESS - DARKEST_LIGHTNESS))
        })
        .collect()
}

fn shade(lightness: f64) -> String {
    format!("hsl({HUE} {SATURATION}% {lightness:.1}%)")
}

