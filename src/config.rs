//! Compile-time defaults. Nothing is read from disk and nothing persists.

use palette::Srgb;

/// Smallest global smoothing window offered by the slider.
pub const SMOOTHING_WINDOW_MIN: usize = 1;
/// Largest global smoothing window offered by the slider.
pub const SMOOTHING_WINDOW_MAX: usize = 20;
/// Window used until the user moves the slider (no smoothing).
pub const SMOOTHING_WINDOW_DEFAULT: usize = 1;

/// Every chart is drawn as a square of this many logical pixels.
pub const CHART_SIZE: f32 = 800.0;

/// Initial and minimum window sizes.
pub const WINDOW_SIZE: [f32; 2] = [1400.0, 900.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [700.0, 500.0];

pub const APP_TITLE: &str = "CSV Plotter";

/// Plotly's qualitative palette, cycled by first-seen source order.
pub const QUALITATIVE_PALETTE: [Srgb<u8>; 10] = [
    Srgb::new(0x63, 0x6E, 0xFA),
    Srgb::new(0xEF, 0x55, 0x3B),
    Srgb::new(0x00, 0xCC, 0x96),
    Srgb::new(0xAB, 0x63, 0xFA),
    Srgb::new(0xFF, 0xA1, 0x5A),
    Srgb::new(0x19, 0xD3, 0xF3),
    Srgb::new(0xFF, 0x66, 0x92),
    Srgb::new(0xB6, 0xE8, 0x80),
    Srgb::new(0xFF, 0x97, 0xFF),
    Srgb::new(0xFE, 0xCB, 0x52),
];
