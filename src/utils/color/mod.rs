//! Color contrast helpers.
//!
//! Lane items draw white text on the participant's color; light catalogue
//! colors are darkened until that text stays readable.

use crate::models::color::RgbColor;

/// Minimum contrast ratio against white (WCAG large-text threshold).
pub const MIN_CONTRAST_TO_WHITE: f64 = 3.0;

const DARKEN_FACTOR: f64 = 0.9;
const MAX_DARKEN_STEPS: usize = 32;

fn channel_luminance(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance as defined by WCAG 2.x.
pub fn relative_luminance(color: RgbColor) -> f64 {
    0.2126 * channel_luminance(color.red)
        + 0.7152 * channel_luminance(color.green)
        + 0.0722 * channel_luminance(color.blue)
}

/// Contrast ratio between two colors, in `1.0..=21.0`.
pub fn contrast_ratio(a: RgbColor, b: RgbColor) -> f64 {
    let (la, lb) = (relative_luminance(a), relative_luminance(b));
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

pub fn contrast_to_white(color: RgbColor) -> f64 {
    contrast_ratio(color, RgbColor::new(255, 255, 255))
}

fn darken(color: RgbColor) -> RgbColor {
    let scale = |c: u8| (c as f64 * DARKEN_FACTOR).floor() as u8;
    RgbColor::new(scale(color.red), scale(color.green), scale(color.blue))
}

/// Background for an item so that white text on it stays legible.
pub fn legible_background(color: Option<RgbColor>) -> RgbColor {
    let mut current = color.unwrap_or_else(RgbColor::neutral);
    for _ in 0..MAX_DARKEN_STEPS {
        if contrast_to_white(current) >= MIN_CONTRAST_TO_WHITE {
            break;
        }
        current = darken(current);
    }
    current
}
