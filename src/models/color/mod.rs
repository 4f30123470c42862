// Color module
// RGB color triple carried by lanes, locations and catalogues

use serde::{Deserialize, Serialize};

use crate::models::CalendarError;

/// Plain 8-bit RGB color as delivered by the scheduling catalogues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Neutral gray used when a participant has no catalogue color.
    pub const fn neutral() -> Self {
        Self::new(0x75, 0x75, 0x75)
    }

    /// Parse a hex color string, optionally prefixed with '#'.
    ///
    /// # Examples
    /// ```
    /// use lane_calendar::models::color::RgbColor;
    /// let color = RgbColor::from_hex("#1E88E5").unwrap();
    /// assert_eq!(color, RgbColor::new(0x1E, 0x88, 0xE5));
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, CalendarError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || CalendarError::InvalidColor(hex.to_string());

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl From<RgbColor> for egui::Color32 {
    fn from(color: RgbColor) -> Self {
        egui::Color32::from_rgb(color.red, color.green, color.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_with_and_without_prefix() {
        assert_eq!(RgbColor::from_hex("#FF5500").unwrap(), RgbColor::new(255, 85, 0));
        assert_eq!(RgbColor::from_hex("ff5500").unwrap(), RgbColor::new(255, 85, 0));
    }

    #[test]
    fn test_parse_hex_rejects_short_and_garbage() {
        assert!(RgbColor::from_hex("#FFF").is_err());
        assert!(RgbColor::from_hex("#GG0000").is_err());
        assert!(RgbColor::from_hex("").is_err());
    }

    #[test]
    fn test_hex_round_trip_is_uppercase() {
        assert_eq!(RgbColor::new(0x1e, 0x88, 0xe5).to_hex(), "#1E88E5");
    }
}
