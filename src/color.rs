use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Fixed palettes
// ---------------------------------------------------------------------------

/// Bar colours of the ranking chart, one per rank.
pub const BAR_PALETTE: [&str; 10] = [
    "#00FFFF", "#FF00FF", "#FFA500", "#7FFF00", "#FF6347", "#ADFF2F", "#FFD700", "#00CED1",
    "#FF69B4", "#1E90FF",
];

/// Line colours of the trend chart, one per selected country.
pub const LINE_PALETTE: [&str; 10] = [
    "#00FFFF", "#FF00FF", "#FFA500", "#7FFF00", "#FF6347", "#ADFF2F", "#FF69B4", "#1E90FF",
    "#FFD700", "#00CED1",
];

/// Alpha of bar fills (border stays opaque).
pub const BAR_FILL_ALPHA: u8 = 0x80;
/// Alpha of the area under trend lines.
pub const LINE_FILL_ALPHA: u8 = 0x55;

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

/// Parse a `#rrggbb` / `#rgb` hex code. Unparseable codes fall back to gray.
pub fn hex_color(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("Invalid colour {hex:?}: {e}");
            Color32::GRAY
        }
    }
}

/// Colour at `index`, cycling through `palette`.
pub fn palette_color(palette: &[&str], index: usize) -> Color32 {
    if palette.is_empty() {
        return Color32::GRAY;
    }
    hex_color(palette[index % palette.len()])
}

/// Same colour with a different alpha.
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_codes() {
        assert_eq!(hex_color("#FFA500"), Color32::from_rgb(255, 165, 0));
        assert_eq!(hex_color("1E90FF"), Color32::from_rgb(30, 144, 255));
    }

    #[test]
    fn invalid_hex_falls_back_to_gray() {
        assert_eq!(hex_color("#nothex"), Color32::GRAY);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(palette_color(&BAR_PALETTE, 0), palette_color(&BAR_PALETTE, 10));
        assert_eq!(palette_color(&LINE_PALETTE, 1), Color32::from_rgb(255, 0, 255));
        assert_eq!(palette_color(&[], 3), Color32::GRAY);
    }

    #[test]
    fn every_palette_entry_parses() {
        for hex in BAR_PALETTE.iter().chain(LINE_PALETTE.iter()) {
            assert_ne!(hex_color(hex), Color32::GRAY, "{hex}");
        }
    }

    #[test]
    fn alpha_is_replaced() {
        let c = with_alpha(Color32::from_rgb(255, 0, 0), LINE_FILL_ALPHA);
        assert_eq!(c.a(), LINE_FILL_ALPHA);
    }
}
