//! Object and guide colors.
//!
//! Single source of truth for both render surfaces: the raster canvas uses
//! the [`tiny_skia::Color`] values, the print document the hex strings, so
//! an object is always the same color on screen and on paper. Object roles
//! are recognized by substring on the lowercased name, so "Garden Shed"
//! draws in the shed color.

use tiny_skia::Color;

const HOUSE_HEX: &str = "#3380E6";
const SHED_HEX: &str = "#804D1A";
const WELL_HEX: &str = "#00B300";
const SEPTIC_HEX: &str = "#B30000";
const FALLBACK_HEX: &str = "#808080";

/// Hex fill color for a named object.
pub fn hex_for_object(name: &str) -> &'static str {
    let name = name.to_lowercase();
    if name.contains("house") {
        HOUSE_HEX
    } else if name.contains("shed") {
        SHED_HEX
    } else if name.contains("well") {
        WELL_HEX
    } else if name.contains("septic") {
        SEPTIC_HEX
    } else {
        FALLBACK_HEX
    }
}

/// Raster fill color for a named object.
pub fn color_for_object(name: &str) -> Color {
    from_hex(hex_for_object(name))
}

pub fn background_color() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

pub fn boundary_color() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}

pub fn grid_color() -> Color {
    Color::from_rgba8(238, 238, 238, 255)
}

pub fn axis_label_color() -> Color {
    Color::from_rgba8(68, 68, 68, 255)
}

pub fn guide_color() -> Color {
    Color::from_rgba8(191, 191, 191, 255)
}

pub fn guide_label_color() -> Color {
    Color::from_rgba8(102, 102, 102, 255)
}

pub fn object_label_color() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

/// Hex stroke/label colors used by the print document.
pub const GUIDE_HEX: &str = "#BFBFBF";
pub const GUIDE_LABEL_HEX: &str = "#666666";
pub const GRID_HEX: &str = "#EEEEEE";
pub const AXIS_LABEL_HEX: &str = "#444444";
pub const BOUNDARY_HEX: &str = "#000000";

fn from_hex(hex: &str) -> Color {
    let s = hex.trim_start_matches('#');
    if s.len() != 6 {
        return Color::from_rgba8(128, 128, 128, 255);
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).unwrap_or(128);
    Color::from_rgba8(channel(0), channel(2), channel(4), 255)
}
