//! Built-in reference color table

use crate::palette::{ReferenceColor, Rgb};

/// Default named colors, in lookup priority order
pub const DEFAULT_COLORS: [(&str, Rgb); 36] = [
    ("Red", Rgb::new(255, 0, 0)),
    ("Green", Rgb::new(0, 255, 0)),
    ("Blue", Rgb::new(0, 0, 255)),
    ("Yellow", Rgb::new(255, 255, 0)),
    ("Cyan", Rgb::new(0, 255, 255)),
    ("Magenta", Rgb::new(255, 0, 255)),
    ("White", Rgb::new(255, 255, 255)),
    ("Black", Rgb::new(0, 0, 0)),
    ("Gray", Rgb::new(128, 128, 128)),
    ("Orange", Rgb::new(255, 165, 0)),
    ("Pink", Rgb::new(255, 192, 203)),
    ("Purple", Rgb::new(128, 0, 128)),
    ("Brown", Rgb::new(139, 69, 19)),
    ("Lime", Rgb::new(50, 205, 50)),
    ("Teal", Rgb::new(0, 128, 128)),
    ("Maroon", Rgb::new(128, 0, 0)),
    ("Olive", Rgb::new(128, 128, 0)),
    ("Navy", Rgb::new(0, 0, 128)),
    ("Gold", Rgb::new(255, 215, 0)),
    ("Beige", Rgb::new(245, 245, 220)),
    ("Crimson", Rgb::new(220, 20, 60)),
    ("Azure", Rgb::new(0, 127, 255)),
    ("Burgundy", Rgb::new(128, 0, 32)),
    ("Charcoal", Rgb::new(54, 69, 79)),
    ("Champagne", Rgb::new(247, 231, 206)),
    ("Emerald", Rgb::new(80, 200, 120)),
    ("Fuchsia", Rgb::new(255, 0, 255)), // same as Magenta, never reported
    ("Indigo", Rgb::new(75, 0, 130)),
    ("Lavender", Rgb::new(230, 230, 250)),
    ("Mustard", Rgb::new(255, 219, 88)),
    ("Peach", Rgb::new(255, 229, 180)),
    ("Salmon", Rgb::new(250, 128, 114)),
    ("Sapphire", Rgb::new(15, 82, 186)),
    ("Silver", Rgb::new(192, 192, 192)),
    ("Tan", Rgb::new(210, 180, 140)),
    ("Turquoise", Rgb::new(64, 224, 208)),
];

/// The built-in palette as an owned list, ready for [`crate::palette::build_palette`]
pub fn default_palette() -> Vec<ReferenceColor> {
    DEFAULT_COLORS
        .iter()
        .map(|&(name, rgb)| ReferenceColor::new(name, rgb))
        .collect()
}
