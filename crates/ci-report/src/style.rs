//! Shared chart styling.
//!
//! Figure geometry follows the report style guide: 8.5 × 5.5 inches at
//! 300 dpi. Palette hexes are the established report colors.

use plotters::style::RGBColor;

/// Output bitmap size in pixels (8.5in × 5.5in at 300 dpi).
pub const FIG_SIZE: (u32, u32) = (2550, 1650);

/// Neighbourhoods / series where the subject business is present.
pub const SOC_BLUE: RGBColor = RGBColor(0x2E, 0x86, 0xAB);

/// Series without subject presence.
pub const NO_SOC_MAGENTA: RGBColor = RGBColor(0xA2, 0x3B, 0x72);

/// Subject markers on comparison charts.
pub const SOC_RED: RGBColor = RGBColor(0xE6, 0x39, 0x46);

/// Competitor markers on comparison charts.
pub const COMPETITOR_STEEL: RGBColor = RGBColor(0x45, 0x7B, 0x9D);

/// Downtown reference marker.
pub const DOWNTOWN_GOLD: RGBColor = RGBColor(0xFF, 0xD7, 0x00);

/// Caption font.
pub const CAPTION_FONT: (&str, u32) = ("sans-serif", 40);

/// Axis label font.
pub const LABEL_FONT: (&str, u32) = ("sans-serif", 24);
