//! Color palettes
//!
//! RdYlGn is the ColorBrewer diverging scale (red = low, yellow = middle,
//! green = high). The classifier picks the scale with `bin_count + 4` entries
//! and only uses its middle slice, so the extremes never show up in a table.

use serde::Serialize;
use std::fmt;

/// Smallest RdYlGn scale shipped
const MIN_SCALE: usize = 5;
/// Largest RdYlGn scale shipped
const MAX_SCALE: usize = 11;

/// Bin counts the classifier can color (`bin_count + 4` must be a shipped scale)
pub const MIN_BINS: usize = MIN_SCALE - 4;
pub const MAX_BINS: usize = MAX_SCALE - 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// `#rrggbb`
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// CSS functional notation, `rgb(r, g, b)`
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

const RD_YL_GN_5: [Rgb; 5] = [
    Rgb(215, 25, 28),
    Rgb(253, 174, 97),
    Rgb(255, 255, 191),
    Rgb(166, 217, 106),
    Rgb(26, 150, 65),
];

const RD_YL_GN_6: [Rgb; 6] = [
    Rgb(215, 48, 39),
    Rgb(252, 141, 89),
    Rgb(254, 224, 139),
    Rgb(217, 239, 139),
    Rgb(145, 207, 96),
    Rgb(26, 152, 80),
];

const RD_YL_GN_7: [Rgb; 7] = [
    Rgb(215, 48, 39),
    Rgb(252, 141, 89),
    Rgb(254, 224, 139),
    Rgb(255, 255, 191),
    Rgb(217, 239, 139),
    Rgb(145, 207, 96),
    Rgb(26, 152, 80),
];

const RD_YL_GN_8: [Rgb; 8] = [
    Rgb(215, 48, 39),
    Rgb(244, 109, 67),
    Rgb(253, 174, 97),
    Rgb(254, 224, 139),
    Rgb(217, 239, 139),
    Rgb(166, 217, 106),
    Rgb(102, 189, 99),
    Rgb(26, 152, 80),
];

const RD_YL_GN_9: [Rgb; 9] = [
    Rgb(215, 48, 39),
    Rgb(244, 109, 67),
    Rgb(253, 174, 97),
    Rgb(254, 224, 139),
    Rgb(255, 255, 191),
    Rgb(217, 239, 139),
    Rgb(166, 217, 106),
    Rgb(102, 189, 99),
    Rgb(26, 152, 80),
];

const RD_YL_GN_10: [Rgb; 10] = [
    Rgb(165, 0, 38),
    Rgb(215, 48, 39),
    Rgb(244, 109, 67),
    Rgb(253, 174, 97),
    Rgb(254, 224, 139),
    Rgb(217, 239, 139),
    Rgb(166, 217, 106),
    Rgb(102, 189, 99),
    Rgb(26, 152, 80),
    Rgb(0, 104, 55),
];

const RD_YL_GN_11: [Rgb; 11] = [
    Rgb(165, 0, 38),
    Rgb(215, 48, 39),
    Rgb(244, 109, 67),
    Rgb(253, 174, 97),
    Rgb(254, 224, 139),
    Rgb(255, 255, 191),
    Rgb(217, 239, 139),
    Rgb(166, 217, 106),
    Rgb(102, 189, 99),
    Rgb(26, 152, 80),
    Rgb(0, 104, 55),
];

/// RdYlGn scale with `len` colors, if shipped
pub fn rd_yl_gn(len: usize) -> Option<&'static [Rgb]> {
    match len {
        5 => Some(&RD_YL_GN_5),
        6 => Some(&RD_YL_GN_6),
        7 => Some(&RD_YL_GN_7),
        8 => Some(&RD_YL_GN_8),
        9 => Some(&RD_YL_GN_9),
        10 => Some(&RD_YL_GN_10),
        11 => Some(&RD_YL_GN_11),
        _ => None,
    }
}

pub fn supports_bin_count(bin_count: usize) -> bool {
    (MIN_BINS..=MAX_BINS).contains(&bin_count)
}

/// Plotly's default qualitative sequence, used for chart series
pub const QUALITATIVE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Series color for the n-th team, cycling through the sequence
pub fn series_color(index: usize) -> &'static str {
    QUALITATIVE[index % QUALITATIVE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_bin_count_has_a_scale() {
        for bins in MIN_BINS..=MAX_BINS {
            let scale = rd_yl_gn(bins + 4).unwrap();
            assert_eq!(scale.len(), bins + 4);
        }
        assert!(rd_yl_gn(4).is_none());
        assert!(rd_yl_gn(12).is_none());
    }

    #[test]
    fn test_odd_scales_center_on_neutral_yellow() {
        for len in [5, 7, 9, 11] {
            let scale = rd_yl_gn(len).unwrap();
            assert_eq!(scale[len / 2], Rgb(255, 255, 191));
        }
    }

    #[test]
    fn test_rgb_formats() {
        assert_eq!(Rgb(254, 224, 139).to_string(), "rgb(254,224,139)");
        assert_eq!(Rgb(26, 152, 80).hex(), "#1a9850");
    }

    #[test]
    fn test_series_color_cycles() {
        assert_eq!(series_color(0), "#636EFA");
        assert_eq!(series_color(10), "#636EFA");
        assert_eq!(series_color(11), "#EF553B");
    }
}
