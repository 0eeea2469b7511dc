//! Fill colors: the base palette and brightness adjustment.

use std::fmt::Write;

use crate::domain::error::DomainError;

/// Default base colors for children of page roots.
///
/// Picked for distinguishability (95% accessibility contrast ratio set from
/// <https://sashamaps.net/docs/resources/20-colors/>).
pub const DEFAULT_COLORS: [&str; 19] = [
    "#e6194B", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6",
    "#bfef45", "#fabed4", "#469990", "#dcbeff", "#9A6324", "#fffac8", "#800000", "#aaffc3",
    "#808000", "#ffd8b1", "#000075",
];

/// Ordered, non-empty list of base colors. Selection cycles through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Palette {
    /// Returns `None` for an empty color list.
    pub fn new(colors: Vec<String>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    /// Color for the given sibling position, wrapping around the palette.
    pub fn pick(&self, sibling_index: usize) -> &str {
        &self.colors[sibling_index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Lighten (positive offset) or darken (negative offset) a `#RRGGBB` color.
///
/// Each channel gets the offset added and is clamped to `0..=255`. The
/// result is always lowercase.
pub fn adjust_brightness(hex_color: &str, brightness_offset: i32) -> Result<String, DomainError> {
    if hex_color.len() != 7 {
        return Err(DomainError::invalid_color(hex_color, "expected 7 characters"));
    }
    let digits = hex_color
        .strip_prefix('#')
        .ok_or_else(|| DomainError::invalid_color(hex_color, "missing '#' prefix"))?;

    let mut out = String::with_capacity(7);
    out.push('#');
    for start in [0, 2, 4] {
        let channel = digits
            .get(start..start + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| DomainError::invalid_color(hex_color, "not a hex digit pair"))?;
        let adjusted = i32::from(channel)
            .saturating_add(brightness_offset)
            .clamp(0, 255);
        // writing to a String cannot fail
        let _ = write!(out, "{adjusted:02x}");
    }
    Ok(out)
}

/// Brightness offset for a node at `level` inside a page of `tree_depth`.
///
/// Grows linearly with the level so deeper nodes get lighter; a zero depth
/// yields no offset.
pub fn brightness_offset(max_brightness_offset: i32, tree_depth: usize, level: usize) -> i32 {
    if tree_depth == 0 {
        return 0;
    }
    (f64::from(max_brightness_offset) / tree_depth as f64 * level as f64).floor() as i32
}
