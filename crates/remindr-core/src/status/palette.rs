use serde::Serialize;

use super::DueStatus;
use crate::models::ThemeMode;

/// Alpha suffix applied to accent colors for row backgrounds (10% opacity).
const ROW_BACKGROUND_ALPHA: &str = "1A";

/// Named colors for one theme, as `#RRGGBB` hex strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub placeholder: &'static str,
    pub badge: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#F9FAFB",
    text: "#1F2937",
    primary: "#4F46E5",
    secondary: "#FACC15",
    success: "#10B981",
    error: "#EF4444",
    placeholder: "#C1C1C4",
    badge: "#EF4444",
};

const DARK: Palette = Palette {
    background: "#151718",
    text: "#ECEDEE",
    primary: "#4F46E5",
    secondary: "#FACC15",
    success: "#10B981",
    error: "#EF4444",
    placeholder: "#55565A",
    badge: "#EF4444",
};

/// Colors for one list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowStyle {
    /// `#RRGGBBAA` background
    pub background: String,
    /// `#RRGGBB` color for the due-date text
    pub text: &'static str,
}

impl Palette {
    #[must_use]
    pub const fn for_theme(theme: ThemeMode) -> Self {
        match theme {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }

    /// Accent color for a status, `None` for the default text color
    #[must_use]
    pub const fn accent(&self, status: DueStatus) -> Option<&'static str> {
        match status {
            DueStatus::Overdue => Some(self.error),
            DueStatus::DueSoon => Some(self.secondary),
            DueStatus::Completed => Some(self.success),
            DueStatus::Normal => None,
        }
    }

    /// Row background and due-date text color for a status
    #[must_use]
    pub fn row_style(&self, status: DueStatus) -> RowStyle {
        let accent = self.accent(status);
        RowStyle {
            background: format!("{}{ROW_BACKGROUND_ALPHA}", accent.unwrap_or(self.primary)),
            text: accent.unwrap_or(self.text),
        }
    }
}

impl RowStyle {
    /// Background composited over an opaque `base` color, for surfaces without alpha
    #[must_use]
    pub fn background_over(&self, base: &str) -> Option<(u8, u8, u8)> {
        let (r, g, b) = hex_to_rgb(&self.background)?;
        let alpha = self
            .background
            .strip_prefix('#')
            .and_then(|digits| digits.get(6..8))
            .map_or(Some(u8::MAX), |pair| u8::from_str_radix(pair, 16).ok())?;
        let (base_r, base_g, base_b) = hex_to_rgb(base)?;
        let mix = |top: u8, bottom: u8| {
            let alpha = u32::from(alpha);
            let value = (u32::from(top) * alpha + u32::from(bottom) * (255 - alpha) + 127) / 255;
            u8::try_from(value).unwrap_or(u8::MAX)
        };
        Some((mix(r, base_r), mix(g, base_g), mix(b, base_b)))
    }
}

/// Parse `#RRGGBB` (an optional alpha pair is ignored) into RGB components
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() < 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
