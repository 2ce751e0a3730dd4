//! Theme management and ANSI escape sequence generation.
//!
//! Two palettes are built in: `mint` (default, mint on cream with pink
//! accents) and `night`. Custom palettes load from TOML files.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! title_fg = "#115e59"
//! accent_fg = "#f472b6"
//! text_normal = "#44403c"
//! text_dim = "#a8a29e"
//! quote_fg = "#0f766e"
//! border = "#fbcfe8"
//! disabled_fg = "#d6d3d1"
//! ```

use crate::domain::error::{JarError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions, as hex strings (e.g., "#f472b6").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Screen titles.
    pub title_fg: String,
    /// Hearts, buttons and the transformed text.
    pub accent_fg: String,
    /// Body text.
    pub text_normal: String,
    /// Secondary text: footers, dates, the crossed-out original.
    pub text_dim: String,
    /// Quotations.
    pub quote_fg: String,
    /// Separator lines.
    pub border: String,
    /// Commands that are currently unavailable.
    pub disabled_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name (`mint` or `night`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mint" => Some(Self::mint()),
            "night" => Some(Self::night()),
            _ => None,
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`JarError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| JarError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| JarError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    fn mint() -> Self {
        Self {
            name: "mint".to_string(),
            colors: ThemeColors {
                title_fg: "#115e59".to_string(),
                accent_fg: "#f472b6".to_string(),
                text_normal: "#44403c".to_string(),
                text_dim: "#a8a29e".to_string(),
                quote_fg: "#0f766e".to_string(),
                border: "#fbcfe8".to_string(),
                disabled_fg: "#d6d3d1".to_string(),
            },
        }
    }

    fn night() -> Self {
        Self {
            name: "night".to_string(),
            colors: ThemeColors {
                title_fg: "#99f6e4".to_string(),
                accent_fg: "#f9a8d4".to_string(),
                text_normal: "#e7e5e4".to_string(),
                text_dim: "#78716c".to_string(),
                quote_fg: "#5eead4".to_string(),
                border: "#44403c".to_string(),
                disabled_fg: "#57534e".to_string(),
            },
        }
    }

    /// Converts a hex color to an RGB tuple; white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use emotion_jar::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#f472b6"), "\u{1b}[38;2;244;114;182m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn italic() -> &'static str {
        "\u{001b}[3m"
    }

    #[must_use]
    pub const fn strikethrough() -> &'static str {
        "\u{001b}[9m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `mint` theme.
    fn default() -> Self {
        Self::mint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_is_none() {
        assert!(Theme::from_name("catppuccin").is_none());
        assert_eq!(Theme::from_name("night").unwrap().name, "night");
    }

    #[test]
    fn bad_hex_renders_white() {
        assert_eq!(Theme::fg("#12"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::fg("zzzzzz"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::fg("ééé"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn loads_custom_theme_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), theme);
    }

    #[test]
    fn unreadable_theme_file_is_theme_error() {
        let err = Theme::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, JarError::Theme(_)));
    }
}
