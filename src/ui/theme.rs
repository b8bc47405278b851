//! Color schemes and ANSI escape sequence generation.
//!
//! Four Catppuccin flavours are compiled in (`catppuccin-mocha` is the
//! default); a custom scheme can be loaded from a TOML file with the same
//! shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_border = "#89b4fa"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! accent = "#cba6f7"
//! error_fg = "#f38ba8"
//! success_fg = "#a6e3a1"
//! link_fg = "#74c7ec"
//! ```

use crate::domain::{Result, ZsfileError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bg: Option<String>,

    /// Selected result row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, placeholders, disabled controls.
    pub text_dim: String,
    pub border: String,
    /// Frame of the focused input box.
    pub input_border: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    /// Active tab, selected source, enabled controls.
    pub accent: String,
    pub error_fg: String,
    /// Copy confirmation.
    pub success_fg: String,
    /// URLs in the detail view.
    pub link_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZsfileError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ZsfileError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ZsfileError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; malformed values render as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(255);
        (channel(0), channel(2), channel(4))
    }

    /// 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}
