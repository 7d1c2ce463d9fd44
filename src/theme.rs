//! Theme colors for the UI, optionally overridden from
//! ~/.config/penna/theme.toml (flat `name = "#RRGGBB"` pairs).

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,        // Active borders, highlights
    pub accent_bright: Color, // Selected options, progress
    pub danger: Color,        // Blocked transitions, destructive prompts
    pub success: Color,       // Completed steps
    pub warning: Color,       // Status messages
    pub text: Color,          // Primary text
    pub text_dim: Color,      // Dimmed text, placeholders
    pub bg_selected: Color,   // Selection background
    pub inactive: Color,      // Inactive borders
    pub header: Color,        // Header text
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired fallback palette
        Self {
            accent: Color::Rgb(250, 179, 135),
            accent_bright: Color::Rgb(245, 194, 231),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(243, 139, 168),
        }
    }
}

impl Theme {
    /// Load theme, preferring the user's theme file
    pub fn load() -> Self {
        if let Some(theme) = Self::load_user_theme() {
            return theme;
        }
        Self::default()
    }

    /// Load color overrides from ~/.config/penna/theme.toml
    fn load_user_theme() -> Option<Self> {
        let theme_path = dirs::config_dir()?.join("penna/theme.toml");
        let content = fs::read_to_string(&theme_path).ok()?;
        let colors = Self::parse_theme_file(&content)?;

        if colors.is_empty() {
            return None;
        }

        let defaults = Self::default();
        let pick = |key: &str, fallback: Color| colors.get(key).copied().unwrap_or(fallback);

        Some(Self {
            accent: pick("accent", defaults.accent),
            accent_bright: pick("accent_bright", defaults.accent_bright),
            danger: pick("danger", defaults.danger),
            success: pick("success", defaults.success),
            warning: pick("warning", defaults.warning),
            text: pick("text", defaults.text),
            text_dim: pick("text_dim", defaults.text_dim),
            bg_selected: pick("bg_selected", defaults.bg_selected),
            inactive: pick("inactive", defaults.inactive),
            header: pick("header", defaults.header),
        })
    }

    /// Parse the flat `name = "#hexcolor"` table
    fn parse_theme_file(content: &str) -> Option<HashMap<String, Color>> {
        let table: HashMap<String, String> = toml::from_str(content).ok()?;
        let mut colors = HashMap::new();
        for (key, value) in table {
            if let Some(color) = Self::parse_hex_color(&value) {
                colors.insert(key, color);
            } else {
                tracing::warn!("Ignoring invalid theme color for '{}': {}", key, value);
            }
        }
        Some(colors)
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(
            Theme::parse_hex_color("#ffc107"),
            Some(Color::Rgb(255, 193, 7))
        );
        assert_eq!(Theme::parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("nope"), None);
    }

    #[test]
    fn theme_file_overrides_only_named_colors() {
        let colors =
            Theme::parse_theme_file("accent = \"#102030\"\ntext = \"#abc\"\n").unwrap();
        assert_eq!(colors.get("accent"), Some(&Color::Rgb(16, 32, 48)));
        assert_eq!(colors.get("text"), Some(&Color::Rgb(170, 187, 204)));
        assert!(!colors.contains_key("danger"));
    }
}
