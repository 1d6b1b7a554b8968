use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::routine::RoutineCategory;
use crate::model::task::Category;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub blue: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0E, 0x14, 0x20),
            text: Color::Rgb(0xC8, 0xD2, 0xE0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x3B, 0x82, 0xF6),
            dim: Color::Rgb(0x64, 0x74, 0x8B),
            red: Color::Rgb(0xEF, 0x44, 0x44),
            yellow: Color::Rgb(0xF5, 0x9E, 0x0B),
            green: Color::Rgb(0x10, 0xB9, 0x81),
            cyan: Color::Rgb(0x22, 0xD3, 0xEE),
            purple: Color::Rgb(0x8B, 0x5C, 0xF6),
            blue: Color::Rgb(0x3B, 0x82, 0xF6),
            selection_bg: Color::Rgb(0x1E, 0x29, 0x3B),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "cyan" => theme.cyan = color,
                    "purple" => theme.purple = color,
                    "blue" => theme.blue = color,
                    "selection_bg" => theme.selection_bg = color,
                    _ => {}
                }
            }
        }
        theme
    }

    /// Fixed accent color per task category
    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Work => Color::Rgb(0x3B, 0x82, 0xF6),
            Category::Personal => Color::Rgb(0x10, 0xB9, 0x81),
            Category::Health => Color::Rgb(0xEC, 0x48, 0x99),
            Category::Learning => Color::Rgb(0x8B, 0x5C, 0xF6),
            Category::Urgent => Color::Rgb(0xEF, 0x44, 0x44),
        }
    }

    /// Fixed accent color per routine category
    pub fn routine_color(&self, category: RoutineCategory) -> Color {
        match category {
            RoutineCategory::Focus => self.purple,
            RoutineCategory::Health => self.green,
            RoutineCategory::Break => self.yellow,
            RoutineCategory::Sleep => Color::Rgb(0x63, 0x66, 0xF1),
            RoutineCategory::Work => self.blue,
        }
    }

    /// Heatmap cell color for a completed-count bucket (0..=3)
    pub fn heat_color(&self, completed: u32) -> Color {
        match completed {
            0 => self.selection_bg,
            1 => Color::Rgb(0x0E, 0x63, 0x4B),
            2 => Color::Rgb(0x0F, 0x96, 0x6D),
            _ => Color::Rgb(0x10, 0xB9, 0x81),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn hex_override_applies() {
        let mut colors = HashMap::new();
        colors.insert("highlight".to_string(), "#FB4196".to_string());
        let theme = Theme::from_config(&UiConfig { colors });
        assert_eq!(theme.highlight, Color::Rgb(0xFB, 0x41, 0x96));
    }

    #[test]
    fn bad_hex_is_ignored() {
        let mut colors = HashMap::new();
        colors.insert("highlight".to_string(), "fuchsia".to_string());
        colors.insert("dim".to_string(), "#12".to_string());
        let theme = Theme::from_config(&UiConfig { colors });
        assert_eq!(theme.highlight, Theme::default().highlight);
        assert_eq!(theme.dim, Theme::default().dim);
    }
}
