//! Application theming

use egui::{Color32, Visuals};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub surface: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    /// Title color while a title sits in its switched (mid-flip) state
    pub accent: Color32,
    /// Cover overlay fill
    pub cover: Color32,
    pub error: Color32,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(13, 13, 13),
            surface: Color32::from_rgb(24, 24, 24),
            text: Color32::from_rgb(235, 233, 226),
            text_secondary: Color32::from_rgb(130, 128, 120),
            accent: Color32::from_rgb(199, 164, 108),
            cover: Color32::from_rgb(222, 219, 210),
            error: Color32::from_rgb(220, 80, 80),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(244, 242, 236),
            surface: Color32::from_rgb(252, 251, 248),
            text: Color32::from_rgb(26, 25, 22),
            text_secondary: Color32::from_rgb(120, 116, 105),
            accent: Color32::from_rgb(156, 110, 45),
            cover: Color32::from_rgb(26, 25, 22),
            error: Color32::from_rgb(200, 48, 48),
        }
    }

    /// Apply theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = if self.name == "dark" {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.extreme_bg_color = self.background;
        visuals.override_text_color = Some(self.text);

        visuals.widgets.noninteractive.bg_fill = self.surface;
        visuals.widgets.noninteractive.fg_stroke.color = self.text;

        visuals.widgets.hovered.bg_fill = self.accent.linear_multiply(0.3);
        visuals.widgets.hovered.fg_stroke.color = self.text;

        visuals.widgets.active.bg_fill = self.accent.linear_multiply(0.5);
        visuals.widgets.active.fg_stroke.color = self.text;

        style.visuals = visuals;
        ctx.set_style(style);
    }

    /// Get theme by name, with an optional accent override
    pub fn by_name(name: &str, accent: Option<&str>) -> Self {
        let mut theme = match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        };
        if let Some(hex) = accent {
            match Self::parse_color(hex) {
                Some(color) => theme.accent = color,
                None => tracing::warn!(hex, "invalid accent color, keeping theme default"),
            }
        }
        theme
    }

    /// Parse a hex color string
    pub fn parse_color(hex: &str) -> Option<Color32> {
        let hex = hex.trim_start_matches('#');

        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        } else if hex.len() == 8 {
            let a = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let r = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let g = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let b = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(Color32::from_rgba_unmultiplied(r, g, b, a))
        } else {
            None
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(
            Theme::parse_color("#c7a46c"),
            Some(Color32::from_rgb(0xc7, 0xa4, 0x6c))
        );
        assert_eq!(Theme::parse_color("c7a46c"), Theme::parse_color("#c7a46c"));
        assert_eq!(Theme::parse_color("#fff"), None);
    }

    #[test]
    fn test_by_name_with_accent_override() {
        let theme = Theme::by_name("light", Some("#112233"));
        assert_eq!(theme.name, "light");
        assert_eq!(theme.accent, Color32::from_rgb(0x11, 0x22, 0x33));

        let fallback = Theme::by_name("no-such-theme", Some("bogus"));
        assert_eq!(fallback.name, "dark");
        assert_eq!(fallback.accent, Theme::dark().accent);
    }
}
