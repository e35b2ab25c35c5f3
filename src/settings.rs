/// Sidebar display settings
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIDEBAR_WIDTH: u32 = 350;
pub const MIN_SIDEBAR_WIDTH: u32 = 250;
/// Fraction of the viewport the sidebar may cover at most
pub const MAX_SIDEBAR_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FontSize::Small => "font-small",
            FontSize::Medium => "font-medium",
            FontSize::Large => "font-large",
        }
    }
}

impl std::str::FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            _ => Err(format!("Unknown font size: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub font_size: FontSize,
    pub compact_mode: bool,
}

impl Settings {
    /// Classes applied to the sidebar content
    pub fn content_classes(&self) -> String {
        let mut classes = vec!["sidebar-content", self.font_size.css_class()];
        if self.compact_mode {
            classes.push("compact-mode");
        }
        classes.join(" ")
    }
}

/// Keep a sidebar width within its minimum and the viewport-relative maximum
pub fn clamp_sidebar_width(width: f64, viewport_width: f64) -> u32 {
    let max = (viewport_width * MAX_SIDEBAR_RATIO).max(MIN_SIDEBAR_WIDTH as f64);
    width.clamp(MIN_SIDEBAR_WIDTH as f64, max).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.font_size, FontSize::Medium);
        assert!(!settings.compact_mode);
    }

    #[test]
    fn test_partial_settings_merge_over_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"compactMode":true}"#).unwrap();
        assert_eq!(settings.font_size, FontSize::Medium);
        assert!(settings.compact_mode);
    }

    #[test]
    fn test_serialization_format() {
        let settings = Settings {
            font_size: FontSize::Large,
            compact_mode: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"fontSize":"large","compactMode":false}"#);
    }

    #[test]
    fn test_content_classes() {
        let settings = Settings {
            font_size: FontSize::Small,
            compact_mode: true,
        };
        assert_eq!(settings.content_classes(), "sidebar-content font-small compact-mode");
    }

    #[test]
    fn test_font_size_from_str() {
        assert_eq!("large".parse::<FontSize>(), Ok(FontSize::Large));
        assert!("huge".parse::<FontSize>().is_err());
    }

    #[test]
    fn test_clamp_sidebar_width() {
        assert_eq!(clamp_sidebar_width(100.0, 1000.0), MIN_SIDEBAR_WIDTH);
        assert_eq!(clamp_sidebar_width(400.0, 1000.0), 400);
        assert_eq!(clamp_sidebar_width(950.0, 1000.0), 900);
        // tiny viewports still allow the minimum
        assert_eq!(clamp_sidebar_width(400.0, 200.0), MIN_SIDEBAR_WIDTH);
    }
}
