//! Graph rendering trait and shared styling helpers

use crate::{ColorScheme, GraphConfig, StyleConfig};
use modstats_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Trait for rendering graphs with shared styling behavior
#[async_trait::async_trait]
pub trait GraphRenderer {
    /// Render a graph to an image file
    async fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()>;

    /// Get the default style configuration for this renderer
    fn default_style(&self) -> StyleConfig {
        StyleConfig::default()
    }

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
            ],
            ColorScheme::Custom(colors) => colors
                .iter()
                .map(|color_str| self.parse_color(color_str))
                .collect(),
        }
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config (dark theme default)
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(0, 0, 0))
    }

    /// Get text color from style config
    fn get_text_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .text_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(255, 255, 255))
    }
}

/// Draw the placeholder used when a run aggregates zero totals.
///
/// An empty aggregation is a soft condition: the chart files must still be
/// produced, just with a label instead of data.
pub(crate) fn draw_empty_placeholder<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &GraphConfig,
    text_color: &RGBColor,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let style = (
        config.style.title_font.family.as_str(),
        config.style.title_font.size,
    )
        .into_font()
        .color(text_color)
        .pos(Pos::new(HPos::Center, VPos::Center));

    let (width, height) = root.dim_in_pixel();
    root.draw(&Text::new(
        "No download data",
        ((width / 2) as i32, (height / 2) as i32),
        style,
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRenderer;

    #[async_trait::async_trait]
    impl GraphRenderer for MockRenderer {
        async fn render_to_file(&self, _config: &GraphConfig, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_palette() {
        let renderer = MockRenderer;
        let colors = renderer.get_colors(&ColorScheme::Default);
        assert!(!colors.is_empty());
        assert_eq!(colors[0], RGBColor(31, 119, 180));
    }

    #[test]
    fn test_custom_color_scheme() {
        let renderer = MockRenderer;
        let scheme = ColorScheme::Custom(vec![
            "#FF0000".to_string(),
            "#00FF00".to_string(),
            "#0000FF".to_string(),
        ]);
        let colors = renderer.get_colors(&scheme);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], RGBColor(255, 0, 0));
        assert_eq!(colors[1], RGBColor(0, 255, 0));
        assert_eq!(colors[2], RGBColor(0, 0, 255));
    }

    #[test]
    fn test_color_parsing() {
        let renderer = MockRenderer;
        assert_eq!(renderer.parse_color("#1F77B4"), RGBColor(31, 119, 180));
        assert_eq!(renderer.parse_color("#ffffff"), RGBColor(255, 255, 255));

        // Invalid colors default to black
        assert_eq!(renderer.parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(renderer.parse_color("#ZZ0000"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_dark_theme_defaults() {
        let renderer = MockRenderer;
        let config = GraphConfig::default();

        assert_eq!(renderer.get_background_color(&config), RGBColor(0, 0, 0));
        assert_eq!(renderer.get_text_color(&config), RGBColor(255, 255, 255));
    }

    #[test]
    fn test_style_overrides() {
        let renderer = MockRenderer;
        let mut config = GraphConfig::default();
        config.style.background_color = Some("#112233".to_string());
        config.style.text_color = Some("#AABBCC".to_string());

        assert_eq!(renderer.get_background_color(&config), RGBColor(17, 34, 51));
        assert_eq!(renderer.get_text_color(&config), RGBColor(170, 187, 204));
    }
}
