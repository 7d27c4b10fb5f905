//! Downloads-by-version donut chart
//!
//! Significant versions get their own slice; everything below the threshold
//! is folded into a gray "Others" slice. The donut hole carries the grand
//! total.

use crate::renderer::draw_empty_placeholder;
use crate::{pie_series, AggregateTotals, GraphConfig, GraphRenderer, GraphType, StyleConfig};
use async_trait::async_trait;
use modstats_common::{format_count, Result};
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::info;

/// Fill color of the folded "Others" slice
const OTHERS_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Donut chart of download shares per significant version
#[derive(Debug)]
pub struct DownloadsPieChart {
    slices: Vec<(String, u64)>,
    has_others: bool,
    grand_total: u64,
}

impl DownloadsPieChart {
    /// Build the chart data from aggregated totals.
    ///
    /// When every version is below the threshold the chart is a single
    /// "Others" slice covering the grand total.
    pub fn from_totals(totals: &AggregateTotals, threshold: u64) -> Self {
        let series = pie_series(totals, threshold);
        let mut slices = series.significant;
        let has_others = series.others_total > 0;
        if has_others {
            slices.push(("Others".to_string(), series.others_total));
        }

        Self {
            slices,
            has_others,
            grand_total: totals.grand_total(),
        }
    }

    /// Build the chart together with a pie-typed config
    pub fn with_config(
        totals: &AggregateTotals,
        threshold: u64,
        width: u32,
        height: u32,
    ) -> (Self, GraphConfig) {
        let chart = Self::from_totals(totals, threshold);
        let config = GraphConfig {
            graph_type: GraphType::Pie,
            title: "Total Downloads by Version".to_string(),
            width,
            height,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        };
        (chart, config)
    }

    /// One fill color per slice, palette cycled, gray for "Others"
    fn slice_colors(&self, config: &GraphConfig) -> Vec<RGBColor> {
        let palette = self.get_colors(&config.style.color_scheme);
        let mut colors: Vec<RGBColor> = self
            .slices
            .iter()
            .enumerate()
            .map(|(i, _)| palette[i % palette.len()])
            .collect();
        if self.has_others {
            if let Some(last) = colors.last_mut() {
                *last = OTHERS_COLOR;
            }
        }
        colors
    }
}

#[async_trait]
impl GraphRenderer for DownloadsPieChart {
    async fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let bg_color = self.get_background_color(config);
        root.fill(&bg_color)?;
        let text_color = self.get_text_color(config);

        if self.slices.is_empty() {
            draw_empty_placeholder(&root, config, &text_color)?;
            root.present()?;
            info!("Rendered empty pie chart placeholder to {}", path.display());
            return Ok(());
        }

        let title_style = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        )
            .into_font()
            .color(&text_color);
        let area = root.titled(&config.title, title_style)?;

        let (area_width, area_height) = area.dim_in_pixel();
        let center = ((area_width / 2) as i32, (area_height / 2) as i32);
        let radius = f64::from(area_width.min(area_height)) * 0.35;

        let sizes: Vec<f64> = self.slices.iter().map(|(_, count)| *count as f64).collect();
        let labels: Vec<String> = self.slices.iter().map(|(version, _)| version.clone()).collect();
        let colors = self.slice_colors(config);

        let label_font = (
            config.style.axis_font.family.as_str(),
            config.style.axis_font.size,
        )
            .into_font()
            .color(&text_color);
        let percentage_font = (
            config.style.axis_font.family.as_str(),
            config.style.axis_font.size,
        )
            .into_font()
            .color(&text_color);

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.donut_hole(radius * 0.5);
        pie.label_style(label_font);
        pie.percentages(percentage_font);
        area.draw(&pie)?;

        // Grand total in the donut hole
        let center_style = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        )
            .into_font()
            .color(&text_color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(
            format!("{} Downloads", format_count(self.grand_total)),
            center,
            center_style,
        ))?;

        root.present()?;
        info!("Successfully rendered pie chart to {}", path.display());
        Ok(())
    }
}
