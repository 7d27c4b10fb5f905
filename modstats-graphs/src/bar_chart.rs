//! Downloads-by-version bar chart

use crate::renderer::draw_empty_placeholder;
use crate::{bar_series, AggregateTotals, GraphConfig, GraphRenderer, GraphType, StyleConfig};
use async_trait::async_trait;
use modstats_common::{format_count, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Bar chart of total downloads for every version, ascending by version
#[derive(Debug)]
pub struct DownloadsBarChart {
    series: Vec<(String, u64)>,
}

impl DownloadsBarChart {
    /// Build the chart data from aggregated totals
    pub fn from_totals(totals: &AggregateTotals) -> Self {
        Self {
            series: bar_series(totals),
        }
    }

    /// Build the chart together with a config titled with the grand total
    pub fn with_config(
        totals: &AggregateTotals,
        width: u32,
        height: u32,
    ) -> (Self, GraphConfig) {
        let chart = Self::from_totals(totals);
        let config = GraphConfig {
            graph_type: GraphType::Bar,
            title: format!(
                "Total Downloads by Version ({} total downloads)",
                format_count(totals.grand_total())
            ),
            width,
            height,
            x_label: Some("Version".to_string()),
            y_label: Some("Downloads".to_string()),
            style: StyleConfig::default(),
        };
        (chart, config)
    }

    /// Y-axis upper bound with 10% headroom
    fn max_count(&self) -> f64 {
        self.series
            .iter()
            .map(|(_, count)| *count as f64)
            .fold(0.0, f64::max)
            .max(1.0)
            * 1.1
    }
}

#[async_trait]
impl GraphRenderer for DownloadsBarChart {
    async fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        let bg_color = self.get_background_color(config);
        root.fill(&bg_color)?;
        let text_color = self.get_text_color(config);

        if self.series.is_empty() {
            draw_empty_placeholder(&root, config, &text_color)?;
            root.present()?;
            info!("Rendered empty bar chart placeholder to {}", path.display());
            return Ok(());
        }

        let bar_count = self.series.len() as i32;
        let max_count = self.max_count();

        let title_style = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        )
            .into_font()
            .color(&text_color);
        let label_style = (
            config.style.axis_font.family.as_str(),
            config.style.axis_font.size,
        )
            .into_font()
            .color(&text_color);

        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_style)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(0i32..bar_count, 0f64..max_count)?;

        let series = &self.series;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Version"))
            .y_desc(config.y_label.as_deref().unwrap_or("Downloads"))
            .axis_style(&text_color)
            .label_style(label_style)
            .x_labels(series.len())
            .x_label_formatter(&|x| {
                series
                    .get(*x as usize)
                    .map(|(version, _)| version.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        let colors = self.get_colors(&config.style.color_scheme);
        let bar_color = colors.first().copied().unwrap_or(RGBColor(31, 119, 180));

        for (i, (_, count)) in self.series.iter().enumerate() {
            let i = i as i32;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(i, 0.0), (i + 1, *count as f64)],
                bar_color.filled(),
            )))?;
        }

        root.present()?;
        info!("Successfully rendered bar chart to {}", path.display());
        Ok(())
    }
}
