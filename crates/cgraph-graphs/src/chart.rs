//! Weekly commit bar chart.

use crate::aggregator::WeeklyCommitCounts;
use crate::traits::GraphRenderer;
use async_trait::async_trait;
use cgraph_common::{CgraphError, Result};
use cgraph_config::OutputConfig;
use plotters::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// Where and how large to draw the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    /// Output PNG path.
    pub path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Caption above the plot.
    pub title: String,
}

impl From<&OutputConfig> for ChartConfig {
    fn from(output: &OutputConfig) -> Self {
        Self {
            path: output.path.clone(),
            width: output.width,
            height: output.height,
            title: output.title.clone(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

/// X-axis labels, one per week: `YYYY-MM` on the first week starting in a
/// month, blank elsewhere.
pub fn month_labels(counts: &WeeklyCommitCounts) -> Vec<String> {
    counts.weeks().map(|week| week.month_label()).collect()
}

/// Top of the y-axis: the largest count plus ten percent headroom, never zero.
pub const fn y_axis_upper(max_count: u64) -> u64 {
    max_count + max_count / 10 + 1
}

/// Bar chart of commits per week.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeeklyCommitChart;

impl WeeklyCommitChart {
    /// Creates the renderer.
    pub const fn new() -> Self {
        Self
    }

    fn draw(counts: &WeeklyCommitCounts, config: &ChartConfig) -> Result<()> {
        let labels = month_labels(counts);
        let values: Vec<u64> = counts.counts().collect();
        let upper = y_axis_upper(counts.max_count());

        let root = BitMapBackend::new(&config.path, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d((0..values.len()).into_segmented(), 0u64..upper)?;

        let label_for = |value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(index) => labels.get(*index).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(values.len())
            .x_label_formatter(&label_for)
            .y_desc("Commits")
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.3).filled())
                .margin(1)
                .data(values.iter().enumerate().map(|(index, count)| (index, *count))),
        )?;

        root.present()?;
        Ok(())
    }
}

#[async_trait]
impl GraphRenderer for WeeklyCommitChart {
    type Data = WeeklyCommitCounts;

    async fn render_to_file(&self, data: &Self::Data, config: &ChartConfig) -> Result<()> {
        if data.is_empty() {
            return Err(CgraphError::graph("No weeks available for commit chart"));
        }
        if config.width == 0 || config.height == 0 {
            return Err(CgraphError::graph(format!(
                "Invalid chart size {}x{}",
                config.width, config.height
            )));
        }

        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        debug!(
            "Drawing {} weeks ({} commits) at {}x{}",
            data.len(),
            data.total(),
            config.width,
            config.height
        );
        Self::draw(data, config)?;

        info!("Rendered commit chart to {}", config.path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "weekly_commits"
    }

    fn description(&self) -> &'static str {
        "Total commits per week across public repositories"
    }
}
