//! Draw a [`ChartSpec`] as a categorical bar chart with plotters.

use std::fs::create_dir_all;
use std::path::Path;

use anyhow::{bail, Context};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::models::{ChartShape, ChartSpec};

const BAR_COLOR: RGBColor = RGBColor(0, 114, 178); // Blue
const HIGHLIGHT_COLOR: RGBColor = RGBColor(213, 94, 0); // Vermillion
const OTHER_COLOR: RGBColor = RGBColor(153, 153, 153);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => bail!("unsupported image format `{other}`"),
        }
    }

    /// Anything that is not `.svg` is written as a PNG bitmap.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// One drawn series: legend entry (if any), fill colour, and (axis slot, height) pairs.
type BarSeries = (Option<String>, RGBColor, Vec<(u32, u64)>);

fn bar_series(spec: &ChartSpec) -> Vec<BarSeries> {
    match &spec.shape {
        ChartShape::Plain(bars) => vec![(
            None,
            BAR_COLOR,
            bars.iter()
                .enumerate()
                .map(|(i, b)| (i as u32, b.mutated_samples))
                .collect(),
        )],
        ChartShape::Highlighted { bars, legend_label } => {
            let pick = |want: bool| -> Vec<(u32, u64)> {
                bars.iter()
                    .enumerate()
                    .filter(|(_, (_, hl))| *hl == want)
                    .map(|(i, (b, _))| (i as u32, b.mutated_samples))
                    .collect()
            };
            vec![
                (Some(format!("{legend_label}: Yes")), HIGHLIGHT_COLOR, pick(true)),
                (Some(format!("{legend_label}: No")), OTHER_COLOR, pick(false)),
            ]
            .into_iter()
            .filter(|(_, _, data)| !data.is_empty())
            .collect()
        }
    }
}

/// Top of the y axis: ~10% headroom over the tallest bar, never zero.
fn y_axis_max(spec: &ChartSpec) -> u64 {
    let top = spec.bars().map(|(b, _)| b.mutated_samples).max().unwrap_or(0);
    (top + top / 10).max(top + 1)
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    caption: &str,
) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let genes = spec.gene_order();
    let slots = genes.len().max(1) as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(110)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..slots).into_segmented(), 0u64..y_axis_max(spec))?;

    // gene symbols in bar order, rotated so long panels stay readable
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize)
        .x_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => genes
                .get(*i as usize)
                .map(|g| g.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .x_desc(spec.labels.x_label.as_str())
        .y_desc(spec.labels.y_label.as_str())
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    let mut has_legend = false;
    for (label, color, data) in bar_series(spec) {
        let anno = chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(3)
                .data(data),
        )?;
        if let Some(label) = label {
            has_legend = true;
            anno.label(label)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }
    }

    if has_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Write the chart to `path` at `size` pixels; the extension picks PNG or SVG.
pub fn render_chart(
    spec: &ChartSpec,
    path: &Path,
    size: (u32, u32),
    caption: &str,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    if spec.is_empty() {
        warn!("No genes passed the cutoff for `{caption}`, drawing an empty chart");
    }

    match ImageFormat::from_path(path) {
        ImageFormat::Png => draw(BitMapBackend::new(path, size).into_drawing_area(), spec, caption),
        ImageFormat::Svg => draw(SVGBackend::new(path, size).into_drawing_area(), spec, caption),
    }
    .with_context(|| format!("rendering chart to {}", path.display()))?;

    info!("Chart saved to {}", path.display());
    Ok(())
}
