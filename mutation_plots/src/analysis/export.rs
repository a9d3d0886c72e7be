use std::fs::create_dir_all;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crate::models::ChartSpec;

#[derive(Debug, Serialize)]
struct ChartRow<'a> {
    gene_symbol: &'a str,
    mutated_samples: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlighted: Option<bool>,
}

/// Save the bars behind a chart, one row per bar in axis order. The
/// `highlighted` column only exists for highlighted charts.
pub fn write_chart_table(spec: &ChartSpec, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    if spec.is_empty() {
        // serde only emits a header with the first record
        match spec.legend_label() {
            Some(_) => wtr.write_record(["gene_symbol", "mutated_samples", "highlighted"])?,
            None => wtr.write_record(["gene_symbol", "mutated_samples"])?,
        }
    }
    for (bar, highlighted) in spec.bars() {
        wtr.serialize(ChartRow {
            gene_symbol: &bar.gene_symbol,
            mutated_samples: bar.mutated_samples,
            highlighted,
        })?;
    }
    wtr.flush()?;

    info!("Chart table ({} genes) saved to {}", spec.len(), path.display());
    Ok(())
}
