use std::path::Path;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::analysis::export::write_chart_table;
use crate::analysis::mutation_bar_chart::{build, BuildOptions};
use crate::analysis::render::{render_chart, ImageFormat};
use crate::config::{CancerTypeConfig, PipelineConfig};
use crate::data_handling::flags::{flagged_genes, FlagsGenes};
use crate::data_handling::mutation_table::MutationTable;
use crate::helper_functions::resolve;
use crate::models::{Dataset, HighlightSet};

mod analysis;
mod config;
mod data_handling;
mod error;
mod helper_functions;
mod models;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting the mutation frequency plots");

    let cfg = PipelineConfig::load()?;
    let format = ImageFormat::parse(&cfg.image_format)?;
    let output_dir = resolve(&cfg.output_dir);

    // FLAGS reference list, shared by every cancer type
    let flags = FlagsGenes {
        path: resolve(&cfg.flags_path),
        gene_column: cfg.flags_column.clone(),
    };
    let flags_df = flags.load()?;
    let flags_set = flags.gene_set(&flags_df)?;
    info!("{} FLAGS genes loaded", flags_set.len());

    for cancer in &cfg.cancer_types {
        if let Err(e) = plot_cancer_type(&cfg, cancer, &flags_set, format, &output_dir) {
            error!("Plotting {} failed: {:#}", cancer.name, e);
            return Err(e);
        }
    }

    info!("All charts written to {}", output_dir.display());
    Ok(())
}

fn plot_cancer_type(
    cfg: &PipelineConfig,
    cancer: &CancerTypeConfig,
    flags_set: &HighlightSet,
    format: ImageFormat,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let table = MutationTable {
        path: resolve(&cancer.mutations_path),
        gene_column: cancer.gene_column.clone(),
        count_column: cancer.count_column.clone(),
        separator: cancer.separator_byte()?,
    };
    let df = table.load()?;
    let records = table.to_records(&df)?;

    let flagged = flagged_genes(&df, &cancer.gene_column, flags_set)?;
    info!(
        "{}: {} of {} mutated genes are on the FLAGS list",
        cancer.name,
        flagged.height(),
        records.len()
    );

    let stem = cancer.name.to_lowercase();
    let size = (cfg.width, cfg.height);

    let plain = build(&records, &BuildOptions::new(cfg.min_mutated))
        .with_context(|| format!("building chart for {}", cancer.name))?;
    info!(
        "{}: {} genes with >= {} mutated samples, {} genes excluded",
        cancer.name,
        plain.len(),
        cfg.min_mutated,
        plain.excluded
    );
    let caption = format!("{} mutated genes", cancer.name);
    render_chart(
        &plain,
        &output_dir.join(format!("{stem}_mutations.{}", format.extension())),
        size,
        &caption,
    )?;
    write_chart_table(&plain, &output_dir.join(format!("{stem}_mutations.csv")))?;

    let options = BuildOptions::new(cfg.min_mutated)
        .highlight(flags_set.clone(), cfg.highlight_title.clone());
    let highlighted = build(&records, &options)
        .with_context(|| format!("building highlighted chart for {}", cancer.name))?;
    let caption = format!("{} mutated genes ({} highlighted)", cancer.name, cfg.highlight_title);
    render_chart(
        &highlighted,
        &output_dir.join(format!("{stem}_mutations_flags.{}", format.extension())),
        size,
        &caption,
    )?;
    write_chart_table(&highlighted, &output_dir.join(format!("{stem}_mutations_flags.csv")))?;

    Ok(())
}
