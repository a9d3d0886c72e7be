//! Turn a gene → mutated-sample table into an ordered bar chart description.
//!
//! ```ignore
//! let spec = build(&records, &BuildOptions::new(3).highlight(flags, "FLAGS"))?;
//! render_chart(&spec, Path::new("./figures/brca_flags.png"), (1200, 600), "BRCA")?;
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::models::{AxisLabels, ChartBar, ChartShape, ChartSpec, HighlightSet, MutationRecord};

pub const DEFAULT_MIN_MUTATED: i64 = 3;
pub const DEFAULT_HIGHLIGHT_TITLE: &str = "Gene of interest";

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub min_mutated: i64,
    pub highlight_genes: HighlightSet,
    pub highlight_title: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            min_mutated: DEFAULT_MIN_MUTATED,
            highlight_genes: HighlightSet::new(),
            highlight_title: DEFAULT_HIGHLIGHT_TITLE.to_string(),
        }
    }
}

impl BuildOptions {
    pub fn new(min_mutated: i64) -> Self {
        Self {
            min_mutated,
            ..Self::default()
        }
    }

    pub fn highlight(mut self, genes: HighlightSet, title: impl Into<String>) -> Self {
        self.highlight_genes = genes;
        self.highlight_title = title.into();
        self
    }
}

/// Reject records that would make the chart ambiguous.
fn validate(mutations: &[MutationRecord]) -> ChartResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(mutations.len());
    for (row, rec) in mutations.iter().enumerate() {
        if rec.gene_symbol.trim().is_empty() {
            return Err(ChartError::InvalidInput(format!(
                "empty gene symbol at row {row}"
            )));
        }
        if rec.mutated_samples < 0 {
            return Err(ChartError::InvalidInput(format!(
                "negative mutated-sample count {} for {}",
                rec.mutated_samples, rec.gene_symbol
            )));
        }
        if !seen.insert(rec.gene_symbol.as_str()) {
            return Err(ChartError::DuplicateGene(rec.gene_symbol.clone()));
        }
    }
    Ok(())
}

pub fn build(mutations: &[MutationRecord], options: &BuildOptions) -> ChartResult<ChartSpec> {
    validate(mutations)?;

    let mut bars: Vec<ChartBar> = mutations
        .iter()
        .filter(|rec| rec.mutated_samples >= options.min_mutated)
        .map(|rec| ChartBar {
            gene_symbol: rec.gene_symbol.clone(),
            mutated_samples: rec.mutated_samples as u64,
        })
        .collect();
    let excluded = mutations.len() - bars.len();

    // stable: equal counts keep input order
    bars.sort_by(|a, b| b.mutated_samples.cmp(&a.mutated_samples));

    debug!(
        "Kept {} genes with >= {} mutated samples, excluded {}",
        bars.len(),
        options.min_mutated,
        excluded
    );

    let shape = if options.highlight_genes.is_empty() {
        ChartShape::Plain(bars)
    } else {
        let bars = bars
            .into_iter()
            .map(|bar| {
                let hl = options.highlight_genes.contains(&bar.gene_symbol);
                (bar, hl)
            })
            .collect();
        ChartShape::Highlighted {
            bars,
            legend_label: options.highlight_title.clone(),
        }
    };

    Ok(ChartSpec {
        shape,
        labels: AxisLabels::default(),
        excluded,
    })
}
