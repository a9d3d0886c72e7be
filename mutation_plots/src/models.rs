use std::collections::HashSet;

use polars::prelude::*;

/// One row of a gene-level mutation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub gene_symbol: String,
    pub mutated_samples: i64,
}

impl MutationRecord {
    pub fn new(gene_symbol: impl Into<String>, mutated_samples: i64) -> Self {
        Self {
            gene_symbol: gene_symbol.into(),
            mutated_samples,
        }
    }
}

/// Gene symbols to colour differently; membership is an exact, case-sensitive match.
pub type HighlightSet = HashSet<String>;

/// A single bar, already validated and past the cutoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub gene_symbol: String,
    pub mutated_samples: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub x_label: String,
    pub y_label: String,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            x_label: "Gene symbol".to_string(),
            y_label: "Mutated samples".to_string(),
        }
    }
}

/// Bars in axis order. `Highlighted` only exists when a highlight set was given,
/// so a plain chart never carries a legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartShape {
    Plain(Vec<ChartBar>),
    Highlighted {
        bars: Vec<(ChartBar, bool)>,
        legend_label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub shape: ChartShape,
    pub labels: AxisLabels,
    /// Genes dropped because they fell below the cutoff.
    pub excluded: usize,
}

impl ChartSpec {
    pub fn len(&self) -> usize {
        match &self.shape {
            ChartShape::Plain(bars) => bars.len(),
            ChartShape::Highlighted { bars, .. } => bars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn legend_label(&self) -> Option<&str> {
        match &self.shape {
            ChartShape::Plain(_) => None,
            ChartShape::Highlighted { legend_label, .. } => Some(legend_label),
        }
    }

    /// Bars left to right, with the highlight flag when the chart has one.
    pub fn bars(&self) -> Box<dyn Iterator<Item = (&ChartBar, Option<bool>)> + '_> {
        match &self.shape {
            ChartShape::Plain(bars) => Box::new(bars.iter().map(|b| (b, None))),
            ChartShape::Highlighted { bars, .. } => {
                Box::new(bars.iter().map(|(b, hl)| (b, Some(*hl))))
            }
        }
    }

    /// Categorical axis order.
    pub fn gene_order(&self) -> Vec<&str> {
        self.bars().map(|(b, _)| b.gene_symbol.as_str()).collect()
    }
}

pub trait Dataset {
    fn load(&self) -> PolarsResult<DataFrame>;
}
