//! Reference list of frequently mutated genes (FLAGS) and its join against
//! the per-cancer mutation tables.

use std::path::PathBuf;

use polars::prelude::*;
use tracing::{error, info};

use crate::helper_functions::read_csv;
use crate::models::{Dataset, HighlightSet};

pub struct FlagsGenes {
    pub path: PathBuf,
    pub gene_column: String,
}

impl Dataset for FlagsGenes {
    fn load(&self) -> PolarsResult<DataFrame> {
        info!("Reading FLAGS genes from {}", self.path.display());
        match read_csv(&self.path) {
            Ok(df) => Ok(df),
            Err(e) => {
                error!("Failed to read FLAGS list: {}", e);
                Err(e)
            }
        }
    }
}

impl FlagsGenes {
    pub fn gene_set(&self, df: &DataFrame) -> PolarsResult<HighlightSet> {
        let genes = df.column(&self.gene_column)?.str()?;
        Ok(genes
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Rows of `mutations` whose gene appears in the reference list. Takes the
/// normalised set from [`FlagsGenes::gene_set`] so the overlap count matches
/// what gets highlighted.
pub fn flagged_genes(
    mutations: &DataFrame,
    gene_column: &str,
    flags: &HighlightSet,
) -> PolarsResult<DataFrame> {
    let mut reference: Vec<&str> = flags.iter().map(String::as_str).collect();
    reference.sort_unstable();
    let reference = Series::new(PlSmallStr::from(gene_column), reference).into_frame();

    mutations
        .clone()
        .lazy()
        .join(
            reference.lazy(),
            [col(gene_column)],
            [col(gene_column)],
            JoinArgs::new(JoinType::Semi),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> FlagsGenes {
        FlagsGenes {
            path: PathBuf::new(),
            gene_column: "Gene".to_string(),
        }
    }

    #[test]
    fn gene_set_skips_blanks_and_nulls() {
        let df = df!["Gene" => &[Some("TTN"), None, Some(" MUC16 "), Some("")]].unwrap();
        let set = flags().gene_set(&df).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("TTN"));
        assert!(set.contains("MUC16"));
    }

    #[test]
    fn semi_join_keeps_flagged_rows_only() {
        let muts = df![
            "Gene" => &["TP53", "TTN", "KRAS", "MUC16"],
            "mutated_samples" => &[10i64, 8, 7, 2]
        ]
        .unwrap();
        let reference = df!["Gene" => &["TTN", "MUC16", "OBSCN"]].unwrap();
        let set = flags().gene_set(&reference).unwrap();
        let hit = flagged_genes(&muts, "Gene", &set).unwrap();
        let mut names: Vec<String> = hit
            .column("Gene")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        names.sort();
        assert_eq!(names, vec!["MUC16", "TTN"]);
        assert_eq!(hit.width(), 2);
    }

    #[test]
    fn padded_reference_entries_still_join() {
        let muts = df![
            "Gene" => &["TP53", "TTN"],
            "mutated_samples" => &[10i64, 8]
        ]
        .unwrap();
        let reference = df!["Gene" => &[" TTN ", "MUC16"]].unwrap();
        let set = flags().gene_set(&reference).unwrap();
        let hit = flagged_genes(&muts, "Gene", &set).unwrap();
        assert_eq!(hit.height(), 1);
        assert_eq!(hit.column("Gene").unwrap().str().unwrap().get(0), Some("TTN"));
    }
}
