use std::path::PathBuf;

use polars::prelude::*;
use tracing::{debug, error, info};

use crate::helper_functions::read_delimited;
use crate::models::{Dataset, MutationRecord};

/// Pre-computed gene → mutated-sample counts for one cancer type.
pub struct MutationTable {
    pub path: PathBuf,
    pub gene_column: String,
    pub count_column: String,
    pub separator: u8,
}

impl Dataset for MutationTable {
    fn load(&self) -> PolarsResult<DataFrame> {
        info!("Reading mutation counts from {}", self.path.display());
        let df = match read_delimited(&self.path, self.separator) {
            Ok(df) => df,
            Err(e) => {
                error!("Failed to read mutation table {}: {}", self.path.display(), e);
                return Err(e);
            }
        };
        debug!("Loaded {} rows, {} cols", df.height(), df.width());

        for name in [&self.gene_column, &self.count_column] {
            if df.column(name).is_err() {
                error!("Column `{}` missing from {}", name, self.path.display());
                return Err(PolarsError::ColumnNotFound(name.clone().into()));
            }
        }
        Ok(df)
    }
}

impl MutationTable {
    /// Pull the gene and count columns out as records, in table order.
    pub fn to_records(&self, df: &DataFrame) -> PolarsResult<Vec<MutationRecord>> {
        let genes = df.column(&self.gene_column)?.str()?;
        let counts = self.integer_counts(df)?;
        let counts = counts.i64()?;

        genes
            .into_iter()
            .zip(counts.into_iter())
            .enumerate()
            .map(|(row, pair)| match pair {
                (Some(gene), Some(n)) => Ok(MutationRecord::new(gene, n)),
                (None, _) => Err(PolarsError::ComputeError(
                    format!("missing gene symbol at row {row}").into(),
                )),
                (Some(gene), None) => Err(PolarsError::ComputeError(
                    format!("missing or non-numeric `{}` for {gene}", self.count_column).into(),
                )),
            })
            .collect()
    }

    /// Counts as Int64. Floats are accepted only when every value is whole;
    /// anything that doesn't parse is an error rather than a null.
    fn integer_counts(&self, df: &DataFrame) -> PolarsResult<Column> {
        let counts = df.column(&self.count_column)?;
        let dtype = counts.dtype();
        if dtype.is_float() {
            let as_f64 = counts.cast(&DataType::Float64)?;
            let fractional = as_f64.f64()?.into_iter().flatten().find(|v| v.fract() != 0.0);
            if let Some(v) = fractional {
                error!("Fractional count {} in `{}`", v, self.count_column);
                return Err(PolarsError::ComputeError(
                    format!("`{}` holds a fractional count ({v})", self.count_column).into(),
                ));
            }
        } else if !dtype.is_integer() && !dtype.is_null() {
            return counts.strict_cast(&DataType::Int64);
        }
        counts.cast(&DataType::Int64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table(contents: &str, separator: u8) -> (tempfile::NamedTempFile, MutationTable) {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{contents}").unwrap();
        let t = MutationTable {
            path: tmp.path().to_path_buf(),
            gene_column: "Gene".to_string(),
            count_column: "mutated_samples".to_string(),
            separator,
        };
        (tmp, t)
    }

    #[test]
    fn loads_records_in_file_order() {
        let (_tmp, t) = table("Gene,mutated_samples\nKRAS,7\nTP53,10\nNRAS,1\n", b',');
        let df = t.load().unwrap();
        let recs = t.to_records(&df).unwrap();
        assert_eq!(
            recs,
            vec![
                MutationRecord::new("KRAS", 7),
                MutationRecord::new("TP53", 10),
                MutationRecord::new("NRAS", 1),
            ]
        );
    }

    #[test]
    fn keeps_negative_counts_for_validation_downstream() {
        let (_tmp, t) = table("Gene\tmutated_samples\tother\nTP53\t-1\tx\n", b'\t');
        let recs = t.to_records(&t.load().unwrap()).unwrap();
        assert_eq!(recs, vec![MutationRecord::new("TP53", -1)]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let (_tmp, t) = table("Gene,count\nTP53,3\n", b',');
        assert!(t.load().is_err());
    }

    #[test]
    fn fractional_count_is_an_error() {
        let (_tmp, t) = table("Gene,mutated_samples\nTP53,3.9\nKRAS,2.5\n", b',');
        let df = t.load().unwrap();
        assert!(t.to_records(&df).is_err());

        let df = df![
            "Gene" => &["TP53", "KRAS"],
            "mutated_samples" => &[3.0f64, 2.5]
        ]
        .unwrap();
        assert!(t.to_records(&df).is_err());
    }

    #[test]
    fn whole_float_counts_are_accepted() {
        let (_tmp, t) = table("Gene,mutated_samples\nTP53,3.0\nKRAS,7.0\n", b',');
        let recs = t.to_records(&t.load().unwrap()).unwrap();
        assert_eq!(
            recs,
            vec![MutationRecord::new("TP53", 3), MutationRecord::new("KRAS", 7)]
        );
    }

    #[test]
    fn text_count_is_an_error() {
        let (_tmp, t) = table("Gene,mutated_samples\nTP53,many\n", b',');
        let df = t.load().unwrap();
        assert!(t.to_records(&df).is_err());
    }

    #[test]
    fn null_count_is_an_error() {
        let t = MutationTable {
            path: PathBuf::new(),
            gene_column: "Gene".to_string(),
            count_column: "mutated_samples".to_string(),
            separator: b',',
        };
        let df = df![
            "Gene" => &["TP53", "KRAS"],
            "mutated_samples" => &[Some(4i64), None]
        ]
        .unwrap();
        assert!(t.to_records(&df).is_err());
    }
}
