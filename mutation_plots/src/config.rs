//! Pipeline settings, read from a JSON file next to the data.
//!
//! Every field has a default, so a partial file (or none at all) is fine:
//!
//! ```json
//! {
//!   "min_mutated": 5,
//!   "cancer_types": [
//!     { "name": "BRCA", "mutations_path": "data/brca_genes.tsv", "separator": "\t" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::mutation_bar_chart::DEFAULT_MIN_MUTATED;
use crate::helper_functions::project_root;

pub const CONFIG_ENV: &str = "MUTATION_PLOTS_CONFIG";
const CONFIG_FILE: &str = "mutation_plots.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancerTypeConfig {
    pub name: String,
    pub mutations_path: PathBuf,
    pub gene_column: String,
    pub count_column: String,
    pub separator: String,
}

impl Default for CancerTypeConfig {
    fn default() -> Self {
        Self::named("BRCA")
    }
}

impl CancerTypeConfig {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mutations_path: PathBuf::from(format!("data/{}_mutated_genes.csv", name.to_lowercase())),
            gene_column: "Gene".to_string(),
            count_column: "mutated_samples".to_string(),
            separator: ",".to_string(),
        }
    }

    pub fn separator_byte(&self) -> anyhow::Result<u8> {
        match self.separator.as_bytes() {
            [b] => Ok(*b),
            _ => bail!(
                "separator for {} must be a single byte, got {:?}",
                self.name,
                self.separator
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub cancer_types: Vec<CancerTypeConfig>,
    pub flags_path: PathBuf,
    pub flags_column: String,
    pub min_mutated: i64,
    pub highlight_title: String,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub image_format: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cancer_types: vec![CancerTypeConfig::named("BRCA"), CancerTypeConfig::named("LUAD")],
            flags_path: PathBuf::from("data/flags_genes.csv"),
            flags_column: "Gene".to_string(),
            min_mutated: DEFAULT_MIN_MUTATED,
            highlight_title: "FLAGS".to_string(),
            output_dir: PathBuf::from("figures"),
            width: 1200,
            height: 600,
            image_format: "png".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(text).context("malformed pipeline config")?;
        cfg.check()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text)
    }

    /// `$MUTATION_PLOTS_CONFIG`, else `<project root>/mutation_plots.json`,
    /// else the built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => project_root().join(CONFIG_FILE),
        };
        if path.exists() {
            info!("Reading config from {}", path.display());
            Self::from_file(&path)
        } else {
            warn!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("image size must be non-zero, got {}x{}", self.width, self.height);
        }
        for ct in &self.cancer_types {
            ct.separator_byte()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_two_cancer_types() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.cancer_types.len(), 2);
        assert_eq!(cfg.min_mutated, 3);
        assert_eq!(cfg.highlight_title, "FLAGS");
        assert_eq!(
            cfg.cancer_types[1].mutations_path,
            PathBuf::from("data/luad_mutated_genes.csv")
        );
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = PipelineConfig::from_json(
            r#"{ "min_mutated": 5,
                 "cancer_types": [{ "name": "COAD", "mutations_path": "x.tsv", "separator": "\t" }] }"#,
        )
        .unwrap();
        assert_eq!(cfg.min_mutated, 5);
        assert_eq!(cfg.width, 1200);
        let coad = &cfg.cancer_types[0];
        assert_eq!(coad.gene_column, "Gene");
        assert_eq!(coad.separator_byte().unwrap(), b'\t');
    }

    #[test]
    fn rejects_multi_byte_separator() {
        let err = PipelineConfig::from_json(r#"{ "cancer_types": [{ "separator": ";;" }] }"#);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_zero_size() {
        assert!(PipelineConfig::from_json(r#"{ "width": 0 }"#).is_err());
    }
}
