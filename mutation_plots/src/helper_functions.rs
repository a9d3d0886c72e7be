use std::env;
use std::path::{Path, PathBuf};

use polars::error::PolarsResult;
use polars::frame::DataFrame;
use polars::prelude::{CsvParseOptions, CsvReadOptions, SerReader};

pub fn project_root() -> PathBuf {
    match env::var_os("PROJECT_ROOT") {
        Some(val) => PathBuf::from(val),
        None => {
            // Fall back to current directory if PROJECT_ROOT not set
            env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
    }
}

/// Relative paths are taken from `root`; absolute paths are returned as-is.
pub fn resolve_from(root: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

pub fn resolve(path: impl AsRef<Path>) -> PathBuf {
    resolve_from(&project_root(), path)
}

pub fn read_csv(file_path: impl AsRef<Path>) -> PolarsResult<DataFrame> {
    read_delimited(file_path, b',')
}

pub fn read_delimited(file_path: impl AsRef<Path>, separator: u8) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(file_path.as_ref().to_path_buf()))?
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resolve_keeps_absolute_paths() {
        let root = Path::new("/project");
        assert_eq!(resolve_from(root, "/data/x.csv"), PathBuf::from("/data/x.csv"));
        assert_eq!(resolve_from(root, "data/x.csv"), PathBuf::from("/project/data/x.csv"));
    }

    #[test]
    fn reads_tab_separated() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "Gene\tcount\nTP53\t10\nKRAS\t7").unwrap();
        let df = read_delimited(tmp.path(), b'\t').unwrap();
        assert_eq!(df.shape(), (2, 2));
    }
}
