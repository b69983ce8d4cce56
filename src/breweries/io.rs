use crate::error::{CleanError, Result, ResultExt as _};
use polars::prelude::*;
use std::path::Path;

/// Reads a CSV export (header row required) into memory, preserving column
/// order and row order.
///
/// Column types are inferred from every row, so a column holding a stray
/// non-numeric value anywhere loads as text instead of failing the read.
///
/// # Errors
///
/// Returns [`CleanError::InvalidPath`] if the file does not exist, or a
/// processing error if it cannot be parsed.
pub fn load_df(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(CleanError::InvalidPath(format!(
            "{} does not exist or is not a file",
            path.display()
        )));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open CSV {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to read CSV {}", path.display()))?;

    log::info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Writes `df` as CSV with a header row and no index column, replacing any
/// existing file. Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or the CSV
/// cannot be serialized.
pub fn save_df(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file {}", path.display()))?;

    log::info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_invalid_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_df(&dir.path().join("nope.csv")).expect_err("missing file");
        assert!(matches!(err, CleanError::InvalidPath(_)));
    }

    #[test]
    fn test_save_creates_parent_and_has_no_index() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cleaned data").join("out.csv");
        let mut df = df!(
            "id" => ["a", "b"],
            "latitude" => [1.5, -2.5]
        )?;

        save_df(&mut df, &path)?;

        let text = std::fs::read_to_string(&path)?;
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,latitude"));
        assert_eq!(text.lines().count(), 3);

        let reloaded = load_df(&path)?;
        assert_eq!(reloaded.shape(), (2, 2));
        Ok(())
    }

    #[test]
    fn test_save_overwrites_existing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale,content\n1,2\n3,4\n5,6\n")?;

        let mut df = df!("id" => ["only"])?;
        save_df(&mut df, &path)?;

        assert_eq!(load_df(&path)?.height(), 1);
        Ok(())
    }
}
