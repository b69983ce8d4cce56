//! Streaming SHA-256 digests of written files.

use crate::error::{Result, ResultExt as _};
use sha2::{Digest as _, Sha256};
use std::fs::File;
use std::io::{BufReader, Read as _};
use std::path::Path;

/// Read buffer for hashing (8 KiB).
const BUFFER_SIZE: usize = 8192;

/// Digest algorithm recorded in receipts.
pub const HASH_ALGORITHM: &str = "SHA-256";

/// Lowercase hex SHA-256 of the file at `path`, read in fixed-size chunks.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;

    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_hash_of_csv_header() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"hello world")?;
        file.flush()?;

        assert_eq!(
            compute_file_hash(file.path())?,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        Ok(())
    }

    #[test]
    fn test_hash_spans_multiple_buffers() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        let row = b"1,Pint Theory,micro,Perth,WA,Australia,-31.95,115.86\n";
        for _ in 0..(BUFFER_SIZE / row.len() * 3) {
            file.write_all(row)?;
        }
        file.flush()?;

        let first = compute_file_hash(file.path())?;
        assert_eq!(first.len(), 64);
        assert_eq!(first, compute_file_hash(file.path())?);
        Ok(())
    }

    #[test]
    fn test_hash_missing_file() {
        assert!(compute_file_hash(Path::new("/nonexistent/breweries.csv")).is_err());
    }
}
