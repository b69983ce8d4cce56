//! Integrity checks for cleaned output.
//!
//! After the cleaned CSV is written it is read back and checked against the
//! output contract (see [`verifier`]). A [`receipt`] recording the row
//! accounting and a SHA-256 digest can be saved next to the file, so later
//! runs of `brewclean verify` can also detect edits:
//!
//! ```json
//! {
//!   "receipt_version": 1,
//!   "created_utc": "2026-01-24T12:34:56.789Z",
//!   "producer": { "app_name": "brewclean", "app_version": "0.1.0", "platform": "linux" },
//!   "input_file": "../raw data/breweries.csv",
//!   "output_file": "breweries_cleaned_all.csv",
//!   "rows": { "loaded": 9148, "written": 6768, "removed": 2380 },
//!   "columns": ["id", "name", "brewery_type", "city", "state_province", "country", "latitude", "longitude"],
//!   "integrity": { "hash_algorithm": "SHA-256", "hash": "a3b2c1d4..." }
//! }
//! ```
//!
//! The digest is byte-exact: converting line endings fails verification.

pub mod hasher;
pub mod receipt;
pub mod verifier;

pub use hasher::compute_file_hash;
pub use receipt::{
    CleaningReceipt, RowCounts, create_receipt, load_receipt, receipt_path_for, remove_receipt,
    save_receipt,
};
pub use verifier::{CheckResult, VerificationResult, verify_output, verify_with_receipt};
