//! Password column augmentation for seed SQL dumps.
//!
//! Rewrites `INSERT` statements for the `users` table so every row carries a
//! plaintext `password` value derived from its login name, and widens the
//! column list to match.

pub mod atomic;
pub mod augment;
pub mod error;
pub mod model;
pub mod password;

pub use augment::{Augmented, RowAugmenter, augment, augment_with_options, transform};
pub use error::{AugmentError, AugmentResult, FileAction};
pub use model::{AugmentOptions, AugmentReport, HashCheck};
pub use password::{derive_password, sha256_hex};

/// Dump read when no input path is given.
pub const DEFAULT_INPUT: &str = "isucon8q-initial-dataset.sql";

/// File written when no output path is given.
pub const DEFAULT_OUTPUT: &str = "isucon8q-initial-dataset-password.sql";

/// Column list of the 4-column `users` inserts.
pub const HEADER_FOUR_COLUMNS: &str = "(id, nickname, login_name, pass_hash) VALUES";

/// Column list written in place of [`HEADER_FOUR_COLUMNS`].
pub const HEADER_FIVE_COLUMNS: &str = "(id, nickname, login_name, pass_hash, password) VALUES";
