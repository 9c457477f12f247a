use std::path::PathBuf;

use serde::Serialize;

use crate::{DEFAULT_INPUT, DEFAULT_OUTPUT};

/// Maximum number of mismatching names kept in [`HashCheck::samples`].
pub const MAX_MISMATCH_SAMPLES: usize = 20;

/// Inputs for a file-to-file augmentation run.
#[derive(Debug, Clone)]
pub struct AugmentOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Compare `SHA-256(password)` against each row's `pass_hash`.
    pub verify_hashes: bool,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            verify_hashes: false,
        }
    }
}

/// Summary of a single augmentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AugmentReport {
    pub headers_rewritten: usize,
    pub tuples_augmented: usize,
    pub input_bytes: usize,
    pub output_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_check: Option<HashCheck>,
}

/// Outcome of comparing derived passwords against stored hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HashCheck {
    pub checked: usize,
    pub matched: usize,
    pub mismatched: usize,
    /// Names of the first mismatching rows, in input order.
    pub samples: Vec<String>,
}

impl HashCheck {
    pub(crate) fn record(&mut self, name: &str, matched: bool) {
        self.checked += 1;
        if matched {
            self.matched += 1;
            return;
        }
        self.mismatched += 1;
        if self.samples.len() < MAX_MISMATCH_SAMPLES {
            self.samples.push(name.to_string());
        }
    }
}
