use std::fs;
use std::path::Path;

use regex::{Captures, Regex};

use crate::atomic::write_bytes_atomic;
use crate::error::{AugmentError, AugmentResult};
use crate::model::{AugmentOptions, AugmentReport, HashCheck};
use crate::password::{derive_password, hash_matches};
use crate::{HEADER_FIVE_COLUMNS, HEADER_FOUR_COLUMNS};

/// `(id, nickname, "login_name", "pass_hash")` with a 64-character hash.
const TUPLE_PATTERN: &str = r#"\([0-9]+,[^,]+, "(?P<name>[^",]+)", "(?P<hash>[^",]{64})"\)"#;

/// Transformed dump text together with its report.
#[derive(Debug, Clone)]
pub struct Augmented {
    pub text: String,
    pub report: AugmentReport,
}

/// Rewrites `users` inserts so each row carries a derived password column.
#[derive(Debug, Clone)]
pub struct RowAugmenter {
    tuple: Regex,
    verify_hashes: bool,
}

impl RowAugmenter {
    pub fn new() -> AugmentResult<Self> {
        Ok(Self {
            tuple: Regex::new(TUPLE_PATTERN)?,
            verify_hashes: false,
        })
    }

    /// Enables comparing each derived password against the row's hash.
    #[must_use]
    pub fn with_hash_verification(mut self, enabled: bool) -> Self {
        self.verify_hashes = enabled;
        self
    }

    /// Applies the header rewrite and then the tuple rewrite to `text`.
    ///
    /// Tuples are collected from the header-rewritten text in a single pass,
    /// so inserted password values are never matched again. Text outside
    /// matching tuples is copied unchanged.
    pub fn transform(&self, text: &str) -> Augmented {
        let headers_rewritten = text.matches(HEADER_FOUR_COLUMNS).count();
        let headed = text.replace(HEADER_FOUR_COLUMNS, HEADER_FIVE_COLUMNS);
        if headers_rewritten > 0 {
            tracing::debug!(event = "header_rewritten", count = headers_rewritten);
        }

        let mut tuples_augmented = 0usize;
        let mut hash_check = self.verify_hashes.then(HashCheck::default);

        let rewritten = self
            .tuple
            .replace_all(&headed, |caps: &Captures<'_>| {
                tuples_augmented += 1;
                let tuple = caps.get(0).map_or("", |m| m.as_str());
                let name = caps.name("name").map_or("", |m| m.as_str());
                let password = derive_password(name);

                if let Some(check) = hash_check.as_mut() {
                    let pass_hash = caps.name("hash").map_or("", |m| m.as_str());
                    let matched = hash_matches(&password, pass_hash);
                    if !matched {
                        tracing::warn!(event = "hash_mismatch", name = %name);
                    }
                    check.record(name, matched);
                }

                let head = tuple.strip_suffix(')').unwrap_or(tuple);
                format!("{head}, \"{password}\")")
            })
            .into_owned();

        tracing::debug!(event = "tuples_augmented", count = tuples_augmented);

        let report = AugmentReport {
            headers_rewritten,
            tuples_augmented,
            input_bytes: text.len(),
            output_bytes: rewritten.len(),
            hash_check,
        };

        Augmented {
            text: rewritten,
            report,
        }
    }
}

/// Augments dump text in memory without hash verification.
pub fn transform(text: &str) -> AugmentResult<Augmented> {
    Ok(RowAugmenter::new()?.transform(text))
}

/// Reads the dump at `input`, augments it and writes the result to `output`.
///
/// `output` is created or overwritten. Nothing is written when reading fails.
pub fn augment(input: &Path, output: &Path) -> AugmentResult<AugmentReport> {
    augment_with_options(&AugmentOptions {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        verify_hashes: false,
    })
}

/// Like [`augment`], with paths and hash verification taken from `options`.
pub fn augment_with_options(options: &AugmentOptions) -> AugmentResult<AugmentReport> {
    let augmenter = RowAugmenter::new()?.with_hash_verification(options.verify_hashes);

    tracing::info!(
        event = "augment_started",
        input = %options.input.display(),
        output = %options.output.display()
    );

    let text =
        fs::read_to_string(&options.input).map_err(|err| AugmentError::read(&options.input, err))?;
    let Augmented { text, report } = augmenter.transform(&text);

    write_bytes_atomic(&options.output, text.as_bytes())?;
    tracing::info!(
        event = "output_written",
        path = %options.output.display(),
        bytes = report.output_bytes
    );

    Ok(report)
}
