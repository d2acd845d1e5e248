//! Minification waste estimation
//!
//! Measures the gap between a resource's raw length and its reconstructed
//! minified length, then scales that ratio against the bytes actually
//! transferred for the resource. Two size models are averaged: strip-only
//! (whitespace and comments removed, identifiers untouched) and
//! strip-plus-mangle (every identifier shortened to one character).
//!
//! The estimator is a pure function of its inputs: no I/O, no shared
//! state, and identical inputs always produce identical output.
//!
//! # Examples
//!
//! ```
//! use src_slim::estimator::{
//!     ByteEfficiencyEstimator, EstimatorConfig, MinifyWasteEstimator, SourceRecord, TransferInfo,
//! };
//!
//! let estimator = MinifyWasteEstimator::new(EstimatorConfig::default());
//! let record = SourceRecord {
//!     url: "https://example.com/app.js".to_string(),
//!     content: "var abcdefgh = 1;\n\n\n// comment\nfunction abcdefgh() { return abcdefgh; }"
//!         .to_string(),
//! };
//! let transfer = TransferInfo { total_bytes: 1000 };
//!
//! let estimate = estimator.estimate(&record, &transfer).unwrap().unwrap();
//! assert!(estimate.wasted_bytes > 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::tokenizer::{tokenize, TokenKind, TokenizeError};

/// Default percentage threshold below which a resource counts as already
/// minified and produces no finding
pub const IGNORE_THRESHOLD_IN_PERCENT: f64 = 10.0;

/// Default absolute byte threshold below which findings are dropped by the
/// report assembler
pub const IGNORE_THRESHOLD_IN_BYTES: u64 = 2048;

/// One resource as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// Identifier of the resource, matched exactly against network records
    pub url: String,
    /// Raw source text as delivered
    pub content: String,
}

/// Transfer metadata for one resource
///
/// Derived externally from compression/encoding knowledge this crate does
/// not compute; for compressed transfers callers supply the
/// uncompressed-equivalent figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInfo {
    /// Bytes attributable to this resource over the network
    pub total_bytes: u64,
}

/// Estimated savings for one resource
///
/// Immutable once computed; one per resource. Absent entirely (the
/// estimator returns `None`) when the resource is below the significance
/// threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteEstimate {
    /// Resource identifier
    pub url: String,
    /// Bytes transferred for the resource
    pub total_bytes: u64,
    /// Bytes estimated savable by minification
    pub wasted_bytes: u64,
    /// Savings as a percentage of `total_bytes`, in [0, 100]
    pub wasted_percent: f64,
}

/// Thresholds controlling which findings surface
///
/// The defaults (10%, 2048 bytes) are part of the observable contract;
/// both thresholds must pass for a finding to appear in a report. The
/// percentage guard is applied by the estimator, the byte guard by the
/// report assembler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Minimum length reduction, in percent, for a resource to count as
    /// unminified
    pub ignore_threshold_percent: f64,
    /// Minimum estimated savings, in bytes, for a finding to be reported
    pub ignore_threshold_bytes: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            ignore_threshold_percent: IGNORE_THRESHOLD_IN_PERCENT,
            ignore_threshold_bytes: IGNORE_THRESHOLD_IN_BYTES,
        }
    }
}

/// A byte-efficiency estimator for one class of resource
///
/// The minification estimator is one member of a family (siblings would
/// estimate CSS, images, ...) sharing this interface so an orchestrator
/// can depend on the trait alone.
pub trait ByteEfficiencyEstimator {
    /// Estimate wasted bytes for one resource
    ///
    /// Returns `Ok(None)` when the resource is not significant (already
    /// near-minimal or degenerate), and `Err` when the content could not
    /// be tokenized; callers skip the resource in either case, but an
    /// `Err` is worth surfacing in logs.
    fn estimate(
        &self,
        record: &SourceRecord,
        transfer: &TransferInfo,
    ) -> Result<Option<WasteEstimate>, TokenizeError>;
}

/// Estimates bytes savable by minifying JavaScript source text
///
/// # Examples
///
/// ```
/// use src_slim::estimator::{
///     ByteEfficiencyEstimator, EstimatorConfig, MinifyWasteEstimator, SourceRecord, TransferInfo,
/// };
///
/// let estimator = MinifyWasteEstimator::new(EstimatorConfig::default());
///
/// // Already-minimal content is suppressed.
/// let record = SourceRecord {
///     url: "https://example.com/tiny.js".to_string(),
///     content: "a=1;".to_string(),
/// };
/// let result = estimator.estimate(&record, &TransferInfo { total_bytes: 10 });
/// assert_eq!(result.unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MinifyWasteEstimator {
    config: EstimatorConfig,
}

impl MinifyWasteEstimator {
    /// Create an estimator with the given thresholds
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// The thresholds this estimator was built with
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }
}

impl ByteEfficiencyEstimator for MinifyWasteEstimator {
    fn estimate(
        &self,
        record: &SourceRecord,
        transfer: &TransferInfo,
    ) -> Result<Option<WasteEstimate>, TokenizeError> {
        let content_len = record.content.len();
        if content_len == 0 {
            // Degenerate input: no waste computable, and guarding here
            // keeps the ratios below free of division by zero.
            return Ok(None);
        }

        let tokens = tokenize(&record.content)?;

        let mut token_length = 0usize;
        let mut token_length_mangled = 0usize;
        for token in &tokens {
            token_length += token.value.len();
            token_length_mangled += if token.kind == TokenKind::Identifier {
                1
            } else {
                token.value.len()
            };
        }

        let reduction = 1.0 - token_length as f64 / content_len as f64;
        if reduction < self.config.ignore_threshold_percent / 100.0 {
            return Ok(None);
        }

        // Average of the strip-only and strip-plus-mangle models, taken as
        // a fraction of the uncompressed content and reapplied to the
        // transferred byte count. Known approximation, kept as-is: the
        // exact numeric behavior is part of the contract.
        let wasted_ratio =
            1.0 - (token_length + token_length_mangled) as f64 / (2.0 * content_len as f64);
        let total_bytes = transfer.total_bytes;
        let wasted_bytes = (total_bytes as f64 * wasted_ratio).round() as u64;

        Ok(Some(WasteEstimate {
            url: record.url.clone(),
            total_bytes,
            wasted_bytes,
            wasted_percent: 100.0 * wasted_ratio,
        }))
    }
}
