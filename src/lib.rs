#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! src-slim library
//!
//! Estimates how many network bytes could be saved if delivered source
//! text were minified. The core is a JavaScript tokenizer plus a waste
//! estimator that measures the gap between raw length and a reconstructed
//! minified length (including a hypothetical identifier-renaming pass),
//! scaled against the bytes actually transferred for the resource.
//!
//! # Basic Example
//!
//! Estimating a single resource:
//!
//! ```
//! use src_slim::estimator::{
//!     ByteEfficiencyEstimator, EstimatorConfig, MinifyWasteEstimator, SourceRecord, TransferInfo,
//! };
//!
//! let estimator = MinifyWasteEstimator::new(EstimatorConfig::default());
//! let record = SourceRecord {
//!     url: "https://example.com/app.js".to_string(),
//!     content: "var aLongName = 1;     \n\n// comment\nvar another = 2;  \n".to_string(),
//! };
//! let transfer = TransferInfo { total_bytes: 1000 };
//!
//! let estimate = estimator.estimate(&record, &transfer).unwrap().unwrap();
//! assert!(estimate.wasted_bytes > 0);
//! assert!(estimate.wasted_bytes <= transfer.total_bytes);
//! ```
//!
//! # Advanced Example: Batch Reports
//!
//! Running a batch through the report assembler, which resolves transfer
//! metadata by exact URL and filters findings below the byte floor:
//!
//! ```
//! use src_slim::estimator::{EstimatorConfig, SourceRecord, TransferInfo};
//! use src_slim::report::{NetworkRecords, ReportAssembler};
//!
//! let resources = vec![
//!     SourceRecord {
//!         url: "https://example.com/app.js".to_string(),
//!         content: "var aLongIdentifier = 1;    \n\n// padding\n".repeat(100),
//!     },
//!     // No network record for this one; it is skipped, not fatal.
//!     SourceRecord {
//!         url: "https://example.com/unmatched.js".to_string(),
//!         content: "var x = 1;\n".to_string(),
//!     },
//! ];
//!
//! let mut records = NetworkRecords::new();
//! records.insert(
//!     "https://example.com/app.js",
//!     TransferInfo { total_bytes: 40_000 },
//! );
//!
//! let assembler = ReportAssembler::new(EstimatorConfig::default());
//! let report = assembler.assemble(&resources, &records);
//! assert_eq!(report.rows.len(), 1);
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Threshold configuration file support
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Waste estimation over tokenized source text
pub mod estimator;
/// Shared formatting utilities
pub mod fmt;
/// Report assembly and rendering
pub mod report;
/// JavaScript tokenizer
pub mod tokenizer;
