//! Report assembly and formatting
//!
//! Drives the per-resource estimation batch: resolves transfer metadata by
//! exact URL match, invokes the estimator, filters findings below the
//! absolute byte threshold, and renders the surviving findings as a table
//! for the console or as JSON.
//!
//! Resources are independent, so the batch runs in parallel; a failure on
//! one resource (tokenizer error, missing network record) is logged and
//! excluded without affecting the others.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{self, Write as _};

use crate::estimator::{
    ByteEfficiencyEstimator, EstimatorConfig, MinifyWasteEstimator, SourceRecord, TransferInfo,
    WasteEstimate,
};
use crate::fmt::{format_kb, format_percent};

/// Transfer metadata keyed by resource URL
///
/// Lookup is by exact URL match; resolving records is the caller's
/// responsibility, this is only the container the assembler consults.
#[derive(Debug, Clone, Default)]
pub struct NetworkRecords {
    records: HashMap<String, TransferInfo>,
}

impl NetworkRecords {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register transfer metadata for a URL, replacing any previous entry
    pub fn insert(&mut self, url: impl Into<String>, transfer: TransferInfo) {
        self.records.insert(url.into(), transfer);
    }

    /// Look up transfer metadata by exact URL
    pub fn resolve(&self, url: &str) -> Option<&TransferInfo> {
        self.records.get(url)
    }

    /// Number of registered records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are registered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Display type of a report column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Rendered as a link
    Url,
    /// Rendered as plain text
    Text,
}

/// One column of the report schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    /// Stable key downstream renderers select by
    pub key: &'static str,
    /// Human-readable heading
    pub label: &'static str,
    /// Display type
    pub kind: ColumnKind,
}

/// The fixed column schema; keys, kinds, and labels are a stable contract
/// for downstream renderers
pub const REPORT_COLUMNS: [ReportColumn; 3] = [
    ReportColumn {
        key: "url",
        label: "URL",
        kind: ColumnKind::Url,
    },
    ReportColumn {
        key: "total_bytes",
        label: "Original size (KB)",
        kind: ColumnKind::Text,
    },
    ReportColumn {
        key: "wasted_bytes",
        label: "Potential savings",
        kind: ColumnKind::Text,
    },
];

/// Assembled findings for one batch of resources
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Column schema (see [`REPORT_COLUMNS`])
    pub columns: [ReportColumn; 3],
    /// Surviving findings, in input order
    pub rows: Vec<WasteEstimate>,
}

impl Report {
    /// Total estimated savings across all findings
    pub fn total_wasted_bytes(&self) -> u64 {
        self.rows.iter().map(|row| row.wasted_bytes).sum()
    }
}

/// Runs the estimator over a batch of resources and assembles the report
///
/// # Examples
///
/// ```
/// use src_slim::estimator::{EstimatorConfig, SourceRecord, TransferInfo};
/// use src_slim::report::{NetworkRecords, ReportAssembler};
///
/// let resources = vec![SourceRecord {
///     url: "https://example.com/app.js".to_string(),
///     content: "var aLongIdentifier = 1;   \n\n// padding\n".repeat(100),
/// }];
/// let mut records = NetworkRecords::new();
/// records.insert("https://example.com/app.js", TransferInfo { total_bytes: 40_000 });
///
/// let report = ReportAssembler::new(EstimatorConfig::default()).assemble(&resources, &records);
/// assert_eq!(report.rows.len(), 1);
/// ```
pub struct ReportAssembler {
    config: EstimatorConfig,
}

impl ReportAssembler {
    /// Create an assembler with the given thresholds
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Estimate every resource with a matching network record and collect
    /// the findings that pass both thresholds
    ///
    /// Per-resource failures are logged and skipped; they never abort the
    /// batch. Output order follows input order.
    pub fn assemble(&self, resources: &[SourceRecord], records: &NetworkRecords) -> Report {
        let estimator = MinifyWasteEstimator::new(self.config);

        let rows: Vec<WasteEstimate> = resources
            .par_iter()
            .filter_map(|resource| {
                let transfer = match records.resolve(&resource.url) {
                    Some(transfer) => transfer,
                    None => {
                        log::warn!("no network record for {}, skipping", resource.url);
                        return None;
                    }
                };
                match estimator.estimate(resource, transfer) {
                    Ok(estimate) => estimate,
                    Err(e) => {
                        log::warn!("could not tokenize {}: {}, skipping", resource.url, e);
                        None
                    }
                }
            })
            .filter(|estimate| estimate.wasted_bytes >= self.config.ignore_threshold_bytes)
            .collect();

        Report {
            columns: REPORT_COLUMNS,
            rows,
        }
    }
}

/// Format a report for console output
pub fn format_console_report(report: &Report) -> Result<String, fmt::Error> {
    use console::style;

    let mut output = String::new();

    if report.rows.is_empty() {
        writeln!(output, "\n{} No significant minification waste found", style("✨").bold())?;
        return Ok(output);
    }

    writeln!(output, "\n{} Minification Savings", style("📊").bold())?;
    writeln!(
        output,
        "   Estimated total: {}\n",
        style(format_kb(report.total_wasted_bytes())).cyan()
    )?;

    writeln!(
        output,
        "   {:<18} {:<18} {}",
        report.columns[1].label, report.columns[2].label, report.columns[0].label
    )?;
    output.push_str("   ─────────────────────────────────────────────────────────\n");

    for row in &report.rows {
        writeln!(
            output,
            "   {:<18} {:<18} {}",
            format_kb(row.total_bytes),
            format!("{} ({})", format_kb(row.wasted_bytes), format_percent(row.wasted_percent)),
            style(&row.url).dim()
        )?;
    }

    output.push('\n');
    Ok(output)
}

/// Format a report as JSON
pub fn format_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unminified_content() -> String {
        // Heavily padded source, large enough for findings to clear the
        // 2048-byte floor when transfer size matches content size.
        "var aLongIdentifierName = 1;        \n\n// filler comment\n".repeat(200)
    }

    fn resource(url: &str, content: impl Into<String>) -> SourceRecord {
        SourceRecord {
            url: url.to_string(),
            content: content.into(),
        }
    }

    #[test]
    fn test_assemble_reports_unminified_resource() {
        let content = unminified_content();
        let total_bytes = content.len() as u64;
        let resources = vec![resource("https://a.test/app.js", content)];
        let mut records = NetworkRecords::new();
        records.insert("https://a.test/app.js", TransferInfo { total_bytes });

        let report = ReportAssembler::new(EstimatorConfig::default()).assemble(&resources, &records);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].url, "https://a.test/app.js");
        assert!(report.rows[0].wasted_bytes >= 2048);
    }

    #[test]
    fn test_assemble_skips_resource_without_network_record() {
        let resources = vec![
            resource("https://a.test/app.js", unminified_content()),
            resource("https://a.test/missing.js", unminified_content()),
        ];
        let mut records = NetworkRecords::new();
        records.insert(
            "https://a.test/app.js",
            TransferInfo {
                total_bytes: 100_000,
            },
        );

        let report = ReportAssembler::new(EstimatorConfig::default()).assemble(&resources, &records);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].url, "https://a.test/app.js");
    }

    #[test]
    fn test_assemble_isolates_tokenizer_failures() {
        let resources = vec![
            resource("https://a.test/broken.js", "var s = 'unterminated"),
            resource("https://a.test/app.js", unminified_content()),
        ];
        let mut records = NetworkRecords::new();
        records.insert(
            "https://a.test/broken.js",
            TransferInfo {
                total_bytes: 100_000,
            },
        );
        records.insert(
            "https://a.test/app.js",
            TransferInfo {
                total_bytes: 100_000,
            },
        );

        let report = ReportAssembler::new(EstimatorConfig::default()).assemble(&resources, &records);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].url, "https://a.test/app.js");
    }

    #[test]
    fn test_assemble_applies_byte_threshold_on_top_of_percent_guard() {
        // Small enough that the estimator returns a finding but the
        // savings round to well under 2048 bytes.
        let content = "var abcdefgh = 1;\n\n\n// comment\nfunction abcdefgh() { return abcdefgh; }";
        let resources = vec![resource("https://a.test/small.js", content)];
        let mut records = NetworkRecords::new();
        records.insert("https://a.test/small.js", TransferInfo { total_bytes: 1000 });

        let config = EstimatorConfig::default();

        // The estimator layer alone surfaces the finding.
        use crate::estimator::{ByteEfficiencyEstimator, MinifyWasteEstimator};
        let direct = MinifyWasteEstimator::new(config)
            .estimate(&resources[0], &TransferInfo { total_bytes: 1000 })
            .expect("tokenizes")
            .expect("passes the percent guard");
        assert!(direct.wasted_bytes < 2048);

        // The assembler layer drops it.
        let report = ReportAssembler::new(config).assemble(&resources, &records);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_assemble_resolves_same_url_for_distinct_contents() {
        let url = "https://a.test/app.js";
        let resources = vec![
            resource(url, unminified_content()),
            resource(url, format!("{}{}", unminified_content(), unminified_content())),
        ];
        let mut records = NetworkRecords::new();
        records.insert(
            url,
            TransferInfo {
                total_bytes: 100_000,
            },
        );

        let report = ReportAssembler::new(EstimatorConfig::default()).assemble(&resources, &records);
        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|row| row.url == url));
    }

    #[test]
    fn test_assemble_preserves_input_order() {
        let resources = vec![
            resource("https://a.test/1.js", unminified_content()),
            resource("https://a.test/2.js", unminified_content()),
            resource("https://a.test/3.js", unminified_content()),
        ];
        let mut records = NetworkRecords::new();
        for r in &resources {
            records.insert(
                r.url.clone(),
                TransferInfo {
                    total_bytes: 100_000,
                },
            );
        }

        let report = ReportAssembler::new(EstimatorConfig::default()).assemble(&resources, &records);
        let urls: Vec<_> = report.rows.iter().map(|row| row.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.test/1.js", "https://a.test/2.js", "https://a.test/3.js"]);
    }

    #[test]
    fn test_report_columns_are_a_stable_contract() {
        assert_eq!(REPORT_COLUMNS[0].key, "url");
        assert_eq!(REPORT_COLUMNS[0].kind, ColumnKind::Url);
        assert_eq!(REPORT_COLUMNS[1].label, "Original size (KB)");
        assert_eq!(REPORT_COLUMNS[2].label, "Potential savings");
        assert_eq!(REPORT_COLUMNS[2].kind, ColumnKind::Text);
    }

    #[test]
    fn test_format_json_report_includes_schema_and_rows() {
        let report = Report {
            columns: REPORT_COLUMNS,
            rows: vec![WasteEstimate {
                url: "https://a.test/app.js".to_string(),
                total_bytes: 100_000,
                wasted_bytes: 40_000,
                wasted_percent: 40.0,
            }],
        };
        let json = format_json_report(&report).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parses back");
        assert_eq!(value["columns"][0]["key"], "url");
        assert_eq!(value["rows"][0]["wasted_bytes"], 40_000);
    }

    #[test]
    fn test_format_console_report_empty_and_nonempty() {
        let empty = Report {
            columns: REPORT_COLUMNS,
            rows: vec![],
        };
        let text = format_console_report(&empty).expect("formats");
        assert!(text.contains("No significant minification waste"));

        let report = Report {
            columns: REPORT_COLUMNS,
            rows: vec![WasteEstimate {
                url: "https://a.test/app.js".to_string(),
                total_bytes: 100_000,
                wasted_bytes: 40_000,
                wasted_percent: 40.0,
            }],
        };
        let text = format_console_report(&report).expect("formats");
        assert!(text.contains("https://a.test/app.js"));
        assert!(text.contains("Original size (KB)"));
    }
}
