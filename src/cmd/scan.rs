//! Scan command implementation
//!
//! Reads a batch of files, treats each as one delivered resource (URL =
//! path, transfer bytes = on-disk length), and prints the assembled
//! savings report. Per-file failures are warned and skipped; the batch
//! never aborts because one file is unreadable or untokenizable.

use anyhow::Result;
use indicatif::ProgressBar;
use regex::Regex;

use crate::config::ConfigLoader;
use crate::error::SrcSlimError;
use crate::estimator::{EstimatorConfig, SourceRecord, TransferInfo};
use crate::report::{format_console_report, format_json_report, NetworkRecords, ReportAssembler};

/// Threshold overrides taken from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOverrides {
    /// Override for the percent guard
    pub percent_threshold: Option<f64>,
    /// Override for the byte floor
    pub byte_threshold: Option<u64>,
}

/// Run the scan command over a set of file paths
pub fn cmd_scan(
    files: &[String],
    json: bool,
    exclude: Option<&str>,
    overrides: ScanOverrides,
) -> Result<()> {
    let config = resolve_config(overrides)?;

    let exclude = exclude
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| SrcSlimError::InvalidExcludePattern {
                pattern: pattern.to_string(),
                source,
            })
        })
        .transpose()?;

    let progress = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(files.len() as u64)
    };

    let mut resources = Vec::new();
    let mut records = NetworkRecords::new();
    for path in files {
        progress.inc(1);
        if exclude.as_ref().is_some_and(|re| re.is_match(path)) {
            log::debug!("{} excluded by pattern", path);
            continue;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("could not read {}: {}, skipping", path, e);
                continue;
            }
        };
        records.insert(
            path.clone(),
            TransferInfo {
                total_bytes: content.len() as u64,
            },
        );
        resources.push(SourceRecord {
            url: path.clone(),
            content,
        });
    }
    progress.finish_and_clear();

    let report = ReportAssembler::new(config).assemble(&resources, &records);

    if json {
        println!("{}", format_json_report(&report)?);
    } else {
        print!("{}", format_console_report(&report)?);
    }
    Ok(())
}

fn resolve_config(overrides: ScanOverrides) -> Result<EstimatorConfig> {
    let mut config = ConfigLoader::new(".").load()?;
    if let Some(percent) = overrides.percent_threshold {
        config.ignore_threshold_percent = percent;
    }
    if let Some(bytes) = overrides.byte_threshold {
        config.ignore_threshold_bytes = bytes;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_config_applies_cli_overrides() {
        let config = resolve_config(ScanOverrides {
            percent_threshold: Some(25.0),
            byte_threshold: Some(100),
        })
        .expect("resolves");
        assert_eq!(config.ignore_threshold_percent, 25.0);
        assert_eq!(config.ignore_threshold_bytes, 100);
    }

    #[test]
    fn test_cmd_scan_with_missing_files_does_not_fail() {
        let result = cmd_scan(
            &["/nonexistent/file.js".to_string()],
            true,
            None,
            ScanOverrides::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_cmd_scan_rejects_invalid_exclude_pattern() {
        let result = cmd_scan(&[], true, Some("("), ScanOverrides::default());
        assert!(result.is_err());
    }
}
