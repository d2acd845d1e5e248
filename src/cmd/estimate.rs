//! Estimate command implementation
//!
//! Single-resource estimation with an explicit transfer size, useful when
//! the transferred byte count differs from the on-disk length (compressed
//! delivery, for instance).

use anyhow::Result;
use std::path::Path;

use crate::config::ConfigLoader;
use crate::error::SrcSlimError;
use crate::estimator::{
    ByteEfficiencyEstimator, MinifyWasteEstimator, SourceRecord, TransferInfo,
};
use crate::fmt::{format_kb, format_percent};

/// Run the estimate command for one file
///
/// Unlike `scan`, a tokenizer failure here is surfaced as an error: the
/// single resource is the whole run.
pub fn cmd_estimate(file: &str, transfer_bytes: Option<u64>, json: bool) -> Result<()> {
    let path = Path::new(file);
    if !path.exists() {
        return Err(SrcSlimError::FileNotFound {
            path: path.to_path_buf(),
            operation: "estimate".to_string(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|source| SrcSlimError::Io {
        context: format!("reading {}", path.display()),
        source,
    })?;

    let transfer = TransferInfo {
        total_bytes: transfer_bytes.unwrap_or(content.len() as u64),
    };
    let record = SourceRecord {
        url: file.to_string(),
        content,
    };

    let config = ConfigLoader::new(".").load()?;
    let estimator = MinifyWasteEstimator::new(config);
    let estimate = estimator
        .estimate(&record, &transfer)
        .map_err(SrcSlimError::from)?;

    match estimate {
        Some(estimate) if json => println!("{}", serde_json::to_string_pretty(&estimate)?),
        Some(estimate) => {
            use console::style;
            println!("{} {}", style("resource:").bold(), estimate.url);
            println!("  transferred:       {}", format_kb(estimate.total_bytes));
            println!(
                "  potential savings: {} ({})",
                format_kb(estimate.wasted_bytes),
                format_percent(estimate.wasted_percent)
            );
        }
        None if json => println!("null"),
        None => println!("Already minified: no significant savings available"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cmd_estimate_missing_file_is_an_error() {
        let result = cmd_estimate("/nonexistent/app.js", None, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_cmd_estimate_untokenizable_file_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.js");
        fs::write(&path, "var s = 'unterminated").expect("write");

        let result = cmd_estimate(path.to_str().expect("utf-8 path"), None, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_cmd_estimate_minified_file_succeeds() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("min.js");
        fs::write(&path, "a=1;").expect("write");

        let result = cmd_estimate(path.to_str().expect("utf-8 path"), Some(10), false);
        assert!(result.is_ok());
    }
}
