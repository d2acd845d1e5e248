//! Enhanced error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Proper exit codes for CI/CD

use std::path::PathBuf;
use thiserror::Error;

use crate::tokenizer::TokenizeError;

/// src-slim errors with contextual suggestions
#[derive(Error, Debug)]
pub enum SrcSlimError {
    /// Configuration file exists but could not be read
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Configuration values failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration
        reason: String,
    },

    /// File not found during operation
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        /// Operation that required the file
        operation: String,
    },

    /// Invalid exclude pattern supplied on the command line
    #[error("Invalid exclude pattern: '{pattern}'")]
    InvalidExcludePattern {
        /// The offending pattern
        pattern: String,
        #[source]
        /// Regex compile error
        source: regex::Error,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Source text could not be tokenized
    #[error("tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),
}

impl SrcSlimError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use src_slim::error::SrcSlimError;
    ///
    /// let error = SrcSlimError::InvalidConfig {
    ///     reason: "ignore-threshold-percent must be in (0, 100]".to_string(),
    /// };
    /// assert!(error.suggestion().is_some());
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ConfigNotFound { path, .. } => Some(format!(
                "Create {} or run without a config file to use the defaults",
                path.display()
            )),
            Self::InvalidConfig { .. } => Some(
                "Check the threshold values in .src-slim.toml: \
                 ignore-threshold-percent must be in (0, 100]"
                    .to_string(),
            ),
            Self::FileNotFound { path, operation } => Some(format!(
                "Ensure {} exists before running {}",
                path.display(),
                operation
            )),
            Self::InvalidExcludePattern { .. } => {
                Some("The --exclude argument must be a valid regular expression".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
            Self::Tokenize(_) => Some(
                "The file does not look like tokenizable JavaScript; \
                 it would be skipped in a batch scan"
                    .to_string(),
            ),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use src_slim::error::SrcSlimError;
    ///
    /// let error = SrcSlimError::FileNotFound {
    ///     path: "app.js".into(),
    ///     operation: "scan".to_string(),
    /// };
    /// assert_eq!(error.exit_code(), 66); // EX_NOINPUT
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigNotFound { .. } => 66, // EX_NOINPUT (sysexits.h)
            Self::InvalidConfig { .. } => 65,  // EX_DATAERR
            Self::FileNotFound { .. } => 66,   // EX_NOINPUT
            Self::InvalidExcludePattern { .. } => 64, // EX_USAGE
            Self::Io { .. } => 74,             // EX_IOERR
            Self::Tokenize(_) => 65,           // EX_DATAERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with cause chain and suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(ss_error) = error.downcast_ref::<SrcSlimError>() {
            if let Some(suggestion) = ss_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("suggestion:").green().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Exit code for an error, defaulting to 1 for anything untyped
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        error
            .downcast_ref::<SrcSlimError>()
            .map_or(1, SrcSlimError::exit_code)
    }
}
