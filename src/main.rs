use clap::{Parser, Subcommand};
use clap_complete::Shell;
use src_slim::cmd;
use src_slim::cmd::scan::ScanOverrides;
use std::process;

/// Minification savings estimator for delivered source text
///
/// src-slim tokenizes JavaScript resources and estimates how many network
/// bytes minification would save, based on actual transfer sizes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate minification savings for a batch of files
    Scan {
        /// Files to scan
        #[arg(value_name = "FILES", required = true)]
        files: Vec<String>,

        /// Output as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,

        /// Skip paths matching this regular expression
        #[arg(long, value_name = "PATTERN")]
        exclude: Option<String>,

        /// Override the minimum length reduction (percent) for a finding
        #[arg(long, value_name = "PERCENT")]
        percent_threshold: Option<f64>,

        /// Override the minimum savings (bytes) for a finding
        #[arg(long, value_name = "BYTES")]
        byte_threshold: Option<u64>,
    },

    /// Estimate minification savings for a single file
    Estimate {
        /// File to estimate
        file: String,

        /// Bytes transferred for this resource (defaults to file size)
        #[arg(long, value_name = "BYTES")]
        transfer_bytes: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Scan {
            files,
            json,
            exclude,
            percent_threshold,
            byte_threshold,
        }) => cmd::cmd_scan(
            files,
            *json,
            exclude.as_deref(),
            ScanOverrides {
                percent_threshold: *percent_threshold,
                byte_threshold: *byte_threshold,
            },
        ),
        Some(Commands::Estimate {
            file,
            transfer_bytes,
            json,
        }) => cmd::cmd_estimate(file, *transfer_bytes, *json),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("src-slim v{}", env!("CARGO_PKG_VERSION"));
            println!("Minification savings estimator for delivered source text\n");
            println!("Usage: src-slim <COMMAND>\n");
            println!("Commands:");
            println!("  scan      Estimate savings for a batch of files");
            println!("  estimate  Estimate savings for a single file");
            println!("\nRun 'src-slim <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use src_slim::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
