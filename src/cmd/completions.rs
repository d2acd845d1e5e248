//! Completions command implementation
//!
//! Handles the `src-slim completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap_complete::{generate, Shell};

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// src-slim completions bash > /etc/bash_completion.d/src-slim
///
/// # Zsh
/// src-slim completions zsh > ~/.zfunc/_src-slim
/// ```
pub fn cmd_completions(shell: Shell) {
    // Re-create the command structure here since Cli lives in main.rs.
    use clap::{Arg, Command};

    let mut cmd = Command::new("src-slim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Minification savings estimator for delivered source text")
        .subcommand(
            Command::new("scan")
                .about("Estimate minification savings for a batch of files")
                .arg(Arg::new("files").num_args(1..)),
        )
        .subcommand(
            Command::new("estimate")
                .about("Estimate minification savings for a single file")
                .arg(Arg::new("file")),
        )
        .subcommand(Command::new("completions").about("Generate shell completions"));

    let bin_name = "src-slim".to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use clap_complete::Shell;

    #[test]
    fn test_cmd_completions_all_shells_supported() {
        // If this compiles, all major shells are available.
        let _bash = Shell::Bash;
        let _zsh = Shell::Zsh;
        let _fish = Shell::Fish;
        let _powershell = Shell::PowerShell;
    }
}
