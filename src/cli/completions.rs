//! Shell completion generation

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::args::Cli;

/// Print the completion script for `shell` to stdout
pub fn print(shell: Shell) {
    write(shell, &mut io::stdout());
}

/// Write the completion script for `shell` to `out`
pub fn write(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_mentions_subcommands() {
        let mut out = Vec::new();
        write(Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();

        assert!(script.contains("momgen"));
        assert!(script.contains("generate"));
        assert!(script.contains("serve"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
