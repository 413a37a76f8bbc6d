use clap::Parser;

/// Top-level CLI parser for the `mck` binary.
#[derive(Debug, Parser)]
#[command(
    name = "mck",
    version,
    about = "mindcheck - end-to-end smoke checks for the MindCare API"
)]
pub struct Cli {
    /// Override the configured API root URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Quiet mode (error-level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::Cli;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "mck",
            "--base-url",
            "http://localhost:8000/api",
            "--timeout",
            "10",
            "--verbose",
        ])
        .expect("cli should parse");

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8000/api"));
        assert_eq!(cli.timeout, Some(10));
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn defaults_leave_config_in_charge() {
        let cli = Cli::try_parse_from(["mck"]).expect("cli should parse");
        assert_eq!(cli.base_url, None);
        assert_eq!(cli.timeout, None);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["mck", "--timeout", "0"]).is_err());
    }
}
