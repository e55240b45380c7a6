//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use eqip_domain::AttributionMode;

/// Eqip CLI - Attribute contributions and allocate ownership.
#[derive(Debug, Parser)]
#[command(name = "eqip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true, env = "EQIP_CONFIG")]
    pub config: Option<String>,

    /// Log pipeline activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one `email<TAB>value` line per contributor)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute an attribution from contribution events and team votes
    Attribute(AttributeArgs),

    /// Compute an attribution from free-text descriptions
    Qualitative(InputArgs),

    /// Turn attribution weights into an ownership arrangement
    Finalize(FinalizeArgs),

    /// Run attribution and allocation in one pass
    Run(RunArgs),

    /// Print the effective pipeline configuration as TOML
    Config,
}

/// Where a command reads its JSON request from.
#[derive(Debug, Parser)]
pub struct InputArgs {
    /// JSON request file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,
}

/// Arguments for the attribute command.
#[derive(Debug, Parser)]
pub struct AttributeArgs {
    /// JSON request file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Override the evidence mode given in the request
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Arguments for the finalize command.
#[derive(Debug, Parser)]
pub struct FinalizeArgs {
    /// JSON request file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Override the policy type given in the request
    #[arg(short, long)]
    pub policy: Option<String>,

    /// Override the number of shares to distribute
    #[arg(short, long)]
    pub total_shares: Option<u64>,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// JSON request file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Override the evidence mode given in the request
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Override the policy type given in the request
    #[arg(short, long)]
    pub policy: Option<String>,

    /// Score from descriptions instead of events and votes
    #[arg(long)]
    pub qualitative: bool,
}

/// Evidence mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Contribution events only
    EventsOnly,
    /// Team votes only
    VotesOnly,
    /// Events and votes combined
    Hybrid,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ModeArg> for AttributionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::EventsOnly => AttributionMode::EventsOnly,
            ModeArg::VotesOnly => AttributionMode::VotesOnly,
            ModeArg::Hybrid => AttributionMode::Hybrid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_command() {
        let cli = Cli::parse_from(["eqip", "attribute", "--input", "team.json"]);
        match cli.command {
            Command::Attribute(args) => {
                assert_eq!(args.input, "team.json");
                assert!(args.mode.is_none());
            }
            _ => panic!("Expected Attribute command"),
        }
    }

    #[test]
    fn test_input_defaults_to_stdin() {
        let cli = Cli::parse_from(["eqip", "qualitative"]);
        match cli.command {
            Command::Qualitative(args) => assert_eq!(args.input, "-"),
            _ => panic!("Expected Qualitative command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "eqip",
            "finalize",
            "-i",
            "weights.json",
            "--policy",
            "equal",
            "--format",
            "json",
            "--no-color",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
        match cli.command {
            Command::Finalize(args) => assert_eq!(args.policy.as_deref(), Some("equal")),
            _ => panic!("Expected Finalize command"),
        }
    }

    #[test]
    fn test_mode_conversion() {
        let cli = Cli::parse_from(["eqip", "run", "--mode", "votes-only"]);
        match cli.command {
            Command::Run(args) => {
                let mode: AttributionMode = args.mode.unwrap().into();
                assert_eq!(mode, AttributionMode::VotesOnly);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::parse_from(["eqip", "--verbose", "config"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Config));
    }
}
