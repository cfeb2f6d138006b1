use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "courselens")]
#[command(about = "Course catalog cleaning and descriptive reporting tool", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean the catalog and render the full report
    Analyze {
        /// Path to the semicolon-delimited catalog file
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How many courses the gain ranking keeps
        #[arg(long = "top")]
        top: Option<usize>,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Report data-quality findings without producing a report
    Validate {
        /// Path to the semicolon-delimited catalog file
        path: PathBuf,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_conversion() {
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Json),
            crate::io::output::OutputFormat::Json
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Markdown),
            crate::io::output::OutputFormat::Markdown
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Terminal),
            crate::io::output::OutputFormat::Terminal
        );
    }

    #[test]
    fn cli_parsing_analyze_command() {
        let args = vec![
            "courselens",
            "analyze",
            "catalog.csv",
            "--format",
            "json",
            "--top",
            "10",
        ];

        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Analyze {
                path, format, top, ..
            } => {
                assert_eq!(path, PathBuf::from("catalog.csv"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(top, Some(10));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn cli_parsing_init_command() {
        let cli = Cli::parse_from(vec!["courselens", "init", "--force"]);

        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn cli_parsing_validate_command() {
        let cli = Cli::parse_from(vec![
            "courselens",
            "validate",
            "catalog.csv",
            "--config",
            "custom.toml",
        ]);

        match cli.command {
            Commands::Validate { path, config, .. } => {
                assert_eq!(path, PathBuf::from("catalog.csv"));
                assert_eq!(config, Some(PathBuf::from("custom.toml")));
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn analyze_defaults_to_terminal_format() {
        let cli = Cli::parse_from(vec!["courselens", "analyze", "catalog.csv"]);
        match cli.command {
            Commands::Analyze { format, .. } => assert_eq!(format, OutputFormat::Terminal),
            _ => panic!("Expected Analyze command"),
        }
    }
}
