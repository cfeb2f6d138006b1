use anyhow::Result;
use clap::Parser;
use courselens::cli::{Cli, Commands};
use courselens::commands::{analyze, validate};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            top,
            config,
            verbosity,
        } => {
            init_logging(verbosity);
            analyze::handle_analyze(analyze::AnalyzeConfig {
                path,
                format,
                output,
                top,
                config,
            })
        }
        Commands::Validate {
            path,
            config,
            verbosity,
        } => {
            init_logging(verbosity);
            validate::handle_validate(validate::ValidateConfig { path, config })
        }
        Commands::Init { force } => {
            init_logging(0);
            courselens::commands::init::init_config(force)
        }
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}
