//! Command-line front end for the time-density problem generator.
//!
//! - `genesis init` initializes a mesh block and prints the parameter report
//! - `genesis sample` evaluates the models over a range of times

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "genesis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Time-density problem generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a mesh block and report the resolved parameters
    Init(commands::init::InitArgs),
    /// Sample the density and flow-ratio models over time
    Sample(commands::sample::SampleArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => commands::init::execute(args),
        Commands::Sample(args) => commands::sample::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_init_with_overrides() {
        let cli = Cli::try_parse_from([
            "genesis",
            "init",
            "--set",
            "problem/alpha=0.2",
            "--set",
            "hydro/gamma=1.4",
            "--time",
            "2.0",
            "--nx1",
            "16",
        ])
        .unwrap();

        let Commands::Init(args) = cli.command else {
            panic!("expected the init command");
        };
        assert_eq!(args.params.overrides, ["problem/alpha=0.2", "hydro/gamma=1.4"]);
        assert_eq!(args.time, Some(2.0));
        assert_eq!(args.nx1, Some(16));
        assert_eq!(args.nghost, 2);
    }
}
