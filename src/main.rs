use clap::Parser;
use locator_catalog::cli::commands::{cmd_inspect, cmd_scan};
use locator_catalog::cli::config::{Cli, Commands, load_config, resolve_scan};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Scan {
            roots,
            format,
            output,
            trace,
        } => {
            // CLI > config > defaults
            let scan = resolve_scan(&config.scan, roots, format, output, trace);
            cmd_scan(&scan, &config.extract, cli.verbose)?;
        }
        Commands::Inspect { template } => {
            cmd_inspect(&template, &config.extract, cli.verbose)?;
        }
    }

    Ok(())
}
