mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use panelctl_api::{MonitorClient, VirtClient};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "panelctl", &mut std::io::stdout());
            Ok(())
        }

        Command::Virt(args) => {
            let cfg = panelctl_config::load_config()?;
            let client = VirtClient::new(config::virt_config(&cli.global, &cfg)?)?;
            commands::virt::handle(&client, args.command, &cli.global).await
        }

        Command::Monitor(args) => {
            let cfg = panelctl_config::load_config()?;
            let client = MonitorClient::new(config::monitor_config(&cli.global, &cfg)?)?;
            commands::monitor::handle(&client, args.command, &cli.global).await
        }
    }
}
