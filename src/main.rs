use std::process::ExitCode;

use clap::Parser;
use dope::{config, logging, Cli, Command, VaultConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> dope::Result<ExitCode> {
    let config_dir = config::config_dir(cli.config_dir.as_deref())?;
    let mut config = VaultConfig::load(&config_dir)?;

    match cli.command {
        Command::Tasks(args) => cmd::tasks::run(&config, &cli.vaults, &args),
        Command::Edu => cmd::edu::run(&config, &cli.vaults),
        Command::Links(links_cmd) => cmd::links::run(&config, &cli.vaults, links_cmd),
        Command::Vault(vault_cmd) => cmd::vault::run(&mut config, vault_cmd),
        Command::Lint => cmd::lint::run(&config, &cli.vaults),
    }
}

mod cmd {
    pub mod edu;
    pub mod links;
    pub mod lint;
    pub mod tasks;
    pub mod vault;
}
