//! `dope vault`: manage the configured vault directories

use std::process::ExitCode;

use dope::cli::VaultCommand;
use dope::util::display_path;
use dope::{Result, VaultConfig};

pub fn run(config: &mut VaultConfig, cmd: VaultCommand) -> Result<ExitCode> {
    match cmd {
        VaultCommand::Add { paths } => {
            let mut changed = false;
            for path in &paths {
                if config.add(path)? {
                    println!("Added '{}' to the configuration.", display_path(path));
                    changed = true;
                } else {
                    println!("Vault '{}' is already in the configuration.", display_path(path));
                }
            }
            if changed {
                config.save()?;
            }
        }
        VaultCommand::List => {
            if config.vaults().is_empty() {
                println!("No configured vaults in '{}'.", display_path(config.path()));
            } else {
                println!("Configured vaults ({}):", display_path(config.path()));
                for vault in config.vaults() {
                    println!("  {}", display_path(vault));
                }
            }
        }
        VaultCommand::Drop { paths } => {
            let mut changed = false;
            for path in &paths {
                if config.remove(path) {
                    println!("Dropped '{}' from the configuration.", display_path(path));
                    changed = true;
                } else {
                    println!("Vault '{}' is not in the configuration.", display_path(path));
                }
            }
            if changed {
                config.save()?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
