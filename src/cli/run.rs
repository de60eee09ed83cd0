use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{create_keys::create_keys, init::init, translate::translate},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
///
/// # Returns
/// - `Ok(ExitStatus)` once the command has run (declined prompts are `Success`)
/// - `Err` if the command fails (e.g. unreadable file, invalid config, missing manifest)
pub fn run(Arguments { command, .. }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::CreateKeys(cmd)) => create_keys(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
