use crate::cli::args::{Cli, CompletionCommands};
use crate::utils::errors::Result;
use clap::CommandFactory;
use clap_complete::generate;
use std::io;

pub fn handle_completion_command(command: &CompletionCommands) -> Result<()> {
    let mut cmd = Cli::command();
    generate(command.shell(), &mut cmd, "certmgr", &mut io::stdout());
    Ok(())
}
