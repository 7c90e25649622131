// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::cli::ConfigCommand;
use crate::config::Config;
use crate::error::{Error, Result};

use super::Context;

pub fn run(ctx: &Context, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => print!("{}", toml::to_string_pretty(&ctx.config)?),
        ConfigCommand::Path => println!("{}", ctx.config_path.display()),
        ConfigCommand::Init { force } => {
            init(ctx, force)?;
            println!("Wrote {}", ctx.config_path.display());
        }
    }
    Ok(())
}

/// Writes the default config unless a file already exists.
pub(crate) fn init(ctx: &Context, force: bool) -> Result<()> {
    if ctx.config_path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists\n  hint: use --force to overwrite it",
            ctx.config_path.display()
        )));
    }
    Config::default().save(&ctx.config_path)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
