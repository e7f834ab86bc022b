//! Config command handlers.

use anyhow::{Context, Result};
use techhub_core::config::{self, Config};

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let path = Config::initialize().context("init config")?;
    println!("Created config at {}", path.display());
    Ok(())
}
