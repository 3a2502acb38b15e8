//! `tsc-closure config` command

use anyhow::{Context, Result};

use crate::cli::ConfigArgs;
use tsc_closure::util::config::HostConfig;

pub fn execute(args: ConfigArgs) -> Result<()> {
    let config = HostConfig::load(&args.path)?;
    let json = config
        .to_json_pretty()
        .context("failed to serialize host config")?;
    println!("{}", json);
    Ok(())
}
