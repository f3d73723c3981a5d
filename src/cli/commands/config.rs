//! jm config - Show the effective configuration

use clap::Args;

use crate::app::AppContext;
use crate::cli::output;
use crate::error::{JmError, Result};

#[derive(Args, Debug)]
pub struct ConfigArgs {}

pub fn run(ctx: &AppContext, _args: &ConfigArgs) -> Result<()> {
    if ctx.robot_mode {
        return output::emit_json(&ctx.config);
    }

    let rendered = toml::to_string_pretty(&ctx.config)
        .map_err(|err| JmError::Config(format!("render config: {err}")))?;
    println!("{rendered}");
    Ok(())
}
