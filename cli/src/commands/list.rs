//! List command - show all listening ports.

use std::process::ExitCode;

use anyhow::Result;

use super::{print_json, Context};
use crate::display::display_ports;

pub async fn run(ctx: &Context<'_>) -> Result<ExitCode> {
    let ports = ctx.service.list_active_ports().await?;

    if ctx.json {
        print_json(&ports)?;
    } else {
        display_ports(ctx.palette, &ports);
    }
    Ok(ExitCode::SUCCESS)
}
