//! Single port lookup.

use std::process::ExitCode;

use anyhow::Result;

use super::{print_json, Context};
use crate::display::display_port_info;

pub async fn run(ctx: &Context<'_>, port: &str) -> Result<ExitCode> {
    let records = ctx.service.get_port_info(port).await?;

    if ctx.json {
        print_json(&records)?;
    } else {
        display_port_info(ctx.palette, port.trim(), &records);
    }
    Ok(ExitCode::SUCCESS)
}
