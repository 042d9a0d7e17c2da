//! Range command - usage of a closed port interval.

use std::process::ExitCode;

use anyhow::Result;

use super::{print_json, Context};
use crate::display::display_port_range;

pub async fn run(ctx: &Context<'_>, start: &str, end: &str) -> Result<ExitCode> {
    let summary = ctx.service.get_port_range(start, end).await?;

    if ctx.json {
        print_json(&summary)?;
    } else {
        display_port_range(ctx.palette, &summary);
    }
    Ok(ExitCode::SUCCESS)
}
