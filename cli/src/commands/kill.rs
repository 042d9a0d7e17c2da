//! Kill command - terminate the processes on one port.

use std::process::ExitCode;

use anyhow::Result;
use portguard_core::Error;

use super::{print_json, Context};
use crate::display::{display_kill_results, render_kill_targets};
use crate::prompt::confirm;

pub async fn run(
    ctx: &Context<'_>,
    port: &str,
    force: bool,
    yes: bool,
    escalate: bool,
) -> Result<ExitCode> {
    let port = port.trim();
    let targets = ctx.service.get_port_info(port).await?;

    if targets.is_empty() {
        not_in_use(ctx, port);
        return Ok(ExitCode::FAILURE);
    }

    if !ctx.json {
        print!("{}", render_kill_targets(&targets));
    }
    if !yes && !confirm("Continue?").await? {
        println!("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = if escalate {
        ctx.service
            .kill_port_escalating(port, ctx.settings.escalation_grace())
            .await
    } else {
        ctx.service.kill_port(port, force).await
    };

    let results = match outcome {
        Ok(results) => results,
        // Released between the lookup and the kill
        Err(Error::NoProcessOnPort { .. }) => {
            not_in_use(ctx, port);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.json {
        print_json(&results)?;
    } else {
        display_kill_results(ctx.palette, &results);
    }
    Ok(ExitCode::SUCCESS)
}

fn not_in_use(ctx: &Context<'_>, port: &str) {
    if ctx.json {
        println!("[]");
    } else {
        println!("{}", ctx.palette.warning(&format!("Port {} is not in use", port)));
    }
}
