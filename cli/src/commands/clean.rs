//! Clean command - kill leftover dev servers by process name.

use std::process::ExitCode;

use anyhow::Result;

use super::{print_json, Context};
use crate::display::{display_kill_results, render_zombie_targets};
use crate::prompt::confirm;

pub async fn run(ctx: &Context<'_>, force: bool, yes: bool) -> Result<ExitCode> {
    let zombies = ctx.service.identify_zombies().await?;

    if zombies.is_empty() {
        if ctx.json {
            print_json(&portguard_core::CleanupReport::default())?;
        } else {
            println!("No zombie processes found.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !ctx.json {
        print!("{}", render_zombie_targets(ctx.palette, &zombies));
    }
    if !yes && !confirm("Kill all?").await? {
        println!("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let report = ctx.service.kill_ports_of(&zombies, force).await;

    if ctx.json {
        print_json(&report)?;
        return Ok(ExitCode::SUCCESS);
    }

    display_kill_results(ctx.palette, &report.results);
    for failure in &report.port_failures {
        println!(
            "{} Failed on port {}: {}",
            ctx.palette.error("✗"),
            failure.port,
            failure.error
        );
    }
    println!(
        "\n{} killed, {} failed",
        ctx.palette.success(&report.succeeded().to_string()),
        ctx.palette.error(&report.failed().to_string())
    );
    Ok(ExitCode::SUCCESS)
}
