//! Watch command - re-render the port table until interrupted.

use std::future::Future;
use std::io::stdout;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use tokio::time::MissedTickBehavior;
use tracing::warn;

use super::{print_json, Context};
use crate::display::display_ports;

pub async fn run(ctx: &Context<'_>, interval: Option<u64>) -> Result<ExitCode> {
    let period = match interval {
        Some(secs) => Duration::from_secs(secs.max(1)),
        None => ctx.settings.watch_period(),
    };

    run_until(period, tokio::signal::ctrl_c(), || refresh(ctx, period)).await?;
    println!("\nStopped watching");
    Ok(ExitCode::SUCCESS)
}

/// Call `step` once per `period` until `interrupt` completes.
///
/// A step still in flight when the interrupt arrives is dropped.
async fn run_until<I, S, F>(period: Duration, interrupt: I, mut step: S) -> Result<()>
where
    I: Future,
    S: FnMut() -> F,
    F: Future<Output = Result<()>>,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut interrupt => return Ok(()),
        }
        tokio::select! {
            result = step() => result?,
            _ = &mut interrupt => return Ok(()),
        }
    }
}

async fn refresh(ctx: &Context<'_>, period: Duration) -> Result<()> {
    // A failed enumeration is shown and retried on the next tick
    let ports = match ctx.service.list_active_ports().await {
        Ok(ports) => ports,
        Err(e) => {
            warn!(error = %e, "Refresh failed");
            if !ctx.json {
                clear()?;
                println!("{}{}", ctx.palette.error("Error: "), e);
            }
            return Ok(());
        }
    };

    if ctx.json {
        return print_json(&ports);
    }

    clear()?;
    println!(
        "{}",
        ctx.palette.title(&format!(
            "portguard watch | every {}s | {}",
            period.as_secs(),
            Local::now().format("%H:%M:%S")
        ))
    );
    println!("{}\n", ctx.palette.muted("Press Ctrl+C to stop"));
    display_ports(ctx.palette, &ports);
    Ok(())
}

fn clear() -> Result<()> {
    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}
