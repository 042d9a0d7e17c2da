//! CLI subcommands.

pub mod clean;
pub mod info;
pub mod kill;
pub mod list;
pub mod range;
pub mod watch;

use portguard_core::{Settings, SystemPortService};

use crate::display::Palette;

/// Everything a command needs, built once in `main`.
pub struct Context<'a> {
    pub service: &'a SystemPortService,
    pub settings: &'a Settings,
    pub palette: &'a Palette,
    pub json: bool,
}

/// Print `value` as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
