//! Terminal rendering for tables and kill outcomes.

use crossterm::style::{Color, Stylize};
use portguard_core::{KillResult, PortRangeSummary, PortRecord};

const PROCESS_WIDTH: usize = 20;
const ADDRESS_WIDTH: usize = 24;

/// Color switch, off when stdout is not a terminal or `NO_COLOR` is set.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn detect() -> Self {
        Self {
            enabled: atty::is(atty::Stream::Stdout) && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn header(&self, text: &str) -> String {
        if self.enabled {
            text.with(Color::Yellow).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn title(&self, text: &str) -> String {
        if self.enabled {
            text.with(Color::Cyan).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn port(&self, text: &str) -> String {
        self.paint(text, Color::Cyan)
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, Color::DarkGrey)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }
}

/// Table of listening ports.
pub fn render_ports(palette: &Palette, records: &[PortRecord]) -> String {
    let mut out = String::new();
    out.push_str(&palette.header(&format!(
        "{:<6} {:<8} {:<w$} ADDRESS",
        "PORT",
        "PID",
        "PROCESS",
        w = PROCESS_WIDTH
    )));
    out.push('\n');
    out.push_str(&palette.muted(&"-".repeat(6 + 1 + 8 + 1 + PROCESS_WIDTH + 1 + ADDRESS_WIDTH)));
    out.push('\n');

    for record in records {
        // Pad before painting so escape codes do not skew the columns
        let port = palette.port(&format!("{:<6}", record.port));
        let pid = format!("{:<8}", record.pid);
        let name = format!(
            "{:<w$}",
            truncate(&record.process_name, PROCESS_WIDTH),
            w = PROCESS_WIDTH
        );
        let address = palette.muted(&truncate(&record.address, ADDRESS_WIDTH));
        out.push_str(&format!("{} {} {} {}\n", port, pid, name, address));
    }
    out
}

/// The listing shown by `portguard` and `portguard list`.
pub fn display_ports(palette: &Palette, records: &[PortRecord]) {
    if records.is_empty() {
        println!("No listening ports found.");
        return;
    }
    print!("{}", render_ports(palette, records));
    println!("\nTotal: {} ports", records.len());
}

/// Details of everything listening on one port.
pub fn display_port_info(palette: &Palette, port: &str, records: &[PortRecord]) {
    if records.is_empty() {
        println!("{}", palette.warning(&format!("Port {} is not in use", port)));
        return;
    }

    println!("{}", palette.title(&format!("Port {}", port)));
    for record in records {
        println!("  PID:      {}", record.pid);
        println!("  Process:  {}", record.process_name);
        println!("  Address:  {}", record.address);
        println!();
    }
}

/// Range totals followed by the used ports.
pub fn display_port_range(palette: &Palette, summary: &PortRangeSummary) {
    println!(
        "{}",
        palette.title(&format!("Ports {}-{}", summary.start, summary.end))
    );
    println!("  Total:  {}", summary.total);
    println!("  Used:   {}", palette.warning(&summary.used.to_string()));
    println!("  Free:   {}", palette.success(&summary.free.to_string()));

    if !summary.ports.is_empty() {
        println!();
        print!("{}", render_ports(palette, &summary.ports));
    }
}

/// Targets announced before `kill` signals anything.
pub fn render_kill_targets(records: &[PortRecord]) -> String {
    let mut out = String::from("About to kill:\n");
    for record in records {
        out.push_str(&format!("  {}\n", record));
    }
    out
}

/// Candidates announced before `clean` signals anything.
pub fn render_zombie_targets(palette: &Palette, records: &[PortRecord]) -> String {
    format!(
        "Found {} zombie process(es):\n\n{}\n",
        records.len(),
        render_ports(palette, records)
    )
}

/// One line per termination attempt.
pub fn kill_line(palette: &Palette, result: &KillResult) -> String {
    let record = &result.record;
    if result.success {
        format!(
            "{} Killed PID {} ({})",
            palette.success("✓"),
            record.pid,
            record.process_name
        )
    } else {
        format!(
            "{} Failed to kill PID {}: {}",
            palette.error("✗"),
            record.pid,
            result.error.as_deref().unwrap_or("unknown error")
        )
    }
}

pub fn display_kill_results(palette: &Palette, results: &[KillResult]) {
    for result in results {
        println!("{}", kill_line(palette, result));
    }
}

/// Shorten to `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
