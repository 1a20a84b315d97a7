//! Text and JSON rendering of a resolved release.

use anyhow::{Context, Result};

use crate::links::ResolvedRelease;

/// Version, desktop links and Linux options, one per line.
pub fn render_summary(resolved: &ResolvedRelease) -> String {
    let links = &resolved.links;
    let mut out = format!("CortexIDE {}\n\n", resolved.version);

    out.push_str("Windows\n");
    out.push_str(&format!("  x64            {}\n", links.windows.x64));
    out.push_str(&format!("  ARM            {}\n", links.windows.arm));
    out.push_str("macOS\n");
    out.push_str(&format!("  Intel          {}\n", links.mac.intel));
    out.push_str(&format!("  Apple Silicon  {}\n", links.mac.apple_silicon));
    out.push_str("Linux\n");
    for option in &links.linux {
        out.push_str(&format!("  {:<30} {}\n", option.label, option.url));
    }

    out
}

/// Linux options as a table of package, format, architecture and URL.
pub fn render_linux_table(resolved: &ResolvedRelease) -> String {
    let rows: Vec<[&str; 4]> = resolved
        .links
        .linux
        .iter()
        .map(|o| [o.id.as_str(), o.format(), o.architecture(), o.url.as_str()])
        .collect();

    let header = ["PACKAGE", "FORMAT", "ARCHITECTURE", "URL"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = format!("Linux downloads for CortexIDE {}\n", resolved.version);
    for row in std::iter::once(header).chain(rows) {
        let line = format!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {}",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

pub fn render_json(resolved: &ResolvedRelease) -> Result<String> {
    serde_json::to_string_pretty(resolved).context("Failed to serialize resolved release")
}
