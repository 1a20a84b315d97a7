//! Linux asset classification.
//!
//! Classification is driven by [`linux_rules`], an ordered table. Each
//! asset is offered to the rules in order and the first rule that matches
//! claims it. An option id (`<kind>-<arch>`) is only ever emitted once: the
//! first asset to produce it wins.

use std::collections::HashSet;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::source::ReleaseAsset;

use super::LinuxOption;

/// Checksum, signature and zsync files published next to the artifacts.
static SIDECAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\.(sha1|sha256|sha512|sig|asc)|\.zsync(\.sha1|\.sha256)?)$")
        .expect("valid sidecar pattern")
});

/// Architecture tokens that may appear anywhere in an AppImage name.
static APPIMAGE_ARCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(x86_64|amd64|arm64|aarch64|armhf|ppc64le|loong64|riscv64)")
        .expect("valid AppImage architecture pattern")
});

static LINUX_RULES: Lazy<Vec<LinuxRule>> = Lazy::new(|| {
    vec![
        LinuxRule::new(
            "tar",
            ".tar.gz",
            r"(?i)^CortexIDE-linux-([a-z0-9]+)-.*\.tar\.gz$",
            ArchSource::Capture,
        ),
        LinuxRule::new(
            "deb",
            ".deb",
            r"(?i)^cortexide_.*_(amd64|arm64|armhf)\.deb$",
            ArchSource::Capture,
        ),
        LinuxRule::new(
            "appimage",
            "AppImage",
            r"(?i)^CortexIDE-.*\.AppImage$",
            ArchSource::Search { default: "x86_64" },
        ),
    ]
});

/// How a rule finds the architecture of a matching asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchSource {
    /// The first capture group of the rule's pattern
    Capture,
    /// The first known architecture token in the name, or `default`
    Search { default: &'static str },
}

/// One entry of the Linux classification table.
#[derive(Debug)]
pub struct LinuxRule {
    /// Id prefix, e.g. `deb`
    pub kind: &'static str,
    /// Format shown in labels, e.g. `.deb`
    pub format: &'static str,
    pattern: Regex,
    arch: ArchSource,
}

impl LinuxRule {
    fn new(kind: &'static str, format: &'static str, pattern: &str, arch: ArchSource) -> Self {
        Self {
            kind,
            format,
            pattern: Regex::new(pattern).expect("valid linux asset pattern"),
            arch,
        }
    }

    /// Returns the lowercased architecture when `name` matches this rule.
    pub fn match_arch(&self, name: &str) -> Option<String> {
        let captures = self.pattern.captures(name)?;
        let arch = match self.arch {
            ArchSource::Capture => captures.get(1)?.as_str(),
            ArchSource::Search { default } => APPIMAGE_ARCH
                .find(name)
                .map(|m| m.as_str())
                .unwrap_or(default),
        };
        Some(arch.to_lowercase())
    }

    pub fn option_id(&self, arch: &str) -> String {
        format!("{}-{}", self.kind, arch)
    }

    pub fn label(&self, arch: &str) -> String {
        format!("Linux {} ({})", self.format, format_arch_label(arch))
    }
}

/// The classification table, in priority order.
pub fn linux_rules() -> &'static [LinuxRule] {
    LINUX_RULES.as_slice()
}

/// Display label for an architecture code. Unknown codes pass through.
pub fn format_arch_label(arch: &str) -> String {
    let label = match arch.to_lowercase().as_str() {
        "x64" => "x64",
        "x86_64" => "x86_64",
        "amd64" => "AMD64",
        "arm64" | "aarch64" => "ARM64",
        "armhf" => "ARMHF",
        "loong64" => "Loong64",
        "ppc64le" => "PPC64LE",
        "riscv64" => "RISC-V64",
        _ => return arch.to_string(),
    };
    label.to_string()
}

pub fn is_sidecar(name: &str) -> bool {
    SIDECAR.is_match(name)
}

/// Builds Linux options from release assets, in asset order.
///
/// The returned options carry no `source_version`; the caller stamps it.
pub fn classify_linux_assets(assets: &[ReleaseAsset]) -> Vec<LinuxOption> {
    let mut options = Vec::new();
    let mut seen = HashSet::new();

    for asset in assets {
        let Some(url) = asset.download_url.as_deref() else {
            continue;
        };
        if asset.name.is_empty() || is_sidecar(&asset.name) {
            continue;
        }

        let Some((rule, arch)) = linux_rules()
            .iter()
            .find_map(|rule| rule.match_arch(&asset.name).map(|arch| (rule, arch)))
        else {
            continue;
        };

        let id = rule.option_id(&arch);
        if !seen.insert(id.clone()) {
            debug!("Skipping {}: {} already provided", asset.name, id);
            continue;
        }
        options.push(LinuxOption::new(id, rule.label(&arch), url));
    }

    options
}
