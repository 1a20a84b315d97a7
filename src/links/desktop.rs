//! Windows and macOS link resolution.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::source::{Release, ReleaseAsset};

use super::{MacLinks, WindowsLinks, normalize_version, release_download_url};

fn patterns(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|p| Regex::new(p).expect("valid desktop asset pattern"))
        .collect()
}

// Current naming first, then the pre-rename `Void` naming, then the
// `darwin-<arch>` naming some macOS builds used.
static WINDOWS_X64: Lazy<Vec<Regex>> =
    Lazy::new(|| patterns(&[r"(?i)^CortexIDE.*x64.*\.exe$", r"(?i)^VoidSetup-x64-.*\.exe$"]));
static WINDOWS_ARM: Lazy<Vec<Regex>> = Lazy::new(|| {
    patterns(&[
        r"(?i)^CortexIDE.*arm64.*\.exe$",
        r"(?i)^VoidSetup-arm64-.*\.exe$",
    ])
});
static MAC_INTEL: Lazy<Vec<Regex>> = Lazy::new(|| {
    patterns(&[
        r"(?i)^CortexIDE\.x64\..*\.dmg$",
        r"(?i)^Void\.x64\..*\.dmg$",
        r"(?i)darwin-x64.*\.dmg$",
    ])
});
static MAC_APPLE_SILICON: Lazy<Vec<Regex>> = Lazy::new(|| {
    patterns(&[
        r"(?i)^CortexIDE\.arm64\..*\.dmg$",
        r"(?i)^Void\.arm64\..*\.dmg$",
        r"(?i)darwin-arm64.*\.dmg$",
    ])
});

/// The four desktop installers a release is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesktopTarget {
    WindowsX64,
    WindowsArm,
    MacIntel,
    MacAppleSilicon,
}

impl DesktopTarget {
    pub const ALL: [DesktopTarget; 4] = [
        DesktopTarget::WindowsX64,
        DesktopTarget::WindowsArm,
        DesktopTarget::MacIntel,
        DesktopTarget::MacAppleSilicon,
    ];

    /// Asset name patterns, in the order they are tried.
    pub fn patterns(self) -> &'static [Regex] {
        match self {
            DesktopTarget::WindowsX64 => WINDOWS_X64.as_slice(),
            DesktopTarget::WindowsArm => WINDOWS_ARM.as_slice(),
            DesktopTarget::MacIntel => MAC_INTEL.as_slice(),
            DesktopTarget::MacAppleSilicon => MAC_APPLE_SILICON.as_slice(),
        }
    }

    /// Conventional installer file name for a normalized version.
    pub fn file_name(self, version: &str) -> String {
        match self {
            DesktopTarget::WindowsX64 => format!("CortexIDESetup-x64-{}.exe", version),
            DesktopTarget::WindowsArm => format!("CortexIDESetup-arm64-{}.exe", version),
            DesktopTarget::MacIntel => format!("CortexIDE.x64.{}.dmg", version),
            DesktopTarget::MacAppleSilicon => format!("CortexIDE.arm64.{}.dmg", version),
        }
    }

    /// URL the installer would have under the conventional naming.
    pub fn conventional_url(self, tag: &str) -> String {
        release_download_url(tag, &self.file_name(normalize_version(tag)))
    }

    /// Picks the asset URL for this target, or the conventional URL.
    pub fn resolve(self, assets: &[ReleaseAsset], tag: &str) -> String {
        self.patterns()
            .iter()
            .find_map(|pattern| pick(assets, pattern))
            .unwrap_or_else(|| self.conventional_url(tag))
    }
}

/// URL of the first asset whose name matches `pattern`.
fn pick(assets: &[ReleaseAsset], pattern: &Regex) -> Option<String> {
    assets
        .iter()
        .find(|a| pattern.is_match(&a.name))
        .and_then(|a| a.download_url.clone())
}

pub fn resolve_desktop_links(assets: &[ReleaseAsset], tag: &str) -> (WindowsLinks, MacLinks) {
    let windows = WindowsLinks {
        x64: DesktopTarget::WindowsX64.resolve(assets, tag),
        arm: DesktopTarget::WindowsArm.resolve(assets, tag),
    };
    let mac = MacLinks {
        intel: DesktopTarget::MacIntel.resolve(assets, tag),
        apple_silicon: DesktopTarget::MacAppleSilicon.resolve(assets, tag),
    };
    (windows, mac)
}

/// Conventional installer names missing from a release.
pub fn missing_required_assets(release: &Release) -> Vec<String> {
    let version = normalize_version(&release.tag);
    DesktopTarget::ALL
        .iter()
        .map(|target| target.file_name(version))
        .filter(|name| !release.assets.iter().any(|a| &a.name == name))
        .collect()
}
