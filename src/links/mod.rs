//! Download link model and the classifiers that build it from release assets.
//!
//! A [`DownloadLinks`] value is what a download page renders: two Windows
//! installers, two macOS disk images and an ordered list of Linux packages.
//! It is built either from a live [`Release`] ([`DownloadLinks::from_release`])
//! or, when no release data is available, purely from a version string
//! ([`default_links`]).

mod desktop;
mod legacy;
mod linux;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::source::Release;

pub use desktop::{DesktopTarget, missing_required_assets, resolve_desktop_links};
pub use legacy::{
    DEFAULT_VERSION, FALLBACK_LINUX_APPIMAGE_URL, FALLBACK_LINUX_OPTION_ID, LEGACY_LINUX_RELEASE,
    default_links, fallback_linux_option, legacy_linux_options,
};
pub use linux::{
    ArchSource, LinuxRule, classify_linux_assets, format_arch_label, is_sidecar, linux_rules,
};

/// Where published release artifacts are downloaded from.
pub const RELEASE_DOWNLOAD_BASE: &str =
    "https://github.com/OpenCortexIDE/cortexide-binaries/releases/download";

static LABEL_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Linux\s+(.*)\s+\(").expect("valid label format pattern"));
static LABEL_ARCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("valid label architecture pattern"));

/// One selectable Linux download (format x architecture).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinuxOption {
    /// Unique key within one [`DownloadLinks`], e.g. `deb-arm64`
    pub id: String,
    /// Human-readable label, e.g. `Linux .deb (ARM64)`
    pub label: String,
    pub url: String,
    /// Release the artifact belongs to, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_version: Option<String>,
}

impl LinuxOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: url.into(),
            source_version: None,
        }
    }

    pub fn with_source_version(mut self, version: impl Into<String>) -> Self {
        self.source_version = Some(version.into());
        self
    }

    /// Package format parsed from the label (`.tar.gz`, `.deb`, `AppImage`).
    pub fn format(&self) -> &str {
        LABEL_FORMAT
            .captures(&self.label)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .unwrap_or("Download")
    }

    /// Architecture parsed from the label.
    pub fn architecture(&self) -> &str {
        LABEL_ARCH
            .captures(&self.label)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsLinks {
    pub x64: String,
    pub arm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacLinks {
    pub intel: String,
    pub apple_silicon: String,
}

/// Presentation-ready links for one release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLinks {
    pub windows: WindowsLinks,
    pub mac: MacLinks,
    pub linux: Vec<LinuxOption>,
}

impl DownloadLinks {
    /// Builds links from a live release.
    ///
    /// Linux options come from asset classification; when nothing
    /// classifies, the legacy Linux list is used instead. Windows and macOS
    /// links always resolve, falling back to conventional asset URLs.
    pub fn from_release(release: &Release) -> Self {
        let version = release.tag.as_str();

        let mut linux = classify_linux_assets(&release.assets);
        if linux.is_empty() {
            linux = legacy_linux_options();
        } else {
            for option in &mut linux {
                option.source_version = Some(version.to_string());
            }
        }

        let (windows, mac) = resolve_desktop_links(&release.assets, version);

        Self {
            windows,
            mac,
            linux,
        }
    }

    /// True when every platform link is present.
    pub fn is_complete(&self) -> bool {
        [
            &self.windows.x64,
            &self.windows.arm,
            &self.mac.intel,
            &self.mac.apple_silicon,
        ]
        .iter()
        .all(|url| !url.is_empty())
            && !self.linux.is_empty()
            && self
                .linux
                .iter()
                .all(|o| !o.id.is_empty() && !o.label.is_empty() && !o.url.is_empty())
    }
}

/// A version together with its download links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRelease {
    pub version: String,
    pub links: DownloadLinks,
}

/// Strips a single leading `v` from a release tag.
pub fn normalize_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// URL of an artifact published under the given release tag.
pub fn release_download_url(tag: &str, file_name: &str) -> String {
    format!("{}/{}/{}", RELEASE_DOWNLOAD_BASE, tag, file_name)
}
