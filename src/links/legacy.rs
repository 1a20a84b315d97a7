//! Hardcoded links used when release data is unavailable.

use super::{
    DesktopTarget, DownloadLinks, LinuxOption, MacLinks, WindowsLinks, linux_rules,
    release_download_url,
};

/// Version reported when neither the API nor any version pointer answered.
pub const DEFAULT_VERSION: &str = "1.99.30023";

/// Last release whose Linux artifacts are known to exist.
pub const LEGACY_LINUX_RELEASE: &str = "1.99.30.0.2";

pub const FALLBACK_LINUX_OPTION_ID: &str = "linux-appimage-fallback";

const FALLBACK_LINUX_APPIMAGE_RELEASE: &str = "1.99.30001";

pub const FALLBACK_LINUX_APPIMAGE_URL: &str =
    "https://github.com/OpenCortexIDE/cortexide-binaries/releases/download/1.99.30001/CortexIDE-1.99.30001.glibc2.29-x86_64.AppImage";

const LEGACY_TARBALL_ARCHES: [&str; 6] = ["x64", "arm64", "armhf", "loong64", "ppc64le", "riscv64"];
const LEGACY_DEB_ARCHES: [&str; 2] = ["amd64", "arm64"];

/// The AppImage appended after the legacy list as a last resort.
pub fn fallback_linux_option() -> LinuxOption {
    LinuxOption::new(
        FALLBACK_LINUX_OPTION_ID,
        format!("Linux AppImage (Legacy {})", FALLBACK_LINUX_APPIMAGE_RELEASE),
        FALLBACK_LINUX_APPIMAGE_URL,
    )
    .with_source_version(FALLBACK_LINUX_APPIMAGE_RELEASE)
}

/// Linux options of the legacy release, followed by the fallback AppImage.
pub fn legacy_linux_options() -> Vec<LinuxOption> {
    let release = LEGACY_LINUX_RELEASE;
    let rules = linux_rules();
    let (tar, deb) = (&rules[0], &rules[1]);

    let tarballs = LEGACY_TARBALL_ARCHES.iter().map(|arch| {
        (
            tar,
            *arch,
            format!("CortexIDE-linux-{}-{}.tar.gz", arch, release),
        )
    });
    let debs = LEGACY_DEB_ARCHES
        .iter()
        .map(|arch| (deb, *arch, format!("cortexide_{}_{}.deb", release, arch)));

    tarballs
        .chain(debs)
        .map(|(rule, arch, file)| {
            LinuxOption::new(
                rule.option_id(arch),
                rule.label(arch),
                release_download_url(release, &file),
            )
            .with_source_version(release)
        })
        .chain(std::iter::once(fallback_linux_option()))
        .collect()
}

/// Links built from a version string alone, without inspecting assets.
pub fn default_links(version: &str) -> DownloadLinks {
    DownloadLinks {
        windows: WindowsLinks {
            x64: DesktopTarget::WindowsX64.conventional_url(version),
            arm: DesktopTarget::WindowsArm.conventional_url(version),
        },
        mac: MacLinks {
            intel: DesktopTarget::MacIntel.conventional_url(version),
            apple_silicon: DesktopTarget::MacAppleSilicon.conventional_url(version),
        },
        linux: legacy_linux_options(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const LEGACY_BASE: &str =
        "https://github.com/OpenCortexIDE/cortexide-binaries/releases/download/1.99.30.0.2";

    #[test]
    fn test_legacy_linux_options() {
        let options = legacy_linux_options();

        let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "tar-x64",
                "tar-arm64",
                "tar-armhf",
                "tar-loong64",
                "tar-ppc64le",
                "tar-riscv64",
                "deb-amd64",
                "deb-arm64",
                "linux-appimage-fallback",
            ]
        );

        assert_eq!(options[0].label, "Linux .tar.gz (x64)");
        assert_eq!(
            options[0].url,
            format!("{}/CortexIDE-linux-x64-1.99.30.0.2.tar.gz", LEGACY_BASE)
        );
        assert_eq!(options[5].label, "Linux .tar.gz (RISC-V64)");
        assert_eq!(options[6].label, "Linux .deb (AMD64)");
        assert_eq!(
            options[7].url,
            format!("{}/cortexide_1.99.30.0.2_arm64.deb", LEGACY_BASE)
        );
        assert!(
            options[..8]
                .iter()
                .all(|o| o.source_version.as_deref() == Some(LEGACY_LINUX_RELEASE))
        );
    }

    #[test]
    fn test_legacy_ids_are_unique() {
        let options = legacy_linux_options();
        let unique: HashSet<&str> = options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(unique.len(), options.len());
    }

    #[test]
    fn test_fallback_linux_option() {
        let option = fallback_linux_option();
        assert_eq!(option.id, "linux-appimage-fallback");
        assert_eq!(option.label, "Linux AppImage (Legacy 1.99.30001)");
        assert_eq!(option.url, FALLBACK_LINUX_APPIMAGE_URL);
        assert_eq!(option.source_version.as_deref(), Some("1.99.30001"));
    }

    #[test]
    fn test_default_links() {
        let links = default_links("v1.99.30050");

        assert_eq!(
            links.windows.arm,
            "https://github.com/OpenCortexIDE/cortexide-binaries/releases/download/v1.99.30050/CortexIDESetup-arm64-1.99.30050.exe"
        );
        assert_eq!(
            links.mac.intel,
            "https://github.com/OpenCortexIDE/cortexide-binaries/releases/download/v1.99.30050/CortexIDE.x64.1.99.30050.dmg"
        );
        assert_eq!(links.linux, legacy_linux_options());
    }
}
