//! Static board profiles.
//!
//! A profile is everything that differs between two Jetson overlays: the
//! board id the host knows it by, the kernel arguments it contributes to the
//! boot command line, and where its device-tree blob lives relative to the
//! per-architecture DTB root.

/// Per-board data consumed by [`crate::overlay::BoardOverlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardProfile {
    /// Board identifier, also the overlay name reported to the host.
    pub name: &'static str,
    /// Kernel command-line tokens, in command-line order.
    pub kernel_args: &'static [&'static str],
    /// DTB path relative to `arm64/dtb` in the artifacts tree and to
    /// `boot/EFI/dtb` in the boot partition.
    pub dtb: &'static str,
}

/// Jetson AGX Orin developer kit (P3701 module on P3737 carrier).
pub const JETSON_AGX_ORIN: BoardProfile = BoardProfile {
    name: "jetson_agx_orin",
    kernel_args: &[
        "console=tty0",
        "console=ttyS0,115200",
        "sysctl.kernel.kexec_load_disabled=1",
        "talos.dashboard.disabled=1",
        "tegra_fbmem=0x2000000@0x278000000",
        "lut_mem=0x2008@0x276000000",
        "nvdec_enabled",
        "nvidia_drm.modeset=1",
    ],
    dtb: "nvidia/tegra234-p3701-0000+p3737-0000.dtb",
};

/// Jetson Orin Nano developer kit (P3767 module on P3768 carrier).
pub const JETSON_ORIN_NANO: BoardProfile = BoardProfile {
    name: "jetson_orin_nano",
    kernel_args: &[
        "console=tty0",
        "console=ttyS0,115200",
        "sysctl.kernel.kexec_load_disabled=1",
        "talos.dashboard.disabled=1",
        "tegra_fbmem=0x800000@0x278800000",
        "lut_mem=0x2008@0x278000000",
    ],
    dtb: "nvidia/tegra234-p3768-0000+p3767-0000.dtb",
};

/// Every supported board.
pub const BOARDS: &[&BoardProfile] = &[&JETSON_AGX_ORIN, &JETSON_ORIN_NANO];

impl BoardProfile {
    /// Look up a built-in profile by board id.
    pub fn find(name: &str) -> Option<&'static BoardProfile> {
        BOARDS.iter().copied().find(|board| board.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_boards() {
        assert_eq!(BoardProfile::find("jetson_agx_orin"), Some(&JETSON_AGX_ORIN));
        assert_eq!(
            BoardProfile::find("jetson_orin_nano"),
            Some(&JETSON_ORIN_NANO)
        );
        assert!(BoardProfile::find("rpi_generic").is_none());
    }

    #[test]
    fn test_board_names_unique() {
        for (i, a) in BOARDS.iter().enumerate() {
            for b in &BOARDS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_dtb_paths_are_relative_nvidia_blobs() {
        for board in BOARDS {
            assert!(!board.dtb.starts_with('/'), "{} dtb is absolute", board.name);
            assert!(board.dtb.starts_with("nvidia/"));
            assert!(board.dtb.ends_with(".dtb"));
        }
    }

    #[test]
    fn test_shared_console_args_lead() {
        let shared = [
            "console=tty0",
            "console=ttyS0,115200",
            "sysctl.kernel.kexec_load_disabled=1",
            "talos.dashboard.disabled=1",
        ];
        for board in BOARDS {
            assert_eq!(&board.kernel_args[..shared.len()], &shared);
        }
    }
}
