//! The two-phase overlay installer contract.
//!
//! The host first asks each overlay for its [`Options`] and folds the kernel
//! arguments into the boot configuration. Once the disk is partitioned and
//! the boot partition is mounted, it calls [`OverlayInstaller::install`] to
//! place the board's boot artifacts.
//!
//! # Install sequence
//!
//! ```text
//! sync install disk ──► ensure boot/EFI/dtb/<dir> ──► copy DTB ──► report
//!        │                        │                      │
//!   DeviceAccess          DirectoryCreation             Copy
//! ```
//!
//! The first failure is returned as-is. Nothing is rolled back; both
//! directory creation and the copy overwrite safely, so the host can rerun
//! the whole install.

pub mod device;
pub mod dtb;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::board::BoardProfile;
use crate::error::InstallError;

/// Overlay options reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kernel_args: Vec<String>,
}

/// Board-specific extra options. The Jetson overlays take none, and unknown
/// keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraOptions {}

/// What the host hands to [`OverlayInstaller::install`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InstallRequest {
    /// Block device or disk image being prepared.
    pub install_disk: PathBuf,
    /// Root of the build artifacts tree.
    pub artifacts_path: PathBuf,
    /// Where the target boot partition is mounted.
    pub mount_prefix: PathBuf,
    #[serde(default)]
    pub extra_options: ExtraOptions,
}

/// Result of a successful install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

/// An overlay the host can query and apply.
pub trait OverlayInstaller {
    /// Board id this overlay serves.
    fn name(&self) -> &str;

    /// Phase 1: report the overlay name and kernel arguments. No I/O.
    fn describe_options(&self, extra: &ExtraOptions) -> Result<Options, InstallError>;

    /// Phase 2: customize the prepared disk. Blocks until done or the first error.
    fn install(&self, request: &InstallRequest) -> Result<InstallReport, InstallError>;
}

/// Overlay driven entirely by a [`BoardProfile`].
#[derive(Debug, Clone, Copy)]
pub struct BoardOverlay {
    profile: &'static BoardProfile,
}

impl BoardOverlay {
    pub const fn new(profile: &'static BoardProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &'static BoardProfile {
        self.profile
    }
}

impl OverlayInstaller for BoardOverlay {
    fn name(&self) -> &str {
        self.profile.name
    }

    fn describe_options(&self, _extra: &ExtraOptions) -> Result<Options, InstallError> {
        Ok(Options {
            name: self.profile.name.to_string(),
            kernel_args: self
                .profile
                .kernel_args
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
        })
    }

    fn install(&self, request: &InstallRequest) -> Result<InstallReport, InstallError> {
        device::sync_install_disk(&request.install_disk)?;

        let source = dtb::dtb_source(&request.artifacts_path, self.profile.dtb);
        let destination = dtb::dtb_destination(&request.mount_prefix, self.profile.dtb);

        dtb::ensure_parent_dir(&destination)?;
        let copied = dtb::copy_dtb(&source, &destination)?;

        Ok(InstallReport {
            source,
            destination,
            bytes: copied.bytes,
            sha256: copied.sha256,
        })
    }
}
