//! Install disk synchronization.

use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use crate::error::InstallError;

/// Flush earlier pipeline writes on the install disk to storage.
///
/// When the disk is a loop-backed image, its page cache must be written out
/// before the loop device is detached. The handle is closed on return.
pub fn sync_install_disk(install_disk: &Path) -> Result<(), InstallError> {
    let device_error = |source: std::io::Error| InstallError::DeviceAccess {
        path: install_disk.to_path_buf(),
        source,
    };

    let disk = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_CLOEXEC)
        .open(install_disk)
        .map_err(device_error)?;

    disk.sync_all().map_err(device_error)
}
