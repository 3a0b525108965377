//! Device-tree blob placement.
//!
//! Source and destination share the same relative suffix so the boot
//! partition keeps the `boot/EFI/dtb/nvidia/<file>.dtb` layout the Jetson
//! firmware expects.

use sha2::{Digest, Sha256};
use std::fs::{DirBuilder, File};
use std::io::{self, BufReader, Read, Write};
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use crate::error::InstallError;

/// DTB root inside the artifacts tree.
pub const ARTIFACTS_DTB_DIR: &str = "arm64/dtb";

/// DTB root inside the mounted boot partition.
pub const BOOT_DTB_DIR: &str = "boot/EFI/dtb";

const DIR_MODE: u32 = 0o755;

/// `<artifacts>/arm64/dtb/<dtb>`
pub fn dtb_source(artifacts_path: &Path, dtb: &str) -> PathBuf {
    artifacts_path.join(ARTIFACTS_DTB_DIR).join(dtb)
}

/// `<mount_prefix>/boot/EFI/dtb/<dtb>`
pub fn dtb_destination(mount_prefix: &Path, dtb: &str) -> PathBuf {
    mount_prefix.join(BOOT_DTB_DIR).join(dtb)
}

/// Create every missing directory above `destination`.
pub fn ensure_parent_dir(destination: &Path) -> Result<(), InstallError> {
    let Some(parent) = destination.parent() else {
        return Ok(());
    };
    DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(parent)
        .map_err(|source| InstallError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })
}

/// Bytes and SHA-256 digest of a completed copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedBlob {
    pub bytes: u64,
    pub sha256: String,
}

/// Copy `source` over `destination`, truncating anything already there.
///
/// The write goes straight to the final path; a failure part way through can
/// leave a truncated destination behind.
pub fn copy_dtb(source: &Path, destination: &Path) -> Result<CopiedBlob, InstallError> {
    let copy_error = |err: io::Error| InstallError::Copy {
        source_path: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source: err,
    };

    let input = File::open(source).map_err(copy_error)?;
    // Checked before the destination is truncated so a rerun keeps the old blob.
    if !input.metadata().map_err(copy_error)?.is_file() {
        return Err(copy_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source is not a regular file",
        )));
    }
    let mut reader = BufReader::new(input);
    let mut output = File::create(destination).map_err(copy_error)?;

    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    let mut bytes = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(copy_error(err)),
        };
        output.write_all(&buf[..n]).map_err(copy_error)?;
        hasher.update(&buf[..n]);
        bytes += n as u64;
    }
    output.flush().map_err(copy_error)?;

    Ok(CopiedBlob {
        bytes,
        sha256: format!("{:x}", hasher.finalize()),
    })
}
