//! Host protocol: one command per process invocation, JSON in and out.
//!
//! ```text
//! overlay-installer <board> get-options   stdin: ExtraOptions (optional)   stdout: Options
//! overlay-installer <board> install       stdin: InstallRequest            stdout: InstallReport
//! ```

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::overlay::{ExtraOptions, InstallRequest, OverlayInstaller};

/// Phase requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GetOptions,
    Install,
}

impl Command {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "get-options" => Ok(Command::GetOptions),
            "install" => Ok(Command::Install),
            other => bail!(
                "unsupported overlay command '{}'; expected 'get-options' or 'install'",
                other
            ),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::GetOptions => write!(f, "get-options"),
            Command::Install => write!(f, "install"),
        }
    }
}

/// Run `command` against `installer`, decoding the host payload from `input`
/// and writing the JSON response to `output`.
pub fn execute(
    installer: &dyn OverlayInstaller,
    command: Command,
    mut input: impl Read,
    output: impl Write,
) -> Result<()> {
    let mut payload = String::new();
    input
        .read_to_string(&mut payload)
        .with_context(|| format!("reading {} payload for '{}'", command, installer.name()))?;

    match command {
        Command::GetOptions => {
            let extra: ExtraOptions = if payload.trim().is_empty() {
                ExtraOptions::default()
            } else {
                serde_json::from_str(&payload).with_context(|| {
                    format!("parsing extra options for '{}'", installer.name())
                })?
            };
            let options = installer
                .describe_options(&extra)
                .with_context(|| format!("describing options for '{}'", installer.name()))?;
            write_json(output, &options)
        }
        Command::Install => {
            let request: InstallRequest = serde_json::from_str(&payload)
                .with_context(|| format!("parsing install request for '{}'", installer.name()))?;
            run_install(installer, &request, output)
        }
    }
}

/// Install from an already-decoded request and write the report to `output`.
pub fn run_install(
    installer: &dyn OverlayInstaller,
    request: &InstallRequest,
    output: impl Write,
) -> Result<()> {
    let report = installer.install(request).with_context(|| {
        format!(
            "installing '{}' overlay onto '{}'",
            installer.name(),
            request.install_disk.display()
        )
    })?;
    write_json(output, &report)
}

/// Read an [`InstallRequest`] from a file: `.toml` as TOML, anything else as JSON.
pub fn load_request(path: &Path) -> Result<InstallRequest> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading install request '{}'", path.display()))?;
    let request = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&contents)
            .with_context(|| format!("parsing install request '{}'", path.display()))?,
        _ => serde_json::from_str(&contents)
            .with_context(|| format!("parsing install request '{}'", path.display()))?,
    };
    Ok(request)
}

fn write_json(mut output: impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer(&mut output, value).context("encoding overlay response")?;
    writeln!(output).context("writing overlay response")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{JETSON_AGX_ORIN, JETSON_ORIN_NANO};
    use crate::error::InstallError;
    use crate::overlay::{BoardOverlay, InstallReport, Options};
    use tempfile::TempDir;

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::parse("get-options").unwrap(), Command::GetOptions);
        assert_eq!(Command::parse("install").unwrap(), Command::Install);
        assert!(Command::parse("uninstall").is_err());
    }

    #[test]
    fn test_get_options_with_empty_stdin() {
        let overlay = BoardOverlay::new(&JETSON_ORIN_NANO);
        let mut out = Vec::new();

        execute(&overlay, Command::GetOptions, &b""[..], &mut out).unwrap();

        let options: Options = serde_json::from_slice(&out).unwrap();
        assert_eq!(options.name, "jetson_orin_nano");
        assert_eq!(options.kernel_args.len(), 6);
    }

    #[test]
    fn test_get_options_rejects_garbage() {
        let overlay = BoardOverlay::new(&JETSON_ORIN_NANO);
        let mut out = Vec::new();
        assert!(execute(&overlay, Command::GetOptions, &b"not json"[..], &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_install_over_protocol() {
        let temp = TempDir::new().unwrap();
        let disk = temp.path().join("disk.raw");
        let artifacts = temp.path().join("_out");
        let mount = temp.path().join("mnt");
        fs::write(&disk, b"").unwrap();
        fs::create_dir_all(&mount).unwrap();
        let src = artifacts.join("arm64/dtb").join(JETSON_AGX_ORIN.dtb);
        fs::create_dir_all(src.parent().unwrap()).unwrap();
        fs::write(&src, b"B").unwrap();

        let payload = serde_json::json!({
            "installDisk": disk,
            "artifactsPath": artifacts,
            "mountPrefix": mount,
            "extraOptions": {},
        })
        .to_string();
        let overlay = BoardOverlay::new(&JETSON_AGX_ORIN);
        let mut out = Vec::new();

        execute(&overlay, Command::Install, payload.as_bytes(), &mut out).unwrap();

        let report: InstallReport = serde_json::from_slice(&out).unwrap();
        assert_eq!(report.bytes, 1);
        assert_eq!(fs::read(&report.destination).unwrap(), b"B");
        assert!(report
            .destination
            .ends_with("boot/EFI/dtb/nvidia/tegra234-p3701-0000+p3737-0000.dtb"));
    }

    #[test]
    fn test_install_failure_keeps_typed_cause() {
        let temp = TempDir::new().unwrap();
        let request = InstallRequest {
            install_disk: temp.path().join("missing.raw"),
            artifacts_path: temp.path().join("_out"),
            mount_prefix: temp.path().join("mnt"),
            extra_options: ExtraOptions::default(),
        };
        let overlay = BoardOverlay::new(&JETSON_AGX_ORIN);
        let mut out = Vec::new();

        let err = run_install(&overlay, &request, &mut out).unwrap_err();

        let cause = err.downcast_ref::<InstallError>().unwrap();
        assert!(matches!(cause, InstallError::DeviceAccess { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_load_request_toml_and_json() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("request.toml");
        fs::write(
            &toml_path,
            "installDisk = \"/dev/loop3\"\nartifactsPath = \"/_out\"\nmountPrefix = \"/mnt\"\n",
        )
        .unwrap();
        let json_path = temp.path().join("request.json");
        fs::write(
            &json_path,
            r#"{"installDisk":"/dev/loop3","artifactsPath":"/_out","mountPrefix":"/mnt"}"#,
        )
        .unwrap();

        let from_toml = load_request(&toml_path).unwrap();
        let from_json = load_request(&json_path).unwrap();

        assert_eq!(from_toml, from_json);
        assert_eq!(from_toml.install_disk, Path::new("/dev/loop3"));
    }

    #[test]
    fn test_load_request_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(load_request(&temp.path().join("nope.json")).is_err());
    }
}
