//! Boot overlay installers for NVIDIA Jetson boards.
//!
//! An overlay customizes a generic arm64 boot image for one board. It
//! contributes kernel command-line arguments and places the board's
//! device-tree blob on the boot partition.
//!
//! # Architecture
//!
//! ```text
//! host pipeline
//!     │
//!     ├── get-options ──► OverlayInstaller::describe_options ──► kernel args
//!     └── install ──────► OverlayInstaller::install
//!                              ├── sync install disk
//!                              ├── mkdir <mount>/boot/EFI/dtb/nvidia
//!                              └── copy <artifacts>/arm64/dtb/nvidia/<board>.dtb
//! ```
//!
//! Every board shares one implementation, [`BoardOverlay`], parameterized by
//! a static [`BoardProfile`]. The [`Registry`] maps board ids to overlays.
//!
//! # Example
//!
//! ```rust,no_run
//! use jetson_overlay::{ExtraOptions, InstallRequest, OverlayInstaller, Registry};
//!
//! let registry = Registry::builtin();
//! let overlay = registry.get("jetson_orin_nano")?;
//!
//! let options = overlay.describe_options(&ExtraOptions::default())?;
//! println!("{}", options.kernel_args.join(" "));
//!
//! overlay.install(&InstallRequest {
//!     install_disk: "/dev/loop0".into(),
//!     artifacts_path: "/_out/artifacts".into(),
//!     mount_prefix: "/mnt/imager".into(),
//!     extra_options: ExtraOptions::default(),
//! })?;
//! # Ok::<(), jetson_overlay::InstallError>(())
//! ```

pub mod adapter;
pub mod board;
pub mod error;
pub mod overlay;
pub mod registry;

pub use board::{BoardProfile, BOARDS, JETSON_AGX_ORIN, JETSON_ORIN_NANO};
pub use error::InstallError;
pub use overlay::{BoardOverlay, ExtraOptions, InstallReport, InstallRequest, Options, OverlayInstaller};
pub use registry::Registry;
