//! Board id → overlay lookup.

use std::collections::BTreeMap;

use crate::board::BOARDS;
use crate::error::InstallError;
use crate::overlay::{BoardOverlay, OverlayInstaller};

/// Installed overlays keyed by board id.
#[derive(Default)]
pub struct Registry {
    overlays: BTreeMap<String, Box<dyn OverlayInstaller>>,
}

impl Registry {
    /// An empty registry. See [`Registry::builtin`] for the Jetson boards.
    pub fn new() -> Self {
        Self::default()
    }

    /// One [`BoardOverlay`] per built-in board profile.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for profile in BOARDS {
            registry.register(Box::new(BoardOverlay::new(profile)));
        }
        registry
    }

    /// Add an overlay, replacing any previous one with the same name.
    pub fn register(&mut self, overlay: Box<dyn OverlayInstaller>) {
        self.overlays.insert(overlay.name().to_string(), overlay);
    }

    pub fn get(&self, name: &str) -> Result<&dyn OverlayInstaller, InstallError> {
        self.overlays
            .get(name)
            .map(|overlay| overlay.as_ref())
            .ok_or_else(|| InstallError::UnknownBoard(name.to_string()))
    }

    /// Registered board ids, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.overlays.keys().map(String::as_str).collect()
    }
}
