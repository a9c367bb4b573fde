//! Where sprite sheets live on disk
//!
//! The root is read from `DIVERGENCE_ASSETS` the first time it is asked for.
//! [`set_asset_root`] overrides it for the rest of the process.
//!
//! ```bash
//! DIVERGENCE_ASSETS=/usr/share/divergence ./my_app
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

use parking_lot::RwLock;

/// Environment variable naming the asset root
pub const ASSET_ROOT_ENV: &str = "DIVERGENCE_ASSETS";

static ASSET_ROOT: RwLock<Option<PathBuf>> = RwLock::new(None);

static ENV_CHECKED: OnceLock<()> = OnceLock::new();

fn check_env() {
    ENV_CHECKED.get_or_init(|| {
        if let Some(root) = std::env::var_os(ASSET_ROOT_ENV).filter(|v| !v.is_empty()) {
            let root = PathBuf::from(root);
            log::info!(
                "Divergence assets at {} via {ASSET_ROOT_ENV} env var",
                root.display()
            );
            *ASSET_ROOT.write() = Some(root);
        }
    });
}

/// The configured asset root, if any
pub fn asset_root() -> Option<PathBuf> {
    check_env();
    ASSET_ROOT.read().clone()
}

/// Override the asset root at runtime; `None` unsets it
pub fn set_asset_root(root: Option<PathBuf>) {
    check_env();
    match &root {
        Some(path) => log::debug!("Divergence assets at {} via runtime call", path.display()),
        None => log::debug!("Divergence asset root cleared via runtime call"),
    }
    *ASSET_ROOT.write() = root;
}
