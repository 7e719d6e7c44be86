//! Application configuration constants.
//! Tuning and conventions in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Per-directory config file name (`.scenedex.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Parsing ----

/// Parsed-document cache capacity (documents, not bytes).
pub const DOCUMENT_CACHE_CAPACITY: usize = 128;

/// Characters kept when truncating an acquisition timestamp to second
/// precision (`YYYY-MM-DDThh:mm:ss`).
pub const ACQUISITION_DATE_LEN: usize = 19;
