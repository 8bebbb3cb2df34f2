//! Implementation of `schemeport clean`.

use std::path::Path;

use anyhow::Result;

use crate::core::manifest::registry_dir;
use crate::util::fs::remove_dir_all_if_exists;

/// Remove generated manifests below `out_dir`.
///
/// Returns whether there was anything to remove.
pub fn clean(out_dir: &Path) -> Result<bool> {
    remove_dir_all_if_exists(&registry_dir(out_dir))
}
