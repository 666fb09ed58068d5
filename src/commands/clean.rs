//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::cache;
use crate::Octavo;

/// Clean the public directory and cache
pub fn run(octavo: &Octavo) -> Result<()> {
    if octavo.public_dir.exists() {
        fs::remove_dir_all(&octavo.public_dir)?;
        tracing::info!("Deleted: {:?}", octavo.public_dir);
    }

    cache::clear(&octavo.base_dir)?;

    Ok(())
}
