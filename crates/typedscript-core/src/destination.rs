//! Destination directory preparation

use crate::error::{ScaffoldError, ScaffoldResult};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Asks the user whether an existing directory may be wiped
pub trait Confirmer {
    /// Return true only when the user affirmatively agreed
    fn confirm_overwrite(&self, path: &Path) -> anyhow::Result<bool>;
}

/// Confirms every overwrite (`--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm_overwrite(&self, _path: &Path) -> anyhow::Result<bool> {
        Ok(true)
    }
}

/// Interpret a free-text answer; only `y` / `yes` (any case) count as yes
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Make sure `target` exists and is empty.
///
/// A missing directory is created with its parents. An existing one is
/// removed and recreated only after the confirmer agrees; otherwise the run
/// ends with [`ScaffoldError::Declined`] and nothing on disk changes.
pub async fn resolve<C: Confirmer + ?Sized>(target: &Path, confirmer: &C) -> ScaffoldResult<()> {
    if !fs::try_exists(target)
        .await
        .map_err(|e| ScaffoldError::io(target, e))?
    {
        fs::create_dir_all(target)
            .await
            .map_err(|e| ScaffoldError::io(target, e))?;
        info!("Created {}", target.display());
        return Ok(());
    }

    let confirmed = match confirmer.confirm_overwrite(target) {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Overwrite prompt failed: {:#}", e);
            false
        }
    };
    if !confirmed {
        return Err(ScaffoldError::Declined(target.to_path_buf()));
    }

    let removal = if target.is_dir() {
        fs::remove_dir_all(target).await
    } else {
        fs::remove_file(target).await
    };
    removal.map_err(|source| ScaffoldError::Removal {
        path: target.to_path_buf(),
        source,
    })?;

    fs::create_dir_all(target)
        .await
        .map_err(|e| ScaffoldError::io(target, e))?;
    info!("Recreated {}", target.display());
    Ok(())
}
