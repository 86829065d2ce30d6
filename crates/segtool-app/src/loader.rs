use std::path::Path;

use anyhow::{Context, Result};
use segtool_core::config::SessionConfig;
use segtool_core::io::{mask_io, paths};
use segtool_core::oracle::ColorModelOracle;
use segtool_core::session::EditSession;
use tracing::info;

/// Build a session for one image, preferring a saved trimap over the binary
/// seed. Backs up the original seed mask before any edits.
pub fn load(image_path: &Path, config: &SessionConfig) -> Result<EditSession> {
    let image = mask_io::load_image(image_path)
        .with_context(|| format!("Failed to load {}", image_path.display()))?;

    let oracle = Box::new(ColorModelOracle::new());
    let trimap_path = paths::trimap_path_for(image_path);

    if trimap_path.exists() {
        let mask = mask_io::load_resume_mask(&trimap_path)
            .with_context(|| format!("Failed to load trimap {}", trimap_path.display()))?;
        info!(path = %trimap_path.display(), "resuming from saved trimap");
        return EditSession::from_resume(image, mask, oracle, config)
            .with_context(|| format!("Cannot resume session for {}", image_path.display()));
    }

    let mask_path = paths::mask_path_for(image_path);
    let seed = mask_io::load_seed_mask(&mask_path)
        .with_context(|| format!("Failed to load seed mask {}", mask_path.display()))?;

    if mask_io::backup_seed(&mask_path, &paths::backup_path_for(image_path))? {
        info!(path = %mask_path.display(), "backed up original seed mask");
    }

    EditSession::from_seed(image, seed, oracle, config)
        .with_context(|| format!("Cannot open session for {}", image_path.display()))
}

/// Write both persisted forms: the binary mask (original-tool compatible)
/// and the full-granularity trimap for resuming.
pub fn save(session: &EditSession, image_path: &Path) -> Result<()> {
    let mask_path = paths::mask_path_for(image_path);
    let trimap_path = paths::trimap_path_for(image_path);

    mask_io::save_binary_mask(session.mask(), &mask_path)
        .with_context(|| format!("Failed to save {}", mask_path.display()))?;
    mask_io::save_resume_mask(session.mask(), &trimap_path)
        .with_context(|| format!("Failed to save {}", trimap_path.display()))?;

    info!(mask = %mask_path.display(), trimap = %trimap_path.display(), "saved");
    Ok(())
}
