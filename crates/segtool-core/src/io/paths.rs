use std::path::{Path, PathBuf};

const MASK_SUFFIX: &str = "_mask.png";
const BACKUP_SUFFIX: &str = "_mask_orig.png";
const TRIMAP_SUFFIX: &str = "_trimap.png";

fn with_suffix(image_path: &Path, suffix: &str) -> PathBuf {
    let stem = image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    image_path.with_file_name(format!("{stem}{suffix}"))
}

/// `<stem>_mask.png`: the binary seed/output mask sibling.
pub fn mask_path_for(image_path: &Path) -> PathBuf {
    with_suffix(image_path, MASK_SUFFIX)
}

/// `<stem>_mask_orig.png`: one-time backup of the original seed.
pub fn backup_path_for(image_path: &Path) -> PathBuf {
    with_suffix(image_path, BACKUP_SUFFIX)
}

/// `<stem>_trimap.png`: full-granularity resume mask.
pub fn trimap_path_for(image_path: &Path) -> PathBuf {
    with_suffix(image_path, TRIMAP_SUFFIX)
}

/// True for mask siblings that must not be opened as images themselves.
pub fn is_mask_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| {
            name.ends_with(MASK_SUFFIX)
                || name.ends_with(BACKUP_SUFFIX)
                || name.ends_with(TRIMAP_SUFFIX)
        })
        .unwrap_or(false)
}
