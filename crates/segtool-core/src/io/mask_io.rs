use std::path::Path;

use image::{DynamicImage, GrayImage, Luma, RgbImage};
use ndarray::Array2;
use tracing::debug;

use crate::error::{Result, SegtoolError};
use crate::mask::{Label, LabelMask};

/// Load the source image as 8-bit RGB.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Load a binary seed mask: 8-bit, nonzero means foreground.
///
/// Multi-channel masks use only the last channel; no colorimetric conversion
/// is performed.
pub fn load_seed_mask(path: &Path) -> Result<Array2<bool>> {
    let img = image::open(path)?;

    let (w, h, channel_of): (u32, u32, Box<dyn Fn(u32, u32) -> u8>) = match img {
        DynamicImage::ImageLuma8(g) => {
            let (w, h) = g.dimensions();
            (w, h, Box::new(move |x, y| g.get_pixel(x, y).0[0]))
        }
        DynamicImage::ImageLumaA8(g) => {
            let (w, h) = g.dimensions();
            (w, h, Box::new(move |x, y| g.get_pixel(x, y).0[1]))
        }
        DynamicImage::ImageRgb8(g) => {
            let (w, h) = g.dimensions();
            (w, h, Box::new(move |x, y| g.get_pixel(x, y).0[2]))
        }
        DynamicImage::ImageRgba8(g) => {
            let (w, h) = g.dimensions();
            (w, h, Box::new(move |x, y| g.get_pixel(x, y).0[3]))
        }
        _ => {
            return Err(SegtoolError::InvalidMask(format!(
                "expected an 8-bit mask: {}",
                path.display()
            )))
        }
    };

    let mut seed = Array2::from_elem((h as usize, w as usize), false);
    for row in 0..h {
        for col in 0..w {
            seed[[row as usize, col as usize]] = channel_of(col, row) != 0;
        }
    }
    Ok(seed)
}

/// Load a resume mask: raw label codes 0-3, full trimap granularity.
pub fn load_resume_mask(path: &Path) -> Result<LabelMask> {
    let img = image::open(path)?;
    let gray = match img {
        DynamicImage::ImageLuma8(g) => g,
        _ => {
            return Err(SegtoolError::InvalidMask(format!(
                "expected a single-channel 8-bit trimap: {}",
                path.display()
            )))
        }
    };

    let (w, h) = gray.dimensions();
    let mut data = Array2::from_elem((h as usize, w as usize), Label::DefiniteBackground);
    for (x, y, pixel) in gray.enumerate_pixels() {
        data[[y as usize, x as usize]] = Label::from_code(pixel.0[0]).ok_or_else(|| {
            SegtoolError::InvalidMask(format!(
                "label code {} out of range at ({x},{y}) in {}",
                pixel.0[0],
                path.display()
            ))
        })?;
    }
    Ok(LabelMask::from_labels(data))
}

/// Save the full label mask as raw codes 0-3, for resuming later.
pub fn save_resume_mask(mask: &LabelMask, path: &Path) -> Result<()> {
    let mut img = GrayImage::new(mask.width() as u32, mask.height() as u32);
    for (idx, label) in mask.data.indexed_iter() {
        img.put_pixel(idx.1 as u32, idx.0 as u32, Luma([label.code()]));
    }
    img.save(path)?;
    Ok(())
}

/// Save the binary view: 255 where the label code is odd, 0 otherwise.
pub fn save_binary_mask(mask: &LabelMask, path: &Path) -> Result<()> {
    let mut img = GrayImage::new(mask.width() as u32, mask.height() as u32);
    for (idx, label) in mask.data.indexed_iter() {
        let v = if label.is_foreground() { 255 } else { 0 };
        img.put_pixel(idx.1 as u32, idx.0 as u32, Luma([v]));
    }
    img.save(path)?;
    Ok(())
}

/// Back up the original seed mask file, once. Returns true if the backup was
/// written; an existing backup is never overwritten.
pub fn backup_seed(mask_path: &Path, backup_path: &Path) -> Result<bool> {
    if backup_path.exists() {
        debug!(path = %backup_path.display(), "seed backup already present");
        return Ok(false);
    }
    std::fs::copy(mask_path, backup_path)?;
    Ok(true)
}
