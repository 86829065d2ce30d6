use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::mask::{Label, LabelMask};

/// A disk-shaped structuring element, stored as precomputed neighbor offsets.
/// Immutable after construction; callers may cache and reuse it across calls.
#[derive(Clone, Debug)]
pub struct StructuringElement {
    radius: usize,
    offsets: Vec<(i32, i32)>,
}

impl StructuringElement {
    /// Euclidean disk of the given radius (dr² + dc² ≤ r²).
    pub fn disk(radius: usize) -> Self {
        let r = radius as i32;
        let mut offsets = Vec::new();
        for dr in -r..=r {
            for dc in -r..=r {
                if dr * dr + dc * dc <= r * r {
                    offsets.push((dr, dc));
                }
            }
        }
        Self { radius, offsets }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }
}

/// Binary dilation: a pixel becomes true if ANY pixel under the element is true.
pub fn dilate(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();
    by_rows(h, w, |row| {
        (0..w)
            .map(|col| {
                element.offsets.iter().any(|&(dr, dc)| {
                    let nr = row as i32 + dr;
                    let nc = col as i32 + dc;
                    nr >= 0
                        && nr < h as i32
                        && nc >= 0
                        && nc < w as i32
                        && mask[[nr as usize, nc as usize]]
                })
            })
            .collect()
    })
}

/// Binary erosion: a pixel stays true only if ALL pixels under the element are
/// true. Out-of-bounds neighbors count as false, so erosion eats the border.
pub fn erode(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();
    by_rows(h, w, |row| {
        (0..w)
            .map(|col| {
                mask[[row, col]]
                    && element.offsets.iter().all(|&(dr, dc)| {
                        let nr = row as i32 + dr;
                        let nc = col as i32 + dc;
                        nr >= 0
                            && nr < h as i32
                            && nc >= 0
                            && nc < w as i32
                            && mask[[nr as usize, nc as usize]]
                    })
            })
            .collect()
    })
}

/// Run a per-row kernel, in parallel for large masks.
fn by_rows(h: usize, w: usize, row_fn: impl Fn(usize) -> Vec<bool> + Send + Sync) -> Array2<bool> {
    let rows: Vec<Vec<bool>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(row_fn).collect()
    } else {
        (0..h).map(row_fn).collect()
    };

    let flat: Vec<bool> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((h, w), flat).expect("row count matches mask shape")
}

/// Build a 4-level trimap from a binary seed mask.
///
/// Three concentric bands around the seed boundary plus the exterior:
/// the seed eroded by R is definite foreground, the band between the seed
/// and its erosion is probable foreground, the band between the seed and
/// its dilation is probable background, everything else is definite
/// background. This gives the oracle both hard seeds and a soft boundary
/// to refine.
pub fn build_trimap(seed: &Array2<bool>, element: &StructuringElement) -> LabelMask {
    let dilated = dilate(seed, element);
    let eroded = erode(seed, element);
    let (h, w) = seed.dim();

    let mut mask = LabelMask::new(w, h);
    for row in 0..h {
        for col in 0..w {
            let idx = [row, col];
            mask.data[idx] = if eroded[idx] {
                Label::DefiniteForeground
            } else if seed[idx] {
                Label::ProbableForeground
            } else if dilated[idx] {
                Label::ProbableBackground
            } else {
                Label::DefiniteBackground
            };
        }
    }
    mask
}
