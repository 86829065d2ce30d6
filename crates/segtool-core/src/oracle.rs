use image::RgbImage;
use tracing::debug;

use crate::consts::COLOR_VARIANCE_FLOOR;
use crate::error::Result;
use crate::mask::{Label, LabelMask};

/// The external iterative segmentation algorithm, treated as a black box.
///
/// Model state is opaque and owned by the implementation: `initialize`
/// discards any prior state and rebuilds it, `refine` reuses it. The edit
/// session only threads calls through, never inspects the state.
pub trait SegmentationOracle {
    /// Full reinitialization from an image and a fresh trimap. Returns the
    /// first refined mask.
    fn initialize(&mut self, image: &RgbImage, mask: &LabelMask) -> Result<LabelMask>;

    /// One incremental refinement pass reusing the accumulated model state.
    fn refine(&mut self, image: &RgbImage, mask: &LabelMask) -> Result<LabelMask>;
}

/// Diagonal-Gaussian color model for one class.
#[derive(Clone, Debug)]
struct ClassModel {
    mean: [f64; 3],
    var: [f64; 3],
    count: usize,
}

impl ClassModel {
    fn fit(image: &RgbImage, mask: &LabelMask, foreground: bool) -> Self {
        let mut sum = [0.0f64; 3];
        let mut sum_sq = [0.0f64; 3];
        let mut count = 0usize;

        for (x, y, pixel) in image.enumerate_pixels() {
            if mask.data[[y as usize, x as usize]].is_foreground() != foreground {
                continue;
            }
            for c in 0..3 {
                let v = pixel.0[c] as f64;
                sum[c] += v;
                sum_sq[c] += v * v;
            }
            count += 1;
        }

        let mut mean = [0.0f64; 3];
        let mut var = [COLOR_VARIANCE_FLOOR; 3];
        if count > 0 {
            let n = count as f64;
            for c in 0..3 {
                mean[c] = sum[c] / n;
                var[c] = (sum_sq[c] / n - mean[c] * mean[c]).max(COLOR_VARIANCE_FLOOR);
            }
        }
        Self { mean, var, count }
    }

    /// Equal-weight smoothing against a previous fit. A class that has no
    /// pixels in the current partition keeps the previous model outright.
    fn blend(&mut self, prev: &ClassModel) {
        if self.count == 0 {
            *self = prev.clone();
            return;
        }
        if prev.count == 0 {
            return;
        }
        for c in 0..3 {
            self.mean[c] = 0.5 * (self.mean[c] + prev.mean[c]);
            self.var[c] = 0.5 * (self.var[c] + prev.var[c]);
        }
    }

    fn log_likelihood(&self, pixel: [u8; 3]) -> f64 {
        let mut ll = 0.0;
        for c in 0..3 {
            let d = pixel[c] as f64 - self.mean[c];
            ll -= 0.5 * self.var[c].ln() + d * d / (2.0 * self.var[c]);
        }
        ll
    }
}

#[derive(Clone, Debug)]
struct ColorModel {
    foreground: ClassModel,
    background: ClassModel,
}

/// Bundled oracle: global per-class color models over the current
/// foreground/background partition, reclassifying only the probable pixels.
/// Definite labels are never changed.
#[derive(Default)]
pub struct ColorModelOracle {
    model: Option<ColorModel>,
}

impl ColorModelOracle {
    pub fn new() -> Self {
        Self::default()
    }

    fn refit(&mut self, image: &RgbImage, mask: &LabelMask) {
        let mut model = ColorModel {
            foreground: ClassModel::fit(image, mask, true),
            background: ClassModel::fit(image, mask, false),
        };
        // Incremental form: smooth the fresh fit against the accumulated state.
        if let Some(prev) = &self.model {
            model.foreground.blend(&prev.foreground);
            model.background.blend(&prev.background);
        }
        debug!(
            fg_pixels = model.foreground.count,
            bg_pixels = model.background.count,
            "color models refit"
        );
        self.model = Some(model);
    }

    fn reclassify(&self, image: &RgbImage, mask: &LabelMask) -> LabelMask {
        let model = match &self.model {
            Some(m) if m.foreground.count > 0 && m.background.count > 0 => m,
            // One class is empty; nothing to discriminate against.
            _ => return mask.clone(),
        };

        let mut out = mask.clone();
        for (x, y, pixel) in image.enumerate_pixels() {
            let idx = [y as usize, x as usize];
            if !mask.data[idx].is_probable() {
                continue;
            }
            let rgb = [pixel.0[0], pixel.0[1], pixel.0[2]];
            out.data[idx] = if model.foreground.log_likelihood(rgb)
                >= model.background.log_likelihood(rgb)
            {
                Label::ProbableForeground
            } else {
                Label::ProbableBackground
            };
        }
        out
    }
}

impl SegmentationOracle for ColorModelOracle {
    fn initialize(&mut self, image: &RgbImage, mask: &LabelMask) -> Result<LabelMask> {
        self.model = None;
        self.refit(image, mask);
        Ok(self.reclassify(image, mask))
    }

    fn refine(&mut self, image: &RgbImage, mask: &LabelMask) -> Result<LabelMask> {
        // Incremental pass: update the models from the merged mask, then
        // reassign probable pixels under the updated models.
        self.refit(image, mask);
        Ok(self.reclassify(image, mask))
    }
}
