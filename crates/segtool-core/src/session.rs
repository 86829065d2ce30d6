use image::RgbImage;
use ndarray::Array2;
use tracing::info;

use crate::compositor::{self, BrushCursor, ViewMode};
use crate::config::SessionConfig;
use crate::consts::MIN_BRUSH_RADIUS;
use crate::error::{Result, SegtoolError};
use crate::mask::{Label, LabelMask};
use crate::oracle::SegmentationOracle;
use crate::overlay::BrushOverlay;
use crate::trimap::{self, StructuringElement};
use crate::viewport::Viewport;

/// One interactive editing session over a single image.
///
/// Owns the persistent label mask, the brush overlay, the viewport, the
/// oracle (with its opaque model state), the iteration counter, the view
/// mode, and the brush radius. Edits stage in the overlay and reach the
/// persistent mask only on commit; the commit is all-or-nothing across the
/// whole overlay, so a partially painted stroke never influences refinement.
pub struct EditSession {
    image: RgbImage,
    seed: Array2<bool>,
    mask: LabelMask,
    overlay: BrushOverlay,
    viewport: Viewport,
    oracle: Box<dyn SegmentationOracle>,
    element: StructuringElement,
    iteration: usize,
    view_mode: ViewMode,
    brush_radius: i32,
    zoom_rate: f32,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("iteration", &self.iteration)
            .field("view_mode", &self.view_mode)
            .field("brush_radius", &self.brush_radius)
            .field("zoom_rate", &self.zoom_rate)
            .finish_non_exhaustive()
    }
}

impl EditSession {
    /// Build a session from a binary seed mask: derive the trimap, then run
    /// the oracle in initialize form for the first refined mask.
    pub fn from_seed(
        image: RgbImage,
        seed: Array2<bool>,
        oracle: Box<dyn SegmentationOracle>,
        config: &SessionConfig,
    ) -> Result<Self> {
        validate_dims(&image, seed.dim())?;
        if !seed.iter().any(|&v| v) {
            return Err(SegtoolError::EmptySeed);
        }

        let element = StructuringElement::disk(config.structuring_radius);
        let mask = trimap::build_trimap(&seed, &element);
        Self::build(image, seed, mask, oracle, element, config)
    }

    /// Resume a session from a previously saved label mask, skipping the
    /// trimap builder. The mask's binary view becomes the seed for reset.
    pub fn from_resume(
        image: RgbImage,
        mask: LabelMask,
        oracle: Box<dyn SegmentationOracle>,
        config: &SessionConfig,
    ) -> Result<Self> {
        validate_dims(&image, mask.data.dim())?;
        let seed = mask.binary_view();
        if !seed.iter().any(|&v| v) {
            return Err(SegtoolError::EmptySeed);
        }

        let element = StructuringElement::disk(config.structuring_radius);
        Self::build(image, seed, mask, oracle, element, config)
    }

    fn build(
        image: RgbImage,
        seed: Array2<bool>,
        mask: LabelMask,
        mut oracle: Box<dyn SegmentationOracle>,
        element: StructuringElement,
        config: &SessionConfig,
    ) -> Result<Self> {
        let (h, w) = (mask.height(), mask.width());
        let mask = oracle.initialize(&image, &mask)?;

        Ok(Self {
            image,
            seed,
            mask,
            overlay: BrushOverlay::new(w, h),
            viewport: Viewport::new(w, h, config.display_width, config.display_height),
            oracle,
            element,
            iteration: 0,
            view_mode: config.view_mode,
            brush_radius: config.brush_radius.max(MIN_BRUSH_RADIUS),
            zoom_rate: config.zoom_rate,
        })
    }

    pub fn mask(&self) -> &LabelMask {
        &self.mask
    }

    pub fn overlay(&self) -> &BrushOverlay {
        &self.overlay
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn brush_radius(&self) -> i32 {
        self.brush_radius
    }

    pub fn zoom_rate(&self) -> f32 {
        self.zoom_rate
    }

    /// Stage a brush disk at a screen position. Pending edits live in the
    /// overlay only; the persistent mask is untouched until commit.
    pub fn paint(&mut self, screen: (f32, f32), label: Label) {
        let center = self.viewport.screen_to_image(screen);
        self.overlay.paint(center, self.brush_radius as f32, label);
    }

    /// Unstage pending edits under a brush disk at a screen position.
    pub fn erase(&mut self, screen: (f32, f32)) {
        let center = self.viewport.screen_to_image(screen);
        self.overlay.erase(center, self.brush_radius as f32);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.viewport.pan(dx, dy);
    }

    /// Zoom one step about a screen anchor; the sign of `dy` picks the
    /// direction (dragging up zooms in).
    pub fn zoom_step(&mut self, anchor: (f32, f32), dy: f32) {
        if dy == 0.0 {
            return;
        }
        let rate = if dy < 0.0 {
            self.zoom_rate
        } else {
            1.0 / self.zoom_rate
        };
        self.viewport.zoom(rate, anchor);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset_to_full();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Radius floors at MIN_BRUSH_RADIUS rather than failing.
    pub fn adjust_brush_radius(&mut self, delta: i32) {
        self.brush_radius = (self.brush_radius + delta).max(MIN_BRUSH_RADIUS);
    }

    /// Merge the whole overlay into the persistent mask, run one incremental
    /// oracle pass, adopt the refined mask, and clear the overlay.
    pub fn commit_and_refine(&mut self) -> Result<()> {
        for (idx, cell) in self.overlay.data.indexed_iter() {
            if let Some(label) = cell {
                self.mask.data[idx] = *label;
            }
        }
        self.mask = self.oracle.refine(&self.image, &self.mask)?;
        self.iteration += 1;
        self.overlay.clear();
        info!(iteration = self.iteration, "refinement pass complete");
        Ok(())
    }

    /// Drop uncommitted strokes. Never touches the committed mask or the
    /// iteration count.
    pub fn discard_pending(&mut self) {
        self.overlay.clear();
    }

    /// Rebuild the trimap from the original seed and reinitialize the
    /// oracle, discarding all iterations.
    pub fn reset(&mut self) -> Result<()> {
        let mask = trimap::build_trimap(&self.seed, &self.element);
        self.mask = self.oracle.initialize(&self.image, &mask)?;
        self.overlay.clear();
        self.iteration = 0;
        info!("session reset");
        Ok(())
    }

    /// Compose the current state into a display buffer. `cursor` is the
    /// pointer position in display-buffer coordinates, if hovering.
    pub fn render(&self, cursor: Option<(f32, f32)>) -> RgbImage {
        compositor::render(
            &self.image,
            &self.mask,
            &self.overlay,
            &self.viewport,
            self.view_mode,
            cursor.map(|screen| BrushCursor {
                screen,
                radius: self.brush_radius as f32,
            }),
        )
    }
}

fn validate_dims(image: &RgbImage, (mask_h, mask_w): (usize, usize)) -> Result<()> {
    let (img_w, img_h) = (image.width() as usize, image.height() as usize);
    if img_w == 0 || img_h == 0 {
        return Err(SegtoolError::EmptyImage);
    }
    if (mask_w, mask_h) != (img_w, img_h) {
        return Err(SegtoolError::DimensionMismatch {
            mask_width: mask_w,
            mask_height: mask_h,
            image_width: img_w,
            image_height: img_h,
        });
    }
    Ok(())
}
