/// A rectangle in image coordinates, the sub-region currently rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Maps screen coordinates to image coordinates and back; owns pan/zoom state.
///
/// Invariant: `view` stays fully contained in `[0, image_width) x
/// [0, image_height)`. The aspect ratio is re-locked to the display window
/// after every zoom (not after pan).
#[derive(Clone, Debug)]
pub struct Viewport {
    pub view: ViewRect,
    image_width: f32,
    image_height: f32,
    display_width: f32,
    display_height: f32,
}

impl Viewport {
    /// Viewport over the full image extent.
    pub fn new(image_width: usize, image_height: usize, display_width: u32, display_height: u32) -> Self {
        let mut vp = Self {
            view: ViewRect {
                x: 0.0,
                y: 0.0,
                width: image_width as f32,
                height: image_height as f32,
            },
            image_width: image_width as f32,
            image_height: image_height as f32,
            display_width: display_width as f32,
            display_height: display_height as f32,
        };
        vp.reset_to_full();
        vp
    }

    pub fn display_size(&self) -> (u32, u32) {
        (self.display_width as u32, self.display_height as u32)
    }

    /// Uniform fit-to-window scale. Used both for rendering and for mapping
    /// screen clicks back to image coordinates.
    pub fn scale(&self) -> f32 {
        (self.display_width / self.view.width).min(self.display_height / self.view.height)
    }

    pub fn screen_to_image(&self, screen: (f32, f32)) -> (f32, f32) {
        let s = self.scale();
        (screen.0 / s + self.view.x, screen.1 / s + self.view.y)
    }

    /// Pan by a screen-pixel delta (drag direction, view moves opposite).
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let s = self.scale();
        self.view.x -= dx / s;
        self.view.y -= dy / s;
        self.clamp();
    }

    /// Zoom about a screen anchor. `rate` > 1 zooms out, < 1 zooms in.
    ///
    /// The anchor fraction measures x left-to-right but y bottom-to-top.
    /// This inverted-y convention is preserved from the observed behavior.
    pub fn zoom(&mut self, rate: f32, anchor: (f32, f32)) {
        if !(rate > 0.0) || !rate.is_finite() {
            return;
        }
        let s = self.scale();
        let fx = ((anchor.0 / s) / self.view.width).clamp(0.0, 1.0);
        let fy = 1.0 - ((anchor.1 / s) / self.view.height).clamp(0.0, 1.0);

        self.view.x += self.view.width * (1.0 - rate) * fx;
        self.view.y += self.view.height * (1.0 - rate) * fy;
        self.view.width *= rate;
        self.view.height *= rate;

        self.lock_aspect();
        self.clamp();
    }

    pub fn reset_to_full(&mut self) {
        self.view = ViewRect {
            x: 0.0,
            y: 0.0,
            width: self.image_width,
            height: self.image_height,
        };
    }

    /// Match the display aspect ratio by growing the shorter dimension,
    /// never by cropping.
    fn lock_aspect(&mut self) {
        let target = self.display_height / self.display_width;
        if self.view.width <= 0.0 || self.view.height <= 0.0 {
            return;
        }
        if self.view.height / self.view.width < target {
            self.view.height = self.view.width * target;
        } else {
            self.view.width = self.view.height / target;
        }
    }

    /// Clamp the view inside the image. A degenerate view resets to full
    /// extent rather than failing.
    fn clamp(&mut self) {
        let v = &mut self.view;
        if !v.width.is_finite() || !v.height.is_finite() || v.width <= 0.0 || v.height <= 0.0 {
            self.reset_to_full();
            return;
        }
        v.width = v.width.min(self.image_width);
        v.height = v.height.min(self.image_height);
        v.x = v.x.clamp(0.0, self.image_width - v.width);
        v.y = v.y.clamp(0.0, self.image_height - v.height);
    }
}
