use image::RgbImage;

/// Convert a composited RGB display buffer to an egui ColorImage.
pub fn rgb_to_color_image(buffer: &RgbImage) -> egui::ColorImage {
    let (w, h) = buffer.dimensions();
    let mut pixels = Vec::with_capacity((w * h) as usize);

    for pixel in buffer.pixels() {
        pixels.push(egui::Color32::from_rgb(pixel.0[0], pixel.0[1], pixel.0[2]));
    }

    egui::ColorImage {
        size: [w as usize, h as usize],
        pixels,
        source_size: Default::default(),
    }
}
