use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegtoolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Mask dimensions {mask_width}x{mask_height} do not match image {image_width}x{image_height}")]
    DimensionMismatch {
        mask_width: usize,
        mask_height: usize,
        image_width: usize,
        image_height: usize,
    },

    #[error("Empty image")]
    EmptyImage,

    #[error("Seed mask has no foreground pixels")]
    EmptySeed,
}

pub type Result<T> = std::result::Result<T, SegtoolError>;
