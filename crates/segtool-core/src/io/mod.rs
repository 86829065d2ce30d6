pub mod mask_io;
pub mod paths;
