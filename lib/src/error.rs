use crate::falseflag::Side;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The border scan of the page cropper ran off the image without finding paper
    #[error("Malformed scan: no paper found scanning from the {side} edge (stopped at {position})")]
    MalformedScan { side: Side, position: i64 },
    /// Cropping `margin` pixels on every side leaves nothing of the page
    #[error("Margin {margin} too large for page area {width}x{height}")]
    MarginTooLarge { margin: u32, width: u32, height: u32 },
    #[error("Tile resolution {0} is not one of 256, 512 or 1024")]
    ResolutionMismatch(u32),
    #[error("I/O error")]
    Io(#[from] io::Error),
    /// Error decoding or encoding an image file
    #[error("Image {path} could not be processed")]
    ImageError {
        path: String,
        source: image::error::ImageError,
    },
    #[error("Image operation failed")]
    Image(#[from] image::error::ImageError),
    #[error("Invalid color {0}, expected #rrggbb")]
    InvalidColor(String),
}
