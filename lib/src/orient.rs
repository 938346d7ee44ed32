use image::imageops::{flip_horizontal, rotate180, rotate270, rotate90};
use image::RgbImage;

/// One of the 8 symmetries of a square tile.
///
/// The tile is first mirrored left to right if `flip` is set, then rotated counter-clockwise by
/// `rotation` quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub flip: bool,
    pub rotation: u8,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation {
        flip: false,
        rotation: 0,
    };

    /// All 8 orientations, identity first.
    pub fn all() -> Vec<Orientation> {
        let mut all = Vec::with_capacity(8);
        for &flip in &[false, true] {
            for rotation in 0..4 {
                all.push(Orientation { flip, rotation });
            }
        }
        all
    }

    /// File name suffix `_rf<flip><rotation>`; `_rf00` is the original tile.
    pub fn suffix(&self) -> String {
        format!("_rf{}{}", self.flip as u8, self.rotation % 4)
    }
}

pub fn orient(img: &RgbImage, orientation: Orientation) -> RgbImage {
    let img = if orientation.flip {
        flip_horizontal(img)
    } else {
        img.clone()
    };
    match orientation.rotation % 4 {
        1 => rotate270(&img),
        2 => rotate180(&img),
        3 => rotate90(&img),
        _ => img,
    }
}
