use crate::error::Error;
use crate::fitter::Bounds;
use image::imageops::{resize, FilterType};
use image::{GenericImage, GenericImageView, Rgb, RgbImage};

/// Fill color for the parts of a tile region that lie outside the page.
pub const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

/// A square source region, which may extend past the page borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub size: u32,
}

impl Region {
    pub fn center(&self) -> (f64, f64) {
        let half = self.size as f64 / 2.;
        (self.x as f64 + half, self.y as f64 + half)
    }
}

/// The `size` x `size` region centered on `bounds`.
pub fn crop_region(bounds: &Bounds, size: u32) -> Region {
    let (cx, cy) = bounds.center();
    let half = size as f64 / 2.;
    Region {
        x: (cx - half).round() as i64,
        y: (cy - half).round() as i64,
        size,
    }
}

/// Copy `region` out of `img`, padding the parts outside the image with paper.
pub fn crop_padded(img: &RgbImage, region: &Region) -> Result<RgbImage, Error> {
    let mut crop = RgbImage::from_pixel(region.size, region.size, PAPER);
    let x0 = region.x.max(0);
    let y0 = region.y.max(0);
    let x1 = (region.x + region.size as i64).min(img.width() as i64);
    let y1 = (region.y + region.size as i64).min(img.height() as i64);
    if x1 > x0 && y1 > y0 {
        let src = img.view(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32);
        crop.copy_from(&src, (x0 - region.x) as u32, (y0 - region.y) as u32)?;
    }
    Ok(crop)
}

/// Crop a guard banded square of `pre_res` around the fitted box and resize it to `res` x `res`.
///
/// Returns the tile together with the source region it was cut from.
pub fn extract(
    img: &RgbImage,
    bounds: &Bounds,
    pre_res: u32,
    res: u32,
) -> Result<(RgbImage, Region), Error> {
    let region = crop_region(bounds, pre_res);
    let crop = crop_padded(img, &region)?;
    let tile = resize(&crop, res, res, FilterType::Triangle);
    Ok((tile, region))
}
