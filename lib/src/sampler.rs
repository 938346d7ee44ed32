use image::RgbImage;

/// Pixels with a luminance below this value are ink, everything else is paper.
pub const INK_THRESHOLD: u8 = 128;

/// Unweighted mean of the three color channels at (`x`, `y`).
///
/// The caller must make sure the coordinate lies inside the image.
#[inline]
pub fn luminance(img: &RgbImage, x: u32, y: u32) -> u8 {
    let p = img.get_pixel(x, y);
    ((p[0] as u16 + p[1] as u16 + p[2] as u16) / 3) as u8
}

#[inline]
pub fn is_ink(img: &RgbImage, x: u32, y: u32) -> bool {
    luminance(img, x, y) < INK_THRESHOLD
}

#[inline]
pub fn is_paper(img: &RgbImage, x: u32, y: u32) -> bool {
    !is_ink(img, x, y)
}
