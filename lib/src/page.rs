use crate::error::Error;
use crate::falseflag::Side;
use crate::sampler::is_ink;
use image::{GenericImageView, RgbImage};
use log::debug;

/// Walk from `start` in steps of `step` while the sampled pixel is ink.
///
/// Returns the first paper position, or the position where the walk left the image.
fn walk_while_ink<F>(start: i64, step: i64, len: u32, ink: F) -> Result<u32, i64>
where
    F: Fn(u32) -> bool,
{
    let mut pos = start;
    while pos >= 0 && pos < len as i64 {
        if !ink(pos as u32) {
            return Ok(pos as u32);
        }
        pos += step;
    }
    Err(pos)
}

fn malformed(side: Side) -> impl Fn(i64) -> Error {
    move |position| Error::MalformedScan { side, position }
}

/// Locate the paper inside the (dark) scanner bed.
///
/// The borders are found along the horizontal and vertical midlines. Returns
/// `(left, right, top, bottom)` as inclusive paper coordinates.
pub fn find_paper(img: &RgbImage) -> Result<(u32, u32, u32, u32), Error> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(Error::MalformedScan {
            side: Side::Left,
            position: 0,
        });
    }
    let (mid_x, mid_y) = (w / 2, h / 2);

    let left = walk_while_ink(0, 1, w, |x| is_ink(img, x, mid_y)).map_err(malformed(Side::Left))?;
    let right = walk_while_ink(w as i64 - 1, -1, w, |x| is_ink(img, x, mid_y))
        .map_err(malformed(Side::Right))?;
    let top = walk_while_ink(0, 1, h, |y| is_ink(img, mid_x, y)).map_err(malformed(Side::Top))?;
    let bottom = walk_while_ink(h as i64 - 1, -1, h, |y| is_ink(img, mid_x, y))
        .map_err(malformed(Side::Bottom))?;
    debug!(
        "paper: left {} right {} top {} bottom {}",
        left, right, top, bottom
    );
    Ok((left, right, top, bottom))
}

/// Crop away the scanner bed around the paper, and `margin` more pixels on every side.
///
/// # Errors
/// * [Error::MalformedScan] if a midline scan finds no paper at all
/// * [Error::MarginTooLarge] if nothing is left after removing the margin
pub fn crop_page(img: &RgbImage, margin: u32) -> Result<RgbImage, Error> {
    let (left, right, top, bottom) = find_paper(img)?;
    let (x0, y0) = (left as i64 + margin as i64, top as i64 + margin as i64);
    let (x1, y1) = (right as i64 - margin as i64, bottom as i64 - margin as i64);
    if x1 <= x0 || y1 <= y0 {
        return Err(Error::MarginTooLarge {
            margin,
            width: right.saturating_sub(left) + 1,
            height: bottom.saturating_sub(top) + 1,
        });
    }
    let (width, height) = ((x1 - x0) as u32, (y1 - y0) as u32);
    Ok(img.view(x0 as u32, y0 as u32, width, height).to_image())
}
