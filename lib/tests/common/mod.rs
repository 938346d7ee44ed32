#![allow(dead_code)]
use image::{Rgb, RgbImage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const BED: Rgb<u8> = Rgb([25, 25, 30]);

pub fn blank_page(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, WHITE)
}

/// Fill a `w` x `h` rectangle with its top left corner at (`x`, `y`)
pub fn draw_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32) {
    for yy in y..y + h {
        for xx in x..x + w {
            img.put_pixel(xx, yy, BLACK);
        }
    }
}

/// Place `page` on a dark scanner bed that extends `bed` pixels beyond every side.
pub fn on_scanner_bed(page: &RgbImage, bed: u32) -> RgbImage {
    let (w, h) = page.dimensions();
    RgbImage::from_fn(w + 2 * bed, h + 2 * bed, |x, y| {
        if x < bed || y < bed || x >= w + bed || y >= h + bed {
            BED
        } else {
            *page.get_pixel(x - bed, y - bed)
        }
    })
}
