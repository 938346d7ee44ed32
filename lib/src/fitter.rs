use crate::falseflag::{is_false_flag, Side};
use crate::sampler::is_ink;
use image::RgbImage;
use log::debug;

/// An axis aligned box with inclusive pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left) + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top) + 1
    }

    /// Center in continuous image coordinates (pixel `x` covers `[x, x + 1)`).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right + 1) as f64 / 2.,
            (self.top + self.bottom + 1) as f64 / 2.,
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    /// Clip to the pixels of a `width` x `height` image.
    fn clamp(&self, width: u32, height: u32) -> Bounds {
        Bounds {
            left: self.left,
            right: self.right.min(width.saturating_sub(1)),
            top: self.top,
            bottom: self.bottom.min(height.saturating_sub(1)),
        }
    }
}

fn column_is_edge(img: &RgbImage, x: u32, cell: &Bounds, side: Side, threshold: u32) -> bool {
    (cell.top..=cell.bottom).any(|y| is_ink(img, x, y))
        && !is_false_flag(img, x, side, cell.top..cell.bottom + 1, threshold)
}

fn row_is_edge(img: &RgbImage, y: u32, cell: &Bounds, side: Side, threshold: u32) -> bool {
    (cell.left..=cell.right).any(|x| is_ink(img, x, y))
        && !is_false_flag(img, y, side, cell.left..cell.right + 1, threshold)
}

/// Tighten a coarse cell to the ink of the single drawing inside it.
///
/// Each edge moves inward from the cell border until it reaches a line inside the cell that
/// contains ink and is no false flag at `threshold` (probed over the span of the cell). Scans never
/// leave the cell. Returns `None` for a cell without ink: such a cell yields no tile.
///
/// Narrowing the cell narrows the false flag probes, which may release another edge, so the
/// tightening repeats until the box is stable. Every pass stays inside the previous box.
pub fn fit(img: &RgbImage, cell: &Bounds, threshold: u32) -> Option<Bounds> {
    let mut fitted = fit_once(img, cell, threshold)?;
    loop {
        let next = fit_once(img, &fitted, threshold)?;
        if next == fitted {
            return Some(fitted);
        }
        debug!("refit {:?} -> {:?}", fitted, next);
        fitted = next;
    }
}

fn fit_once(img: &RgbImage, cell: &Bounds, threshold: u32) -> Option<Bounds> {
    let cell = cell.clamp(img.width(), img.height());
    if cell.is_degenerate() {
        return None;
    }
    let columns = cell.left..=cell.right;
    let rows = cell.top..=cell.bottom;

    let left = columns
        .clone()
        .find(|&x| column_is_edge(img, x, &cell, Side::Left, threshold))?;
    let right = columns
        .rev()
        .find(|&x| column_is_edge(img, x, &cell, Side::Right, threshold))?;
    let top = rows
        .clone()
        .find(|&y| row_is_edge(img, y, &cell, Side::Top, threshold))?;
    let bottom = rows
        .rev()
        .find(|&y| row_is_edge(img, y, &cell, Side::Bottom, threshold))?;
    let fitted = Bounds {
        left,
        right,
        top,
        bottom,
    };
    debug!("fit {:?} -> {:?}", cell, fitted);
    if fitted.is_degenerate() {
        return None;
    }
    Some(fitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn white(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([255, 255, 255]))
    }

    fn fill(img: &mut RgbImage, b: Bounds) {
        for y in b.top..=b.bottom {
            for x in b.left..=b.right {
                img.put_pixel(x, y, BLACK);
            }
        }
    }

    fn bounds(left: u32, right: u32, top: u32, bottom: u32) -> Bounds {
        Bounds {
            left,
            right,
            top,
            bottom,
        }
    }

    #[test]
    fn test_fit_square() {
        let mut img = white(200, 200);
        let square = bounds(60, 119, 50, 129);
        fill(&mut img, square);
        let cell = bounds(10, 180, 5, 190);
        assert_eq!(fit(&img, &cell, 10), Some(square));
    }

    #[test]
    fn test_fit_is_fixed_point() {
        let mut img = white(200, 200);
        // an L shaped drawing
        fill(&mut img, bounds(40, 59, 40, 139));
        fill(&mut img, bounds(40, 139, 120, 139));
        let fitted = fit(&img, &bounds(0, 199, 0, 199), 10).unwrap();
        assert_eq!(fitted, bounds(40, 139, 40, 139));
        assert_eq!(fit(&img, &fitted, 10), Some(fitted));
    }

    #[test]
    fn test_fit_with_speck_is_fixed_point() {
        let mut img = white(200, 200);
        // a thin stroke left of the drawing, kept by a speck above it on the first pass only
        fill(&mut img, bounds(40, 40, 50, 150));
        fill(&mut img, bounds(60, 120, 50, 150));
        img.put_pixel(50, 20, BLACK);
        let fitted = fit(&img, &bounds(0, 199, 0, 199), 10).unwrap();
        assert_eq!(fitted, bounds(60, 120, 50, 150));
        assert_eq!(fit(&img, &fitted, 10), Some(fitted));
    }

    #[test]
    fn test_fit_skips_specks() {
        let mut img = white(200, 200);
        let square = bounds(80, 139, 80, 139);
        fill(&mut img, square);
        img.put_pixel(30, 100, BLACK);
        img.put_pixel(170, 20, BLACK);
        assert_eq!(fit(&img, &bounds(0, 199, 0, 199), 10), Some(square));
    }

    #[test]
    fn test_blank_cell() {
        let mut img = white(200, 200);
        fill(&mut img, bounds(150, 190, 150, 190));
        assert_eq!(fit(&img, &bounds(0, 100, 0, 100), 10), None);
    }

    #[test]
    fn test_cell_clamped_to_image() {
        let mut img = white(100, 100);
        let square = bounds(30, 69, 30, 69);
        fill(&mut img, square);
        assert_eq!(fit(&img, &bounds(0, 500, 0, 500), 10), Some(square));
    }

    #[test]
    fn test_bounds_geometry() {
        let b = bounds(10, 19, 20, 39);
        assert_eq!((b.width(), b.height()), (10, 20));
        assert_eq!(b.center(), (15., 30.));
        assert!(!b.is_degenerate());
        assert!(bounds(11, 10, 0, 0).is_degenerate());
    }
}
