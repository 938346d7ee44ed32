use crate::error::Error;
use crate::scanner::Grid;
use crate::tiler::PageTiles;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::fs;
use std::path::{Path, PathBuf};

pub const GRID_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const GRID_WIDTH: u32 = 5;

/// Draw the separators of `grid` over a copy of `page`, as lines of `width` pixels.
pub fn draw_grid(page: &RgbImage, grid: &Grid, color: Rgb<u8>, width: u32) -> RgbImage {
    let mut img = page.clone();
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img;
    }
    let width = width.max(1);
    let offset = (width / 2) as i32;
    for &x in grid.columns.iter() {
        let line = Rect::at(x as i32 - offset, 0).of_size(width, h);
        draw_filled_rect_mut(&mut img, line, color);
    }
    for &y in grid.rows.iter() {
        let line = Rect::at(0, y as i32 - offset).of_size(w, width);
        draw_filled_rect_mut(&mut img, line, color);
    }
    img
}

/// Read a page image and convert it to RGB.
pub fn load_page<P: AsRef<Path>>(path: P) -> Result<RgbImage, Error> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| Error::ImageError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(img.into_rgb8())
}

/// The page number of a page file: its file name up to the first `.`
pub fn page_number<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(String::from))
        .unwrap_or_default()
}

pub fn tile_file_name(page: &str, index: usize) -> String {
    format!("p{}_t{:02}.png", page, index)
}

fn save_image(img: &RgbImage, path: &Path) -> Result<(), Error> {
    img.save(path).map_err(|source| Error::ImageError {
        path: path.display().to_string(),
        source,
    })
}

/// Save the tiles of a page as `<dir_out>/p<page>/p<page>_t<NN>.png`.
///
/// Returns the paths of the saved tiles.
pub fn save_tiles<P: AsRef<Path>>(
    result: &PageTiles,
    page: &str,
    dir_out: P,
) -> Result<Vec<PathBuf>, Error> {
    let mut dir = PathBuf::new();
    dir.push(dir_out.as_ref());
    dir.push(format!("p{}", page));
    fs::create_dir_all(&dir)?;
    let mut paths = Vec::new();
    for tile in result.tiles.iter() {
        let path = dir.join(tile_file_name(page, tile.index));
        save_image(&tile.image, &path)?;
        paths.push(path);
    }
    Ok(paths)
}

/// Save the cropped page with the detected grid drawn over it.
pub fn save_grid<P: AsRef<Path>>(result: &PageTiles, path: P) -> Result<(), Error> {
    let overlay = draw_grid(&result.page, &result.grid, GRID_COLOR, GRID_WIDTH);
    save_image(&overlay, path.as_ref())
}
