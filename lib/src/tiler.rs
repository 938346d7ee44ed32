use crate::error::Error;
use crate::fitter::{fit, Bounds};
use crate::page::crop_page;
use crate::params::TilerParams;
use crate::scanner::{scan_grid, Grid};
use crate::tile::{extract, Region};
use image::RgbImage;
use log::{debug, info};

/// A drawing cut from a page.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Sequence number within the page, in cell traversal order
    pub index: usize,
    /// The coarse cell the drawing was found in
    pub cell: Bounds,
    /// The cell tightened to the drawing
    pub bounds: Bounds,
    /// The guard banded source region of the tile
    pub region: Region,
    pub image: RgbImage,
}

/// Everything derived from one page.
#[derive(Debug, Clone)]
pub struct PageTiles {
    /// The page with the scanner bed and margin removed. All coordinates refer to this image.
    pub page: RgbImage,
    pub grid: Grid,
    pub tiles: Vec<Tile>,
}

/// Cut every drawing on a scanned page into a square tile.
///
/// The processing consists of these phases:
/// 1. Crop away the scanner bed around the paper
/// 2. Scan columns and rows for the separators between drawings
/// 3. Fit a box to the drawing in every coarse cell, skipping blank cells
/// 4. Crop a square around each box and resize it to `params.resolution`
///
/// # Errors
/// * The page border can not be found ([Error::MalformedScan], [Error::MarginTooLarge])
pub fn tile_page(scan: &RgbImage, params: &TilerParams) -> Result<PageTiles, Error> {
    let page = crop_page(scan, params.margin)?;
    let grid = scan_grid(&page, &params.scan_params());
    info!(
        "page {}x{}: {} columns, {} rows",
        page.width(),
        page.height(),
        grid.columns.len().saturating_sub(1),
        grid.rows.len().saturating_sub(1)
    );

    let mut tiles = Vec::new();
    for cell in grid.cells() {
        let bounds = match fit(&page, &cell, params.default_threshold) {
            Some(bounds) => bounds,
            None => {
                debug!("blank cell {:?}", cell);
                continue;
            }
        };
        let (image, region) = extract(&page, &bounds, params.pre_res(), params.resolution)?;
        tiles.push(Tile {
            index: tiles.len(),
            cell,
            bounds,
            region,
            image,
        });
    }
    info!("{} tiles", tiles.len());
    Ok(PageTiles { page, grid, tiles })
}
