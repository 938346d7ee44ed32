//! A library that cuts the drawings on a scanned page into square tiles
//!
//! A page holds several drawings, dark on light paper, roughly arranged in a grid. The grid must be
//! precise enough that a straight line separates any pair of adjacent columns, and likewise for
//! rows. The library locates those separators, fits a box to every drawing and crops a square tile
//! around it. Small specks of scan noise are rejected by false flag checks whose thresholds scale
//! with the tile resolution.
//!
//! # Basic usage
//! ```no_run
//! # use scan_tiler::{load_page, tile_page, Error, TilerParams};
//! let scan = load_page("scans/017.png")?;
//! let params = TilerParams::new(256)?;
//! let result = tile_page(&scan, &params)?;
//! println!("columns: {:?}", result.grid.columns);
//! println!("rows: {:?}", result.grid.rows);
//! println!("{} tiles", result.tiles.len());
//! # Ok::<(), Error>(())
//! ```
//!
//! Tiles are numbered in traversal order: all rows of the first column, then the next column.

mod alpha;
mod error;
mod falseflag;
mod fitter;
mod orient;
mod page;
mod params;
mod sampler;
mod scanner;
mod tile;
mod tiler;
mod utils;

pub use alpha::{parse_color, to_alpha};
pub use error::Error;
pub use falseflag::{is_false_flag, is_true_edge, Side};
pub use fitter::{fit, Bounds};
pub use orient::{orient, Orientation};
pub use page::{crop_page, find_paper};
pub use params::{ScanParams, TilerParams, RESOLUTIONS};
pub use sampler::{is_ink, is_paper, luminance, INK_THRESHOLD};
pub use scanner::{scan_axis, scan_grid, Axis, Grid};
pub use tile::{crop_padded, crop_region, extract, Region, PAPER};
pub use tiler::{tile_page, PageTiles, Tile};
pub use utils::{
    draw_grid, load_page, page_number, save_grid, save_tiles, tile_file_name, GRID_COLOR,
    GRID_WIDTH,
};
