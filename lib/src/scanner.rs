use crate::falseflag::{is_true_edge, Side};
use crate::fitter::Bounds;
use crate::params::ScanParams;
use crate::sampler::is_ink;
use image::RgbImage;
use log::debug;

/// The axis swept by a scan: `Columns` advances x, `Rows` advances y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Columns,
    Rows,
}

impl Axis {
    /// Length along the axis and across it.
    fn extent(self, img: &RgbImage) -> (u32, u32) {
        match self {
            Axis::Columns => (img.width(), img.height()),
            Axis::Rows => (img.height(), img.width()),
        }
    }

    fn leading_side(self) -> Side {
        match self {
            Axis::Columns => Side::Left,
            Axis::Rows => Side::Top,
        }
    }

    fn line_has_ink(self, img: &RgbImage, pos: u32, across: u32) -> bool {
        match self {
            Axis::Columns => (0..across).any(|y| is_ink(img, pos, y)),
            Axis::Rows => (0..across).any(|x| is_ink(img, x, pos)),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Scan {
    SeekingInk,
    CrossingInk,
}

/// Sweep `axis` and return the separator coordinates between bands of ink.
///
/// A separator is recorded on the last paper line before every band of ink whose leading edge
/// survives the false flag check at all `params.thresholds`. If the sweep ends in whitespace, the
/// last line of the image closes the sequence. Adjacent pairs of the result bound the rows or
/// columns of the grid.
pub fn scan_axis(img: &RgbImage, axis: Axis, params: &ScanParams) -> Vec<u32> {
    let (len, across) = axis.extent(img);
    let side = axis.leading_side();
    let mut separators = Vec::new();
    if params.start >= len {
        return separators;
    }
    let mut state = Scan::SeekingInk;
    let mut pos = params.start;
    while pos < len {
        match state {
            Scan::SeekingInk => {
                if axis.line_has_ink(img, pos, across)
                    && is_true_edge(img, pos, side, 0..across, &params.thresholds)
                {
                    separators.push(pos.saturating_sub(1));
                    debug!("# {:?} {} CrossingInk", axis, pos);
                    state = Scan::CrossingInk;
                    pos += params.skip;
                }
            }
            Scan::CrossingInk => {
                if !axis.line_has_ink(img, pos, across) {
                    debug!("# {:?} {} SeekingInk", axis, pos);
                    state = Scan::SeekingInk;
                }
            }
        }
        pos += 1;
    }
    if state == Scan::SeekingInk {
        separators.push(len - 1);
    }
    debug!("{:?}: {:?}", axis, separators);
    separators
}

/// Column and row separators of a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub columns: Vec<u32>,
    pub rows: Vec<u32>,
}

impl Grid {
    /// The coarse cells between adjacent separators.
    ///
    /// Cells are ordered column by column, all rows of a column before the next one. This is the
    /// order in which tiles are numbered.
    pub fn cells(&self) -> Vec<Bounds> {
        let mut cells = Vec::new();
        for col in self.columns.windows(2) {
            for row in self.rows.windows(2) {
                cells.push(Bounds {
                    left: col[0],
                    right: col[1],
                    top: row[0],
                    bottom: row[1],
                });
            }
        }
        cells
    }
}

/// Scan both axes of a (cropped) page.
pub fn scan_grid(img: &RgbImage, params: &ScanParams) -> Grid {
    Grid {
        columns: scan_axis(img, Axis::Columns, params),
        rows: scan_axis(img, Axis::Rows, params),
    }
}
