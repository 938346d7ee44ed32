use crate::sampler::is_ink;
use image::RgbImage;
use std::fmt;
use std::ops::Range;

/// The edge of an ink region that a scan approaches.
///
/// `Left` and `Top` probe in the positive direction (into the region), `Right` and `Bottom` in the
/// negative direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    fn direction(self) -> i64 {
        match self {
            Side::Left | Side::Top => 1,
            Side::Right | Side::Bottom => -1,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        };
        write!(f, "{}", name)
    }
}

/// Decide whether a dark pixel at axis position `candidate` is a scan artifact.
///
/// The line `threshold` pixels further along the direction implied by `side` is inspected over
/// `range` (rows for `Left`/`Right`, columns for `Top`/`Bottom`). If that line is all paper, the
/// candidate is a false flag. If even one pixel on it is ink, the candidate is a real edge.
/// A probe line that falls off the image (or on its first line) counts as a false flag.
pub fn is_false_flag(
    img: &RgbImage,
    candidate: u32,
    side: Side,
    range: Range<u32>,
    threshold: u32,
) -> bool {
    let probe = candidate as i64 + threshold as i64 * side.direction();
    let (extent, across) = if side.is_vertical() {
        (img.width(), img.height())
    } else {
        (img.height(), img.width())
    };
    if probe <= 0 || probe >= extent as i64 {
        return true;
    }
    let probe = probe as u32;
    let range = range.start.min(across)..range.end.min(across);
    let found_ink = if side.is_vertical() {
        range.into_iter().any(|y| is_ink(img, probe, y))
    } else {
        range.into_iter().any(|x| is_ink(img, x, probe))
    };
    !found_ink
}

/// True when the candidate survives the false flag check at every threshold.
pub fn is_true_edge(
    img: &RgbImage,
    candidate: u32,
    side: Side,
    range: Range<u32>,
    thresholds: &[u32],
) -> bool {
    thresholds
        .iter()
        .all(|&t| !is_false_flag(img, candidate, side, range.clone(), t))
}
