use crate::error::Error;

/// Tile resolutions the thresholds are tuned for. 256 px corresponds to a 300 dpi scan.
pub const RESOLUTIONS: [u32; 3] = [256, 512, 1024];

/// Pipeline configuration, passed explicitly to every stage that needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct TilerParams {
    /// Side of the square output tiles
    pub resolution: u32,
    /// Scale factor `s`, normally `resolution / 256`
    pub scale: u32,
    /// Pixels removed from every side after the scanner bed is cropped away
    pub margin: u32,
    /// Single false flag threshold used while fitting boxes
    pub default_threshold: u32,
    /// False flag thresholds of the axis scan, in units of `s`
    pub threshold_factors: Vec<u32>,
    /// First scanned line of each axis, in units of `s`
    pub start_factor: u32,
    /// Unconditional skip after entering a band of ink, in units of `s`
    pub skip_factor: u32,
}

impl Default for TilerParams {
    fn default() -> Self {
        TilerParams {
            resolution: 256,
            scale: 1,
            margin: 40,
            default_threshold: 10,
            threshold_factors: vec![2, 5, 10, 15],
            start_factor: 100,
            skip_factor: 10,
        }
    }
}

impl TilerParams {
    /// Default parameters for tiles of `resolution` pixels.
    ///
    /// # Errors
    /// If `resolution` is not one of [RESOLUTIONS].
    pub fn new(resolution: u32) -> Result<TilerParams, Error> {
        if !RESOLUTIONS.contains(&resolution) {
            return Err(Error::ResolutionMismatch(resolution));
        }
        Ok(TilerParams {
            resolution,
            scale: resolution / 256,
            ..Default::default()
        })
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.default_threshold = threshold;
        self
    }

    /// Side of the guard-banded square cropped around each drawing before resizing.
    pub fn pre_res(&self) -> u32 {
        self.resolution + self.resolution / 2
    }

    pub fn scan_params(&self) -> ScanParams {
        let s = self.scale;
        ScanParams {
            thresholds: self.threshold_factors.iter().map(|f| f * s).collect(),
            start: self.start_factor * s,
            skip: self.skip_factor * s,
        }
    }
}

/// Axis scanner settings in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanParams {
    /// A dark pixel opens a band of ink only if it is no false flag at any of these thresholds
    pub thresholds: Vec<u32>,
    /// First scanned line
    pub start: u32,
    /// Lines skipped unconditionally after a band of ink was entered
    pub skip: u32,
}

impl ScanParams {
    /// Default scan settings for scale factor `s`.
    pub fn for_scale(s: u32) -> ScanParams {
        TilerParams {
            scale: s,
            ..Default::default()
        }
        .scan_params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_scale() {
        let params = TilerParams::new(1024).unwrap();
        assert_eq!(params.scale, 4);
        assert_eq!(params.pre_res(), 1536);
        let scan = params.scan_params();
        assert_eq!(scan.thresholds, vec![8, 20, 40, 60]);
        assert_eq!(scan.start, 400);
        assert_eq!(scan.skip, 40);
    }

    #[test]
    fn test_resolution_mismatch() {
        assert!(matches!(
            TilerParams::new(300),
            Err(Error::ResolutionMismatch(300))
        ));
        assert!(TilerParams::new(128).is_err());
    }
}
