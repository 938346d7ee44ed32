use crate::error::Error;
use crate::sampler::luminance;
use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Parse a `#rrggbb` color.
pub fn parse_color(color: &str) -> Result<Rgb<u8>, Error> {
    let invalid = || Error::InvalidColor(color.to_string());
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Turn a tile into a transparent image: paper becomes clear, ink becomes opaque `color`.
///
/// The alpha of every pixel is the inverted luminance.
pub fn to_alpha(img: &RgbImage, color: Rgb<u8>) -> RgbaImage {
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let alpha = 255 - luminance(img, x, y);
        Rgba([color[0], color[1], color[2], alpha])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#000000").unwrap(), Rgb([0, 0, 0]));
        assert_eq!(parse_color("#ff8001").unwrap(), Rgb([255, 128, 1]));
        assert!(matches!(parse_color("ff8001"), Err(Error::InvalidColor(_))));
        assert!(parse_color("#ff80").is_err());
        assert!(parse_color("#gg0000").is_err());
    }

    #[test]
    fn test_to_alpha() {
        let mut img = RgbImage::from_pixel(2, 1, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([30, 30, 30]));
        let rgba = to_alpha(&img, Rgb([0, 0, 200]));
        assert_eq!(rgba.get_pixel(0, 0), &Rgba([0, 0, 200, 0]));
        assert_eq!(rgba.get_pixel(1, 0), &Rgba([0, 0, 200, 225]));
    }
}
