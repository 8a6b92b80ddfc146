use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Background-difference threshold.
///
/// Each channel's absolute difference from the background is amplified as
/// `clamp(diff * gain - bias, 0, 255)` and truncated to an integer; a pixel is
/// foreground when any channel (alpha included) ends up above zero. The
/// default (gain 1, bias 100) ignores everything within 100 levels of the
/// background, which absorbs JPEG ringing around flat borders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimThreshold {
    pub gain: f32,
    pub bias: f32,
}

impl Default for TrimThreshold {
    fn default() -> Self {
        Self {
            gain: 1.0,
            bias: 100.0,
        }
    }
}

impl TrimThreshold {
    pub fn new(gain: f32, bias: f32) -> Self {
        Self { gain, bias }
    }

    /// Any channel differing by more than `tolerance` counts as content
    pub fn tolerance(tolerance: u8) -> Self {
        Self::new(1.0, tolerance as f32)
    }

    /// Exact comparison: any difference at all counts as content
    pub fn exact() -> Self {
        Self::tolerance(0)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gain.is_finite() || self.gain < 0.0 {
            return Err(Error::InvalidArgument {
                arg: "gain",
                value: self.gain.to_string(),
            });
        }
        if !self.bias.is_finite() {
            return Err(Error::InvalidArgument {
                arg: "bias",
                value: self.bias.to_string(),
            });
        }
        Ok(())
    }

    pub fn amplify(&self, diff: u8) -> u8 {
        (diff as f32 * self.gain - self.bias).clamp(0.0, u8::MAX as f32) as u8
    }

    /// Lookup table indexed by absolute channel difference
    fn foreground_table(&self) -> [bool; 256] {
        std::array::from_fn(|d| self.amplify(d as u8) > 0)
    }
}

/// Half-open pixel rectangle: `left..right` by `top..bottom`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Smallest rectangle containing every pixel that differs from pixel (0,0).
/// Returns `None` for a uniform (or empty) image.
pub fn find_content_bbox(image: &RgbaImage, threshold: &TrimThreshold) -> Option<BoundingBox> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let background = image.get_pixel(0, 0).0;
    let table = threshold.foreground_table();
    let is_foreground = |px: &[u8]| {
        px.iter()
            .zip(background.iter())
            .any(|(&c, &b)| table[c.abs_diff(b) as usize])
    };

    let row_len = width as usize * 4;
    let mut bbox: Option<BoundingBox> = None;

    for (y, row) in image.as_raw().chunks_exact(row_len).enumerate() {
        let mut pixels = row.chunks_exact(4);
        let Some(first) = pixels.position(|px| is_foreground(px)) else {
            continue;
        };
        // Scan back from the end; `first` is a hit so this cannot miss
        let last = row
            .chunks_exact(4)
            .rposition(|px| is_foreground(px))
            .unwrap_or(first);

        let y = y as u32;
        let (x0, x1) = (first as u32, last as u32 + 1);
        bbox = Some(match bbox {
            None => BoundingBox {
                left: x0,
                top: y,
                right: x1,
                bottom: y + 1,
            },
            Some(b) => BoundingBox {
                left: b.left.min(x0),
                top: b.top,
                right: b.right.max(x1),
                bottom: y + 1,
            },
        });
    }

    bbox
}

/// Crop `image` to its content; returns the image and the box that was kept.
/// A uniform image comes back unchanged with a full-size box.
pub fn trim_with_bbox(image: RgbaImage, threshold: &TrimThreshold) -> (RgbaImage, BoundingBox) {
    let (width, height) = image.dimensions();

    match find_content_bbox(&image, threshold) {
        None => {
            info!(
                "Trim: no content found in {}x{} image, keeping it unchanged",
                width, height
            );
            (image, BoundingBox::full(width, height))
        }
        Some(bbox) if bbox.is_full(width, height) => {
            debug!("Trim: content spans the whole {}x{} image", width, height);
            (image, bbox)
        }
        Some(bbox) => {
            info!(
                "Trim: {}x{} -> {}x{} at {}",
                width,
                height,
                bbox.width(),
                bbox.height(),
                bbox
            );
            let cropped =
                imageops::crop_imm(&image, bbox.left, bbox.top, bbox.width(), bbox.height())
                    .to_image();
            (cropped, bbox)
        }
    }
}

pub fn trim(image: RgbaImage, threshold: &TrimThreshold) -> RgbaImage {
    trim_with_bbox(image, threshold).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const BG: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn uniform_image_is_unchanged() {
        let img = RgbaImage::from_pixel(40, 30, Rgba([12, 34, 56, 255]));
        assert_eq!(find_content_bbox(&img, &TrimThreshold::default()), None);
        let (out, bbox) = trim_with_bbox(img.clone(), &TrimThreshold::default());
        assert_eq!(out.dimensions(), (40, 30));
        assert_eq!(out, img);
        assert!(bbox.is_full(40, 30));
    }

    #[test]
    fn single_pixel_becomes_one_by_one_crop() {
        let mut img = RgbaImage::from_pixel(50, 40, BG);
        img.put_pixel(17, 23, Rgba([255, 255, 255, 255]));

        let bbox = find_content_bbox(&img, &TrimThreshold::default()).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                left: 17,
                top: 23,
                right: 18,
                bottom: 24
            }
        );

        let out = trim(img, &TrimThreshold::default());
        assert_eq!(out.dimensions(), (1, 1));
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn box_spans_all_content_pixels() {
        let mut img = RgbaImage::from_pixel(100, 100, BG);
        img.put_pixel(10, 60, Rgba([200, 0, 0, 255]));
        img.put_pixel(70, 20, Rgba([0, 200, 0, 255]));
        img.put_pixel(40, 90, Rgba([0, 0, 200, 255]));

        let bbox = find_content_bbox(&img, &TrimThreshold::default()).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                left: 10,
                top: 20,
                right: 71,
                bottom: 91
            }
        );
        assert_eq!(trim(img, &TrimThreshold::default()).dimensions(), (61, 71));
    }

    #[test]
    fn noise_below_threshold_is_background() {
        let mut img = RgbaImage::from_pixel(20, 20, BG);
        img.put_pixel(3, 3, Rgba([100, 100, 100, 255]));
        img.put_pixel(15, 15, Rgba([101, 0, 0, 255]));

        let bbox = find_content_bbox(&img, &TrimThreshold::default()).unwrap();
        assert_eq!((bbox.left, bbox.top, bbox.width(), bbox.height()), (15, 15, 1, 1));

        let exact = find_content_bbox(&img, &TrimThreshold::exact()).unwrap();
        assert_eq!((exact.left, exact.top), (3, 3));
    }

    #[test]
    fn gain_amplifies_small_differences() {
        let mut img = RgbaImage::from_pixel(10, 10, BG);
        img.put_pixel(5, 5, Rgba([60, 0, 0, 255]));

        assert_eq!(find_content_bbox(&img, &TrimThreshold::default()), None);
        assert!(find_content_bbox(&img, &TrimThreshold::new(2.0, 100.0)).is_some());
    }

    #[test]
    fn alpha_difference_counts_as_content() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]));
        img.put_pixel(4, 6, Rgba([0, 0, 0, 255]));
        let bbox = find_content_bbox(&img, &TrimThreshold::default()).unwrap();
        assert_eq!((bbox.left, bbox.top), (4, 6));
    }

    #[test]
    fn non_uniform_background_keeps_full_image() {
        let mut img = RgbaImage::from_pixel(8, 8, BG);
        img.put_pixel(7, 7, Rgba([255, 255, 255, 255]));
        img.put_pixel(7, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(0, 7, Rgba([255, 255, 255, 255]));
        let (out, bbox) = trim_with_bbox(img, &TrimThreshold::default());
        assert_eq!(bbox, BoundingBox::full(8, 8));
        assert_eq!(out.dimensions(), (8, 8));
    }

    #[test]
    fn empty_image_has_no_content() {
        let img = RgbaImage::new(0, 0);
        assert_eq!(find_content_bbox(&img, &TrimThreshold::default()), None);
        assert_eq!(trim(img, &TrimThreshold::default()).dimensions(), (0, 0));
    }

    #[test]
    fn amplify_clamps() {
        let t = TrimThreshold::new(3.0, 10.0);
        assert_eq!(t.amplify(0), 0);
        assert_eq!(t.amplify(3), 0);
        assert_eq!(t.amplify(4), 2);
        assert_eq!(t.amplify(255), 255);
        assert!(TrimThreshold::new(f32::NAN, 0.0).validate().is_err());
        assert!(TrimThreshold::new(-1.0, 0.0).validate().is_err());
    }
}
