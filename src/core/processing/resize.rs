use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::ResampleFilter;

/// Placement of the scaled content on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleResult {
    pub new_width: u32,
    pub new_height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl ScaleResult {
    pub fn size(&self) -> (u32, u32) {
        (self.new_width, self.new_height)
    }
}

/// Largest uniform scale of `content` that fits inside `canvas`, centered.
///
/// The limiting axis always lands exactly on the canvas side; the other side
/// is rounded and kept within `1..=canvas side`. Offsets are floor-divided.
pub fn compute_fit(content: (u32, u32), canvas: (u32, u32)) -> Result<ScaleResult> {
    let (w, h) = content;
    let (canvas_w, canvas_h) = canvas;

    if w == 0 || h == 0 {
        return Err(Error::InvalidDimensions {
            what: "content",
            width: w,
            height: h,
        });
    }
    if canvas_w == 0 || canvas_h == 0 {
        return Err(Error::InvalidDimensions {
            what: "canvas",
            width: canvas_w,
            height: canvas_h,
        });
    }

    let scale_x = canvas_w as f64 / w as f64;
    let scale_y = canvas_h as f64 / h as f64;

    let (new_width, new_height) = if scale_x <= scale_y {
        let scaled_h = (h as f64 * scale_x).round() as u32;
        (canvas_w, scaled_h.clamp(1, canvas_h))
    } else {
        let scaled_w = (w as f64 * scale_y).round() as u32;
        (scaled_w.clamp(1, canvas_w), canvas_h)
    };

    let fit = ScaleResult {
        new_width,
        new_height,
        offset_x: (canvas_w - new_width) / 2,
        offset_y: (canvas_h - new_height) / 2,
    };

    debug!(
        "Fit: {}x{} into {}x{} (scale {:.4}) -> {}x{} at +{}+{}",
        w,
        h,
        canvas_w,
        canvas_h,
        scale_x.min(scale_y),
        fit.new_width,
        fit.new_height,
        fit.offset_x,
        fit.offset_y
    );

    Ok(fit)
}

fn resize_alg(filter: ResampleFilter) -> ResizeAlg {
    let filter_type = match filter {
        ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        ResampleFilter::CatmullRom => FilterType::CatmullRom,
        ResampleFilter::Mitchell => FilterType::Mitchell,
        ResampleFilter::Bilinear => FilterType::Bilinear,
        ResampleFilter::Area => FilterType::Box,
    };
    ResizeAlg::Convolution(filter_type)
}

/// Resample an RGBA image. Alpha is premultiplied during filtering so
/// transparent pixels do not bleed their color into neighbours.
pub fn resize_rgba_image(
    src: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: ResampleFilter,
) -> Result<RgbaImage> {
    let (src_width, src_height) = src.dimensions();

    if (src_width, src_height) == (target_width, target_height) {
        debug!("Resize skipped: already {}x{}", target_width, target_height);
        return Ok(src.clone());
    }

    info!(
        "Resizing {}x{} -> {}x{} ({})",
        src_width, src_height, target_width, target_height, filter
    );

    let resize_options = ResizeOptions::new().resize_alg(resize_alg(filter));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(src_width, src_height, src.as_raw().clone(), PixelType::U8x4)
        .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_width, target_height, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    RgbaImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| Error::Resize("resized buffer has unexpected length".to_string()))
}
