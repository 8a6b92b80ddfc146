use image::RgbaImage;
use tracing::info;

use crate::core::params::NormalizeParams;
use crate::core::processing::padding::compose;
use crate::core::processing::resize::{ScaleResult, compute_fit};
use crate::core::processing::trim::{BoundingBox, trim_with_bbox};
use crate::error::Result;
use crate::types::CanvasSize;

/// Result of in-memory normalization
#[derive(Debug, Clone)]
pub struct NormalizedIcon {
    pub canvas: RgbaImage,
    pub source_size: (u32, u32),
    /// Region of the source that was kept, in source coordinates
    pub trimmed: BoundingBox,
    pub fit: ScaleResult,
}

/// Output of the trim stage, reusable across several canvas sizes
#[derive(Debug, Clone)]
pub struct TrimmedContent {
    pub image: RgbaImage,
    pub source_size: (u32, u32),
    pub bbox: BoundingBox,
}

pub fn trim_stage(source: RgbaImage, params: &NormalizeParams) -> TrimmedContent {
    let source_size = source.dimensions();
    let (image, bbox) = if params.trim {
        trim_with_bbox(source, &params.threshold)
    } else {
        (source, BoundingBox::full(source_size.0, source_size.1))
    };
    TrimmedContent {
        image,
        source_size,
        bbox,
    }
}

/// Fit and compose already-trimmed content onto a canvas of `canvas_size`
pub fn fit_and_compose(
    content: &TrimmedContent,
    canvas_size: CanvasSize,
    params: &NormalizeParams,
) -> Result<NormalizedIcon> {
    canvas_size.validate()?;
    let fit = compute_fit(content.image.dimensions(), canvas_size.dimensions())?;
    let canvas = compose(
        &content.image,
        &fit,
        canvas_size,
        params.background,
        params.filter,
    )?;

    Ok(NormalizedIcon {
        canvas,
        source_size: content.source_size,
        trimmed: content.bbox,
        fit,
    })
}

/// Trim -> fit -> compose, entirely in memory
pub fn normalize_image(source: RgbaImage, params: &NormalizeParams) -> Result<NormalizedIcon> {
    params.validate()?;
    let (w, h) = source.dimensions();
    let content = trim_stage(source, params);
    let icon = fit_and_compose(&content, params.canvas, params)?;
    info!(
        "Normalized {}x{} source into {} icon (content {}x{})",
        w,
        h,
        params.canvas,
        icon.fit.new_width,
        icon.fit.new_height
    );
    Ok(icon)
}
