use image::RgbaImage;
use tracing::{info, warn};

use crate::core::processing::resize::{ScaleResult, resize_rgba_image};
use crate::error::{Error, Result};
use crate::types::{CanvasSize, Color, ResampleFilter};

/// Center `content` on a canvas filled with `background`.
///
/// The content is resampled to `fit.new_width x fit.new_height` and pasted at
/// `(fit.offset_x, fit.offset_y)`. The background is always applied opaque,
/// so the returned canvas has alpha 255 everywhere.
pub fn compose(
    content: &RgbaImage,
    fit: &ScaleResult,
    canvas_size: CanvasSize,
    background: Color,
    filter: ResampleFilter,
) -> Result<RgbaImage> {
    canvas_size.validate()?;
    let (cols, rows) = canvas_size.dimensions();

    let right = fit.offset_x.checked_add(fit.new_width);
    let bottom = fit.offset_y.checked_add(fit.new_height);
    let inside = matches!((right, bottom), (Some(r), Some(b)) if r <= cols && b <= rows);
    if fit.new_width == 0 || fit.new_height == 0 || !inside {
        return Err(Error::InvalidDimensions {
            what: "fitted content",
            width: fit.new_width,
            height: fit.new_height,
        });
    }

    let background = if background.is_opaque() {
        background
    } else {
        warn!(
            "Background {} is not opaque; using {} instead",
            background,
            background.to_opaque()
        );
        background.to_opaque()
    };

    info!(
        "Composing {}x{} content onto {}x{} {} canvas at +{}+{}",
        fit.new_width, fit.new_height, cols, rows, background, fit.offset_x, fit.offset_y
    );

    let resized = resize_rgba_image(content, fit.new_width, fit.new_height, filter)?;
    let mut canvas = RgbaImage::from_pixel(cols, rows, background.to_rgba());
    paste_over(&mut canvas, &resized, fit.offset_x, fit.offset_y);

    Ok(canvas)
}

/// Paste `src` onto `dst` at `(x, y)` with "over" compositing.
///
/// Opaque source pixels replace the destination, fully transparent ones leave
/// it untouched. Parts of `src` that fall outside `dst` are clipped.
pub fn paste_over(dst: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    let (dst_cols, dst_rows) = dst.dimensions();
    let (src_cols, src_rows) = src.dimensions();
    if x >= dst_cols || y >= dst_rows {
        return;
    }

    let cols = src_cols.min(dst_cols - x) as usize;
    let rows = src_rows.min(dst_rows - y) as usize;
    let (x, y) = (x as usize, y as usize);
    let (src_stride, dst_stride) = (src_cols as usize * 4, dst_cols as usize * 4);

    let src_data = src.as_raw();
    let dst_data: &mut [u8] = dst;

    // Copy per row using slice copies; blend only rows that carry transparency
    for row in 0..rows {
        let src_offset = row * src_stride;
        let dst_offset = (row + y) * dst_stride + x * 4;
        let src_slice = &src_data[src_offset..src_offset + cols * 4];
        let dst_slice = &mut dst_data[dst_offset..dst_offset + cols * 4];

        if src_slice.chunks_exact(4).all(|px| px[3] == u8::MAX) {
            dst_slice.copy_from_slice(src_slice);
            continue;
        }

        for (d, s) in dst_slice.chunks_exact_mut(4).zip(src_slice.chunks_exact(4)) {
            blend_pixel(d, s);
        }
    }
}

/// Integer "over" operator on straight (non-premultiplied) RGBA8
fn blend_pixel(dst: &mut [u8], src: &[u8]) {
    let sa = src[3] as u32;
    match sa {
        0 => {}
        255 => dst.copy_from_slice(src),
        _ => {
            let da = dst[3] as u32;
            // out_a scaled by 255: sa*255 + da*(255 - sa)
            let out_a = sa * 255 + da * (255 - sa);
            for c in 0..3 {
                let num = src[c] as u32 * sa * 255 + dst[c] as u32 * da * (255 - sa);
                dst[c] = ((num + out_a / 2) / out_a) as u8;
            }
            dst[3] = ((out_a + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::resize::compute_fit;
    use image::Rgba;

    #[test]
    fn canvas_is_filled_with_opaque_background() {
        let content = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let fit = compute_fit((10, 10), (20, 40)).unwrap();
        let canvas = compose(
            &content,
            &fit,
            CanvasSize::new(20, 40),
            Color::rgba(0, 0, 255, 0),
            ResampleFilter::Lanczos3,
        )
        .unwrap();

        assert_eq!(canvas.dimensions(), (20, 40));
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(*canvas.get_pixel(19, 39), Rgba([0, 0, 255, 255]));
        assert!(canvas.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn content_is_vertically_centered() {
        let content = RgbaImage::from_pixel(100, 50, Rgba([255, 255, 255, 255]));
        let fit = compute_fit((100, 50), (512, 512)).unwrap();
        assert_eq!(fit.new_width, 512);
        assert_eq!(fit.offset_y, (512 - fit.new_height) / 2);

        let canvas = compose(
            &content,
            &fit,
            CanvasSize::square(512),
            Color::BLACK,
            ResampleFilter::Lanczos3,
        )
        .unwrap();

        let black = Rgba([0, 0, 0, 255]);
        assert_eq!(*canvas.get_pixel(256, fit.offset_y - 1), black);
        assert_eq!(*canvas.get_pixel(256, fit.offset_y + fit.new_height), black);
        assert!(canvas.get_pixel(256, 256).0[0] > 250);
        assert!(canvas.get_pixel(0, fit.offset_y).0[0] > 250);
    }

    #[test]
    fn content_is_not_mutated() {
        let content = RgbaImage::from_pixel(4, 2, Rgba([9, 9, 9, 255]));
        let before = content.clone();
        let fit = compute_fit((4, 2), (8, 8)).unwrap();
        compose(&content, &fit, CanvasSize::square(8), Color::BLACK, ResampleFilter::Area).unwrap();
        assert_eq!(content, before);
    }

    #[test]
    fn rejects_fit_outside_canvas() {
        let content = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let fit = ScaleResult { new_width: 8, new_height: 8, offset_x: 1, offset_y: 0 };
        assert!(matches!(
            compose(&content, &fit, CanvasSize::square(8), Color::BLACK, ResampleFilter::Lanczos3),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_overflowing_or_empty_fit() {
        let content = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let canvas = CanvasSize::square(8);
        let fits = [
            ScaleResult { new_width: 8, new_height: 8, offset_x: u32::MAX, offset_y: 0 },
            ScaleResult { new_width: 4, new_height: u32::MAX, offset_x: 0, offset_y: 2 },
            ScaleResult { new_width: 0, new_height: 8, offset_x: 0, offset_y: 0 },
            ScaleResult { new_width: 8, new_height: 0, offset_x: 0, offset_y: 0 },
        ];
        for fit in fits {
            assert!(
                matches!(
                    compose(&content, &fit, canvas, Color::BLACK, ResampleFilter::Area),
                    Err(Error::InvalidDimensions { what: "fitted content", .. })
                ),
                "{:?}",
                fit
            );
        }
    }

    #[test]
    fn paste_blends_partial_alpha() {
        let mut canvas = RgbaImage::from_pixel(3, 1, Rgba([0, 0, 0, 255]));
        let mut src = RgbaImage::new(3, 1);
        src.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        src.put_pixel(1, 0, Rgba([200, 100, 50, 0]));
        src.put_pixel(2, 0, Rgba([200, 100, 50, 128]));

        paste_over(&mut canvas, &src, 0, 0);

        assert_eq!(*canvas.get_pixel(0, 0), Rgba([200, 100, 50, 255]));
        assert_eq!(*canvas.get_pixel(1, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(2, 0), Rgba([100, 50, 25, 255]));
    }

    #[test]
    fn paste_clips_at_edges() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let src = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255]));
        paste_over(&mut canvas, &src, 2, 2);
        assert_eq!(*canvas.get_pixel(3, 3), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(1, 1), Rgba([0, 0, 0, 255]));
        paste_over(&mut canvas, &src, 9, 9);
    }
}
