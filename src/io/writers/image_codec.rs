use std::io::{Seek, Write};
use std::path::Path;

use image::{ImageError, ImageFormat, RgbaImage};

use crate::error::{Error, Result};
use crate::types::OutputFormat;

fn image_format(format: OutputFormat) -> Option<ImageFormat> {
    match format {
        OutputFormat::Png => Some(ImageFormat::Png),
        OutputFormat::WebP => Some(ImageFormat::WebP),
        OutputFormat::Bmp => Some(ImageFormat::Bmp),
        OutputFormat::Ico => Some(ImageFormat::Ico),
        // Dedicated writers
        OutputFormat::Jpeg | OutputFormat::Tiff => None,
    }
}

/// Encode through the `image` crate's codecs (PNG, WebP, BMP, ICO)
pub fn write_with_image_codec<W: Write + Seek>(
    writer: &mut W,
    output: &Path,
    canvas: &RgbaImage,
    format: OutputFormat,
) -> Result<()> {
    let image_format = image_format(format).ok_or_else(|| {
        Error::encode(output, format!("{} is not handled by the image codec", format))
    })?;

    canvas
        .write_to(writer, image_format)
        .map_err(|e| match e {
            ImageError::IoError(source) => Error::Write {
                path: output.to_path_buf(),
                source,
            },
            other => Error::encode(output, other),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::io::Cursor;

    #[test]
    fn png_keeps_alpha_channel() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let mut cursor = Cursor::new(Vec::new());
        write_with_image_codec(&mut cursor, Path::new("a.png"), &img, OutputFormat::Png).unwrap();
        let back = image::load_from_memory(cursor.get_ref()).unwrap();
        assert_eq!(back.color(), image::ColorType::Rgba8);
        assert_eq!(back.to_rgba8(), img);
    }

    #[test]
    fn ico_rejects_large_canvas() {
        let img = RgbaImage::from_pixel(512, 512, Rgba([1, 2, 3, 255]));
        let mut cursor = Cursor::new(Vec::new());
        let err = write_with_image_codec(&mut cursor, Path::new("a.ico"), &img, OutputFormat::Ico)
            .unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
    }

    #[test]
    fn jpeg_is_not_routed_here() {
        let img = RgbaImage::new(1, 1);
        let mut cursor = Cursor::new(Vec::new());
        assert!(
            write_with_image_codec(&mut cursor, Path::new("a.jpg"), &img, OutputFormat::Jpeg)
                .is_err()
        );
    }
}
