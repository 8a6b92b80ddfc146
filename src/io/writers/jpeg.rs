use jpeg_encoder::{ColorType, Encoder, EncodingError};
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Encode an RGBA canvas as baseline JPEG; the alpha channel is discarded.
pub fn write_rgba_jpeg<W: Write>(
    writer: W,
    output: &Path,
    cols: u32,
    rows: u32,
    rgba_data: &[u8],
    quality: u8,
) -> Result<()> {
    let (cols16, rows16) = match (u16::try_from(cols), u16::try_from(rows)) {
        (Ok(c), Ok(r)) => (c, r),
        _ => {
            return Err(Error::encode(
                output,
                format!("{}x{} exceeds the JPEG size limit", cols, rows),
            ));
        }
    };

    let encoder = Encoder::new(writer, quality);
    encoder
        .encode(rgba_data, cols16, rows16, ColorType::Rgba)
        .map_err(|e| match e {
            EncodingError::IoError(source) => Error::Write {
                path: output.to_path_buf(),
                source,
            },
            other => Error::encode(output, other),
        })
}
