use std::io::{Seek, Write};
use std::path::Path;

use tiff::TiffError;
use tiff::encoder::{TiffEncoder, colortype};

use crate::error::{Error, Result};

fn map_tiff_err(output: &Path, e: TiffError) -> Error {
    match e {
        TiffError::IoError(source) => Error::Write {
            path: output.to_path_buf(),
            source,
        },
        other => Error::encode(output, other),
    }
}

/// Encode an RGBA canvas as an uncompressed 8-bit RGBA TIFF
pub fn write_tiff_rgba8<W: Write + Seek>(
    writer: W,
    output: &Path,
    cols: u32,
    rows: u32,
    data: &[u8],
) -> Result<()> {
    let mut encoder = TiffEncoder::new(writer).map_err(|e| map_tiff_err(output, e))?;
    encoder
        .write_image::<colortype::RGBA8>(cols, rows, data)
        .map_err(|e| map_tiff_err(output, e))
}
