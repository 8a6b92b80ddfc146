use std::path::Path;

use image::{ImageReader, RgbaImage};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Read and decode `path` into RGBA8. The format is detected from the file
/// contents, not its extension.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    if !path.is_file() {
        return Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let decode_err = |source: image::ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?;
    debug!("Detected format {:?} for {}", reader.format(), path.display());

    let decoded = reader.decode().map_err(decode_err)?;
    info!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    Ok(decoded.to_rgba8())
}

/// Decode an in-memory encoded image into RGBA8
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let decoded = image::load_from_memory(bytes).map_err(|source| Error::Decode {
        path: "<memory>".into(),
        source,
    })?;
    Ok(decoded.to_rgba8())
}
