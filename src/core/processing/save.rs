use std::fs;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::io::writers::image_codec::write_with_image_codec;
use crate::io::writers::jpeg::write_rgba_jpeg;
use crate::io::writers::tiff::write_tiff_rgba8;
use crate::types::OutputFormat;

/// Outcome of writing the canvas to one destination
#[derive(Debug)]
pub struct DestinationOutcome {
    pub path: PathBuf,
    /// `None` when the extension maps to no supported format
    pub format: Option<OutputFormat>,
    pub result: Result<()>,
}

impl DestinationOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn encode_into<W: Write + Seek>(
    writer: &mut BufWriter<W>,
    output: &Path,
    canvas: &RgbaImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<()> {
    let (cols, rows) = canvas.dimensions();
    match format {
        OutputFormat::Jpeg => {
            write_rgba_jpeg(&mut *writer, output, cols, rows, canvas, jpeg_quality)?
        }
        OutputFormat::Tiff => write_tiff_rgba8(&mut *writer, output, cols, rows, canvas)?,
        OutputFormat::Png | OutputFormat::WebP | OutputFormat::Bmp | OutputFormat::Ico => {
            write_with_image_codec(writer, output, canvas, format)?
        }
    }
    writer.flush().map_err(write_error(output))
}

fn write_error(output: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Write {
        path: output.to_path_buf(),
        source,
    }
}

/// Give the staged file the permissions the destination already has, or
/// regular file permissions for a new destination.
fn match_permissions(staged: &NamedTempFile, output: &Path) -> std::io::Result<()> {
    if let Ok(meta) = fs::metadata(output) {
        return staged.as_file().set_permissions(meta.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    Ok(())
}

/// Encode `canvas` to `output`, picking the format from the extension.
///
/// The canvas is encoded into a temporary file next to `output` and moved over
/// it only once encoding succeeded, so a failed write leaves any existing file
/// untouched. The parent directory must already exist.
pub fn save_canvas(canvas: &RgbaImage, output: &Path, jpeg_quality: u8) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(output).ok_or_else(|| {
        Error::encode(
            output,
            format!(
                "unsupported output extension {:?}",
                output.extension().unwrap_or_default()
            ),
        )
    })?;

    if !format.supports_alpha() {
        debug!("{} has no alpha channel; writing RGB to {:?}", format, output);
    }

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = NamedTempFile::new_in(dir).map_err(write_error(output))?;
    let mut writer = BufWriter::new(staged);

    // On error the staged file is dropped, which deletes it
    encode_into(&mut writer, output, canvas, format, jpeg_quality)?;

    let staged = writer
        .into_inner()
        .map_err(|e| write_error(output)(e.into_error()))?;
    match_permissions(&staged, output).map_err(write_error(output))?;
    staged
        .persist(output)
        .map_err(|e| write_error(output)(e.error))?;

    info!("save_canvas: {} saved to {:?}", format, output);
    Ok(format)
}

/// Write the same canvas to every destination, in order.
/// A failing destination never prevents attempts on the remaining ones.
pub fn save_to_destinations(
    canvas: &RgbaImage,
    destinations: &[PathBuf],
    jpeg_quality: u8,
) -> Vec<DestinationOutcome> {
    destinations
        .iter()
        .map(|path| {
            let format = OutputFormat::from_path(path);
            let result = save_canvas(canvas, path, jpeg_quality).map(|_| ());
            if let Err(e) = &result {
                warn!("Destination {:?} failed: {}", path, e);
            }
            DestinationOutcome {
                path: path.clone(),
                format,
                result,
            }
        })
        .collect()
}
