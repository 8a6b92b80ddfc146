//! I/O layer: decoding the source raster (`reader`) and encoding canvases to
//! PNG/JPEG/TIFF and the other supported formats (`writers`), plus the JSON
//! run report.
pub mod reader;
pub use reader::{decode_image, load_image};

pub mod writers;
