#![doc = r##"
iconfit — turn arbitrary raster images into fixed-size square icons.

The pipeline is strictly linear: decode the source, trim uniform background
padding (everything that matches pixel (0,0) within a tunable threshold), fit
the remaining content into the target canvas without distortion, center it on
an opaque background, and encode the canvas to one or more destinations. It
powers the `iconfit` CLI and can be embedded in your own Rust applications.

Quick start: normalize to several files
---------------------------------------
```rust,no_run
use std::path::{Path, PathBuf};
use iconfit::{normalize_icon, NormalizeParams};

fn main() -> iconfit::Result<()> {
    let report = normalize_icon(
        Path::new("logo.png"),
        &[PathBuf::from("public/pwa-icon.png"), PathBuf::from("public/icon.jpg")],
        &NormalizeParams::default(), // 512x512, opaque black background
    )?;

    for (path, err) in report.failed() {
        eprintln!("{}: {err}", path.display());
    }
    report.into_result()
}
```

Custom parameters
-----------------
```rust
use iconfit::{CanvasSize, Color, NormalizeParams, ResampleFilter, TrimThreshold};

let params = NormalizeParams {
    canvas: CanvasSize::square(180),
    background: "#ffffff".parse::<Color>().unwrap(),
    threshold: TrimThreshold::tolerance(8),
    filter: ResampleFilter::Area,
    ..Default::default()
};
assert!(params.validate().is_ok());
```

In-memory
---------
```rust
use image::{Rgba, RgbaImage};
use iconfit::{normalize_image, NormalizeParams};

let mut src = RgbaImage::from_pixel(300, 200, Rgba([0, 0, 0, 255]));
for y in 80..130 {
    for x in 50..150 {
        src.put_pixel(x, y, Rgba([255, 255, 255, 255]));
    }
}
let icon = normalize_image(src, &NormalizeParams::default()).unwrap();
assert_eq!(icon.canvas.dimensions(), (512, 512));
assert_eq!(icon.fit.new_width, 512);
```

Error handling
--------------
All public functions return `iconfit::Result<T>`. Source, decode and dimension
errors abort the run before anything is written; encode and write errors are
recorded per destination in [`NormalizeReport`] so one bad path never blocks
the others.

```rust,no_run
use std::path::{Path, PathBuf};
use iconfit::{normalize_icon, Error, NormalizeParams};

match normalize_icon(Path::new("missing.png"), &[PathBuf::from("out.png")], &NormalizeParams::default()) {
    Ok(report) if report.is_partial_failure() => eprintln!("some outputs failed"),
    Ok(_) => {}
    Err(Error::SourceNotFound { path }) => eprintln!("no such file: {}", path.display()),
    Err(other) => eprintln!("error: {other}"),
}
```

Useful modules
--------------
- [`api`] — high-level entry points (single run, icon sets, directories).
- [`core`] — the trim / fit / compose stages and `NormalizeParams`.
- [`types`] — `Color`, `CanvasSize`, `ResampleFilter`, `OutputFormat`.
- [`io`] — decoding and the per-format writers.
- [`error`] — crate-level `Error` and `Result`.
"##]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::NormalizeParams;
pub use crate::core::processing::pipeline::NormalizedIcon;
pub use crate::core::processing::resize::ScaleResult;
pub use crate::core::processing::save::DestinationOutcome;
pub use crate::core::processing::trim::{BoundingBox, TrimThreshold};
pub use error::{Error, Result};
pub use types::{CanvasSize, Color, OutputFormat, ResampleFilter};

// Stages
pub use crate::core::processing::padding::{compose, paste_over};
pub use crate::core::processing::pipeline::normalize_image;
pub use crate::core::processing::resize::{compute_fit, resize_rgba_image};
pub use crate::core::processing::save::{save_canvas, save_to_destinations};
pub use crate::core::processing::trim::{find_content_bbox, trim, trim_with_bbox};
pub use io::reader::{decode_image, load_image};
pub use io::writers::write_report_json;

// High-level API re-exports
pub use api::{
    BatchReport, IconTarget, NormalizeReport, normalize_icon, normalize_icon_set,
    normalize_icon_to_buffer, process_directory_to_path,
};
