//! Format-specific encoders. Each writer encodes an RGBA8 canvas into an
//! already-opened sink; creating and cleaning up files is left to
//! `core::processing::save`.
pub mod image_codec;
pub mod jpeg;
pub mod report;
pub mod tiff;

pub use report::{ReportRecord, write_report_json};
