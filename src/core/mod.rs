//! Core processing building blocks: trimming, fitting, compositing and save
//! helpers, plus the `NormalizeParams` configuration. These are internal
//! primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
