//! The normalization stages, in pipeline order: `trim` (crop to content),
//! `resize` (fit computation and resampling), `padding` (centering on the
//! canvas), `pipeline` (the three chained in memory) and `save` (per-destination
//! encoding).
pub mod padding;
pub mod pipeline;
pub mod resize;
pub mod save;
pub mod trim;
