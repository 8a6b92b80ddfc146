use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::processing::trim::TrimThreshold;
use crate::error::{Error, Result};
use crate::types::{CanvasSize, Color, ResampleFilter};

/// Normalization parameters suitable for config files and CLI presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeParams {
    /// Target canvas; every output has exactly these dimensions
    pub canvas: CanvasSize,
    /// Fill color for the canvas; always applied fully opaque
    pub background: Color,
    /// Background-difference threshold used by the trimmer
    pub threshold: TrimThreshold,
    pub filter: ResampleFilter,
    /// If false, the whole source is fitted without cropping
    pub trim: bool,
    /// 1..=100, only used for JPEG destinations
    pub jpeg_quality: u8,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            background: Color::BLACK,
            threshold: TrimThreshold::default(),
            filter: ResampleFilter::Lanczos3,
            trim: true,
            jpeg_quality: 95,
        }
    }
}

impl NormalizeParams {
    /// Load parameters from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: NormalizeParams = serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        self.threshold.validate()?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::InvalidArgument {
                arg: "jpeg_quality",
                value: self.jpeg_quality.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let p = NormalizeParams::default();
        assert_eq!(p.canvas, CanvasSize::square(512));
        assert_eq!(p.background, Color::rgba(0, 0, 0, 255));
        assert_eq!(p.filter, ResampleFilter::Lanczos3);
        assert!(p.trim);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: NormalizeParams =
            serde_json::from_str(r##"{"canvas": "180", "background": "#ffffff"}"##).unwrap();
        assert_eq!(p.canvas, CanvasSize::square(180));
        assert_eq!(p.background, Color::WHITE);
        assert_eq!(p.threshold, TrimThreshold::default());
        assert_eq!(p.jpeg_quality, 95);
    }

    #[test]
    fn json_round_trip() {
        let p = NormalizeParams {
            canvas: CanvasSize::new(64, 32),
            filter: ResampleFilter::Area,
            trim: false,
            ..Default::default()
        };
        let json = p.to_json_string().unwrap();
        let back: NormalizeParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(serde_json::from_str::<NormalizeParams>(r#"{"canvas": "0x5"}"#).is_err());
        let p = NormalizeParams {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(Error::InvalidArgument { arg: "jpeg_quality", .. })
        ));
    }
}
