//! Shared types and enums used across iconfit.
//! Includes `Color`, `CanvasSize`, `ResampleFilter` and `OutputFormat`.
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An RGBA8 color, used for the canvas background.
/// Serialized as its `#rrggbb[aa]` string form.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Same color with the alpha channel forced to full opacity
    pub fn to_opaque(self) -> Self {
        Self { a: u8::MAX, ..self }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(px: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self { r, g, b, a }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `r,g,b`, `r,g,b,a`, `black` and `white`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument {
            arg: "color",
            value: s.to_string(),
        };
        let trimmed = s.trim();

        match trimmed.to_ascii_lowercase().as_str() {
            "black" => return Ok(Color::BLACK),
            "white" => return Ok(Color::WHITE),
            _ => {}
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(invalid());
            }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return match hex.len() {
                3 => {
                    let mut channels = [0u8; 3];
                    for (i, c) in hex.chars().enumerate() {
                        let v = c.to_digit(16).ok_or_else(invalid)? as u8;
                        channels[i] = v * 17;
                    }
                    Ok(Color::rgb(channels[0], channels[1], channels[2]))
                }
                6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
                8 => Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
                _ => Err(invalid()),
            };
        }

        let parts = trimmed
            .split(',')
            .map(|p| p.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<u8>, Error>>()?;
        match parts.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
            _ => Err(invalid()),
        }
    }
}

/// Target canvas dimensions in pixels. Serialized as `WxH`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                what: "canvas",
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::square(512)
    }
}

impl std::fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl TryFrom<String> for CanvasSize {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CanvasSize> for String {
    fn from(size: CanvasSize) -> Self {
        size.to_string()
    }
}

impl FromStr for CanvasSize {
    type Err = Error;

    /// Accepts `512` (square) or `512x384`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument {
            arg: "size",
            value: s.to_string(),
        };
        let lower = s.trim().to_ascii_lowercase();
        let size = match lower.split_once('x') {
            Some((w, h)) => CanvasSize::new(
                w.trim().parse().map_err(|_| invalid())?,
                h.trim().parse().map_err(|_| invalid())?,
            ),
            None => CanvasSize::square(lower.parse().map_err(|_| invalid())?),
        };
        size.validate()?;
        Ok(size)
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, ValueEnum, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    #[default]
    Lanczos3,
    CatmullRom,
    Mitchell,
    Bilinear,
    /// Box convolution; averages every source pixel under the destination pixel
    Area,
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResampleFilter::Lanczos3 => "Lanczos3",
            ResampleFilter::CatmullRom => "CatmullRom",
            ResampleFilter::Mitchell => "Mitchell",
            ResampleFilter::Bilinear => "Bilinear",
            ResampleFilter::Area => "Area",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg, // Lossy, alpha dropped
    Tiff,
    WebP,
    Bmp,
    Ico,
}

impl OutputFormat {
    /// Infer the output format from a destination's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::from_extension(&ext)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            "webp" => Some(OutputFormat::WebP),
            "bmp" => Some(OutputFormat::Bmp),
            "ico" => Some(OutputFormat::Ico),
            _ => None,
        }
    }

    pub fn supports_alpha(&self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Jpeg => write!(f, "JPEG"),
            OutputFormat::Tiff => write!(f, "TIFF"),
            OutputFormat::WebP => write!(f, "WebP"),
            OutputFormat::Bmp => write!(f, "BMP"),
            OutputFormat::Ico => write!(f, "ICO"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#000".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!(
            "#10203040".parse::<Color>().unwrap(),
            Color::rgba(0x10, 0x20, 0x30, 0x40)
        );
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }

    #[test]
    fn parses_component_and_named_colors() {
        assert_eq!("1, 2, 3".parse::<Color>().unwrap(), Color::rgb(1, 2, 3));
        assert_eq!("1,2,3,4".parse::<Color>().unwrap(), Color::rgba(1, 2, 3, 4));
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
        assert!("1,2".parse::<Color>().is_err());
        assert!("256,0,0".parse::<Color>().is_err());
    }

    #[test]
    fn color_display_round_trips() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
        assert_eq!(Color::BLACK.to_string(), "#000000");
    }

    #[test]
    fn default_background_is_opaque_black() {
        assert_eq!(Color::default(), Color::rgba(0, 0, 0, 255));
        assert_eq!(Color::rgba(9, 9, 9, 0).to_opaque(), Color::rgb(9, 9, 9));
    }

    #[test]
    fn parses_canvas_sizes() {
        assert_eq!("512".parse::<CanvasSize>().unwrap(), CanvasSize::square(512));
        assert_eq!(
            "180X120".parse::<CanvasSize>().unwrap(),
            CanvasSize::new(180, 120)
        );
        assert!(matches!(
            "0x10".parse::<CanvasSize>(),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!("big".parse::<CanvasSize>().is_err());
    }

    #[test]
    fn infers_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("a/icon.PNG")),
            Some(OutputFormat::Png)
        );
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("icon.jpeg")),
            Some(OutputFormat::Jpeg)
        );
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("icon.tif")),
            Some(OutputFormat::Tiff)
        );
        assert_eq!(OutputFormat::from_path(&PathBuf::from("icon.svg")), None);
        assert_eq!(OutputFormat::from_path(&PathBuf::from("icon")), None);
    }
}
