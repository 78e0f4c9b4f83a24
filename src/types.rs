//! Shared types and enums used across svgpng.
//! Includes `OutputSize`, `FitMode` and the `Rgba` background color.
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How the output pixel dimensions are chosen.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputSize {
    /// Exactly `width` x `height` pixels.
    Exact { width: u32, height: u32 },
    /// Fixed width, height follows the document aspect ratio.
    Width(u32),
    /// Fixed height, width follows the document aspect ratio.
    Height(u32),
    /// Document size multiplied by the conversion scale.
    Original,
}

impl OutputSize {
    pub const fn square(side: u32) -> Self {
        OutputSize::Exact {
            width: side,
            height: side,
        }
    }
}

impl Default for OutputSize {
    fn default() -> Self {
        OutputSize::square(1024)
    }
}

fn parse_dimension(value: &str, full: &str) -> Result<u32, Error> {
    let parsed = value
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::InvalidArgument {
            arg: "size",
            value: full.to_string(),
        })?;
    if parsed == 0 {
        return Err(Error::InvalidArgument {
            arg: "size",
            value: full.to_string(),
        });
    }
    Ok(parsed)
}

impl FromStr for OutputSize {
    type Err = Error;

    /// Accepts `original`, `N`, `WxH`, `Wx` and `xH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("original") {
            return Ok(OutputSize::Original);
        }

        match trimmed.split_once(['x', 'X']) {
            None => Ok(OutputSize::square(parse_dimension(trimmed, s)?)),
            Some((w, h)) if h.trim().is_empty() => Ok(OutputSize::Width(parse_dimension(w, s)?)),
            Some((w, h)) if w.trim().is_empty() => Ok(OutputSize::Height(parse_dimension(h, s)?)),
            Some((w, h)) => Ok(OutputSize::Exact {
                width: parse_dimension(w, s)?,
                height: parse_dimension(h, s)?,
            }),
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSize::Exact { width, height } => write!(f, "{}x{}", width, height),
            OutputSize::Width(w) => write!(f, "{}x", w),
            OutputSize::Height(h) => write!(f, "x{}", h),
            OutputSize::Original => write!(f, "original"),
        }
    }
}

impl TryFrom<String> for OutputSize {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputSize> for String {
    fn from(value: OutputSize) -> Self {
        value.to_string()
    }
}

/// Placement of the drawing inside an exact canvas whose aspect ratio differs
/// from the document's.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Uniform scale, centered, whole drawing visible.
    #[default]
    Contain,
    /// Uniform scale, centered, canvas fully covered and overflow clipped.
    Cover,
    /// Independent horizontal and vertical scale.
    Stretch,
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitMode::Contain => write!(f, "contain"),
            FitMode::Cover => write!(f, "cover"),
            FitMode::Stretch => write!(f, "stretch"),
        }
    }
}

/// 8-bit straight-alpha color.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for Rgba {
    type Err = Error;

    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and a few keywords.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument {
            arg: "background",
            value: s.to_string(),
        };
        let trimmed = s.trim();

        match trimmed.to_ascii_lowercase().as_str() {
            "transparent" | "none" => return Ok(Rgba::TRANSPARENT),
            "white" => return Ok(Rgba::WHITE),
            "black" => return Ok(Rgba::BLACK),
            _ => {}
        }

        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channels: Vec<u8> = match hex.len() {
            3 | 4 => hex
                .chars()
                .map(|c| c.to_digit(16).map(|v| v as u8 * 17))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?,
            6 | 8 => (0..hex.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
                .collect::<Option<_>>()
                .ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        let alpha = channels.get(3).copied().unwrap_or(255);
        Ok(Rgba::new(channels[0], channels[1], channels[2], alpha))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}
