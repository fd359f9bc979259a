//! Render aspect ratio selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Aspect ratio requested from the image renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum AspectRatio {
    /// Square (1:1), used for detail and product shots
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// Wide (4:3), used for lifestyle shots
    #[serde(rename = "4:3")]
    Wide,
}

impl AspectRatio {
    pub const ALL: &'static [AspectRatio] = &[AspectRatio::Square, AspectRatio::Wide];

    /// Pick the ratio for a shot type.
    ///
    /// Any shot type containing "lifestyle" (case-insensitive) renders wide,
    /// everything else renders square.
    pub fn for_shot_type(shot_type: &str) -> Self {
        if shot_type.to_lowercase().contains("lifestyle") {
            AspectRatio::Wide
        } else {
            AspectRatio::Square
        }
    }

    /// Ratio string as sent to the renderer.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "4:3",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1:1" | "square" => Ok(AspectRatio::Square),
            "4:3" | "wide" => Ok(AspectRatio::Wide),
            _ => Err(AspectRatioParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown aspect ratio: {0}")]
pub struct AspectRatioParseError(String);
