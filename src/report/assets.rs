//! Chart raster decoding

use crate::error::{Result, UsabilityError};
use image::load_from_memory;
use tracing::warn;

/// Decoded chart pixels, 8-bit RGB, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// What ends up in a chart section
#[derive(Debug, Clone, PartialEq)]
pub enum ChartAsset {
    Image(RasterImage),

    /// Missing or malformed image; the caption says which
    Placeholder { caption: String },
}

impl ChartAsset {
    /// Resolve renderer output for the chart titled `title`
    pub fn resolve(title: &str, bytes: Option<Vec<u8>>) -> Self {
        let Some(bytes) = bytes else {
            return ChartAsset::Placeholder {
                caption: format!("{}: chart not available", title),
            };
        };

        match decode(&bytes) {
            Ok(image) => ChartAsset::Image(image),
            Err(e) => {
                warn!("Chart '{}' replaced by placeholder: {}", title, e);
                ChartAsset::Placeholder {
                    caption: format!("{}: chart could not be rendered", title),
                }
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartAsset::Placeholder { .. })
    }
}

/// Decode PNG/JPEG bytes into RGB pixels
pub fn decode(bytes: &[u8]) -> Result<RasterImage> {
    if bytes.is_empty() {
        return Err(UsabilityError::Asset("empty image data".to_string()));
    }

    let image = load_from_memory(bytes)
        .map_err(|e| UsabilityError::Asset(format!("failed to decode image: {}", e)))?;
    let rgb = image.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(UsabilityError::Asset("image has no pixels".to_string()));
    }

    Ok(RasterImage {
        width: rgb.width(),
        height: rgb.height(),
        rgb: rgb.into_raw(),
    })
}
