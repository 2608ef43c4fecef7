//! Chart slots and renderers
//!
//! The compositor describes each chart as a [`ChartSlot`] (data plus the
//! space reserved for it) and asks a [`ChartRenderer`] for raster bytes. A
//! renderer returning `None` or undecodable bytes gets a placeholder.

use crate::types::{Category, Sentiment};
use image::{ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use tracing::warn;

pub const SENTIMENT_CHART: &str = "sentiment";
pub const CATEGORY_CHART: &str = "category";
pub const SCORE_CHART: &str = "score_distribution";

/// One bar or slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Data and reserved space for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlot {
    pub key: String,
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub series: Vec<ChartPoint>,
}

impl ChartSlot {
    pub fn sentiment(
        distribution: &BTreeMap<Sentiment, usize>,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            key: SENTIMENT_CHART.to_string(),
            title: "Sentiment distribution".to_string(),
            width,
            height,
            series: distribution
                .iter()
                .map(|(sentiment, count)| ChartPoint {
                    label: sentiment.to_string(),
                    value: *count as f64,
                })
                .collect(),
        }
    }

    pub fn category(distribution: &BTreeMap<Category, usize>, width: f32, height: f32) -> Self {
        Self {
            key: CATEGORY_CHART.to_string(),
            title: "Feedback categories".to_string(),
            width,
            height,
            series: distribution
                .iter()
                .map(|(category, count)| ChartPoint {
                    label: category.to_string(),
                    value: *count as f64,
                })
                .collect(),
        }
    }

    /// Histogram buckets labeled by their score range
    pub fn score_distribution(histogram: &[usize], width: f32, height: f32) -> Self {
        Self {
            key: SCORE_CHART.to_string(),
            title: "Score distribution".to_string(),
            width,
            height,
            series: histogram
                .iter()
                .enumerate()
                .map(|(bucket, count)| ChartPoint {
                    label: format!("{}-{}", bucket * 10, bucket * 10 + 10),
                    value: *count as f64,
                })
                .collect(),
        }
    }
}

/// Supplies raster bytes (PNG, JPEG, ...) for a chart slot
pub trait ChartRenderer: Send + Sync {
    fn render(&self, slot: &ChartSlot) -> Option<Vec<u8>>;
}

/// Pre-rendered images looked up by slot key
#[derive(Debug, Clone, Default)]
pub struct StaticCharts {
    images: HashMap<String, Vec<u8>>,
}

impl StaticCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, key: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.images.insert(key.into(), bytes);
        self
    }
}

impl ChartRenderer for StaticCharts {
    fn render(&self, slot: &ChartSlot) -> Option<Vec<u8>> {
        self.images.get(&slot.key).cloned()
    }
}

/// Plain bar charts drawn directly into a PNG
#[derive(Debug, Clone)]
pub struct BarChartRenderer {
    /// Pixels per point of reserved space
    pub scale: f32,
}

impl Default for BarChartRenderer {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([90, 90, 90]);
const PALETTE: [Rgb<u8>; 5] = [
    Rgb([46, 134, 193]),
    Rgb([40, 180, 99]),
    Rgb([241, 196, 15]),
    Rgb([231, 76, 60]),
    Rgb([142, 68, 173]),
];

impl BarChartRenderer {
    fn draw(&self, slot: &ChartSlot) -> RgbImage {
        let width = ((slot.width * self.scale).round() as u32).max(16);
        let height = ((slot.height * self.scale).round() as u32).max(16);
        let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

        let margin = (width.min(height) / 10).max(2);
        let baseline = height - margin;
        for x in margin..width - margin {
            canvas.put_pixel(x, baseline, AXIS);
        }

        let max = slot
            .series
            .iter()
            .map(|point| point.value)
            .fold(0.0f64, f64::max);
        if slot.series.is_empty() || max <= 0.0 {
            return canvas;
        }

        let span = width - 2 * margin;
        let slot_width = span / slot.series.len() as u32;
        let bar_width = (slot_width * 2 / 3).max(1);
        let max_bar = f64::from(baseline - margin);

        for (index, point) in slot.series.iter().enumerate() {
            let bar_height = ((point.value.max(0.0) / max) * max_bar).round() as u32;
            let left = margin + index as u32 * slot_width + slot_width.saturating_sub(bar_width) / 2;
            let color = PALETTE[index % PALETTE.len()];
            for x in left..(left + bar_width).min(width - margin) {
                for y in baseline.saturating_sub(bar_height)..baseline {
                    canvas.put_pixel(x, y, color);
                }
            }
        }

        canvas
    }
}

impl ChartRenderer for BarChartRenderer {
    fn render(&self, slot: &ChartSlot) -> Option<Vec<u8>> {
        let canvas = self.draw(slot);
        let mut png = Vec::new();
        if let Err(e) = canvas.write_to(&mut Cursor::new(&mut png), ImageFormat::Png) {
            warn!("Failed to encode chart {} as PNG: {}", slot.key, e);
            return None;
        }
        Some(png)
    }
}
