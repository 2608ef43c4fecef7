//! Cursor-based flow layout
//!
//! Sections are stacked top to bottom on fixed-height pages. A section that
//! does not fit below the cursor opens a new page; a section taller than a
//! whole page is clamped and placed alone. Coordinates are measured from the
//! top edge of the page, in points.

use crate::config::LayoutConfig;
use crate::error::{Result, UsabilityError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where one section landed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Index of the section in placement order
    pub section: usize,

    /// Zero-based page index
    pub page: usize,

    /// Offset of the section's top edge from the page's top edge
    pub y: f32,

    pub height: f32,

    /// Height was reduced to the usable page height
    pub clamped: bool,
}

impl Placement {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether two placements share vertical space on the same page
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.page == other.page && self.y < other.bottom() && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    Empty,
    LayingOut,
    Finalized,
}

/// Finished layout
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub placements: Vec<Placement>,
    pub page_count: usize,
}

/// Single-use layout engine for one document
#[derive(Debug)]
pub struct FlowLayout {
    top: f32,
    bottom_limit: f32,
    usable_height: f32,
    gap: f32,
    cursor: f32,
    page: usize,
    state: LayoutState,
    placements: Vec<Placement>,
}

impl FlowLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            top: config.top_margin,
            bottom_limit: config.page_height - config.bottom_margin,
            usable_height: config.usable_height().max(1.0),
            gap: config.gap.max(0.0),
            cursor: config.top_margin,
            page: 0,
            state: LayoutState::Empty,
            placements: Vec::new(),
        }
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Place the next section of the given height
    pub fn place(&mut self, height: f32) -> Result<Placement> {
        if self.state == LayoutState::Finalized {
            return Err(UsabilityError::Layout(
                "cannot place a section after the layout was finalized".to_string(),
            ));
        }
        self.state = LayoutState::LayingOut;

        // NaN and negative heights collapse to zero
        let requested = height.max(0.0);
        let clamped = requested > self.usable_height;
        let height = requested.min(self.usable_height);

        let page_has_content = self.cursor > self.top;
        if page_has_content && self.cursor + height > self.bottom_limit {
            self.page += 1;
            self.cursor = self.top;
            debug!(
                "Page break before section {} (page {})",
                self.placements.len(),
                self.page + 1
            );
        }

        let placement = Placement {
            section: self.placements.len(),
            page: self.page,
            y: self.cursor,
            height,
            clamped,
        };
        if clamped {
            debug!(
                "Section {} clamped from {:.1} to {:.1}",
                placement.section, requested, height
            );
        }

        self.cursor += height + self.gap;
        self.placements.push(placement);
        Ok(placement)
    }

    /// Close the layout; a document always has at least one page
    pub fn finalize(&mut self) -> Result<Pagination> {
        if self.state == LayoutState::Finalized {
            return Err(UsabilityError::Layout(
                "layout was already finalized".to_string(),
            ));
        }
        self.state = LayoutState::Finalized;

        Ok(Pagination {
            placements: std::mem::take(&mut self.placements),
            page_count: self.page + 1,
        })
    }
}
