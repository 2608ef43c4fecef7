//! Paginated report documents
//!
//! - [`layout`]: cursor-based flow layout with the non-overlap guarantee
//! - [`charts`]: chart slots and the renderer seam
//! - [`assets`]: chart image decoding and placeholder substitution
//! - [`pdf`]: the PDF writer
//! - [`compositor`]: section building and rendering

pub mod assets;
pub mod charts;
pub mod compositor;
pub mod layout;
pub mod pdf;

pub use assets::{ChartAsset, RasterImage};
pub use charts::{BarChartRenderer, ChartPoint, ChartRenderer, ChartSlot, StaticCharts};
pub use compositor::{RenderedDocument, ReportCompositor, Section, SectionBody, SectionKind, SectionPlacement};
pub use layout::{FlowLayout, LayoutState, Pagination, Placement};
