//! Report composition
//!
//! Builds the ordered section list for an [`AnalysisReport`], runs it through
//! [`FlowLayout`], and draws every placed section with [`PdfWriter`].

use super::assets::{ChartAsset, RasterImage};
use super::charts::{ChartRenderer, ChartSlot};
use super::layout::{FlowLayout, Placement};
use super::pdf::{approx_text_width, Font, PdfWriter};
use crate::analysis::AnalysisReport;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::scoring::{AggregateOutcome, HISTOGRAM_BUCKETS};
use crate::types::Sentiment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;

/// Longest comment excerpt shown in the detail table
const COMMENT_EXCERPT: usize = 30;

/// Detail table column offsets as fractions of the content width
const DETAIL_COLUMNS: [f32; 5] = [0.0, 0.2, 0.32, 0.48, 0.68];

/// Space kept free before the next table column
const CELL_GAP: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Chart,
    ChartPlaceholder,
    Topics,
    Narrative,
    Recommendations,
    Detail,
}

/// One line of text, optionally split into table cells
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub cells: Vec<String>,
    pub size: f32,
    pub font: Font,
}

impl TextLine {
    pub fn plain(text: impl Into<String>, size: f32) -> Self {
        Self {
            cells: vec![text.into()],
            size,
            font: Font::Regular,
        }
    }

    pub fn bold(text: impl Into<String>, size: f32) -> Self {
        Self {
            font: Font::Bold,
            ..Self::plain(text, size)
        }
    }

    pub fn row(cells: Vec<String>, font: Font) -> Self {
        Self {
            cells,
            size: TABLE_SIZE,
            font,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    /// Lines drawn top to bottom; `columns` are x offsets as fractions of the content width
    Text {
        heading: Option<String>,
        columns: Vec<f32>,
        lines: Vec<TextLine>,
    },
    Chart {
        title: String,
        image: RasterImage,
    },
    Placeholder {
        caption: String,
    },
}

/// A block with a required height
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub height: f32,
    pub body: SectionBody,
}

/// Where a section of a given kind landed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPlacement {
    pub kind: SectionKind,

    #[serde(flatten)]
    pub placement: Placement,
}

/// Finished document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub placements: Vec<SectionPlacement>,
}

impl RenderedDocument {
    /// Whether any two sections share vertical space on a page
    pub fn has_overlaps(&self) -> bool {
        self.placements.iter().enumerate().any(|(i, a)| {
            self.placements[i + 1..]
                .iter()
                .any(|b| a.placement.overlaps(&b.placement))
        })
    }

    pub fn count(&self, kind: SectionKind) -> usize {
        self.placements.iter().filter(|p| p.kind == kind).count()
    }
}

/// Lays out and renders report documents
pub struct ReportCompositor<'a> {
    layout: &'a LayoutConfig,
    charts: &'a dyn ChartRenderer,
}

impl<'a> ReportCompositor<'a> {
    pub fn new(layout: &'a LayoutConfig, charts: &'a dyn ChartRenderer) -> Self {
        Self { layout, charts }
    }

    /// Build, lay out and render the full report
    pub fn compose(
        &self,
        report: &AnalysisReport,
        generated_at: DateTime<Utc>,
    ) -> Result<RenderedDocument> {
        let sections = self.sections(report, generated_at);
        let title = format!("Usability report {}", report.survey_id);
        self.render(&title, sections, generated_at)
    }

    /// Ordered sections for a report
    pub fn sections(&self, report: &AnalysisReport, generated_at: DateTime<Utc>) -> Vec<Section> {
        let mut sections = vec![self.header(report, generated_at)];

        let width = self.layout.content_width();
        let height = self.layout.chart_height;
        let histogram = match &report.aggregate {
            AggregateOutcome::Scored(aggregate) => aggregate.histogram,
            AggregateOutcome::InsufficientData => [0; HISTOGRAM_BUCKETS],
        };
        for slot in [
            ChartSlot::sentiment(&report.sentiment_distribution, width, height),
            ChartSlot::category(&report.category_distribution, width, height),
            ChartSlot::score_distribution(&histogram, width, height),
        ] {
            sections.push(self.chart(&slot));
        }

        let topics: Vec<TextLine> = if report.top_terms.is_empty() {
            vec![TextLine::plain("No comment terms to report.", BODY_SIZE)]
        } else {
            report
                .top_terms
                .iter()
                .map(|term| {
                    TextLine::plain(
                        format!(
                            "{}  ({} mentions, {:.1}%)",
                            term.term,
                            term.count,
                            term.frequency * 100.0
                        ),
                        BODY_SIZE,
                    )
                })
                .collect()
        };
        sections.extend(self.text_sections(SectionKind::Topics, "Frequent topics", vec![0.0], topics));

        let summary = narrative(report)
            .iter()
            .flat_map(|paragraph| self.wrap(paragraph, BODY_SIZE))
            .map(|line| TextLine::plain(line, BODY_SIZE))
            .collect();
        sections.extend(self.text_sections(SectionKind::Narrative, "Summary", vec![0.0], summary));

        let recommendations = report
            .recommendations
            .iter()
            .flat_map(|r| self.wrap(&format!("[{}] {}", r.priority, r.message), BODY_SIZE))
            .map(|line| TextLine::plain(line, BODY_SIZE))
            .collect();
        sections.extend(self.text_sections(
            SectionKind::Recommendations,
            "Recommendations",
            vec![0.0],
            recommendations,
        ));

        let header = ["Respondent", "Score", "Sentiment", "Category", "Comment"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let mut rows = vec![self.table_row(header, Font::Bold)];
        rows.extend(report.rows.iter().map(|row| {
            self.table_row(
                vec![
                    row.respondent_id.clone(),
                    format!("{:.1}", row.score),
                    row.sentiment.to_string(),
                    row.category.to_string(),
                    excerpt(row.comment.as_deref().unwrap_or("Sin comentario")),
                ],
                Font::Regular,
            )
        }));
        sections.extend(self.text_sections(
            SectionKind::Detail,
            "Response detail",
            DETAIL_COLUMNS.to_vec(),
            rows,
        ));

        sections
    }

    /// Detail table row with every cell cut to its column
    fn table_row(&self, cells: Vec<String>, font: Font) -> TextLine {
        let width = self.layout.content_width();
        let cells = cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let start = DETAIL_COLUMNS[index.min(DETAIL_COLUMNS.len() - 1)];
                let available = match DETAIL_COLUMNS.get(index + 1) {
                    Some(next) => (next - start) * width - CELL_GAP,
                    None => (1.0 - start) * width,
                };
                fit_cell(cell, available, TABLE_SIZE)
            })
            .collect();
        TextLine::row(cells, font)
    }

    fn header(&self, report: &AnalysisReport, generated_at: DateTime<Utc>) -> Section {
        let score_line = match &report.aggregate {
            AggregateOutcome::Scored(aggregate) => format!(
                "Mean SUS score: {:.1}  ({})",
                aggregate.mean, aggregate.band
            ),
            AggregateOutcome::InsufficientData => "Mean SUS score: insufficient data".to_string(),
        };
        let lines = vec![
            TextLine::bold(format!("Usability report: {}", report.survey_id), TITLE_SIZE),
            TextLine::plain(
                format!("Generated {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
                BODY_SIZE,
            ),
            TextLine::bold(score_line, HEADING_SIZE),
            TextLine::plain(
                format!(
                    "Responses: {} valid of {} ({} excluded)",
                    report.valid_responses(),
                    report.total_records,
                    report.exclusions.len()
                ),
                BODY_SIZE,
            ),
            TextLine::plain(
                format!("Comment classification: {}", report.classification.strategy),
                BODY_SIZE,
            ),
        ];
        let height = lines.iter().map(|line| self.line_height(line)).sum();
        Section {
            kind: SectionKind::Header,
            height,
            body: SectionBody::Text {
                heading: None,
                columns: vec![0.0],
                lines,
            },
        }
    }

    fn chart(&self, slot: &ChartSlot) -> Section {
        match ChartAsset::resolve(&slot.title, self.charts.render(slot)) {
            ChartAsset::Image(image) => Section {
                kind: SectionKind::Chart,
                height: self.heading_height() + slot.height,
                body: SectionBody::Chart {
                    title: slot.title.clone(),
                    image,
                },
            },
            ChartAsset::Placeholder { caption } => Section {
                kind: SectionKind::ChartPlaceholder,
                height: self.layout.placeholder_height,
                body: SectionBody::Placeholder { caption },
            },
        }
    }

    /// Split lines into sections that each fit one page
    fn text_sections(
        &self,
        kind: SectionKind,
        heading: &str,
        columns: Vec<f32>,
        lines: Vec<TextLine>,
    ) -> Vec<Section> {
        let line_height = lines
            .iter()
            .map(|line| self.line_height(line))
            .fold(self.layout.line_height, f32::max);
        let available = self.layout.usable_height() - self.heading_height();
        let per_chunk = ((available / line_height).floor() as usize).max(1);

        let mut sections = Vec::new();
        for (index, chunk) in lines.chunks(per_chunk).enumerate() {
            let heading = if index == 0 {
                heading.to_string()
            } else {
                format!("{} (continued)", heading)
            };
            sections.push(Section {
                kind,
                height: self.heading_height() + chunk.len() as f32 * line_height,
                body: SectionBody::Text {
                    heading: Some(heading),
                    columns: columns.clone(),
                    lines: chunk.to_vec(),
                },
            });
        }
        sections
    }

    fn heading_height(&self) -> f32 {
        (HEADING_SIZE * 1.6).max(self.layout.line_height)
    }

    fn line_height(&self, line: &TextLine) -> f32 {
        (line.size * 1.4).max(self.layout.line_height)
    }

    /// Greedy word wrap to the content width
    fn wrap(&self, text: &str, size: f32) -> Vec<String> {
        let width = self.layout.content_width();
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if approx_text_width(&candidate, size) <= width || current.is_empty() {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Lay out and draw a prepared section list
    pub fn render(
        &self,
        title: &str,
        sections: Vec<Section>,
        generated_at: DateTime<Utc>,
    ) -> Result<RenderedDocument> {
        let mut layout = FlowLayout::new(self.layout);
        for section in &sections {
            layout.place(section.height)?;
        }
        let pagination = layout.finalize()?;
        debug!(
            "Laid out {} sections on {} pages",
            sections.len(),
            pagination.page_count
        );

        let mut pdf = PdfWriter::new(
            self.layout.page_width,
            self.layout.page_height,
            pagination.page_count,
        );
        let mut placements = Vec::with_capacity(sections.len());
        for (section, placement) in sections.into_iter().zip(&pagination.placements) {
            placements.push(SectionPlacement {
                kind: section.kind,
                placement: *placement,
            });
            self.draw(&mut pdf, section.body, placement)?;
        }

        let bytes = pdf.finish(title, generated_at)?;
        Ok(RenderedDocument {
            bytes,
            page_count: pagination.page_count,
            placements,
        })
    }

    fn draw(&self, pdf: &mut PdfWriter, body: SectionBody, placement: &Placement) -> Result<()> {
        let x = self.layout.side_margin;
        let width = self.layout.content_width();
        let page = placement.page;
        let bottom = placement.bottom();

        match body {
            SectionBody::Text {
                heading,
                columns,
                lines,
            } => {
                let mut top = placement.y;
                if let Some(heading) = heading {
                    pdf.text(page, x, top, HEADING_SIZE, Font::Bold, &heading)?;
                    top += self.heading_height();
                }
                for line in lines {
                    let height = self.line_height(&line);
                    // clamped sections drop what does not fit
                    if top + height > bottom + 0.01 {
                        break;
                    }
                    for (cell, offset) in line.cells.iter().zip(&columns) {
                        pdf.text(page, x + offset * width, top, line.size, line.font, cell)?;
                    }
                    top += height;
                }
            }
            SectionBody::Chart { title, image } => {
                pdf.text(page, x, placement.y, HEADING_SIZE, Font::Bold, &title)?;
                let top = placement.y + self.heading_height();
                let box_height = (bottom - top).max(0.0);
                let scale = (width / image.width as f32).min(box_height / image.height as f32);
                let (w, h) = (image.width as f32 * scale, image.height as f32 * scale);
                pdf.image(page, image, x + (width - w) / 2.0, top, w, h)?;
            }
            SectionBody::Placeholder { caption } => {
                pdf.fill_rect(page, x, placement.y, width, placement.height, 0.92)?;
                pdf.stroke_rect(page, x, placement.y, width, placement.height, 0.6)?;
                let middle = placement.y + (placement.height - BODY_SIZE) / 2.0;
                pdf.text(page, x + 12.0, middle, BODY_SIZE, Font::Regular, &caption)?;
            }
        }
        Ok(())
    }
}

fn excerpt(comment: &str) -> String {
    let trimmed = comment.trim();
    if trimmed.chars().count() <= COMMENT_EXCERPT {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(COMMENT_EXCERPT - 3).collect();
        format!("{}...", cut.trim_end())
    }
}

/// Cut `text` with an ellipsis so it fits `max_width` at `size`
fn fit_cell(text: &str, max_width: f32, size: f32) -> String {
    if approx_text_width(text, size) <= max_width {
        return text.to_string();
    }

    let ellipsis = approx_text_width("...", size);
    let mut fitted = String::new();
    for c in text.chars() {
        fitted.push(c);
        if approx_text_width(&fitted, size) + ellipsis > max_width {
            fitted.pop();
            break;
        }
    }
    format!("{}...", fitted.trim_end())
}

/// Plain-language summary paragraphs
pub fn narrative(report: &AnalysisReport) -> Vec<String> {
    let mut paragraphs = Vec::new();

    match &report.aggregate {
        AggregateOutcome::Scored(aggregate) => paragraphs.push(format!(
            "The mean SUS score across {} valid responses is {:.1}, rated {}. Individual scores range from {:.1} to {:.1}.",
            aggregate.respondents, aggregate.mean, aggregate.band, aggregate.min, aggregate.max
        )),
        AggregateOutcome::InsufficientData => paragraphs.push(
            "No structurally valid responses were received, so no usability score could be computed."
                .to_string(),
        ),
    }

    if !report.exclusions.is_empty() {
        paragraphs.push(format!(
            "{} of {} responses were excluded because of missing or out-of-range answers.",
            report.exclusions.len(),
            report.total_records
        ));
    }
    if report.imputed_answers > 0 {
        paragraphs.push(format!(
            "{} missing answers were filled with the neutral midpoint.",
            report.imputed_answers
        ));
    }

    let summary = &report.classification;
    if summary.commented > 0 {
        let count = |s: Sentiment| report.sentiment_distribution.get(&s).copied().unwrap_or(0);
        paragraphs.push(format!(
            "{} respondents left a comment. Positive: {}. Neutral: {}. Negative: {}.",
            summary.commented,
            count(Sentiment::Positive),
            count(Sentiment::Neutral),
            count(Sentiment::Negative)
        ));
    }
    if let Some((category, count)) = report.dominant_category() {
        paragraphs.push(format!(
            "The most frequent feedback category is {} ({} comments).",
            category, count
        ));
    }
    if summary.not_configured > 0 {
        paragraphs.push(
            "Remote comment classification is not configured, so qualitative labels are unavailable."
                .to_string(),
        );
    }
    if summary.failed > 0 {
        paragraphs.push(format!(
            "{} comments could not be classified by the remote service.",
            summary.failed
        ));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::ClassificationSummary;
    use crate::report::charts::{StaticCharts, CATEGORY_CHART, SENTIMENT_CHART};
    use crate::scoring::SusScorer;
    use crate::survey::ContentHash;
    use crate::types::{Category, Priority, Recommendation, SurveyId};
    use crate::analysis::RespondentRow;
    use chrono::TimeZone;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::collections::BTreeMap;
    use std::io::Cursor;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    fn png() -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbImage::from_pixel(40, 20, Rgb([200, 50, 50]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn report(respondents: usize) -> AnalysisReport {
        let rows: Vec<RespondentRow> = (0..respondents)
            .map(|i| RespondentRow {
                respondent_id: format!("r{}", i + 1),
                respondent: None,
                score: 72.5,
                comment: Some("Los graficos y colores son didacticos".to_string()),
                sentiment: Sentiment::Positive,
                category: Category::Visualization,
            })
            .collect();
        let mut sentiments = BTreeMap::new();
        sentiments.insert(Sentiment::Positive, respondents);
        let mut categories = BTreeMap::new();
        categories.insert(Category::Visualization, respondents);

        AnalysisReport {
            survey_id: SurveyId::new("DASHBOARD_GENERAL"),
            content_hash: ContentHash("abc".to_string()),
            aggregate: SusScorer::aggregate(&vec![72.5; respondents]),
            sentiment_distribution: sentiments,
            category_distribution: categories,
            recommendations: vec![Recommendation {
                priority: Priority::Low,
                rule: "stable".to_string(),
                message: "Usability is stable: continue monitoring.".to_string(),
            }],
            total_records: respondents,
            exclusions: Vec::new(),
            imputed_answers: 0,
            top_terms: Vec::new(),
            classification: ClassificationSummary {
                strategy: "heuristic".to_string(),
                commented: respondents,
                ..Default::default()
            },
            rows,
        }
    }

    fn assert_fits_pages(document: &RenderedDocument, layout: &LayoutConfig) {
        assert!(!document.has_overlaps());
        for placed in &document.placements {
            assert!(placed.placement.page < document.page_count);
            assert!(placed.placement.bottom() <= layout.page_height - layout.bottom_margin + 1e-3);
        }
    }

    #[test]
    fn test_missing_charts_become_placeholders() {
        let layout = LayoutConfig::default();
        let charts = StaticCharts::new();
        let document = ReportCompositor::new(&layout, &charts)
            .compose(&report(3), generated_at())
            .unwrap();

        assert_eq!(document.count(SectionKind::ChartPlaceholder), 3);
        assert_eq!(document.count(SectionKind::Chart), 0);
        assert_fits_pages(&document, &layout);
    }

    #[test]
    fn test_decodable_charts_are_embedded() {
        let layout = LayoutConfig::default();
        let charts = StaticCharts::new()
            .with_image(SENTIMENT_CHART, png())
            .with_image(CATEGORY_CHART, b"garbage".to_vec());
        let document = ReportCompositor::new(&layout, &charts)
            .compose(&report(3), generated_at())
            .unwrap();

        assert_eq!(document.count(SectionKind::Chart), 1);
        assert_eq!(document.count(SectionKind::ChartPlaceholder), 2);
        assert!(document.page_count > 1);
        assert_fits_pages(&document, &layout);
    }

    #[test]
    fn test_long_detail_table_is_split_across_pages() {
        let layout = LayoutConfig::default();
        let charts = StaticCharts::new();
        let document = ReportCompositor::new(&layout, &charts)
            .compose(&report(200), generated_at())
            .unwrap();

        assert!(document.count(SectionKind::Detail) > 1);
        assert!(document.page_count >= 5);
        assert!(document.placements.iter().all(|p| !p.placement.clamped));
        assert_fits_pages(&document, &layout);
    }

    #[test]
    fn test_same_input_same_bytes() {
        let layout = LayoutConfig::default();
        let charts = StaticCharts::new().with_image(SENTIMENT_CHART, png());
        let compositor = ReportCompositor::new(&layout, &charts);
        let first = compositor.compose(&report(5), generated_at()).unwrap();
        let second = compositor.compose(&report(5), generated_at()).unwrap();
        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.placements, second.placements);
    }

    #[test]
    fn test_oversize_section_is_clamped_not_overlapping() {
        let layout = LayoutConfig::default();
        let charts = StaticCharts::new();
        let compositor = ReportCompositor::new(&layout, &charts);
        let tall = Section {
            kind: SectionKind::Narrative,
            height: layout.page_height * 3.0,
            body: SectionBody::Placeholder {
                caption: "tall".to_string(),
            },
        };
        let small = Section {
            kind: SectionKind::Topics,
            height: 40.0,
            body: SectionBody::Placeholder {
                caption: "small".to_string(),
            },
        };
        let document = compositor
            .render("t", vec![small.clone(), tall, small], generated_at())
            .unwrap();

        assert_eq!(document.page_count, 3);
        assert!(document.placements[1].placement.clamped);
        assert_fits_pages(&document, &layout);
    }

    #[test]
    fn test_narrative_mentions_score_and_exclusions() {
        let mut data = report(2);
        data.total_records = 3;
        data.exclusions.push(crate::survey::Exclusion {
            respondent_id: "r3".to_string(),
            reason: crate::error::ValidationError::MissingAnswer { position: 2 },
        });
        let text = narrative(&data).join(" ");
        assert!(text.contains("72.5"));
        assert!(text.contains("1 of 3 responses were excluded"));
        assert!(text.contains("Visualization"));
    }

    #[test]
    fn test_excerpt_truncates_long_comments() {
        assert_eq!(excerpt("  corto "), "corto");
        let long = "a".repeat(80);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), COMMENT_EXCERPT);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_fit_cell() {
        assert_eq!(fit_cell("r12", 100.0, TABLE_SIZE), "r12");
        let long = "respondent-".repeat(10);
        let fitted = fit_cell(&long, 100.0, TABLE_SIZE);
        assert!(fitted.ends_with("..."));
        assert!(approx_text_width(&fitted, TABLE_SIZE) <= 100.0);
    }

    #[test]
    fn test_detail_cells_fit_their_columns() {
        let layout = LayoutConfig::default();
        let charts = StaticCharts::new();
        let compositor = ReportCompositor::new(&layout, &charts);
        let mut long_ids = report(4);
        long_ids.rows[0].respondent_id = "usuario.con.un.identificador.muy.largo@example.org".to_string();

        let sections = compositor.sections(&long_ids, generated_at());
        let width = layout.content_width();
        let mut checked = 0;
        for section in sections.iter().filter(|s| s.kind == SectionKind::Detail) {
            let SectionBody::Text { columns, lines, .. } = &section.body else {
                panic!("detail sections are text");
            };
            for line in lines {
                for (index, cell) in line.cells.iter().enumerate() {
                    let end = columns.get(index + 1).copied().unwrap_or(1.0);
                    assert!(
                        approx_text_width(cell, line.size) <= (end - columns[index]) * width,
                        "cell {:?} overflows column {}",
                        cell,
                        index
                    );
                    checked += 1;
                }
            }
        }
        assert_eq!(checked, 5 * 5);

        let first = sections
            .iter()
            .find(|s| s.kind == SectionKind::Detail)
            .and_then(|s| match &s.body {
                SectionBody::Text { lines, .. } => lines.get(1).cloned(),
                _ => None,
            })
            .unwrap();
        assert!(first.cells[0].starts_with("usuario"));
        assert!(first.cells[0].ends_with("..."));
    }
}
