//! Minimal PDF 1.4 writer
//!
//! Supports what the report draws and nothing else: Helvetica text in
//! WinAnsi encoding, grey rectangles, and uncompressed RGB image XObjects.
//! Drawing calls take top-down coordinates like the layout engine; the
//! flip to PDF's bottom-up space happens here.

use super::assets::RasterImage;
use crate::error::{Result, UsabilityError};
use chrono::{DateTime, Utc};
use std::io::Write;

/// Average Helvetica glyph width as a fraction of the font size
const AVERAGE_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Rough rendered width of `text`, for line wrapping
pub fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVERAGE_GLYPH_WIDTH
}

#[derive(Debug, Default)]
struct Page {
    content: Vec<u8>,
    images: Vec<usize>,
}

/// In-memory PDF document with a fixed page count
#[derive(Debug)]
pub struct PdfWriter {
    width: f32,
    height: f32,
    pages: Vec<Page>,
    images: Vec<RasterImage>,
}

impl PdfWriter {
    pub fn new(width: f32, height: f32, page_count: usize) -> Self {
        Self {
            width,
            height,
            pages: (0..page_count.max(1)).map(|_| Page::default()).collect(),
            images: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut Page> {
        let count = self.pages.len();
        self.pages.get_mut(page).ok_or_else(|| {
            UsabilityError::Layout(format!("page {} out of range ({} pages)", page, count))
        })
    }

    /// Single line of text whose top edge sits at `top`
    pub fn text(
        &mut self,
        page: usize,
        x: f32,
        top: f32,
        size: f32,
        font: Font,
        text: &str,
    ) -> Result<()> {
        let baseline = self.height - top - size;
        let content = &mut self.page_mut(page)?.content;
        write!(
            content,
            "BT /{} {:.2} Tf {:.2} {:.2} Td (",
            font.resource(),
            size,
            x,
            baseline
        )?;
        content.extend(encode_text(text));
        content.extend_from_slice(b") Tj ET\n");
        Ok(())
    }

    /// Filled rectangle; `grey` in [0, 1], 1 is white
    pub fn fill_rect(
        &mut self,
        page: usize,
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        grey: f32,
    ) -> Result<()> {
        let y = self.height - top - height;
        let content = &mut self.page_mut(page)?.content;
        writeln!(
            content,
            "{:.2} g {:.2} {:.2} {:.2} {:.2} re f 0 g",
            grey.clamp(0.0, 1.0),
            x,
            y,
            width,
            height
        )?;
        Ok(())
    }

    /// Rectangle outline
    pub fn stroke_rect(
        &mut self,
        page: usize,
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        grey: f32,
    ) -> Result<()> {
        let y = self.height - top - height;
        let content = &mut self.page_mut(page)?.content;
        writeln!(
            content,
            "{:.2} G 0.75 w {:.2} {:.2} {:.2} {:.2} re S 0 G",
            grey.clamp(0.0, 1.0),
            x,
            y,
            width,
            height
        )?;
        Ok(())
    }

    /// Image scaled into the given box
    pub fn image(
        &mut self,
        page: usize,
        image: RasterImage,
        x: f32,
        top: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        let index = self.images.len();
        let y = self.height - top - height;
        let target = self.page_mut(page)?;
        writeln!(
            target.content,
            "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /Im{} Do Q",
            width, height, x, y, index
        )?;
        target.images.push(index);
        self.images.push(image);
        Ok(())
    }

    /// Serialize the document
    ///
    /// Output depends only on the drawing calls, `title` and `generated_at`.
    pub fn finish(self, title: &str, generated_at: DateTime<Utc>) -> Result<Vec<u8>> {
        let image_base = 6;
        let page_base = image_base + self.images.len();
        let object_count = page_base + 2 * self.pages.len() - 1;

        let mut out: Vec<u8> = Vec::new();
        let mut offsets = vec![0usize; object_count + 1];
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        offsets[1] = out.len();
        write!(out, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

        offsets[2] = out.len();
        let kids: Vec<String> = (0..self.pages.len())
            .map(|i| format!("{} 0 R", page_base + 2 * i))
            .collect();
        write!(
            out,
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            self.pages.len()
        )?;

        offsets[3] = out.len();
        write!(
            out,
            "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n"
        )?;
        offsets[4] = out.len();
        write!(
            out,
            "4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n"
        )?;

        offsets[5] = out.len();
        out.extend_from_slice(b"5 0 obj\n<< /Title (");
        out.extend(encode_text(title));
        write!(
            out,
            ") /Producer (usability-insights) /CreationDate ({}) >>\nendobj\n",
            generated_at.format("D:%Y%m%d%H%M%SZ")
        )?;

        for (index, image) in self.images.iter().enumerate() {
            let number = image_base + index;
            offsets[number] = out.len();
            write!(
                out,
                "{} 0 obj\n<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Length {} >>\nstream\n",
                number,
                image.width,
                image.height,
                image.rgb.len()
            )?;
            out.extend_from_slice(&image.rgb);
            out.extend_from_slice(b"\nendstream\nendobj\n");
        }

        for (index, page) in self.pages.iter().enumerate() {
            let number = page_base + 2 * index;
            let xobjects: String = page
                .images
                .iter()
                .map(|i| format!(" /Im{} {} 0 R", i, image_base + i))
                .collect();

            offsets[number] = out.len();
            write!(
                out,
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << /F1 3 0 R /F2 4 0 R >> /XObject <<{} >> >> /Contents {} 0 R >>\nendobj\n",
                number,
                self.width,
                self.height,
                xobjects,
                number + 1
            )?;

            offsets[number + 1] = out.len();
            write!(
                out,
                "{} 0 obj\n<< /Length {} >>\nstream\n",
                number + 1,
                page.content.len()
            )?;
            out.extend_from_slice(&page.content);
            out.extend_from_slice(b"\nendstream\nendobj\n");
        }

        let xref = out.len();
        write!(out, "xref\n0 {}\n0000000000 65535 f \n", object_count + 1)?;
        for offset in &offsets[1..] {
            write!(out, "{:010} 00000 n \n", offset)?;
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{}\n%%EOF\n",
            object_count + 1,
            xref
        )?;

        Ok(out)
    }
}

/// Encode as a WinAnsi literal string body
fn encode_text(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                bytes.push(b'\\');
                bytes.push(c as u8);
            }
            ' '..='~' => bytes.push(c as u8),
            '\u{a0}'..='\u{ff}' => bytes.push(c as u32 as u8),
            '€' => bytes.push(0x80),
            '…' => bytes.push(0x85),
            '‘' => bytes.push(0x91),
            '’' => bytes.push(0x92),
            '“' => bytes.push(0x93),
            '”' => bytes.push(0x94),
            '•' => bytes.push(0x95),
            '–' => bytes.push(0x96),
            '—' => bytes.push(0x97),
            c if c.is_whitespace() || c.is_control() => bytes.push(b' '),
            _ => bytes.push(b'?'),
        }
    }
    bytes
}
