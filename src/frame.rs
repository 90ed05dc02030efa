use crate::canvas::{Canvas, Document, META_PAGE_KIND_KEY};
use crate::font::{FontFace, measure_text_width, wrap_lines};
use crate::types::{Color, Margins, Pt, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: Pt,
    pub color: Color,
}

impl TextStyle {
    pub fn new(face: FontFace, size: f32) -> Self {
        Self {
            face,
            size: Pt::from_f32(size),
            color: Color::BLACK,
        }
    }

    pub fn regular(size: f32) -> Self {
        Self::new(FontFace::Regular, size)
    }

    pub fn bold(size: f32) -> Self {
        Self::new(FontFace::Bold, size)
    }

    pub fn italic(size: f32) -> Self {
        Self::new(FontFace::Oblique, size)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    /// A page type begins on a fresh page.
    SectionStart,
    /// The composer decided the remaining space is too small for the next block.
    Threshold,
    /// A line would have crossed the bottom margin.
    AutoBreak,
}

impl BreakReason {
    pub fn as_str(self) -> &'static str {
        match self {
            BreakReason::SectionStart => "section_start",
            BreakReason::Threshold => "guidance_threshold",
            BreakReason::AutoBreak => "auto_break",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageBreak {
    /// 1-based number of the page that was started.
    pub page_number: usize,
    pub kind: String,
    pub reason: BreakReason,
}

/// Cursor-driven drawing surface the composer writes to. Coordinates are
/// top-left origin; `cell` and `multi_cell` advance the cursor.
pub trait PageSurface {
    fn begin_page(&mut self, kind: &str, reason: BreakReason);
    fn page_count(&self) -> usize;
    fn page_size(&self) -> Size;
    fn current_y(&self) -> Pt;
    fn set_xy(&mut self, x: Pt, y: Pt);
    fn fill_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt, color: Color);
    /// Single line spanning to the right margin, optionally on a filled band.
    fn cell(&mut self, text: &str, height: Pt, style: &TextStyle, fill: Option<Color>, advance: bool);
    /// Word-wrapped block; empty text draws nothing and takes no height.
    fn multi_cell(&mut self, text: &str, line_height: Pt, style: &TextStyle);
    fn ln(&mut self, amount: Pt);
    fn image(&mut self, resource_id: &str, x: Pt, y: Pt, width: Pt, height: Pt);
    /// Lines whose bottom would pass this y start a new page.
    fn page_break_trigger(&self) -> Pt;
}

pub struct Frame {
    canvas: Canvas,
    margins: Margins,
    cell_padding: Pt,
    auto_break: bool,
    x: Pt,
    y: Pt,
    page_number: usize,
    page_kind: String,
    breaks: Vec<PageBreak>,
}

impl Frame {
    pub fn new(page_size: Size, margins: Margins) -> Self {
        Self {
            canvas: Canvas::new(page_size),
            margins,
            cell_padding: Pt::from_mm(1.0),
            auto_break: true,
            x: margins.left,
            y: margins.top,
            page_number: 0,
            page_kind: String::new(),
            breaks: Vec::new(),
        }
    }

    pub fn set_auto_page_break(&mut self, enabled: bool) {
        self.auto_break = enabled;
    }

    pub fn breaks(&self) -> &[PageBreak] {
        &self.breaks
    }

    pub fn x(&self) -> Pt {
        self.x
    }

    pub fn finish(self) -> (Document, Vec<PageBreak>) {
        (self.canvas.finish(), self.breaks)
    }

    fn content_right(&self) -> Pt {
        self.canvas.page_size().width - self.margins.right
    }

    fn ensure_page(&mut self) {
        if self.page_number == 0 {
            self.begin_page("page", BreakReason::SectionStart);
        }
    }

    fn break_if_needed(&mut self, height: Pt) {
        if self.auto_break && self.y + height > self.page_break_trigger() && self.y > self.margins.top {
            let kind = self.page_kind.clone();
            let x = self.x;
            self.begin_page(&kind, BreakReason::AutoBreak);
            self.x = x;
        }
    }

    fn draw_line(&mut self, text: &str, top: Pt, height: Pt, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        // Baseline sits 0.3em below the vertical centre of the line box.
        let baseline = top + height / 2 + style.size * 0.3;
        self.canvas.set_fill_color(style.color);
        self.canvas.set_font_name(style.face.base_font_name());
        self.canvas.set_font_size(style.size);
        self.canvas
            .draw_string(self.x + self.cell_padding, baseline - style.size, text);
    }
}

impl PageSurface for Frame {
    fn begin_page(&mut self, kind: &str, reason: BreakReason) {
        if self.page_number > 0 {
            self.canvas.show_page();
        }
        self.page_number += 1;
        self.page_kind = kind.to_string();
        self.canvas.meta(META_PAGE_KIND_KEY, kind);
        self.x = self.margins.left;
        self.y = self.margins.top;
        self.breaks.push(PageBreak {
            page_number: self.page_number,
            kind: kind.to_string(),
            reason,
        });
    }

    fn page_count(&self) -> usize {
        self.page_number
    }

    fn page_size(&self) -> Size {
        self.canvas.page_size()
    }

    fn current_y(&self) -> Pt {
        self.y
    }

    fn set_xy(&mut self, x: Pt, y: Pt) {
        self.x = x;
        self.y = y;
    }

    fn fill_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt, color: Color) {
        self.ensure_page();
        if width <= Pt::ZERO || height <= Pt::ZERO {
            return;
        }
        self.canvas.set_fill_color(color);
        self.canvas.draw_rect(x, y, width, height);
    }

    fn cell(&mut self, text: &str, height: Pt, style: &TextStyle, fill: Option<Color>, advance: bool) {
        self.ensure_page();
        self.break_if_needed(height);
        let width = (self.content_right() - self.x).max(Pt::ZERO);
        if let Some(color) = fill {
            self.fill_rect(self.x, self.y, width, height, color);
        }
        let top = self.y;
        self.draw_line(text, top, height, style);
        if advance {
            self.y = self.y + height;
            self.x = self.margins.left;
        } else {
            self.x = self.x + width;
        }
    }

    fn multi_cell(&mut self, text: &str, line_height: Pt, style: &TextStyle) {
        self.ensure_page();
        if text.is_empty() {
            return;
        }
        let width = (self.content_right() - self.x).max(Pt::ZERO);
        let wrap_width = width - self.cell_padding * 2;
        for line in wrap_lines(style.face, style.size, wrap_width, text) {
            self.break_if_needed(line_height);
            let top = self.y;
            self.draw_line(&line, top, line_height, style);
            self.y = self.y + line_height;
        }
        self.x = self.margins.left;
    }

    fn ln(&mut self, amount: Pt) {
        self.x = self.margins.left;
        self.y = self.y + amount;
    }

    fn image(&mut self, resource_id: &str, x: Pt, y: Pt, width: Pt, height: Pt) {
        self.ensure_page();
        self.canvas.draw_image(x, y, width, height, resource_id);
    }

    fn page_break_trigger(&self) -> Pt {
        self.canvas.page_size().height - self.margins.bottom
    }
}

/// Width of `text` as the frame would draw it, without padding.
pub fn text_width(style: &TextStyle, text: &str) -> Pt {
    measure_text_width(style.face, style.size, text)
}
