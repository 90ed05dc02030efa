mod assets;
mod canvas;
mod category;
mod compose;
mod debug;
mod defaults;
mod error;
mod fetch;
mod font;
mod form;
mod frame;
mod mail;
mod metrics;
mod normalize;
mod pdf;
mod pdfinspect;
mod report;
mod score;
mod types;

pub use assets::LogoAsset;
pub use canvas::{Canvas, Command, Document, META_PAGE_KIND_KEY, Page};
pub use category::Category;
pub use compose::{
    ALL_CLEAR_MESSAGE, ATTENTION_MESSAGE, BAR_MAX_WIDTH_MM, Branding, ComposeOptions,
    DEFAULT_GUIDANCE_BREAK_MM, GUIDANCE_CONTINUED_HEADING, GUIDANCE_HEADING, LinkTruncation,
    PAGE_KIND_COVER, PAGE_KIND_FOLLOW_UP, PAGE_KIND_GUIDANCE, PAGE_KIND_SUMMARY,
    QUICK_READING_HEADING, SUMMARY_HEADING, bar_width, compose_report, truncate_reference,
};
pub use debug::DebugLogger;
pub use defaults::{DefaultContent, default_content};
pub use error::ReportError;
pub use fetch::{LogoFetch, fetch_logo};
pub use font::FontFace;
pub use form::{AssessmentForm, FieldState, StatusTransition};
pub use frame::{BreakReason, Frame, PageBreak, PageSurface, TextStyle, text_width};
pub use mail::{
    DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, DispatchOutcome, MailTransport, MailerConfig,
    OutgoingMail, SmtpCredentials, SmtpMailer, dispatch_report,
};
pub use metrics::{DocumentMetrics, PageMetrics};
pub use normalize::{is_normalized, normalize, normalize_opt};
pub use pdf::{PdfOptions, SerializeStats, document_to_pdf, document_to_pdf_with_images};
pub use pdfinspect::{
    PdfInspectError, PdfInspectErrorCode, PdfInspectReport, inspect_pdf_bytes, inspect_pdf_path,
    page_text, require_report_shape,
};
pub use report::{BlockedSummary, CategoryAssessment, NormalizedCategory, NormalizedReport, Report};
pub use score::{Status, score_for};
pub use types::{Color, Margins, Pt, Size};

use debug::json_escape;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Kind string used for report file names.
pub const REPORT_KIND: &str = "chakra_report";

/// Fixed pages every report has: cover, coach summary, guidance, follow-up.
pub const FIXED_PAGE_COUNT: usize = 4;

const PAGE_MARGIN_MM: f32 = 10.0;
const DEFAULT_AUTO_BREAK_MARGIN_MM: f32 = 12.0;

/// Something optional that did not make it into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// Configured logo could not be loaded; the cover renders without it.
    LogoSkipped(String),
    /// Characters with no single-byte encoding were left out of text runs.
    WinAnsiDropped(usize),
    /// An image resource was drawn but never supplied.
    MissingImage(String),
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::LogoSkipped(reason) => write!(f, "logo skipped: {}", reason),
            RenderWarning::WinAnsiDropped(count) => {
                write!(f, "{} unencodable characters dropped", count)
            }
            RenderWarning::MissingImage(id) => write!(f, "image resource '{}' missing", id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub pdf: Vec<u8>,
    pub warnings: Vec<RenderWarning>,
    pub metrics: DocumentMetrics,
    pub page_breaks: Vec<PageBreak>,
}

pub struct ReportRenderer {
    page_size: Size,
    auto_break_margin: Pt,
    compose_options: ComposeOptions,
    pdf_options: PdfOptions,
    logo: Option<LogoAsset>,
    logo_skipped: Option<String>,
    debug: Option<Arc<DebugLogger>>,
}

impl ReportRenderer {
    pub fn builder() -> ReportRendererBuilder {
        ReportRendererBuilder::new()
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    fn emit_debug_summary(&self, context: &str) {
        if let Some(logger) = self.debug.as_deref() {
            logger.emit_summary(context);
            logger.flush();
        }
    }

    fn log(&self, json: &str) {
        if let Some(logger) = self.debug.as_deref() {
            logger.log_json(json);
        }
    }

    /// Lays out the report and serializes it. Incomplete reports fail before
    /// any page is drawn.
    pub fn render(&self, report: &Report) -> Result<RenderOutput, ReportError> {
        let normalized = NormalizedReport::from_report(report)?;
        if normalized.changed_fields > 0 {
            self.log(&format!(
                "{{\"type\":\"compose.text_normalized\",\"changed_fields\":{}}}",
                normalized.changed_fields
            ));
            if let Some(logger) = self.debug.as_deref() {
                logger.increment("compose.text_normalized", normalized.changed_fields as u64);
            }
        }

        let mut warnings = Vec::new();
        if let Some(reason) = &self.logo_skipped {
            self.log(&format!(
                "{{\"type\":\"asset.logo_skipped\",\"reason\":\"{}\"}}",
                json_escape(reason)
            ));
            warnings.push(RenderWarning::LogoSkipped(reason.clone()));
        }

        let compose_start = Instant::now();
        let mut margins = Margins::all_mm(PAGE_MARGIN_MM);
        margins.bottom = self.auto_break_margin;
        let mut frame = Frame::new(self.page_size, margins);
        compose_report(
            &mut frame,
            &normalized,
            &self.compose_options,
            self.logo.as_ref(),
        );
        let (document, page_breaks) = frame.finish();
        let compose_ms = compose_start.elapsed().as_secs_f64() * 1000.0;

        for page_break in &page_breaks {
            self.log(&format!(
                "{{\"type\":\"compose.page_break\",\"page\":{},\"kind\":\"{}\",\"reason\":\"{}\"}}",
                page_break.page_number,
                json_escape(&page_break.kind),
                page_break.reason.as_str()
            ));
            if let Some(logger) = self.debug.as_deref() {
                logger.increment(
                    &format!("compose.page_break.{}", page_break.reason.as_str()),
                    1,
                );
            }
        }

        let serialize_start = Instant::now();
        let images: Vec<(&str, &LogoAsset)> = self
            .logo
            .as_ref()
            .map(|logo| (LogoAsset::RESOURCE_ID, logo))
            .into_iter()
            .collect();
        let (pdf, stats) = pdf::document_to_pdf_with_images(
            &document,
            &images,
            &self.pdf_options,
            self.debug.as_deref(),
        )?;
        let serialize_ms = serialize_start.elapsed().as_secs_f64() * 1000.0;

        if stats.winansi_dropped > 0 {
            warnings.push(RenderWarning::WinAnsiDropped(stats.winansi_dropped));
        }
        warnings.extend(
            stats
                .missing_images
                .iter()
                .cloned()
                .map(RenderWarning::MissingImage),
        );

        let metrics = DocumentMetrics {
            pages: stats.pages,
            compose_ms,
            serialize_ms,
            total_bytes: pdf.len(),
            fingerprint_sha256: metrics::hex_sha256(&pdf),
        };
        self.log(&format!(
            "{{\"type\":\"render.done\",\"pages\":{},\"bytes\":{},\"warnings\":{},\"sha256\":\"{}\"}}",
            metrics.page_count(),
            metrics.total_bytes,
            warnings.len(),
            metrics.fingerprint_sha256
        ));
        self.emit_debug_summary("render");

        Ok(RenderOutput {
            pdf,
            warnings,
            metrics,
            page_breaks,
        })
    }

    /// Renders into `dir` as `{client}_{kind}.pdf` and returns the written path.
    pub fn render_to_file(
        &self,
        report: &Report,
        dir: impl AsRef<Path>,
        report_kind: &str,
    ) -> Result<(PathBuf, RenderOutput), ReportError> {
        let output = self.render(report)?;
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(report.file_name(report_kind));
        std::fs::write(&path, &output.pdf)?;
        Ok((path, output))
    }
}

pub struct ReportRendererBuilder {
    page_size: Size,
    guidance_break_mm: f32,
    auto_break_margin_mm: f32,
    branding: Branding,
    link_truncation: LinkTruncation,
    pdf_options: PdfOptions,
    logo: Option<LogoAsset>,
    logo_path: Option<PathBuf>,
    debug_path: Option<PathBuf>,
}

impl Default for ReportRendererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRendererBuilder {
    pub fn new() -> Self {
        Self {
            page_size: Size::a4(),
            guidance_break_mm: DEFAULT_GUIDANCE_BREAK_MM,
            auto_break_margin_mm: DEFAULT_AUTO_BREAK_MARGIN_MM,
            branding: Branding::default(),
            link_truncation: LinkTruncation::default(),
            pdf_options: PdfOptions::default(),
            logo: None,
            logo_path: None,
            debug_path: None,
        }
    }

    pub fn page_size(mut self, size: Size) -> Self {
        self.page_size = size;
        self
    }

    /// A guidance category starting below this y (mm from the top) opens a
    /// continuation page.
    pub fn guidance_break_threshold_mm(mut self, value: f32) -> Self {
        self.guidance_break_mm = value;
        self
    }

    pub fn auto_break_margin_mm(mut self, value: f32) -> Self {
        self.auto_break_margin_mm = value;
        self
    }

    pub fn branding(mut self, branding: Branding) -> Self {
        self.branding = branding;
        self
    }

    pub fn link_truncation(mut self, rule: LinkTruncation) -> Self {
        self.link_truncation = rule;
        self
    }

    pub fn logo(mut self, logo: LogoAsset) -> Self {
        self.logo = Some(logo);
        self.logo_path = None;
        self
    }

    // Loaded at build time; an unreadable file becomes a render warning.
    pub fn logo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = Some(path.into());
        self.logo = None;
        self
    }

    pub fn document_title(mut self, title: impl Into<String>) -> Self {
        self.pdf_options.document_title = Some(title.into());
        self
    }

    // Enable debug logging to a JSONL file for pagination and asset inspection.
    pub fn debug_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<ReportRenderer, ReportError> {
        let width_mm = self.page_size.width.to_mm();
        let height_mm = self.page_size.height.to_mm();
        if !(width_mm > 2.0 * PAGE_MARGIN_MM && height_mm > 2.0 * PAGE_MARGIN_MM) {
            return Err(ReportError::InvalidConfiguration(format!(
                "page size {:.1}x{:.1}mm leaves no room inside the margins",
                width_mm, height_mm
            )));
        }
        if !self.auto_break_margin_mm.is_finite()
            || self.auto_break_margin_mm < 0.0
            || self.auto_break_margin_mm >= height_mm - PAGE_MARGIN_MM
        {
            return Err(ReportError::InvalidConfiguration(format!(
                "auto_break_margin_mm must be in [0, {:.1})",
                height_mm - PAGE_MARGIN_MM
            )));
        }
        let break_limit = height_mm - self.auto_break_margin_mm;
        if !self.guidance_break_mm.is_finite()
            || self.guidance_break_mm <= PAGE_MARGIN_MM
            || self.guidance_break_mm > break_limit
        {
            return Err(ReportError::InvalidConfiguration(format!(
                "guidance_break_threshold_mm must be in ({:.1}, {:.1}]",
                PAGE_MARGIN_MM, break_limit
            )));
        }
        if self.link_truncation.keep_after > self.link_truncation.threshold {
            return Err(ReportError::InvalidConfiguration(
                "link_truncation keep_after must not exceed threshold".to_string(),
            ));
        }
        if self.pdf_options.producer.trim().is_empty() {
            return Err(ReportError::InvalidConfiguration(
                "pdf producer must not be empty".to_string(),
            ));
        }

        let (logo, logo_skipped) = match (self.logo, self.logo_path) {
            (Some(logo), _) => (Some(logo), None),
            (None, Some(path)) => match LogoAsset::from_path(&path) {
                Ok(logo) => (Some(logo), None),
                Err(err) => (None, Some(format!("{}: {}", path.display(), err))),
            },
            (None, None) => (None, None),
        };

        let debug = if let Some(path) = self.debug_path {
            Some(Arc::new(DebugLogger::new(path)?))
        } else {
            None
        };

        let mut pdf_options = self.pdf_options;
        pdf_options.document_title = pdf_options
            .document_title
            .map(|title| normalize(&title))
            .filter(|title| !title.trim().is_empty());

        Ok(ReportRenderer {
            page_size: self.page_size,
            auto_break_margin: Pt::from_mm(self.auto_break_margin_mm),
            compose_options: ComposeOptions {
                branding: self.branding.normalized(),
                link_truncation: self.link_truncation,
                guidance_break: Pt::from_mm(self.guidance_break_mm),
            },
            pdf_options,
            logo,
            logo_skipped,
            debug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::png_bytes;
    use crate::debug::tests::temp_log_path;

    fn full_report(status: Status) -> Report {
        let mut report = Report::new("Asha Rao");
        report.session_date = "2024-05-01".to_string();
        report.coach_name = "Mira".to_string();
        report.intent = "Feel grounded again".to_string();
        report.follow_up_plan = "Check in after two weeks".to_string();
        report.affirmations = "I am safe. I am supported.".to_string();
        for category in Category::ALL {
            let content = default_content(category, &status);
            report = report.with_category(
                category,
                CategoryAssessment::new(status.clone())
                    .with_notes(content.notes)
                    .with_remedies(content.remedies)
                    .with_supplemental_remedy(content.crystals),
            );
        }
        report
    }

    fn page_kinds(output: &RenderOutput) -> Vec<String> {
        output
            .metrics
            .pages
            .iter()
            .map(|page| page.kind.clone())
            .collect()
    }

    #[test]
    fn renders_parseable_report_with_fixed_pages() {
        let renderer = ReportRenderer::builder().build().unwrap();
        let output = renderer.render(&full_report(Status::Balanced)).unwrap();
        let inspected = inspect_pdf_bytes(&output.pdf).unwrap();
        assert!(inspected.page_count >= FIXED_PAGE_COUNT);
        assert_eq!(inspected.page_count, output.metrics.page_count());
        assert!(require_report_shape(&inspected, FIXED_PAGE_COUNT).is_ok());
        let kinds = page_kinds(&output);
        assert_eq!(kinds.first().map(String::as_str), Some(PAGE_KIND_COVER));
        assert_eq!(kinds.get(1).map(String::as_str), Some(PAGE_KIND_SUMMARY));
        assert_eq!(kinds.last().map(String::as_str), Some(PAGE_KIND_FOLLOW_UP));
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn guidance_spills_onto_a_continuation_page() {
        let renderer = ReportRenderer::builder()
            .guidance_break_threshold_mm(100.0)
            .build()
            .unwrap();
        let output = renderer.render(&full_report(Status::Blocked)).unwrap();
        assert!(output.metrics.pages_of_kind(PAGE_KIND_GUIDANCE).count() >= 2);
        assert!(
            output
                .page_breaks
                .iter()
                .any(|b| b.reason == BreakReason::Threshold)
        );
        let guidance_page = output
            .metrics
            .pages
            .iter()
            .filter(|p| p.kind == PAGE_KIND_GUIDANCE)
            .nth(1)
            .map(|p| p.page_number as u32)
            .unwrap();
        let text = page_text(&output.pdf, guidance_page).unwrap();
        assert!(text.contains("(continued)"));
    }

    #[test]
    fn incomplete_report_fails_without_output() {
        let mut report = full_report(Status::Balanced);
        report.categories.remove(&Category::Crown);
        let renderer = ReportRenderer::builder().build().unwrap();
        match renderer.render(&report) {
            Err(ReportError::MissingCategory(Category::Crown)) => {}
            other => panic!("expected missing crown, got {:?}", other.map(|o| o.pdf.len())),
        }
    }

    #[test]
    fn same_input_same_fingerprint() {
        let renderer = ReportRenderer::builder()
            .document_title("Asha Rao Chakra Report")
            .build()
            .unwrap();
        let report = full_report(Status::Overactive);
        let first = renderer.render(&report).unwrap();
        let second = renderer.render(&report).unwrap();
        assert_eq!(first.pdf, second.pdf);
        assert_eq!(first.metrics.fingerprint_sha256.len(), 64);
        assert_eq!(
            first.metrics.fingerprint_sha256,
            second.metrics.fingerprint_sha256
        );
    }

    #[test]
    fn document_title_lands_in_info() {
        let renderer = ReportRenderer::builder()
            .document_title("Asha \u{2013} Chakra Report")
            .build()
            .unwrap();
        let output = renderer.render(&full_report(Status::Balanced)).unwrap();
        let inspected = inspect_pdf_bytes(&output.pdf).unwrap();
        assert_eq!(inspected.title.as_deref(), Some("Asha - Chakra Report"));
    }

    #[test]
    fn logo_is_embedded_as_image_xobject() {
        let logo = LogoAsset::from_bytes(&png_bytes(8, 4, 200)).unwrap();
        let renderer = ReportRenderer::builder().logo(logo).build().unwrap();
        assert!(renderer.has_logo());
        let output = renderer.render(&full_report(Status::Balanced)).unwrap();
        let raw = String::from_utf8_lossy(&output.pdf);
        assert!(raw.contains("/Subtype /Image"));
        assert!(raw.contains("/SMask"));
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn unreadable_logo_path_is_a_warning() {
        let missing = temp_log_path("no_logo").with_extension("png");
        let renderer = ReportRenderer::builder()
            .logo_path(&missing)
            .build()
            .unwrap();
        assert!(!renderer.has_logo());
        let output = renderer.render(&full_report(Status::Balanced)).unwrap();
        assert!(matches!(
            output.warnings.as_slice(),
            [RenderWarning::LogoSkipped(_)]
        ));
        assert!(inspect_pdf_bytes(&output.pdf).is_ok());
    }

    #[test]
    fn build_rejects_bad_thresholds() {
        let too_low = ReportRenderer::builder()
            .guidance_break_threshold_mm(5.0)
            .build();
        assert!(matches!(too_low, Err(ReportError::InvalidConfiguration(_))));

        let past_auto_break = ReportRenderer::builder()
            .guidance_break_threshold_mm(290.0)
            .build();
        assert!(matches!(
            past_auto_break,
            Err(ReportError::InvalidConfiguration(_))
        ));

        let negative_margin = ReportRenderer::builder().auto_break_margin_mm(-1.0).build();
        assert!(matches!(
            negative_margin,
            Err(ReportError::InvalidConfiguration(_))
        ));

        let nan = ReportRenderer::builder()
            .guidance_break_threshold_mm(f32::NAN)
            .build();
        assert!(matches!(nan, Err(ReportError::InvalidConfiguration(_))));
    }

    #[test]
    fn debug_log_records_breaks_and_summary() {
        let path = temp_log_path("render");
        let renderer = ReportRenderer::builder().debug_log(&path).build().unwrap();
        let mut report = full_report(Status::Blocked);
        report.intent = "Feel \u{201c}grounded\u{201d}".to_string();
        renderer.render(&report).unwrap();
        let log = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(log.contains("\"type\":\"compose.page_break\""));
        assert!(log.contains("\"reason\":\"guidance_threshold\""));
        assert!(log.contains("\"type\":\"compose.text_normalized\""));
        assert!(log.contains("\"type\":\"render.done\""));
        assert!(log.contains("\"type\":\"debug.summary\""));
    }

    #[test]
    fn letter_pages_keep_their_size() {
        let renderer = ReportRenderer::builder()
            .page_size(Size::letter())
            .build()
            .unwrap();
        assert_eq!(renderer.page_size(), Size::letter());
        let output = renderer.render(&full_report(Status::Balanced)).unwrap();
        let raw = String::from_utf8_lossy(&output.pdf);
        assert!(raw.contains("/MediaBox [0 0 612 792]"));
    }

    #[test]
    fn render_to_file_uses_client_file_name() {
        let dir = temp_log_path("render_dir");
        let renderer = ReportRenderer::builder().build().unwrap();
        let (path, output) = renderer
            .render_to_file(&full_report(Status::SlightlyWeak), &dir, REPORT_KIND)
            .unwrap();
        let written = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("Asha_Rao_chakra_report.pdf")
        );
        assert_eq!(written, output.pdf);
    }

    #[test]
    fn form_snapshot_renders() {
        let mut form = AssessmentForm::new();
        form.client_name = "Asha".to_string();
        form.status_changed(Category::Heart, Status::Blocked);
        form.status_changed(Category::Root, Status::Blocked);
        let report = form.to_report();
        let summary = report.blocked_summary();
        assert_eq!(summary.blocked_count, 2);
        assert_eq!(summary.percent_label(), "28.6");
        let output = ReportRenderer::builder()
            .build()
            .unwrap()
            .render(&report)
            .unwrap();
        assert!(output.metrics.page_count() >= FIXED_PAGE_COUNT);
    }
}
