//! Fixed page sequence of the assessment report.
//!
//! Pages are drawn in a fixed order onto any [`PageSurface`]: cover with the
//! bar chart, coach summary, detailed guidance (continuing onto extra pages as
//! needed) and the follow-up page. All geometry is in millimetres on a
//! top-left origin. Every category section walks [`NormalizedReport::categories`],
//! which is always in canonical order.

use crate::assets::LogoAsset;
use crate::frame::{BreakReason, PageSurface, TextStyle};
use crate::normalize::normalize;
use crate::report::{NormalizedCategory, NormalizedReport};
use crate::types::{Color, Pt};

pub const PAGE_KIND_COVER: &str = "cover";
pub const PAGE_KIND_SUMMARY: &str = "coach_summary";
pub const PAGE_KIND_GUIDANCE: &str = "guidance";
pub const PAGE_KIND_FOLLOW_UP: &str = "follow_up";

pub const GUIDANCE_HEADING: &str = "Detailed Chakra Guidance";
pub const GUIDANCE_CONTINUED_HEADING: &str = "Detailed Chakra Guidance (continued)";
pub const SUMMARY_HEADING: &str = "Chakra Summary (Coach View)";
pub const QUICK_READING_HEADING: &str = "Quick Reading";
pub const ALL_CLEAR_MESSAGE: &str = "All chakras are open and flowing. Maintain current rituals.";
pub const ATTENTION_MESSAGE: &str = "There are some energy blocks. Focus on the chakras marked as Blocked or Overactive. Use the remedies and crystals suggested.";

const SUMMARY_NOTE: &str =
    "Note: This is a quick snapshot for the healer. Detailed guidance is on the next pages.";

pub const DEFAULT_GUIDANCE_BREAK_MM: f32 = 250.0;
pub const BAR_MAX_WIDTH_MM: f32 = 120.0;

const LOGO_WIDTH_MM: f32 = 16.0;
const HEADER_BAND_MM: f32 = 18.0;
const ACCENT_STRIP_WIDTH_MM: f32 = 6.0;
const SUMMARY_BAND_MM: f32 = 7.0;
const BAR_LABEL_X_MM: f32 = 20.0;
const BAR_X_MM: f32 = 80.0;
const BAR_VALUE_X_MM: f32 = 165.0;
const BAR_HEIGHT_MM: f32 = 4.0;
const BAR_ROW_MM: f32 = 7.0;

fn mm(value: f32) -> Pt {
    Pt::from_mm(value)
}

/// Brand strings and colors. Strings are normalized before drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub title: String,
    pub subtitle: String,
    pub header_color: Color,
    pub accent_color: Color,
    pub promo_heading: String,
    pub promo_body: String,
    pub tagline: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: "Soulful Academy".to_string(),
            subtitle: "Chakra and Crystal Healing Report".to_string(),
            header_color: Color::rgb8(139, 92, 246),
            accent_color: Color::rgb8(236, 72, 153),
            promo_heading: "Crystal Support From MyAuraBliss".to_string(),
            promo_body: "Visit https://myaurabliss.com and pick the bracelets or crystal sets for the chakras that showed Blocked or Overactive.".to_string(),
            tagline: "Generated by Soulful Academy | What You Seek is Seeking You.".to_string(),
        }
    }
}

impl Branding {
    pub(crate) fn normalized(&self) -> Self {
        Self {
            title: normalize(&self.title),
            subtitle: normalize(&self.subtitle),
            header_color: self.header_color,
            accent_color: self.accent_color,
            promo_heading: normalize(&self.promo_heading),
            promo_body: normalize(&self.promo_body),
            tagline: normalize(&self.tagline),
        }
    }
}

/// Shortens long supplemental-remedy lines that carry a reference link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTruncation {
    pub marker: String,
    /// Lines at or below this many characters are left alone.
    pub threshold: usize,
    /// Characters kept after the marker.
    pub keep_after: usize,
}

impl Default for LinkTruncation {
    fn default() -> Self {
        Self {
            marker: "Visit:".to_string(),
            threshold: 120,
            keep_after: 80,
        }
    }
}

pub fn truncate_reference(line: &str, rule: &LinkTruncation) -> String {
    if rule.marker.is_empty() || line.chars().count() <= rule.threshold {
        return line.to_string();
    }
    match line.split_once(rule.marker.as_str()) {
        Some((before, after)) => {
            let kept: String = after.trim().chars().take(rule.keep_after).collect();
            format!("{} {} {} ...", before.trim(), rule.marker, kept)
        }
        None => line.to_string(),
    }
}

/// Width of a score bar; proportional to the score and capped at `max_width`.
pub fn bar_width(score: u8, max_width: Pt) -> Pt {
    max_width.mul_ratio(i32::from(score.min(100)), 100)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposeOptions {
    pub branding: Branding,
    pub link_truncation: LinkTruncation,
    /// A category starting below this y begins a continuation page.
    pub guidance_break: Pt,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            branding: Branding::default(),
            link_truncation: LinkTruncation::default(),
            guidance_break: mm(DEFAULT_GUIDANCE_BREAK_MM),
        }
    }
}

/// Draws the whole report. Input is already validated and normalized.
pub fn compose_report<S: PageSurface>(
    surface: &mut S,
    report: &NormalizedReport,
    options: &ComposeOptions,
    logo: Option<&LogoAsset>,
) {
    compose_cover(surface, report, &options.branding, logo);
    compose_summary(surface, report, options);
    compose_guidance(surface, report, options);
    compose_follow_up(surface, report, &options.branding);
}

fn heading(surface: &mut impl PageSurface, text: &str, size: f32, height: f32) {
    surface.cell(text, mm(height), &TextStyle::bold(size), None, true);
}

fn category_band(surface: &mut impl PageSurface, category: &NormalizedCategory, size: f32) {
    let style = TextStyle::bold(size).with_color(Color::WHITE);
    surface.cell(
        category.category.label(),
        mm(6.0),
        &style,
        Some(category.category.color()),
        true,
    );
}

fn compose_cover(
    surface: &mut impl PageSurface,
    report: &NormalizedReport,
    branding: &Branding,
    logo: Option<&LogoAsset>,
) {
    surface.begin_page(PAGE_KIND_COVER, BreakReason::SectionStart);
    let page = surface.page_size();
    surface.fill_rect(Pt::ZERO, Pt::ZERO, page.width, mm(HEADER_BAND_MM), branding.header_color);
    surface.fill_rect(
        Pt::ZERO,
        mm(HEADER_BAND_MM),
        mm(ACCENT_STRIP_WIDTH_MM),
        page.height - mm(HEADER_BAND_MM + 4.0),
        branding.accent_color,
    );
    if let Some(logo) = logo {
        let width = mm(LOGO_WIDTH_MM);
        surface.image(
            LogoAsset::RESOURCE_ID,
            mm(10.0),
            mm(2.0),
            width,
            logo.height_for_width(width),
        );
    }

    surface.set_xy(mm(30.0), mm(4.0));
    surface.cell(
        &branding.title,
        mm(7.0),
        &TextStyle::bold(14.0).with_color(Color::WHITE),
        None,
        true,
    );
    let y = surface.current_y();
    surface.set_xy(mm(30.0), y);
    surface.cell(
        &branding.subtitle,
        mm(6.0),
        &TextStyle::regular(10.0).with_color(Color::WHITE),
        None,
        true,
    );
    surface.ln(mm(12.0));

    let identity = TextStyle::bold(12.0);
    surface.cell(&format!("Client Name: {}", report.client_name), mm(6.0), &identity, None, true);
    if let Some(gender) = &report.gender {
        surface.cell(&format!("Gender: {gender}"), mm(6.0), &identity, None, true);
    }
    surface.cell(&format!("Date: {}", report.session_date), mm(6.0), &identity, None, true);
    surface.cell(&format!("Coach: {}", report.coach_name), mm(6.0), &identity, None, true);
    surface.cell(&format!("Intent: {}", report.intent), mm(6.0), &identity, None, true);

    surface.ln(mm(5.0));
    heading(surface, "Overall Chakra Health", 12.0, 6.0);
    surface.cell(
        &format!(
            "Blocked chakras: {} of 7 ({}%)",
            report.summary.blocked_count,
            report.summary.percent_label()
        ),
        mm(5.0),
        &TextStyle::regular(9.0),
        None,
        true,
    );

    let body = TextStyle::regular(9.0);
    let top = surface.current_y() + mm(3.0);
    let mut y = top;
    for category in &report.categories {
        surface.set_xy(mm(BAR_LABEL_X_MM), y);
        surface.cell(category.category.label(), mm(5.0), &body, None, false);
        surface.fill_rect(
            mm(BAR_X_MM),
            y + mm(1.0),
            bar_width(category.score, mm(BAR_MAX_WIDTH_MM)),
            mm(BAR_HEIGHT_MM),
            category.category.color(),
        );
        surface.set_xy(mm(BAR_VALUE_X_MM), y);
        surface.cell(&format!("{}%", category.score), mm(5.0), &body, None, false);
        y += mm(BAR_ROW_MM);
    }
    surface.set_xy(mm(10.0), y);

    surface.ln(mm(3.0));
    heading(surface, QUICK_READING_HEADING, 11.0, 5.0);
    let message = if report.summary.is_all_clear() {
        ALL_CLEAR_MESSAGE
    } else {
        ATTENTION_MESSAGE
    };
    surface.multi_cell(message, mm(5.0), &body);
}

fn compose_summary(surface: &mut impl PageSurface, report: &NormalizedReport, options: &ComposeOptions) {
    surface.begin_page(PAGE_KIND_SUMMARY, BreakReason::SectionStart);
    let page = surface.page_size();
    surface.fill_rect(
        Pt::ZERO,
        Pt::ZERO,
        page.width,
        mm(SUMMARY_BAND_MM),
        options.branding.accent_color,
    );
    surface.ln(mm(8.0));
    heading(surface, SUMMARY_HEADING, 12.0, 6.0);
    surface.ln(mm(2.0));
    let body = TextStyle::regular(9.0);
    surface.multi_cell(SUMMARY_NOTE, mm(5.0), &body);

    for category in &report.categories {
        surface.ln(mm(2.0));
        category_band(surface, category, 10.0);
        surface.cell(
            &format!("Energy Status: {}", category.status_label),
            mm(5.0),
            &body,
            None,
            true,
        );
        if let Some(remedy) = &category.supplemental_remedy {
            let line = truncate_reference(remedy, &options.link_truncation);
            surface.multi_cell(&format!("Crystal Suggestion: {line}"), mm(5.0), &body);
        }
    }
}

fn compose_guidance(surface: &mut impl PageSurface, report: &NormalizedReport, options: &ComposeOptions) {
    surface.begin_page(PAGE_KIND_GUIDANCE, BreakReason::SectionStart);
    heading(surface, GUIDANCE_HEADING, 12.0, 6.0);
    surface.ln(mm(3.0));

    let body = TextStyle::regular(10.0);
    for category in &report.categories {
        if surface.current_y() > options.guidance_break {
            surface.begin_page(PAGE_KIND_GUIDANCE, BreakReason::Threshold);
            heading(surface, GUIDANCE_CONTINUED_HEADING, 12.0, 6.0);
            surface.ln(mm(3.0));
        }
        category_band(surface, category, 11.0);
        surface.cell(
            &format!("Status: {}", category.status_label),
            mm(5.0),
            &body,
            None,
            true,
        );
        surface.multi_cell(&format!("Notes / Symptoms: {}", category.notes), mm(5.0), &body);
        surface.multi_cell(&format!("Energy Remedies: {}", category.remedies), mm(5.0), &body);
        if let Some(remedy) = &category.supplemental_remedy {
            surface.multi_cell(
                &format!("Crystal Remedies: {remedy}"),
                mm(5.0),
                &TextStyle::italic(9.0),
            );
        }
        surface.ln(mm(2.0));
    }
}

fn compose_follow_up(surface: &mut impl PageSurface, report: &NormalizedReport, branding: &Branding) {
    surface.begin_page(PAGE_KIND_FOLLOW_UP, BreakReason::SectionStart);
    let body = TextStyle::regular(10.0);
    heading(surface, "Follow-up and Home Practice", 12.0, 6.0);
    surface.ln(mm(2.0));
    surface.multi_cell(&report.follow_up_plan, mm(5.0), &body);

    surface.ln(mm(3.0));
    heading(surface, "Affirmations", 12.0, 6.0);
    surface.multi_cell(&report.affirmations, mm(5.0), &body);

    surface.ln(mm(4.0));
    heading(surface, &branding.promo_heading, 11.0, 6.0);
    surface.multi_cell(&branding.promo_body, mm(5.0), &body);

    surface.ln(mm(4.0));
    surface.multi_cell(&branding.tagline, mm(4.0), &TextStyle::italic(8.0));
}
