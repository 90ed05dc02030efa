use crate::category::Category;
use crate::error::ReportError;
use crate::normalize::{normalize, normalize_opt};
use crate::score::{Status, score_for};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryAssessment {
    pub status: Status,
    pub notes: String,
    pub remedies: String,
    pub supplemental_remedy: Option<String>,
}

impl CategoryAssessment {
    pub fn new(status: impl Into<Status>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_remedies(mut self, remedies: impl Into<String>) -> Self {
        self.remedies = remedies.into();
        self
    }

    pub fn with_supplemental_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.supplemental_remedy = Some(remedy.into());
        self
    }
}

/// One session's worth of input. Dates and names are echoed as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub client_name: String,
    pub gender: Option<String>,
    pub session_date: String,
    pub coach_name: String,
    pub intent: String,
    pub categories: BTreeMap<Category, CategoryAssessment>,
    pub follow_up_plan: String,
    pub affirmations: String,
}

impl Report {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category, assessment: CategoryAssessment) -> Self {
        self.categories.insert(category, assessment);
        self
    }

    pub fn missing_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| !self.categories.contains_key(category))
            .collect()
    }

    /// Fails on the first canonical category with no assessment.
    pub fn validate(&self) -> Result<(), ReportError> {
        match self.missing_categories().first() {
            Some(category) => Err(ReportError::MissingCategory(*category)),
            None => Ok(()),
        }
    }

    pub fn blocked_summary(&self) -> BlockedSummary {
        BlockedSummary::from_statuses(self.categories.values().map(|a| &a.status))
    }

    /// `{client}_{kind}.pdf` with the client name reduced to a safe file stem.
    pub fn file_name(&self, report_kind: &str) -> String {
        format!(
            "{}_{}.pdf",
            sanitize_file_stem(&self.client_name, "client"),
            sanitize_file_stem(report_kind, "report")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockedSummary {
    pub blocked_count: usize,
    /// Rounded to one decimal.
    pub blocked_percent: f64,
}

impl BlockedSummary {
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a Status>) -> Self {
        let blocked_count = statuses
            .into_iter()
            .filter(|status| **status == Status::Blocked)
            .count();
        let raw = blocked_count as f64 / Category::COUNT as f64 * 100.0;
        Self {
            blocked_count,
            blocked_percent: (raw * 10.0).round() / 10.0,
        }
    }

    pub fn is_all_clear(&self) -> bool {
        self.blocked_count == 0
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}", self.blocked_percent)
    }
}

/// Report with every free-text field normalized and the categories resolved
/// into canonical order. Only constructible from a complete report.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReport {
    pub client_name: String,
    pub gender: Option<String>,
    pub session_date: String,
    pub coach_name: String,
    pub intent: String,
    pub categories: Vec<NormalizedCategory>,
    pub follow_up_plan: String,
    pub affirmations: String,
    pub summary: BlockedSummary,
    /// Count of fields whose text changed during normalization.
    pub changed_fields: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCategory {
    pub category: Category,
    pub status: Status,
    pub status_label: String,
    pub score: u8,
    pub notes: String,
    pub remedies: String,
    pub supplemental_remedy: Option<String>,
}

impl NormalizedReport {
    pub fn from_report(report: &Report) -> Result<Self, ReportError> {
        report.validate()?;
        let mut changed_fields = 0usize;
        let mut clean = |text: &str| {
            let out = normalize(text);
            if out != text {
                changed_fields += 1;
            }
            out
        };

        let client_name = clean(&report.client_name);
        let gender = report.gender.as_deref().map(&mut clean);
        let session_date = clean(&report.session_date);
        let coach_name = clean(&report.coach_name);
        let intent = clean(&report.intent);
        let follow_up_plan = clean(&report.follow_up_plan);
        let affirmations = clean(&report.affirmations);

        let mut categories = Vec::with_capacity(Category::COUNT);
        for category in Category::ALL {
            let assessment = report
                .categories
                .get(&category)
                .ok_or(ReportError::MissingCategory(category))?;
            categories.push(NormalizedCategory {
                category,
                status: assessment.status.clone(),
                status_label: clean(assessment.status.label()),
                score: score_for(&assessment.status),
                notes: clean(&assessment.notes),
                remedies: clean(&assessment.remedies),
                supplemental_remedy: assessment.supplemental_remedy.as_deref().map(&mut clean),
            });
        }

        let summary = BlockedSummary::from_statuses(categories.iter().map(|c| &c.status));
        Ok(Self {
            client_name,
            gender,
            session_date,
            coach_name,
            intent,
            categories,
            follow_up_plan,
            affirmations,
            summary,
            changed_fields,
        })
    }
}

pub(crate) fn sanitize_file_stem(raw: &str, fallback: &str) -> String {
    let cleaned = normalize_opt(Some(raw));
    let mut out = String::with_capacity(cleaned.len());
    for ch in cleaned.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else if ch.is_whitespace() || ch == '.' {
            if !out.ends_with('_') {
                out.push('_');
            }
        }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() {
        fallback.to_string()
    } else {
        out
    }
}
