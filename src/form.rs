//! Per-category editing state behind the coach's intake form.
//!
//! Picking a status seeds notes, remedies and crystals from
//! [`default_content`]. Edits stick until the status changes again.

use crate::category::Category;
use crate::defaults::default_content;
use crate::report::{CategoryAssessment, Report};
use crate::score::Status;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub status: Status,
    pub notes: String,
    pub remedies: String,
    pub crystals: String,
    /// Status whose defaults were last written into the text fields.
    pub last_seeded_status: Option<Status>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    /// Status changed; text fields were overwritten with defaults.
    Reseeded,
    /// Same status picked again; edits kept.
    Unchanged,
}

/// Client details plus one [`FieldState`] per category.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentForm {
    pub client_name: String,
    pub gender: Option<String>,
    pub session_date: String,
    pub coach_name: String,
    pub intent: String,
    pub follow_up_plan: String,
    pub affirmations: String,
    /// Indexed by `Category as usize`, which follows canonical order.
    fields: [FieldState; Category::COUNT],
}

impl Default for AssessmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentForm {
    /// Every category starts Balanced with its Balanced defaults.
    pub fn new() -> Self {
        let fields = Category::ALL.map(|category| seeded_state(category, Status::Balanced));
        Self {
            client_name: String::new(),
            gender: None,
            session_date: String::new(),
            coach_name: String::new(),
            intent: String::new(),
            follow_up_plan: String::new(),
            affirmations: String::new(),
            fields,
        }
    }

    pub fn field(&self, category: Category) -> &FieldState {
        &self.fields[category as usize]
    }

    pub fn status_changed(&mut self, category: Category, status: impl Into<Status>) -> StatusTransition {
        let status = status.into();
        let state = self.state_mut(category);
        if state.status == status && state.last_seeded_status.as_ref() == Some(&status) {
            return StatusTransition::Unchanged;
        }
        *state = seeded_state(category, status);
        StatusTransition::Reseeded
    }

    pub fn edit_notes(&mut self, category: Category, notes: impl Into<String>) {
        self.state_mut(category).notes = notes.into();
    }

    pub fn edit_remedies(&mut self, category: Category, remedies: impl Into<String>) {
        self.state_mut(category).remedies = remedies.into();
    }

    pub fn edit_crystals(&mut self, category: Category, crystals: impl Into<String>) {
        self.state_mut(category).crystals = crystals.into();
    }

    /// Snapshot of the form as a renderable report. Empty crystal text
    /// becomes an absent supplemental remedy.
    pub fn to_report(&self) -> Report {
        let mut report = Report {
            client_name: self.client_name.clone(),
            gender: self.gender.clone().filter(|g| !g.trim().is_empty()),
            session_date: self.session_date.clone(),
            coach_name: self.coach_name.clone(),
            intent: self.intent.clone(),
            follow_up_plan: self.follow_up_plan.clone(),
            affirmations: self.affirmations.clone(),
            ..Report::default()
        };
        for (category, state) in Category::ALL.into_iter().zip(&self.fields) {
            let mut assessment = CategoryAssessment::new(state.status.clone())
                .with_notes(state.notes.clone())
                .with_remedies(state.remedies.clone());
            if !state.crystals.trim().is_empty() {
                assessment = assessment.with_supplemental_remedy(state.crystals.clone());
            }
            report.categories.insert(category, assessment);
        }
        report
    }

    fn state_mut(&mut self, category: Category) -> &mut FieldState {
        &mut self.fields[category as usize]
    }
}

fn seeded_state(category: Category, status: Status) -> FieldState {
    let content = default_content(category, &status);
    FieldState {
        status: status.clone(),
        notes: content.notes.to_string(),
        remedies: content.remedies.to_string(),
        crystals: content.crystals.to_string(),
        last_seeded_status: Some(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_is_seeded_with_balanced_defaults() {
        let form = AssessmentForm::new();
        for category in Category::ALL {
            let field = form.field(category);
            assert_eq!(field.status, Status::Balanced);
            assert_eq!(
                field.notes,
                default_content(category, &Status::Balanced).notes
            );
        }
    }

    #[test]
    fn status_change_reseeds_text() {
        let mut form = AssessmentForm::new();
        form.edit_notes(Category::Heart, "custom");
        let transition = form.status_changed(Category::Heart, Status::Blocked);
        assert_eq!(transition, StatusTransition::Reseeded);
        let field = form.field(Category::Heart);
        assert_eq!(field.notes, default_content(Category::Heart, &Status::Blocked).notes);
        assert_eq!(field.last_seeded_status, Some(Status::Blocked));
    }

    #[test]
    fn edits_survive_reselecting_the_same_status() {
        let mut form = AssessmentForm::new();
        form.status_changed(Category::Throat, "Overactive");
        form.edit_remedies(Category::Throat, "my own remedy");
        form.edit_crystals(Category::Throat, "my crystal");
        assert_eq!(
            form.status_changed(Category::Throat, Status::Overactive),
            StatusTransition::Unchanged
        );
        let field = form.field(Category::Throat);
        assert_eq!(field.remedies, "my own remedy");
        assert_eq!(field.crystals, "my crystal");
    }

    #[test]
    fn unrecognized_status_clears_seed_text() {
        let mut form = AssessmentForm::new();
        form.status_changed(Category::Crown, "Shimmering");
        let field = form.field(Category::Crown);
        assert!(!field.status.is_recognized());
        assert!(field.notes.is_empty());
        assert!(field.crystals.is_empty());
    }

    #[test]
    fn to_report_is_complete_and_maps_crystals() {
        let mut form = AssessmentForm::new();
        form.client_name = "Asha".to_string();
        form.gender = Some("  ".to_string());
        form.edit_crystals(Category::Root, "");
        let report = form.to_report();
        assert!(report.validate().is_ok());
        assert_eq!(report.gender, None);
        assert_eq!(report.categories[&Category::Root].supplemental_remedy, None);
        assert!(
            report.categories[&Category::Sacral]
                .supplemental_remedy
                .is_some()
        );
    }
}
