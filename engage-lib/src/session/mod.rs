//! Engagement form session shared by the editor tabs.
//!
//! Every tab of the engagement editor reads and writes the same form. The
//! session owns that form plus its last saved copy; each tab handler gets
//! `&mut EngagementSession` and applies [`FormEdit`]s to it. Edits are last
//! write wins. The session tracks which fields changed so only those are sent
//! when saving.
//!
//! # Example
//!
//! ```
//! use engage_lib::session::{EngagementSession, FormEdit, Tab};
//!
//! let mut session = EngagementSession::draft();
//! session.apply(FormEdit::Name("Harbour walk".into()));
//! session.apply(FormEdit::Description("Tell us about the new walkway".into()));
//!
//! assert!(session.is_tab_dirty(Tab::Core));
//! assert!(!session.is_tab_dirty(Tab::Team));
//!
//! let patch = session.patch();
//! assert_eq!(patch.name.as_deref(), Some("Harbour walk"));
//! assert!(patch.start_date.is_none());
//! ```

mod form;

pub use form::*;

use std::collections::BTreeSet;
use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;

use crate::error::ValidationErrors;
use crate::model::EngagementStatus;

/// Longest engagement name accepted.
pub const MAX_NAME_LENGTH: usize = 50;

/// Mutable editing state for one engagement.
#[derive(Debug, Clone)]
pub struct EngagementSession {
    form: EngagementForm,
    saved: EngagementForm,
    dirty: BTreeSet<FormFieldKey>,
}

impl EngagementSession {
    /// Opens a session on an existing engagement.
    pub fn new(form: EngagementForm) -> Self {
        Self {
            saved: form.clone(),
            form,
            dirty: BTreeSet::new(),
        }
    }

    /// Opens a session on a blank draft.
    pub fn draft() -> Self {
        Self::new(EngagementForm::default())
    }

    /// Returns the form as currently edited.
    pub fn form(&self) -> &EngagementForm {
        &self.form
    }

    /// Returns the form as last saved.
    pub fn saved(&self) -> &EngagementForm {
        &self.saved
    }

    /// Applies one edit. The latest edit to a field wins.
    pub fn apply(&mut self, edit: FormEdit) {
        let key = edit.key();
        self.form.apply(edit);
        if self.form.differs_from(&self.saved, key) {
            self.dirty.insert(key);
        } else {
            self.dirty.remove(&key);
        }
        debug!("edited {:?}; dirty fields: {:?}", key, self.dirty);
    }

    /// Returns `true` if any field differs from the saved copy.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns `true` if a field owned by `tab` differs from the saved copy.
    pub fn is_tab_dirty(&self, tab: Tab) -> bool {
        self.dirty.iter().any(|key| key.tab() == tab)
    }

    /// Returns the changed fields.
    pub fn dirty_fields(&self) -> impl Iterator<Item = FormFieldKey> + '_ {
        self.dirty.iter().copied()
    }

    /// Checks the whole form.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let form = &self.form;

        let name = form.name.trim();
        if name.is_empty() {
            errors.push(FormFieldKey::Name.as_str(), "Engagement name is required");
        } else if name.chars().count() > MAX_NAME_LENGTH {
            errors.push(
                FormFieldKey::Name.as_str(),
                format!("Name must be at most {} characters", MAX_NAME_LENGTH),
            );
        }

        if let (Some(start), Some(end)) = (form.start_date, form.end_date) {
            if end < start {
                errors.push(
                    FormFieldKey::EndDate.as_str(),
                    "End date must not be before the start date",
                );
            }
        }

        let mut seen = HashSet::new();
        for member in &form.team {
            let email = member.email.trim().to_lowercase();
            if email.is_empty() {
                errors.push(FormFieldKey::Team.as_str(), "Team member email is required");
            } else if !seen.insert(email) {
                errors.push(
                    FormFieldKey::Team.as_str(),
                    format!("{} is already on the team", member.email.trim()),
                );
            }
        }

        for (i, tab) in form.content_tabs.iter().enumerate() {
            if tab.title.trim().is_empty() {
                errors.push(
                    FormFieldKey::ContentTabs.as_str(),
                    format!("Content tab {} needs a title", i + 1),
                );
            }
        }

        errors.into_result()
    }

    /// The changed fields, ready to send to the backend.
    pub fn patch(&self) -> EngagementPatch {
        EngagementPatch::from_dirty(&self.form, &self.dirty)
    }

    /// Records a successful save: the current form becomes the baseline.
    pub fn mark_saved(&mut self) {
        self.saved = self.form.clone();
        self.dirty.clear();
    }

    /// Drops unsaved edits.
    pub fn discard(&mut self) {
        self.form = self.saved.clone();
        self.dirty.clear();
    }

    /// Publishes the engagement.
    ///
    /// The form must validate and have both dates. The status becomes
    /// `Scheduled` when the start date is after `today`, otherwise `Open`.
    pub fn publish(&mut self, today: NaiveDate) -> Result<EngagementStatus, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if self.form.start_date.is_none() {
            errors.push(
                FormFieldKey::StartDate.as_str(),
                "A start date is required to publish",
            );
        }
        if self.form.end_date.is_none() {
            errors.push(
                FormFieldKey::EndDate.as_str(),
                "An end date is required to publish",
            );
        }
        errors.into_result()?;

        let status = match self.form.start_date {
            Some(start) if start > today => EngagementStatus::Scheduled,
            _ => EngagementStatus::Open,
        };
        self.apply(FormEdit::Status(status));
        debug!("publishing engagement as {}", status);
        Ok(status)
    }

    /// Withdraws a published engagement from public view.
    pub fn unpublish(&mut self) {
        self.apply(FormEdit::Status(EngagementStatus::Unpublished));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(email: &str) -> TeamMember {
        TeamMember::new(email, "Staff", TeamRole::Reviewer)
    }

    #[test]
    fn test_reverting_an_edit_clears_dirtiness() {
        let mut session = EngagementSession::draft();
        session.apply(FormEdit::Name("Plaza".into()));
        assert!(session.is_dirty());
        session.apply(FormEdit::Name(String::new()));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut session = EngagementSession::draft();
        session.apply(FormEdit::Name("First".into()));
        session.apply(FormEdit::Name("Second".into()));
        assert_eq!(session.form().name, "Second");
        assert_eq!(session.dirty_fields().collect::<Vec<_>>(), vec![FormFieldKey::Name]);
    }

    #[test]
    fn test_validation() {
        let mut session = EngagementSession::draft();
        session.apply(FormEdit::StartDate(Some(date(2024, 6, 1))));
        session.apply(FormEdit::EndDate(Some(date(2024, 5, 1))));
        session.apply(FormEdit::Team(vec![
            member("a@city.gov"),
            member("A@city.gov "),
            member(""),
        ]));

        let errors = session.validate().unwrap_err();
        let fields: Vec<_> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "end_date", "team", "team"]);
    }

    #[test]
    fn test_name_length_limit() {
        let mut session = EngagementSession::draft();
        session.apply(FormEdit::Name("x".repeat(MAX_NAME_LENGTH)));
        assert!(session.validate().is_ok());
        session.apply(FormEdit::Name("x".repeat(MAX_NAME_LENGTH + 1)));
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_publish_sets_status_from_start_date() {
        let mut session = EngagementSession::draft();
        session.apply(FormEdit::Name("Transit survey".into()));
        session.apply(FormEdit::StartDate(Some(date(2024, 7, 1))));
        session.apply(FormEdit::EndDate(Some(date(2024, 7, 31))));

        assert_eq!(session.publish(date(2024, 6, 1)), Ok(EngagementStatus::Scheduled));
        assert_eq!(session.publish(date(2024, 7, 1)), Ok(EngagementStatus::Open));
        assert_eq!(session.patch().status, Some(EngagementStatus::Open));
    }

    #[test]
    fn test_publish_requires_dates() {
        let mut session = EngagementSession::draft();
        session.apply(FormEdit::Name("Transit survey".into()));
        let errors = session.publish(date(2024, 6, 1)).unwrap_err();
        assert!(errors.for_field("start_date").is_some());
        assert!(errors.for_field("end_date").is_some());
        assert_eq!(session.form().status, EngagementStatus::Draft);
    }

    #[test]
    fn test_mark_saved_and_discard() {
        let mut session = EngagementSession::draft();
        session.apply(FormEdit::Name("Kept".into()));
        session.mark_saved();
        assert!(!session.is_dirty());
        assert_eq!(session.saved().name, "Kept");

        session.apply(FormEdit::Name("Dropped".into()));
        session.discard();
        assert_eq!(session.form().name, "Kept");
        assert!(session.patch().is_empty());
    }
}
