//! Engagement form fields and edits

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::model::EngagementStatus;

/// Editor tabs; each form field belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Core,
    Settings,
    Content,
    Team,
    Metadata,
}

/// Role a staff member holds on an engagement team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    #[default]
    Reviewer,
    TeamMember,
    Admin,
}

/// A staff member on the engagement team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub email: String,
    pub name: String,
    pub role: TeamRole,
}

impl TeamMember {
    /// Creates a team member.
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: TeamRole) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role,
        }
    }
}

/// A content tab shown on the public engagement page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTab {
    pub title: String,
    /// Rich text, stored as the editor's serialized document.
    pub body: String,
}

/// Everything the engagement editor can change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementForm {
    pub name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: EngagementStatus,
    pub is_internal: bool,
    pub surveys: Vec<Uuid>,
    pub content_tabs: Vec<ContentTab>,
    pub team: Vec<TeamMember>,
    pub metadata: BTreeMap<String, String>,
}

/// Identifies one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormFieldKey {
    Name,
    Description,
    StartDate,
    EndDate,
    Status,
    IsInternal,
    Surveys,
    ContentTabs,
    Team,
    Metadata,
}

impl FormFieldKey {
    /// Field name as used in validation errors and patches.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormFieldKey::Name => "name",
            FormFieldKey::Description => "description",
            FormFieldKey::StartDate => "start_date",
            FormFieldKey::EndDate => "end_date",
            FormFieldKey::Status => "status",
            FormFieldKey::IsInternal => "is_internal",
            FormFieldKey::Surveys => "surveys",
            FormFieldKey::ContentTabs => "content_tabs",
            FormFieldKey::Team => "team",
            FormFieldKey::Metadata => "metadata",
        }
    }

    /// The tab that edits this field.
    pub fn tab(&self) -> Tab {
        match self {
            FormFieldKey::Name
            | FormFieldKey::Description
            | FormFieldKey::StartDate
            | FormFieldKey::EndDate
            | FormFieldKey::Status => Tab::Core,
            FormFieldKey::IsInternal => Tab::Settings,
            FormFieldKey::Surveys | FormFieldKey::ContentTabs => Tab::Content,
            FormFieldKey::Team => Tab::Team,
            FormFieldKey::Metadata => Tab::Metadata,
        }
    }
}

/// A single change made by one of the tabs.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    Name(String),
    Description(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Status(EngagementStatus),
    IsInternal(bool),
    Surveys(Vec<Uuid>),
    ContentTabs(Vec<ContentTab>),
    Team(Vec<TeamMember>),
    /// Sets (`Some`) or removes (`None`) one metadata entry.
    Metadata(String, Option<String>),
}

impl FormEdit {
    /// The field this edit writes.
    pub fn key(&self) -> FormFieldKey {
        match self {
            FormEdit::Name(_) => FormFieldKey::Name,
            FormEdit::Description(_) => FormFieldKey::Description,
            FormEdit::StartDate(_) => FormFieldKey::StartDate,
            FormEdit::EndDate(_) => FormFieldKey::EndDate,
            FormEdit::Status(_) => FormFieldKey::Status,
            FormEdit::IsInternal(_) => FormFieldKey::IsInternal,
            FormEdit::Surveys(_) => FormFieldKey::Surveys,
            FormEdit::ContentTabs(_) => FormFieldKey::ContentTabs,
            FormEdit::Team(_) => FormFieldKey::Team,
            FormEdit::Metadata(..) => FormFieldKey::Metadata,
        }
    }
}

impl EngagementForm {
    pub(crate) fn apply(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::Name(v) => self.name = v,
            FormEdit::Description(v) => self.description = v,
            FormEdit::StartDate(v) => self.start_date = v,
            FormEdit::EndDate(v) => self.end_date = v,
            FormEdit::Status(v) => self.status = v,
            FormEdit::IsInternal(v) => self.is_internal = v,
            FormEdit::Surveys(v) => self.surveys = v,
            FormEdit::ContentTabs(v) => self.content_tabs = v,
            FormEdit::Team(v) => self.team = v,
            FormEdit::Metadata(key, Some(value)) => {
                self.metadata.insert(key, value);
            }
            FormEdit::Metadata(key, None) => {
                self.metadata.remove(&key);
            }
        }
    }

    pub(crate) fn differs_from(&self, other: &EngagementForm, key: FormFieldKey) -> bool {
        match key {
            FormFieldKey::Name => self.name != other.name,
            FormFieldKey::Description => self.description != other.description,
            FormFieldKey::StartDate => self.start_date != other.start_date,
            FormFieldKey::EndDate => self.end_date != other.end_date,
            FormFieldKey::Status => self.status != other.status,
            FormFieldKey::IsInternal => self.is_internal != other.is_internal,
            FormFieldKey::Surveys => self.surveys != other.surveys,
            FormFieldKey::ContentTabs => self.content_tabs != other.content_tabs,
            FormFieldKey::Team => self.team != other.team,
            FormFieldKey::Metadata => self.metadata != other.metadata,
        }
    }
}

/// Changed fields of an engagement, as sent to the backend on save.
///
/// Unchanged fields are `None` and left out of the serialized body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngagementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EngagementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_internal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surveys: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_tabs: Option<Vec<ContentTab>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<TeamMember>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl EngagementPatch {
    pub(crate) fn from_dirty(form: &EngagementForm, dirty: &BTreeSet<FormFieldKey>) -> Self {
        let mut patch = EngagementPatch::default();
        for key in dirty {
            match key {
                FormFieldKey::Name => patch.name = Some(form.name.clone()),
                FormFieldKey::Description => patch.description = Some(form.description.clone()),
                FormFieldKey::StartDate => patch.start_date = Some(form.start_date),
                FormFieldKey::EndDate => patch.end_date = Some(form.end_date),
                FormFieldKey::Status => patch.status = Some(form.status),
                FormFieldKey::IsInternal => patch.is_internal = Some(form.is_internal),
                FormFieldKey::Surveys => patch.surveys = Some(form.surveys.clone()),
                FormFieldKey::ContentTabs => patch.content_tabs = Some(form.content_tabs.clone()),
                FormFieldKey::Team => patch.team = Some(form.team.clone()),
                FormFieldKey::Metadata => patch.metadata = Some(form.metadata.clone()),
            }
        }
        patch
    }

    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        *self == EngagementPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_edits_set_and_remove() {
        let mut form = EngagementForm::default();
        form.apply(FormEdit::Metadata("ward".into(), Some("7".into())));
        form.apply(FormEdit::Metadata("topic".into(), Some("parks".into())));
        form.apply(FormEdit::Metadata("ward".into(), None));
        assert_eq!(form.metadata.len(), 1);
        assert_eq!(form.metadata.get("topic").map(String::as_str), Some("parks"));
    }

    #[test]
    fn test_patch_serializes_only_changed_fields() {
        let form = EngagementForm {
            name: "Dog park".into(),
            end_date: None,
            ..EngagementForm::default()
        };
        let dirty = BTreeSet::from([FormFieldKey::Name, FormFieldKey::EndDate]);
        let patch = EngagementPatch::from_dirty(&form, &dirty);

        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Dog park", "end_date": null}));
    }
}
