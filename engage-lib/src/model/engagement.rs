//! Engagement listing rows

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Value;
use crate::table::Row;

/// Lifecycle status of an engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementStatus {
    /// Being configured, not visible to the public.
    #[default]
    Draft,
    /// Published with a start date in the future.
    Scheduled,
    /// Published and accepting feedback.
    Open,
    /// Past its end date.
    Closed,
    /// Withdrawn from public view after publication.
    Unpublished,
}

impl EngagementStatus {
    /// Returns the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementStatus::Draft => "Draft",
            EngagementStatus::Scheduled => "Scheduled",
            EngagementStatus::Open => "Open",
            EngagementStatus::Closed => "Closed",
            EngagementStatus::Unpublished => "Unpublished",
        }
    }

    /// Returns `true` if the public can currently see the engagement.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            EngagementStatus::Scheduled | EngagementStatus::Open | EngagementStatus::Closed
        )
    }
}

impl fmt::Display for EngagementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngagementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(EngagementStatus::Draft),
            "scheduled" => Ok(EngagementStatus::Scheduled),
            "open" => Ok(EngagementStatus::Open),
            "closed" => Ok(EngagementStatus::Closed),
            "unpublished" => Ok(EngagementStatus::Unpublished),
            other => Err(format!("unknown engagement status '{}'", other)),
        }
    }
}

/// One engagement as shown in the staff listing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub id: Uuid,
    pub name: String,
    pub status: EngagementStatus,
    pub created_date: NaiveDate,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub published: bool,
    pub survey_count: i64,
}

impl Engagement {
    /// Creates a draft engagement with a fresh id.
    pub fn new(name: impl Into<String>, created_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: EngagementStatus::Draft,
            created_date,
            start_date: None,
            end_date: None,
            published: false,
            survey_count: 0,
        }
    }

    /// Sets the open period (builder pattern).
    pub fn with_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Sets the status (builder pattern).
    pub fn with_status(mut self, status: EngagementStatus) -> Self {
        self.published = status.is_public();
        self.status = status;
        self
    }

    /// Sets the number of attached surveys (builder pattern).
    pub fn with_surveys(mut self, count: i64) -> Self {
        self.survey_count = count;
        self
    }
}

impl Row for Engagement {
    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            "created_date" => Some(self.created_date.into()),
            "start_date" => self.start_date.map(Value::from),
            "end_date" => self.end_date.map(Value::from),
            "published" => Some(self.published.into()),
            "survey_count" => Some(self.survey_count.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            EngagementStatus::Draft,
            EngagementStatus::Scheduled,
            EngagementStatus::Open,
            EngagementStatus::Closed,
            EngagementStatus::Unpublished,
        ] {
            assert_eq!(status.as_str().parse::<EngagementStatus>(), Ok(status));
        }
        assert!("archived".parse::<EngagementStatus>().is_err());
    }

    #[test]
    fn test_row_fields() {
        let created = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let engagement = Engagement::new("Bike lanes", created)
            .with_status(EngagementStatus::Open)
            .with_surveys(2);

        assert_eq!(engagement.field("name"), Some(Value::from("Bike lanes")));
        assert_eq!(engagement.field("status"), Some(Value::from("Open")));
        assert_eq!(engagement.field("published"), Some(Value::Bool(true)));
        assert_eq!(engagement.field("survey_count"), Some(Value::Int(2)));
        assert_eq!(engagement.field("start_date"), None);
        assert_eq!(engagement.field("unknown"), None);
    }
}
