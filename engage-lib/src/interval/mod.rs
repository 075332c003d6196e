//! Day-interval calculator.
//!
//! Given any two of a start date, an end date and a number of days, works
//! out the third under one of three counting rules:
//!
//! | Rule | Count between `start` and `end` |
//! |------|---------------------------------|
//! | [`CountingRule::DayZero`] | `end - start` (start day not counted) |
//! | [`CountingRule::Calendar`] | `end - start + 1` (both ends counted) |
//! | [`CountingRule::Suspension`] | calendar count minus the suspended days |
//!
//! The suspended period runs from `suspension_date` to `resumption_date`,
//! both inclusive.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use engage_lib::interval::{calculate, CountingRule, IntervalInput};
//!
//! let input = IntervalInput::new()
//!     .start(NaiveDate::from_ymd_opt(2017, 3, 1).unwrap())
//!     .end(NaiveDate::from_ymd_opt(2017, 3, 31).unwrap());
//!
//! assert_eq!(calculate(CountingRule::DayZero, &input).unwrap().number_of_days, 30);
//! assert_eq!(calculate(CountingRule::Calendar, &input).unwrap().number_of_days, 31);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono::TimeDelta;
use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationErrors;

/// Field name used in errors for the start date.
pub const START_DATE: &str = "start_date";
/// Field name used in errors for the end date.
pub const END_DATE: &str = "end_date";
/// Field name used in errors for the day count.
pub const NUMBER_OF_DAYS: &str = "number_of_days";
/// Field name used in errors for the suspension date.
pub const SUSPENSION_DATE: &str = "suspension_date";
/// Field name used in errors for the resumption date.
pub const RESUMPTION_DATE: &str = "resumption_date";

/// How days between two dates are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountingRule {
    /// The start day is day zero and is not counted.
    DayZero,
    /// Both the start and end day are counted.
    #[default]
    Calendar,
    /// Calendar counting with a suspended period taken out.
    Suspension,
}

impl CountingRule {
    /// Returns the rule's identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            CountingRule::DayZero => "day-zero",
            CountingRule::Calendar => "calendar",
            CountingRule::Suspension => "suspension",
        }
    }

    /// Days added to `end - start` for inclusive counting.
    fn inclusive_days(&self) -> i64 {
        match self {
            CountingRule::DayZero => 0,
            CountingRule::Calendar | CountingRule::Suspension => 1,
        }
    }
}

impl fmt::Display for CountingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountingRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "day-zero" | "dayzero" => Ok(CountingRule::DayZero),
            "calendar" => Ok(CountingRule::Calendar),
            "suspension" => Ok(CountingRule::Suspension),
            other => Err(format!("unknown counting rule '{}'", other)),
        }
    }
}

/// The known fields of an interval; the calculator fills in the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalInput {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub number_of_days: Option<i64>,
    pub suspension_date: Option<NaiveDate>,
    pub resumption_date: Option<NaiveDate>,
}

impl IntervalInput {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date.
    pub fn start(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the end date.
    pub fn end(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the number of days.
    pub fn days(mut self, days: i64) -> Self {
        self.number_of_days = Some(days);
        self
    }

    /// Sets the suspended period (both dates inclusive).
    pub fn suspended(mut self, suspension: NaiveDate, resumption: NaiveDate) -> Self {
        self.suspension_date = Some(suspension);
        self.resumption_date = Some(resumption);
        self
    }
}

/// Which field the calculator worked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedField {
    StartDate,
    EndDate,
    NumberOfDays,
}

/// A complete interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_days: i64,
    /// Days removed by a suspension (0 for the other rules).
    pub suspended_days: i64,
    pub derived: DerivedField,
}

/// Completes `input` under `rule`.
///
/// Needs at least two of start date, end date and number of days; when all
/// three are given the number of days is recomputed from the dates. Every
/// problem found is reported, each against the field it concerns, and no
/// calculation is done unless the input is clean.
pub fn calculate(rule: CountingRule, input: &IntervalInput) -> Result<Interval, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let suspended_days = match rule {
        CountingRule::Suspension => suspended_days(input, &mut errors),
        _ => 0,
    };

    let known = [
        input.start_date.is_some(),
        input.end_date.is_some(),
        input.number_of_days.is_some(),
    ]
    .iter()
    .filter(|k| **k)
    .count();
    if known < 2 {
        if input.start_date.is_none() {
            errors.push(START_DATE, "Enter a start date, or an end date and number of days");
        }
        if input.end_date.is_none() {
            errors.push(END_DATE, "Enter an end date, or a start date and number of days");
        }
        if input.number_of_days.is_none() {
            errors.push(NUMBER_OF_DAYS, "Enter a number of days, or a start and end date");
        }
    }

    if let Some(days) = input.number_of_days {
        if days < rule.inclusive_days() {
            errors.push(
                NUMBER_OF_DAYS,
                format!("Number of days must be at least {}", rule.inclusive_days()),
            );
        }
    }

    if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
        if end < start {
            errors.push(END_DATE, "End date must not be before the start date");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let interval = match (input.start_date, input.end_date, input.number_of_days) {
        (Some(start), Some(end), _) => {
            let days = (end - start).num_days() + rule.inclusive_days() - suspended_days;
            if days < 0 {
                errors.push(
                    SUSPENSION_DATE,
                    "Suspended period is longer than the interval",
                );
                return Err(errors);
            }
            Interval {
                start_date: start,
                end_date: end,
                number_of_days: days,
                suspended_days,
                derived: DerivedField::NumberOfDays,
            }
        }
        (Some(start), None, Some(days)) => {
            let end = span(rule, days, suspended_days)
                .and_then(|span| shift(start, span))
                .ok_or_else(|| out_of_range(END_DATE))?;
            Interval {
                start_date: start,
                end_date: end,
                number_of_days: days,
                suspended_days,
                derived: DerivedField::EndDate,
            }
        }
        (None, Some(end), Some(days)) => {
            let start = span(rule, days, suspended_days)
                .and_then(|span| shift(end, span.checked_neg()?))
                .ok_or_else(|| out_of_range(START_DATE))?;
            Interval {
                start_date: start,
                end_date: end,
                number_of_days: days,
                suspended_days,
                derived: DerivedField::StartDate,
            }
        }
        // `known >= 2` was checked above.
        _ => return Err(errors),
    };

    debug!("{} interval: {:?}", rule, interval);
    Ok(interval)
}

/// Length of the suspended period, recording errors for missing or
/// reversed dates.
fn suspended_days(input: &IntervalInput, errors: &mut ValidationErrors) -> i64 {
    match (input.suspension_date, input.resumption_date) {
        (Some(suspension), Some(resumption)) => {
            if resumption < suspension {
                errors.push(
                    RESUMPTION_DATE,
                    "Resumption date must not be before the suspension date",
                );
                0
            } else {
                (resumption - suspension).num_days() + 1
            }
        }
        (suspension, resumption) => {
            if suspension.is_none() {
                errors.push(SUSPENSION_DATE, "Suspension date is required");
            }
            if resumption.is_none() {
                errors.push(RESUMPTION_DATE, "Resumption date is required");
            }
            0
        }
    }
}

/// Days between the start and end date for a count of `days`.
fn span(rule: CountingRule, days: i64, suspended_days: i64) -> Option<i64> {
    days.checked_sub(rule.inclusive_days())?
        .checked_add(suspended_days)
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

fn out_of_range(field: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.push(field, "Resulting date is out of range");
    errors
}
