//! Integration tests for the day-interval calculator.

use chrono::NaiveDate;
use engage_lib::interval::CountingRule;
use engage_lib::interval::DerivedField;
use engage_lib::interval::IntervalInput;
use engage_lib::interval::RESUMPTION_DATE;
use engage_lib::interval::SUSPENSION_DATE;
use engage_lib::interval::calculate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Counting rules
// =============================================================================

#[test]
fn test_day_zero_versus_calendar() {
    let input = IntervalInput::new().start(date(2017, 3, 1)).end(date(2017, 3, 31));
    assert_eq!(calculate(CountingRule::DayZero, &input).unwrap().number_of_days, 30);
    assert_eq!(calculate(CountingRule::Calendar, &input).unwrap().number_of_days, 31);
}

#[test]
fn test_suspension_arithmetic() {
    let input = IntervalInput::new()
        .start(date(2020, 1, 1))
        .end(date(2020, 1, 31))
        .suspended(date(2020, 1, 10), date(2020, 1, 15));
    let interval = calculate(CountingRule::Suspension, &input).unwrap();
    assert_eq!(interval.number_of_days, 25);
    assert_eq!(interval.suspended_days, 6);
}

#[test]
fn test_each_rule_round_trips_its_own_count() {
    let start = date(2023, 12, 20);
    let end = date(2024, 3, 4);
    for rule in [CountingRule::DayZero, CountingRule::Calendar, CountingRule::Suspension] {
        let mut input = IntervalInput::new().start(start).end(end);
        if rule == CountingRule::Suspension {
            input = input.suspended(date(2024, 1, 1), date(2024, 1, 7));
        }
        let days = calculate(rule, &input).unwrap().number_of_days;

        let mut from_start = input.clone();
        from_start.end_date = None;
        from_start.number_of_days = Some(days);
        let derived = calculate(rule, &from_start).unwrap();
        assert_eq!(derived.end_date, end, "{}", rule);
        assert_eq!(derived.derived, DerivedField::EndDate);

        let mut from_end = input.clone();
        from_end.start_date = None;
        from_end.number_of_days = Some(days);
        assert_eq!(calculate(rule, &from_end).unwrap().start_date, start, "{}", rule);
    }
}

#[test]
fn test_all_three_given_recomputes_count() {
    let input = IntervalInput::new()
        .start(date(2017, 3, 1))
        .end(date(2017, 3, 31))
        .days(99);
    let interval = calculate(CountingRule::Calendar, &input).unwrap();
    assert_eq!(interval.number_of_days, 31);
    assert_eq!(interval.derived, DerivedField::NumberOfDays);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_suspension_without_dates_is_a_field_error() {
    let input = IntervalInput::new().start(date(2020, 1, 1)).end(date(2020, 1, 31));
    let errors = calculate(CountingRule::Suspension, &input).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.for_field(SUSPENSION_DATE).is_some());
    assert!(errors.for_field(RESUMPTION_DATE).is_some());
}

#[test]
fn test_correcting_input_recovers() {
    let mut input = IntervalInput::new().start(date(2020, 1, 1)).end(date(2020, 1, 31));
    assert!(calculate(CountingRule::Suspension, &input).is_err());

    input = input.suspended(date(2020, 1, 10), date(2020, 1, 15));
    assert!(calculate(CountingRule::Suspension, &input).is_ok());
}

#[test]
fn test_negative_day_count_is_rejected() {
    let input = IntervalInput::new().start(date(2020, 1, 1)).days(-3);
    let errors = calculate(CountingRule::DayZero, &input).unwrap_err();
    assert_eq!(errors.errors()[0].field, "number_of_days");
}
