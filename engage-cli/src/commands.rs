//! Command implementations.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use engage_lib::interval::CountingRule;
use engage_lib::interval::IntervalInput;
use engage_lib::interval::calculate;
use engage_lib::model::Record;
use engage_lib::table::Column;
use engage_lib::table::Direction;
use engage_lib::table::FilterState;
use engage_lib::table::MemoryHistory;
use engage_lib::table::SortState;
use engage_lib::table::Table;
use engage_lib::table::TableConfig;
use engage_lib::table::UrlSync;
use log::info;

use crate::error::CliError;

/// Options of the `table` command after parsing.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub columns: Option<Vec<String>>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub url: Option<String>,
}

/// Loads rows from a JSON array of objects.
pub fn load_records(path: &Path) -> Result<Vec<Record>, CliError> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CliError::json(path, e))
}

/// Parses `key=value`.
pub fn parse_filter(arg: &str) -> Result<FilterState, CliError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| CliError::Argument(format!("filter '{}' must look like key=value", arg)))?;
    Ok(FilterState::new(key.trim(), value))
}

/// Parses `key`, `key:asc` or `key:desc`.
pub fn parse_sort(arg: &str) -> Result<SortState, CliError> {
    let (key, direction) = match arg.split_once(':') {
        None => (arg, Direction::Asc),
        Some((key, "asc")) => (key, Direction::Asc),
        Some((key, "desc")) => (key, Direction::Desc),
        Some((_, other)) => {
            return Err(CliError::Argument(format!(
                "sort direction '{}' must be asc or desc",
                other
            )));
        }
    };
    Ok(SortState {
        key: key.to_string(),
        direction,
    })
}

/// Builds one column per key. Columns whose present values are all numbers
/// are marked numeric.
pub fn columns_for(records: &[Record], keys: Option<&[String]>) -> Vec<Column<Record>> {
    let keys: Vec<String> = match keys {
        Some(keys) => keys.to_vec(),
        None => records
            .iter()
            .flat_map(|r| r.fields().keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    keys.into_iter()
        .map(|key| {
            let mut present = records
                .iter()
                .filter_map(|r| r.get(&key))
                .filter(|v| !v.is_null())
                .peekable();
            let numeric = present.peek().is_some() && present.all(|v| v.is_numeric());
            let column = Column::new(key.clone(), key).sortable();
            if numeric { column.numeric() } else { column }
        })
        .collect()
}

/// Runs the `table` command and returns the text to print.
pub fn run_table(
    records: Vec<Record>,
    options: &TableOptions,
    config: TableConfig,
) -> Result<String, CliError> {
    let columns = columns_for(&records, options.columns.as_deref());
    let mut config = config;
    if let Some(filter) = &options.filter {
        config.filter = Some(parse_filter(filter)?);
    }
    if let Some(sort) = &options.sort {
        config.default_sort = Some(parse_sort(sort)?);
    }

    let mut table = Table::with_config(columns, records, config)?;
    if let Some(url) = &options.url {
        table.enable_url_sync(UrlSync::new(MemoryHistory::new(url)?));
    }
    if let Some(size) = options.size {
        table.set_page_size(size)?;
    }
    if let Some(page) = options.page {
        if page == 0 {
            return Err(CliError::Argument("pages are numbered from 1".to_string()));
        }
        table.set_page(page - 1);
    }

    info!(
        "showing page {} of {} rows",
        table.page().page_index().saturating_add(1),
        table.page_info().total
    );

    let mut out = table.render_text();
    if let Some(sync) = table.url_sync() {
        out.push_str(&format!("url: {}\n", sync.location()));
    }
    Ok(out)
}

/// Options of the `interval` command after parsing.
#[derive(Debug, Clone, Default)]
pub struct IntervalOptions {
    pub rule: CountingRule,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: Option<i64>,
    pub suspension: Option<NaiveDate>,
    pub resumption: Option<NaiveDate>,
}

/// Outcome of the `interval` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalOutcome {
    /// The completed interval, formatted.
    Complete(String),
    /// One line per field error.
    Invalid(Vec<String>),
}

/// Runs the `interval` command.
pub fn run_interval(options: &IntervalOptions) -> IntervalOutcome {
    let input = IntervalInput {
        start_date: options.start,
        end_date: options.end,
        number_of_days: options.days,
        suspension_date: options.suspension,
        resumption_date: options.resumption,
    };

    match calculate(options.rule, &input) {
        Ok(interval) => {
            let mut out = format!(
                "rule: {}\nstart date: {}\nend date: {}\nnumber of days: {}\n",
                options.rule, interval.start_date, interval.end_date, interval.number_of_days
            );
            if options.rule == CountingRule::Suspension {
                out.push_str(&format!("suspended days: {}\n", interval.suspended_days));
            }
            IntervalOutcome::Complete(out)
        }
        Err(errors) => {
            IntervalOutcome::Invalid(errors.into_iter().map(|e| e.to_string()).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        serde_json::from_str(
            r#"[
                {"name": "Bravo", "votes": 3},
                {"name": "alpha", "votes": 10},
                {"name": "Charlie", "votes": null}
            ]"#,
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("name").unwrap(), SortState::asc("name"));
        assert_eq!(parse_sort("name:desc").unwrap(), SortState::desc("name"));
        assert!(parse_sort("name:sideways").is_err());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter("name=a=b").unwrap(), FilterState::new("name", "a=b"));
        assert!(parse_filter("name").is_err());
    }

    #[test]
    fn test_columns_detect_numbers() {
        let columns = columns_for(&records(), None);
        let keys: Vec<_> = columns.iter().map(|c| (c.key.as_str(), c.numeric)).collect();
        assert_eq!(keys, vec![("name", false), ("votes", true)]);
    }

    #[test]
    fn test_run_table_with_url() {
        let options = TableOptions {
            sort: Some("name".into()),
            size: Some(2),
            page: Some(2),
            url: Some("https://engage.example/engagements".into()),
            ..TableOptions::default()
        };
        let out = run_table(records(), &options, TableConfig::default()).unwrap();
        assert!(out.contains("alpha"));
        assert!(!out.contains("Bravo"));
        assert!(out.ends_with("url: https://engage.example/engagements?page=2&size=2\n"));
    }

    #[test]
    fn test_run_table_rejects_page_zero() {
        let options = TableOptions {
            page: Some(0),
            ..TableOptions::default()
        };
        assert!(run_table(records(), &options, TableConfig::default()).is_err());
    }

    #[test]
    fn test_run_interval() {
        let options = IntervalOptions {
            rule: CountingRule::Suspension,
            start: Some(date(2020, 1, 1)),
            end: Some(date(2020, 1, 31)),
            suspension: Some(date(2020, 1, 10)),
            resumption: Some(date(2020, 1, 15)),
            ..IntervalOptions::default()
        };
        match run_interval(&options) {
            IntervalOutcome::Complete(out) => {
                assert!(out.contains("number of days: 25"));
                assert!(out.contains("suspended days: 6"));
            }
            IntervalOutcome::Invalid(errors) => panic!("unexpected errors: {:?}", errors),
        }

        let missing = IntervalOptions {
            rule: CountingRule::Suspension,
            ..options
        };
        let missing = IntervalOptions {
            resumption: None,
            ..missing
        };
        assert_eq!(
            run_interval(&missing),
            IntervalOutcome::Invalid(vec![
                "resumption_date: Resumption date is required".to_string()
            ])
        );
    }
}
