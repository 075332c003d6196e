//! Engagement table and interval command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Page through an exported engagement list, newest first
//! engage table engagements.json --sort created_date:desc --size 25 --page 2
//!
//! # Keep a shareable link in step with the page shown
//! engage table engagements.json --filter status=open --url "https://engage.example/engagements"
//!
//! # Work out the end of a 30 day comment period
//! engage interval --rule calendar --start 2024-03-01 --days 30
//! ```

mod commands;
mod config;
mod error;
mod paths;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use engage_lib::interval::CountingRule;
use log::LevelFilter;
use log::debug;
use log::error;
use simplelog::Config;
use simplelog::WriteLogger;

use commands::IntervalOptions;
use commands::IntervalOutcome;
use commands::TableOptions;
use config::CliConfig;
use error::CliError;

/// Engagement table and day-interval tool
#[derive(Parser, Debug)]
#[command(name = "engage", version, about)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log more detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of a JSON row set
    Table {
        /// JSON file holding an array of objects
        file: PathBuf,

        /// Columns to show, comma separated (default: every field)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Keep rows whose field contains a value: key=value
        #[arg(short, long)]
        filter: Option<String>,

        /// Order rows: key or key:desc
        #[arg(short, long)]
        sort: Option<String>,

        /// Page to show, starting at 1
        #[arg(short, long)]
        page: Option<usize>,

        /// Rows per page
        #[arg(long)]
        size: Option<usize>,

        /// Mirror the page into this URL's query string
        #[arg(long)]
        url: Option<String>,
    },

    /// Complete a start date, end date or day count
    Interval {
        /// Counting rule
        #[arg(short, long, value_enum, default_value = "calendar")]
        rule: RuleArg,

        /// First day of the interval (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day of the interval (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Number of days
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,

        /// First suspended day (suspension rule)
        #[arg(long)]
        suspension: Option<NaiveDate>,

        /// Last suspended day (suspension rule)
        #[arg(long)]
        resumption: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RuleArg {
    DayZero,
    Calendar,
    Suspension,
}

impl From<RuleArg> for CountingRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::DayZero => CountingRule::DayZero,
            RuleArg::Calendar => CountingRule::Calendar,
            RuleArg::Suspension => CountingRule::Suspension,
        }
    }
}

/// Starts file logging. Without a cache directory nothing is logged.
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    let Some(logs) = paths::LogDir::platform() else {
        return Ok(());
    };
    let path = logs.latest();
    logs.rotate().map_err(|e| CliError::io(&path, e))?;
    let log_file = File::create(&path).map_err(|e| CliError::io(&path, e))?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}

fn run(args: Args) -> Result<ExitCode, CliError> {
    let config_path = args.config.clone().or_else(paths::config_file);
    let config = match &config_path {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    let level = match args.verbose {
        0 => config.level_filter()?,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    init_logging(level)?;
    debug!("config loaded from {:?}: {:?}", config_path, config);

    match args.command {
        Command::Table {
            file,
            columns,
            filter,
            sort,
            page,
            size,
            url,
        } => {
            let records = commands::load_records(&file)?;
            let options = TableOptions {
                columns,
                filter,
                sort,
                page,
                size,
                url,
            };
            print!("{}", commands::run_table(records, &options, config.table)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Interval {
            rule,
            start,
            end,
            days,
            suspension,
            resumption,
        } => {
            let options = IntervalOptions {
                rule: rule.into(),
                start,
                end,
                days,
                suspension,
                resumption,
            };
            match commands::run_interval(&options) {
                IntervalOutcome::Complete(out) => {
                    print!("{}", out);
                    Ok(ExitCode::SUCCESS)
                }
                IntervalOutcome::Invalid(errors) => {
                    for line in errors {
                        eprintln!("{}", line);
                    }
                    Ok(ExitCode::from(2))
                }
            }
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
