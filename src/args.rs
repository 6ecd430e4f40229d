//! Command-line argument parsing using clap.
//!
//! Each subcommand drives one editor with concrete options, the way a
//! component gallery shows every widget configuration.

use std::io::IsTerminal;

use chrono::{Datelike, Locale, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::calendar::{Navigation, month_start};
use crate::error::Error;
use crate::formatter::{get_month_name, get_system_locale, parse_locale};
use crate::keypad::Decimal;
use crate::types::{ColumnsMode, GUTTER_WIDTH_REGULAR, RenderContext, Theme, WeekOffset};

#[derive(Parser, Debug)]
#[command(name = "numpad")]
#[command(about = "Drives keypad, date/time, calendar and appointment editors", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Disable colorized output.
    #[arg(long, global = true, help_heading = "Output options")]
    pub no_color: bool,

    /// Locale for month and weekday names (it, de_DE, ...).
    #[arg(
        long,
        global = true,
        help_heading = "Output options",
        value_name = "tag"
    )]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a month grid and optionally select a day.
    Calendar(CalendarArgs),
    /// Type keys on the numeric keypad.
    Number(NumberArgs),
    /// Type digits into a date/time mask.
    Datetime(DateTimeArgs),
    /// List bookable appointment slots.
    Appointment(AppointmentArgs),
}

/// Month moves applied before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NavigationArg {
    Prev,
    Next,
    PrevYear,
    NextYear,
}

impl From<NavigationArg> for Navigation {
    fn from(arg: NavigationArg) -> Self {
        match arg {
            NavigationArg::Prev => Navigation::PrevMonth,
            NavigationArg::Next => Navigation::NextMonth,
            NavigationArg::PrevYear => Navigation::PrevYear,
            NavigationArg::NextYear => Navigation::NextYear,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct CalendarArgs {
    /// Week starts on Sunday (default).
    #[arg(short = 's', long, help_heading = "Calendar options")]
    pub sunday: bool,

    /// Week starts on Monday.
    #[arg(
        short = 'm',
        long,
        help_heading = "Calendar options",
        conflicts_with = "sunday"
    )]
    pub monday: bool,

    /// First weekday column: 0 = Sunday ... 6 = Saturday.
    #[arg(
        short = 'o',
        long,
        help_heading = "Calendar options",
        value_name = "0-6",
        conflicts_with_all = ["sunday", "monday"]
    )]
    pub week_offset: Option<u32>,

    /// Selected day.
    #[arg(long, help_heading = "Calendar options", value_name = "YYYY-MM-DD")]
    pub select: Option<String>,

    /// Format used to print the selected day.
    #[arg(
        short = 'f',
        long,
        default_value = "DD.MM.YYYY",
        help_heading = "Calendar options"
    )]
    pub format: String,

    /// Time format completing the selected day, e.g. " HH:mm".
    #[arg(long, help_heading = "Calendar options", value_name = "format")]
    pub time_format: Option<String>,

    /// Keys typed into the time mask.
    #[arg(
        long = "time",
        help_heading = "Calendar options",
        value_name = "keys",
        requires = "time_format"
    )]
    pub time_keys: Option<String>,

    /// Month moves applied before display (repeatable).
    #[arg(long = "go", value_enum, help_heading = "Calendar options")]
    pub navigation: Vec<NavigationArg>,

    /// Number of months to display.
    #[arg(
        short = 'n',
        long = "months",
        default_value_t = 1,
        help_heading = "Display options",
        value_name = "num"
    )]
    pub months_count: u32,

    /// Number of columns for multiple months (or "auto" for terminal width).
    #[arg(
        short = 'c',
        long = "columns",
        help_heading = "Display options",
        value_name = "width"
    )]
    pub columns: Option<String>,

    /// Leave days of adjacent months blank.
    #[arg(long, help_heading = "Display options")]
    pub no_overflow: bool,

    /// Month (1-12 or name), or a 4-digit year.
    #[arg(index = 1, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 2, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct NumberArgs {
    /// Decimals allowed: true, false or a number of fractional digits.
    #[arg(long, default_value = "true", value_parser = parse_decimal)]
    pub decimal: Decimal,

    /// Reject negative numbers.
    #[arg(long)]
    pub no_negative: bool,

    /// Only accept positive odd integers.
    #[arg(long)]
    pub odd: bool,

    /// Initial value.
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Keys to press: digits, `.`, `-`, `<` (backspace), `c` (clear).
    #[arg(index = 1, default_value = "", allow_hyphen_values = true)]
    pub keys: String,
}

#[derive(clap::Args, Debug)]
pub struct DateTimeArgs {
    /// Date format, e.g. "DD-MM-YYYY HH:mm".
    #[arg(short = 'f', long, default_value = "HH:mm")]
    pub format: String,

    /// Initial value written in the format.
    #[arg(long)]
    pub value: Option<String>,

    /// Keys to press: digits, `<` (backspace), `c` (clear).
    #[arg(index = 1, default_value = "")]
    pub keys: String,
}

#[derive(clap::Args, Debug)]
pub struct AppointmentArgs {
    /// Format of the slots and of the selection.
    #[arg(short = 'f', long, default_value = "DD-MM-YYYY HH:mm")]
    pub format: String,

    /// First day to show (YYYY-MM-DD), today by default.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<String>,

    /// Days per page.
    #[arg(long, default_value_t = crate::appointment::DAYS_PER_PAGE)]
    pub days: usize,

    /// Slot to select, written in the format.
    #[arg(long)]
    pub select: Option<String>,

    /// Bookable slots, written in the format.
    #[arg(index = 1, required = true, value_name = "slot")]
    pub slots: Vec<String>,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Examples:
  numpad calendar                       Current month, week starting Sunday
  numpad calendar -m 2 2024             February 2024, week starting Monday
  numpad calendar --locale it -n 3      Three months with Italian names
  numpad calendar --select 1978-12-29 --time-format ' HH:mm' --time 1000
  numpad number --decimal 2 -- -12.345  Negative number, two decimals
  numpad datetime -f 'DD-MM-YYYY HH:mm' 291219781000
  numpad appointment --from 2024-06-03 '03-06-2024 09:00' '04-06-2024 10:30'";

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    match s {
        "true" => Ok(Decimal::Unlimited),
        "false" => Ok(Decimal::Disabled),
        _ => s
            .parse::<u32>()
            .map(Decimal::from)
            .map_err(|_| format!("Invalid decimal value: {}", s)),
    }
}

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

impl CalendarArgs {
    pub fn week_offset(&self) -> Result<WeekOffset, Error> {
        match self.week_offset {
            Some(offset) => WeekOffset::new(offset),
            None if self.monday => Ok(WeekOffset::MONDAY),
            None => Ok(WeekOffset::SUNDAY),
        }
    }
}

impl RenderContext {
    pub fn new(args: &Args) -> Result<Self, Error> {
        let locale = match &args.locale {
            Some(tag) => parse_locale(tag)?,
            None => get_system_locale(),
        };
        let color = !args.no_color && std::io::stdout().is_terminal();

        let mut ctx = RenderContext {
            week_offset: WeekOffset::SUNDAY,
            locale,
            color,
            theme: Theme::default(),
            today: get_today_date(),
            show_year_in_header: true,
            show_overflow: true,
            gutter_width: GUTTER_WIDTH_REGULAR,
            columns: ColumnsMode::Auto,
        };

        if let Command::Calendar(cal) = &args.command {
            ctx.week_offset = cal.week_offset()?;
            ctx.show_overflow = !cal.no_overflow;
            ctx.columns = match cal.columns.as_deref() {
                Some("auto") | None => ColumnsMode::Auto,
                Some(s) => {
                    let n = s
                        .parse::<u32>()
                        .map_err(|_| Error::Usage(format!("Invalid columns value: {}", s)))?;
                    if n == 0 {
                        return Err(Error::Usage("Columns must be positive".to_string()));
                    }
                    ColumnsMode::Fixed(n)
                }
            };
        }

        Ok(ctx)
    }
}

/// Get today's date, respecting NUMPAD_TEST_TIME environment variable for testing.
pub fn get_today_date() -> NaiveDate {
    if let Ok(test_time) = std::env::var("NUMPAD_TEST_TIME")
        && let Ok(date) = NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

/// Parse month from string: numeric 1-12, English name or abbreviation, or
/// the month name in `locale`.
pub fn parse_month(s: &str, locale: Locale) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    let s_lower = s.to_lowercase();
    let abbreviated = match s_lower.chars().count() {
        0..=2 => return None,
        3 => true,
        _ => false,
    };
    (1..=12).find(|&month| {
        [get_month_name(month, Locale::en_US), get_month_name(month, locale)]
            .iter()
            .map(|name| name.to_lowercase())
            .any(|name| name == s_lower || (abbreviated && name.starts_with(&s_lower)))
    })
}

fn parse_year(s: &str) -> Result<i32, Error> {
    let year = s
        .parse::<i32>()
        .map_err(|_| Error::InvalidYear(s.to_string()))?;
    if !(1..=9999).contains(&year) {
        return Err(Error::InvalidYear(format!("{} (must be 1-9999)", year)));
    }
    Ok(year)
}

/// First day of the month to display, from positional arguments.
///
/// Argument patterns:
/// - no args: the month of `today`
/// - 1 arg: year (4 digits, keeps today's month) or month
/// - 2 args: month year
pub fn get_display_month(
    args: &CalendarArgs,
    today: NaiveDate,
    locale: Locale,
) -> Result<NaiveDate, Error> {
    match (args.month_arg.as_deref(), args.year_arg.as_deref()) {
        (None, _) => month_start(today.year(), today.month()),
        (Some(val), None) => {
            if val.len() == 4
                && let Ok(year) = parse_year(val)
            {
                return month_start(year, today.month());
            }
            let month =
                parse_month(val, locale).ok_or_else(|| Error::InvalidMonth(val.to_string()))?;
            month_start(today.year(), month)
        }
        (Some(month), Some(year)) => {
            let month =
                parse_month(month, locale).ok_or_else(|| Error::InvalidMonth(month.to_string()))?;
            month_start(parse_year(year)?, month)
        }
    }
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::Parse {
        value: s.to_string(),
        format: "YYYY-MM-DD".to_string(),
    })
}
