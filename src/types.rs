//! Type definitions and constants for the calendar grid and rendering.

use chrono::{Datelike, Locale, NaiveDate, Weekday};

use crate::error::Error;

/// Weekdays indexed from Sunday, the convention used by week offsets.
const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Weekday shown in the first column of a month grid (0 = Sunday, 6 = Saturday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekOffset(u8);

impl WeekOffset {
    pub const SUNDAY: WeekOffset = WeekOffset(0);
    pub const MONDAY: WeekOffset = WeekOffset(1);

    pub fn new(offset: u32) -> Result<Self, Error> {
        if offset < 7 {
            Ok(WeekOffset(offset as u8))
        } else {
            Err(Error::WeekOffsetOutOfRange(offset))
        }
    }

    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    pub fn first_weekday(self) -> Weekday {
        WEEKDAYS_FROM_SUNDAY[self.0 as usize]
    }

    /// Column (0-6) in which `weekday` is displayed.
    pub fn column_of(self, weekday: Weekday) -> usize {
        ((weekday.num_days_from_sunday() + 7 - self.get()) % 7) as usize
    }

    /// Weekday displayed in `column` (taken modulo 7).
    pub fn weekday_at(self, column: usize) -> Weekday {
        WEEKDAYS_FROM_SUNDAY[(self.0 as usize + column) % 7]
    }
}

impl From<Weekday> for WeekOffset {
    fn from(weekday: Weekday) -> Self {
        WeekOffset(weekday.num_days_from_sunday() as u8)
    }
}

impl TryFrom<u32> for WeekOffset {
    type Error = Error;

    fn try_from(offset: u32) -> Result<Self, Self::Error> {
        WeekOffset::new(offset)
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCell {
    pub date: NaiveDate,
    pub belongs_to_previous_month: bool,
    pub belongs_to_next_month: bool,
}

impl DayCell {
    pub fn previous(date: NaiveDate) -> Self {
        DayCell {
            date,
            belongs_to_previous_month: true,
            belongs_to_next_month: false,
        }
    }

    pub fn current(date: NaiveDate) -> Self {
        DayCell {
            date,
            belongs_to_previous_month: false,
            belongs_to_next_month: false,
        }
    }

    pub fn next(date: NaiveDate) -> Self {
        DayCell {
            date,
            belongs_to_previous_month: false,
            belongs_to_next_month: true,
        }
    }

    /// True for days borrowed from the adjacent months.
    pub fn is_overflow(&self) -> bool {
        self.belongs_to_previous_month || self.belongs_to_next_month
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Fixed 6 x 7 layout of a displayed month, overflow days included.
///
/// Built by [`MonthGrid::build`]; always holds exactly [`CELLS_PER_MONTH`]
/// cells in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub(crate) month_start: NaiveDate,
    pub(crate) week_offset: WeekOffset,
    pub(crate) cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn month_start(&self) -> NaiveDate {
        self.month_start
    }

    pub fn year(&self) -> i32 {
        self.month_start.year()
    }

    pub fn month(&self) -> u32 {
        self.month_start.month()
    }

    pub fn week_offset(&self) -> WeekOffset {
        self.week_offset
    }

    /// Rows of seven cells, top to bottom.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Number of cells taken from the previous month.
    pub fn leading_overflow(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| c.belongs_to_previous_month)
            .count()
    }

    /// Number of cells taken from the next month.
    pub fn trailing_overflow(&self) -> usize {
        self.cells
            .iter()
            .rev()
            .take_while(|c| c.belongs_to_next_month)
            .count()
    }

    /// Index of `date` in the grid, if it is displayed.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        let first = self.cells.first()?.date;
        let offset = date.signed_duration_since(first).num_days();
        usize::try_from(offset)
            .ok()
            .filter(|&idx| idx < self.cells.len())
    }
}

/// ANSI color palette used by the renderer.
///
/// Passed explicitly through [`RenderContext`] instead of living in globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub header: &'static str,
    pub weekdays: &'static str,
    pub selected: &'static str,
    pub today: &'static str,
    pub weekend: &'static str,
    pub overflow: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header: COLOR_TEAL,
            weekdays: COLOR_SAND_YELLOW,
            selected: COLOR_REVERSE,
            today: COLOR_UNDERLINE,
            weekend: COLOR_RED,
            overflow: COLOR_DIM,
        }
    }
}

/// Column display mode for multi-month layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnsMode {
    /// Fixed number of columns.
    Fixed(u32),
    /// Auto-detect from terminal width.
    Auto,
}

/// Rendering context containing all display options.
#[derive(Clone, Debug)]
pub struct RenderContext {
    /// Weekday shown in the first column.
    pub week_offset: WeekOffset,
    /// Locale for month and weekday names.
    pub locale: Locale,
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    pub theme: Theme,
    /// Today's date for highlighting.
    pub today: NaiveDate,
    /// Whether to show year in month headers.
    pub show_year_in_header: bool,
    /// Whether overflow days are printed or left blank.
    pub show_overflow: bool,
    /// Width of gutter between months in multi-month display.
    pub gutter_width: usize,
    pub columns: ColumnsMode,
}

// Constants for grid layout
pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_MONTH: usize = 6;
pub const CELLS_PER_MONTH: usize = DAYS_PER_WEEK * WEEKS_PER_MONTH;
pub const GRID_WIDTH: usize = 20;
pub const GUTTER_WIDTH_REGULAR: usize = 2;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_UNDERLINE: &str = "\x1b[4m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
