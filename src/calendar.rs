//! Month grid construction and calendar navigation.

use chrono::{Datelike, Days, Locale, Months, NaiveDate, Weekday};

use crate::datetime::{DateFormat, DateTimeEditor, DateTimeValue};
use crate::error::Error;
use crate::keypad::Key;
use crate::types::{CELLS_PER_MONTH, DAYS_PER_WEEK, DayCell, MonthGrid, WeekOffset};

/// Check if a year is a leap year (proleptic Gregorian rules).
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Number of days in `month` (1-12). Returns 0 for any other month number.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// First day of `month` in `year`.
pub fn month_start(year: i32, month: u32) -> Result<NaiveDate, Error> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth(month.to_string()));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(Error::DateOutOfRange)
}

/// Weekdays in column order for the given week offset.
pub fn weekday_order(week_offset: WeekOffset) -> [Weekday; DAYS_PER_WEEK] {
    std::array::from_fn(|column| week_offset.weekday_at(column))
}

impl MonthGrid {
    /// Build the 42-cell grid for the month starting at `start_of_month`.
    ///
    /// Leading cells come from the previous month so that the first day
    /// lands in the column of its weekday; trailing cells from the next
    /// month fill the grid up to six full weeks.
    pub fn build(start_of_month: NaiveDate, week_offset: WeekOffset) -> Result<Self, Error> {
        if start_of_month.day() != 1 {
            return Err(Error::NotMonthStart(start_of_month));
        }

        let diff = week_offset.column_of(start_of_month.weekday());
        let mut cells = Vec::with_capacity(CELLS_PER_MONTH);

        // Days of the previous month, oldest first
        let first_cell = start_of_month
            .checked_sub_days(Days::new(diff as u64))
            .ok_or(Error::DateOutOfRange)?;
        cells.extend(first_cell.iter_days().take(diff).map(DayCell::previous));

        let (year, month) = (start_of_month.year(), start_of_month.month());
        for day in 1..=days_in_month(year, month) {
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::DateOutOfRange)?;
            cells.push(DayCell::current(date));
        }

        // Pad to 42 cells (6 weeks)
        let mut date = cells.last().map_or(start_of_month, |c| c.date);
        while cells.len() < CELLS_PER_MONTH {
            date = date.succ_opt().ok_or(Error::DateOutOfRange)?;
            cells.push(DayCell::next(date));
        }

        log::trace!(
            "built grid for {year}-{month:02}: offset {}, {} leading, {} trailing",
            week_offset.get(),
            diff,
            CELLS_PER_MONTH - diff - days_in_month(year, month) as usize
        );

        Ok(MonthGrid {
            month_start: start_of_month,
            week_offset,
            cells,
        })
    }
}

/// Build the month grid for `start_of_month`; see [`MonthGrid::build`].
pub fn build_month_grid(
    start_of_month: NaiveDate,
    week_offset: WeekOffset,
) -> Result<MonthGrid, Error> {
    MonthGrid::build(start_of_month, week_offset)
}

/// Gesture moving the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    PrevMonth,
    NextMonth,
    PrevYear,
    NextYear,
    /// Same as `PrevMonth`.
    SwipeLeft,
    /// Same as `NextMonth`.
    SwipeRight,
}

/// State of a calendar editor: the selected day and the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub selected: NaiveDate,
    /// Always the first day of a month.
    pub month: NaiveDate,
}

impl CalendarView {
    pub fn new(current: NaiveDate) -> Self {
        CalendarView {
            selected: current,
            month: start_of_month(current),
        }
    }

    /// Move the displayed month. Out-of-range moves leave the view unchanged.
    pub fn navigate(self, navigation: Navigation) -> Self {
        let month = match navigation {
            Navigation::PrevMonth | Navigation::SwipeLeft => {
                self.month.checked_sub_months(Months::new(1))
            }
            Navigation::NextMonth | Navigation::SwipeRight => {
                self.month.checked_add_months(Months::new(1))
            }
            Navigation::PrevYear => self.month.checked_sub_months(Months::new(12)),
            Navigation::NextYear => self.month.checked_add_months(Months::new(12)),
        };

        match month {
            Some(month) => {
                log::debug!("calendar {:?}: {} -> {}", navigation, self.month, month);
                CalendarView { month, ..self }
            }
            None => self,
        }
    }

    /// Select a day without moving the displayed month.
    pub fn select(self, date: NaiveDate) -> Self {
        CalendarView {
            selected: date,
            ..self
        }
    }

    pub fn grid(&self, week_offset: WeekOffset) -> Result<MonthGrid, Error> {
        MonthGrid::build(self.month, week_offset)
    }
}

/// Calendar editor that completes the selected day with a time typed into a
/// time-only mask, e.g. `DD-MM-YYYY` followed by ` HH:mm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimePicker {
    view: CalendarView,
    date_format: DateFormat,
    time: DateTimeEditor,
}

impl DateTimePicker {
    pub fn new(
        selected: NaiveDate,
        date_format: DateFormat,
        time_format: DateFormat,
    ) -> Result<Self, Error> {
        if date_format.has_time() {
            return Err(Error::InvalidFormat {
                format: date_format.pattern().to_string(),
                reason: "date format has time fields".to_string(),
            });
        }
        if time_format.has_date() {
            return Err(Error::InvalidFormat {
                format: time_format.pattern().to_string(),
                reason: "time format has date fields".to_string(),
            });
        }
        Ok(DateTimePicker {
            view: CalendarView::new(selected),
            date_format,
            time: DateTimeEditor::new(time_format)?,
        })
    }

    /// Seed from `text` written as the date format followed by the time format.
    pub fn with_value(
        date_format: DateFormat,
        time_format: DateFormat,
        text: &str,
    ) -> Result<Self, Error> {
        let combined =
            DateFormat::parse(&format!("{}{}", date_format.pattern(), time_format.pattern()))?;
        let DateTimeValue::DateTime(value) = combined.parse_value(text)? else {
            return Err(Error::Parse {
                value: text.to_string(),
                format: combined.pattern().to_string(),
            });
        };

        let time_text = time_format.format(DateTimeValue::Time(value.time()), Locale::POSIX);
        let mut picker = DateTimePicker::new(value.date(), date_format, time_format)?;
        picker.time = DateTimeEditor::with_value(picker.time.format().clone(), &time_text)?;
        Ok(picker)
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn time_editor(&self) -> &DateTimeEditor {
        &self.time
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        self.view = self.view.navigate(navigation);
    }

    /// Select a day; the typed time is kept.
    pub fn select(&mut self, date: NaiveDate) {
        self.view = self.view.select(date);
    }

    /// Press a key on the time mask.
    pub fn press(&mut self, key: Key) -> bool {
        self.time.press(key)
    }

    pub fn is_complete(&self) -> bool {
        self.time.is_complete()
    }

    /// Selected day in the date format, followed by the time mask.
    pub fn display(&self, locale: Locale) -> String {
        let date = self
            .date_format
            .format(DateTimeValue::Date(self.view.selected), locale);
        format!("{}{}", date, self.time.display())
    }

    /// Selected day at the typed time; fails while the time is incomplete.
    pub fn value(&self) -> Result<DateTimeValue, Error> {
        match self.time.value()? {
            DateTimeValue::Time(time) => {
                Ok(DateTimeValue::DateTime(self.view.selected.and_time(time)))
            }
            DateTimeValue::Date(_) | DateTimeValue::DateTime(_) => Err(Error::InvalidFormat {
                format: self.time.format().pattern().to_string(),
                reason: "time format has date fields".to_string(),
            }),
        }
    }
}
