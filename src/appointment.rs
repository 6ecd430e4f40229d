//! Appointment picker over a set of bookable date/time slots.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::datetime::{DateFormat, DateTimeValue};
use crate::error::Error;

/// Default number of days shown on one page of the picker.
pub const DAYS_PER_PAGE: usize = 4;

/// Bookable slots grouped by day, times sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentBook {
    slots: BTreeMap<NaiveDate, Vec<NaiveTime>>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: NaiveDateTime) {
        let times = self.slots.entry(slot.date()).or_default();
        if let Err(idx) = times.binary_search(&slot.time()) {
            times.insert(idx, slot.time());
        }
    }

    /// Build a book from slot strings written in `format`, which must carry
    /// both a date and a time.
    pub fn parse<S: AsRef<str>>(entries: &[S], format: &DateFormat) -> Result<Self, Error> {
        entries
            .iter()
            .map(|entry| match format.parse_value(entry.as_ref())? {
                DateTimeValue::DateTime(slot) => Ok(slot),
                _ => Err(Error::InvalidFormat {
                    format: format.pattern().to_string(),
                    reason: "appointments need both a date and a time".to_string(),
                }),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Days with at least one slot, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.keys().copied()
    }

    pub fn times(&self, date: NaiveDate) -> &[NaiveTime] {
        self.slots.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_available(&self, slot: NaiveDateTime) -> bool {
        self.times(slot.date()).binary_search(&slot.time()).is_ok()
    }

    /// Up to `days` bookable days on or after `from`, with their times.
    pub fn page(&self, from: NaiveDate, days: usize) -> Vec<(NaiveDate, &[NaiveTime])> {
        self.slots
            .range(from..)
            .take(days)
            .map(|(date, times)| (*date, times.as_slice()))
            .collect()
    }
}

impl FromIterator<NaiveDateTime> for AppointmentBook {
    fn from_iter<I: IntoIterator<Item = NaiveDateTime>>(iter: I) -> Self {
        let mut book = AppointmentBook::new();
        for slot in iter {
            book.insert(slot);
        }
        book
    }
}

/// Paging and selection state of an appointment editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentPicker {
    book: AppointmentBook,
    days_per_page: usize,
    page: usize,
    selection: Option<NaiveDateTime>,
}

impl AppointmentPicker {
    pub fn new(book: AppointmentBook, days_per_page: usize) -> Self {
        AppointmentPicker {
            book,
            days_per_page: days_per_page.max(1),
            page: 0,
            selection: None,
        }
    }

    pub fn book(&self) -> &AppointmentBook {
        &self.book
    }

    /// Drop the days before `date` and open on the first page.
    pub fn starting_at(mut self, date: NaiveDate) -> Self {
        self.book.slots = self.book.slots.split_off(&date);
        self.page = 0;
        if self.selection.is_some_and(|slot| slot.date() < date) {
            self.selection = None;
        }
        self
    }

    fn page_count(&self) -> usize {
        self.book.slots.len().div_ceil(self.days_per_page)
    }

    pub fn page_index(&self) -> usize {
        self.page
    }

    pub fn current_page(&self) -> Vec<(NaiveDate, &[NaiveTime])> {
        self.book
            .slots
            .iter()
            .skip(self.page * self.days_per_page)
            .take(self.days_per_page)
            .map(|(date, times)| (*date, times.as_slice()))
            .collect()
    }

    /// Move to the next page; stays on the last one.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn select(&mut self, slot: NaiveDateTime) -> Result<(), Error> {
        if !self.book.is_available(slot) {
            return Err(Error::SlotUnavailable(slot));
        }
        log::debug!("appointment {} selected", slot);
        self.selection = Some(slot);
        Ok(())
    }

    pub fn selection(&self) -> Option<NaiveDateTime> {
        self.selection
    }
}
