//! Keypad, date/time, calendar and appointment editors.
//!
//! Features:
//! - Fixed 6x7 month grids with overflow days and any first weekday
//! - Popup editor state with commit/discard semantics
//! - Numeric keypad with decimal, sign and custom validation rules
//! - Date/time masks typed digit by digit
//! - Paged appointment picker
//! - Localized, themable terminal rendering

pub mod appointment;
pub mod args;
pub mod calendar;
pub mod datetime;
pub mod error;
pub mod formatter;
pub mod keypad;
pub mod popup;
pub mod types;
