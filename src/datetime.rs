//! Date format masks and the keypad-driven date/time editor.
//!
//! Formats use moment-style tokens (`DD-MM-YYYY HH:mm`). A keypad fills
//! the numeric slots of the format left to right, so `HH:mm` turns the
//! digits `2145` into `21:45`.

use std::fmt;

use chrono::{Datelike, Locale, NaiveDate, NaiveDateTime, NaiveTime};

use crate::args::get_today_date;
use crate::error::Error;
use crate::keypad::Key;

/// Placeholder for a numeric slot that has not been typed yet.
pub const EMPTY_SLOT: char = '_';

/// Joins filled-in fields to the parsed text; never a format token.
const FILL_SEPARATOR: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Year4,
    Year2,
    MonthName,
    MonthShort,
    Month2,
    Day2,
    Hour2,
    Minute2,
    Second2,
}

impl Token {
    /// Number of keypad digits the token takes, `None` for textual tokens.
    pub fn digits(self) -> Option<usize> {
        match self {
            Token::Year4 => Some(4),
            Token::MonthName | Token::MonthShort => None,
            _ => Some(2),
        }
    }

    fn chrono_spec(self) -> &'static str {
        match self {
            Token::Year4 => "%Y",
            Token::Year2 => "%y",
            Token::MonthName => "%B",
            Token::MonthShort => "%b",
            Token::Month2 => "%m",
            Token::Day2 => "%d",
            Token::Hour2 => "%H",
            Token::Minute2 => "%M",
            Token::Second2 => "%S",
        }
    }

    fn is_date(self) -> bool {
        !matches!(self, Token::Hour2 | Token::Minute2 | Token::Second2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(Token),
    Literal(String),
}

/// Parsed date format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    segments: Vec<Segment>,
}

/// Value produced by an editor, depending on the fields of its format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeValue {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl DateTimeValue {
    fn as_datetime(self) -> NaiveDateTime {
        match self {
            DateTimeValue::Date(d) => d.and_time(NaiveTime::MIN),
            // Any date works, the format has no date fields
            DateTimeValue::Time(t) => NaiveDate::default().and_time(t),
            DateTimeValue::DateTime(dt) => dt,
        }
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeValue::Date(d) => write!(f, "{}", d),
            DateTimeValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            DateTimeValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl DateFormat {
    pub fn parse(pattern: &str) -> Result<Self, Error> {
        let invalid = |reason: String| Error::InvalidFormat {
            format: pattern.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '[' => {
                    let mut closed = false;
                    for escaped in chars.by_ref() {
                        if escaped == ']' {
                            closed = true;
                            break;
                        }
                        literal.push(escaped);
                    }
                    if !closed {
                        return Err(invalid("unterminated `[`".to_string()));
                    }
                }
                'Y' | 'M' | 'D' | 'H' | 'm' | 's' => {
                    let mut run = 1;
                    while chars.next_if_eq(&c).is_some() {
                        run += 1;
                    }
                    let token = match (c, run) {
                        ('Y', 4) => Token::Year4,
                        ('Y', 2) => Token::Year2,
                        ('M', 4) => Token::MonthName,
                        ('M', 3) => Token::MonthShort,
                        ('M', 2) => Token::Month2,
                        ('D', 2) => Token::Day2,
                        ('H', 2) => Token::Hour2,
                        ('m', 2) => Token::Minute2,
                        ('s', 2) => Token::Second2,
                        _ => {
                            return Err(invalid(format!(
                                "unsupported token `{}`",
                                c.to_string().repeat(run)
                            )));
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(token));
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if !segments.iter().any(|s| matches!(s, Segment::Field(_))) {
            return Err(invalid("no date or time fields".to_string()));
        }

        Ok(DateFormat {
            pattern: pattern.to_string(),
            segments,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(token) => Some(*token),
            Segment::Literal(_) => None,
        })
    }

    /// Equivalent chrono strftime string.
    pub fn to_chrono(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Field(token) => token.chrono_spec().to_string(),
                Segment::Literal(text) => text.replace('%', "%%"),
            })
            .collect()
    }

    /// Total number of digits a keypad can type into the format.
    pub fn digit_slots(&self) -> usize {
        self.tokens().filter_map(Token::digits).sum()
    }

    /// True when every field can be typed on a numeric keypad.
    pub fn is_numeric(&self) -> bool {
        self.tokens().all(|t| t.digits().is_some())
    }

    pub fn has_date(&self) -> bool {
        self.tokens().any(Token::is_date)
    }

    pub fn has_time(&self) -> bool {
        self.tokens().any(|t| !t.is_date())
    }

    /// Fill the numeric slots with `digits`, leaving `_` for missing ones.
    pub fn mask(&self, digits: &str) -> String {
        let mut digits = digits.chars().filter(char::is_ascii_digit);
        let mut out = String::with_capacity(self.pattern.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(token) => {
                    for _ in 0..token.digits().unwrap_or(0) {
                        out.push(digits.next().unwrap_or(EMPTY_SLOT));
                    }
                }
            }
        }
        out
    }

    pub fn format(&self, value: DateTimeValue, locale: Locale) -> String {
        let spec = self.to_chrono();
        value
            .as_datetime()
            .and_utc()
            .format_localized(&spec, locale)
            .to_string()
    }

    /// Parse `text` written in this format, taking missing fields from
    /// today; see [`DateFormat::parse_value_at`].
    pub fn parse_value(&self, text: &str) -> Result<DateTimeValue, Error> {
        self.parse_value_at(text, get_today_date())
    }

    /// Parse `text` written in this format.
    ///
    /// Fields the format leaves out are filled in: the year from `reference`,
    /// the month with January (or the reference month when the year is also
    /// missing), the day with 1 and missing time fields with 0. So `MM/YY`
    /// yields the first of the month and `HH` a full hour.
    pub fn parse_value_at(
        &self,
        text: &str,
        reference: NaiveDate,
    ) -> Result<DateTimeValue, Error> {
        let has = |wanted: &[Token]| self.tokens().any(|t| wanted.contains(&t));
        let has_year = has(&[Token::Year4, Token::Year2]);
        let has_month = has(&[Token::MonthName, Token::MonthShort, Token::Month2]);

        let mut spec = self.to_chrono();
        let mut input = text.to_string();
        let mut fill = |field: &str, value: String| {
            spec.push(FILL_SEPARATOR);
            spec.push_str(field);
            input.push(FILL_SEPARATOR);
            input.push_str(&value);
        };
        if self.has_date() {
            if !has_year {
                fill("%Y", reference.year().to_string());
            }
            if !has_month {
                let month = if has_year { 1 } else { reference.month() };
                fill("%m", format!("{:02}", month));
            }
            if !has(&[Token::Day2]) {
                fill("%d", "01".to_string());
            }
        }
        if self.has_time() {
            if !has(&[Token::Hour2]) {
                fill("%H", "00".to_string());
            }
            if !has(&[Token::Minute2]) {
                fill("%M", "00".to_string());
            }
        }

        let parse_error = || Error::Parse {
            value: text.to_string(),
            format: self.pattern.clone(),
        };
        match (self.has_date(), self.has_time()) {
            (true, true) => NaiveDateTime::parse_from_str(&input, &spec)
                .map(DateTimeValue::DateTime)
                .map_err(|_| parse_error()),
            (true, false) => NaiveDate::parse_from_str(&input, &spec)
                .map(DateTimeValue::Date)
                .map_err(|_| parse_error()),
            (false, _) => NaiveTime::parse_from_str(&input, &spec)
                .map(DateTimeValue::Time)
                .map_err(|_| parse_error()),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Keypad editor typing digits into a numeric date format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeEditor {
    format: DateFormat,
    digits: String,
}

impl DateTimeEditor {
    pub fn new(format: DateFormat) -> Result<Self, Error> {
        if !format.is_numeric() {
            return Err(Error::InvalidFormat {
                format: format.pattern.clone(),
                reason: "month names cannot be typed on a keypad".to_string(),
            });
        }
        Ok(DateTimeEditor {
            format,
            digits: String::new(),
        })
    }

    /// Seed the editor with an existing value written in `format`.
    pub fn with_value(format: DateFormat, text: &str) -> Result<Self, Error> {
        let value = format.parse_value(text)?;
        let digits = format
            .format(value, Locale::POSIX)
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let mut editor = DateTimeEditor::new(format)?;
        editor.digits = digits;
        Ok(editor)
    }

    pub fn format(&self) -> &DateFormat {
        &self.format
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Press a key; returns whether it was accepted.
    pub fn press(&mut self, key: Key) -> bool {
        match key {
            Key::Digit(_) if self.digits.len() < self.format.digit_slots() => {
                match key.digit_char() {
                    Some(digit) => {
                        self.digits.push(digit);
                        true
                    }
                    None => false,
                }
            }
            Key::Backspace => {
                self.digits.pop();
                true
            }
            Key::Clear => {
                self.digits.clear();
                true
            }
            _ => {
                log::debug!("rejected key {:?} for format `{}`", key, self.format);
                false
            }
        }
    }

    pub fn display(&self) -> String {
        self.format.mask(&self.digits)
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == self.format.digit_slots()
    }

    /// Typed value; fails while incomplete or when the digits are not a real date.
    pub fn value(&self) -> Result<DateTimeValue, Error> {
        let text = self.display();
        if !self.is_complete() {
            return Err(Error::Parse {
                value: text,
                format: self.format.pattern.clone(),
            });
        }
        self.format.parse_value(&text)
    }
}
