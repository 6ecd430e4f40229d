//! Numeric keypad editor.

use crate::error::Error;

/// Predicate over the candidate value; a key is accepted only if it holds.
pub type KeyValidator = fn(&str) -> bool;

/// How many fractional digits the editor accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decimal {
    Disabled,
    #[default]
    Unlimited,
    Places(u32),
}

impl From<bool> for Decimal {
    fn from(enabled: bool) -> Self {
        if enabled {
            Decimal::Unlimited
        } else {
            Decimal::Disabled
        }
    }
}

impl From<u32> for Decimal {
    fn from(places: u32) -> Self {
        match places {
            0 => Decimal::Disabled,
            n => Decimal::Places(n),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NumberOptions {
    pub decimal: Decimal,
    pub negative: bool,
    pub key_validator: Option<KeyValidator>,
}

impl Default for NumberOptions {
    fn default() -> Self {
        NumberOptions {
            decimal: Decimal::Unlimited,
            negative: true,
            key_validator: None,
        }
    }
}

/// A keypad key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    DecimalPoint,
    Minus,
    Backspace,
    Clear,
}

impl Key {
    /// Digit key, `None` unless `d` is 0-9.
    pub fn digit(d: u8) -> Option<Key> {
        (d <= 9).then_some(Key::Digit(d))
    }

    /// Character a digit key types; `None` for other keys and digits above 9.
    pub fn digit_char(self) -> Option<char> {
        match self {
            Key::Digit(d) => char::from_digit(u32::from(d), 10),
            _ => None,
        }
    }

    /// Key cap text; `None` for a digit above 9.
    pub fn label(self) -> Option<char> {
        match self {
            Key::Digit(_) => self.digit_char(),
            Key::DecimalPoint => Some('.'),
            Key::Minus => Some('-'),
            Key::Backspace => Some('<'),
            Key::Clear => Some('c'),
        }
    }
}

impl TryFrom<char> for Key {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0'..='9' => Ok(Key::Digit(c as u8 - b'0')),
            '.' | ',' => Ok(Key::DecimalPoint),
            '-' => Ok(Key::Minus),
            '<' => Ok(Key::Backspace),
            'c' | 'C' => Ok(Key::Clear),
            _ => Err(Error::Parse {
                value: c.to_string(),
                format: "keypad key".to_string(),
            }),
        }
    }
}

/// Parse a key sequence such as `"-12.5<"`.
pub fn parse_keys(keys: &str) -> Result<Vec<Key>, Error> {
    keys.chars()
        .filter(|c| !c.is_whitespace())
        .map(Key::try_from)
        .collect()
}

/// Value after pressing `key` on `value`, or `None` if the key is rejected
/// by the decimal and sign rules.
fn apply_key(options: &NumberOptions, value: &str, key: Key) -> Option<String> {
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };

    match key {
        Key::Digit(_) => {
            let digit = key.digit_char()?;
            if let Some((_, fraction)) = digits.split_once('.') {
                if let Decimal::Places(places) = options.decimal
                    && fraction.len() >= places as usize
                {
                    return None;
                }
                Some(format!("{value}{digit}"))
            } else if digits == "0" {
                Some(format!("{sign}{digit}"))
            } else {
                Some(format!("{value}{digit}"))
            }
        }
        Key::DecimalPoint => {
            if options.decimal == Decimal::Disabled || digits.contains('.') {
                None
            } else if digits.is_empty() {
                Some(format!("{sign}0."))
            } else {
                Some(format!("{value}."))
            }
        }
        Key::Minus => {
            if !options.negative {
                None
            } else if sign.is_empty() {
                Some(format!("-{digits}"))
            } else {
                Some(digits.to_string())
            }
        }
        Key::Backspace => {
            let mut next = value.to_string();
            next.pop();
            Some(next)
        }
        Key::Clear => Some(String::new()),
    }
}

/// Check whether `key` may be pressed on `value`.
pub fn key_valid(options: &NumberOptions, value: &str, key: Key) -> bool {
    candidate(options, value, key).is_some()
}

fn candidate(options: &NumberOptions, value: &str, key: Key) -> Option<String> {
    let next = apply_key(options, value, key)?;
    match (key, options.key_validator) {
        (Key::Backspace | Key::Clear, _) | (_, None) => Some(next),
        (_, Some(validator)) => validator(&next).then_some(next),
    }
}

/// Editing buffer of a numeric keypad.
#[derive(Debug, Clone)]
pub struct NumberEditor {
    options: NumberOptions,
    value: String,
}

impl NumberEditor {
    pub fn new(options: NumberOptions) -> Self {
        NumberEditor {
            options,
            value: String::new(),
        }
    }

    /// Start from an existing value, which must be representable with `options`.
    pub fn with_value(options: NumberOptions, initial: &str) -> Result<Self, Error> {
        // Intermediate prefixes may fail the validator; only the full value must pass
        let mut editor = NumberEditor::new(NumberOptions {
            key_validator: None,
            ..options
        });
        let parse_error = || Error::Parse {
            value: initial.to_string(),
            format: "number".to_string(),
        };

        let initial = initial.trim();
        let (negative, digits) = match initial.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, initial),
        };
        for c in digits.chars() {
            let key = Key::try_from(c).map_err(|_| parse_error())?;
            if matches!(key, Key::Minus | Key::Backspace | Key::Clear) || !editor.press(key) {
                return Err(parse_error());
            }
        }
        if negative && !editor.press(Key::Minus) {
            return Err(parse_error());
        }
        if let Some(validator) = options.key_validator
            && !validator(&editor.value)
        {
            return Err(parse_error());
        }
        editor.options = options;
        Ok(editor)
    }

    pub fn options(&self) -> &NumberOptions {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Press a key; returns whether it was accepted.
    pub fn press(&mut self, key: Key) -> bool {
        match candidate(&self.options, &self.value, key) {
            Some(next) => {
                self.value = next;
                true
            }
            None => {
                log::debug!("rejected key {:?} on `{}`", key, self.value);
                false
            }
        }
    }

    /// Value as typed, or `0` when empty.
    pub fn display(&self) -> &str {
        if self.value.is_empty() { "0" } else { &self.value }
    }

    pub fn number(&self) -> Option<f64> {
        self.value.parse().ok()
    }

    /// Normalized value to report on confirm, `None` if nothing usable was typed.
    pub fn confirm(&self) -> Option<String> {
        let value = self.value.trim_end_matches('.');
        match value {
            "" | "-" => None,
            "-0" => Some("0".to_string()),
            _ => Some(value.to_string()),
        }
    }
}
