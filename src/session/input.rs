use std::fmt;

use crate::engine::validate::{ClockStrategy, Section};

const CLOCK_FIELD_DIGITS: usize = 2;

#[derive(Clone, Debug)]
struct Field {
    section: Option<Section>,
    digits: String,
    max_digits: usize,
    max_value: u32,
}

impl Field {
    fn is_full(&self) -> bool {
        self.digits.len() >= self.max_digits
    }

    fn value(&self) -> Option<u32> {
        self.digits.parse().ok()
    }
}

/// Digits typed on a numeric keypad, split into one or more fields
/// (a single answer box, or `hh` and `mm` for a clock).
///
/// Digits that would overflow a field's length or its maximum value are
/// refused, so the validators never see input the keypad could not produce.
#[derive(Clone, Debug)]
pub struct EntryBuffer {
    fields: Vec<Field>,
    active: usize,
}

impl EntryBuffer {
    /// A single free-form answer of up to `max_digits` digits.
    pub fn for_answer(max_digits: usize) -> Self {
        let max_digits = max_digits.max(1);
        let max_value = 10u32
            .checked_pow(max_digits as u32)
            .map_or(u32::MAX, |p| p - 1);
        Self {
            fields: vec![Field {
                section: None,
                digits: String::new(),
                max_digits,
                max_value,
            }],
            active: 0,
        }
    }

    /// One two-digit field per clock section, capped by the strategy's
    /// input limits.
    pub fn for_clock(strategy: &ClockStrategy) -> Self {
        let fields = strategy
            .sections
            .iter()
            .map(|&section| Field {
                section: Some(section),
                digits: String::new(),
                max_digits: CLOCK_FIELD_DIGITS,
                max_value: strategy.input_limit(section),
            })
            .collect();
        Self { fields, active: 0 }
    }

    /// Append a digit to the active field. Once a field is full, entry moves
    /// on to the next one. Returns whether the digit was taken.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }
        let field = &mut self.fields[self.active];
        if field.is_full() {
            return false;
        }
        let candidate = format!("{}{digit}", field.digits);
        match candidate.parse::<u32>() {
            Ok(value) if value <= field.max_value => field.digits = candidate,
            _ => return false,
        }
        if field.is_full() && self.active + 1 < self.fields.len() {
            self.active += 1;
        }
        true
    }

    /// Remove the last digit, stepping back into the previous field when the
    /// active one is empty.
    pub fn backspace(&mut self) {
        if self.fields[self.active].digits.is_empty() && self.active > 0 {
            self.active -= 1;
        }
        self.fields[self.active].digits.pop();
    }

    /// Make `section` the active field. Returns false if there is no such
    /// field.
    pub fn focus(&mut self, section: Section) -> bool {
        match self.fields.iter().position(|f| f.section == Some(section)) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn active_section(&self) -> Option<Section> {
        self.fields[self.active].section
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|f| f.digits.is_empty())
    }

    /// Values of every field, or `None` while any field is still empty.
    pub fn submit(&self) -> Option<Vec<u32>> {
        self.fields.iter().map(Field::value).collect()
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.digits.clear();
        }
        self.active = 0;
    }
}

impl fmt::Display for EntryBuffer {
    /// Typed digits with `_` for every missing one, fields joined by `:`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{}", field.digits)?;
            for _ in field.digits.len()..field.max_digits {
                write!(f, "_")?;
            }
        }
        Ok(())
    }
}
