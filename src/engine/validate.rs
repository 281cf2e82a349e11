//! Canonical answer checks for every question type, plus the clock strategy
//! table that ties a clock level tag to its input sections and validator.
//!
//! Validators never fail: malformed or out-of-range input is simply wrong.

use crate::levels::ClockMode;
use crate::question::{ArithmeticQuestion, ClockQuestion};

/// Compare a typed answer against the question's answer. Anything that does
/// not parse as an integer is incorrect.
pub fn evaluate(question: &ArithmeticQuestion, input: &str) -> bool {
    input
        .trim()
        .parse::<i64>()
        .is_ok_and(|value| value == question.answer)
}

/// Hour-only check for an analog hour in 1..=12.
///
/// Accepts the 12h and 24h readings (`3` and `15` for 3 o'clock; `0`, `12`
/// and `24` for 12 o'clock). Hours 1..=9 also accept `hour * 10`, which is
/// what a two-digit keypad produces when the player types the hour digit
/// first and the entry is right-padded.
pub fn is_correct_hour(user_input: u32, analog_hour: u32) -> bool {
    if analog_hour == 12 {
        return matches!(user_input, 0 | 12 | 24);
    }
    if user_input == analog_hour || user_input == analog_hour + 12 {
        return true;
    }
    (1..=9).contains(&analog_hour) && user_input == analog_hour * 10
}

/// Position of an hour on the 12-hour face, with 12 mapped to 0.
fn fold_to_face(hour: u32) -> u32 {
    (hour % 24) % 12
}

/// Hour and minute check. Both hours are folded onto the 12-hour face before
/// comparing, so 12, 0 and 24 are the same hour and 14 matches 2. Minutes
/// must match exactly.
pub fn is_correct_time(
    user_hour: u32,
    user_minute: u32,
    analog_hour: u32,
    analog_minute: u32,
) -> bool {
    fold_to_face(user_hour) == fold_to_face(analog_hour) && user_minute == analog_minute
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Hours,
    Minutes,
}

pub struct ClockStrategy {
    pub mode: ClockMode,
    pub sections: &'static [Section],
    pub include_minutes: bool,
    pub minute_step: u32,
    /// Largest hour value accepted while typing.
    pub max_hour_input: u32,
    pub max_minute_input: u32,
    check: fn(&[u32], &ClockQuestion) -> bool,
}

impl ClockStrategy {
    /// Largest value a section accepts while the player is typing.
    pub fn input_limit(&self, section: Section) -> u32 {
        match section {
            Section::Hours => self.max_hour_input,
            Section::Minutes => self.max_minute_input,
        }
    }

    /// `values` holds one entry per section, in section order.
    pub fn is_correct(&self, values: &[u32], question: &ClockQuestion) -> bool {
        values.len() == self.sections.len() && (self.check)(values, question)
    }
}

fn check_hours(values: &[u32], question: &ClockQuestion) -> bool {
    is_correct_hour(values[0], question.hour)
}

fn check_hours_minutes(values: &[u32], question: &ClockQuestion) -> bool {
    is_correct_time(values[0], values[1], question.hour, question.minute)
}

static CLOCK_STRATEGIES: [ClockStrategy; 2] = [
    ClockStrategy {
        mode: ClockMode::FullHours,
        sections: &[Section::Hours],
        include_minutes: false,
        minute_step: 5,
        // 0..=99 so the padded `hour * 10` form can be typed.
        max_hour_input: 99,
        max_minute_input: 59,
        check: check_hours,
    },
    ClockStrategy {
        mode: ClockMode::HoursMinutes5,
        sections: &[Section::Hours, Section::Minutes],
        include_minutes: true,
        minute_step: 5,
        max_hour_input: 24,
        max_minute_input: 59,
        check: check_hours_minutes,
    },
];

pub fn strategy_for(mode: ClockMode) -> &'static ClockStrategy {
    CLOCK_STRATEGIES
        .iter()
        .find(|s| s.mode == mode)
        .unwrap_or(&CLOCK_STRATEGIES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Operator;

    #[test]
    fn test_evaluate_accepts_answer_text() {
        let q = ArithmeticQuestion::new(vec![7, 5], vec![Operator::Sub]);
        assert!(evaluate(&q, "2"));
        assert!(evaluate(&q, " 2 "));
        assert!(!evaluate(&q, "3"));
    }

    #[test]
    fn test_evaluate_rejects_malformed_input() {
        let q = ArithmeticQuestion::new(vec![0, 0], vec![Operator::Add]);
        assert!(!evaluate(&q, ""));
        assert!(!evaluate(&q, "zero"));
        assert!(!evaluate(&q, "0.0"));
        assert!(!evaluate(&q, "99999999999999999999999"));
        assert!(evaluate(&q, "0"));
    }

    #[test]
    fn test_hour_acceptance() {
        assert!(is_correct_hour(3, 3));
        assert!(is_correct_hour(15, 3));
        assert!(is_correct_hour(30, 3));
        assert!(is_correct_hour(0, 12));
        assert!(is_correct_hour(12, 12));
        assert!(is_correct_hour(24, 12));
        assert!(!is_correct_hour(4, 3));
    }

    #[test]
    fn test_hour_padding_quirk_only_for_single_digits() {
        assert!(is_correct_hour(90, 9));
        assert!(!is_correct_hour(100, 10));
        assert!(!is_correct_hour(110, 11));
        assert!(!is_correct_hour(120, 12));
        assert!(is_correct_hour(22, 10));
    }

    #[test]
    fn test_hour_out_of_range_is_just_wrong() {
        assert!(!is_correct_hour(99, 3));
        assert!(!is_correct_hour(36, 12));
    }

    #[test]
    fn test_time_acceptance() {
        assert!(is_correct_time(14, 30, 2, 30));
        assert!(is_correct_time(2, 30, 2, 30));
        assert!(!is_correct_time(2, 35, 2, 30));
        assert!(!is_correct_time(3, 30, 2, 30));
    }

    #[test]
    fn test_time_twelve_folds_on_both_sides() {
        assert!(is_correct_time(12, 0, 12, 0));
        assert!(is_correct_time(0, 0, 12, 0));
        assert!(is_correct_time(24, 0, 12, 0));
        assert!(!is_correct_time(12, 0, 1, 0));
    }

    #[test]
    fn test_time_large_hours_reduce_mod_24() {
        assert!(is_correct_time(26, 15, 2, 15));
        assert!(!is_correct_time(2, 60, 2, 0));
    }

    #[test]
    fn test_strategy_table_lookup() {
        let full = strategy_for(ClockMode::FullHours);
        assert_eq!(full.sections, &[Section::Hours]);
        assert_eq!(full.input_limit(Section::Hours), 99);

        let minutes = strategy_for(ClockMode::HoursMinutes5);
        assert_eq!(minutes.sections, &[Section::Hours, Section::Minutes]);
        assert_eq!(minutes.input_limit(Section::Hours), 24);
        assert_eq!(minutes.input_limit(Section::Minutes), 59);
        assert!(minutes.include_minutes);
    }

    #[test]
    fn test_strategy_checks() {
        let q = ClockQuestion { hour: 4, minute: 25 };
        let full = strategy_for(ClockMode::FullHours);
        assert!(full.is_correct(&[40], &q));
        assert!(!full.is_correct(&[4, 25], &q));

        let minutes = strategy_for(ClockMode::HoursMinutes5);
        assert!(minutes.is_correct(&[16, 25], &q));
        assert!(!minutes.is_correct(&[16], &q));
        assert!(!minutes.is_correct(&[16, 20], &q));
    }
}
