use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
}

impl Operator {
    /// Symbol shown to the player.
    pub fn display_symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "Addition",
            Operator::Sub => "Subtraction",
            Operator::Mul => "Multiplication",
        }
    }

    pub fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
        }
    }
}

/// Running totals of a left-to-right evaluation, starting with the first
/// operand. There is no operator precedence.
pub fn partial_results(operands: &[u32], operators: &[Operator]) -> Vec<i64> {
    let Some(&first) = operands.first() else {
        return Vec::new();
    };
    let mut running = first as i64;
    let mut totals = vec![running];
    for (op, &rhs) in operators.iter().zip(&operands[1..]) {
        running = op.apply(running, rhs as i64);
        totals.push(running);
    }
    totals
}

/// Strict left-to-right fold of `operators` over `operands`.
pub fn fold_left_to_right(operands: &[u32], operators: &[Operator]) -> i64 {
    partial_results(operands, operators)
        .last()
        .copied()
        .unwrap_or(0)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithmeticQuestion {
    pub operands: Vec<u32>,
    pub operators: Vec<Operator>,
    pub answer: i64,
}

impl ArithmeticQuestion {
    pub fn new(operands: Vec<u32>, operators: Vec<Operator>) -> Self {
        debug_assert_eq!(operands.len(), operators.len() + 1);
        let answer = fold_left_to_right(&operands, &operators);
        Self {
            operands,
            operators,
            answer,
        }
    }

    pub fn is_multiplication(&self) -> bool {
        self.operators.contains(&Operator::Mul)
    }
}

impl fmt::Display for ArithmeticQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.operators[i - 1].display_symbol())?;
            }
            write!(f, "{n}")?;
        }
        write!(f, " =")
    }
}

/// A time shown on an analog face. `hour` is always 1..=12.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockQuestion {
    pub hour: u32,
    pub minute: u32,
}

impl fmt::Display for ClockQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
