use std::fmt;

use serde::Deserialize;

use crate::engine::validate::{ClockStrategy, strategy_for};
use crate::error::ConfigError;
use crate::question::Operator;

const BUILTIN_LEVELS: &str = include_str!("../assets/levels.toml");

/// One arithmetic level: how many operands, which operators, and the
/// largest number any operand or intermediate result may reach.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LevelConfig {
    pub coefficients: u32,
    pub operations: Vec<Operator>,
    pub range: u32,
}

impl LevelConfig {
    pub fn new(
        coefficients: u32,
        operations: Vec<Operator>,
        range: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            coefficients,
            operations,
            range,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coefficients < 2 {
            return Err(ConfigError::TooFewCoefficients {
                got: self.coefficients,
            });
        }
        if self.operations.is_empty() {
            return Err(ConfigError::NoOperations);
        }
        if self.is_multiplication() && self.operations.iter().any(|&op| op != Operator::Mul) {
            return Err(ConfigError::MixedMultiplication);
        }
        Ok(())
    }

    pub fn is_multiplication(&self) -> bool {
        self.operations.contains(&Operator::Mul)
    }

    /// Number of operands a question of this level carries.
    pub fn operand_count(&self) -> usize {
        if self.is_multiplication() {
            2
        } else {
            self.coefficients as usize
        }
    }

    pub fn describe(&self, level_number: usize) -> String {
        let mut names: Vec<&str> = Vec::new();
        for op in &self.operations {
            if !names.contains(&op.name()) {
                names.push(op.name());
            }
        }
        format!(
            "Level {level_number}: {} up to {}",
            names.join(", "),
            self.range
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    pub min_hour: u32,
    pub max_hour: u32,
    pub include_minutes: bool,
    pub minute_step: u32,
}

impl ClockConfig {
    pub fn new(
        min_hour: u32,
        max_hour: u32,
        include_minutes: bool,
        minute_step: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            min_hour,
            max_hour,
            include_minutes,
            minute_step,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_hour < 1 || self.max_hour > 12 || self.min_hour > self.max_hour {
            return Err(ConfigError::InvalidHourRange {
                min: self.min_hour,
                max: self.max_hour,
            });
        }
        if !(1..=60).contains(&self.minute_step) {
            return Err(ConfigError::InvalidMinuteStep(self.minute_step));
        }
        Ok(())
    }

    /// Number of distinct minute values a question can show.
    pub fn minute_slots(&self) -> u32 {
        60 / self.minute_step
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            min_hour: 1,
            max_hour: 12,
            include_minutes: false,
            minute_step: 5,
        }
    }
}

/// Clock level variants, keyed by the tag used in the level table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ClockMode {
    FullHours,
    HoursMinutes5,
}

impl ClockMode {
    /// Unknown tags fall back to full hours.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "hours-minutes-5" => ClockMode::HoursMinutes5,
            _ => ClockMode::FullHours,
        }
    }

    pub fn strategy(self) -> &'static ClockStrategy {
        strategy_for(self)
    }

    pub fn clock_config(self) -> ClockConfig {
        let strategy = self.strategy();
        ClockConfig {
            include_minutes: strategy.include_minutes,
            minute_step: strategy.minute_step,
            ..ClockConfig::default()
        }
    }

    pub fn describe(self, level_number: usize) -> String {
        match self {
            ClockMode::FullHours => {
                format!("Level {level_number}: Read the hour from the analog clock")
            }
            ClockMode::HoursMinutes5 => format!(
                "Level {level_number}: Read the hour and minutes from the analog clock"
            ),
        }
    }
}

impl From<String> for ClockMode {
    fn from(tag: String) -> Self {
        ClockMode::from_tag(&tag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKind {
    Math,
    Clock,
}

impl GameKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::Math => "math",
            GameKind::Clock => "clock",
        }
    }
}

/// Position of a level in the table. `index` is zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelId {
    pub game: GameKind,
    pub index: usize,
}

impl LevelId {
    pub fn new(game: GameKind, index: usize) -> Self {
        Self { game, index }
    }

    /// One-based number shown to the player.
    pub fn number(self) -> usize {
        self.index + 1
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.game.as_str(), self.number())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Level {
    Math(LevelConfig),
    Clock(ClockMode),
}

impl Level {
    pub fn describe(&self, level_number: usize) -> String {
        match self {
            Level::Math(config) => config.describe(level_number),
            Level::Clock(mode) => mode.describe(level_number),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ClockLevel {
    #[serde(rename = "type")]
    mode: ClockMode,
}

#[derive(Clone, Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    math: Vec<LevelConfig>,
    #[serde(default)]
    clock: Vec<ClockLevel>,
}

#[derive(Clone, Debug)]
pub struct LevelTable {
    pub math: Vec<LevelConfig>,
    pub clock: Vec<ClockMode>,
}

impl LevelTable {
    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_LEVELS)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawTable = toml::from_str(content)?;
        for level in &raw.math {
            level.validate()?;
        }
        Ok(Self {
            math: raw.math,
            clock: raw.clock.into_iter().map(|c| c.mode).collect(),
        })
    }

    pub fn len(&self, game: GameKind) -> usize {
        match game {
            GameKind::Math => self.math.len(),
            GameKind::Clock => self.clock.len(),
        }
    }

    pub fn ids(&self, game: GameKind) -> impl Iterator<Item = LevelId> {
        (0..self.len(game)).map(move |index| LevelId::new(game, index))
    }

    pub fn get(&self, id: LevelId) -> Result<Level, ConfigError> {
        let level = match id.game {
            GameKind::Math => self.math.get(id.index).cloned().map(Level::Math),
            GameKind::Clock => self.clock.get(id.index).copied().map(Level::Clock),
        };
        level.ok_or(ConfigError::UnknownLevel(id))
    }

    /// The level after `id`, or `None` when `id` is the last of its game.
    pub fn next(&self, id: LevelId) -> Option<LevelId> {
        let next = LevelId::new(id.game, id.index + 1);
        (next.index < self.len(id.game)).then_some(next)
    }
}
