use rand::Rng;
use rand::rngs::SmallRng;

use crate::error::ConfigError;
use crate::generator::QuestionGenerator;
use crate::levels::ClockConfig;
use crate::question::ClockQuestion;

#[derive(Clone, Copy, Debug)]
pub struct ClockGenerator {
    config: ClockConfig,
}

impl ClockGenerator {
    pub fn new(config: ClockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }
}

impl QuestionGenerator for ClockGenerator {
    type Question = ClockQuestion;

    fn generate(&self, rng: &mut SmallRng) -> ClockQuestion {
        let c = &self.config;
        let hour = c.min_hour + rng.gen_range(0..=c.max_hour - c.min_hour);
        let minute = if c.include_minutes {
            c.minute_step * rng.gen_range(0..c.minute_slots())
        } else {
            0
        };
        let question = ClockQuestion { hour, minute };
        tracing::debug!(%question, "generated clock question");
        question
    }
}
