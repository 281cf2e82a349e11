use rand::Rng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::error::ConfigError;
use crate::generator::QuestionGenerator;
use crate::levels::LevelConfig;
use crate::question::{ArithmeticQuestion, Operator};

/// Builds arithmetic questions whose operands and running totals all stay
/// within `0..=range`.
#[derive(Clone, Debug)]
pub struct ArithmeticGenerator {
    config: LevelConfig,
    anti_trivial_chance: f64,
    operand_retries: u32,
    question_retries: u32,
}

impl ArithmeticGenerator {
    pub fn new(config: LevelConfig) -> Result<Self, ConfigError> {
        Self::with_settings(config, &Config::default())
    }

    pub fn with_settings(config: LevelConfig, settings: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        settings.validate()?;
        Ok(Self {
            config,
            anti_trivial_chance: settings.anti_trivial_chance,
            operand_retries: settings.operand_retries,
            question_retries: settings.question_retries,
        })
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Generate one question. With `anti_trivial` set, questions whose answer
    /// is 0 are redrawn and each operand draw tries to avoid 0 and 1. Both
    /// retry loops are bounded; when they run out the last draw is kept.
    pub fn generate_with(&self, anti_trivial: bool, rng: &mut SmallRng) -> ArithmeticQuestion {
        let mut question = self.draw(anti_trivial, rng);
        if anti_trivial {
            let mut attempts = 1;
            while question.answer == 0 && attempts < self.question_retries {
                question = self.draw(true, rng);
                attempts += 1;
            }
            if question.answer == 0 {
                tracing::warn!(
                    attempts,
                    range = self.config.range,
                    "anti-trivial retries exhausted, keeping zero answer"
                );
            }
        }
        tracing::debug!(
            %question,
            answer = question.answer,
            anti_trivial,
            "generated arithmetic question"
        );
        question
    }

    fn draw(&self, anti_trivial: bool, rng: &mut SmallRng) -> ArithmeticQuestion {
        let range = self.config.range;

        if self.config.is_multiplication() {
            let a = self.draw_operand(range, anti_trivial, rng);
            let b_max = if a > 0 { range / a } else { range };
            let b = self.draw_operand(b_max, anti_trivial, rng);
            return ArithmeticQuestion::new(vec![a, b], vec![Operator::Mul]);
        }

        let ops = &self.config.operations;
        let mut running = self.draw_operand(range, anti_trivial, rng);
        let mut operands = vec![running];
        let mut operators = Vec::with_capacity(self.config.operand_count() - 1);

        for _ in 1..self.config.operand_count() {
            let op = ops[rng.gen_range(0..ops.len())];
            let n = match op {
                Operator::Add => {
                    let n = self.draw_operand(range - running, anti_trivial, rng);
                    running += n;
                    n
                }
                Operator::Sub => {
                    let n = self.draw_operand(running, anti_trivial, rng);
                    running -= n;
                    n
                }
                Operator::Mul => unreachable!("validated levels never mix * with + or -"),
            };
            operators.push(op);
            operands.push(n);
        }

        ArithmeticQuestion::new(operands, operators)
    }

    /// Uniform draw from `0..=max`. In anti-trivial mode 0 and 1 are redrawn
    /// while a larger value is possible at all.
    fn draw_operand(&self, max: u32, avoid_trivial: bool, rng: &mut SmallRng) -> u32 {
        let mut n = rng.gen_range(0..=max);
        if !avoid_trivial || max < 2 {
            return n;
        }
        let mut attempts = 1;
        while n <= 1 && attempts < self.operand_retries {
            n = rng.gen_range(0..=max);
            attempts += 1;
        }
        n
    }
}

impl QuestionGenerator for ArithmeticGenerator {
    type Question = ArithmeticQuestion;

    /// Anti-trivial mode is switched on with the configured probability.
    fn generate(&self, rng: &mut SmallRng) -> ArithmeticQuestion {
        let anti_trivial = rng.gen_bool(self.anti_trivial_chance);
        self.generate_with(anti_trivial, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::partial_results;
    use rand::SeedableRng;

    fn generator(coefficients: u32, ops: &[Operator], range: u32) -> ArithmeticGenerator {
        ArithmeticGenerator::new(LevelConfig::new(coefficients, ops.to_vec(), range).unwrap())
            .unwrap()
    }

    fn sample_configs() -> Vec<ArithmeticGenerator> {
        vec![
            generator(2, &[Operator::Add], 10),
            generator(2, &[Operator::Sub], 10),
            generator(2, &[Operator::Add, Operator::Sub], 10),
            generator(4, &[Operator::Add, Operator::Sub], 20),
            generator(3, &[Operator::Add, Operator::Sub], 0),
            generator(2, &[Operator::Mul], 20),
            generator(2, &[Operator::Mul], 100),
        ]
    }

    #[test]
    fn test_running_totals_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for g in sample_configs() {
            let range = g.config().range as i64;
            for _ in 0..10_000 {
                let q = g.generate(&mut rng);
                for &n in &q.operands {
                    assert!(n as i64 <= range, "operand {n} out of range in {q}");
                }
                for total in partial_results(&q.operands, &q.operators) {
                    assert!((0..=range).contains(&total), "partial {total} out of range in {q}");
                }
                assert_eq!(q.operands.len(), q.operators.len() + 1);
            }
        }
    }

    #[test]
    fn test_multiplication_is_exclusive_and_binary() {
        let mut rng = SmallRng::seed_from_u64(7);
        let g = generator(5, &[Operator::Mul], 30);
        for _ in 0..1_000 {
            let q = g.generate(&mut rng);
            assert_eq!(q.operands.len(), 2);
            assert_eq!(q.operators, vec![Operator::Mul]);
            assert!(q.answer <= 30);
        }
    }

    #[test]
    fn test_additive_levels_use_configured_operand_count() {
        let mut rng = SmallRng::seed_from_u64(3);
        let g = generator(4, &[Operator::Add, Operator::Sub], 20);
        for _ in 0..100 {
            let q = g.generate(&mut rng);
            assert_eq!(q.operands.len(), 4);
            assert!(q.operators.iter().all(|op| *op != Operator::Mul));
        }
    }

    #[test]
    fn test_anti_trivial_avoids_zero_answers() {
        let mut rng = SmallRng::seed_from_u64(42);
        for g in [
            generator(2, &[Operator::Add, Operator::Sub], 10),
            generator(2, &[Operator::Sub], 10),
            generator(2, &[Operator::Mul], 20),
        ] {
            let zeros = (0..1_000)
                .filter(|_| g.generate_with(true, &mut rng).answer == 0)
                .count();
            assert!(zeros <= 5, "{zeros} zero answers out of 1000");
        }
    }

    #[test]
    fn test_anti_trivial_prefers_nontrivial_operands() {
        let mut rng = SmallRng::seed_from_u64(11);
        let g = generator(2, &[Operator::Add], 100);
        let first_trivial = (0..1_000)
            .filter(|_| g.generate_with(true, &mut rng).operands[0] <= 1)
            .count();
        assert_eq!(first_trivial, 0);
    }

    #[test]
    fn test_anti_trivial_gives_up_when_unavoidable() {
        // Only 0 is reachable; generation must still terminate.
        let mut rng = SmallRng::seed_from_u64(1);
        let g = generator(3, &[Operator::Add, Operator::Sub], 0);
        let q = g.generate_with(true, &mut rng);
        assert_eq!(q.answer, 0);
        assert_eq!(q.operands, vec![0, 0, 0]);
    }

    #[test]
    fn test_same_seed_same_question() {
        let g = generator(3, &[Operator::Add, Operator::Sub], 20);
        let a = g.generate(&mut SmallRng::seed_from_u64(99));
        let b = g.generate(&mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_refused() {
        let config = LevelConfig {
            coefficients: 2,
            operations: vec![],
            range: 10,
        };
        assert!(ArithmeticGenerator::new(config).is_err());
    }

    #[test]
    fn test_mixed_multiplication_never_reaches_generation() {
        let config = LevelConfig {
            coefficients: 3,
            operations: vec![Operator::Add, Operator::Mul],
            range: 10,
        };
        let err = ArithmeticGenerator::new(config).err().unwrap();
        assert!(matches!(err, ConfigError::MixedMultiplication));
    }
}
