pub mod arithmetic;
pub mod clock;

use rand::rngs::SmallRng;

pub trait QuestionGenerator {
    type Question;

    fn generate(&self, rng: &mut SmallRng) -> Self::Question;
}
