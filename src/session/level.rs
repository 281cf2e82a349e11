use std::fmt;

use rand::rngs::SmallRng;

use crate::config::Config;
use crate::engine::progress::{LevelExit, Phase, ProgressEvent, ProgressSnapshot, ProgressTracker};
use crate::engine::validate::{self, ClockStrategy};
use crate::error::ConfigError;
use crate::event::{InputChannel, InputEvent};
use crate::generator::QuestionGenerator;
use crate::generator::arithmetic::ArithmeticGenerator;
use crate::generator::clock::ClockGenerator;
use crate::levels::{Level, LevelId, LevelTable};
use crate::question::{ArithmeticQuestion, ClockQuestion};
use crate::session::input::EntryBuffer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Question {
    Math(ArithmeticQuestion),
    Clock(ClockQuestion),
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Question::Math(q) => fmt::Display::fmt(q, f),
            Question::Clock(q) => fmt::Display::fmt(q, f),
        }
    }
}

enum Game {
    Math(ArithmeticGenerator),
    Clock {
        generator: ClockGenerator,
        strategy: &'static ClockStrategy,
    },
}

impl Game {
    fn next_question(&self, rng: &mut SmallRng) -> Question {
        match self {
            Game::Math(generator) => Question::Math(generator.generate(rng)),
            Game::Clock { generator, .. } => Question::Clock(generator.generate(rng)),
        }
    }

    fn entry_buffer(&self) -> EntryBuffer {
        match self {
            Game::Math(generator) => {
                let range = generator.config().range;
                EntryBuffer::for_answer(range.to_string().len())
            }
            Game::Clock { strategy, .. } => EntryBuffer::for_clock(strategy),
        }
    }
}

/// Result of one accepted submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub event: Option<ProgressEvent>,
}

/// One running level: the live question, the player's typed entry and the
/// level's progress. Exactly one question is live at a time; a new one is
/// drawn only after the current one is answered correctly or the level is
/// restarted.
pub struct LevelSession {
    id: LevelId,
    level: Level,
    game: Game,
    question: Question,
    entry: EntryBuffer,
    tracker: ProgressTracker,
    input: Option<InputChannel>,
    rng: SmallRng,
}

impl LevelSession {
    pub fn new(
        table: &LevelTable,
        id: LevelId,
        config: &Config,
        mut rng: SmallRng,
    ) -> Result<Self, ConfigError> {
        let level = table.get(id)?;
        let game = match &level {
            Level::Math(level_config) => {
                Game::Math(ArithmeticGenerator::with_settings(level_config.clone(), config)?)
            }
            Level::Clock(mode) => Game::Clock {
                generator: ClockGenerator::new(mode.clock_config())?,
                strategy: mode.strategy(),
            },
        };
        let tracker = ProgressTracker::from_config(config)?;
        let question = game.next_question(&mut rng);
        let entry = game.entry_buffer();
        tracing::debug!(level = %id, "level session started");

        Ok(Self {
            id,
            level,
            game,
            question,
            entry,
            tracker,
            input: None,
            rng,
        })
    }

    pub fn id(&self) -> LevelId {
        self.id
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn description(&self) -> String {
        self.level.describe(self.id.number())
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn entry(&self) -> &EntryBuffer {
        &self.entry
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn phase(&self) -> Phase {
        self.tracker.phase()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.tracker.snapshot()
    }

    /// Check a typed answer. Math answers are a plain integer; clock answers
    /// are `hh` or `hh:mm`. Anything malformed counts as a wrong answer.
    /// Returns `None` for blank input, which is not yet an answer, and once
    /// the level has ended.
    pub fn submit_text(&mut self, input: &str) -> Option<SubmitOutcome> {
        if input.trim().is_empty() {
            return None;
        }
        let correct = match (&self.question, &self.game) {
            (Question::Math(q), _) => validate::evaluate(q, input),
            (Question::Clock(q), Game::Clock { strategy, .. }) => parse_clock_text(input)
                .is_some_and(|values| strategy.is_correct(&values, q)),
            (Question::Clock(_), Game::Math(_)) => false,
        };
        self.record(correct)
    }

    /// Check one value per input field.
    pub fn submit_values(&mut self, values: &[u32]) -> Option<SubmitOutcome> {
        let correct = match (&self.question, &self.game) {
            (Question::Math(q), _) => {
                matches!(values, [value] if i64::from(*value) == q.answer)
            }
            (Question::Clock(q), Game::Clock { strategy, .. }) => strategy.is_correct(values, q),
            (Question::Clock(_), Game::Math(_)) => false,
        };
        self.record(correct)
    }

    /// Submit what has been typed so far. Returns `None` without touching
    /// progress while any field is still empty.
    pub fn submit_entry(&mut self) -> Option<SubmitOutcome> {
        let values = self.entry.submit()?;
        let outcome = self.submit_values(&values);
        self.entry.clear();
        outcome
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<SubmitOutcome> {
        if !self.tracker.is_active() {
            return None;
        }
        match event {
            InputEvent::Digit(d) => {
                self.entry.push_digit(d);
                None
            }
            InputEvent::Backspace => {
                self.entry.backspace();
                None
            }
            InputEvent::Focus(section) => {
                self.entry.focus(section);
                None
            }
            InputEvent::Submit => self.submit_entry(),
        }
    }

    /// Take ownership of the input channel. Any channel attached before is
    /// handed back so only one is ever live.
    pub fn attach_input(&mut self, channel: InputChannel) -> Option<InputChannel> {
        self.input.replace(channel)
    }

    pub fn detach_input(&mut self) -> Option<InputChannel> {
        self.input.take()
    }

    /// Apply every queued input event and collect the submission outcomes.
    pub fn pump(&mut self) -> Vec<SubmitOutcome> {
        let Some(channel) = self.input.take() else {
            return Vec::new();
        };
        let outcomes: Vec<SubmitOutcome> = channel
            .pending()
            .filter_map(|event| self.handle(event))
            .collect();
        self.input = Some(channel);
        outcomes
    }

    /// Start the level over with a fresh question.
    pub fn restart(&mut self) -> ProgressEvent {
        let event = self.tracker.reset();
        self.question = self.game.next_question(&mut self.rng);
        self.entry.clear();
        event
    }

    /// Leave a completed level; see [`ProgressTracker::advance`].
    pub fn advance(&mut self, table: &LevelTable) -> Option<LevelExit> {
        let exit = self.tracker.advance(table.next(self.id))?;
        self.question = self.game.next_question(&mut self.rng);
        self.entry.clear();
        tracing::info!(level = %self.id, navigation = ?exit.navigation, "leaving level");
        Some(exit)
    }

    fn record(&mut self, correct: bool) -> Option<SubmitOutcome> {
        if !self.tracker.is_active() {
            return None;
        }
        let event = if correct {
            self.tracker.correct()
        } else {
            self.tracker.incorrect()
        };
        if correct && self.tracker.is_active() {
            self.question = self.game.next_question(&mut self.rng);
        }
        Some(SubmitOutcome { correct, event })
    }
}

fn parse_clock_text(input: &str) -> Option<Vec<u32>> {
    input
        .trim()
        .split(':')
        .map(|part| part.trim().parse().ok())
        .collect()
}
