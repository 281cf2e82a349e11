use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::json;

use kidquiz::config::Config;
use kidquiz::engine::progress::Navigation;
use kidquiz::levels::{GameKind, Level, LevelId, LevelTable};
use kidquiz::session::level::{LevelSession, Question};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Game {
    Math,
    Clock,
}

impl From<Game> for GameKind {
    fn from(game: Game) -> Self {
        match game {
            Game::Math => GameKind::Math,
            Game::Clock => GameKind::Clock,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "level_preview",
    version,
    about = "Print sample questions for a level of the built-in level table"
)]
struct Cli {
    #[arg(short, long, value_enum, default_value = "math", help = "Game to preview")]
    game: Game,

    #[arg(short, long, default_value_t = 1, help = "Level number, starting at 1")]
    level: usize,

    #[arg(short = 'n', long, default_value_t = 10, help = "Number of questions")]
    count: usize,

    #[arg(short, long, help = "Seed for reproducible output")]
    seed: Option<u64>,

    #[arg(short, long, help = "Config file (defaults to the user config dir)")]
    config: Option<PathBuf>,

    #[arg(long, help = "List every level and exit")]
    list: bool,

    #[arg(long, help = "Answer each question correctly and print progress as JSON")]
    play: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kidquiz=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;
    let table = LevelTable::builtin()?;

    if cli.list {
        for game in [GameKind::Math, GameKind::Clock] {
            for id in table.ids(game) {
                println!("{id:<8} {}", table.get(id)?.describe(id.number()));
            }
        }
        return Ok(());
    }

    if cli.level == 0 {
        bail!("level numbers start at 1");
    }
    let id = LevelId::new(cli.game.into(), cli.level - 1);
    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut session = LevelSession::new(&table, id, &config, rng)?;
    println!("{}", session.description());

    if cli.play {
        play(&mut session, &table, cli.count)
    } else {
        preview(&mut session, cli.count);
        Ok(())
    }
}

fn answer_text(session: &LevelSession) -> String {
    match (session.question(), session.level()) {
        (Question::Math(q), _) => q.answer.to_string(),
        (Question::Clock(q), Level::Clock(mode)) if mode.strategy().include_minutes => {
            q.to_string()
        }
        (Question::Clock(q), _) => q.hour.to_string(),
    }
}

/// Print questions with their answers. Each correct submission draws the
/// next question; the level is restarted whenever it completes.
fn preview(session: &mut LevelSession, count: usize) {
    for _ in 0..count {
        let question = session.question().to_string();
        let answer = answer_text(session);
        println!("{question:<20} {answer}");
        if session.submit_text(&answer).is_none() || !session.tracker().is_active() {
            session.restart();
        }
    }
}

fn play(session: &mut LevelSession, table: &LevelTable, count: usize) -> Result<()> {
    for _ in 0..count {
        let question = session.question().to_string();
        let answer = answer_text(session);
        let outcome = session.submit_text(&answer);
        let record = json!({
            "question": question,
            "answer": answer,
            "correct": outcome.map(|o| o.correct),
            "event": outcome.and_then(|o| o.event),
            "progress": session.snapshot(),
        });
        println!("{}", serde_json::to_string(&record)?);

        if let Some(exit) = session.advance(table) {
            match exit.navigation {
                Navigation::NextLevel(next) => println!("next level: {next}"),
                Navigation::LevelSelect => println!("back to level select"),
            }
            break;
        }
    }
    Ok(())
}
