//! datacastle — load trivia questions into an embedded key-value store.
//!
//! Usage:
//!   datacastle                                  # ./jeopardy_questions.json → ./datacastle.db
//!   datacastle --input q.json --db out.db --key 0

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use datacastle::config::Config;
use datacastle::loader::load_questions;
use datacastle::store::QuestionStore;

#[derive(Parser)]
#[command(
    name = "datacastle",
    about = "Load trivia questions into an embedded key-value store",
    version
)]
struct Cli {
    /// Path to the JSON questions file.
    #[arg(long, default_value = "jeopardy_questions.json")]
    input: PathBuf,
    /// Path to the embedded database file.
    #[arg(long, default_value = "datacastle.db")]
    db: PathBuf,
    /// Key to read back and print after saving.
    #[arg(long, default_value_t = 1)]
    key: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config {
        questions_path: cli.input,
        db_path: cli.db,
        read_key: cli.key,
        ..Config::default()
    };

    let store = match QuestionStore::open(&cfg) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to open store");
            std::process::exit(1);
        }
    };

    let questions = match load_questions(&cfg.questions_path) {
        Ok(q) => q,
        Err(e) => {
            error!(error = %e, path = ?cfg.questions_path, "Failed to read questions file");
            std::process::exit(1);
        }
    };

    println!("Questions={}", questions.len());

    match store.save_questions(&questions) {
        Ok(written) => println!("Successfully saved {written} questions"),
        Err(e) => error!(error = %e, "Failed to save questions, nothing was written"),
    }

    match store.question_by_key(cfg.read_key) {
        Ok(value) => {
            let text = value
                .map(|v| String::from_utf8_lossy(&v).into_owned())
                .unwrap_or_default();
            println!("Question from DB: {text}");
        }
        Err(e) => error!(error = %e, key = cfg.read_key, "Failed to read question back"),
    }
}
