use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for one load-store-read run.
///
/// The defaults reproduce the literals this tool has always used; the CLI
/// may override any of them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON file containing the question array.
    pub questions_path: PathBuf,
    /// Path to the embedded database file.
    pub db_path: PathBuf,
    /// Name of the table all questions are written into.
    pub table: String,
    /// Key read back and printed after the batch is saved.
    pub read_key: u64,
    /// How long to keep retrying if the database file is locked by
    /// another process before giving up.
    pub open_timeout: Duration,
}

fn default_questions_path() -> PathBuf {
    PathBuf::from("jeopardy_questions.json")
}
fn default_db_path() -> PathBuf {
    PathBuf::from("datacastle.db")
}
fn default_table() -> String {
    "questions".to_string()
}
fn default_read_key() -> u64 {
    1
}
fn default_open_timeout() -> Duration {
    Duration::from_secs(1)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_path: default_questions_path(),
            db_path: default_db_path(),
            table: default_table(),
            read_key: default_read_key(),
            open_timeout: default_open_timeout(),
        }
    }
}
