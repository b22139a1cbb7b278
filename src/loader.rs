//! Question file loader.
//!
//! Reads the entire input file and parses it as one JSON array of questions.
//! An unreadable file is an error the caller treats as fatal; a file that
//! reads fine but does not parse yields an empty batch and the run continues
//! with zero records.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// One trivia question as it appears in the input file.
/// All fields are opaque text, stored exactly as found.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Question {
    /// Category title, e.g. "HISTORY".
    pub category: String,
    /// Original air date as a date-like string.
    pub air_date: String,
    /// The question text itself.
    pub question: String,
    /// Monetary value as printed on the board, e.g. "$400".
    pub value: String,
    /// Accepted answer text.
    pub answer: String,
    /// Round name, e.g. "Jeopardy!".
    pub round: String,
    /// Show number as a string.
    pub show_number: String,
}

/// Load all questions from the JSON array at `path`.
pub fn load_questions(path: &Path) -> Result<Vec<Question>> {
    let body = std::fs::read(path)?;

    match serde_json::from_slice::<Vec<Question>>(&body) {
        Ok(questions) => Ok(questions),
        Err(e) => {
            warn!(path = ?path, error = %e, "Questions file is not a valid JSON array, loading nothing");
            Ok(Vec::new())
        }
    }
}
