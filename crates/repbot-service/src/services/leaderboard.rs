//! Leaderboard formatting
//!
//! Pure functions that turn score rows and log entries into reply text and
//! CSV exports.

use std::collections::BTreeMap;

use repbot_core::entities::{ScoreLogEntry, UserScore};

/// Discord rejects messages longer than this many characters
pub const MAX_MESSAGE_CHARS: usize = 2000;

pub const NO_SCORES_MESSAGE: &str = "No scores recorded yet.";
pub const NO_SCORES_IN_RANGE_MESSAGE: &str = "No scores recorded in that date range.";

/// Format `(username, score)` rows as `"{rank}. {username} - {score}"` lines.
///
/// Lines that would push the message past [`MAX_MESSAGE_CHARS`] are dropped.
pub fn format_ranked<'a>(rows: impl IntoIterator<Item = (&'a str, i64)>) -> String {
    let mut out = String::new();
    let mut chars = 0;

    for (rank, (username, score)) in rows.into_iter().enumerate() {
        let line = format!("{}. {username} - {score}", rank + 1);
        let needed = line.chars().count() + usize::from(!out.is_empty());
        if chars + needed > MAX_MESSAGE_CHARS {
            break;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&line);
        chars += needed;
    }

    out
}

/// Ranked list of running scores
pub fn format_scores(scores: &[UserScore]) -> String {
    format_ranked(scores.iter().map(|s| (s.username.as_str(), s.score)))
}

/// Sum log entries per scored username, highest total first.
///
/// Equal totals are ordered by username. Totals saturate at the `i64` bounds.
pub fn fold_range_totals(logs: &[ScoreLogEntry]) -> Vec<(String, i64)> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for entry in logs {
        let total = totals.entry(entry.scored_username.as_str()).or_default();
        *total = total.saturating_add(entry.delta);
    }

    let mut totals: Vec<(String, i64)> = totals
        .into_iter()
        .map(|(username, total)| (username.to_string(), total))
        .collect();
    // BTreeMap iteration already sorted by username; stable sort keeps that for ties
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// CSV export of every score, one row per user in rank order
pub fn scores_csv(scores: &[UserScore]) -> String {
    let mut csv = String::from("rank,user_id,username,score\n");
    for (rank, score) in scores.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            rank + 1,
            score.user_id,
            csv_field(&score.username),
            score.score
        ));
    }
    csv
}
