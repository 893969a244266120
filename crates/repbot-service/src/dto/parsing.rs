//! Parsing of command option text into typed values

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use repbot_core::entities::EmojiScores;

use crate::services::{ServiceError, ServiceResult};

/// Largest magnitude a single emoji may add to or remove from a score
pub const MAX_EMOJI_SCORE: i64 = 1_000_000;

/// Non-empty, trimmed segments of a comma-separated list
fn segments(csv: &str) -> impl Iterator<Item = &str> {
    csv.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a comma-separated list of usernames, tags or ids
pub fn parse_allowed_users(csv: &str) -> ServiceResult<Vec<String>> {
    let users: Vec<String> = segments(csv).map(String::from).collect();
    if users.is_empty() {
        return Err(ServiceError::validation("allowed_users must not be empty"));
    }
    Ok(users)
}

/// Parse `emoji=score` pairs, e.g. `👍=1,👎=-1`. A repeated emoji keeps its last score.
pub fn parse_emoji_scores(csv: &str) -> ServiceResult<EmojiScores> {
    let mut scores = EmojiScores::new();

    for segment in segments(csv) {
        let Some((emoji, score)) = segment.split_once('=') else {
            return Err(ServiceError::validation(format!(
                "Invalid emoji score `{segment}`: expected emoji=score"
            )));
        };

        let emoji = emoji.trim();
        if emoji.is_empty() {
            return Err(ServiceError::validation(format!(
                "Invalid emoji score `{segment}`: emoji is empty"
            )));
        }

        let score = score.trim();
        let delta = score.parse::<i64>().map_err(|_| {
            ServiceError::validation(format!(
                "Invalid emoji score `{segment}`: `{score}` is not an integer"
            ))
        })?;
        if !(-MAX_EMOJI_SCORE..=MAX_EMOJI_SCORE).contains(&delta) {
            return Err(ServiceError::validation(format!(
                "Invalid emoji score `{segment}`: must be between -{MAX_EMOJI_SCORE} and {MAX_EMOJI_SCORE}"
            )));
        }

        scores.insert(emoji.to_string(), delta);
    }

    if scores.is_empty() {
        return Err(ServiceError::validation("emoji_scores must not be empty"));
    }
    Ok(scores)
}

fn parse_date(text: &str) -> ServiceResult<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ServiceError::validation(format!("Invalid date `{text}`: expected YYYY-MM-DD")))
}

/// Parse an inclusive day range into UTC bounds: the start of the first day
/// through the last microsecond of the last day
pub fn parse_date_range(start: &str, end: &str) -> ServiceResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    if start > end {
        return Err(ServiceError::validation("start_date must not be after end_date"));
    }

    let last_instant = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
        .ok_or_else(|| ServiceError::internal("invalid end-of-day time"))?;

    Ok((
        start.and_time(NaiveTime::MIN).and_utc(),
        end.and_time(last_instant).and_utc(),
    ))
}
