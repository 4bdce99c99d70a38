/*
 * Responsibility
 * - Request DTO for creating a journal entry
 * - validate(): required (truthy) fields, field types, mood range
 * - owner id never comes from the body (unknown fields such as `user_id` are ignored)
 */
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::NewJournalEntry;

pub const MOOD_MIN: i64 = 1;
pub const MOOD_MAX: i64 = 5;

/// Fields are kept as raw JSON so that "missing" can be decided before types.
#[derive(Debug, Deserialize)]
pub struct CreateJournalEntryRequest {
    pub title: Option<Value>,
    pub body: Option<Value>,
    pub mood: Option<Value>,
    pub date: Option<Value>,
}

// null / false / 0 / "" (an absent field deserializes to None)
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn text(field: &str, value: Value) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(AppError::InvalidBody(format!(
            "`{field}` must be a string, got {other}"
        ))),
    }
}

// Integral numbers only; `3.0` is 3.
fn mood(value: Value) -> Result<i32, AppError> {
    let number = match &value {
        Value::Number(n) => n.as_f64().filter(|f| f.fract() == 0.0),
        _ => None,
    };
    let Some(number) = number else {
        return Err(AppError::InvalidBody(format!(
            "`mood` must be an integer, got {value}"
        )));
    };

    if !(MOOD_MIN as f64..=MOOD_MAX as f64).contains(&number) {
        return Err(AppError::MoodOutOfRange);
    }
    Ok(number as i32)
}

impl CreateJournalEntryRequest {
    /// Checks the payload and binds it to its owner.
    ///
    /// Any falsy field (absent, `null`, `false`, `0`, `""`) is "missing", except
    /// that a numeric `mood` of `0` is present and fails the range check instead.
    pub fn validate(self, user_id: Uuid) -> Result<NewJournalEntry, AppError> {
        let mood_present = |v: &Value| v.is_number() || !is_falsy(v);
        let (Some(title), Some(body), Some(mood_value), Some(date)) = (
            self.title.filter(|v| !is_falsy(v)),
            self.body.filter(|v| !is_falsy(v)),
            self.mood.filter(mood_present),
            self.date.filter(|v| !is_falsy(v)),
        ) else {
            return Err(AppError::MissingFields);
        };

        Ok(NewJournalEntry {
            user_id,
            title: text("title", title)?,
            body: text("body", body)?,
            mood: mood(mood_value)?,
            date: text("date", date)?,
        })
    }
}
