//! Validation of untrusted input against the persisted-entity shapes
//!
//! Everything read from storage or returned by the generation endpoint
//! passes through here before the rest of the system sees it. Validators
//! never panic and never stop at the first problem: every field-level
//! violation is collected as a `path: message` string so a corrupt record
//! or a drifting model response can be diagnosed in one pass.
//!
//! Constraints live here and only here; producers (`ScheduleItem::from_form`,
//! the transformer) are written to always emit values these checks accept.

pub mod migrate;
pub mod time;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{
    BlockType, ChatMessage, DayPlan, GeneratedSchedule, MAX_MESSAGE_LEN, Priority, ReminderType,
    ScheduleBlock, ScheduleItem, ScheduleSummary, Sender, TaskBreakdown, TaskForm, UserPreferences,
    Weekday, WeekSchedule,
};
use crate::state::{ChatState, NavigationState, ScheduleState, SurveyState, View};

/// Current schema version stamped into every persisted slice
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Maximum title length shared by tasks and generated block titles
pub const MAX_TITLE_LEN: usize = 100;

/// Every field-level violation found while validating one value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join(", "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// The individual `path: message` strings, in field order
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    fn one(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }
}

/// Accumulator for field violations within one validator
#[derive(Debug, Default)]
struct Check {
    errors: Vec<String>,
}

impl Check {
    fn fail(&mut self, path: &str, message: impl std::fmt::Display) {
        self.errors.push(format!("{}: {}", path, message));
    }

    /// Fold a nested validator's errors in under a path prefix
    fn nest(&mut self, prefix: &str, errors: ValidationErrors) {
        for message in errors.0 {
            self.errors.push(format!("{}.{}", prefix, message));
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Field extraction helpers
// ---------------------------------------------------------------------------

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, ValidationErrors> {
    value
        .as_object()
        .ok_or_else(|| ValidationErrors::one(format!("{} must be a JSON object", what)))
}

fn str_field<'a>(check: &mut Check, map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            check.fail(key, "must be a string");
            None
        }
        None => {
            check.fail(key, "is required");
            None
        }
    }
}

/// Optional string: absent or null is fine, any other non-string is not
fn opt_str_field<'a>(
    check: &mut Check,
    map: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a str> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(_) => {
            check.fail(key, "must be a string");
            None
        }
    }
}

fn bool_field(check: &mut Check, map: &Map<String, Value>, key: &str) -> bool {
    match map.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            check.fail(key, "must be a boolean");
            false
        }
        None => {
            check.fail(key, "is required");
            false
        }
    }
}

fn f64_field(check: &mut Check, map: &Map<String, Value>, key: &str) -> f64 {
    match map.get(key).and_then(Value::as_f64) {
        Some(n) => n,
        None => {
            check.fail(key, "must be a number");
            0.0
        }
    }
}

/// Positive integer field (ids, counters)
fn positive_u32_field(check: &mut Check, map: &Map<String, Value>, key: &str) -> u32 {
    match map.get(key).and_then(Value::as_u64) {
        Some(n) if n >= 1 && n <= u32::MAX as u64 => n as u32,
        Some(_) => {
            check.fail(key, "must be a positive integer");
            0
        }
        None => {
            check.fail(key, "must be a positive integer");
            0
        }
    }
}

fn bounded_str_field(
    check: &mut Check,
    map: &Map<String, Value>,
    key: &str,
    max_len: usize,
) -> String {
    let Some(s) = str_field(check, map, key) else {
        return String::new();
    };
    let len = s.chars().count();
    if len == 0 {
        check.fail(key, "cannot be empty");
    } else if len > max_len {
        check.fail(key, format!("exceeds {} characters", max_len));
    }
    s.to_string()
}

fn opt_date_field(check: &mut Check, map: &Map<String, Value>, key: &str) -> Option<NaiveDate> {
    let raw = opt_str_field(check, map, key)?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            check.fail(key, "must be a YYYY-MM-DD date");
            None
        }
    }
}

fn timestamp_field(check: &mut Check, map: &Map<String, Value>, key: &str) -> DateTime<Utc> {
    let fallback = DateTime::<Utc>::UNIX_EPOCH;
    let Some(raw) = str_field(check, map, key) else {
        return fallback;
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(_) => {
            check.fail(key, "must be an ISO-8601 timestamp");
            fallback
        }
    }
}

/// Field holding one variant of a string-renamed enum
fn enum_field<T: serde::de::DeserializeOwned>(
    check: &mut Check,
    map: &Map<String, Value>,
    key: &str,
) -> Option<T> {
    let raw = str_field(check, map, key)?;
    match serde_json::from_value(Value::String(raw.to_string())) {
        Ok(v) => Some(v),
        Err(_) => {
            check.fail(key, format!("unknown value \"{}\"", raw));
            None
        }
    }
}

/// 24-hour `H:MM` field
fn time_24h_field(check: &mut Check, map: &Map<String, Value>, key: &str) -> String {
    let Some(raw) = str_field(check, map, key) else {
        return String::new();
    };
    if !time::is_valid_24h(raw) {
        check.fail(key, "must be a 24-hour H:MM time");
    }
    raw.to_string()
}

/// `"H:MM-H:MM"` hour-range field; the range may wrap midnight
fn hour_range_field(check: &mut Check, map: &Map<String, Value>, key: &str) -> String {
    let Some(raw) = str_field(check, map, key) else {
        return String::new();
    };
    let valid = raw
        .split_once('-')
        .is_some_and(|(a, b)| time::is_valid_24h(a.trim()) && time::is_valid_24h(b.trim()));
    if !valid {
        check.fail(key, "must be an H:MM-H:MM hour range");
    }
    raw.to_string()
}

/// Literal "Yes"/"No" survey answer field
fn yes_no_field(check: &mut Check, map: &Map<String, Value>, key: &str) -> String {
    let Some(raw) = str_field(check, map, key) else {
        return String::new();
    };
    if raw != "Yes" && raw != "No" {
        check.fail(key, "must be \"Yes\" or \"No\"");
    }
    raw.to_string()
}

// ---------------------------------------------------------------------------
// Entity validators
// ---------------------------------------------------------------------------

/// Validate a manual task entry form
pub fn validate_task_form(value: &Value) -> Result<TaskForm, ValidationErrors> {
    let map = as_object(value, "task form")?;
    let mut check = Check::default();

    let name = bounded_str_field(&mut check, map, "name", MAX_TITLE_LEN);
    let start_time = time_24h_field(&mut check, map, "startTime");
    let end_time = time_24h_field(&mut check, map, "endTime");
    let due_date = opt_date_field(&mut check, map, "dueDate");
    let priority = enum_field::<Priority>(&mut check, map, "priority");

    // Cross-field rule, only meaningful once both times parse
    if let (Some(start), Some(end)) = (time::parse_24h(&start_time), time::parse_24h(&end_time))
        && start >= end
    {
        check.fail("endTime", "end time must be after start time");
    }

    check.finish()?;
    Ok(TaskForm {
        name,
        start_time,
        end_time,
        due_date,
        priority: priority.unwrap_or_default(),
    })
}

/// Validate one stored calendar entry
pub fn validate_schedule_item(value: &Value) -> Result<ScheduleItem, ValidationErrors> {
    let map = as_object(value, "schedule item")?;
    let mut check = Check::default();

    let id = positive_u32_field(&mut check, map, "id");
    let title = bounded_str_field(&mut check, map, "title", MAX_TITLE_LEN);
    let time = opt_str_field(&mut check, map, "time").map(str::to_string);
    if let Some(range) = &time
        && let Err(message) = time::check_range_12h(range)
    {
        check.fail("time", message);
    }
    let due_date = opt_date_field(&mut check, map, "dueDate");
    let priority = enum_field::<Priority>(&mut check, map, "priority");
    let completed = bool_field(&mut check, map, "completed");

    check.finish()?;
    Ok(ScheduleItem {
        id,
        title,
        time,
        due_date,
        priority: priority.unwrap_or_default(),
        completed,
    })
}

/// Validate one chat transcript entry
pub fn validate_message(value: &Value) -> Result<ChatMessage, ValidationErrors> {
    let map = as_object(value, "message")?;
    let mut check = Check::default();

    let id = positive_u32_field(&mut check, map, "id");
    let text = bounded_str_field(&mut check, map, "text", MAX_MESSAGE_LEN);
    let sender = enum_field::<Sender>(&mut check, map, "sender");
    let timestamp = timestamp_field(&mut check, map, "timestamp");

    check.finish()?;
    Ok(ChatMessage {
        id,
        text,
        sender: sender.unwrap_or(Sender::Ai),
        timestamp,
    })
}

/// Validate a preference profile
pub fn validate_user_preferences(value: &Value) -> Result<UserPreferences, ValidationErrors> {
    let map = as_object(value, "user preferences")?;
    let mut check = Check::default();

    let productive_hours = hour_range_field(&mut check, map, "productiveHours");
    let sleep_hours = hour_range_field(&mut check, map, "sleepHours");
    let sleep_schedule_working = yes_no_field(&mut check, map, "sleepScheduleWorking");
    let sleep_schedule_notes = opt_str_field(&mut check, map, "sleepScheduleNotes").map(str::to_string);
    let task_breakdown = enum_field::<TaskBreakdown>(&mut check, map, "taskBreakdown");
    let study_habits_working = yes_no_field(&mut check, map, "studyHabitsWorking");
    let study_habits_notes = opt_str_field(&mut check, map, "studyHabitsNotes").map(str::to_string);
    let reminder_type = enum_field::<ReminderType>(&mut check, map, "reminderType");

    check.finish()?;
    Ok(UserPreferences {
        productive_hours,
        sleep_hours,
        sleep_schedule_working,
        sleep_schedule_notes,
        task_breakdown: task_breakdown.unwrap_or(TaskBreakdown::LetAiDecide),
        study_habits_working,
        study_habits_notes,
        reminder_type: reminder_type.unwrap_or(ReminderType::Visual),
    })
}

/// Validate the seven-day schedule mapping
///
/// All seven short day keys must be present; unknown keys are rejected so a
/// typo cannot silently orphan a day's tasks.
pub fn validate_week_schedule(value: &Value) -> Result<WeekSchedule, ValidationErrors> {
    let map = as_object(value, "week schedule")?;
    let mut check = Check::default();
    let mut week = WeekSchedule::new();

    for key in map.keys() {
        if key.parse::<Weekday>().is_err() {
            check.fail(key, "is not a day key");
        }
    }

    for day in Weekday::ALL {
        let key = day.to_string();
        let Some(entries) = map.get(&key) else {
            check.fail(&key, "is required");
            continue;
        };
        let Some(entries) = entries.as_array() else {
            check.fail(&key, "must be an array");
            continue;
        };
        for (index, entry) in entries.iter().enumerate() {
            match validate_schedule_item(entry) {
                Ok(item) => week.push(day, item),
                Err(errors) => check.nest(&format!("{}[{}]", key, index), errors),
            }
        }
    }

    check.finish()?;
    Ok(week)
}

fn validate_schedule_block(value: &Value) -> Result<ScheduleBlock, ValidationErrors> {
    let map = as_object(value, "schedule block")?;
    let mut check = Check::default();

    let start_time = time_24h_field(&mut check, map, "start_time");
    let end_time = time_24h_field(&mut check, map, "end_time");
    let block_type = enum_field::<BlockType>(&mut check, map, "type");
    let title = bounded_str_field(&mut check, map, "title", MAX_TITLE_LEN);
    let location = opt_str_field(&mut check, map, "location").map(str::to_string);
    let credits = match map.get("credits") {
        Some(Value::Null) | None => None,
        Some(v) => match v.as_f64() {
            Some(n) => Some(n),
            None => {
                check.fail("credits", "must be a number");
                None
            }
        },
    };

    if let (Some(start), Some(end)) = (time::parse_24h(&start_time), time::parse_24h(&end_time))
        && start >= end
    {
        check.fail("end_time", "end time must be after start time");
    }

    check.finish()?;
    Ok(ScheduleBlock {
        start_time,
        end_time,
        block_type: block_type.unwrap_or(BlockType::Personal),
        title,
        location,
        credits,
    })
}

fn validate_schedule_summary(value: &Value) -> Result<ScheduleSummary, ValidationErrors> {
    let map = as_object(value, "schedule summary")?;
    let mut check = Check::default();

    let summary = ScheduleSummary {
        total_credits: f64_field(&mut check, map, "total_credits"),
        study_hours: f64_field(&mut check, map, "study_hours"),
        class_hours: f64_field(&mut check, map, "class_hours"),
        work_hours: f64_field(&mut check, map, "work_hours"),
        other_hours: f64_field(&mut check, map, "other_hours"),
        committed_hours: f64_field(&mut check, map, "committed_hours"),
        available_hours: f64_field(&mut check, map, "available_hours"),
        buffer_hours: f64_field(&mut check, map, "buffer_hours"),
    };

    check.finish()?;
    Ok(summary)
}

/// Validate a generation-endpoint response body
///
/// This is the gate between the model and the transformer: a result that
/// fails here is treated as a failed generation attempt and the stored
/// schedule stays untouched.
pub fn validate_generated_schedule(value: &Value) -> Result<GeneratedSchedule, ValidationErrors> {
    let map = as_object(value, "generated schedule")?;
    let mut check = Check::default();

    let summary = match map.get("summary") {
        Some(v) => match validate_schedule_summary(v) {
            Ok(summary) => Some(summary),
            Err(errors) => {
                check.nest("summary", errors);
                None
            }
        },
        None => {
            check.fail("summary", "is required");
            None
        }
    };

    let mut weekly_schedule = Vec::new();
    match map.get("weekly_schedule").map(Value::as_array) {
        Some(Some(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                let path = format!("weekly_schedule[{}]", index);
                let Ok(entry_map) = as_object(entry, "day entry") else {
                    check.fail(&path, "must be an object");
                    continue;
                };
                let mut day_check = Check::default();
                let day = str_field(&mut day_check, entry_map, "day")
                    .unwrap_or_default()
                    .to_string();
                let mut blocks = Vec::new();
                match entry_map.get("blocks").map(Value::as_array) {
                    Some(Some(raw_blocks)) => {
                        for (block_index, raw_block) in raw_blocks.iter().enumerate() {
                            match validate_schedule_block(raw_block) {
                                Ok(block) => blocks.push(block),
                                Err(errors) => {
                                    day_check.nest(&format!("blocks[{}]", block_index), errors)
                                }
                            }
                        }
                    }
                    _ => day_check.fail("blocks", "must be an array"),
                }
                match day_check.finish() {
                    Ok(()) => weekly_schedule.push(DayPlan { day, blocks }),
                    Err(errors) => check.nest(&path, errors),
                }
            }
        }
        _ => check.fail("weekly_schedule", "must be an array"),
    }

    check.finish()?;
    Ok(GeneratedSchedule {
        // Only reachable with a validated summary in hand
        summary: summary.unwrap_or(ScheduleSummary {
            total_credits: 0.0,
            study_hours: 0.0,
            class_hours: 0.0,
            work_hours: 0.0,
            other_hours: 0.0,
            committed_hours: 0.0,
            available_hours: 0.0,
            buffer_hours: 0.0,
        }),
        weekly_schedule,
    })
}

// ---------------------------------------------------------------------------
// Persisted slice validators
// ---------------------------------------------------------------------------

fn version_field(check: &mut Check, map: &Map<String, Value>) -> String {
    str_field(check, map, "version").unwrap_or_default().to_string()
}

/// Validate the survey slice
pub fn validate_survey_state(value: &Value) -> Result<SurveyState, ValidationErrors> {
    let map = as_object(value, "survey state")?;
    let mut check = Check::default();

    let version = version_field(&mut check, map);
    let show_survey = bool_field(&mut check, map, "showSurvey");
    let current_question_index = match map.get("currentQuestionIndex").and_then(Value::as_u64) {
        Some(n) => n as usize,
        None => {
            check.fail("currentQuestionIndex", "must be a non-negative integer");
            0
        }
    };

    let mut answers = Vec::new();
    match map.get("surveyAnswers").map(Value::as_array) {
        Some(Some(raw)) => {
            for (index, entry) in raw.iter().enumerate() {
                match entry.as_str() {
                    Some(s) => answers.push(s.to_string()),
                    None => check.fail(&format!("surveyAnswers[{}]", index), "must be a string"),
                }
            }
        }
        _ => check.fail("surveyAnswers", "must be an array"),
    }

    let preferences = match map.get("userPreferences") {
        Some(Value::Null) | None => None,
        Some(v) => match validate_user_preferences(v) {
            Ok(prefs) => Some(prefs),
            Err(errors) => {
                check.nest("userPreferences", errors);
                None
            }
        },
    };

    check.finish()?;
    Ok(SurveyState {
        version,
        show_survey,
        current_question_index,
        answers,
        preferences,
    })
}

/// Validate the schedule slice
pub fn validate_schedule_state(value: &Value) -> Result<ScheduleState, ValidationErrors> {
    let map = as_object(value, "schedule state")?;
    let mut check = Check::default();

    let version = version_field(&mut check, map);
    let items = match map.get("scheduleItems") {
        Some(v) => match validate_week_schedule(v) {
            Ok(week) => week,
            Err(errors) => {
                check.nest("scheduleItems", errors);
                WeekSchedule::new()
            }
        },
        None => {
            check.fail("scheduleItems", "is required");
            WeekSchedule::new()
        }
    };
    let next_task_id = positive_u32_field(&mut check, map, "nextTaskId");

    check.finish()?;
    Ok(ScheduleState {
        version,
        items,
        next_task_id,
    })
}

/// Validate the chat slice
pub fn validate_chat_state(value: &Value) -> Result<ChatState, ValidationErrors> {
    let map = as_object(value, "chat state")?;
    let mut check = Check::default();

    let version = version_field(&mut check, map);
    let mut messages = Vec::new();
    match map.get("messages").map(Value::as_array) {
        Some(Some(raw)) => {
            for (index, entry) in raw.iter().enumerate() {
                match validate_message(entry) {
                    Ok(message) => messages.push(message),
                    Err(errors) => check.nest(&format!("messages[{}]", index), errors),
                }
            }
        }
        _ => check.fail("messages", "must be an array"),
    }

    // Absent on records written before the onboarding flow existed
    let onboarding_completed = match map.get("onboardingCompleted") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Null) | None => false,
        Some(_) => {
            check.fail("onboardingCompleted", "must be a boolean");
            false
        }
    };

    check.finish()?;
    Ok(ChatState {
        version,
        messages,
        onboarding_completed,
    })
}

/// Validate the navigation slice
pub fn validate_navigation_state(value: &Value) -> Result<NavigationState, ValidationErrors> {
    let map = as_object(value, "navigation state")?;
    let mut check = Check::default();

    let version = version_field(&mut check, map);
    let current_date = timestamp_field(&mut check, map, "currentDate");
    let selected_day = match map.get("selectedDay").and_then(Value::as_u64) {
        Some(n) if n <= 6 => n as u8,
        _ => {
            check.fail("selectedDay", "must be an integer in 0..=6");
            0
        }
    };
    let view = enum_field::<View>(&mut check, map, "currentView");

    check.finish()?;
    Ok(NavigationState {
        version,
        current_date,
        selected_day,
        view: view.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_task_form_accepts_valid() {
        let form = validate_task_form(&json!({
            "name": "Read chapter 4",
            "startTime": "09:00",
            "endTime": "10:30",
            "priority": "medium",
        }))
        .unwrap();
        assert_eq!(form.name, "Read chapter 4");
        assert_eq!(form.due_date, None);
    }

    #[test]
    fn test_validate_task_form_collects_all_errors() {
        let errors = validate_task_form(&json!({
            "name": "",
            "startTime": "9am",
            "endTime": "10:30",
            "priority": "urgent",
        }))
        .unwrap_err();
        let joined = errors.to_string();
        assert!(joined.contains("name:"));
        assert!(joined.contains("startTime:"));
        assert!(joined.contains("priority:"));
    }

    #[test]
    fn test_validate_task_form_start_before_end() {
        let errors = validate_task_form(&json!({
            "name": "Nap",
            "startTime": "14:00",
            "endTime": "14:00",
            "priority": "low",
        }))
        .unwrap_err();
        assert!(errors.to_string().contains("endTime: end time must be after start time"));

        // Unpadded hours compare by clock value, not lexicographically
        assert!(
            validate_task_form(&json!({
                "name": "Evening review",
                "startTime": "9:00",
                "endTime": "17:00",
                "priority": "low",
            }))
            .is_ok()
        );
    }

    #[test]
    fn test_validate_schedule_item_bad_time_mentions_field() {
        let errors = validate_schedule_item(&json!({
            "id": 1,
            "title": "Ghost block",
            "time": "25:00 - 26:00",
            "priority": "high",
            "completed": false,
        }))
        .unwrap_err();
        assert!(errors.messages().iter().any(|m| m.starts_with("time:")));
    }

    #[test]
    fn test_validate_schedule_item_rejects_zero_id() {
        let errors = validate_schedule_item(&json!({
            "id": 0,
            "title": "t",
            "priority": "low",
            "completed": false,
        }))
        .unwrap_err();
        assert!(errors.to_string().contains("id: must be a positive integer"));
    }

    #[test]
    fn test_validate_message() {
        let msg = validate_message(&json!({
            "id": 3,
            "text": "hello",
            "sender": "user",
            "timestamp": "2024-01-01T08:00:00Z",
        }))
        .unwrap();
        assert_eq!(msg.sender, Sender::User);

        let errors = validate_message(&json!({
            "id": 3,
            "text": "",
            "sender": "bot",
            "timestamp": "yesterday",
        }))
        .unwrap_err();
        let joined = errors.to_string();
        assert!(joined.contains("text:"));
        assert!(joined.contains("sender:"));
        assert!(joined.contains("timestamp:"));
    }

    #[test]
    fn test_validate_week_schedule_requires_all_days() {
        let errors = validate_week_schedule(&json!({"Mon": []})).unwrap_err();
        assert!(errors.to_string().contains("Sun: is required"));
    }

    #[test]
    fn test_validate_week_schedule_rejects_unknown_key() {
        let mut value = json!({});
        for day in Weekday::ALL {
            value[day.to_string()] = json!([]);
        }
        value["Someday"] = json!([]);
        let errors = validate_week_schedule(&value).unwrap_err();
        assert!(errors.to_string().contains("Someday: is not a day key"));
    }

    #[test]
    fn test_validate_week_schedule_nests_item_errors() {
        let mut value = json!({});
        for day in Weekday::ALL {
            value[day.to_string()] = json!([]);
        }
        value["Wed"] = json!([{ "id": 1, "title": "", "priority": "low", "completed": false }]);
        let errors = validate_week_schedule(&value).unwrap_err();
        assert!(errors.to_string().contains("Wed[0].title:"));
    }

    fn generated_value() -> Value {
        json!({
            "summary": {
                "total_credits": 15.0,
                "study_hours": 20.0,
                "class_hours": 15.0,
                "work_hours": 10.0,
                "other_hours": 8.0,
                "committed_hours": 53.0,
                "available_hours": 88.0,
                "buffer_hours": 35.0,
            },
            "weekly_schedule": [
                {
                    "day": "Monday",
                    "blocks": [
                        {
                            "start_time": "09:00",
                            "end_time": "10:00",
                            "type": "class",
                            "title": "Calc",
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_validate_generated_schedule_accepts_contract() {
        let schedule = validate_generated_schedule(&generated_value()).unwrap();
        assert_eq!(schedule.total_blocks(), 1);
        assert_eq!(schedule.weekly_schedule[0].day, "Monday");
        assert_eq!(schedule.summary.buffer_hours, 35.0);
    }

    #[test]
    fn test_validate_generated_schedule_rejects_bad_block() {
        let mut value = generated_value();
        value["weekly_schedule"][0]["blocks"][0]["type"] = json!("ritual");
        value["weekly_schedule"][0]["blocks"][0]["end_time"] = json!("08:00");
        let errors = validate_generated_schedule(&value).unwrap_err();
        let joined = errors.to_string();
        assert!(joined.contains("weekly_schedule[0].blocks[0].type:"));
        assert!(joined.contains("end_time: end time must be after start time"));
    }

    #[test]
    fn test_validate_generated_schedule_requires_summary() {
        let mut value = generated_value();
        value.as_object_mut().unwrap().remove("summary");
        let errors = validate_generated_schedule(&value).unwrap_err();
        assert!(errors.to_string().contains("summary: is required"));
    }

    #[test]
    fn test_validate_survey_state() {
        let state = validate_survey_state(&json!({
            "version": SCHEMA_VERSION,
            "showSurvey": true,
            "currentQuestionIndex": 2,
            "surveyAnswers": ["9:00-17:00", "23:00-7:00"],
            "userPreferences": null,
        }))
        .unwrap();
        assert!(state.show_survey);
        assert_eq!(state.answers.len(), 2);
        assert!(state.preferences.is_none());
    }

    #[test]
    fn test_validate_chat_state_defaults_onboarding_flag() {
        let state = validate_chat_state(&json!({
            "version": SCHEMA_VERSION,
            "messages": [],
        }))
        .unwrap();
        assert!(!state.onboarding_completed);
    }

    #[test]
    fn test_validate_navigation_state_bounds_selected_day() {
        let errors = validate_navigation_state(&json!({
            "version": SCHEMA_VERSION,
            "currentDate": "2024-01-01T00:00:00Z",
            "selectedDay": 7,
            "currentView": "main",
        }))
        .unwrap_err();
        assert!(errors.to_string().contains("selectedDay:"));
    }

    #[test]
    fn test_non_object_input_is_one_error() {
        let errors = validate_schedule_item(&json!("not an object")).unwrap_err();
        assert_eq!(errors.messages().len(), 1);
    }
}
