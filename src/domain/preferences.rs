//! Survey questions and the preference profile they produce

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Separator a survey answer uses to carry an embedded free-text note
pub const NOTES_SEPARATOR: &str = " | Notes: ";

/// How the student wants large tasks broken down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskBreakdown {
    #[serde(rename = "Keep tasks whole")]
    KeepWhole,
    #[serde(rename = "Break into 30-min chunks")]
    ThirtyMinuteChunks,
    #[serde(rename = "Break into 1-hour chunks")]
    HourChunks,
    #[serde(rename = "Let AI decide")]
    LetAiDecide,
}

/// What kind of reminders the student responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderType {
    #[serde(rename = "Visual notifications")]
    Visual,
    #[serde(rename = "Sound alerts")]
    Sound,
    #[serde(rename = "Gentle nudges")]
    GentleNudges,
    #[serde(rename = "No reminders")]
    None,
}

/// Student survey answers, captured once at survey completion
///
/// Immutable after capture except by completing a fresh survey. The hour
/// ranges keep the exact `H:MM-H:MM` strings the student gave (sleep ranges
/// may wrap midnight); satisfaction answers are the literal "Yes"/"No" with
/// any free-text note split out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Most productive hours, e.g. "9:00-17:00"
    pub productive_hours: String,

    /// Usual sleep window, e.g. "23:00-7:00"
    pub sleep_hours: String,

    /// Whether the current sleep schedule is working ("Yes"/"No")
    pub sleep_schedule_working: String,

    /// Free-text note attached to the sleep answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_schedule_notes: Option<String>,

    /// Task breakdown preference
    pub task_breakdown: TaskBreakdown,

    /// Whether current study habits are working ("Yes"/"No")
    pub study_habits_working: String,

    /// Free-text note attached to the study-habits answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_habits_notes: Option<String>,

    /// Reminder preference
    pub reminder_type: ReminderType,
}

impl UserPreferences {
    /// Build preferences from the ordered survey answers
    ///
    /// The answer order is fixed by [`SURVEY_QUESTIONS`]; the two
    /// satisfaction answers may embed a note after [`NOTES_SEPARATOR`].
    /// An invalid result is a caller bug (the survey flow controls the
    /// ordering), so this errors rather than returning a validation list.
    pub fn from_answers(answers: &[String]) -> Result<Self> {
        debug!(count = answers.len(), "UserPreferences::from_answers: called");
        if answers.len() != SURVEY_QUESTIONS.len() {
            eyre::bail!(
                "Invalid user preferences: expected {} answers, got {}",
                SURVEY_QUESTIONS.len(),
                answers.len()
            );
        }

        let (sleep_working, sleep_notes) = split_notes(&answers[2]);
        let (habits_working, habits_notes) = split_notes(&answers[4]);

        let raw = serde_json::json!({
            "productiveHours": answers[0],
            "sleepHours": answers[1],
            "sleepScheduleWorking": sleep_working,
            "sleepScheduleNotes": sleep_notes,
            "taskBreakdown": answers[3],
            "studyHabitsWorking": habits_working,
            "studyHabitsNotes": habits_notes,
            "reminderType": answers[5],
        });

        crate::schema::validate_user_preferences(&raw)
            .map_err(|errors| eyre::eyre!("Invalid user preferences: {}", errors))
    }
}

/// Split an answer of the form `"<value> | Notes: <text>"`
///
/// Answers without the separator pass through with no note; an empty note
/// after the separator is treated as absent.
fn split_notes(answer: &str) -> (String, Option<String>) {
    match answer.split_once(NOTES_SEPARATOR) {
        Some((value, note)) => {
            let note = note.trim();
            let note = (!note.is_empty()).then(|| note.to_string());
            (value.trim().to_string(), note)
        }
        None => (answer.trim().to_string(), None),
    }
}

/// One onboarding survey question
#[derive(Debug, Clone, Copy)]
pub struct SurveyQuestion {
    /// Stable question id (1-based, matches answer position + 1)
    pub id: u32,
    /// Question text shown to the student
    pub question: &'static str,
    /// Fixed choices; empty for free-form answers
    pub options: &'static [&'static str],
}

/// The onboarding survey, in answer order
///
/// Positions here are load-bearing: `UserPreferences::from_answers` maps
/// answers to fields by index.
pub const SURVEY_QUESTIONS: [SurveyQuestion; 6] = [
    SurveyQuestion {
        id: 1,
        question: "What hours of the day are you most productive?",
        options: &[],
    },
    SurveyQuestion {
        id: 2,
        question: "What hours do you usually sleep?",
        options: &[],
    },
    SurveyQuestion {
        id: 3,
        question: "Is your current sleep schedule working for you?",
        options: &["Yes", "No"],
    },
    SurveyQuestion {
        id: 4,
        question: "How do you prefer to break down large tasks?",
        options: &[
            "Keep tasks whole",
            "Break into 30-min chunks",
            "Break into 1-hour chunks",
            "Let AI decide",
        ],
    },
    SurveyQuestion {
        id: 5,
        question: "Are your current study habits working for you?",
        options: &["Yes", "No"],
    },
    SurveyQuestion {
        id: 6,
        question: "What type of reminders work best for you?",
        options: &[
            "Visual notifications",
            "Sound alerts",
            "Gentle nudges",
            "No reminders",
        ],
    },
];
